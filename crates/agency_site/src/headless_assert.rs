//! Assertions over an observed site state

use std::collections::HashMap;

use agency_layout::ElementKind;

use crate::app::AgencyApp;

/// What a headless probe observed at one point in time
#[derive(Debug, Clone, Default)]
pub struct DiagnosticsSnapshot {
    /// Elements with a DOM id, keyed by that id
    pub elements: HashMap<String, DiagnosticsElement>,
    /// Visible headings inside the page slot
    pub headings: Vec<String>,
    pub route: String,
    pub menu_open: bool,
    pub notifications: Vec<String>,
    pub mounted_pages: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DiagnosticsElement {
    pub text: Option<String>,
    pub visible: bool,
}

impl DiagnosticsSnapshot {
    pub fn capture(app: &AgencyApp) -> Self {
        let tree = app.tree();
        let elements = tree
            .find_all(tree.root(), |n| n.dom_id().is_some())
            .into_iter()
            .filter_map(|id| {
                let dom_id = tree.get(id)?.dom_id()?.to_string();
                let text = tree.text_content(id);
                Some((
                    dom_id,
                    DiagnosticsElement {
                        text: (!text.is_empty()).then_some(text),
                        visible: tree.is_visible(id),
                    },
                ))
            })
            .collect();

        let main = app.shell().main();
        let headings = tree
            .find_all(main, |n| matches!(n.kind(), ElementKind::Heading(_)))
            .into_iter()
            .filter(|id| tree.is_visible(*id))
            .map(|id| tree.text_content(id))
            .collect();

        Self {
            elements,
            headings,
            route: app.route().path().to_string(),
            menu_open: app.is_menu_open(),
            notifications: app.notifications().to_vec(),
            mounted_pages: app.mounted_pages().into_iter().map(String::from).collect(),
        }
    }
}

/// Assertion result with structured failure details
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionResult {
    Passed,
    Failed { code: String, message: String },
}

impl AssertionResult {
    fn failed(code: &str, message: String) -> Self {
        AssertionResult::Failed {
            code: code.to_string(),
            message,
        }
    }
}

pub fn evaluate_assert_exists(id: &str, snapshot: &DiagnosticsSnapshot) -> AssertionResult {
    if snapshot.elements.contains_key(id) {
        AssertionResult::Passed
    } else {
        AssertionResult::failed("missing_element", format!("{id}: element not found"))
    }
}

pub fn evaluate_assert_text_contains(
    id: &str,
    expected: &str,
    snapshot: &DiagnosticsSnapshot,
) -> AssertionResult {
    let Some(element) = snapshot.elements.get(id) else {
        return AssertionResult::failed("missing_element", format!("{id}: element not found"));
    };
    let Some(text) = element.text.as_deref() else {
        return AssertionResult::failed("missing_text", format!("{id}: text not available"));
    };
    if text.contains(expected) {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "text_mismatch",
            format!("{id}: expected substring '{expected}', got '{text}'"),
        )
    }
}

pub fn evaluate_assert_heading(text: &str, snapshot: &DiagnosticsSnapshot) -> AssertionResult {
    match snapshot.headings.iter().filter(|h| *h == text).count() {
        1 => AssertionResult::Passed,
        0 => AssertionResult::failed(
            "missing_heading",
            format!("heading '{text}' not found in {:?}", snapshot.headings),
        ),
        n => AssertionResult::failed(
            "duplicate_heading",
            format!("heading '{text}' rendered {n} times"),
        ),
    }
}

pub fn evaluate_assert_route(path: &str, snapshot: &DiagnosticsSnapshot) -> AssertionResult {
    if snapshot.route == path {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "route_mismatch",
            format!("expected route '{path}', at '{}'", snapshot.route),
        )
    }
}

pub fn evaluate_assert_menu_open(open: bool, snapshot: &DiagnosticsSnapshot) -> AssertionResult {
    if snapshot.menu_open == open {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "menu_state_mismatch",
            format!("expected menu open={open}, got open={}", snapshot.menu_open),
        )
    }
}

pub fn evaluate_assert_notifications(
    count: usize,
    snapshot: &DiagnosticsSnapshot,
) -> AssertionResult {
    let actual = snapshot.notifications.len();
    if actual == count {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "notification_count_mismatch",
            format!("expected {count} notification(s), got {actual}"),
        )
    }
}

pub fn evaluate_assert_mounted_pages(
    pages: &[String],
    snapshot: &DiagnosticsSnapshot,
) -> AssertionResult {
    if snapshot.mounted_pages == pages {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "mounted_pages_mismatch",
            format!("expected {pages:?}, got {:?}", snapshot.mounted_pages),
        )
    }
}
