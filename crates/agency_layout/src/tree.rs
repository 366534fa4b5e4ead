//! Render tree
//!
//! Mounted elements live in a slotmap keyed by `NodeId`. The tree owns the
//! structure and the host behaviour of nodes (event bubbling, following
//! links, form constraint validation and submission); animated values live
//! in [`RenderState`](crate::render_state::RenderState).

use agency_core::{event_types, Event, EventData, EventType};
use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, Key, KeyData, SlotMap};
use smallvec::SmallVec;

use crate::element::{Element, ElementKind, Handler, Visibility};
use crate::motion::MotionProps;

new_key_type! {
    pub struct NodeId;
}

impl NodeId {
    /// Stable integer form used as an event target
    pub fn to_raw(self) -> u64 {
        self.data().as_ffi()
    }

    pub fn from_raw(raw: u64) -> Self {
        KeyData::from_ffi(raw).into()
    }
}

/// Size of the host viewport in CSS pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

/// A mounted element
pub struct Node<M> {
    kind: ElementKind,
    key: Option<String>,
    dom_id: Option<String>,
    class: Option<String>,
    text: Option<String>,
    visibility: Visibility,
    motion: Option<MotionProps>,
    handlers: SmallVec<[(EventType, Handler<M>); 2]>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Current value of a form control
    value: String,
}

impl<M> Node<M> {
    fn from_element(element: &mut Element<M>, parent: Option<NodeId>) -> Self {
        Self {
            kind: element.kind.clone(),
            key: element.key.take(),
            dom_id: element.id.take(),
            class: element.class.take(),
            text: element.text.take(),
            visibility: element.visibility,
            motion: element.motion.take(),
            handlers: std::mem::take(&mut element.handlers),
            parent,
            children: Vec::new(),
            value: String::new(),
        }
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn dom_id(&self) -> Option<&str> {
        self.dom_id.as_deref()
    }

    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn motion(&self) -> Option<&MotionProps> {
        self.motion.as_ref()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn has_handler(&self, event_type: EventType) -> bool {
        self.handlers.iter().any(|(t, _)| *t == event_type)
    }
}

/// Constraint validation result for a form control
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Validity {
    Valid,
    /// Required control with a blank value
    ValueMissing,
}

impl Validity {
    pub fn is_valid(&self) -> bool {
        *self == Validity::Valid
    }

    pub fn reason(&self) -> &'static str {
        match self {
            Validity::Valid => "valid",
            Validity::ValueMissing => "value_missing",
        }
    }

    /// Validate a control value. Whitespace-only counts as missing; any
    /// other content is accepted as typed.
    pub fn check(required: bool, value: &str) -> Self {
        if required && value.trim().is_empty() {
            Validity::ValueMissing
        } else {
            Validity::Valid
        }
    }
}

/// Outcome of dispatching one event
pub struct Dispatch<M> {
    pub messages: Vec<M>,
    pub default_prevented: bool,
    /// Number of handlers that ran
    pub handled: usize,
}

impl<M> Default for Dispatch<M> {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            default_prevented: false,
            handled: 0,
        }
    }
}

/// What happened when a form was asked to submit
#[derive(Clone, Debug, PartialEq)]
pub enum Submission {
    /// Constraint validation failed; no submit event was fired
    Blocked { invalid: Vec<(NodeId, Validity)> },
    /// The submit event fired on `form`
    Submitted {
        form: NodeId,
        fields: Vec<(String, String)>,
        default_prevented: bool,
    },
}

/// Outcome of activating (clicking) a node
pub struct Activation<M> {
    pub messages: Vec<M>,
    /// Path of a link whose default navigation was not prevented
    pub follow: Option<String>,
    pub submission: Option<Submission>,
}

impl<M> Default for Activation<M> {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            follow: None,
            submission: None,
        }
    }
}

/// Tree of mounted nodes
pub struct RenderTree<M> {
    nodes: SlotMap<NodeId, Node<M>>,
    root: NodeId,
    viewport: Viewport,
    clock_ms: u64,
}

impl<M> RenderTree<M> {
    /// Create a tree whose root is an empty `div`
    pub fn new(viewport: Viewport) -> Self {
        let mut nodes = SlotMap::with_key();
        let mut root_el = Element::new(ElementKind::Div).id("root");
        let root = nodes.insert(Node::from_element(&mut root_el, None));
        Self {
            nodes,
            root,
            viewport,
            clock_ms: 0,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, node: NodeId) -> Option<&Node<M>> {
        self.nodes.get(node)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Timestamp stamped on dispatched events
    pub fn set_clock(&mut self, now_ms: u64) {
        self.clock_ms = now_ms;
    }

    // ========================================================================
    // Structure
    // ========================================================================

    /// Mount `element` as the last child of `parent`. Returns the new node,
    /// or `None` when `parent` is not in the tree.
    pub fn mount(&mut self, parent: NodeId, element: Element<M>) -> Option<NodeId> {
        if !self.nodes.contains_key(parent) {
            return None;
        }
        let node = self.insert(parent, element);
        tracing::trace!("tree: mounted {:?} under {:?}", node, parent);
        Some(node)
    }

    fn insert(&mut self, parent: NodeId, mut element: Element<M>) -> NodeId {
        let children = std::mem::take(&mut element.children);
        let node = self
            .nodes
            .insert(Node::from_element(&mut element, Some(parent)));
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(node);
        }
        for child in children {
            self.insert(node, child);
        }
        node
    }

    /// Remove `node` and its subtree, returning every removed id. The root
    /// cannot be removed.
    pub fn remove(&mut self, node: NodeId) -> Vec<NodeId> {
        if node == self.root || !self.nodes.contains_key(node) {
            return Vec::new();
        }
        let removed = self.descendants(node);
        if let Some(parent) = self.nodes.get(node).and_then(|n| n.parent) {
            if let Some(p) = self.nodes.get_mut(parent) {
                p.children.retain(|c| *c != node);
            }
        }
        for id in &removed {
            self.nodes.remove(*id);
        }
        tracing::trace!("tree: removed {} node(s) at {:?}", removed.len(), node);
        removed
    }

    /// `node` and its subtree in document order
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            let Some(n) = self.nodes.get(id) else {
                continue;
            };
            out.push(id);
            stack.extend(n.children.iter().rev().copied());
        }
        out
    }

    /// `node` followed by its ancestors up to the root
    pub fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            let Some(n) = self.nodes.get(id) else {
                break;
            };
            out.push(id);
            cursor = n.parent;
        }
        out
    }

    /// Closest ancestor-or-self that satisfies `pred`
    pub fn closest(&self, node: NodeId, pred: impl Fn(&Node<M>) -> bool) -> Option<NodeId> {
        self.ancestors(node)
            .into_iter()
            .find(|id| self.nodes.get(*id).is_some_and(&pred))
    }

    /// Nodes under `from` (inclusive) that satisfy `pred`, in document order
    pub fn find_all(&self, from: NodeId, pred: impl Fn(&Node<M>) -> bool) -> Vec<NodeId> {
        self.descendants(from)
            .into_iter()
            .filter(|id| self.nodes.get(*id).is_some_and(&pred))
            .collect()
    }

    /// Nearest motion descendants of `node` (not including `node`): motion
    /// nodes reached without passing through another motion node
    pub fn motion_children(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self
            .nodes
            .get(node)
            .map(|n| n.children.iter().rev().copied().collect())
            .unwrap_or_default();
        while let Some(id) = stack.pop() {
            let Some(n) = self.nodes.get(id) else {
                continue;
            };
            if n.motion.is_some() {
                out.push(id);
            } else {
                stack.extend(n.children.iter().rev().copied());
            }
        }
        out
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn find_by_id(&self, dom_id: &str) -> Option<NodeId> {
        self.find_by_id_in(self.root, dom_id)
    }

    /// Like `find_by_id`, limited to the subtree at `from`
    pub fn find_by_id_in(&self, from: NodeId, dom_id: &str) -> Option<NodeId> {
        self.descendants(from)
            .into_iter()
            .find(|id| self.nodes[*id].dom_id() == Some(dom_id))
    }

    pub fn find_by_key(&self, key: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|id| self.nodes[*id].key() == Some(key))
    }

    /// Nodes whose own text equals `text`
    pub fn find_text(&self, text: &str) -> Vec<NodeId> {
        self.find_all(self.root, |n| n.text() == Some(text))
    }

    /// Form control named `name`
    pub fn find_control(&self, name: &str) -> Option<NodeId> {
        self.find_control_in(self.root, name)
    }

    /// First form control named `name` within the subtree at `from`
    pub fn find_control_in(&self, from: NodeId, name: &str) -> Option<NodeId> {
        self.find_all(from, |n| {
            matches!(&n.kind, ElementKind::Input { name: control, .. } if control == name)
        })
        .into_iter()
        .next()
    }

    /// Text of a subtree, pieces joined by single spaces
    pub fn text_content(&self, node: NodeId) -> String {
        self.descendants(node)
            .into_iter()
            .filter_map(|id| self.nodes[id].text())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// `(level, text)` of every heading under `from`
    pub fn headings(&self, from: NodeId) -> Vec<(u8, String)> {
        self.find_all(from, |n| matches!(n.kind, ElementKind::Heading(_)))
            .into_iter()
            .filter_map(|id| match self.nodes[id].kind {
                ElementKind::Heading(level) => Some((level, self.text_content(id))),
                _ => None,
            })
            .collect()
    }

    /// `(label, to)` of every link under `from`
    pub fn links(&self, from: NodeId) -> Vec<(String, String)> {
        self.find_all(from, |n| matches!(n.kind, ElementKind::Link { .. }))
            .into_iter()
            .filter_map(|id| match &self.nodes[id].kind {
                ElementKind::Link { to } => Some((self.text_content(id), to.clone())),
                _ => None,
            })
            .collect()
    }

    /// Shown at the current viewport width, together with every ancestor
    pub fn is_visible(&self, node: NodeId) -> bool {
        let width = self.viewport.width;
        let chain = self.ancestors(node);
        !chain.is_empty()
            && chain
                .iter()
                .all(|id| self.nodes[*id].visibility.shows_at(width))
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Dispatch `event_type` at `target`, bubbling to the root
    pub fn dispatch(&self, target: NodeId, event_type: EventType, data: EventData) -> Dispatch<M> {
        let mut event = Event::new(event_type, target.to_raw())
            .with_data(data)
            .at(self.clock_ms);
        let mut out = Dispatch::default();

        for id in self.ancestors(target) {
            let node = &self.nodes[id];
            event.current_target = id.to_raw();
            for (_, handler) in node.handlers.iter().filter(|(t, _)| *t == event_type) {
                out.handled += 1;
                if let Some(message) = handler(&mut event) {
                    out.messages.push(message);
                }
            }
            if event.is_propagation_stopped() {
                break;
            }
        }

        out.default_prevented = event.is_default_prevented();
        tracing::trace!(
            "tree: {} at {:?} ran {} handler(s)",
            event.name(),
            target,
            out.handled
        );
        out
    }

    /// Click `node`: run click handlers, then the host default action
    /// (follow a link, or submit the enclosing form from a submit button)
    pub fn activate(&self, node: NodeId) -> Activation<M> {
        let click = self.dispatch(node, event_types::CLICK, EventData::None);
        let mut activation = Activation {
            messages: click.messages,
            ..Default::default()
        };
        if click.default_prevented {
            return activation;
        }

        if let Some(link) = self.closest(node, |n| matches!(n.kind, ElementKind::Link { .. })) {
            if let ElementKind::Link { to } = &self.nodes[link].kind {
                activation.follow = Some(to.clone());
            }
        } else if let Some(button) =
            self.closest(node, |n| matches!(n.kind, ElementKind::Button { submit: true }))
        {
            if let Some(form) = self.closest(button, |n| n.kind == ElementKind::Form) {
                let submitted = self.request_submit(form);
                activation.messages.extend(submitted.messages);
                activation.submission = submitted.submission;
            }
        }
        activation
    }

    /// Validate the controls of `form`, then fire its submit event.
    ///
    /// Invalid controls each receive an `INVALID` event and the submit event
    /// is not fired.
    pub fn request_submit(&self, form: NodeId) -> Activation<M> {
        let mut activation = Activation::default();
        let controls = self.controls(form);

        let invalid: Vec<(NodeId, Validity)> = controls
            .iter()
            .filter_map(|id| match &self.nodes[*id].kind {
                ElementKind::Input { required, .. } => {
                    let validity = Validity::check(*required, &self.nodes[*id].value);
                    (!validity.is_valid()).then_some((*id, validity))
                }
                _ => None,
            })
            .collect();

        if !invalid.is_empty() {
            for (id, validity) in &invalid {
                let dispatch = self.dispatch(
                    *id,
                    event_types::INVALID,
                    EventData::Invalid {
                        reason: validity.reason().to_string(),
                    },
                );
                activation.messages.extend(dispatch.messages);
            }
            tracing::debug!("tree: submit blocked, {} invalid control(s)", invalid.len());
            activation.submission = Some(Submission::Blocked { invalid });
            return activation;
        }

        let fields = self.form_values(form);
        let dispatch = self.dispatch(
            form,
            event_types::SUBMIT,
            EventData::Submit {
                fields: fields.clone(),
            },
        );
        if !dispatch.default_prevented {
            tracing::warn!("tree: form {:?} submitted without prevent_default", form);
        }
        activation.messages.extend(dispatch.messages);
        activation.submission = Some(Submission::Submitted {
            form,
            fields,
            default_prevented: dispatch.default_prevented,
        });
        activation
    }

    /// Form controls under `form`, in document order
    pub fn controls(&self, form: NodeId) -> Vec<NodeId> {
        self.find_all(form, |n| matches!(n.kind, ElementKind::Input { .. }))
    }

    /// `(name, value)` of every control under `form`
    pub fn form_values(&self, form: NodeId) -> Vec<(String, String)> {
        self.controls(form)
            .into_iter()
            .filter_map(|id| match &self.nodes[id].kind {
                ElementKind::Input { name, .. } => Some((name.clone(), self.nodes[id].value.clone())),
                _ => None,
            })
            .collect()
    }

    /// Set a control's value and fire `INPUT`. Returns `None` when `node`
    /// is not a form control.
    pub fn set_value(&mut self, node: NodeId, value: impl Into<String>) -> Option<Dispatch<M>> {
        let value = value.into();
        let control = self.nodes.get_mut(node)?;
        if !matches!(control.kind, ElementKind::Input { .. }) {
            return None;
        }
        control.value = value.clone();
        Some(self.dispatch(node, event_types::INPUT, EventData::Input { value }))
    }

    /// Clear every control under `form`
    pub fn reset_form(&mut self, form: NodeId) {
        for id in self.controls(form) {
            if let Some(control) = self.nodes.get_mut(id) {
                control.value.clear();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, PartialEq)]
    enum Msg {
        Clicked(&'static str),
        Submitted(usize),
        Invalid(String),
    }

    fn contact_form() -> Element<Msg> {
        form()
            .id("contact")
            .on_submit(|event| {
                event.prevent_default();
                match &event.data {
                    EventData::Submit { fields } => Some(Msg::Submitted(fields.len())),
                    _ => None,
                }
            })
            .child(label("Name"))
            .child(input("name", InputKind::Text).required(true))
            .child(label("Email"))
            .child(
                input("email", InputKind::Email)
                    .required(true)
                    .on(event_types::INVALID, |event| match &event.data {
                        EventData::Invalid { reason } => Some(Msg::Invalid(reason.clone())),
                        _ => None,
                    }),
            )
            .child(submit_button("Send Message"))
    }

    #[test]
    fn test_mount_and_remove_subtree() {
        let mut tree: RenderTree<Msg> = RenderTree::new(Viewport::default());
        let root = tree.root();
        let page = tree
            .mount(root, div().key("home").child(heading(1, "Hi")).child(paragraph("there")))
            .unwrap();
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.text_content(root), "Hi there");
        assert_eq!(tree.find_by_key("home"), Some(page));

        let removed = tree.remove(page);
        assert_eq!(removed.len(), 3);
        assert_eq!(tree.len(), 1);
        assert!(tree.get(root).map_or(false, |n| n.children().is_empty()));
        assert!(tree.remove(root).is_empty());
    }

    #[test]
    fn test_click_bubbles_and_stops() {
        let mut tree: RenderTree<Msg> = RenderTree::new(Viewport::default());
        let root = tree.root();
        tree.mount(
            root,
            div()
                .on_click(|_| Some(Msg::Clicked("outer")))
                .child(
                    div()
                        .on_click(|event| {
                            event.stop_propagation();
                            Some(Msg::Clicked("stopper"))
                        })
                        .child(button("inner").on_click(|_| Some(Msg::Clicked("inner")))),
                ),
        );
        let inner = tree.find_text("inner")[0];
        let dispatch = tree.dispatch(inner, event_types::CLICK, EventData::None);
        assert_eq!(
            dispatch.messages,
            vec![Msg::Clicked("inner"), Msg::Clicked("stopper")]
        );
        assert_eq!(dispatch.handled, 2);
    }

    #[test]
    fn test_link_activation_follows_unless_prevented() {
        let mut tree: RenderTree<Msg> = RenderTree::new(Viewport::default());
        let root = tree.root();
        tree.mount(root, link("/portfolio", "View Our Work"));
        tree.mount(
            root,
            link("/contact", "Blocked").on_click(|event| {
                event.prevent_default();
                None
            }),
        );

        let open = tree.activate(tree.find_text("View Our Work")[0]);
        assert_eq!(open.follow.as_deref(), Some("/portfolio"));

        let blocked = tree.activate(tree.find_text("Blocked")[0]);
        assert_eq!(blocked.follow, None);
    }

    #[test]
    fn test_submit_blocked_by_constraints() {
        let mut tree: RenderTree<Msg> = RenderTree::new(Viewport::default());
        let root = tree.root();
        tree.mount(root, contact_form());
        let name = tree.find_control("name").unwrap();
        let email = tree.find_control("email").unwrap();
        tree.set_value(name, "   ");
        tree.set_value(email, "");

        let activation = tree.activate(tree.find_text("Send Message")[0]);
        assert_eq!(
            activation.submission,
            Some(Submission::Blocked {
                invalid: vec![
                    (name, Validity::ValueMissing),
                    (email, Validity::ValueMissing)
                ]
            })
        );
        assert_eq!(activation.messages, vec![Msg::Invalid("value_missing".to_string())]);
    }

    #[test]
    fn test_submit_fires_once_when_valid() {
        let mut tree: RenderTree<Msg> = RenderTree::new(Viewport::default());
        let root = tree.root();
        tree.mount(root, contact_form());
        let name = tree.find_control("name").unwrap();
        let email = tree.find_control("email").unwrap();
        tree.set_value(name, "Ada");
        tree.set_value(email, "ada@example.com");

        let activation = tree.activate(tree.find_text("Send Message")[0]);
        assert_eq!(activation.messages, vec![Msg::Submitted(2)]);
        match activation.submission {
            Some(Submission::Submitted {
                default_prevented,
                fields,
                ..
            }) => {
                assert!(default_prevented);
                assert_eq!(fields[1], ("email".to_string(), "ada@example.com".to_string()));
            }
            other => panic!("unexpected submission {other:?}"),
        }

        let form = tree.find_by_id("contact").unwrap();
        tree.reset_form(form);
        assert_eq!(tree.get(name).map(Node::value), Some(""));
    }

    #[test]
    fn test_visibility_follows_viewport() {
        let mut tree: RenderTree<Msg> = RenderTree::new(Viewport::new(1280, 720));
        let root = tree.root();
        let menu = tree
            .mount(root, div().only_below(768).child(button("Menu")))
            .unwrap();
        let toggle = tree.find_text("Menu")[0];
        assert!(!tree.is_visible(toggle));

        tree.set_viewport(Viewport::new(375, 667));
        assert!(tree.is_visible(toggle));
        assert!(tree.is_visible(menu));
    }

    #[test]
    fn test_blank_is_the_only_constraint() {
        assert!(Validity::check(true, "ada at example").is_valid());
        assert!(Validity::check(true, "a@@b").is_valid());
        assert!(Validity::check(false, "").is_valid());
        assert_eq!(Validity::check(true, "\n"), Validity::ValueMissing);
        assert_eq!(Validity::check(true, " \t "), Validity::ValueMissing);
    }

    #[test]
    fn test_raw_ids_round_trip() {
        let tree: RenderTree<Msg> = RenderTree::new(Viewport::default());
        assert_eq!(NodeId::from_raw(tree.root().to_raw()), tree.root());
    }
}
