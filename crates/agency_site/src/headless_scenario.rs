//! Scenario definition for headless site runs

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Ordered list of interactions and assertions
#[derive(Debug, Clone, Deserialize)]
pub struct HeadlessScenario {
    pub steps: Vec<ScenarioStep>,
}

impl HeadlessScenario {
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::from_json(&raw)
    }

    /// True when the scenario contains no assertion steps
    pub fn is_action_only(&self) -> bool {
        !self.steps.iter().any(ScenarioStep::is_assertion)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    // Interactions
    Navigate { path: String },
    Back,
    Forward,
    ClickLink { label: String },
    ClickText { text: String },
    ToggleMenu,
    Fill { label: String, value: String },
    Submit,
    Resize { width: u32, height: u32 },

    // Time
    Wait { ms: u64 },
    Tick { frames: u32 },
    Settle,

    // Assertions
    AssertExists { id: String },
    AssertTextContains { id: String, value: String },
    /// Exactly one visible heading with this text inside the page slot
    AssertHeading { text: String },
    AssertRoute { path: String },
    AssertMenuOpen { open: bool },
    AssertNotifications { count: usize },
    AssertMountedPages { pages: Vec<String> },
}

impl ScenarioStep {
    /// Name used in reports
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioStep::Navigate { .. } => "navigate",
            ScenarioStep::Back => "back",
            ScenarioStep::Forward => "forward",
            ScenarioStep::ClickLink { .. } => "click_link",
            ScenarioStep::ClickText { .. } => "click_text",
            ScenarioStep::ToggleMenu => "toggle_menu",
            ScenarioStep::Fill { .. } => "fill",
            ScenarioStep::Submit => "submit",
            ScenarioStep::Resize { .. } => "resize",
            ScenarioStep::Wait { .. } => "wait",
            ScenarioStep::Tick { .. } => "tick",
            ScenarioStep::Settle => "settle",
            ScenarioStep::AssertExists { .. } => "assert_exists",
            ScenarioStep::AssertTextContains { .. } => "assert_text_contains",
            ScenarioStep::AssertHeading { .. } => "assert_heading",
            ScenarioStep::AssertRoute { .. } => "assert_route",
            ScenarioStep::AssertMenuOpen { .. } => "assert_menu_open",
            ScenarioStep::AssertNotifications { .. } => "assert_notifications",
            ScenarioStep::AssertMountedPages { .. } => "assert_mounted_pages",
        }
    }

    pub fn is_assertion(&self) -> bool {
        self.name().starts_with("assert_")
    }
}
