//! Machine-readable report of a headless run

use std::io::Write;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::app::AgencyApp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Passed,
    Failed,
}

/// The step that stopped a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepFailure {
    pub index: usize,
    /// Scenario name of the step, e.g. `assert_heading`
    pub step: String,
    /// Machine-readable cause, e.g. `heading_missing` or `action_failed`
    pub code: String,
    pub message: String,
}

/// What a visitor would see when the run stopped
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteEndState {
    pub route: String,
    pub menu_open: bool,
    pub notifications: usize,
    /// Pages still in the tree, exiting pages first
    pub mounted_pages: Vec<String>,
}

impl SiteEndState {
    pub fn capture(app: &AgencyApp) -> Self {
        Self {
            route: app.route().path().to_string(),
            menu_open: app.is_menu_open(),
            notifications: app.notifications().len(),
            mounted_pages: app.mounted_pages().into_iter().map(str::to_string).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadlessReport {
    pub status: ReportStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<StepFailure>,
    pub elapsed_frames: u64,
    pub elapsed_ms: u64,
    pub end_state: SiteEndState,
}

impl HeadlessReport {
    pub fn passed(elapsed_frames: u64, elapsed_ms: u64, end_state: SiteEndState) -> Self {
        Self {
            status: ReportStatus::Passed,
            failure: None,
            elapsed_frames,
            elapsed_ms,
            end_state,
        }
    }

    pub fn failed(
        failure: StepFailure,
        elapsed_frames: u64,
        elapsed_ms: u64,
        end_state: SiteEndState,
    ) -> Self {
        Self {
            status: ReportStatus::Failed,
            failure: Some(failure),
            elapsed_frames,
            elapsed_ms,
            end_state,
        }
    }

    pub fn is_passed(&self) -> bool {
        self.status == ReportStatus::Passed
    }

    pub fn write_to_writer<W: Write>(&self, writer: &mut W) -> Result<()> {
        let payload = serde_json::to_string_pretty(self)?;
        writer.write_all(payload.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_end_state_reflects_app() {
        let mut app = AgencyApp::new(SiteConfig::default()).unwrap();
        app.navigate("/portfolio");
        app.settle();
        assert_eq!(
            SiteEndState::capture(&app),
            SiteEndState {
                route: "/portfolio".to_string(),
                menu_open: false,
                notifications: 0,
                mounted_pages: vec!["/portfolio".to_string()],
            }
        );
    }

    #[test]
    fn test_passed_report_omits_failure() {
        let report = HeadlessReport::passed(3, 48, SiteEndState::default());
        let mut out = Vec::new();
        report.write_to_writer(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\"status\": \"passed\""));
        assert!(!text.contains("failure"));
        let parsed: HeadlessReport = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, report);
    }
}
