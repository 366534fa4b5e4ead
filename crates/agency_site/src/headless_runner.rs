//! Scenario runner driving an `AgencyApp` on the headless frame clock

use anyhow::Result;

use crate::app::AgencyApp;
use crate::config::SiteConfig;
use crate::headless_assert::{
    evaluate_assert_exists, evaluate_assert_heading, evaluate_assert_menu_open,
    evaluate_assert_mounted_pages, evaluate_assert_notifications, evaluate_assert_route,
    evaluate_assert_text_contains, AssertionResult, DiagnosticsSnapshot,
};
use crate::headless_report::{HeadlessReport, SiteEndState, StepFailure};
use crate::headless_runtime::{HeadlessRunConfig, HeadlessRuntime};
use crate::headless_scenario::{HeadlessScenario, ScenarioStep};

/// Final outcome of a scenario run
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Passed { report: HeadlessReport },
    Failed { report: HeadlessReport },
}

impl RunOutcome {
    pub fn report(&self) -> &HeadlessReport {
        match self {
            RunOutcome::Passed { report } => report,
            RunOutcome::Failed { report } => report,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RunOutcome::Failed { .. })
    }
}

/// Frame clock plus the snapshot assertions read
struct RunClock {
    runtime: HeadlessRuntime,
    latest: Option<DiagnosticsSnapshot>,
}

impl RunClock {
    fn fail(
        &self,
        app: &AgencyApp,
        step: &ScenarioStep,
        index: usize,
        code: String,
        message: String,
    ) -> RunOutcome {
        let failure = StepFailure {
            index,
            step: step.name().to_string(),
            code,
            message,
        };
        RunOutcome::Failed {
            report: HeadlessReport::failed(
                failure,
                self.runtime.frames(),
                self.runtime.elapsed_ms(),
                SiteEndState::capture(app),
            ),
        }
    }

    /// Snapshot of the last frame run, or a fresh one after an interaction
    fn snapshot(&mut self, app: &AgencyApp) -> &DiagnosticsSnapshot {
        self.latest
            .get_or_insert_with(|| DiagnosticsSnapshot::capture(app))
    }

    fn sample(&mut self, app: &AgencyApp) {
        self.latest = Some(DiagnosticsSnapshot::capture(app));
    }
}

/// Parse scenario JSON and run it against a default site
pub fn run_scenario_json(input: &str) -> Result<RunOutcome> {
    let scenario = HeadlessScenario::from_json(input)?;
    let config = SiteConfig::default();
    let mut app = AgencyApp::new(config)?;
    run_scenario(&mut app, &scenario)
}

/// Run `scenario` against `app` with the frame clock defaults for its config
pub fn run_scenario(app: &mut AgencyApp, scenario: &HeadlessScenario) -> Result<RunOutcome> {
    let cfg = HeadlessRunConfig::for_site(app.config());
    run_scenario_with_config(app, scenario, cfg)
}

/// Run `scenario` on a clock built from `runtime_cfg`. Only an invalid
/// config is an `Err`; every step failure is a `Failed` report.
pub fn run_scenario_with_config(
    app: &mut AgencyApp,
    scenario: &HeadlessScenario,
    runtime_cfg: HeadlessRunConfig,
) -> Result<RunOutcome> {
    let mut clock = RunClock {
        runtime: HeadlessRuntime::start(app, runtime_cfg)?,
        latest: None,
    };

    for (index, step) in scenario.steps.iter().enumerate() {
        tracing::debug!("headless: step {} {}", index, step.name());
        let verdict = match step {
            ScenarioStep::Wait { ms } => {
                clock.runtime.advance_ms(app, *ms);
                clock.sample(app);
                AssertionResult::Passed
            }
            ScenarioStep::Tick { frames } => {
                clock.runtime.advance_frames(app, *frames);
                clock.sample(app);
                AssertionResult::Passed
            }
            ScenarioStep::Settle => {
                let spent = clock.runtime.settle(app);
                clock.sample(app);
                match spent {
                    Some(_) => AssertionResult::Passed,
                    None => AssertionResult::Failed {
                        code: "settle_timeout".to_string(),
                        message: format!(
                            "site still animating after {} frames",
                            clock.runtime.config().settle_frame_limit
                        ),
                    },
                }
            }
            ScenarioStep::AssertExists { id } => evaluate_assert_exists(id, clock.snapshot(app)),
            ScenarioStep::AssertTextContains { id, value } => {
                evaluate_assert_text_contains(id, value, clock.snapshot(app))
            }
            ScenarioStep::AssertHeading { text } => {
                evaluate_assert_heading(text, clock.snapshot(app))
            }
            ScenarioStep::AssertRoute { path } => evaluate_assert_route(path, clock.snapshot(app)),
            ScenarioStep::AssertMenuOpen { open } => {
                evaluate_assert_menu_open(*open, clock.snapshot(app))
            }
            ScenarioStep::AssertNotifications { count } => {
                evaluate_assert_notifications(*count, clock.snapshot(app))
            }
            ScenarioStep::AssertMountedPages { pages } => {
                evaluate_assert_mounted_pages(pages, clock.snapshot(app))
            }
            action => {
                let result = perform(app, action);
                clock.latest = None;
                match result {
                    Ok(()) => AssertionResult::Passed,
                    Err(err) => AssertionResult::Failed {
                        code: "action_failed".to_string(),
                        message: err.to_string(),
                    },
                }
            }
        };

        if let AssertionResult::Failed { code, message } = verdict {
            tracing::warn!("headless: step {} {} failed: {}", index, step.name(), message);
            return Ok(clock.fail(app, step, index, code, message));
        }
    }

    Ok(RunOutcome::Passed {
        report: HeadlessReport::passed(
            clock.runtime.frames(),
            clock.runtime.elapsed_ms(),
            SiteEndState::capture(app),
        ),
    })
}

fn perform(app: &mut AgencyApp, step: &ScenarioStep) -> crate::Result<()> {
    match step {
        ScenarioStep::Navigate { path } => {
            app.navigate(path);
        }
        ScenarioStep::Back => {
            app.back();
        }
        ScenarioStep::Forward => {
            app.forward();
        }
        ScenarioStep::ClickLink { label } => app.click_link(label)?,
        ScenarioStep::ClickText { text } => app.click_text(text)?,
        ScenarioStep::ToggleMenu => {
            app.toggle_menu();
        }
        ScenarioStep::Fill { label, value } => app.fill(label, value)?,
        ScenarioStep::Submit => {
            app.submit_contact()?;
        }
        ScenarioStep::Resize { width, height } => app.resize(*width, *height),
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_settle_timeout_is_a_failed_step() {
        let mut app = AgencyApp::new(SiteConfig::default()).unwrap();
        let scenario = HeadlessScenario::from_json(
            r#"{"steps": [
                {"type": "settle"},
                {"type": "navigate", "path": "/portfolio"},
                {"type": "settle"}
            ]}"#,
        )
        .unwrap();
        let cfg = HeadlessRunConfig {
            settle_frame_limit: 3,
            ..Default::default()
        };

        // the home entrance outlasts three frames too
        let outcome = run_scenario_with_config(&mut app, &scenario, cfg).unwrap();
        assert!(outcome.is_failed());
        let report = outcome.report();
        assert_eq!(
            report.failure,
            Some(StepFailure {
                index: 0,
                step: "settle".to_string(),
                code: "settle_timeout".to_string(),
                message: "site still animating after 3 frames".to_string(),
            })
        );
        assert_eq!(report.elapsed_frames, 3);
        assert_eq!(report.end_state.route, "/");
    }

    #[test]
    fn test_invalid_clock_is_an_error() {
        let mut app = AgencyApp::new(SiteConfig::default()).unwrap();
        let scenario = HeadlessScenario::from_json(r#"{"steps": []}"#).unwrap();
        let cfg = HeadlessRunConfig {
            tick_ms: 0,
            ..Default::default()
        };
        assert!(run_scenario_with_config(&mut app, &scenario, cfg).is_err());
    }

    #[test]
    fn test_failed_action_reports_step() {
        let outcome = run_scenario_json(
            r#"{"steps": [
                {"type": "settle"},
                {"type": "fill", "label": "Name", "value": "Ada"}
            ]}"#,
        )
        .unwrap();
        assert!(outcome.is_failed());
        let failure = outcome.report().failure.clone().unwrap();
        assert_eq!(failure.index, 1);
        assert_eq!(failure.step, "fill");
        assert_eq!(failure.code, "action_failed");
        assert_eq!(failure.message, "the contact form is not mounted");
    }
}
