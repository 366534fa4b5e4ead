//! Agency Site
//!
//! The agency marketing site as a headless application:
//!
//! - **Content**: brand, menu, services, projects and contact fields, loaded
//!   from `site.toml` with built-in defaults
//! - **Routing**: path normalization, a fixed route table with a not-found
//!   fallback, and back/forward history
//! - **Layout**: the fixed navigation bar with its mobile menu state machine
//! - **Pages**: home, portfolio, contact and not-found views
//! - **App**: the composition root that mounts pages into a presence slot and
//!   drives every animation from an explicit frame clock
//! - **Headless**: JSON scenarios of interactions and assertions, run on a
//!   deterministic frame loop with a machine-readable report
//!
//! # Example
//!
//! ```rust
//! use agency_site::{AgencyApp, SiteConfig};
//!
//! let mut app = AgencyApp::new(SiteConfig::default()).unwrap();
//! app.click_link("Portfolio").unwrap();
//! app.settle();
//! assert_eq!(app.route().path(), "/portfolio");
//! ```

pub mod app;
pub mod config;
pub mod contact;
pub mod content;
pub mod error;
pub mod headless_assert;
pub mod headless_report;
pub mod headless_runner;
pub mod headless_runtime;
pub mod headless_scenario;
pub mod layout;
pub mod logging;
pub mod message;
pub mod pages;
pub mod route;

pub use app::AgencyApp;
pub use config::{MotionConfig, SiteConfig, SiteSection, ViewportConfig};
pub use contact::{ContactOutcome, FormError};
pub use content::{FieldDescriptor, MenuItem, Project, SiteContent};
pub use error::{Result, SiteError};
pub use headless_report::{HeadlessReport, ReportStatus, SiteEndState, StepFailure};
pub use headless_runner::{run_scenario, run_scenario_json, run_scenario_with_config, RunOutcome};
pub use headless_runtime::HeadlessRunConfig;
pub use headless_scenario::{HeadlessScenario, ScenarioStep};
pub use layout::{MenuState, Shell};
pub use message::SiteMsg;
pub use pages::PageView;
pub use route::{History, Route};
