//! Site tour
//!
//! Visits every page headlessly, submits the contact form and prints the
//! run report as JSON. A `site.toml` in the working directory overrides the
//! built-in content.
//!
//! Run with:
//! `RUST_LOG=debug cargo run -p agency_site --example site_tour`

use std::path::Path;

use agency_site::{logging, run_scenario, AgencyApp, HeadlessScenario, SiteConfig};
use anyhow::Result;

const TOUR: &str = r#"{"steps": [
    {"type": "settle"},
    {"type": "assert_heading", "text": "Creative Digital Solutions"},
    {"type": "click_text", "text": "View Our Work"},
    {"type": "settle"},
    {"type": "assert_heading", "text": "Our Work"},
    {"type": "click_link", "label": "Contact"},
    {"type": "settle"},
    {"type": "fill", "label": "Name", "value": "Ada Lovelace"},
    {"type": "fill", "label": "Email", "value": "ada@example.com"},
    {"type": "fill", "label": "Message", "value": "Could you film our launch?"},
    {"type": "submit"},
    {"type": "assert_notifications", "count": 1},
    {"type": "resize", "width": 375, "height": 812},
    {"type": "toggle_menu"},
    {"type": "wait", "ms": 400},
    {"type": "click_link", "label": "Home"},
    {"type": "settle"},
    {"type": "assert_menu_open", "open": false},
    {"type": "assert_route", "path": "/"}
]}"#;

fn main() -> Result<()> {
    logging::init();

    let config = SiteConfig::load_from_dir(Path::new("."))?;
    let mut app = AgencyApp::new(config)?;
    let scenario = HeadlessScenario::from_json(TOUR)?;

    let outcome = run_scenario(&mut app, &scenario)?;
    outcome.report().write_to_writer(&mut std::io::stdout())?;
    for notification in app.notifications() {
        tracing::info!("notification: {}", notification);
    }

    if outcome.is_failed() {
        anyhow::bail!("site tour failed");
    }
    Ok(())
}
