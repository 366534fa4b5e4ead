//! Page views
//!
//! A page view turns site configuration into an element tree whose root
//! carries the page transition. Views hold no state; the composition root
//! rebuilds a page every time it is presented.

mod contact;
mod home;
mod not_found;
mod portfolio;

pub use contact::{ContactPage, FORM_ID as CONTACT_FORM_ID};
pub use home::HomePage;
pub use not_found::NotFoundPage;
pub use portfolio::PortfolioPage;

use agency_layout::prelude::*;

use crate::config::SiteConfig;
use crate::message::SiteMsg;
use crate::route::Route;

pub trait PageView {
    fn route(&self) -> Route;

    /// Top-level heading; unique to the page
    fn heading(&self) -> &str;

    fn view(&self, config: &SiteConfig) -> Element<SiteMsg>;
}

/// View for `route`
pub fn page_for(route: &Route) -> Box<dyn PageView> {
    match route {
        Route::Home => Box::new(HomePage),
        Route::Portfolio => Box::new(PortfolioPage),
        Route::Contact => Box::new(ContactPage),
        Route::NotFound(path) => Box::new(NotFoundPage::new(path.clone())),
    }
}

/// Motion root shared by every page
fn page_root(slug: &str, config: &SiteConfig) -> Element<SiteMsg> {
    div()
        .id(format!("page-{slug}"))
        .class("page")
        .animate(TransitionPreset::page_transition(
            config.motion.page_duration_ms,
        ))
}
