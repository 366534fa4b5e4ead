use agency_layout::prelude::*;

use super::{page_root, PageView};
use crate::config::SiteConfig;
use crate::message::SiteMsg;
use crate::route::Route;

pub const HEADING: &str = "Page Not Found";
pub const HOME_LINK_LABEL: &str = "Back to Home";

/// Fallback for unmatched paths
pub struct NotFoundPage {
    path: String,
}

impl NotFoundPage {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl PageView for NotFoundPage {
    fn route(&self) -> Route {
        Route::NotFound(self.path.clone())
    }

    fn heading(&self) -> &str {
        HEADING
    }

    fn view(&self, config: &SiteConfig) -> Element<SiteMsg> {
        page_root("not-found", config)
            .class("container mx-auto px-4 py-24 text-center")
            .child(
                heading(1, HEADING)
                    .class("text-4xl font-bold mb-6")
                    .animate(TransitionPreset::fade_in_up()),
            )
            .child(paragraph(format!("Nothing lives at {}.", self.path)).class("text-gray-600 mb-8"))
            .child(link(Route::Home.path(), HOME_LINK_LABEL).class("text-blue-600 underline"))
    }
}
