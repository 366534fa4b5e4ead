//! Site content
//!
//! Every literal list the pages render lives here so it can be replaced from
//! configuration. The defaults are the agency's own copy.

use agency_layout::InputKind;
use serde::{Deserialize, Serialize};

pub const PLACEHOLDER_IMAGE: &str = "/api/placeholder/400/300";

/// A navigation entry. The path is derived from the label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    pub path: String,
}

impl MenuItem {
    /// `Home` maps to `/`, anything else to `/` + the lowercased label
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        let path = if label == "Home" {
            "/".to_string()
        } else {
            format!("/{}", label.to_lowercase())
        };
        Self { label, path }
    }
}

/// A portfolio tile
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub category: String,
    #[serde(default = "default_image")]
    pub image: String,
}

impl Project {
    pub fn new(title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            image: default_image(),
        }
    }
}

/// One contact form entry
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub label: String,
    pub kind: InputKind,
    #[serde(default = "default_required")]
    pub required: bool,
}

impl FieldDescriptor {
    pub fn new(label: impl Into<String>, kind: InputKind) -> Self {
        Self {
            label: label.into(),
            kind,
            required: true,
        }
    }

    /// Control name used for the input node and in submitted fields
    pub fn name(&self) -> String {
        self.label.to_lowercase().replace(' ', "_")
    }
}

/// All literal copy shown by the site
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteContent {
    #[serde(default = "default_menu")]
    pub menu: Vec<String>,
    #[serde(default = "default_services")]
    pub services: Vec<String>,
    #[serde(default = "default_projects")]
    pub projects: Vec<Project>,
    #[serde(default = "default_fields")]
    pub fields: Vec<FieldDescriptor>,
}

impl Default for SiteContent {
    fn default() -> Self {
        Self {
            menu: default_menu(),
            services: default_services(),
            projects: default_projects(),
            fields: default_fields(),
        }
    }
}

impl SiteContent {
    pub fn menu_items(&self) -> Vec<MenuItem> {
        self.menu.iter().map(MenuItem::new).collect()
    }

    pub fn field(&self, label: &str) -> Option<&FieldDescriptor> {
        self.fields
            .iter()
            .find(|f| f.label.eq_ignore_ascii_case(label))
    }
}

/// Card copy under a service name
pub fn service_description(service: &str) -> String {
    format!("Professional {} services", service.to_lowercase())
}

fn default_image() -> String {
    PLACEHOLDER_IMAGE.to_string()
}

fn default_required() -> bool {
    true
}

fn default_menu() -> Vec<String> {
    ["Home", "Portfolio", "Contact"].map(String::from).to_vec()
}

fn default_services() -> Vec<String> {
    ["Video Production", "Graphic Design", "Digital Marketing"]
        .map(String::from)
        .to_vec()
}

fn default_projects() -> Vec<Project> {
    vec![
        Project::new("Brand Campaign", "Marketing"),
        Project::new("Product Launch", "Video"),
        Project::new("Website Design", "Design"),
        Project::new("Social Media", "Marketing"),
        Project::new("Corporate Video", "Video"),
        Project::new("App Design", "Design"),
    ]
}

fn default_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new("Name", InputKind::Text),
        FieldDescriptor::new("Email", InputKind::Email),
        FieldDescriptor::new("Message", InputKind::Textarea),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_menu_paths() {
        let paths: Vec<_> = SiteContent::default()
            .menu_items()
            .into_iter()
            .map(|item| item.path)
            .collect();
        assert_eq!(paths, vec!["/", "/portfolio", "/contact"]);
        assert_eq!(MenuItem::new("Services").path, "/services");
    }

    #[test]
    fn test_service_description() {
        assert_eq!(
            service_description("Digital Marketing"),
            "Professional digital marketing services"
        );
    }

    #[test]
    fn test_field_lookup_ignores_case() {
        let content = SiteContent::default();
        assert_eq!(content.field("email").map(|f| f.kind), Some(InputKind::Email));
        assert_eq!(content.field("Phone"), None);
        assert_eq!(content.fields[2].name(), "message");
    }
}
