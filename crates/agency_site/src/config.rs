//! Site configuration file handling
//!
//! Every section of the TOML document is optional; a missing section or key
//! falls back to the values the agency site ships with.

use std::fs;
use std::path::Path;

use agency_layout::Viewport;
use serde::{Deserialize, Serialize};

use crate::content::SiteContent;
use crate::error::{Result, SiteError};

/// Top-level site configuration (site.toml)
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub site: SiteSection,
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub content: SiteContent,
}

/// Branding and copy outside of the content lists
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SiteSection {
    /// Brand mark shown in the nav bar
    #[serde(default = "default_brand")]
    pub brand: String,
    /// Notification posted after a contact form submit
    #[serde(default = "default_acknowledgement")]
    pub acknowledgement: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            brand: default_brand(),
            acknowledgement: default_acknowledgement(),
        }
    }
}

fn default_brand() -> String {
    "Agency".to_string()
}

fn default_acknowledgement() -> String {
    "Form submitted! (Demo only)".to_string()
}

/// Initial viewport and the responsive breakpoint
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ViewportConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    /// Widths at or above this show the desktop link row
    #[serde(default = "default_md_breakpoint")]
    pub md_breakpoint: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            md_breakpoint: default_md_breakpoint(),
        }
    }
}

impl ViewportConfig {
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }
}

fn default_width() -> u32 {
    1280
}

fn default_height() -> u32 {
    720
}

fn default_md_breakpoint() -> u32 {
    768
}

/// Animation timing shared by the shell and pages
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct MotionConfig {
    /// Delay between consecutive staggered items
    #[serde(default = "default_stagger_ms")]
    pub stagger_ms: u32,
    /// Page enter / exit duration
    #[serde(default = "default_page_duration_ms")]
    pub page_duration_ms: u32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            stagger_ms: default_stagger_ms(),
            page_duration_ms: default_page_duration_ms(),
        }
    }
}

fn default_stagger_ms() -> u32 {
    100
}

fn default_page_duration_ms() -> u32 {
    300
}

impl SiteConfig {
    /// Parse a TOML document
    pub fn from_toml_str(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }

    /// Load the configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| SiteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("config: loaded {}", path.display());
        Ok(config)
    }

    /// Load `site.toml` from a directory, or the defaults when it is absent
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let path = dir.join("site.toml");
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Serialize to TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agency_layout::InputKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = SiteConfig::from_toml_str("").unwrap();
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.site.brand, "Agency");
        assert_eq!(config.viewport.md_breakpoint, 768);
        assert_eq!(config.content.projects.len(), 6);
    }

    #[test]
    fn test_partial_sections() {
        let config = SiteConfig::from_toml_str(
            r#"
[viewport]
width = 375

[motion]
stagger_ms = 50

[content]
menu = ["Home", "Work"]

[[content.fields]]
label = "Email"
kind = "email"
required = false
"#,
        )
        .unwrap();
        assert_eq!(config.viewport.width, 375);
        assert_eq!(config.viewport.height, 720);
        assert_eq!(config.motion.stagger_ms, 50);
        assert_eq!(config.motion.page_duration_ms, 300);
        assert_eq!(config.content.menu, vec!["Home", "Work"]);
        assert_eq!(config.content.services.len(), 3);
        assert_eq!(config.content.fields.len(), 1);
        assert_eq!(config.content.fields[0].kind, InputKind::Email);
        assert!(!config.content.fields[0].required);
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = SiteConfig::default();
        let text = config.to_toml().unwrap();
        assert!(text.contains("brand = \"Agency\""));
        assert_eq!(SiteConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_parse_error_is_config() {
        let err = SiteConfig::from_toml_str("[viewport]\nwidth = \"wide\"").unwrap_err();
        assert!(matches!(err, SiteError::Config(_)));
    }

    #[test]
    fn test_missing_file_is_io() {
        let err = SiteConfig::load(Path::new("definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, SiteError::Io { .. }));
    }
}
