use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("invalid site configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("failed to serialize site configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no node matches {0}")]
    NodeNotFound(String),

    #[error("{0} is hidden at the current viewport")]
    NotInteractive(String),

    #[error("the contact form has no field labelled '{0}'")]
    UnknownField(String),

    #[error("the contact form is not mounted")]
    NoContactForm,
}

pub type Result<T> = std::result::Result<T, SiteError>;
