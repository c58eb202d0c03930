use std::path::Path;

use interview_attachments::AttachmentConfig;
use interview_core::constants::{
    ATTACHMENT_NAMESPACE, DEFAULT_PAGE_SIZE, DEFAULT_SORT_BY, DEFAULT_SORT_DIR,
};
use interview_storage::DatabaseConfig;
use serde::Deserialize;

use crate::error::ServerError;

/// Top-level configuration loaded from `interview.toml`.
///
/// Every section is optional; a missing file yields the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InterviewConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// SQLite connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Attachment store settings.
    #[serde(default)]
    pub attachments: AttachmentsConfig,
    /// Defaults applied to listing requests that omit parameters.
    #[serde(default)]
    pub listing: ListingConfig,
}

impl InterviewConfig {
    /// Read the configuration at `path`, or return the defaults if the file
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Config`] if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ServerError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            ServerError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::parse(&contents)
    }

    /// Parse a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Config`] on malformed TOML or unknown values.
    pub fn parse(contents: &str) -> Result<Self, ServerError> {
        toml::from_str(contents).map_err(|e| ServerError::Config(e.to_string()))
    }
}

/// Configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// `host:port` string for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    "127.0.0.1".to_owned()
}

fn default_port() -> u16 {
    8080
}

/// `[attachments]` section: the store backend plus the key namespace.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AttachmentsConfig {
    #[serde(flatten)]
    pub store: AttachmentConfig,
    /// Key prefix for uploaded objects.
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

impl Default for AttachmentsConfig {
    fn default() -> Self {
        Self {
            store: AttachmentConfig::default(),
            namespace: default_namespace(),
        }
    }
}

fn default_namespace() -> String {
    ATTACHMENT_NAMESPACE.to_owned()
}

/// `[listing]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    pub page_size: u32,
    pub sort_by: String,
    pub sort_dir: String,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            sort_by: DEFAULT_SORT_BY.to_owned(),
            sort_dir: DEFAULT_SORT_DIR.to_owned(),
        }
    }
}
