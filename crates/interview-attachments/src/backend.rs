//! Runtime selection of the attachment store.

use bytes::Bytes;
use serde::Deserialize;
use tracing::info;

use crate::error::{AttachmentError, Result};
use crate::memory::{DEFAULT_MEMORY_BASE_URL, MemoryAttachmentStore};
use crate::s3::{S3AttachmentStore, S3Config};
use crate::store::AttachmentStore;

/// Which store implementation to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    S3,
    #[default]
    Memory,
}

/// `[attachments]` configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AttachmentConfig {
    pub backend: BackendKind,
    pub bucket: Option<String>,
    pub region: Option<String>,
    pub endpoint_url: Option<String>,
    pub public_base_url: Option<String>,
}

impl Default for AttachmentConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Memory,
            bucket: None,
            region: None,
            endpoint_url: None,
            public_base_url: None,
        }
    }
}

impl AttachmentConfig {
    fn s3_config(&self) -> Result<S3Config> {
        let bucket = self
            .bucket
            .clone()
            .ok_or_else(|| AttachmentError::configuration("attachments.bucket is required for the s3 backend"))?;
        let region = self
            .region
            .clone()
            .ok_or_else(|| AttachmentError::configuration("attachments.region is required for the s3 backend"))?;

        let mut config = S3Config::new(bucket, region);
        if let Some(endpoint) = &self.endpoint_url {
            config = config.with_endpoint_url(endpoint);
        }
        if let Some(base) = &self.public_base_url {
            config = config.with_public_base_url(base);
        }
        Ok(config)
    }
}

/// Attachment store chosen from configuration.
#[derive(Debug, Clone)]
pub enum AttachmentBackend {
    S3(S3AttachmentStore),
    Memory(MemoryAttachmentStore),
}

impl AttachmentBackend {
    /// Build the configured store.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentError::Configuration`] if the S3 backend is
    /// selected without a bucket or region.
    pub async fn from_config(config: &AttachmentConfig) -> Result<Self> {
        match config.backend {
            BackendKind::S3 => {
                let store = S3AttachmentStore::connect(config.s3_config()?).await?;
                Ok(Self::S3(store))
            }
            BackendKind::Memory => {
                let base = config
                    .public_base_url
                    .as_deref()
                    .unwrap_or(DEFAULT_MEMORY_BASE_URL);
                info!(base_url = %base, "using in-memory attachment store");
                Ok(Self::Memory(MemoryAttachmentStore::with_base_url(base)))
            }
        }
    }

    pub fn kind(&self) -> BackendKind {
        match self {
            Self::S3(_) => BackendKind::S3,
            Self::Memory(_) => BackendKind::Memory,
        }
    }
}

impl From<MemoryAttachmentStore> for AttachmentBackend {
    fn from(store: MemoryAttachmentStore) -> Self {
        Self::Memory(store)
    }
}

impl From<S3AttachmentStore> for AttachmentBackend {
    fn from(store: S3AttachmentStore) -> Self {
        Self::S3(store)
    }
}

impl AttachmentStore for AttachmentBackend {
    async fn upload(
        &self,
        namespace: &str,
        bytes: Bytes,
        content_type: &str,
        filename: &str,
    ) -> Result<String> {
        match self {
            Self::S3(store) => store.upload(namespace, bytes, content_type, filename).await,
            Self::Memory(store) => store.upload(namespace, bytes, content_type, filename).await,
        }
    }

    async fn delete(&self, url: &str) -> Result<()> {
        match self {
            Self::S3(store) => store.delete(url).await,
            Self::Memory(store) => store.delete(url).await,
        }
    }
}
