//! S3-compatible attachment store.
//!
//! Objects are written with `put_object` under keys produced by
//! [`crate::key::object_key`]. Works against AWS S3 and against
//! S3-compatible servers (MinIO, RustFS, LocalStack) when an endpoint
//! override is configured, in which case path-style addressing is used.

use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::error::{AttachmentError, Result};
use crate::key::{key_from_url, object_key, public_url};
use crate::store::AttachmentStore;

/// Connection settings for [`S3AttachmentStore`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct S3Config {
    /// Bucket holding the attachments.
    pub bucket: String,

    /// AWS region of the bucket.
    pub region: String,

    /// Endpoint override for S3-compatible servers.
    #[serde(default)]
    pub endpoint_url: Option<String>,

    /// Base of the URLs handed out for stored objects. Derived from the
    /// bucket, region and endpoint when unset.
    #[serde(default)]
    pub public_base_url: Option<String>,
}

impl S3Config {
    /// Create a config for `bucket` in `region`.
    pub fn new(bucket: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            region: region.into(),
            endpoint_url: None,
            public_base_url: None,
        }
    }

    /// Set the endpoint URL override.
    #[must_use]
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    /// Set the public base URL.
    #[must_use]
    pub fn with_public_base_url(mut self, public_base_url: impl Into<String>) -> Self {
        self.public_base_url = Some(public_base_url.into());
        self
    }

    /// Base URL under which object URLs are issued.
    ///
    /// # Examples
    ///
    /// ```
    /// use interview_attachments::S3Config;
    ///
    /// let config = S3Config::new("media", "eu-west-1");
    /// assert_eq!(config.resolved_base_url(), "https://media.s3.eu-west-1.amazonaws.com");
    ///
    /// let local = config.with_endpoint_url("http://localhost:9000/");
    /// assert_eq!(local.resolved_base_url(), "http://localhost:9000/media");
    /// ```
    pub fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.public_base_url {
            return base.trim_end_matches('/').to_string();
        }
        match &self.endpoint_url {
            Some(endpoint) => format!("{}/{}", endpoint.trim_end_matches('/'), self.bucket),
            None => format!("https://{}.s3.{}.amazonaws.com", self.bucket, self.region),
        }
    }

    /// Check that the required fields are present.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentError::Configuration`] naming the first empty field.
    pub fn validate(&self) -> Result<()> {
        if self.bucket.trim().is_empty() {
            return Err(AttachmentError::configuration("S3 bucket must not be empty"));
        }
        if self.region.trim().is_empty() {
            return Err(AttachmentError::configuration("S3 region must not be empty"));
        }
        Ok(())
    }
}

/// Attachment store backed by an S3 bucket.
#[derive(Clone)]
pub struct S3AttachmentStore {
    client: Client,
    bucket: String,
    base_url: String,
}

impl std::fmt::Debug for S3AttachmentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3AttachmentStore")
            .field("bucket", &self.bucket)
            .field("base_url", &self.base_url)
            .field("client", &"<S3Client>")
            .finish()
    }
}

impl S3AttachmentStore {
    /// Build a client from the default AWS credential chain and `config`.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentError::Configuration`] if `config` is incomplete.
    pub async fn connect(config: S3Config) -> Result<Self> {
        config.validate()?;

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));
        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint.clone());
        }
        let sdk_config = loader.load().await;

        let client = Client::from_conf(
            aws_sdk_s3::config::Builder::from(&sdk_config)
                .force_path_style(config.endpoint_url.is_some())
                .build(),
        );

        info!(
            bucket = %config.bucket,
            region = %config.region,
            endpoint = ?config.endpoint_url,
            "S3 attachment store configured"
        );

        Ok(Self::with_client(client, &config))
    }

    /// Wrap a pre-built client.
    pub fn with_client(client: Client, config: &S3Config) -> Self {
        Self {
            client,
            bucket: config.bucket.clone(),
            base_url: config.resolved_base_url(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl AttachmentStore for S3AttachmentStore {
    #[instrument(skip(self, bytes), fields(bucket = %self.bucket, size = bytes.len()))]
    async fn upload(
        &self,
        namespace: &str,
        bytes: Bytes,
        content_type: &str,
        filename: &str,
    ) -> Result<String> {
        let key = object_key(namespace, filename);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| {
                warn!(key = %key, error = %DisplayErrorContext(&e), "S3 put_object failed");
                AttachmentError::unavailable(format!("put_object failed: {}", DisplayErrorContext(&e)))
            })?;

        debug!(key = %key, "attachment uploaded");
        Ok(public_url(&self.base_url, &key))
    }

    #[instrument(skip(self), fields(bucket = %self.bucket))]
    async fn delete(&self, url: &str) -> Result<()> {
        let key = key_from_url(&self.base_url, url).ok_or_else(|| AttachmentError::foreign_url(url))?;

        // S3 answers 204 for missing keys too.
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                warn!(key = %key, error = %DisplayErrorContext(&e), "S3 delete_object failed");
                AttachmentError::unavailable(format!(
                    "delete_object failed: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        debug!(key = %key, "attachment deleted");
        Ok(())
    }
}
