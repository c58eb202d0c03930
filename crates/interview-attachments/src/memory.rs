//! In-process attachment store for testing and local development.
//!
//! [`MemoryAttachmentStore`] keeps objects in a map and hands out URLs under
//! a configurable base. Clones share the same map, so a test can keep one
//! handle for inspection while the service owns another. Uploads and deletes
//! can be made to fail on demand to exercise the service's failure policies.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use bytes::Bytes;
use dashmap::DashMap;
use tracing::debug;

use crate::error::{AttachmentError, Result};
use crate::key::{key_from_url, object_key, public_url};
use crate::store::AttachmentStore;

/// Base URL used when none is configured.
pub const DEFAULT_MEMORY_BASE_URL: &str = "memory://attachments";

/// An object held by [`MemoryAttachmentStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bytes: Bytes,
    pub content_type: String,
}

#[derive(Debug, Default)]
struct Inner {
    /// Object key -> stored object.
    objects: DashMap<String, StoredObject>,
    fail_uploads: AtomicBool,
    fail_deletes: AtomicBool,
    upload_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

/// In-memory [`AttachmentStore`].
///
/// # Examples
///
/// ```
/// use interview_attachments::{AttachmentStore, MemoryAttachmentStore};
///
/// #[tokio::main]
/// async fn main() -> interview_attachments::Result<()> {
///     let store = MemoryAttachmentStore::new();
///
///     let url = store
///         .upload("interview-experience", b"png".to_vec().into(), "image/png", "a.png")
///         .await?;
///     assert!(store.contains(&url));
///
///     store.delete(&url).await?;
///     assert!(store.is_empty());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct MemoryAttachmentStore {
    inner: Arc<Inner>,
    base_url: String,
}

impl MemoryAttachmentStore {
    /// Create an empty store with the default base URL.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_MEMORY_BASE_URL)
    }

    /// Create an empty store issuing URLs under `base_url`.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Inner::default()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Base URL of issued URLs.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the object behind `url`, if it exists.
    pub fn get(&self, url: &str) -> Option<StoredObject> {
        let key = key_from_url(&self.base_url, url)?;
        self.inner.objects.get(key).map(|entry| entry.value().clone())
    }

    /// Whether an object exists behind `url`.
    pub fn contains(&self, url: &str) -> bool {
        self.get(url).is_some()
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.inner.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys of all stored objects, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .inner
            .objects
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        keys.sort();
        keys
    }

    /// Make subsequent uploads fail with `Unavailable`.
    pub fn fail_uploads(&self, fail: bool) {
        self.inner.fail_uploads.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent deletes fail with `Unavailable`.
    pub fn fail_deletes(&self, fail: bool) {
        self.inner.fail_deletes.store(fail, Ordering::SeqCst);
    }

    /// Number of upload calls received, including failed ones.
    pub fn upload_calls(&self) -> usize {
        self.inner.upload_calls.load(Ordering::SeqCst)
    }

    /// Number of delete calls received, including failed ones.
    pub fn delete_calls(&self) -> usize {
        self.inner.delete_calls.load(Ordering::SeqCst)
    }
}

impl Default for MemoryAttachmentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AttachmentStore for MemoryAttachmentStore {
    async fn upload(
        &self,
        namespace: &str,
        bytes: Bytes,
        content_type: &str,
        filename: &str,
    ) -> Result<String> {
        self.inner.upload_calls.fetch_add(1, Ordering::SeqCst);
        if self.inner.fail_uploads.load(Ordering::SeqCst) {
            return Err(AttachmentError::unavailable("memory store: uploads disabled"));
        }

        let key = object_key(namespace, filename);
        debug!(key = %key, size = bytes.len(), "storing attachment in memory");

        self.inner.objects.insert(
            key.clone(),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );

        Ok(public_url(&self.base_url, &key))
    }

    async fn delete(&self, url: &str) -> Result<()> {
        self.inner.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.inner.fail_deletes.load(Ordering::SeqCst) {
            return Err(AttachmentError::unavailable("memory store: deletes disabled"));
        }

        let key = key_from_url(&self.base_url, url).ok_or_else(|| AttachmentError::foreign_url(url))?;
        if self.inner.objects.remove(key).is_none() {
            debug!(key = %key, "attachment already absent");
        }
        Ok(())
    }
}
