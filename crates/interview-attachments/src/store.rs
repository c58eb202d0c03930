//! Attachment store trait definition.
//!
//! The trait is the contract between the lifecycle manager and whatever
//! object store holds the images. It uses native `async fn` methods
//! (Edition 2024 RPITIT), so it is not object-safe: hold implementations
//! through generics, or through [`crate::AttachmentBackend`] when the choice
//! is made at runtime.

#![allow(async_fn_in_trait)]

use bytes::Bytes;

use crate::error::Result;

/// Key-addressed object store holding record attachments.
pub trait AttachmentStore: Send + Sync {
    /// Store `bytes` under a fresh key in `namespace` and return the public
    /// URL of the stored object.
    ///
    /// `filename` is only a hint for the key; uniqueness comes from a random
    /// token, so concurrent uploads never collide.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AttachmentError::Unavailable`] on transport or
    /// authorization failure.
    async fn upload(
        &self,
        namespace: &str,
        bytes: Bytes,
        content_type: &str,
        filename: &str,
    ) -> Result<String>;

    /// Remove the object behind `url`.
    ///
    /// Deleting an object that is already gone succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AttachmentError::ForeignUrl`] if `url` was not issued
    /// by this store, or [`crate::AttachmentError::Unavailable`] if the remote
    /// call fails.
    async fn delete(&self, url: &str) -> Result<()>;
}
