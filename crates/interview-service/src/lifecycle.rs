//! Record lifecycle management.
//!
//! [`InterviewService`] keeps a stored record and its image attachment
//! consistent across create, update and delete. Operation order is fixed:
//!
//! - create uploads the attachment before inserting the record
//! - update deletes the old attachment, uploads the new one, then persists
//! - delete removes the attachment before removing the record
//!
//! Attachment deletions are best effort. A failed delete is logged and the
//! operation carries on, which can leave an orphaned object in the store
//! but never a record pointing at a missing one because of this service.

use interview_attachments::AttachmentStore;
use interview_core::constants::ATTACHMENT_NAMESPACE;
use interview_core::{Attachment, InterviewRequest, Page, non_empty, validate_request};
use interview_storage::{InterviewRecord, InterviewRepository, NewInterview};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::error::{InterviewError, Result};
use crate::query::ListQuery;

/// Lifecycle manager for interview experience records.
///
/// Generic over the repository and the attachment store so tests can run it
/// against an in-memory database and [`interview_attachments::MemoryAttachmentStore`].
/// Holds no mutable state; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct InterviewService<R, S> {
    repository: R,
    attachments: S,
    namespace: String,
}

impl<R, S> InterviewService<R, S>
where
    R: InterviewRepository,
    S: AttachmentStore,
{
    pub fn new(repository: R, attachments: S) -> Self {
        Self {
            repository,
            attachments,
            namespace: ATTACHMENT_NAMESPACE.to_string(),
        }
    }

    /// Store attachments under `namespace` instead of the default one.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn attachments(&self) -> &S {
        &self.attachments
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Validate and store a new record, uploading its attachment first.
    ///
    /// An empty attachment is treated as no attachment.
    ///
    /// # Errors
    ///
    /// - `Validation` if any field is invalid; nothing is stored.
    /// - `StoreUnavailable` if the upload fails; nothing is stored.
    /// - `Storage` if the insert fails; the uploaded object is removed
    ///   again on a best-effort basis.
    #[instrument(skip_all, fields(owner = %request.owner_email, company = %request.company_tag))]
    pub async fn create(
        &self,
        request: InterviewRequest,
        attachment: Option<Attachment>,
    ) -> Result<InterviewRecord> {
        let attachment = non_empty(attachment);
        validate_request(&request, attachment.as_ref())?;

        let attachment_ref = match &attachment {
            Some(attachment) => Some(self.upload(attachment).await?),
            None => None,
        };

        let new = NewInterview::from_request(&request, attachment_ref.clone());
        match self.repository.insert(new).await {
            Ok(record) => {
                info!(id = %record.id, has_attachment = record.has_attachment(), "interview experience created");
                Ok(record)
            }
            Err(e) => {
                if let Some(url) = attachment_ref {
                    self.discard_orphan(&url).await;
                }
                Err(e.into())
            }
        }
    }

    /// Fetch one record.
    ///
    /// # Errors
    ///
    /// `NotFound` if no record has this id.
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: Uuid) -> Result<InterviewRecord> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| InterviewError::not_found(id))
    }

    /// Records owned by `email`, newest first.
    ///
    /// Blank input matches nothing and does not reach the repository.
    #[instrument(skip(self))]
    pub async fn search_by_email(&self, email: &str) -> Result<Vec<InterviewRecord>> {
        if email.trim().is_empty() {
            return Ok(Vec::new());
        }
        let records = self.repository.find_by_owner_email(email).await?;
        debug!(count = records.len(), "search by email");
        Ok(records)
    }

    /// Records tagged with `company`, newest first.
    ///
    /// Blank input matches nothing and does not reach the repository.
    #[instrument(skip(self))]
    pub async fn search_by_company(&self, company: &str) -> Result<Vec<InterviewRecord>> {
        if company.trim().is_empty() {
            return Ok(Vec::new());
        }
        let records = self.repository.find_by_company_tag(company).await?;
        debug!(count = records.len(), "search by company");
        Ok(records)
    }

    /// One page of records.
    ///
    /// # Errors
    ///
    /// `InvalidSort` for an unknown sort field, `Validation` for a zero page
    /// size.
    #[instrument(skip(self))]
    pub async fn list(&self, query: &ListQuery) -> Result<Page<InterviewRecord>> {
        let request = query.to_page_request()?;
        let page = self.repository.find_page(&request).await?;
        debug!(
            items = page.content.len(),
            total = page.total_elements,
            "listed interview experiences"
        );
        Ok(page)
    }

    /// Overwrite the fields of an existing record.
    ///
    /// With a non-empty `attachment`, the old attachment is deleted (best
    /// effort) and the new one uploaded before the record is written.
    /// Without one, the existing reference is kept.
    ///
    /// # Errors
    ///
    /// - `Validation` if any field is invalid; nothing changes.
    /// - `NotFound` if no record has this id.
    /// - `StoreUnavailable` if the new upload fails; the record is not
    ///   written.
    /// - `NotFound` or `Storage` if the write fails; a newly uploaded
    ///   attachment is removed again on a best-effort basis.
    #[instrument(skip(self, request, attachment), fields(id = %id))]
    pub async fn update(
        &self,
        id: Uuid,
        request: InterviewRequest,
        attachment: Option<Attachment>,
    ) -> Result<InterviewRecord> {
        let attachment = non_empty(attachment);
        validate_request(&request, attachment.as_ref())?;

        let mut record = self.get_by_id(id).await?;

        let mut uploaded = None;
        if let Some(attachment) = &attachment {
            if let Some(old) = record.attachment_ref.as_deref() {
                self.delete_attachment(old).await;
            }
            let url = self.upload(attachment).await?;
            record.attachment_ref = Some(url.clone());
            uploaded = Some(url);
        }

        record.apply(&request);
        let updated = match self.repository.update(&record).await {
            Ok(updated) => updated,
            Err(e) => {
                if let Some(url) = uploaded {
                    self.discard_orphan(&url).await;
                }
                return Err(e.into());
            }
        };

        info!(
            id = %updated.id,
            replaced_attachment = attachment.is_some(),
            "interview experience updated"
        );
        Ok(updated)
    }

    /// Remove a record and, best effort, its attachment.
    ///
    /// # Errors
    ///
    /// `NotFound` if no record has this id.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let record = self.get_by_id(id).await?;

        if let Some(url) = record.attachment_ref.as_deref() {
            self.delete_attachment(url).await;
        }

        self.repository.delete(id).await?;
        info!(id = %id, "interview experience deleted");
        Ok(())
    }

    /// Check that the repository answers.
    pub async fn health_check(&self) -> Result<()> {
        self.repository.health_check().await?;
        Ok(())
    }

    async fn upload(&self, attachment: &Attachment) -> Result<String> {
        let url = self
            .attachments
            .upload(
                &self.namespace,
                attachment.bytes.clone(),
                attachment.content_type(),
                attachment.filename_hint(),
            )
            .await
            .map_err(|e| {
                warn!(error = %e, "attachment upload failed");
                InterviewError::from(e)
            })?;

        debug!(url = %url, size = attachment.len(), "attachment uploaded");
        Ok(url)
    }

    async fn delete_attachment(&self, url: &str) {
        if let Err(e) = self.attachments.delete(url).await {
            warn!(url = %url, error = %e, "failed to delete attachment, continuing");
        }
    }

    async fn discard_orphan(&self, url: &str) {
        if let Err(e) = self.attachments.delete(url).await {
            error!(url = %url, error = %e, "failed to remove attachment after write failure");
        }
    }
}
