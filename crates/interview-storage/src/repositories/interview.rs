#![allow(async_fn_in_trait)]

use crate::error::{StorageError, StorageResult};
use crate::models::{InterviewRecord, NewInterview};
use chrono::Utc;
use interview_core::{Page, PageRequest};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

const SELECT_COLUMNS: &str = r#"
    SELECT id, owner_name, owner_email, title, content, company_tag,
           attachment_ref, created_at, updated_at
    FROM interview_experiences
"#;

/// Repository trait for interview experience records
///
/// This trait uses native async trait methods (Edition 2024 feature), so
/// implementations are used through generics rather than `dyn`.
pub trait InterviewRepository: Send + Sync {
    /// Insert a new record, assigning its id and timestamps
    async fn insert(&self, new: NewInterview) -> StorageResult<InterviewRecord>;

    /// Find a record by its id
    async fn find_by_id(&self, id: Uuid) -> StorageResult<Option<InterviewRecord>>;

    /// All records owned by `email`, newest first
    async fn find_by_owner_email(&self, email: &str) -> StorageResult<Vec<InterviewRecord>>;

    /// All records tagged with `company_tag`, newest first
    async fn find_by_company_tag(&self, company_tag: &str)
    -> StorageResult<Vec<InterviewRecord>>;

    /// One page of records in the requested order, plus the total count
    async fn find_page(&self, request: &PageRequest) -> StorageResult<Page<InterviewRecord>>;

    /// Overwrite a stored record and refresh its `updated_at`
    ///
    /// `id` and `created_at` are never changed.
    async fn update(&self, record: &InterviewRecord) -> StorageResult<InterviewRecord>;

    /// Delete a record by id
    async fn delete(&self, id: Uuid) -> StorageResult<()>;

    /// Number of stored records
    async fn count(&self) -> StorageResult<u64>;

    /// Check that the backing store answers queries
    async fn health_check(&self) -> StorageResult<()>;
}

/// SQLite implementation of InterviewRepository
#[derive(Debug, Clone)]
pub struct SqliteInterviewRepository {
    pool: SqlitePool,
}

impl SqliteInterviewRepository {
    /// Create a new SQLite interview repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn find_newest_where(
        &self,
        column: &'static str,
        value: &str,
    ) -> StorageResult<Vec<InterviewRecord>> {
        let sql = format!("{SELECT_COLUMNS} WHERE {column} = ? ORDER BY created_at DESC, id DESC");
        let records = sqlx::query_as::<_, InterviewRecord>(&sql)
            .bind(value)
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }
}

impl InterviewRepository for SqliteInterviewRepository {
    async fn insert(&self, new: NewInterview) -> StorageResult<InterviewRecord> {
        let record = new.into_record(Uuid::new_v4(), Utc::now());

        sqlx::query(
            r#"
            INSERT INTO interview_experiences (
                id, owner_name, owner_email, title, content, company_tag,
                attachment_ref, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.id)
        .bind(&record.owner_name)
        .bind(&record.owner_email)
        .bind(&record.title)
        .bind(&record.content)
        .bind(&record.company_tag)
        .bind(&record.attachment_ref)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;

        debug!(id = %record.id, "interview record inserted");
        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> StorageResult<Option<InterviewRecord>> {
        let sql = format!("{SELECT_COLUMNS} WHERE id = ?");
        let record = sqlx::query_as::<_, InterviewRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    async fn find_by_owner_email(&self, email: &str) -> StorageResult<Vec<InterviewRecord>> {
        self.find_newest_where("owner_email", email).await
    }

    async fn find_by_company_tag(
        &self,
        company_tag: &str,
    ) -> StorageResult<Vec<InterviewRecord>> {
        self.find_newest_where("company_tag", company_tag).await
    }

    async fn find_page(&self, request: &PageRequest) -> StorageResult<Page<InterviewRecord>> {
        let total = self.count().await?;

        // The column comes from a closed enum, never from caller text.
        let sort = request.sort();
        let direction = sort.direction.as_sql();
        let sql = format!(
            "{SELECT_COLUMNS} ORDER BY {column} {direction}, id {direction} LIMIT ? OFFSET ?",
            column = sort.field.column(),
        );

        let limit = i64::from(request.page_size());
        let offset = i64::try_from(request.offset()).unwrap_or(i64::MAX);

        let records = sqlx::query_as::<_, InterviewRecord>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(Page::new(records, request, total))
    }

    async fn update(&self, record: &InterviewRecord) -> StorageResult<InterviewRecord> {
        let mut updated = record.clone();
        updated.updated_at = Utc::now().max(record.created_at);

        let result = sqlx::query(
            r#"
            UPDATE interview_experiences
            SET owner_name = ?, owner_email = ?, title = ?, content = ?,
                company_tag = ?, attachment_ref = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&updated.owner_name)
        .bind(&updated.owner_email)
        .bind(&updated.title)
        .bind(&updated.content)
        .bind(&updated.company_tag)
        .bind(&updated.attachment_ref)
        .bind(updated.updated_at)
        .bind(updated.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::not_found(record.id));
        }

        // created_at is not part of the SET list; reload it in case the
        // caller handed in a stale copy.
        let stored: (chrono::DateTime<Utc>,) =
            sqlx::query_as("SELECT created_at FROM interview_experiences WHERE id = ?")
                .bind(updated.id)
                .fetch_one(&self.pool)
                .await?;
        updated.created_at = stored.0;

        debug!(id = %updated.id, "interview record updated");
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> StorageResult<()> {
        let result = sqlx::query("DELETE FROM interview_experiences WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::not_found(id));
        }

        debug!(id = %id, "interview record deleted");
        Ok(())
    }

    async fn count(&self) -> StorageResult<u64> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM interview_experiences")
            .fetch_one(&self.pool)
            .await?;

        Ok(u64::try_from(result.0).unwrap_or_default())
    }

    async fn health_check(&self) -> StorageResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::Database;
    use interview_core::{Sort, SortDirection, SortField};

    async fn setup_test_db() -> Database {
        Database::in_memory().await.unwrap()
    }

    fn new_interview(email: &str, company: &str, title: &str) -> NewInterview {
        NewInterview {
            owner_name: "Test User".to_string(),
            owner_email: email.to_string(),
            title: title.to_string(),
            content: "Three coding rounds and a chat.".to_string(),
            company_tag: company.to_string(),
            attachment_ref: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_find_by_id() {
        let db = setup_test_db().await;
        let repo = SqliteInterviewRepository::new(db.pool().clone());

        let record = repo
            .insert(new_interview("a@b.com", "acme", "Backend round"))
            .await
            .unwrap();
        assert_eq!(record.created_at, record.updated_at);

        let found = repo.find_by_id(record.id).await.unwrap().unwrap();
        assert_eq!(found, record);
    }

    #[tokio::test]
    async fn test_find_by_id_missing() {
        let db = setup_test_db().await;
        let repo = SqliteInterviewRepository::new(db.pool().clone());

        assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_assigns_unique_ids() {
        let db = setup_test_db().await;
        let repo = SqliteInterviewRepository::new(db.pool().clone());

        let first = repo.insert(new_interview("a@b.com", "acme", "One")).await.unwrap();
        let second = repo.insert(new_interview("a@b.com", "acme", "Two")).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_find_by_owner_email_newest_first() {
        let db = setup_test_db().await;
        let repo = SqliteInterviewRepository::new(db.pool().clone());

        let older = repo.insert(new_interview("a@b.com", "acme", "Older")).await.unwrap();
        let newer = repo.insert(new_interview("a@b.com", "globex", "Newer")).await.unwrap();
        repo.insert(new_interview("other@b.com", "acme", "Other"))
            .await
            .unwrap();

        let records = repo.find_by_owner_email("a@b.com").await.unwrap();
        let ids: Vec<Uuid> = records.iter().map(|r| r.id).collect();

        assert_eq!(records.len(), 2);
        assert!(ids.contains(&older.id) && ids.contains(&newer.id));
        assert!(records[0].created_at >= records[1].created_at);
    }

    #[tokio::test]
    async fn test_find_by_email_is_exact_match() {
        let db = setup_test_db().await;
        let repo = SqliteInterviewRepository::new(db.pool().clone());

        repo.insert(new_interview("a@b.com", "acme", "Exact")).await.unwrap();

        assert!(repo.find_by_owner_email("A@B.COM").await.unwrap().is_empty());
        assert!(repo.find_by_owner_email("a@b").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_by_company_tag() {
        let db = setup_test_db().await;
        let repo = SqliteInterviewRepository::new(db.pool().clone());

        repo.insert(new_interview("a@b.com", "acme", "One")).await.unwrap();
        repo.insert(new_interview("c@d.com", "acme", "Two")).await.unwrap();
        repo.insert(new_interview("e@f.com", "globex", "Three"))
            .await
            .unwrap();

        let records = repo.find_by_company_tag("acme").await.unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.company_tag == "acme"));
    }

    #[tokio::test]
    async fn test_find_page_orders_by_title() {
        let db = setup_test_db().await;
        let repo = SqliteInterviewRepository::new(db.pool().clone());

        for title in ["Charlie", "Alpha", "Bravo"] {
            repo.insert(new_interview("a@b.com", "acme", title)).await.unwrap();
        }

        let sort = Sort::new(SortField::Title, SortDirection::Asc);
        let page = repo
            .find_page(&PageRequest::new(0, 2, sort).unwrap())
            .await
            .unwrap();

        let titles: Vec<&str> = page.content.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["Alpha", "Bravo"]);
        assert_eq!(page.total_elements, 3);
        assert_eq!(page.total_pages, 2);
        assert!(!page.last_page);

        let sort = Sort::new(SortField::Title, SortDirection::Desc);
        let page = repo
            .find_page(&PageRequest::new(1, 2, sort).unwrap())
            .await
            .unwrap();
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.content[0].title, "Alpha");
        assert!(page.last_page);
    }

    #[tokio::test]
    async fn test_find_page_orders_by_content_and_attachment() {
        let db = setup_test_db().await;
        let repo = SqliteInterviewRepository::new(db.pool().clone());

        for (content, attachment) in [
            ("Second round was a system design chat.", Some("memory://a/b.png")),
            ("First round was a take-home exercise.", None),
            ("Third round covered behavioural questions.", Some("memory://a/a.png")),
        ] {
            let mut new = new_interview("a@b.com", "acme", "Loop");
            new.content = content.to_string();
            new.attachment_ref = attachment.map(str::to_string);
            repo.insert(new).await.unwrap();
        }

        let sort = Sort::new(SortField::Content, SortDirection::Asc);
        let page = repo
            .find_page(&PageRequest::new(0, 10, sort).unwrap())
            .await
            .unwrap();
        let firsts: Vec<&str> = page.content.iter().map(|r| &r.content[..5]).collect();
        assert_eq!(firsts, ["First", "Secon", "Third"]);

        let sort = Sort::new(SortField::AttachmentRef, SortDirection::Desc);
        let page = repo
            .find_page(&PageRequest::new(0, 10, sort).unwrap())
            .await
            .unwrap();
        let refs: Vec<Option<&str>> = page
            .content
            .iter()
            .map(|r| r.attachment_ref.as_deref())
            .collect();
        assert_eq!(refs, [Some("memory://a/b.png"), Some("memory://a/a.png"), None]);
    }

    #[tokio::test]
    async fn test_find_page_empty_table() {
        let db = setup_test_db().await;
        let repo = SqliteInterviewRepository::new(db.pool().clone());

        let page = repo.find_page(&PageRequest::default()).await.unwrap();
        assert!(page.content.is_empty());
        assert_eq!(page.total_elements, 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.last_page);
    }

    #[tokio::test]
    async fn test_update_record() {
        let db = setup_test_db().await;
        let repo = SqliteInterviewRepository::new(db.pool().clone());

        let mut record = repo.insert(new_interview("a@b.com", "acme", "Before")).await.unwrap();
        record.title = "After".to_string();
        record.attachment_ref = Some("memory://attachments/k.png".to_string());

        let updated = repo.update(&record).await.unwrap();
        assert_eq!(updated.title, "After");
        assert_eq!(updated.created_at, record.created_at);
        assert!(updated.updated_at >= updated.created_at);

        let found = repo.find_by_id(record.id).await.unwrap().unwrap();
        assert_eq!(found, updated);
    }

    #[tokio::test]
    async fn test_update_missing_record() {
        let db = setup_test_db().await;
        let repo = SqliteInterviewRepository::new(db.pool().clone());

        let record = new_interview("a@b.com", "acme", "Ghost").into_record(Uuid::new_v4(), Utc::now());
        let result = repo.update(&record).await;

        assert!(matches!(result, Err(StorageError::NotFound { id }) if id == record.id));
    }

    #[tokio::test]
    async fn test_delete_record() {
        let db = setup_test_db().await;
        let repo = SqliteInterviewRepository::new(db.pool().clone());

        let record = repo.insert(new_interview("a@b.com", "acme", "Gone")).await.unwrap();
        repo.delete(record.id).await.unwrap();

        assert!(repo.find_by_id(record.id).await.unwrap().is_none());
        assert!(repo.delete(record.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_health_check() {
        let db = setup_test_db().await;
        let repo = SqliteInterviewRepository::new(db.pool().clone());

        repo.health_check().await.unwrap();
        db.close().await;
        assert!(repo.health_check().await.is_err());
    }
}
