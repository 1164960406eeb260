//! sqlx/PostgreSQL implementation of [`DocumentStore`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::artifact::{ArtifactKind, ArtifactRow};
use crate::models::document::{DocumentContent, DocumentRow};
use crate::store::{DocumentStore, NewArtifact, StorageError};

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Raw row shape for `documents` — the JSONB payload is decoded into
/// [`DocumentContent`] after the fetch.
#[derive(Debug, FromRow)]
struct DocumentRecord {
    id: Uuid,
    user_id: Uuid,
    content: serde_json::Value,
    generated_text: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<DocumentRecord> for DocumentRow {
    type Error = StorageError;

    fn try_from(record: DocumentRecord) -> Result<Self, Self::Error> {
        let content: DocumentContent = serde_json::from_value(record.content)?;
        Ok(DocumentRow {
            id: record.id,
            user_id: record.user_id,
            content,
            generated_text: record.generated_text,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn create_document(
        &self,
        user_id: Uuid,
        content: DocumentContent,
    ) -> Result<DocumentRow, StorageError> {
        let payload = serde_json::to_value(&content)?;
        let record = sqlx::query_as::<_, DocumentRecord>(
            r#"
            INSERT INTO documents (user_id, doc_type, content)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, content, generated_text, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(content.doc_type())
        .bind(payload)
        .fetch_one(&self.pool)
        .await?;

        record.try_into()
    }

    async fn list_documents(&self, user_id: Uuid) -> Result<Vec<DocumentRow>, StorageError> {
        let records = sqlx::query_as::<_, DocumentRecord>(
            r#"
            SELECT id, user_id, content, generated_text, created_at, updated_at
            FROM documents
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        records.into_iter().map(DocumentRow::try_from).collect()
    }

    async fn get_document(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<DocumentRow>, StorageError> {
        let record = sqlx::query_as::<_, DocumentRecord>(
            r#"
            SELECT id, user_id, content, generated_text, created_at, updated_at
            FROM documents
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        record.map(DocumentRow::try_from).transpose()
    }

    async fn update_document(
        &self,
        user_id: Uuid,
        id: Uuid,
        content: DocumentContent,
    ) -> Result<Option<DocumentRow>, StorageError> {
        let payload = serde_json::to_value(&content)?;
        let record = sqlx::query_as::<_, DocumentRecord>(
            r#"
            UPDATE documents
            SET content = $3, doc_type = $4, updated_at = now()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, content, generated_text, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(payload)
        .bind(content.doc_type())
        .fetch_optional(&self.pool)
        .await?;

        record.map(DocumentRow::try_from).transpose()
    }

    async fn delete_document(&self, user_id: Uuid, id: Uuid) -> Result<bool, StorageError> {
        // Artifacts are intentionally left in place; they are immutable
        // snapshots and remain downloadable after the source goes away.
        let result = sqlx::query("DELETE FROM documents WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_generated_text(
        &self,
        user_id: Uuid,
        document_id: Uuid,
        text: &str,
    ) -> Result<bool, StorageError> {
        let result = sqlx::query(
            r#"
            UPDATE documents
            SET generated_text = $3, updated_at = now()
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(document_id)
        .bind(user_id)
        .bind(text)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn clear_generated_text(
        &self,
        user_id: Uuid,
        document_id: Uuid,
    ) -> Result<bool, StorageError> {
        let result = sqlx::query(
            r#"
            UPDATE documents
            SET generated_text = NULL, updated_at = now()
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(document_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn insert_artifact(&self, artifact: NewArtifact) -> Result<ArtifactRow, StorageError> {
        Ok(sqlx::query_as::<_, ArtifactRow>(
            r#"
            INSERT INTO artifacts (document_id, user_id, kind, body)
            VALUES ($1, $2, $3, $4)
            RETURNING id, document_id, user_id, kind, body, created_at
            "#,
        )
        .bind(artifact.document_id)
        .bind(artifact.user_id)
        .bind(artifact.kind.as_str())
        .bind(&artifact.body)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn list_artifacts(
        &self,
        user_id: Uuid,
        document_id: Option<Uuid>,
        kind: Option<ArtifactKind>,
    ) -> Result<Vec<ArtifactRow>, StorageError> {
        Ok(sqlx::query_as::<_, ArtifactRow>(
            r#"
            SELECT id, document_id, user_id, kind, body, created_at
            FROM artifacts
            WHERE user_id = $1
              AND ($2::uuid IS NULL OR document_id = $2)
              AND ($3::text IS NULL OR kind = $3)
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(document_id)
        .bind(kind.map(|k| k.as_str()))
        .fetch_all(&self.pool)
        .await?)
    }

    async fn get_artifact(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<ArtifactRow>, StorageError> {
        Ok(sqlx::query_as::<_, ArtifactRow>(
            r#"
            SELECT id, document_id, user_id, kind, body, created_at
            FROM artifacts
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn delete_artifact(&self, user_id: Uuid, id: Uuid) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM artifacts WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
