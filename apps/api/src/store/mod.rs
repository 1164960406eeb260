//! Document Store — persistence for source documents and generated artifacts.
//!
//! Every read/modify/delete is ownership-filtered: a missing row and a row
//! owned by someone else are indistinguishable (`None`), so cross-user
//! access can never leak existence.

pub mod postgres;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::artifact::{ArtifactKind, ArtifactRow};
use crate::models::document::{DocumentContent, DocumentRow};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("corrupt document payload: {0}")]
    CorruptPayload(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A new append-only artifact to insert.
#[derive(Debug, Clone)]
pub struct NewArtifact {
    pub document_id: Uuid,
    pub user_id: Uuid,
    pub kind: ArtifactKind,
    pub body: String,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn create_document(
        &self,
        user_id: Uuid,
        content: DocumentContent,
    ) -> Result<DocumentRow, StorageError>;

    async fn list_documents(&self, user_id: Uuid) -> Result<Vec<DocumentRow>, StorageError>;

    async fn get_document(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<DocumentRow>, StorageError>;

    /// Full-document update. `None` when absent or not owned.
    async fn update_document(
        &self,
        user_id: Uuid,
        id: Uuid,
        content: DocumentContent,
    ) -> Result<Option<DocumentRow>, StorageError>;

    /// Returns whether a row was deleted. Artifacts are left untouched.
    async fn delete_document(&self, user_id: Uuid, id: Uuid) -> Result<bool, StorageError>;

    /// Overwrites the inline generated-text slot on a document. A single
    /// atomic UPDATE, so two racing generations cannot interleave a partial
    /// write. Returns whether a row matched.
    async fn set_generated_text(
        &self,
        user_id: Uuid,
        document_id: Uuid,
        text: &str,
    ) -> Result<bool, StorageError>;

    /// Clears the inline generated-text slot, keeping the document.
    async fn clear_generated_text(
        &self,
        user_id: Uuid,
        document_id: Uuid,
    ) -> Result<bool, StorageError>;

    async fn insert_artifact(&self, artifact: NewArtifact) -> Result<ArtifactRow, StorageError>;

    /// Owned artifacts, most recent first, optionally filtered by source
    /// document and kind.
    async fn list_artifacts(
        &self,
        user_id: Uuid,
        document_id: Option<Uuid>,
        kind: Option<ArtifactKind>,
    ) -> Result<Vec<ArtifactRow>, StorageError>;

    async fn get_artifact(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<ArtifactRow>, StorageError>;

    async fn delete_artifact(&self, user_id: Uuid, id: Uuid) -> Result<bool, StorageError>;
}
