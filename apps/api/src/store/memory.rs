//! In-memory [`DocumentStore`] used by unit tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::models::artifact::{ArtifactKind, ArtifactRow};
use crate::models::document::{DocumentContent, DocumentRow};
use crate::store::{DocumentStore, NewArtifact, StorageError};

#[derive(Default)]
pub struct MemoryStore {
    documents: Mutex<Vec<DocumentRow>>,
    artifacts: Mutex<Vec<ArtifactRow>>,
    /// When set, every write fails with `StorageError::Unavailable`.
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Full store contents, for before/after assertions.
    pub fn snapshot(&self) -> (Vec<DocumentRow>, Vec<ArtifactRow>) {
        (
            self.documents.lock().unwrap().clone(),
            self.artifacts.lock().unwrap().clone(),
        )
    }

    pub fn artifact_count(&self) -> usize {
        self.artifacts.lock().unwrap().len()
    }

    fn check_writable(&self) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(StorageError::Unavailable("simulated outage".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create_document(
        &self,
        user_id: Uuid,
        content: DocumentContent,
    ) -> Result<DocumentRow, StorageError> {
        self.check_writable()?;
        let now = Utc::now();
        let row = DocumentRow {
            id: Uuid::new_v4(),
            user_id,
            content,
            generated_text: None,
            created_at: now,
            updated_at: now,
        };
        self.documents.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn list_documents(&self, user_id: Uuid) -> Result<Vec<DocumentRow>, StorageError> {
        // Rows append in insertion order, so most-recent-first is a reverse;
        // no wall-clock tiebreak needed.
        let mut rows: Vec<_> = self
            .documents
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.user_id == user_id)
            .cloned()
            .collect();
        rows.reverse();
        Ok(rows)
    }

    async fn get_document(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<DocumentRow>, StorageError> {
        Ok(self
            .documents
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id == id && d.user_id == user_id)
            .cloned())
    }

    async fn update_document(
        &self,
        user_id: Uuid,
        id: Uuid,
        content: DocumentContent,
    ) -> Result<Option<DocumentRow>, StorageError> {
        self.check_writable()?;
        let mut documents = self.documents.lock().unwrap();
        let Some(doc) = documents
            .iter_mut()
            .find(|d| d.id == id && d.user_id == user_id)
        else {
            return Ok(None);
        };
        doc.content = content;
        doc.updated_at = Utc::now();
        Ok(Some(doc.clone()))
    }

    async fn delete_document(&self, user_id: Uuid, id: Uuid) -> Result<bool, StorageError> {
        self.check_writable()?;
        let mut documents = self.documents.lock().unwrap();
        let before = documents.len();
        documents.retain(|d| !(d.id == id && d.user_id == user_id));
        Ok(documents.len() < before)
    }

    async fn set_generated_text(
        &self,
        user_id: Uuid,
        document_id: Uuid,
        text: &str,
    ) -> Result<bool, StorageError> {
        self.check_writable()?;
        let mut documents = self.documents.lock().unwrap();
        let Some(doc) = documents
            .iter_mut()
            .find(|d| d.id == document_id && d.user_id == user_id)
        else {
            return Ok(false);
        };
        doc.generated_text = Some(text.to_string());
        doc.updated_at = Utc::now();
        Ok(true)
    }

    async fn clear_generated_text(
        &self,
        user_id: Uuid,
        document_id: Uuid,
    ) -> Result<bool, StorageError> {
        self.check_writable()?;
        let mut documents = self.documents.lock().unwrap();
        let Some(doc) = documents
            .iter_mut()
            .find(|d| d.id == document_id && d.user_id == user_id)
        else {
            return Ok(false);
        };
        doc.generated_text = None;
        doc.updated_at = Utc::now();
        Ok(true)
    }

    async fn insert_artifact(&self, artifact: NewArtifact) -> Result<ArtifactRow, StorageError> {
        self.check_writable()?;
        let row = ArtifactRow {
            id: Uuid::new_v4(),
            document_id: artifact.document_id,
            user_id: artifact.user_id,
            kind: artifact.kind.as_str().to_string(),
            body: artifact.body,
            created_at: Utc::now(),
        };
        self.artifacts.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn list_artifacts(
        &self,
        user_id: Uuid,
        document_id: Option<Uuid>,
        kind: Option<ArtifactKind>,
    ) -> Result<Vec<ArtifactRow>, StorageError> {
        let mut rows: Vec<_> = self
            .artifacts
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.user_id == user_id)
            .filter(|a| document_id.map_or(true, |d| a.document_id == d))
            .filter(|a| kind.map_or(true, |k| a.kind == k.as_str()))
            .cloned()
            .collect();
        rows.reverse();
        Ok(rows)
    }

    async fn get_artifact(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<ArtifactRow>, StorageError> {
        Ok(self
            .artifacts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id && a.user_id == user_id)
            .cloned())
    }

    async fn delete_artifact(&self, user_id: Uuid, id: Uuid) -> Result<bool, StorageError> {
        self.check_writable()?;
        let mut artifacts = self.artifacts.lock().unwrap();
        let before = artifacts.len();
        artifacts.retain(|a| !(a.id == id && a.user_id == user_id));
        Ok(artifacts.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::document::{CoverLetterContent, PersonalInfo};

    fn letter_content(description: &str) -> DocumentContent {
        DocumentContent::CoverLetter(CoverLetterContent {
            personal_info: PersonalInfo {
                name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                ..Default::default()
            },
            description: description.to_string(),
        })
    }

    #[tokio::test]
    async fn clearing_generated_text_keeps_the_record() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        let doc = store
            .create_document(user, letter_content("Platform role"))
            .await
            .unwrap();
        store
            .set_generated_text(user, doc.id, "LETTER_OK")
            .await
            .unwrap();

        assert!(store.clear_generated_text(user, doc.id).await.unwrap());

        let reloaded = store.get_document(user, doc.id).await.unwrap().unwrap();
        assert_eq!(reloaded.generated_text, None);
        assert_eq!(reloaded.content, letter_content("Platform role"));
    }

    #[tokio::test]
    async fn foreign_user_cannot_clear_or_update() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let intruder = Uuid::new_v4();
        let doc = store
            .create_document(owner, letter_content("Platform role"))
            .await
            .unwrap();
        store
            .set_generated_text(owner, doc.id, "LETTER_OK")
            .await
            .unwrap();

        assert!(!store.clear_generated_text(intruder, doc.id).await.unwrap());
        let updated = store
            .update_document(intruder, doc.id, letter_content("hijacked"))
            .await
            .unwrap();
        assert!(updated.is_none());

        // Owner's view is untouched.
        let reloaded = store.get_document(owner, doc.id).await.unwrap().unwrap();
        assert_eq!(reloaded.generated_text.as_deref(), Some("LETTER_OK"));
        assert_eq!(reloaded.content, letter_content("Platform role"));
    }

    #[tokio::test]
    async fn update_preserves_inline_generated_text() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        let doc = store
            .create_document(user, letter_content("Platform role"))
            .await
            .unwrap();
        store
            .set_generated_text(user, doc.id, "LETTER_OK")
            .await
            .unwrap();

        let updated = store
            .update_document(user, doc.id, letter_content("Staff role"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.content, letter_content("Staff role"));
        assert_eq!(updated.generated_text.as_deref(), Some("LETTER_OK"));
    }
}
