//! Artifact service — orchestrates one generation end to end.
//!
//! Flow: load source document (ownership-filtered) → build prompt →
//! call the generation client → persist by retention policy → return a
//! reference. Exactly one write on success, zero on any failure path.

use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;

use crate::artifacts::prompts::build_prompt;
use crate::config::Config;
use crate::errors::AppError;
use crate::gen_client::TextGenerator;
use crate::models::artifact::{ArtifactKind, ArtifactRef, ArtifactRow, Retention};
use crate::store::{DocumentStore, NewArtifact};

/// Produces one generated artifact for a document the caller owns.
///
/// `today` is injected rather than read from the clock so prompt
/// construction stays deterministic under test.
pub async fn produce_artifact(
    store: &dyn DocumentStore,
    generator: &dyn TextGenerator,
    config: &Config,
    user_id: Uuid,
    document_id: Uuid,
    kind: ArtifactKind,
    today: NaiveDate,
) -> Result<ArtifactRef, AppError> {
    // Absent and not-owned are deliberately indistinguishable.
    let document = store
        .get_document(user_id, document_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Document {document_id} not found")))?;

    let prompt = build_prompt(kind, &document.content, today).ok_or_else(|| {
        AppError::Validation(format!(
            "artifact kind '{kind}' requires a {} document",
            kind.source_doc_type()
        ))
    })?;

    let params = kind.generation_params(config);
    let text = generator.generate(&prompt, &params).await?;

    info!(
        "Generated {} for document {} ({} chars)",
        kind,
        document_id,
        text.len()
    );

    // The generation already succeeded; a write failure here must carry the
    // text out so it is not lost.
    match kind.retention() {
        Retention::AppendOnly => {
            let artifact = store
                .insert_artifact(NewArtifact {
                    document_id,
                    user_id,
                    kind,
                    body: text.clone(),
                })
                .await
                .map_err(|source| AppError::StorageAfterGeneration {
                    text: text.clone(),
                    source,
                })?;

            Ok(ArtifactRef {
                artifact_id: Some(artifact.id),
                document_id,
                kind,
                text,
            })
        }
        Retention::LatestOnly => {
            let updated = store
                .set_generated_text(user_id, document_id, &text)
                .await
                .map_err(|source| AppError::StorageAfterGeneration {
                    text: text.clone(),
                    source,
                })?;

            if !updated {
                // Document deleted between the read and the write.
                return Err(AppError::NotFound(format!(
                    "Document {document_id} not found"
                )));
            }

            Ok(ArtifactRef {
                artifact_id: None,
                document_id,
                kind,
                text,
            })
        }
    }
}

pub async fn list_artifacts(
    store: &dyn DocumentStore,
    user_id: Uuid,
    document_id: Option<Uuid>,
    kind: Option<ArtifactKind>,
) -> Result<Vec<ArtifactRow>, AppError> {
    Ok(store.list_artifacts(user_id, document_id, kind).await?)
}

pub async fn get_artifact(
    store: &dyn DocumentStore,
    user_id: Uuid,
    id: Uuid,
) -> Result<ArtifactRow, AppError> {
    store
        .get_artifact(user_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Artifact {id} not found")))
}

/// Deletes a generated artifact. Never touches the source document.
pub async fn delete_artifact(
    store: &dyn DocumentStore,
    user_id: Uuid,
    id: Uuid,
) -> Result<(), AppError> {
    if store.delete_artifact(user_id, id).await? {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("Artifact {id} not found")))
    }
}
