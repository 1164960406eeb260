use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::config::Config;
use crate::gen_client::GenerationParams;

/// Whether a kind keeps full history or only the most recent generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retention {
    /// Every generation inserts a new artifact row.
    AppendOnly,
    /// Each generation overwrites the document's inline text slot.
    LatestOnly,
}

/// The artifact kinds the service can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    RefinedResume,
    Feedback,
    CoverLetterText,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::RefinedResume => "refined-resume",
            ArtifactKind::Feedback => "feedback",
            ArtifactKind::CoverLetterText => "cover-letter-text",
        }
    }

    pub fn retention(&self) -> Retention {
        match self {
            ArtifactKind::RefinedResume | ArtifactKind::Feedback => Retention::AppendOnly,
            ArtifactKind::CoverLetterText => Retention::LatestOnly,
        }
    }

    /// The source document variant this kind is generated from.
    pub fn source_doc_type(&self) -> &'static str {
        match self {
            ArtifactKind::RefinedResume | ArtifactKind::Feedback => "resume",
            ArtifactKind::CoverLetterText => "cover_letter",
        }
    }

    /// Decoding parameters per kind. Rewrites use low temperature for
    /// consistency; letters use a higher one for natural tone.
    pub fn generation_params(&self, config: &Config) -> GenerationParams {
        match self {
            ArtifactKind::RefinedResume => GenerationParams {
                model: config.resume_model.clone(),
                max_tokens: 1200,
                temperature: 0.3,
            },
            ArtifactKind::Feedback => GenerationParams {
                model: config.resume_model.clone(),
                max_tokens: 1500,
                temperature: 0.2,
            },
            ArtifactKind::CoverLetterText => GenerationParams {
                model: config.letter_model.clone(),
                max_tokens: 800,
                temperature: 0.7,
            },
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted append-only generation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ArtifactRow {
    pub id: Uuid,
    pub document_id: Uuid,
    pub user_id: Uuid,
    pub kind: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// What `produce_artifact` hands back: enough to retrieve or download the
/// result later. `artifact_id` is `None` for latest-only kinds, where the
/// document itself is the reference.
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactRef {
    pub artifact_id: Option<Uuid>,
    pub document_id: Uuid,
    pub kind: ArtifactKind,
    pub text: String,
}
