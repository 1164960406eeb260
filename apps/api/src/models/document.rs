use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Contact block shared by both document variants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub linked_in: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkExperience {
    pub role: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    #[serde(default)]
    pub field_of_study: String,
    #[serde(default)]
    pub start_year: String,
    #[serde(default)]
    pub end_year: String,
}

/// Structured body of a resume document. List fields default to empty so a
/// sparse submission still deserializes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeContent {
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub career_objective: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub work_experience: Vec<WorkExperience>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub education: Vec<Education>,
}

/// Structured body of a cover-letter document: contact block plus the
/// free-text job / candidate description the letter is written against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverLetterContent {
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub description: String,
}

/// The two user-editable source document variants, tagged for the wire and
/// for the JSONB `content` column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DocumentContent {
    Resume(ResumeContent),
    CoverLetter(CoverLetterContent),
}

impl DocumentContent {
    /// Stable discriminant used for the `doc_type` column.
    pub fn doc_type(&self) -> &'static str {
        match self {
            DocumentContent::Resume(_) => "resume",
            DocumentContent::CoverLetter(_) => "cover_letter",
        }
    }

    pub fn personal_info(&self) -> &PersonalInfo {
        match self {
            DocumentContent::Resume(r) => &r.personal_info,
            DocumentContent::CoverLetter(c) => &c.personal_info,
        }
    }
}

/// A persisted source document. `generated_text` is the inline artifact slot
/// used by latest-only kinds (cover letters); it is never set for resumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRow {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(flatten)]
    pub content: DocumentContent,
    pub generated_text: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
