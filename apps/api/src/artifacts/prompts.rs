//! Prompt construction for every artifact kind.
//!
//! Pure functions of their input: no I/O, no clock (the cover-letter date is
//! injected by the caller), so two calls with the same document always
//! produce the same string.

use chrono::NaiveDate;

use crate::models::artifact::ArtifactKind;
use crate::models::document::{CoverLetterContent, DocumentContent, ResumeContent};

/// Builds the prompt for `kind` against `content`. `None` when the kind does
/// not apply to the document variant (e.g. feedback on a cover letter).
pub fn build_prompt(
    kind: ArtifactKind,
    content: &DocumentContent,
    today: NaiveDate,
) -> Option<String> {
    match (kind, content) {
        (ArtifactKind::RefinedResume, DocumentContent::Resume(resume)) => {
            Some(refined_resume_prompt(resume))
        }
        (ArtifactKind::Feedback, DocumentContent::Resume(resume)) => {
            Some(feedback_prompt(resume))
        }
        (ArtifactKind::CoverLetterText, DocumentContent::CoverLetter(letter)) => {
            Some(cover_letter_prompt(letter, today))
        }
        _ => None,
    }
}

const REFINED_RESUME_HEADER: &str = "\
You are an expert ATS-optimized resume writer specializing in creating professional, impactful resumes.

Your output must be ONLY the resume. No extra sentences, no introductions, no closing remarks, no commentary.
Do not say \"Here is...\", \"I hope...\", \"Let me know...\", or anything similar.
Do not add quotes or explanations.
Do not output anything except the formatted resume.

Format rules:
- Professional layout with spacing and bullet points
- Section titles in ALL CAPS (e.g., OBJECTIVE, SKILLS, EDUCATION)
- Use clear line breaks between sections
- Use only the candidate's data provided";

const REFINED_RESUME_FOOTER: &str = "\
FINAL RULE:
Output ONLY the resume content. No greetings. No explanations. No extra text.";

const FEEDBACK_HEADER: &str = "\
I want you to act as a professional resume reviewer.
- DO NOT recreate the resume. Just provide review/feedback.
- Tell what's good, what can be improved, and what's unnecessary.
- Structure the review as: STRENGTHS, AREAS FOR IMPROVEMENT, ACTION ITEMS.
- Format with proper spacing, line breaks, bullet points.
- Keep the tone professional and concise.";

const COVER_LETTER_HEADER: &str = "\
You are a professional cover letter writing assistant. Generate a one-page, well-formatted, formal cover letter based on the candidate's details and description below.

STRICT RULES:
- ONLY return the cover letter. No extra text, instructions, or commentary.
- Start with the date given below and a formal greeting (e.g., \"Dear Hiring Manager\" or based on company if known).
- Use the candidate's name, contact information, and description to tailor the letter.
- Highlight relevant skills, education, and projects that align with the job.
- Write 3-4 paragraphs and end with a strong closing paragraph and a professional sign-off (e.g., \"Sincerely, [Full Name]\").
- Use clear formatting, line breaks between paragraphs, and keep the tone formal yet enthusiastic.
- Make sure it sounds like it's written by a real person.";

pub fn refined_resume_prompt(resume: &ResumeContent) -> String {
    format!(
        "{REFINED_RESUME_HEADER}\n\n\
         ==========================\n\
         CANDIDATE DETAILS:\n\
         {}\n\
         ==========================\n\n\
         {REFINED_RESUME_FOOTER}\n",
        candidate_block(resume)
    )
}

pub fn feedback_prompt(resume: &ResumeContent) -> String {
    format!(
        "{FEEDBACK_HEADER}\n\n\
         Candidate Data:\n\
         ------------------------------\n\
         {}\n\
         ------------------------------\n",
        candidate_block(resume)
    )
}

pub fn cover_letter_prompt(letter: &CoverLetterContent, today: NaiveDate) -> String {
    let info = &letter.personal_info;
    format!(
        "{COVER_LETTER_HEADER}\n\n\
         TODAY'S DATE: {}\n\n\
         CANDIDATE INFORMATION:\n\
         Full Name: {}\n\
         Email: {}\n\
         Phone: {}\n\
         GitHub: {}\n\
         LinkedIn: {}\n\n\
         JOB DESCRIPTION / CANDIDATE SUMMARY:\n\
         {}\n",
        today.format("%B %d, %Y"),
        info.name,
        info.email,
        opt(&info.phone),
        opt(&info.github),
        opt(&info.linked_in),
        letter.description
    )
}

/// Deterministic multi-section serialization of a resume, shared by the
/// rewrite and feedback prompts. Empty list fields render as empty sections.
fn candidate_block(resume: &ResumeContent) -> String {
    let info = &resume.personal_info;

    let work_experience = resume
        .work_experience
        .iter()
        .map(|exp| {
            format!(
                "- {} ({}) - {}\n  {}",
                exp.role,
                exp.duration,
                exp.company.as_deref().unwrap_or("N/A"),
                exp.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let projects = resume
        .projects
        .iter()
        .map(|proj| {
            format!(
                "- {}: {} (Link: {})",
                proj.title,
                proj.description,
                proj.link.as_deref().unwrap_or("N/A")
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let education = resume
        .education
        .iter()
        .map(|edu| {
            format!(
                "- {} in {} from {} ({} - {})",
                edu.degree, edu.field_of_study, edu.institution, edu.start_year, edu.end_year
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Name: {}\n\
         Email: {}\n\
         Phone: {}\n\
         GitHub: {}\n\
         LinkedIn: {}\n\n\
         Career Objective:\n{}\n\n\
         Skills: {}\n\
         Tech Stack: {}\n\n\
         Work Experience:\n{}\n\n\
         Projects:\n{}\n\n\
         Education:\n{}",
        info.name,
        info.email,
        opt(&info.phone),
        opt(&info.github),
        opt(&info.linked_in),
        resume.career_objective,
        resume.skills.join(", "),
        resume.tech_stack.join(", "),
        work_experience,
        projects,
        education
    )
}

fn opt(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or("N/A")
}
