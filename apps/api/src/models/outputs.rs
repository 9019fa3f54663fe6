//! Structured output schemas — the contracts the generation step must
//! satisfy. Validation is strict: a response missing a required field or
//! carrying an unknown one is rejected as a generation failure, never
//! coerced.

use serde::{Deserialize, Serialize};

/// One work-experience entry in an optimized resume.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkExperienceEntry {
    pub job_title: String,
    pub company: String,
    pub duration: String,
    pub achievements: Vec<String>,
}

/// Schema for the resume-optimization operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptimizedResumeOutput {
    pub professional_summary: String,
    pub key_skills: Vec<String>,
    pub work_experience: Vec<WorkExperienceEntry>,
    pub education: Vec<String>,
}

/// Schema for the cover-letter operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoverLetterOutput {
    pub job_title: String,
    pub company_name: String,
    /// "Hiring Manager" when the job description names nobody.
    pub hiring_manager: String,
    pub body: String,
}

/// One addressed criterion in a KSC response document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KscAnswer {
    pub criterion: String,
    pub response: String,
}

/// Schema for the KSC-response operation: one STAR-grounded narrative per
/// criterion, in the order the criteria appear in the application.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KscResponsesOutput {
    pub responses: Vec<KscAnswer>,
}
