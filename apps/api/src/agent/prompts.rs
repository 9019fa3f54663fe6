// Schema-instruction constants for the document operations.
// Operation prompt bodies live in prompts.yaml; these constants pin the
// exact JSON shape each structured response must take and are appended to
// the filled prompt before the call.

/// Output schema for the resume-optimization operation.
pub const RESUME_SCHEMA_INSTRUCTION: &str = r#"Return a JSON object with this EXACT schema (no extra fields):
{
  "professional_summary": "Two to three sentences tailored to this role",
  "key_skills": ["skill drawn from the resume or experience context"],
  "work_experience": [
    {
      "job_title": "Senior Analyst",
      "company": "Example Pty Ltd",
      "duration": "2019 - 2023",
      "achievements": ["Achievement grounded in the supplied material"]
    }
  ],
  "education": ["Qualification, institution, year"]
}"#;

/// Output schema for the cover-letter operation.
pub const COVER_LETTER_SCHEMA_INSTRUCTION: &str = r#"Return a JSON object with this EXACT schema (no extra fields):
{
  "job_title": "The advertised position title",
  "company_name": "The hiring organisation",
  "hiring_manager": "Named contact, or 'Hiring Manager' if none is given",
  "body": "The letter body only — no salutation, no sign-off, no contact details"
}"#;

/// Output schema for the KSC-response operation.
pub const KSC_SCHEMA_INSTRUCTION: &str = r#"Return a JSON object with this EXACT schema (no extra fields):
{
  "responses": [
    {
      "criterion": "The selection criterion, verbatim",
      "response": "A STAR-structured narrative addressing it"
    }
  ]
}
Address every criterion, in the order the criteria are listed."#;
