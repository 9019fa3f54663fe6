//! Document Renderer — fills per-document skeleton templates with validated
//! structured output plus the fixed identity fields.
//!
//! Pure templating. A field referenced by a template but absent from the
//! supplied data indicates a schema/template mismatch — strict mode turns
//! that into an error instead of an empty substitution.

use std::path::Path;

use chrono::Local;
use handlebars::Handlebars;
use serde_json::json;

use crate::errors::AppError;
use crate::models::outputs::{CoverLetterOutput, KscResponsesOutput, OptimizedResumeOutput};

// Fixed identity/contact fields. Supplied by the renderer, never by callers.
const FULL_NAME: &str = "Mx. Nishant Jonas Dougall";
const ADDRESS: &str = "Unit 2 418 High Street, Northcote VICTORIA 3070, Australia";
const PHONE: &str = "+61412202666";
const EMAIL: &str = "nishant.dougall@example.com";

const RESUME_TEMPLATE: &str = "resume";
const COVER_LETTER_TEMPLATE: &str = "cover_letter";
const KSC_TEMPLATE: &str = "ksc_responses";

/// Handlebars registry with the three document skeletons, loaded once at
/// startup.
pub struct DocumentRenderer {
    registry: Handlebars<'static>,
}

impl DocumentRenderer {
    pub fn load(templates_dir: &Path) -> Result<Self, AppError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        // Documents are markdown, not HTML
        registry.register_escape_fn(handlebars::no_escape);

        for name in [RESUME_TEMPLATE, COVER_LETTER_TEMPLATE, KSC_TEMPLATE] {
            let path = templates_dir.join(format!("{name}.hbs"));
            registry.register_template_file(name, &path).map_err(|e| {
                AppError::Configuration(format!(
                    "Failed to load document template {}: {e}",
                    path.display()
                ))
            })?;
        }

        Ok(Self { registry })
    }

    pub fn render_resume(&self, output: &OptimizedResumeOutput) -> Result<String, AppError> {
        let data = json!({
            "full_name": FULL_NAME,
            "address": ADDRESS,
            "phone": PHONE,
            "email": EMAIL,
            "resume": output,
        });
        self.render(RESUME_TEMPLATE, &data)
    }

    pub fn render_cover_letter(&self, output: &CoverLetterOutput) -> Result<String, AppError> {
        let data = json!({
            "date": Local::now().format("%d %B %Y").to_string(),
            "full_name": FULL_NAME,
            "address": ADDRESS,
            "phone": PHONE,
            "email": EMAIL,
            "job_title": output.job_title,
            "company_name": output.company_name,
            "hiring_manager": output.hiring_manager,
            "body": output.body,
        });
        self.render(COVER_LETTER_TEMPLATE, &data)
    }

    pub fn render_ksc(&self, output: &KscResponsesOutput) -> Result<String, AppError> {
        let data = json!({
            "full_name": FULL_NAME,
            "address": ADDRESS,
            "phone": PHONE,
            "email": EMAIL,
            "responses": output.responses,
        });
        self.render(KSC_TEMPLATE, &data)
    }

    fn render(&self, name: &str, data: &serde_json::Value) -> Result<String, AppError> {
        self.registry
            .render(name, data)
            .map_err(|e| AppError::TemplateFill(format!("Failed to render '{name}': {e}")))
    }
}
