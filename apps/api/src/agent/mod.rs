//! Orchestrator — composes the experience store, knowledge base, prompt
//! registry, generation client, and renderer into the three document
//! operations.
//!
//! Flow (identical for all three): build search text → experience lookup →
//! knowledge → prompt template fill → structured LLM call → render.
//!
//! Generation failures do NOT propagate: they degrade to
//! `DocumentOutcome::Failed` carrying a uniform error message, so callers
//! always receive a result. Configuration, prompt-key, and template errors
//! abort the operation instead — those are defects, not runtime conditions.

pub mod handlers;
mod prompts;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::experience::ExperienceDb;
use crate::knowledge::KnowledgeBase;
use crate::llm_client::prompts::{GROUNDING_INSTRUCTION, JSON_ONLY_SYSTEM};
use crate::llm_client::{generate_structured, CompletionProvider, LlmError};
use crate::models::outputs::{CoverLetterOutput, KscResponsesOutput, OptimizedResumeOutput};
use crate::prompts::{
    fill, PromptRegistry, PromptVars, COVER_LETTER_KEY, KSC_RESPONSE_KEY, RESUME_OPTIMIZER_KEY,
};
use crate::render::DocumentRenderer;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Inputs common to all three document operations.
#[derive(Debug, Clone, Default)]
pub struct DocumentInputs {
    pub resume: String,
    pub job_description: String,
    pub ksc: String,
    pub user_context: String,
}

/// Outcome of a document operation.
///
/// `Failed` is the degrade path for generation failures: the detail string
/// is the uniform user-visible error message. `into_text()` collapses the
/// distinction for callers that only want a string.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentOutcome {
    Generated(String),
    Failed { detail: String },
}

impl DocumentOutcome {
    pub fn is_generated(&self) -> bool {
        matches!(self, DocumentOutcome::Generated(_))
    }

    pub fn into_text(self) -> String {
        match self {
            DocumentOutcome::Generated(document) => document,
            DocumentOutcome::Failed { detail } => detail,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Agent
// ────────────────────────────────────────────────────────────────────────────

/// The orchestrator. All members are loaded once at startup and read-only
/// afterwards; operations may run concurrently against the shared state.
pub struct Agent {
    experience: ExperienceDb,
    knowledge: KnowledgeBase,
    prompts: PromptRegistry,
    renderer: DocumentRenderer,
    llm: Arc<dyn CompletionProvider>,
}

impl Agent {
    pub fn new(
        experience: ExperienceDb,
        knowledge: KnowledgeBase,
        prompts: PromptRegistry,
        renderer: DocumentRenderer,
        llm: Arc<dyn CompletionProvider>,
    ) -> Self {
        Self {
            experience,
            knowledge,
            prompts,
            renderer,
            llm,
        }
    }

    /// Rewrites the resume to target the job description and KSC.
    pub async fn optimize_resume(
        &self,
        inputs: &DocumentInputs,
    ) -> Result<DocumentOutcome, AppError> {
        match self
            .generate::<OptimizedResumeOutput>(
                RESUME_OPTIMIZER_KEY,
                prompts::RESUME_SCHEMA_INSTRUCTION,
                inputs,
            )
            .await?
        {
            Ok(output) => {
                let document = self.renderer.render_resume(&output)?;
                Ok(DocumentOutcome::Generated(document))
            }
            Err(e) => Ok(degrade("resume optimization", e)),
        }
    }

    /// Generates a cover letter for the target role.
    pub async fn generate_cover_letter(
        &self,
        inputs: &DocumentInputs,
    ) -> Result<DocumentOutcome, AppError> {
        match self
            .generate::<CoverLetterOutput>(
                COVER_LETTER_KEY,
                prompts::COVER_LETTER_SCHEMA_INSTRUCTION,
                inputs,
            )
            .await?
        {
            Ok(output) => {
                let document = self.renderer.render_cover_letter(&output)?;
                Ok(DocumentOutcome::Generated(document))
            }
            Err(e) => Ok(degrade("cover letter", e)),
        }
    }

    /// Generates one STAR-grounded response per selection criterion.
    pub async fn generate_ksc_responses(
        &self,
        inputs: &DocumentInputs,
    ) -> Result<DocumentOutcome, AppError> {
        match self
            .generate::<KscResponsesOutput>(KSC_RESPONSE_KEY, prompts::KSC_SCHEMA_INSTRUCTION, inputs)
            .await?
        {
            Ok(output) => {
                let document = self.renderer.render_ksc(&output)?;
                Ok(DocumentOutcome::Generated(document))
            }
            Err(e) => Ok(degrade("KSC responses", e)),
        }
    }

    /// Steps 1–6 of the pipeline, shared by all operations: assemble the
    /// prompt, then run the structured LLM call.
    ///
    /// The outer `Result` carries hard failures (configuration, prompt key,
    /// template fill); the inner one carries the degradeable generation
    /// outcome.
    async fn generate<T: DeserializeOwned>(
        &self,
        prompt_key: &str,
        schema_instruction: &str,
        inputs: &DocumentInputs,
    ) -> Result<Result<T, LlmError>, AppError> {
        let search_text = format!("{}\n{}", inputs.job_description, inputs.ksc);
        let relevant_experiences = self.experience.find_relevant(&search_text);

        let knowledge = self.knowledge.load()?;
        let template = self.prompts.get(prompt_key)?;

        let filled = fill(
            template,
            &PromptVars {
                resume: &inputs.resume,
                job_description: &inputs.job_description,
                ksc: &inputs.ksc,
                user_context: &inputs.user_context,
                knowledge,
                relevant_experiences: &relevant_experiences,
            },
        )?;

        let prompt = format!("{filled}\n\n{GROUNDING_INSTRUCTION}\n\n{schema_instruction}");

        info!(
            "Running '{prompt_key}' generation ({} prompt chars)",
            prompt.len()
        );

        Ok(generate_structured::<T>(self.llm.as_ref(), &prompt, JSON_ONLY_SYSTEM).await)
    }
}

/// Converts a generation failure into the uniform degrade outcome.
fn degrade(operation: &str, e: LlmError) -> DocumentOutcome {
    warn!("Structured output failure during {operation}: {e}");
    DocumentOutcome::Failed {
        detail: format!("AI Structured Output Error. Details: {e}"),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
