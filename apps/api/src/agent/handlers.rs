//! Axum route handlers for the document API.
//!
//! Thin adapters: validate the request, delegate to the agent, map the
//! outcome onto the wire. A degraded generation still answers 200 — the
//! `status` field carries the distinction.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::agent::{DocumentInputs, DocumentOutcome};
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateDocumentRequest {
    pub resume: String,
    pub job_description: String,
    #[serde(default)]
    pub ksc: String,
    #[serde(default)]
    pub user_context: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateDocumentResponse {
    pub document: String,
    pub status: String,
}

fn to_inputs(request: GenerateDocumentRequest) -> Result<DocumentInputs, AppError> {
    if request.resume.trim().is_empty() {
        return Err(AppError::Validation("resume cannot be empty".to_string()));
    }
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }
    Ok(DocumentInputs {
        resume: request.resume,
        job_description: request.job_description,
        ksc: request.ksc,
        user_context: request.user_context,
    })
}

fn to_response(outcome: DocumentOutcome) -> GenerateDocumentResponse {
    match outcome {
        DocumentOutcome::Generated(document) => GenerateDocumentResponse {
            document,
            status: "ok".to_string(),
        },
        DocumentOutcome::Failed { detail } => GenerateDocumentResponse {
            document: detail,
            status: "generation_failed".to_string(),
        },
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/documents/resume
pub async fn handle_optimize_resume(
    State(state): State<AppState>,
    Json(request): Json<GenerateDocumentRequest>,
) -> Result<Json<GenerateDocumentResponse>, AppError> {
    let inputs = to_inputs(request)?;
    let outcome = state.agent.optimize_resume(&inputs).await?;
    Ok(Json(to_response(outcome)))
}

/// POST /api/v1/documents/cover-letter
pub async fn handle_generate_cover_letter(
    State(state): State<AppState>,
    Json(request): Json<GenerateDocumentRequest>,
) -> Result<Json<GenerateDocumentResponse>, AppError> {
    let inputs = to_inputs(request)?;
    let outcome = state.agent.generate_cover_letter(&inputs).await?;
    Ok(Json(to_response(outcome)))
}

/// POST /api/v1/documents/ksc
///
/// The KSC text is the operation's main input, so it is required here even
/// though the other operations accept it empty.
pub async fn handle_generate_ksc_responses(
    State(state): State<AppState>,
    Json(request): Json<GenerateDocumentRequest>,
) -> Result<Json<GenerateDocumentResponse>, AppError> {
    if request.ksc.trim().is_empty() {
        return Err(AppError::Validation("ksc cannot be empty".to_string()));
    }
    let inputs = to_inputs(request)?;
    let outcome = state.agent.generate_ksc_responses(&inputs).await?;
    Ok(Json(to_response(outcome)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_resume_rejected() {
        let request = GenerateDocumentRequest {
            resume: "   ".to_string(),
            job_description: "JD".to_string(),
            ksc: String::new(),
            user_context: String::new(),
        };
        assert!(matches!(to_inputs(request), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_optional_fields_default_to_empty() {
        let request: GenerateDocumentRequest =
            serde_json::from_str(r#"{"resume": "R", "job_description": "J"}"#).unwrap();
        let inputs = to_inputs(request).unwrap();
        assert_eq!(inputs.ksc, "");
        assert_eq!(inputs.user_context, "");
    }

    #[test]
    fn test_degraded_outcome_maps_to_generation_failed() {
        let response = to_response(DocumentOutcome::Failed {
            detail: "AI Structured Output Error. Details: boom".to_string(),
        });
        assert_eq!(response.status, "generation_failed");
        assert!(response.document.contains("boom"));
    }

    #[test]
    fn test_generated_outcome_maps_to_ok() {
        let response = to_response(DocumentOutcome::Generated("doc".to_string()));
        assert_eq!(response.status, "ok");
        assert_eq!(response.document, "doc");
    }
}
