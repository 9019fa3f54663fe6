// Shared prompt constants and prompt-building utilities.
// Operation prompts themselves live in prompts.yaml; this file contains the
// cross-cutting fragments appended to every generation call.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are an expert career consultant producing \
    tailored job-application documents. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Common instruction appended to all generation prompts.
pub const GROUNDING_INSTRUCTION: &str = "\
    CRITICAL: Every claim you generate must be traceable to the candidate's resume, \
    the relevant-experience context, or the user-supplied context. \
    Do NOT invent employers, job titles, dates, qualifications, or outcomes. \
    If the supplied material does not support a claim, omit it entirely.";
