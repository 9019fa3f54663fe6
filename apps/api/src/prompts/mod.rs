//! Prompt Template Registry — maps operation keys to parameterized prompt
//! templates loaded from prompts.yaml.
//!
//! Loading is lazy and happens at most once per process. Template filling
//! substitutes the six recognized placeholders; a template referencing a
//! placeholder the caller does not supply is a contract violation, surfaced
//! as a TemplateFill error rather than silently shipped to the model.

use std::collections::HashMap;
use std::path::PathBuf;

use once_cell::sync::OnceCell;
use tracing::info;

use crate::errors::AppError;

pub const RESUME_OPTIMIZER_KEY: &str = "resume-optimizer";
pub const COVER_LETTER_KEY: &str = "cover-letter";
pub const KSC_RESPONSE_KEY: &str = "ksc-response";

/// The values substituted into an operation prompt template. Every template
/// placeholder must name one of these fields.
#[derive(Debug, Clone, Copy)]
pub struct PromptVars<'a> {
    pub resume: &'a str,
    pub job_description: &'a str,
    pub ksc: &'a str,
    pub user_context: &'a str,
    pub knowledge: &'a str,
    pub relevant_experiences: &'a str,
}

impl<'a> PromptVars<'a> {
    fn pairs(&self) -> [(&'static str, &'a str); 6] {
        [
            ("resume", self.resume),
            ("job_description", self.job_description),
            ("ksc", self.ksc),
            ("user_context", self.user_context),
            ("knowledge", self.knowledge),
            ("relevant_experiences", self.relevant_experiences),
        ]
    }
}

/// Lazily-loaded, process-cached prompt template mapping.
#[derive(Debug, Default)]
pub struct PromptRegistry {
    path: PathBuf,
    cache: OnceCell<HashMap<String, String>>,
}

impl PromptRegistry {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            cache: OnceCell::new(),
        }
    }

    fn load(&self) -> Result<&HashMap<String, String>, AppError> {
        self.cache.get_or_try_init(|| {
            let raw = std::fs::read_to_string(&self.path).map_err(|e| {
                AppError::Configuration(format!(
                    "Prompts file not found at {}: {e}",
                    self.path.display()
                ))
            })?;

            let prompts: HashMap<String, String> = serde_yaml::from_str(&raw).map_err(|e| {
                AppError::Configuration(format!(
                    "Malformed prompts file at {}: {e}",
                    self.path.display()
                ))
            })?;

            info!(
                "Loaded {} prompt templates from {}",
                prompts.len(),
                self.path.display()
            );

            Ok(prompts)
        })
    }

    /// Returns the template registered under `key`. An unknown key fails
    /// with the sorted list of valid keys for diagnosis.
    pub fn get(&self, key: &str) -> Result<&str, AppError> {
        let prompts = self.load()?;
        prompts
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| AppError::PromptNotFound {
                key: key.to_string(),
                available: sorted_keys(prompts),
            })
    }

    /// All registered prompt keys, sorted.
    pub fn keys(&self) -> Result<Vec<String>, AppError> {
        Ok(sorted_keys(self.load()?))
    }
}

fn sorted_keys(prompts: &HashMap<String, String>) -> Vec<String> {
    let mut keys: Vec<String> = prompts.keys().cloned().collect();
    keys.sort();
    keys
}

/// Substitutes the recognized placeholders into `template`.
///
/// The template is scanned before substitution: any `{placeholder}` token
/// (lowercase ASCII + underscores) that does not name a supplied variable
/// fails the fill. Scanning the template rather than the filled output keeps
/// brace-bearing *values* (e.g. JSON snippets in knowledge text) from
/// tripping the check.
pub fn fill(template: &str, vars: &PromptVars) -> Result<String, AppError> {
    let pairs = vars.pairs();

    for token in placeholder_tokens(template) {
        if !pairs.iter().any(|(name, _)| *name == token) {
            return Err(AppError::TemplateFill(format!(
                "Prompt template references unsupported placeholder '{{{token}}}'"
            )));
        }
    }

    let mut filled = template.to_string();
    for (name, value) in pairs {
        filled = filled.replace(&format!("{{{name}}}"), value);
    }
    Ok(filled)
}

/// Extracts `{ident}` tokens where ident is lowercase ASCII + underscores.
fn placeholder_tokens(template: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        rest = &rest[open + 1..];
        if let Some(close) = rest.find('}') {
            let token = &rest[..close];
            if !token.is_empty()
                && token
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b == b'_')
            {
                tokens.push(token);
            }
        } else {
            break;
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const VARS: PromptVars<'static> = PromptVars {
        resume: "RESUME",
        job_description: "JD",
        ksc: "KSC",
        user_context: "CTX",
        knowledge: "KNOW",
        relevant_experiences: "EXP",
    };

    fn write_prompts(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    #[test]
    fn test_get_returns_exact_template_string() {
        let file = write_prompts(
            "resume-optimizer: \"Optimize {resume} for {job_description}\"\ncover-letter: Write a letter\n",
        );
        let registry = PromptRegistry::new(file.path().to_path_buf());

        let template = registry.get("resume-optimizer").unwrap();
        assert_eq!(template, "Optimize {resume} for {job_description}");
    }

    #[test]
    fn test_keys_are_sorted() {
        let file = write_prompts("resume-optimizer: a\ncover-letter: b\nksc-response: c\n");
        let registry = PromptRegistry::new(file.path().to_path_buf());

        assert_eq!(
            registry.keys().unwrap(),
            vec!["cover-letter", "ksc-response", "resume-optimizer"]
        );
    }

    #[test]
    fn test_unknown_key_lists_valid_keys() {
        let file = write_prompts("resume-optimizer: a\ncover-letter: b\nksc-response: c\n");
        let registry = PromptRegistry::new(file.path().to_path_buf());

        match registry.get("salary-negotiator") {
            Err(AppError::PromptNotFound { key, available }) => {
                assert_eq!(key, "salary-negotiator");
                assert_eq!(
                    available,
                    vec!["cover-letter", "ksc-response", "resume-optimizer"]
                );
            }
            other => panic!("Expected PromptNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_configuration_error() {
        let registry = PromptRegistry::new(PathBuf::from("/nonexistent/prompts.yaml"));
        assert!(matches!(
            registry.get("resume-optimizer"),
            Err(AppError::Configuration(_))
        ));
    }

    #[test]
    fn test_malformed_yaml_is_configuration_error() {
        let file = write_prompts("resume-optimizer: [not, a, string-map\n");
        let registry = PromptRegistry::new(file.path().to_path_buf());
        assert!(matches!(
            registry.get("resume-optimizer"),
            Err(AppError::Configuration(_))
        ));
    }

    #[test]
    fn test_load_is_cached_after_first_success() {
        let file = write_prompts("cover-letter: original\n");
        let registry = PromptRegistry::new(file.path().to_path_buf());
        assert_eq!(registry.get("cover-letter").unwrap(), "original");

        std::fs::write(file.path(), "cover-letter: rewritten\n").unwrap();
        assert_eq!(
            registry.get("cover-letter").unwrap(),
            "original",
            "Second read must come from the cache"
        );
    }

    #[test]
    fn test_fill_substitutes_all_placeholders() {
        let template = "R={resume} J={job_description} K={ksc} U={user_context} N={knowledge} E={relevant_experiences}";
        let filled = fill(template, &VARS).unwrap();
        assert_eq!(filled, "R=RESUME J=JD K=KSC U=CTX N=KNOW E=EXP");
    }

    #[test]
    fn test_fill_fails_on_unsupported_placeholder() {
        let result = fill("Optimize {resume} for {hiring_manager}", &VARS);
        match result {
            Err(AppError::TemplateFill(msg)) => {
                assert!(msg.contains("hiring_manager"), "got: {msg}")
            }
            other => panic!("Expected TemplateFill, got {other:?}"),
        }
    }

    #[test]
    fn test_fill_ignores_non_placeholder_braces() {
        // JSON examples inside templates must not be mistaken for placeholders
        let template = "Return {\"job_title\": \"X\"} using {resume}";
        let filled = fill(template, &VARS).unwrap();
        assert!(filled.contains("\"job_title\""));
        assert!(filled.contains("RESUME"));
    }

    #[test]
    fn test_fill_allows_repeated_placeholder() {
        let filled = fill("{ksc} then {ksc} again", &VARS).unwrap();
        assert_eq!(filled, "KSC then KSC again");
    }
}
