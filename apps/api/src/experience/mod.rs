//! Experience Store — the personal experience database and its relevance
//! matcher.
//!
//! Matching is deliberately binary: a record is included iff any of its
//! keywords occurs (case-insensitively) anywhere in the search text. No
//! ranking, no scoring, no result limit. Database order is preserved among
//! matches.

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;

/// Fixed sentinel returned when no record matches the search text.
pub const NO_RELEVANT_EXPERIENCE: &str =
    "No specific experiences from the database were found to be relevant.";

const CONTEXT_HEADER: &str = "--- Relevant Experiences from Personal Database ---";

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// A single STAR-format experience record. Immutable once loaded.
#[derive(Debug, Clone, Deserialize)]
pub struct ExperienceRecord {
    pub skill_or_ksc: String,
    pub keywords: Vec<String>,
    pub situation: String,
    pub task: String,
    pub action: String,
    pub result: String,
}

/// The ordered experience database. Loaded once at startup, never mutated.
/// No uniqueness constraint on skill_or_ksc or keywords.
#[derive(Debug, Clone, Default)]
pub struct ExperienceDb {
    records: Vec<ExperienceRecord>,
}

impl ExperienceDb {
    /// Loads the experience database from a YAML file containing an ordered
    /// list of records.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let file = std::fs::File::open(path).map_err(|e| {
            AppError::Configuration(format!(
                "Experience database not found at {}: {e}",
                path.display()
            ))
        })?;

        let records: Vec<ExperienceRecord> = serde_yaml::from_reader(file).map_err(|e| {
            AppError::Configuration(format!(
                "Malformed experience database at {}: {e}",
                path.display()
            ))
        })?;

        info!(
            "Loaded {} experience records from {}",
            records.len(),
            path.display()
        );

        Ok(Self { records })
    }

    pub fn from_records(records: Vec<ExperienceRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns the formatted relevance context for `search_text`.
    ///
    /// A record matches when any of its keywords occurs in the lowercased
    /// search text; the first matching keyword short-circuits the rest, so
    /// each record appears at most once. Zero matches yields the fixed
    /// sentinel message.
    pub fn find_relevant(&self, search_text: &str) -> String {
        let search_lower = search_text.to_lowercase();

        let matched: Vec<&ExperienceRecord> = self
            .records
            .iter()
            .filter(|record| {
                record
                    .keywords
                    .iter()
                    .any(|kw| search_lower.contains(&kw.to_lowercase()))
            })
            .collect();

        if matched.is_empty() {
            return NO_RELEVANT_EXPERIENCE.to_string();
        }

        let mut context = String::from(CONTEXT_HEADER);
        context.push('\n');
        for record in matched {
            context.push_str(&format!("\nSkill/KSC: {}\n", record.skill_or_ksc));
            context.push_str(&format!("Situation: {}\n", record.situation));
            context.push_str(&format!("Task: {}\n", record.task));
            context.push_str(&format!("Action: {}\n", record.action));
            context.push_str(&format!("Result: {}\n", record.result));
            context.push_str("---\n");
        }

        context
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn make_record(skill: &str, keywords: &[&str]) -> ExperienceRecord {
        ExperienceRecord {
            skill_or_ksc: skill.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            situation: format!("{skill} situation"),
            task: format!("{skill} task"),
            action: format!("{skill} action"),
            result: format!("{skill} result"),
        }
    }

    #[test]
    fn test_single_keyword_match_includes_record() {
        let db = ExperienceDb::from_records(vec![make_record("Python", &["python", "scripting"])]);
        let context = db.find_relevant("Looking for Python scripting expert");

        assert!(context.contains("Skill/KSC: Python"));
        assert!(context.contains("Python situation"));
        assert_eq!(
            context.matches("Skill/KSC: Python").count(),
            1,
            "Record must appear exactly once even when multiple keywords match"
        );
    }

    #[test]
    fn test_no_match_returns_sentinel() {
        let db = ExperienceDb::from_records(vec![make_record("Python", &["python", "scripting"])]);
        let context = db.find_relevant("Looking for a chef");

        assert_eq!(context, NO_RELEVANT_EXPERIENCE);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let db = ExperienceDb::from_records(vec![make_record("Kubernetes", &["KUBERNETES"])]);
        let context = db.find_relevant("experience with kubernetes clusters");

        assert!(context.contains("Skill/KSC: Kubernetes"));
    }

    #[test]
    fn test_database_order_preserved_among_matches() {
        let db = ExperienceDb::from_records(vec![
            make_record("Leadership", &["team"]),
            make_record("Python", &["python"]),
            make_record("Communication", &["stakeholder"]),
        ]);
        let context = db.find_relevant("python team player");

        let leadership = context.find("Skill/KSC: Leadership").unwrap();
        let python = context.find("Skill/KSC: Python").unwrap();
        assert!(
            leadership < python,
            "Matches must keep database order, not keyword order"
        );
        assert!(!context.contains("Communication"));
    }

    #[test]
    fn test_context_block_has_header_and_separators() {
        let db = ExperienceDb::from_records(vec![
            make_record("Python", &["python"]),
            make_record("SQL", &["sql"]),
        ]);
        let context = db.find_relevant("python and sql");

        assert!(context.starts_with(CONTEXT_HEADER));
        assert_eq!(
            context.matches("\n---\n").count(),
            2,
            "One separator per record"
        );
        assert!(context.contains("Situation: SQL situation"));
        assert!(context.contains("Result: SQL result"));
    }

    #[test]
    fn test_find_relevant_is_deterministic() {
        let db = ExperienceDb::from_records(vec![make_record("Python", &["python"])]);
        let a = db.find_relevant("python role");
        let b = db.find_relevant("python role");
        assert_eq!(a, b);
    }

    #[test]
    fn test_load_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
- skill_or_ksc: Python
  keywords: [python, scripting]
  situation: S1
  task: T1
  action: A1
  result: R1
"#
        )
        .unwrap();

        let db = ExperienceDb::load(file.path()).unwrap();
        assert_eq!(db.len(), 1);
        assert!(db.find_relevant("python").contains("Situation: S1"));
    }

    #[test]
    fn test_load_missing_file_is_configuration_error() {
        let result = ExperienceDb::load(Path::new("/nonexistent/experience.yaml"));
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_load_malformed_yaml_is_configuration_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not: [a, list, of").unwrap();

        let result = ExperienceDb::load(file.path());
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }
}
