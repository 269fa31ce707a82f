//! SQL Extractor - pulls exactly one statement out of raw model output
//!
//! Two paths:
//! - `Fenced`: the response contains a ```sql ... ``` block; its body is used.
//! - `Fallback`: no such block; the whole trimmed response is used.
//!
//! Either way the body is cut at its first `;` and re-terminated with exactly
//! one `;`. Separators inside string literals and nested fences are not
//! recognised.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Statement separator
pub const STATEMENT_SEPARATOR: char = ';';

static SQL_FENCE: OnceLock<Regex> = OnceLock::new();

fn sql_fence() -> &'static Regex {
    SQL_FENCE.get_or_init(|| {
        // (?i) tag case, (?s) body may span lines, lazy body stops at the first closing fence
        Regex::new(r"(?is)```sql(.*?)```").expect("fence pattern is valid")
    })
}

/// Which extraction path a response took
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExtractionPath {
    Fenced,
    Fallback,
}

/// A single extracted statement, always terminated by exactly one `;`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateQuery(String);

impl CandidateQuery {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CandidateQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extract one candidate statement from a raw model response
pub fn extract_sql(raw: &str) -> CandidateQuery {
    extract_with_path(raw).0
}

/// Extract one candidate statement and report the path taken
pub fn extract_with_path(raw: &str) -> (CandidateQuery, ExtractionPath) {
    let (body, path) = match fenced_body(raw) {
        Some(body) => (body, ExtractionPath::Fenced),
        None => (fallback_body(raw), ExtractionPath::Fallback),
    };

    let mut statement = first_statement(body).trim().to_string();
    statement.push(STATEMENT_SEPARATOR);
    (CandidateQuery(statement), path)
}

/// Trimmed interior of the first ```sql block, if any
fn fenced_body(raw: &str) -> Option<&str> {
    sql_fence()
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

fn fallback_body(raw: &str) -> &str {
    first_statement(raw.trim())
}

/// Everything before the first separator
fn first_statement(body: &str) -> &str {
    body.split_once(STATEMENT_SEPARATOR)
        .map_or(body, |(head, _)| head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_block() {
        let raw = "Here is your query:\n```sql\nSELECT * FROM employees WHERE department = 'HR';\n```\nHope this helps!";
        let (candidate, path) = extract_with_path(raw);
        assert_eq!(path, ExtractionPath::Fenced);
        assert_eq!(candidate.as_str(), "SELECT * FROM employees WHERE department = 'HR';");
    }

    #[test]
    fn test_fenced_tag_is_case_insensitive() {
        let raw = "```SQL\n  SELECT name FROM employees\n```";
        let (candidate, path) = extract_with_path(raw);
        assert_eq!(path, ExtractionPath::Fenced);
        assert_eq!(candidate.as_str(), "SELECT name FROM employees;");
    }

    #[test]
    fn test_fenced_multiline_body_keeps_inner_newlines() {
        let raw = "```sql\nSELECT name,\n       salary\nFROM employees\n```";
        assert_eq!(
            extract_sql(raw).as_str(),
            "SELECT name,\n       salary\nFROM employees;"
        );
    }

    #[test]
    fn test_fenced_block_with_several_statements_keeps_first() {
        let raw = "```sql\nSELECT 1; DELETE FROM employees;\n```";
        assert_eq!(extract_sql(raw).as_str(), "SELECT 1;");
    }

    #[test]
    fn test_only_first_fenced_block_is_used() {
        let raw = "```sql\nSELECT id FROM employees\n```\nor\n```sql\nSELECT name FROM employees\n```";
        assert_eq!(extract_sql(raw).as_str(), "SELECT id FROM employees;");
    }

    #[test]
    fn test_fallback_takes_text_before_first_separator() {
        let raw = "  SELECT name FROM employees; SELECT 2; DROP TABLE employees;  ";
        let (candidate, path) = extract_with_path(raw);
        assert_eq!(path, ExtractionPath::Fallback);
        assert_eq!(candidate.as_str(), "SELECT name FROM employees;");
    }

    #[test]
    fn test_fallback_without_separator_appends_one() {
        assert_eq!(
            extract_sql("SELECT * FROM employees").as_str(),
            "SELECT * FROM employees;"
        );
    }

    #[test]
    fn test_untagged_fence_is_not_a_sql_block() {
        let raw = "```\nSELECT 1\n```";
        let (candidate, path) = extract_with_path(raw);
        assert_eq!(path, ExtractionPath::Fallback);
        assert_eq!(candidate.as_str(), "```\nSELECT 1\n```;");
    }

    #[test]
    fn test_empty_response() {
        assert_eq!(extract_sql("").as_str(), ";");
        assert_eq!(extract_sql("   \n\t ").as_str(), ";");
    }

    #[test]
    fn test_separator_only_response() {
        assert_eq!(extract_sql(";;;").as_str(), ";");
    }

    #[test]
    fn test_prose_passes_through_for_validator() {
        assert_eq!(extract_sql("please clarify").as_str(), "please clarify;");
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let inputs = [
            "```sql\nSELECT * FROM employees WHERE salary > 50000;\n```",
            "SELECT name FROM employees; SELECT 2;",
            "I cannot answer that",
            "",
            "```sql SELECT 1",
            "```Sql\nselect id from employees\n``` trailing; text",
        ];
        for raw in inputs {
            let once = extract_sql(raw);
            let twice = extract_sql(once.as_str());
            assert_eq!(once, twice, "input: {:?}", raw);
        }
    }

    #[test]
    fn test_candidate_ends_with_exactly_one_separator() {
        for raw in ["SELECT 1;;", "```sql\nSELECT 1;;\n```", "x"] {
            let candidate = extract_sql(raw);
            assert!(candidate.as_str().ends_with(';'));
            assert!(!candidate.as_str().ends_with(";;"));
        }
    }
}
