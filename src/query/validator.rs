//! Query Validator - read-only allow-list
//!
//! A candidate passes only if, trimmed and uppercased, it starts with
//! `SELECT`. This is a prefix check, not a SQL grammar: statements disguised
//! behind comments or unusual leading characters are rejected rather than
//! parsed, and nothing after the keyword is inspected.

use std::fmt;

use crate::error::{PipelineError, PipelineResult};
use crate::llm::CandidateQuery;

/// Keyword every accepted statement must start with
pub const READ_ONLY_KEYWORD: &str = "SELECT";

/// A candidate proven to start with the read-only keyword
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedQuery(String);

impl ValidatedQuery {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ValidatedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Query Validator - enforces the read-only, single-statement policy
#[derive(Clone, Copy, Debug, Default)]
pub struct QueryValidator;

impl QueryValidator {
    pub fn new() -> Self {
        Self
    }

    /// Accept `candidate` or fail with `RejectedQuery` carrying its text
    pub fn validate(&self, candidate: CandidateQuery) -> PipelineResult<ValidatedQuery> {
        if is_read_only(candidate.as_str()) {
            Ok(ValidatedQuery(candidate.into_string()))
        } else {
            Err(PipelineError::rejected(candidate.into_string()))
        }
    }
}

/// Validate with the default validator
pub fn validate_query(candidate: CandidateQuery) -> PipelineResult<ValidatedQuery> {
    QueryValidator::new().validate(candidate)
}

/// Trimmed, uppercased prefix test
pub fn is_read_only(sql: &str) -> bool {
    sql.trim().to_uppercase().starts_with(READ_ONLY_KEYWORD)
}
