//! Case-Insensitivity Rewriter
//!
//! SQLite compares TEXT with BINARY collation, so `department = 'hr'` misses
//! `'HR'`. The rewriter turns every literal `<column> =` for the configured
//! text columns into `<column> COLLATE NOCASE =`.
//!
//! This is a substring rewrite, not an AST transform. It also fires inside
//! string literals or on longer identifiers ending in a configured name
//! (`department_name =` when `name` is configured). The rewritten form no
//! longer contains `<column> =`, so a second pass leaves it unchanged.

use std::fmt;

use crate::query::validator::ValidatedQuery;

/// SQLite collation clause for case-insensitive equality
pub const COLLATION_CLAUSE: &str = "COLLATE NOCASE";

/// Statement that is ready to run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutableQuery(String);

impl ExecutableQuery {
    /// Wrap SQL derived from `source`; requiring the validated query keeps
    /// unvalidated text from reaching a store
    pub(crate) fn derived_from(_source: &ValidatedQuery, sql: impl Into<String>) -> Self {
        Self(sql.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExecutableQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Turns a validated statement into the one that is executed
pub trait QueryRewriter: Send + Sync {
    fn rewrite(&self, query: &ValidatedQuery) -> ExecutableQuery;
}

/// Adds `COLLATE NOCASE` to equality comparisons on configured columns
#[derive(Clone, Debug)]
pub struct CollationRewriter {
    columns: Vec<String>,
}

impl CollationRewriter {
    /// Columns are applied in the given order; blank names are dropped
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns = columns
            .into_iter()
            .map(Into::into)
            .filter(|c: &String| !c.trim().is_empty())
            .collect();
        Self { columns }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rewrite raw SQL text
    pub fn rewrite_sql(&self, sql: &str) -> String {
        self.columns.iter().fold(sql.to_string(), |acc, column| {
            let pattern = format!("{} =", column);
            let replacement = format!("{} {} =", column, COLLATION_CLAUSE);
            acc.replace(&pattern, &replacement)
        })
    }
}

impl Default for CollationRewriter {
    fn default() -> Self {
        Self::new(["department", "name"])
    }
}

impl QueryRewriter for CollationRewriter {
    fn rewrite(&self, query: &ValidatedQuery) -> ExecutableQuery {
        ExecutableQuery::derived_from(query, self.rewrite_sql(query.as_str()))
    }
}
