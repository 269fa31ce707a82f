//! Data store - executes rewritten queries

pub mod schema;
pub mod seed;
pub mod sqlite;

use crate::error::PipelineResult;
use crate::query::ExecutableQuery;

pub use seed::{prepare_database, SeedOutcome};
pub use sqlite::SqliteStore;

/// One result row: column name -> value, in projection order
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Rows in the order the engine returned them
pub type ResultSet = Vec<Row>;

/// Executes one statement and returns every row, or the engine's error.
///
/// Implementations own connection handling: a connection acquired inside
/// `execute` must be released before it returns, whatever the outcome.
pub trait DataStore: Send + Sync {
    fn execute(&self, query: &ExecutableQuery) -> PipelineResult<ResultSet>;
}
