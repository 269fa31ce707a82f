//! SQLite-backed store
//!
//! Every call opens its own read-only connection and drops it before
//! returning, on success and on every error path.

use std::path::PathBuf;

use rusqlite::{Connection, OpenFlags};

use crate::error::{PipelineError, PipelineResult};
use crate::query::ExecutableQuery;
use crate::result_format::{build_row, format_value};
use crate::store::{DataStore, ResultSet};

#[derive(Clone, Debug)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Fresh read-only connection for one request
    fn connect(&self) -> PipelineResult<Connection> {
        Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| {
            tracing::warn!("Cannot open database {}: {}", self.path.display(), e);
            PipelineError::storage(e.to_string())
        })
    }
}

impl DataStore for SqliteStore {
    fn execute(&self, query: &ExecutableQuery) -> PipelineResult<ResultSet> {
        let conn = self.connect()?;
        run_query(&conn, query.as_str())
    }
}

/// Run one statement and collect every row
pub fn run_query(conn: &Connection, sql: &str) -> PipelineResult<ResultSet> {
    let mut stmt = conn.prepare(sql)?;
    let columns: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(str::to_string)
        .collect();

    let mut rows = stmt.query([])?;
    let mut results = ResultSet::new();
    while let Some(row) = rows.next()? {
        let values = (0..columns.len())
            .map(|idx| row.get_ref(idx).map(format_value))
            .collect::<rusqlite::Result<Vec<_>>>()?;
        results.push(build_row(&columns, values));
    }

    Ok(results)
}
