//! Result shaping: SQLite values to JSON rows, rows to the response body
use rusqlite::types::ValueRef;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::store::{ResultSet, Row};

/// Message attached to an empty result set
pub const NO_RESULTS_MESSAGE: &str = "No matching data found for your query in the database.";

/// Response for one answered question
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    /// SQL as extracted from the model output, before rewriting
    pub query: String,
    /// Rows in engine order, columns in projection order
    pub results: ResultSet,
    /// Present only when `results` is empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl QueryResponse {
    pub fn from_results(query: impl Into<String>, results: ResultSet) -> Self {
        let message = if results.is_empty() {
            Some(NO_RESULTS_MESSAGE.to_string())
        } else {
            None
        };
        Self {
            query: query.into(),
            results,
            message,
        }
    }

    pub fn row_count(&self) -> usize {
        self.results.len()
    }
}

/// Format a single SQLite value
pub fn format_value(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        // NaN/inf have no JSON form
        ValueRef::Real(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        ValueRef::Text(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => Value::Array(bytes.iter().map(|b| Value::from(*b)).collect()),
    }
}

/// Zip column names with one row of values, keeping column order
pub fn build_row<I>(columns: &[String], values: I) -> Row
where
    I: IntoIterator<Item = Value>,
{
    columns.iter().cloned().zip(values).collect()
}
