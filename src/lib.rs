//! # NL Query Engine
//!
//! Turns a natural-language question into one read-only SQLite query,
//! runs it and returns the rows.
//!
//! ```text
//! question -> prompt -> language model -> extract -> validate
//!          -> rewrite (COLLATE NOCASE) -> execute -> response
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nl_query_engine::{AppConfig, QueryEngine};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = AppConfig::from_env()?;
//! nl_query_engine::store::prepare_database(&config.database.path)?;
//!
//! let engine = QueryEngine::from_config(&config);
//! let response = engine.ask("Show employees in HR").await?;
//! println!("{} -> {} rows", response.query, response.results.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod llm;
pub mod logging;
pub mod query;
pub mod result_format;
pub mod store;
pub mod web;

// Public API - Main types users need
pub use config::AppConfig;
pub use engine::{PreparedQuery, QueryEngine};
pub use result_format::{QueryResponse, NO_RESULTS_MESSAGE};

// Re-export commonly used error types
pub use error::{PipelineError, PipelineResult};
