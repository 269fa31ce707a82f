//! Shared fakes for pipeline and API tests
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use nl_query_engine::llm::{LanguageModel, PromptTemplate};
use nl_query_engine::query::{CollationRewriter, ExecutableQuery};
use nl_query_engine::store::{prepare_database, schema, DataStore, ResultSet, SqliteStore};
use nl_query_engine::{PipelineResult, QueryEngine};
use tempfile::TempDir;

/// Language model returning a canned response and recording prompts
pub struct FakeModel {
    response: Result<String, String>,
    prompts: Mutex<Vec<String>>,
}

impl FakeModel {
    pub fn replying(response: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(response.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Err(message.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for FakeModel {
    async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(anyhow::anyhow!(message.clone())),
        }
    }

    async fn health_check(&self) -> anyhow::Result<bool> {
        Ok(self.response.is_ok())
    }
}

/// Store that records every executed statement before delegating
pub struct SpyStore {
    inner: SqliteStore,
    executed: Mutex<Vec<String>>,
}

impl SpyStore {
    pub fn new(inner: SqliteStore) -> Arc<Self> {
        Arc::new(Self {
            inner,
            executed: Mutex::new(Vec::new()),
        })
    }

    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }
}

impl DataStore for SpyStore {
    fn execute(&self, query: &ExecutableQuery) -> PipelineResult<ResultSet> {
        self.executed.lock().unwrap().push(query.as_str().to_string());
        self.inner.execute(query)
    }
}

/// Temporary SQLite file seeded with the sample employees
pub struct SeededDb {
    _dir: TempDir,
    pub path: PathBuf,
}

pub fn seeded_db() -> SeededDb {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.db");
    prepare_database(&path).unwrap();
    SeededDb { _dir: dir, path }
}

/// Engine over a fresh seeded database with the default rewriter
pub fn engine_with(model: Arc<FakeModel>) -> (QueryEngine, Arc<SpyStore>, SeededDb) {
    let db = seeded_db();
    let store = SpyStore::new(SqliteStore::new(db.path.clone()));
    let engine = QueryEngine::new(
        model,
        store.clone(),
        Arc::new(CollationRewriter::default()),
        PromptTemplate::for_schema(&schema::describe(schema::TABLES)),
    );
    (engine, store, db)
}
