//! Question -> SQL -> rows pipeline
//!
//! `QueryEngine` owns no global state: the model, store, rewriter and prompt
//! are passed in, so each collaborator can be swapped for a fake.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::llm::{extract_with_path, ExtractionPath, LanguageModel, OllamaClient, PromptTemplate};
use crate::query::{CollationRewriter, ExecutableQuery, QueryRewriter, QueryValidator};
use crate::result_format::QueryResponse;
use crate::store::{schema, DataStore, ResultSet, SqliteStore};

/// A question translated into SQL, not yet executed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedQuery {
    /// Extracted SQL, reported back to the caller
    pub generated: String,
    /// Which extraction path produced `generated`
    pub path: ExtractionPath,
    /// Rewritten SQL, the text that actually runs
    pub executable: ExecutableQuery,
}

/// Main pipeline interface
pub struct QueryEngine {
    model: Arc<dyn LanguageModel>,
    store: Arc<dyn DataStore>,
    rewriter: Arc<dyn QueryRewriter>,
    validator: QueryValidator,
    prompt: PromptTemplate,
}

impl QueryEngine {
    pub fn new(
        model: Arc<dyn LanguageModel>,
        store: Arc<dyn DataStore>,
        rewriter: Arc<dyn QueryRewriter>,
        prompt: PromptTemplate,
    ) -> Self {
        Self {
            model,
            store,
            rewriter,
            validator: QueryValidator::new(),
            prompt,
        }
    }

    /// Ollama model, SQLite store, collation rewriter, employees prompt
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            Arc::new(OllamaClient::from_config(&config.llm)),
            Arc::new(SqliteStore::new(config.database.path.clone())),
            Arc::new(CollationRewriter::new(config.rewrite.text_columns.clone())),
            PromptTemplate::for_schema(&schema::describe(schema::TABLES)),
        )
    }

    /// Answer one question end to end
    pub async fn ask(&self, question: &str) -> PipelineResult<QueryResponse> {
        let prepared = self.prepare(question).await?;
        let results = self.execute(prepared.executable).await?;

        let response = QueryResponse::from_results(prepared.generated, results);
        tracing::info!("Query returned {} rows", response.row_count());
        Ok(response)
    }

    /// Ask the model, extract, validate and rewrite; the store is not touched
    pub async fn prepare(&self, question: &str) -> PipelineResult<PreparedQuery> {
        if question.is_empty() {
            return Err(PipelineError::invalid_request("question must not be empty"));
        }

        let prompt = self.prompt.render(question);
        let raw = self.model.generate(&prompt).await?;
        tracing::debug!("Raw model response: {}", raw);

        let (candidate, path) = extract_with_path(&raw);
        let generated = candidate.as_str().to_string();
        tracing::info!("Generated SQL ({:?}): {}", path, generated);

        let validated = self.validator.validate(candidate).map_err(|e| {
            tracing::warn!("Rejected generated SQL: {}", generated);
            e
        })?;

        let executable = self.rewriter.rewrite(&validated);
        if executable.as_str() != generated {
            tracing::info!("Rewritten SQL: {}", executable);
        }

        Ok(PreparedQuery {
            generated,
            path,
            executable,
        })
    }

    /// Whether the language model backend is reachable
    pub async fn model_available(&self) -> bool {
        match self.model.health_check().await {
            Ok(available) => available,
            Err(e) => {
                tracing::warn!("Model health check failed: {:#}", e);
                false
            }
        }
    }

    /// Run an executable query on a blocking thread
    pub async fn execute(&self, query: ExecutableQuery) -> PipelineResult<ResultSet> {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || store.execute(&query))
            .await
            .map_err(|e| PipelineError::execution(format!("query task failed: {}", e)))?
    }
}
