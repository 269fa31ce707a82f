//! Prompt template for SQL generation

/// Placeholder replaced by the user's question
const QUESTION_SLOT: &str = "{question}";

/// Placeholder replaced by the schema description
const SCHEMA_SLOT: &str = "{schema}";

const DEFAULT_TEMPLATE: &str = "You are an expert SQL generator for SQLite. \
Generate a valid SQL query using the exact table and column names in lowercase.\n\
Use only SELECT statements. Do not add explanations.\n\n\
Database schema:\n\
{schema}\n\n\
Question: {question}\nSQL Query:";

/// Fixed prompt template with the schema already embedded
#[derive(Clone, Debug)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    /// Build the default SQLite prompt around a schema description
    pub fn for_schema(schema_description: &str) -> Self {
        Self::from_template(DEFAULT_TEMPLATE, schema_description)
    }

    /// Build from a custom template containing `{schema}` and `{question}`
    pub fn from_template(template: &str, schema_description: &str) -> Self {
        Self {
            template: template.replace(SCHEMA_SLOT, schema_description.trim_end()),
        }
    }

    /// Render the final prompt for one question
    pub fn render(&self, question: &str) -> String {
        self.template.replace(QUESTION_SLOT, question)
    }
}
