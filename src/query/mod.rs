//! Query module - validation and rewriting of extracted SQL

pub mod rewriter;
pub mod validator;

pub use rewriter::{CollationRewriter, ExecutableQuery, QueryRewriter, COLLATION_CLAUSE};
pub use validator::{is_read_only, validate_query, QueryValidator, ValidatedQuery};
