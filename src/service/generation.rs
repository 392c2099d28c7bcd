//! Capability interface for structured model generation
//!
//! Both pipeline stages and the single-stage generator go through this trait,
//! so tests can substitute a scripted backend without any network access.

use async_trait::async_trait;
use schemars::{JsonSchema, schema_for};
use serde_json::Value;

/// Failure split for generation calls
///
/// A refusal is the backend declining to analyze; it carries the backend's
/// own words verbatim and is recoverable by the caller. Everything else is a
/// generic transport or schema failure. No retries happen at this layer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerationError {
    #[error("{0}")]
    Refused(String),

    #[error("generation failed: {0}")]
    Failed(String),
}

/// Input payload for one generation call
#[derive(Debug, Clone)]
pub enum GenerationInput {
    /// Direct image URL, sent to the backend as image content
    ImageUrl(String),
    /// Plain prompt text
    Text(String),
}

/// One outbound structured-generation request
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub model: String,
    /// Fixed system instruction for the call
    pub preamble: String,
    pub input: GenerationInput,
    /// Name under which the response schema is declared to the backend
    pub schema_name: &'static str,
    /// Strict response-schema declaration
    pub schema: Value,
    pub max_tokens: u64,
    /// Omitted for models that reject the parameter
    pub temperature: Option<f64>,
}

/// A backend able to run one structured generation call
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Run the call and return the schema-conforming JSON payload
    async fn generate(&self, request: GenerationRequest) -> Result<Value, GenerationError>;
}

/// JSON Schema declaration for an extractable shape
pub fn schema_value<T: JsonSchema>() -> Value {
    serde_json::to_value(schema_for!(T)).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
}
