//! Shared LLM client and the production generation backend
//!
//! Wraps the OpenAI provider and implements [`GenerationBackend`] on top of
//! strict response schemas. Under a strict schema the backend either emits
//! schema-conforming JSON or declines in plain text, so a non-JSON reply is
//! the refusal channel and is surfaced verbatim.

use async_trait::async_trait;
use rig::OneOrMany;
use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::completion::message::{ContentFormat, ImageDetail, Message, UserContent};
use rig::providers::openai;
use serde_json::Value;

use crate::service::generation::{
    GenerationBackend, GenerationError, GenerationInput, GenerationRequest,
};

/// Shared LLM client wrapper
#[derive(Clone)]
pub struct LlmClient {
    client: openai::Client,
}

impl LlmClient {
    /// Create a new LLM client with the provided API key
    pub fn new(api_key: &str) -> Result<Self, String> {
        let client = openai::Client::new(api_key);

        Ok(Self { client })
    }
}

#[async_trait]
impl GenerationBackend for LlmClient {
    async fn generate(&self, request: GenerationRequest) -> Result<Value, GenerationError> {
        let mut builder = self
            .client
            .agent(&request.model)
            .preamble(&request.preamble)
            .max_tokens(request.max_tokens)
            .additional_params(serde_json::json!({
                "response_format": {
                    "type": "json_schema",
                    "json_schema": {
                        "name": request.schema_name,
                        "strict": true,
                        "schema": request.schema,
                    },
                },
            }));

        if let Some(temperature) = request.temperature {
            builder = builder.temperature(temperature);
        }

        let agent = builder.build();

        let message = match request.input {
            GenerationInput::Text(prompt) => Message::user(prompt),
            GenerationInput::ImageUrl(url) => Message::User {
                content: OneOrMany::one(UserContent::image(
                    url,
                    Some(ContentFormat::String),
                    None,
                    Some(ImageDetail::Auto),
                )),
            },
        };

        let reply = agent
            .prompt(message)
            .await
            .map_err(|e| GenerationError::Failed(e.to_string()))?;

        parse_structured_reply(&reply)
    }
}

/// Split a reply under the strict-schema contract: JSON objects are payloads,
/// anything else is the backend declining and is preserved as refusal text.
fn parse_structured_reply(reply: &str) -> Result<Value, GenerationError> {
    let trimmed = reply.trim();
    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) if value.is_object() => Ok(value),
        _ => Err(GenerationError::Refused(trimmed.to_string())),
    }
}
