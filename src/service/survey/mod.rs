//! Focal-point survey service (stage 1)
//!
//! Sends the image to a vision-capable model and extracts the ordered
//! focal points that use branded content. The prompt biases the model toward
//! generous decomposition; marginal components are welcome because stage 2
//! judges each one independently.

use std::sync::Arc;

use rig::providers::openai;

use crate::model::ImageSurvey;
use crate::service::generation::{
    GenerationBackend, GenerationError, GenerationInput, GenerationRequest, schema_value,
};

pub mod prompts;

use crate::service::survey::prompts::SURVEY_SYSTEM_PROMPT;

/// Environment variable for the survey model (defaults to gpt-4o if not set)
const ENV_SURVEY_MODEL: &str = "SURVEY_MODEL";

/// Default model for the survey stage; needs vision, not deep reasoning
const DEFAULT_MODEL: &str = openai::GPT_4O;

const MAX_SURVEY_TOKENS: u64 = 1000;

/// Service for identifying brand-relevant focal points in an image
pub struct FocalPointSurveyService {
    backend: Arc<dyn GenerationBackend>,
    model: String,
}

impl FocalPointSurveyService {
    /// Create a new survey service
    ///
    /// Uses a shared generation backend passed from startup. Optionally uses
    /// the SURVEY_MODEL env var (defaults to gpt-4o).
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        let model = std::env::var(ENV_SURVEY_MODEL).unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        tracing::info!(
            model = %model,
            "Focal-point survey service initialized"
        );

        Self { backend, model }
    }

    /// Identify the brand-relevant focal points of one image
    ///
    /// An empty survey is a valid outcome and means the image contains no
    /// components worth judging.
    pub async fn survey_image(&self, image_url: &str) -> Result<ImageSurvey, GenerationError> {
        let start_time = std::time::Instant::now();

        tracing::debug!(
            model = %self.model,
            image_url = %image_url,
            "Initiating model call for focal-point survey"
        );

        let request = GenerationRequest {
            model: self.model.clone(),
            preamble: SURVEY_SYSTEM_PROMPT.to_string(),
            input: GenerationInput::ImageUrl(image_url.to_string()),
            schema_name: "image_survey",
            schema: schema_value::<ImageSurvey>(),
            max_tokens: MAX_SURVEY_TOKENS,
            temperature: None,
        };

        let payload = match self.backend.generate(request).await {
            Ok(payload) => payload,
            Err(e) => {
                let elapsed = start_time.elapsed();
                tracing::error!(
                    model = %self.model,
                    image_url = %image_url,
                    elapsed_ms = elapsed.as_millis(),
                    error = %e,
                    "Model call for focal-point survey failed"
                );
                return Err(e);
            }
        };

        let survey: ImageSurvey = serde_json::from_value(payload).map_err(|e| {
            GenerationError::Failed(format!("survey response did not match schema: {}", e))
        })?;

        let elapsed = start_time.elapsed();
        tracing::info!(
            model = %self.model,
            image_url = %image_url,
            elapsed_ms = elapsed.as_millis(),
            focal_points = survey.focal_points.len(),
            "Focal-point survey completed"
        );

        Ok(survey)
    }
}
