//! Single-stage report generation (alternate strategy)
//!
//! Combines extraction and verdict assignment into one image call. Cheaper
//! in round trips than the two-stage pipeline; the trade-off is that one
//! mid-sized vision model does both the looking and the judging.

use std::sync::Arc;

use rig::providers::openai;

use crate::model::InfringementReport;
use crate::service::generation::{
    GenerationBackend, GenerationError, GenerationInput, GenerationRequest, schema_value,
};

pub mod prompts;

use crate::service::direct::prompts::DIRECT_SYSTEM_PROMPT;

/// Environment variable for the single-stage model (defaults to gpt-4o-mini if not set)
const ENV_REPORT_MODEL: &str = "REPORT_MODEL";

/// Default model for single-stage generation
const DEFAULT_MODEL: &str = openai::GPT_4O_MINI;

const MAX_REPORT_TOKENS: u64 = 500;

/// Service for producing a full report from one image call
pub struct DirectReportService {
    backend: Arc<dyn GenerationBackend>,
    model: String,
}

impl DirectReportService {
    /// Create a new single-stage report service
    ///
    /// Uses a shared generation backend passed from startup. Optionally uses
    /// the REPORT_MODEL env var (defaults to gpt-4o-mini).
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        let model = std::env::var(ENV_REPORT_MODEL).unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        tracing::info!(
            model = %model,
            "Single-stage report service initialized"
        );

        Self { backend, model }
    }

    /// Produce a full infringement report from the image in one call
    pub async fn generate(&self, image_url: &str) -> Result<InfringementReport, GenerationError> {
        let start_time = std::time::Instant::now();

        tracing::debug!(
            model = %self.model,
            image_url = %image_url,
            "Initiating single-stage model call"
        );

        let request = GenerationRequest {
            model: self.model.clone(),
            preamble: DIRECT_SYSTEM_PROMPT.to_string(),
            input: GenerationInput::ImageUrl(image_url.to_string()),
            schema_name: "infringement_report",
            schema: schema_value::<InfringementReport>(),
            max_tokens: MAX_REPORT_TOKENS,
            // Deterministic output for reproducible reports
            temperature: Some(0.0),
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
                    "Single-stage model call failed"
                );
                return Err(e);
            }
        };

        let report: InfringementReport = serde_json::from_value(payload).map_err(|e| {
            GenerationError::Failed(format!("report response did not match schema: {}", e))
        })?;

        let elapsed = start_time.elapsed();
        tracing::info!(
            model = %self.model,
            elapsed_ms = elapsed.as_millis(),
            analyses = report.analysis.len(),
            "Single-stage report generation completed"
        );

        Ok(report)
    }
}
