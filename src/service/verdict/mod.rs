//! Verdict synthesis service (stage 2)
//!
//! Feeds the focal-point descriptions, rendered as enumerated text blocks
//! with no image attached, to a reasoning-capable model and obtains one
//! verdict-bearing analysis per focal point. Keeping pixels out of this call
//! lets it run on a model that reasons better than it sees.

use std::sync::Arc;

use crate::model::{FocalPoint, InfringementReport};
use crate::service::generation::{
    GenerationBackend, GenerationError, GenerationInput, GenerationRequest, schema_value,
};

pub mod prompts;
pub mod validation;

use crate::service::verdict::prompts::{VERDICT_SYSTEM_PROMPT, build_verdict_prompt};

/// Environment variable for the verdict model (defaults to o1-preview if not set)
const ENV_VERDICT_MODEL: &str = "VERDICT_MODEL";

/// Default model for verdict synthesis; reasoning-capable, no vision needed
const DEFAULT_MODEL: &str = "o1-preview";

const MAX_REPORT_TOKENS: u64 = 1000;

/// Service for judging surveyed focal points
pub struct VerdictSynthesisService {
    backend: Arc<dyn GenerationBackend>,
    model: String,
}

impl VerdictSynthesisService {
    /// Create a new verdict synthesis service
    ///
    /// Uses a shared generation backend passed from startup. Optionally uses
    /// the VERDICT_MODEL env var (defaults to o1-preview).
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        let model = std::env::var(ENV_VERDICT_MODEL).unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        tracing::info!(
            model = %model,
            "Verdict synthesis service initialized"
        );

        Self { backend, model }
    }

    /// Produce one analysis per focal point, preserving input order
    pub async fn synthesize(
        &self,
        focal_points: &[FocalPoint],
    ) -> Result<InfringementReport, GenerationError> {
        let start_time = std::time::Instant::now();

        let prompt = build_verdict_prompt(focal_points);
        let prompt_length = prompt.len();

        tracing::debug!(
            model = %self.model,
            focal_points = focal_points.len(),
            prompt_length = prompt_length,
            "Initiating model call for verdict synthesis"
        );

        let request = GenerationRequest {
            model: self.model.clone(),
            preamble: VERDICT_SYSTEM_PROMPT.to_string(),
            input: GenerationInput::Text(prompt),
            schema_name: "infringement_report",
            schema: schema_value::<InfringementReport>(),
            max_tokens: MAX_REPORT_TOKENS,
            // The o1 family rejects the temperature parameter, so none is sent.
            temperature: None,
        };

        let payload = match self.backend.generate(request).await {
            Ok(payload) => payload,
            Err(e) => {
                let elapsed = start_time.elapsed();
                tracing::error!(
                    model = %self.model,
                    elapsed_ms = elapsed.as_millis(),
                    prompt_length = prompt_length,
                    error = %e,
                    "Model call for verdict synthesis failed"
                );
                return Err(e);
            }
        };

        let report: InfringementReport = serde_json::from_value(payload).map_err(|e| {
            GenerationError::Failed(format!("report response did not match schema: {}", e))
        })?;

        let validation_result = validation::validate_report(&report, focal_points);

        if !validation_result.is_valid {
            tracing::error!(
                model = %self.model,
                errors = ?validation_result.errors,
                "Verdict synthesis validation failed"
            );
            return Err(GenerationError::Failed(format!(
                "report validation failed: {}",
                validation_result.errors.join("; ")
            )));
        }

        if !validation_result.warnings.is_empty() {
            tracing::warn!(
                model = %self.model,
                warnings = ?validation_result.warnings,
                "Verdict synthesis produced quality warnings"
            );
        }

        let elapsed = start_time.elapsed();
        tracing::info!(
            model = %self.model,
            elapsed_ms = elapsed.as_millis(),
            analyses = report.analysis.len(),
            "Verdict synthesis completed"
        );

        Ok(report)
    }
}
