//! Report generation orchestration
//!
//! Owns the strategy split between the two-stage survey/verdict pipeline and
//! the direct single-call generator. The service is stateless: every call is
//! independent, and any caching of finished reports belongs to the caller.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::InfringementReport;
use crate::service::direct::DirectReportService;
use crate::service::generation::{GenerationBackend, GenerationError};
use crate::service::survey::FocalPointSurveyService;
use crate::service::verdict::VerdictSynthesisService;

/// Pipeline selection for one generation call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStrategy {
    /// Survey the image, then judge the focal points with a reasoning model
    #[default]
    TwoStage,
    /// One combined analyze-and-verdict call
    SingleStage,
}

/// Service generating infringement reports for one image at a time
pub struct ReportService {
    survey: FocalPointSurveyService,
    verdict: VerdictSynthesisService,
    direct: DirectReportService,
}

impl ReportService {
    /// Create a report service with all strategies sharing one backend
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self {
            survey: FocalPointSurveyService::new(Arc::clone(&backend)),
            verdict: VerdictSynthesisService::new(Arc::clone(&backend)),
            direct: DirectReportService::new(backend),
        }
    }

    /// Generate a report for one image with the selected strategy
    pub async fn generate(
        &self,
        image_url: &str,
        strategy: GenerationStrategy,
    ) -> Result<InfringementReport, GenerationError> {
        match strategy {
            GenerationStrategy::TwoStage => self.generate_two_stage(image_url).await,
            GenerationStrategy::SingleStage => self.direct.generate(image_url).await,
        }
    }

    async fn generate_two_stage(
        &self,
        image_url: &str,
    ) -> Result<InfringementReport, GenerationError> {
        let survey = self.survey.survey_image(image_url).await?;

        // No focal points means a clean empty report, not a second call.
        if survey.focal_points.is_empty() {
            tracing::info!(
                image_url = %image_url,
                "Survey found no brand-relevant focal points"
            );
            return Ok(InfringementReport::default());
        }

        self.verdict.synthesize(&survey.focal_points).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::{Value, json};

    use crate::model::InfringementVerdict;
    use crate::service::generation::{GenerationInput, GenerationRequest};

    /// Backend that replays scripted replies and records every request
    struct ScriptedBackend {
        replies: Mutex<VecDeque<Result<Value, GenerationError>>>,
        requests: Mutex<Vec<GenerationRequest>>,
    }

    impl ScriptedBackend {
        fn new(replies: Vec<Result<Value, GenerationError>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        fn request(&self, index: usize) -> GenerationRequest {
            self.requests.lock().unwrap()[index].clone()
        }
    }

    #[async_trait]
    impl GenerationBackend for ScriptedBackend {
        async fn generate(&self, request: GenerationRequest) -> Result<Value, GenerationError> {
            self.requests.lock().unwrap().push(request);
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GenerationError::Failed("no scripted reply".to_string())))
        }
    }

    fn survey_value(components: &[&str]) -> Value {
        json!({
            "focal_points": components
                .iter()
                .map(|component| {
                    json!({
                        "image_component": component,
                        "branded_content": "Primary Nike Swoosh logo",
                        "details": "A white curved check mark",
                    })
                })
                .collect::<Vec<_>>()
        })
    }

    fn report_value(components: &[&str]) -> Value {
        json!({
            "analysis": components
                .iter()
                .map(|component| {
                    json!({
                        "image_component": component,
                        "branded_content": "Primary Nike Swoosh logo",
                        "brand": "Nike",
                        "relation": "Product photographed during daily use",
                        "intent": "E-commerce product listing",
                        "reason_for": "Logo reproduced without alteration",
                        "reason_against": null,
                        "verdict": "Infringement",
                    })
                })
                .collect::<Vec<_>>()
        })
    }

    #[tokio::test]
    async fn two_stage_preserves_cardinality_and_order() {
        let backend = ScriptedBackend::new(vec![
            Ok(survey_value(&["Main subject", "Small logo", "Background artwork"])),
            Ok(report_value(&["Main subject", "Small logo", "Background artwork"])),
        ]);
        let service = ReportService::new(backend.clone());

        let report = service
            .generate("https://img.example/token.png", GenerationStrategy::TwoStage)
            .await
            .unwrap();

        assert_eq!(report.analysis.len(), 3);
        assert_eq!(report.analysis[0].image_component, "Main subject");
        assert_eq!(report.analysis[1].image_component, "Small logo");
        assert_eq!(report.analysis[2].image_component, "Background artwork");
        assert_eq!(report.analysis[0].verdict, InfringementVerdict::Infringement);
        assert_eq!(backend.request_count(), 2);
    }

    #[tokio::test]
    async fn two_stage_sends_image_then_text() {
        let backend = ScriptedBackend::new(vec![
            Ok(survey_value(&["Main subject"])),
            Ok(report_value(&["Main subject"])),
        ]);
        let service = ReportService::new(backend.clone());

        service
            .generate("https://img.example/token.png", GenerationStrategy::TwoStage)
            .await
            .unwrap();

        match backend.request(0).input {
            GenerationInput::ImageUrl(url) => assert_eq!(url, "https://img.example/token.png"),
            GenerationInput::Text(_) => panic!("survey stage must receive the image"),
        }
        match backend.request(1).input {
            GenerationInput::Text(prompt) => {
                assert!(prompt.contains("1. image_component: Main subject"));
            }
            GenerationInput::ImageUrl(_) => panic!("verdict stage must not receive the image"),
        }
    }

    #[tokio::test]
    async fn empty_survey_short_circuits_to_an_empty_report() {
        let backend = ScriptedBackend::new(vec![Ok(survey_value(&[]))]);
        let service = ReportService::new(backend.clone());

        let report = service
            .generate("https://img.example/token.png", GenerationStrategy::TwoStage)
            .await
            .unwrap();

        assert!(report.is_empty());
        assert_eq!(backend.request_count(), 1);
    }

    #[tokio::test]
    async fn survey_refusal_is_preserved_verbatim() {
        let refusal = "I'm sorry, but I can't analyze this image.";
        let backend =
            ScriptedBackend::new(vec![Err(GenerationError::Refused(refusal.to_string()))]);
        let service = ReportService::new(backend);

        let err = service
            .generate("https://img.example/token.png", GenerationStrategy::TwoStage)
            .await
            .unwrap_err();

        assert_eq!(err, GenerationError::Refused(refusal.to_string()));
    }

    #[tokio::test]
    async fn verdict_refusal_is_preserved_verbatim() {
        let refusal = "I cannot make a judgment about these descriptions.";
        let backend = ScriptedBackend::new(vec![
            Ok(survey_value(&["Main subject"])),
            Err(GenerationError::Refused(refusal.to_string())),
        ]);
        let service = ReportService::new(backend);

        let err = service
            .generate("https://img.example/token.png", GenerationStrategy::TwoStage)
            .await
            .unwrap_err();

        assert_eq!(err, GenerationError::Refused(refusal.to_string()));
    }

    #[tokio::test]
    async fn cardinality_mismatch_is_a_generic_failure() {
        let backend = ScriptedBackend::new(vec![
            Ok(survey_value(&["Main subject", "Small logo"])),
            Ok(report_value(&["Main subject"])),
        ]);
        let service = ReportService::new(backend);

        let err = service
            .generate("https://img.example/token.png", GenerationStrategy::TwoStage)
            .await
            .unwrap_err();

        match err {
            GenerationError::Failed(message) => assert!(message.contains("validation failed")),
            GenerationError::Refused(_) => panic!("a short report is not a refusal"),
        }
    }

    #[tokio::test]
    async fn schema_mismatch_is_a_generic_failure() {
        let backend = ScriptedBackend::new(vec![Ok(json!({"focal_points": "not a list"}))]);
        let service = ReportService::new(backend);

        let err = service
            .generate("https://img.example/token.png", GenerationStrategy::TwoStage)
            .await
            .unwrap_err();

        match err {
            GenerationError::Failed(message) => {
                assert!(message.contains("did not match schema"));
            }
            GenerationError::Refused(_) => panic!("a malformed payload is not a refusal"),
        }
    }

    #[tokio::test]
    async fn single_stage_uses_one_image_call() {
        let backend = ScriptedBackend::new(vec![Ok(report_value(&["Main subject"]))]);
        let service = ReportService::new(backend.clone());

        let report = service
            .generate("https://img.example/token.png", GenerationStrategy::SingleStage)
            .await
            .unwrap();

        assert_eq!(report.analysis.len(), 1);
        assert_eq!(backend.request_count(), 1);
        match backend.request(0).input {
            GenerationInput::ImageUrl(url) => assert_eq!(url, "https://img.example/token.png"),
            GenerationInput::Text(_) => panic!("single-stage must receive the image"),
        }
    }

    #[tokio::test]
    async fn single_stage_report_with_no_components_is_valid() {
        let backend = ScriptedBackend::new(vec![Ok(report_value(&[]))]);
        let service = ReportService::new(backend);

        let report = service
            .generate("https://img.example/token.png", GenerationStrategy::SingleStage)
            .await
            .unwrap();

        assert!(report.is_empty());
    }
}
