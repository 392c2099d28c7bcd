//! Validation for synthesized reports
//!
//! Cardinality and order against the surveyed focal points are hard
//! invariants. The prompt's soft length targets ("about 10 words") are
//! guidance only and at most produce warnings.

use crate::model::{FocalPoint, InfringementReport};

/// Upper bound before a free-text field draws a verbosity warning
const VERBOSE_FIELD_WORDS: usize = 60;

/// Result of report validation
#[derive(Debug)]
pub struct ReportValidationResult {
    /// Whether the report passed validation
    pub is_valid: bool,
    /// Critical errors that make the report unusable
    pub errors: Vec<String>,
    /// Warnings that indicate potential quality issues
    pub warnings: Vec<String>,
}

impl ReportValidationResult {
    /// Create a new validation result with no issues
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Add an error to the validation result
    pub fn add_error(&mut self, error: String) {
        self.is_valid = false;
        self.errors.push(error);
    }

    /// Add a warning to the validation result
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }
}

/// Validate a synthesized report against the focal points that produced it
///
/// Checks:
/// 1. One analysis per focal point (cardinality)
/// 2. Analyses stay in focal-point order
/// 3. Required free-text fields are non-empty
/// 4. Soft length targets (warnings only)
pub fn validate_report(
    report: &InfringementReport,
    focal_points: &[FocalPoint],
) -> ReportValidationResult {
    let mut result = ReportValidationResult::valid();

    if report.analysis.len() != focal_points.len() {
        result.add_error(format!(
            "expected {} analyses, model returned {}",
            focal_points.len(),
            report.analysis.len()
        ));
        return result;
    }

    for (i, (analysis, focal_point)) in report.analysis.iter().zip(focal_points).enumerate() {
        if analysis.image_component != focal_point.image_component {
            // A label that belongs to a different focal point means the
            // model reordered its answers; a label nobody asked about is
            // just a paraphrase.
            if focal_points
                .iter()
                .any(|other| other.image_component == analysis.image_component)
            {
                result.add_error(format!(
                    "analysis {} is out of order: got '{}', expected '{}'",
                    i + 1,
                    analysis.image_component,
                    focal_point.image_component
                ));
            } else {
                result.add_warning(format!(
                    "analysis {} relabeled its focal point: got '{}', expected '{}'",
                    i + 1,
                    analysis.image_component,
                    focal_point.image_component
                ));
            }
        }

        if analysis.image_component.trim().is_empty() {
            result.add_error(format!("analysis {} has an empty image_component", i + 1));
        }

        if analysis.brand.trim().is_empty() {
            result.add_warning(format!("analysis {} has an empty brand", i + 1));
        }

        for (field, text) in [("relation", &analysis.relation), ("intent", &analysis.intent)] {
            if text.split_whitespace().count() > VERBOSE_FIELD_WORDS {
                result.add_warning(format!(
                    "analysis {} has a very long {} (> {} words)",
                    i + 1,
                    field,
                    VERBOSE_FIELD_WORDS
                ));
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{InfringementAnalysis, InfringementVerdict};

    fn focal_point(component: &str) -> FocalPoint {
        FocalPoint {
            image_component: component.to_string(),
            branded_content: "Primary Nike Swoosh logo".to_string(),
            details: "A white curved check mark on a red shoe".to_string(),
        }
    }

    fn analysis(component: &str) -> InfringementAnalysis {
        InfringementAnalysis {
            image_component: component.to_string(),
            branded_content: "Primary Nike Swoosh logo".to_string(),
            brand: "Nike".to_string(),
            relation: "Product photographed during daily use".to_string(),
            intent: "E-commerce product listing".to_string(),
            reason_for: None,
            reason_against: Some("Ordinary product photography".to_string()),
            verdict: InfringementVerdict::Coincidence,
        }
    }

    #[test]
    fn matching_report_is_valid() {
        let report = InfringementReport {
            analysis: vec![analysis("Main subject"), analysis("Background artwork")],
        };
        let focal_points = vec![focal_point("Main subject"), focal_point("Background artwork")];

        let result = validate_report(&report, &focal_points);
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn empty_report_for_empty_survey_is_valid() {
        let result = validate_report(&InfringementReport::default(), &[]);
        assert!(result.is_valid);
    }

    #[test]
    fn cardinality_mismatch_is_an_error() {
        let report = InfringementReport {
            analysis: vec![analysis("Main subject")],
        };
        let focal_points = vec![focal_point("Main subject"), focal_point("Background artwork")];

        let result = validate_report(&report, &focal_points);
        assert!(!result.is_valid);
        assert!(result.errors[0].contains("expected 2 analyses"));
    }

    #[test]
    fn reordered_analyses_are_an_error() {
        let report = InfringementReport {
            analysis: vec![analysis("Background artwork"), analysis("Main subject")],
        };
        let focal_points = vec![focal_point("Main subject"), focal_point("Background artwork")];

        let result = validate_report(&report, &focal_points);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.contains("out of order")));
    }

    #[test]
    fn paraphrased_labels_only_warn() {
        let report = InfringementReport {
            analysis: vec![analysis("The main subject of the image")],
        };
        let focal_points = vec![focal_point("Main subject")];

        let result = validate_report(&report, &focal_points);
        assert!(result.is_valid);
        assert!(result.warnings.iter().any(|w| w.contains("relabeled")));
    }
}
