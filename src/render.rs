//! Presentation rendering for infringement reports
//!
//! A pure transform from a report to display blocks: each analysis becomes
//! one block tagged with an accent color for its verdict category, and an
//! empty report renders a distinct empty state instead of an empty container.

use serde::Serialize;
use utoipa::ToSchema;

use crate::model::{InfringementAnalysis, InfringementReport, InfringementVerdict};

/// Accent for confirmed infringement blocks (light red)
pub const INFRINGEMENT_ACCENT: &str = "#FFCDD2";
/// Accent for coincidental-similarity blocks (light green)
pub const COINCIDENCE_ACCENT: &str = "#C8E6C9";
/// Accent shared by all fair-use verdicts (light blue)
pub const FAIR_USE_ACCENT: &str = "#BBDEFB";

const EMPTY_REPORT_MESSAGE: &str = "No analyses available in the report.";

/// Accent color for a verdict category
pub fn verdict_accent(verdict: InfringementVerdict) -> &'static str {
    match verdict {
        InfringementVerdict::Infringement => INFRINGEMENT_ACCENT,
        InfringementVerdict::Coincidence => COINCIDENCE_ACCENT,
        InfringementVerdict::Commentary
        | InfringementVerdict::Parody
        | InfringementVerdict::TransformativeUse => FAIR_USE_ACCENT,
    }
}

/// Rendering payload for one report, consumable by any display layer
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ReportRendering {
    /// The report contained no analyses
    Empty { message: String },
    /// One block per analysis, in report order
    Analyses { blocks: Vec<AnalysisBlock> },
}

/// One display block for a single analysis
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AnalysisBlock {
    pub heading: String,
    pub accent_color: String,
    pub image_component: String,
    pub branded_content: String,
    pub brand: String,
    pub relation: String,
    pub intent: String,
    pub reason_for: Option<String>,
    pub reason_against: Option<String>,
    pub verdict: String,
}

/// Render a report into color-tagged display blocks
pub fn render_report(report: &InfringementReport) -> ReportRendering {
    if report.analysis.is_empty() {
        return ReportRendering::Empty {
            message: EMPTY_REPORT_MESSAGE.to_string(),
        };
    }

    let blocks = report
        .analysis
        .iter()
        .enumerate()
        .map(|(index, analysis)| render_analysis(index, analysis))
        .collect();

    ReportRendering::Analyses { blocks }
}

fn render_analysis(index: usize, analysis: &InfringementAnalysis) -> AnalysisBlock {
    AnalysisBlock {
        heading: format!("Analysis {}", index + 1),
        accent_color: verdict_accent(analysis.verdict).to_string(),
        image_component: analysis.image_component.clone(),
        branded_content: analysis.branded_content.clone(),
        brand: analysis.brand.clone(),
        relation: analysis.relation.clone(),
        intent: analysis.intent.clone(),
        reason_for: analysis.reason_for.clone(),
        reason_against: analysis.reason_against.clone(),
        verdict: analysis.verdict.to_string(),
    }
}
