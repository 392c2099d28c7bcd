//! Shared report schema used by both generation strategies
//!
//! These shapes are the single source of truth for the report contract: they
//! double as the strict response-schema declaration sent to the model backend
//! (via `JsonSchema`) and as the wire format returned by the API (via serde).

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Outcome category assigned to one analysis
///
/// Serializes to the canonical human-readable labels and never accepts
/// anything outside the closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, ToSchema)]
pub enum InfringementVerdict {
    Coincidence,
    #[serde(rename = "Fair Use: Commentary")]
    Commentary,
    #[serde(rename = "Fair Use: Parody")]
    Parody,
    #[serde(rename = "Fair Use: Transformative Use")]
    TransformativeUse,
    Infringement,
}

impl InfringementVerdict {
    /// All verdict categories, in display order
    pub const ALL: [InfringementVerdict; 5] = [
        InfringementVerdict::Coincidence,
        InfringementVerdict::Commentary,
        InfringementVerdict::Parody,
        InfringementVerdict::TransformativeUse,
        InfringementVerdict::Infringement,
    ];

    /// Canonical string label for this verdict
    pub fn label(&self) -> &'static str {
        match self {
            InfringementVerdict::Coincidence => "Coincidence",
            InfringementVerdict::Commentary => "Fair Use: Commentary",
            InfringementVerdict::Parody => "Fair Use: Parody",
            InfringementVerdict::TransformativeUse => "Fair Use: Transformative Use",
            InfringementVerdict::Infringement => "Infringement",
        }
    }

    /// Whether this verdict is one of the fair-use categories
    pub fn is_fair_use(&self) -> bool {
        matches!(
            self,
            InfringementVerdict::Commentary
                | InfringementVerdict::Parody
                | InfringementVerdict::TransformativeUse
        )
    }
}

impl fmt::Display for InfringementVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown verdict label: {0}")]
pub struct UnknownVerdict(String);

impl FromStr for InfringementVerdict {
    type Err = UnknownVerdict;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InfringementVerdict::ALL
            .iter()
            .find(|v| v.label() == s)
            .copied()
            .ok_or_else(|| UnknownVerdict(s.to_string()))
    }
}

/// One brand-relevant sub-region of an image, as identified by the
/// focal-point survey
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, ToSchema)]
pub struct FocalPoint {
    /// Portion of the image this description focuses on
    #[schemars(
        description = "The portion of the image this description focuses on, such as 'Small logo in the bottom right' or 'Background artwork'"
    )]
    pub image_component: String,

    /// The specific original work being used
    #[schemars(
        description = "The specific original content being used, such as 'Primary Nike Swoosh logo' or 'Pikachu character model'"
    )]
    pub branded_content: String,

    /// Long-form visual description of the component
    #[schemars(
        description = "A description of the image component detailed enough that a reader could redraw it"
    )]
    pub details: String,
}

/// Stage-1 envelope: the ordered focal points identified in one image
///
/// An empty sequence is a valid survey and means the image contained no
/// brand-relevant components.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema, ToSchema)]
pub struct ImageSurvey {
    pub focal_points: Vec<FocalPoint>,
}

/// One verdict-bearing analysis of a single image component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, ToSchema)]
pub struct InfringementAnalysis {
    /// Focal point of this analysis
    pub image_component: String,

    /// The specific original content suspected of being copied
    pub branded_content: String,

    /// Top-level brand behind the branded content
    #[schemars(
        description = "The top-level brand, for example 'Pokemon' for a 'Pikachu character model'"
    )]
    pub brand: String,

    /// Relationship between the image and the original branded content
    pub relation: String,

    /// Why somebody may have published an asset like this
    pub intent: String,

    /// Most compelling reason, if any, that this is infringing
    pub reason_for: Option<String>,

    /// Most compelling reason, if any, that this is fair use or coincidence
    pub reason_against: Option<String>,

    pub verdict: InfringementVerdict,
}

/// A full infringement report: zero or more analyses in focal-point order
///
/// A report with no analyses is valid and means no relevant components were
/// found.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema, ToSchema)]
pub struct InfringementReport {
    pub analysis: Vec<InfringementAnalysis>,
}

impl InfringementReport {
    pub fn is_empty(&self) -> bool {
        self.analysis.is_empty()
    }
}
