pub mod direct;
pub mod generation;
pub mod image;
pub mod llm;
pub mod report;
pub mod survey;
pub mod verdict;

pub use direct::DirectReportService;
pub use generation::{GenerationBackend, GenerationError};
pub use image::ImageFetcher;
pub use llm::LlmClient;
pub use report::{GenerationStrategy, ReportService};
pub use survey::FocalPointSurveyService;
pub use verdict::VerdictSynthesisService;
