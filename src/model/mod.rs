pub mod config;
pub mod report;
pub mod token;

pub use config::Config;
pub use report::{
    FocalPoint, ImageSurvey, InfringementAnalysis, InfringementReport, InfringementVerdict,
};
pub use token::TokenRecord;
