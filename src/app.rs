//! Application state and service initialization
//!
//! This module centralizes service initialization and dependency injection,
//! and owns the one piece of mutable session state in the system: the report
//! cache keyed by token index.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use crate::loader;
use crate::model::{Config, InfringementReport, TokenRecord};
use crate::service::{GenerationStrategy, ImageFetcher, LlmClient, ReportService};

/// A generated report retained for one token index
#[derive(Debug, Clone)]
pub struct StoredReport {
    pub report: InfringementReport,
    pub strategy: GenerationStrategy,
    pub generated_at: DateTime<Utc>,
}

/// Application state shared across handlers
pub struct AppState {
    /// Token catalog from the case/metadata join, addressed by position
    pub catalog: Vec<TokenRecord>,
    /// Session cache of generated reports: one slot per token index, last
    /// write wins, no eviction
    reports: RwLock<HashMap<usize, StoredReport>>,
    /// Report generation service (stateless)
    pub report_service: ReportService,
    /// Preview image fetcher
    pub image_fetcher: ImageFetcher,
}

impl AppState {
    /// Initialize all services and build application state
    ///
    /// This performs:
    /// 1. Token catalog loading (CSV dedupe + image join)
    /// 2. LLM client initialization (requires OPENAI_API_KEY)
    /// 3. Service construction
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let catalog = loader::load_case_tokens(
            Path::new(&config.data.case_file),
            Path::new(&config.data.token_metadata_file),
        )
        .map_err(|e| AppError::CatalogLoad(e.to_string()))?;

        tracing::info!(tokens = catalog.len(), "Token catalog loaded");

        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| AppError::MissingConfig("OPENAI_API_KEY"))?;

        let llm_client =
            LlmClient::new(&api_key).map_err(|_| AppError::InvalidConfig("Invalid OPENAI_API_KEY"))?;

        let report_service = ReportService::new(Arc::new(llm_client));

        Ok(Self {
            catalog,
            reports: RwLock::new(HashMap::new()),
            report_service,
            image_fetcher: ImageFetcher::new(),
        })
    }

    /// Token record at a catalog index
    pub fn token(&self, index: usize) -> Option<&TokenRecord> {
        self.catalog.get(index)
    }

    /// Store a generated report for a token index (last write wins)
    pub fn store_report(&self, index: usize, stored: StoredReport) {
        self.reports
            .write()
            .expect("report cache lock poisoned")
            .insert(index, stored);
    }

    /// Cached report for a token index, if one was generated this session
    pub fn cached_report(&self, index: usize) -> Option<StoredReport> {
        self.reports
            .read()
            .expect("report cache lock poisoned")
            .get(&index)
            .cloned()
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    /// Token catalog could not be loaded
    #[error("Failed to load token catalog: {0}")]
    CatalogLoad(String),

    /// Missing required configuration
    #[error("Missing required configuration: {0}")]
    MissingConfig(&'static str),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use serde_json::Value;

    use crate::service::GenerationBackend;
    use crate::service::generation::{GenerationError, GenerationRequest};

    struct NullBackend;

    #[async_trait]
    impl GenerationBackend for NullBackend {
        async fn generate(&self, _request: GenerationRequest) -> Result<Value, GenerationError> {
            Err(GenerationError::Failed("not under test".to_string()))
        }
    }

    fn state_with_empty_catalog() -> AppState {
        AppState {
            catalog: Vec::new(),
            reports: RwLock::new(HashMap::new()),
            report_service: ReportService::new(Arc::new(NullBackend)),
            image_fetcher: ImageFetcher::new(),
        }
    }

    #[test]
    fn report_cache_keeps_one_slot_per_index_last_write_wins() {
        let state = state_with_empty_catalog();

        let first = StoredReport {
            report: InfringementReport::default(),
            strategy: GenerationStrategy::TwoStage,
            generated_at: Utc::now(),
        };
        let second = StoredReport {
            report: InfringementReport::default(),
            strategy: GenerationStrategy::SingleStage,
            generated_at: Utc::now(),
        };

        state.store_report(3, first);
        state.store_report(3, second);

        let cached = state.cached_report(3).unwrap();
        assert_eq!(cached.strategy, GenerationStrategy::SingleStage);
        assert!(state.cached_report(0).is_none());
    }
}
