//! REST API endpoints for report generation and lookup
//!
//! This layer owns the session report cache: one slot per token index, last
//! write wins. The generation services themselves stay stateless.

use actix_web::{HttpResponse, get, post, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::error::ApiError;
use crate::app::{AppState, StoredReport};
use crate::model::InfringementReport;
use crate::render::{ReportRendering, render_report};
use crate::service::GenerationStrategy;

/// Query parameters for report generation
#[derive(Debug, Deserialize, IntoParams)]
pub struct GenerateReportParams {
    /// Pipeline to run (default: two_stage)
    pub strategy: Option<GenerationStrategy>,
}

/// A generated report with its rendering
#[derive(Debug, Serialize, ToSchema)]
pub struct ReportResponse {
    pub index: usize,
    pub strategy: GenerationStrategy,
    /// RFC 3339 timestamp of when this report was generated
    pub generated_at: String,
    pub report: InfringementReport,
    pub rendering: ReportRendering,
}

impl ReportResponse {
    fn from_stored(index: usize, stored: &StoredReport) -> Self {
        Self {
            index,
            strategy: stored.strategy,
            generated_at: stored.generated_at.to_rfc3339(),
            report: stored.report.clone(),
            rendering: render_report(&stored.report),
        }
    }
}

/// Generate an infringement report for one token
///
/// Replaces any previously cached report for the same index.
#[utoipa::path(
    post,
    path = "/v1/tokens/{index}/report",
    params(
        ("index" = usize, Path, description = "Zero-based token index"),
        GenerateReportParams
    ),
    responses(
        (status = 200, description = "Report generated", body = ReportResponse),
        (status = 404, description = "Token not found"),
        (status = 422, description = "The model declined to analyze the image"),
        (status = 502, description = "Report generation failed")
    ),
    tag = "reports"
)]
#[post("/v1/tokens/{index}/report")]
pub async fn generate_report(
    state: web::Data<AppState>,
    path: web::Path<usize>,
    query: web::Query<GenerateReportParams>,
) -> Result<HttpResponse, ApiError> {
    let index = path.into_inner();
    let token = state
        .token(index)
        .cloned()
        .ok_or(ApiError::TokenNotFound(index))?;

    let strategy = query.strategy.unwrap_or_default();

    tracing::info!(
        index = index,
        case_id = %token.case_id,
        strategy = ?strategy,
        "Generating infringement report"
    );

    let report = state
        .report_service
        .generate(&token.preview_url, strategy)
        .await?;

    let stored = StoredReport {
        report,
        strategy,
        generated_at: Utc::now(),
    };
    let response = ReportResponse::from_stored(index, &stored);
    state.store_report(index, stored);

    Ok(HttpResponse::Ok().json(response))
}

/// Get the cached report for one token
#[utoipa::path(
    get,
    path = "/v1/tokens/{index}/report",
    params(
        ("index" = usize, Path, description = "Zero-based token index")
    ),
    responses(
        (status = 200, description = "Cached report", body = ReportResponse),
        (status = 404, description = "Token not found or no report generated yet")
    ),
    tag = "reports"
)]
#[get("/v1/tokens/{index}/report")]
pub async fn get_report(
    state: web::Data<AppState>,
    path: web::Path<usize>,
) -> Result<HttpResponse, ApiError> {
    let index = path.into_inner();
    if state.token(index).is_none() {
        return Err(ApiError::TokenNotFound(index));
    }

    let stored = state
        .cached_report(index)
        .ok_or(ApiError::ReportNotFound(index))?;

    Ok(HttpResponse::Ok().json(ReportResponse::from_stored(index, &stored)))
}

/// Configure report routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(generate_report).service(get_report);
}
