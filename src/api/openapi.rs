//! OpenAPI specification endpoints

use actix_web::{HttpResponse, Responder, get};
use utoipa::OpenApi;

use crate::api::{health, reports, tokens};
use crate::model::report::{InfringementAnalysis, InfringementReport, InfringementVerdict};
use crate::model::token::TokenRecord;
use crate::render::{AnalysisBlock, ReportRendering};
use crate::service::GenerationStrategy;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Markwatch API",
        description = "Brand infringement intelligence for tokenized digital assets"
    ),
    paths(
        health::liveness,
        health::readiness,
        tokens::list_tokens,
        tokens::get_token,
        tokens::get_token_image,
        reports::generate_report,
        reports::get_report,
    ),
    components(schemas(
        health::HealthStatus,
        health::ReadinessStatus,
        health::DependencyHealth,
        tokens::TokenListResponse,
        tokens::TokenDetailResponse,
        reports::ReportResponse,
        TokenRecord,
        InfringementReport,
        InfringementAnalysis,
        InfringementVerdict,
        ReportRendering,
        AnalysisBlock,
        GenerationStrategy,
    )),
    tags(
        (name = "health", description = "Service health probes"),
        (name = "tokens", description = "Token catalog and preview images"),
        (name = "reports", description = "Infringement report generation")
    )
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
#[get("/openapi.json")]
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Serve OpenAPI YAML specification
#[get("/openapi.yaml")]
pub async fn openapi_yaml() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/yaml")
        .body(ApiDoc::openapi().to_yaml().unwrap())
}

/// Configure OpenAPI routes
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(openapi_json).service(openapi_yaml);
}
