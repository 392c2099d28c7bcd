//! REST API endpoints for the token catalog

use actix_web::{HttpResponse, get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::error::ApiError;
use crate::app::AppState;
use crate::model::TokenRecord;

/// Full catalog response
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenListResponse {
    pub total: usize,
    pub tokens: Vec<TokenRecord>,
}

/// One token with its session report state
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenDetailResponse {
    pub index: usize,
    pub token: TokenRecord,
    /// Whether a report was generated for this token in the current session
    pub has_report: bool,
}

/// List all reviewable tokens
#[utoipa::path(
    get,
    path = "/v1/tokens",
    responses(
        (status = 200, description = "Token catalog", body = TokenListResponse)
    ),
    tag = "tokens"
)]
#[get("/v1/tokens")]
pub async fn list_tokens(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(TokenListResponse {
        total: state.catalog.len(),
        tokens: state.catalog.clone(),
    })
}

/// Get one token by catalog index
#[utoipa::path(
    get,
    path = "/v1/tokens/{index}",
    params(
        ("index" = usize, Path, description = "Zero-based token index")
    ),
    responses(
        (status = 200, description = "Token detail", body = TokenDetailResponse),
        (status = 404, description = "Token not found")
    ),
    tag = "tokens"
)]
#[get("/v1/tokens/{index}")]
pub async fn get_token(
    state: web::Data<AppState>,
    path: web::Path<usize>,
) -> Result<HttpResponse, ApiError> {
    let index = path.into_inner();
    let token = state
        .token(index)
        .cloned()
        .ok_or(ApiError::TokenNotFound(index))?;

    Ok(HttpResponse::Ok().json(TokenDetailResponse {
        index,
        token,
        has_report: state.cached_report(index).is_some(),
    }))
}

/// Relay the preview image for one token
#[utoipa::path(
    get,
    path = "/v1/tokens/{index}/image",
    params(
        ("index" = usize, Path, description = "Zero-based token index")
    ),
    responses(
        (status = 200, description = "Preview image bytes"),
        (status = 404, description = "Token not found"),
        (status = 502, description = "Upstream image host failure")
    ),
    tag = "tokens"
)]
#[get("/v1/tokens/{index}/image")]
pub async fn get_token_image(
    state: web::Data<AppState>,
    path: web::Path<usize>,
) -> Result<HttpResponse, ApiError> {
    let index = path.into_inner();
    let token = state
        .token(index)
        .cloned()
        .ok_or(ApiError::TokenNotFound(index))?;

    let image = state.image_fetcher.fetch(&token.preview_url).await?;

    Ok(HttpResponse::Ok()
        .content_type(image.content_type)
        .body(image.bytes))
}

/// Configure token routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_tokens)
        .service(get_token)
        .service(get_token_image);
}
