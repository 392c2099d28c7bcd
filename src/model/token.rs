//! Token catalog records produced by the case/metadata join

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One reviewable asset: a deduplicated fraud case joined with its resolved
/// preview image
///
/// The loader guarantees one record per `case_id` and a non-empty
/// `preview_url`; the URL itself is not content-type validated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TokenRecord {
    pub organization_name: String,
    pub chain: String,
    pub contract_address: String,
    pub token_id: String,
    pub token_status: String,
    pub case_id: String,
    pub report_status: String,
    pub preview_url: String,
}
