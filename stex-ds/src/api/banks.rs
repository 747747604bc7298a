//! Registered extractor listing

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

/// One registry entry as reported to callers
#[derive(Debug, Serialize)]
pub struct BankInfo {
    pub key: String,
    pub label: String,
}

/// Extractor listing response
#[derive(Debug, Serialize)]
pub struct ExtractorListResponse {
    pub count: usize,
    pub banks: Vec<BankInfo>,
}

/// GET /extractors
///
/// Lists the bank keys the service can dispatch to, sorted by key.
pub async fn list_extractors(State(state): State<AppState>) -> Json<ExtractorListResponse> {
    let banks: Vec<BankInfo> = state
        .registry
        .iter()
        .map(|extractor| BankInfo {
            key: extractor.key().to_string(),
            label: extractor.label().to_string(),
        })
        .collect();

    Json(ExtractorListResponse {
        count: banks.len(),
        banks,
    })
}
