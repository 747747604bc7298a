//! Statement extraction endpoint
//!
//! POST /extract with multipart fields `bank` and `file`. The upload is
//! staged to a request-scoped temp file, handed to the bank's extractor on
//! the blocking pool, and the resulting table is returned as JSON rows or
//! a CSV download.

use axum::extract::{Multipart, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info, warn};

use stex_common::{Error, StatementTable};

use crate::{dispatch, AppState};

/// Query parameters for POST /extract
#[derive(Debug, Deserialize)]
pub struct ExtractQuery {
    /// Response format: "json" (default) or "csv"
    pub format: Option<String>,
}

/// Extraction result response
#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub bank: String,
    pub row_count: usize,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<serde_json::Value>>,
}

enum OutputFormat {
    Json,
    Csv,
}

/// POST /extract
///
/// Multipart fields:
/// - `bank`: registered bank key
/// - `file`: statement file to parse
pub async fn extract_statement(
    State(state): State<AppState>,
    Query(query): Query<ExtractQuery>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let format = parse_format(query.format.as_deref())?;
    let upload = read_upload(multipart).await?;

    let bank_key = upload
        .bank
        .ok_or_else(|| Error::Validation("field 'bank' is required".to_string()))?;
    if bank_key.is_empty() {
        return Err(Error::Validation("field 'bank' must not be empty".to_string()).into());
    }
    let (filename, bytes) = upload
        .file
        .ok_or_else(|| Error::Validation("field 'file' is required".to_string()))?;
    if bytes.is_empty() {
        return Err(Error::Validation("field 'file' must not be empty".to_string()).into());
    }

    // Resolve before staging: an unknown bank never touches the disk.
    let extractor = state.registry.resolve(&bank_key)?;

    let staged = state.staging.stage(&bytes, &filename)?;
    info!(
        "Dispatching '{}' upload '{}' ({} bytes)",
        bank_key,
        filename,
        bytes.len()
    );

    let table = dispatch::invoke(extractor, &bank_key, staged.path()).await?;
    // `staged` drops on every path out of this function, removing the file.

    Ok(render(bank_key, table, format))
}

/// Multipart fields collected from the request body
#[derive(Default)]
struct UploadFields {
    bank: Option<String>,
    file: Option<(String, Vec<u8>)>,
}

async fn read_upload(mut multipart: Multipart) -> Result<UploadFields, ApiError> {
    let mut fields = UploadFields::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError::from(Error::Validation(format!("Malformed multipart body: {}", e)))
    })? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "bank" => {
                let value = field.text().await.map_err(|e| {
                    ApiError::from(Error::Validation(format!("Unreadable 'bank' field: {}", e)))
                })?;
                fields.bank = Some(value.trim().to_string());
            }
            "file" => {
                let filename = field.file_name().unwrap_or("statement").to_string();
                let bytes = field.bytes().await.map_err(|e| {
                    ApiError::from(Error::Validation(format!("Unreadable 'file' field: {}", e)))
                })?;
                fields.file = Some((filename, bytes.to_vec()));
            }
            other => {
                warn!("Ignoring unexpected multipart field '{}'", other);
            }
        }
    }

    Ok(fields)
}

fn parse_format(format: Option<&str>) -> Result<OutputFormat, ApiError> {
    match format {
        None | Some("json") => Ok(OutputFormat::Json),
        Some("csv") => Ok(OutputFormat::Csv),
        Some(other) => Err(Error::Validation(format!(
            "Unsupported format '{}' (expected 'json' or 'csv')",
            other
        ))
        .into()),
    }
}

fn render(bank: String, table: StatementTable, format: OutputFormat) -> Response {
    match format {
        OutputFormat::Json => {
            let response = ExtractResponse {
                row_count: table.row_count(),
                bank,
                columns: table.columns,
                rows: table.rows,
            };
            Json(response).into_response()
        }
        OutputFormat::Csv => (
            StatusCode::OK,
            [
                (
                    header::CONTENT_TYPE,
                    "text/csv; charset=utf-8".to_string(),
                ),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}.csv\"", bank),
                ),
            ],
            table.to_csv(),
        )
            .into_response(),
    }
}

/// Error wrapper mapping the dispatch taxonomy onto HTTP responses.
///
/// Every failure becomes a machine-readable `{"error", "message"}` body;
/// internal details never leak to the caller.
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self.0 {
            Error::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            Error::UnknownBank { .. } => (StatusCode::NOT_FOUND, "unknown_bank"),
            Error::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "storage_error"),
            Error::Extractor { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "extractor_error"),
            Error::Io(_) | Error::Config(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };

        let message = match &self.0 {
            // Operational faults: log the detail, return a generic message
            Error::Io(_) | Error::Config(_) => {
                error!("Internal error: {}", self.0);
                "internal error".to_string()
            }
            other => {
                warn!("Request failed: {}", other);
                other.to_string()
            }
        };

        (
            status,
            Json(json!({
                "error": kind,
                "message": message,
            })),
        )
            .into_response()
    }
}
