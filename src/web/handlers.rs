use crate::config::cli::LocalStorage;
use crate::core::ecourts::ECourtsScraper;
use crate::core::listing::{check_listing, CheckDay};
use crate::domain::model::{CaseInfo, DownloadKind, DownloadRecord, ListingInfo};
use crate::domain::ports::ConfigProvider;
use crate::web::page::INDEX_HTML;
use crate::web::AppState;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};
use std::path::{Component, PathBuf};
use std::sync::Arc;

/// Error body returned by every API route: `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchRequest {
    #[serde(deserialize_with = "lenient_string")]
    pub search_type: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub cnr: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub state: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub dist: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub case_type: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub case_no: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub case_year: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub check_date: Option<String>,
    #[serde(deserialize_with = "lenient_flag")]
    pub download_pdf: bool,
    #[serde(deserialize_with = "lenient_flag")]
    pub download_cause_list: bool,
    #[serde(deserialize_with = "lenient_string")]
    pub court: Option<String>,
}

/// Numbers and booleans are taken as their text; null and containers as missing.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

/// Null is off. Numbers are on when non-zero, strings when they read as a yes.
fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes" | "on"
        ),
        Value::Null | Value::Array(_) | Value::Object(_) => false,
    })
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub case_info: CaseInfo,
    pub downloads: Vec<DownloadRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing_info: Option<ListingInfo>,
}

/// Blank strings count as missing, as they do in the form.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<SearchResponse>, ApiError> {
    let request = parse_search_request(&body)?;

    let check_day = present(&request.check_date)
        .map(|d| d.parse::<CheckDay>())
        .transpose()
        .map_err(ApiError::bad_request)?;

    let config = state.config.clone();
    let storage = LocalStorage::new(config.output_dir().to_string());
    let scraper = ECourtsScraper::new(storage, config)
        .map_err(|e| ApiError::internal(e.to_string()))?;

    let state_code = present(&request.state).unwrap_or("");
    let dist = present(&request.dist);

    let case_info = if request.search_type.as_deref() == Some("cnr") {
        let cnr = present(&request.cnr)
            .ok_or_else(|| ApiError::bad_request("CNR number is required"))?;
        scraper.search_by_cnr(state_code, cnr).await
    } else {
        let (Some(case_type), Some(case_no), Some(case_year)) = (
            present(&request.case_type),
            present(&request.case_no),
            present(&request.case_year),
        ) else {
            return Err(ApiError::bad_request(
                "Case type, number, and year are required",
            ));
        };
        let dist = dist.ok_or_else(|| {
            ApiError::bad_request("District code is required for case number search")
        })?;
        scraper
            .search_by_case_number(state_code, dist, case_type, case_no, case_year)
            .await
    };

    let listing_info = check_day.map(|day| check_listing(&case_info, day));

    let mut downloads = Vec::new();
    if request.download_pdf && case_info.found {
        match scraper.download_case_pdf(&case_info.case_id).await {
            Ok(file) => downloads.push(DownloadRecord {
                kind: DownloadKind::CasePdf,
                file,
            }),
            Err(e) => tracing::warn!("❌ PDF download failed: {}", e),
        }
    }

    if request.download_cause_list {
        if let (Some(dist), Some(court)) = (dist, present(&request.court)) {
            match scraper
                .download_cause_list(state_code, dist, court, None)
                .await
            {
                Ok(file) => downloads.push(DownloadRecord {
                    kind: DownloadKind::CauseList,
                    file,
                }),
                Err(e) => tracing::warn!("❌ Cause list download failed: {}", e),
            }
        }
    }

    Ok(Json(SearchResponse {
        case_info,
        downloads,
        listing_info,
    }))
}

/// An absent, non-object, or empty JSON body is rejected outright.
fn parse_search_request(body: &[u8]) -> Result<SearchRequest, ApiError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|_| ApiError::bad_request("No data provided"))?;

    match &value {
        Value::Object(map) if !map.is_empty() => {}
        _ => return Err(ApiError::bad_request("No data provided")),
    }

    serde_json::from_value(value).map_err(|e| ApiError::bad_request(e.to_string()))
}

/// Maps a requested name onto the download directory, refusing anything
/// that could escape it.
pub fn resolve_download_path(output_dir: &str, filename: &str) -> Option<PathBuf> {
    let root = PathBuf::from(output_dir);
    let requested = std::path::Path::new(filename);
    // download records carry the output directory in front of the name
    let relative = requested.strip_prefix(&root).unwrap_or(requested);

    if relative.as_os_str().is_empty()
        || !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
    {
        return None;
    }

    Some(root.join(relative))
}

fn mime_for(path: &std::path::Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("pdf") => "application/pdf",
        Some("json") => "application/json",
        Some("html") => "text/html; charset=utf-8",
        _ => "application/octet-stream",
    }
}

pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    let path = resolve_download_path(state.config.output_dir(), &filename)
        .ok_or_else(|| ApiError::not_found(format!("Invalid file path: {}", filename)))?;

    let data = tokio::fs::read(&path)
        .await
        .map_err(|e| ApiError::not_found(format!("{}: {}", filename, e)))?;

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("download");

    Ok((
        [
            (header::CONTENT_TYPE, mime_for(&path).to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", name),
            ),
        ],
        data,
    )
        .into_response())
}
