use crate::utils::error::Result;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE};
use reqwest::{Client, Response};
use std::time::Duration;

pub const SESSION_TIMEOUT: Duration = Duration::from_secs(10);
pub const SEARCH_TIMEOUT: Duration = Duration::from_secs(15);
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Per-call timeouts for the portal requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub session: Duration,
    pub search: Duration,
    pub download: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            session: SESSION_TIMEOUT,
            search: SEARCH_TIMEOUT,
            download: DOWNLOAD_TIMEOUT,
        }
    }
}

impl Timeouts {
    pub fn uniform(timeout: Duration) -> Self {
        Self {
            session: timeout,
            search: timeout,
            download: timeout,
        }
    }
}

const PDF_MAGIC: &[u8] = b"%PDF";

/// Builds the cookie-keeping client shared by every request of one scraper.
pub fn build_client(user_agent: &str, accept: &'static str) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(accept));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert("upgrade-insecure-requests", HeaderValue::from_static("1"));

    let client = Client::builder()
        .user_agent(user_agent)
        .default_headers(headers)
        .cookie_store(true)
        .gzip(true)
        .build()?;
    Ok(client)
}

/// Lower-cased Content-Type, empty when absent.
pub fn content_type(response: &Response) -> String {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_lowercase()
}

pub fn is_pdf(content_type: &str, body: &[u8]) -> bool {
    content_type.contains("pdf") || has_pdf_magic(body)
}

pub fn has_pdf_magic(body: &[u8]) -> bool {
    body.starts_with(PDF_MAGIC)
}

pub fn size_kb(body: &[u8]) -> f64 {
    body.len() as f64 / 1024.0
}
