use crate::config::toml_config::DEFAULT_USER_AGENT;
use crate::core::extract::{parse_case_details, parse_cause_list};
use crate::core::http::{build_client, content_type, is_pdf, Timeouts};
use crate::domain::model::{CaseInfo, ResultsReport};
use crate::domain::ports::{ConfigProvider, Storage};
use crate::utils::error::{Result, ScraperError};
use crate::utils::naming::{case_pdf_filename, cause_list_json_filename};
use crate::utils::validation::COURT_DATE_FORMAT;
use chrono::Local;
use reqwest::header::{ORIGIN, REFERER};
use reqwest::{Client, StatusCode};

pub const DEFAULT_BASE_URL: &str = "https://services.ecourts.gov.in/ecourtindia_v6/";

/// Responses with fewer characters than this are treated as empty pages.
const MIN_RESPONSE_LEN: usize = 100;

const ACCEPT_HTML: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";

/// Case search, case PDF and cause-list access on the eCourts services portal.
pub struct ECourtsScraper<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
    timeouts: Timeouts,
}

impl<S: Storage, C: ConfigProvider> ECourtsScraper<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        Ok(Self {
            storage,
            config,
            client: build_client(DEFAULT_USER_AGENT, ACCEPT_HTML)?,
            timeouts: Timeouts::default(),
        })
    }

    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.config.base_url().trim_end_matches('/'), name)
    }

    /// Visits the portal home page so the session picks up its cookies.
    pub async fn init_session(&self) -> bool {
        match self
            .client
            .get(self.config.base_url())
            .timeout(self.timeouts.session)
            .send()
            .await
        {
            Ok(response) if response.status() == StatusCode::OK => {
                tracing::debug!("✓ Session initialized successfully");
                true
            }
            Ok(response) => {
                tracing::warn!(
                    "⚠️  Session initialization warning: Status {}",
                    response.status().as_u16()
                );
                false
            }
            Err(e) => {
                tracing::warn!("❌ Error initializing session: {}", e);
                false
            }
        }
    }

    async fn save_debug_html(&self, name: &str, html: &str) {
        if !self.config.save_debug_html() {
            return;
        }
        match self.storage.write_file(name, html.as_bytes()).await {
            Ok(()) => tracing::info!(
                "💾 Response saved to {} for inspection",
                self.storage.location(name)
            ),
            Err(e) => tracing::warn!("Could not save {}: {}", name, e),
        }
    }

    pub async fn search_by_cnr(&self, _state_code: &str, cnr_number: &str) -> CaseInfo {
        tracing::info!("🔍 Searching for CNR: {}", cnr_number);
        match self.try_search_by_cnr(cnr_number).await {
            Ok(info) => info,
            Err(e) => {
                tracing::error!("❌ CNR search failed: {}", e);
                CaseInfo::failed(cnr_number, e.short_reason())
            }
        }
    }

    async fn try_search_by_cnr(&self, cnr_number: &str) -> Result<CaseInfo> {
        if !self.init_session().await {
            tracing::warn!("⚠️  Continuing despite session initialization issue...");
        }

        let url = self.endpoint("CNRSearch");
        let form = [("CNR_number", cnr_number), ("cino", cnr_number)];

        tracing::debug!("📡 Sending request to {}", url);
        let response = self
            .client
            .post(&url)
            .header(REFERER, self.config.base_url())
            .header(ORIGIN, self.config.base_url().trim_end_matches('/'))
            .form(&form)
            .timeout(self.timeouts.search)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("📊 Response status: {}", status.as_u16());
        if status != StatusCode::OK {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let html = response.text().await?;
        if html.chars().count() < MIN_RESPONSE_LEN {
            tracing::warn!("⚠️  Received empty or very short response");
            return Err(ScraperError::EmptyResponse);
        }

        self.save_debug_html("debug_response.html", &html).await;
        Ok(parse_case_details(&html, cnr_number))
    }

    pub async fn search_by_case_number(
        &self,
        state_code: &str,
        dist_code: &str,
        case_type: &str,
        case_no: &str,
        case_year: &str,
    ) -> CaseInfo {
        let case_id = format!("{}/{}/{}", case_type, case_no, case_year);
        tracing::info!("🔍 Searching for Case: {}", case_id);

        let form = [
            ("state_code", state_code),
            ("dist_code", dist_code),
            ("court_code", ""),
            ("case_type", case_type),
            ("case_no", case_no),
            ("case_year", case_year),
        ];

        match self.try_search_by_case_number(&case_id, &form).await {
            Ok(info) => info,
            Err(e) => {
                tracing::error!("❌ Case number search failed: {}", e);
                CaseInfo::failed(case_id, e.short_reason())
            }
        }
    }

    async fn try_search_by_case_number(
        &self,
        case_id: &str,
        form: &[(&str, &str)],
    ) -> Result<CaseInfo> {
        if !self.init_session().await {
            tracing::warn!("⚠️  Continuing despite session initialization issue...");
        }

        let url = self.endpoint("CaseNumberSearch");
        let response = self
            .client
            .post(&url)
            .form(form)
            .timeout(self.timeouts.search)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("📊 Response status: {}", status.as_u16());
        if status != StatusCode::OK {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let html = response.text().await?;
        self.save_debug_html("debug_response.html", &html).await;
        Ok(parse_case_details(&html, case_id))
    }

    /// Saves the case PDF and returns its path. Non-PDF responses are an error.
    pub async fn download_case_pdf(&self, case_id: &str) -> Result<String> {
        let url = self.endpoint("GetCasePDF");
        tracing::info!("📥 Attempting to download case PDF...");

        let response = self
            .client
            .get(&url)
            .timeout(self.timeouts.download)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let content_type = content_type(&response);
        let body = response.bytes().await?;
        if !is_pdf(&content_type, &body) {
            return Err(ScraperError::NotPdf { content_type });
        }

        let filename = case_pdf_filename(case_id);
        self.storage.write_file(&filename, &body).await?;
        let path = self.storage.location(&filename);
        tracing::info!("✓ PDF downloaded: {}", path);
        Ok(path)
    }

    /// Fetches a court's cause list for `date` (today when absent) and stores it as JSON.
    pub async fn download_cause_list(
        &self,
        state_code: &str,
        dist_code: &str,
        court_code: &str,
        date: Option<&str>,
    ) -> Result<String> {
        let date = match date {
            Some(d) => d.to_string(),
            None => Local::now().format(COURT_DATE_FORMAT).to_string(),
        };
        tracing::info!("📥 Downloading cause list for {}...", date);

        let url = self.endpoint("ViewCauseList");
        let form = [
            ("state_code", state_code),
            ("dist_code", dist_code),
            ("court_code", court_code),
            ("hearing_date", date.as_str()),
        ];

        let response = self
            .client
            .post(&url)
            .form(&form)
            .timeout(self.timeouts.download)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let html = response.text().await?;
        self.save_debug_html("debug_causelist.html", &html).await;

        let entries = parse_cause_list(&html);
        let json = serde_json::to_string_pretty(&entries)?;

        let filename = cause_list_json_filename(&date);
        self.storage.write_file(&filename, json.as_bytes()).await?;
        let path = self.storage.location(&filename);
        tracing::info!("✓ Cause list saved: {}", path);
        Ok(path)
    }
}

/// Writes the run report as pretty JSON to an arbitrary path.
pub fn save_results(report: &ResultsReport, path: &str) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, json)?;
    tracing::info!("✓ Results saved to: {}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CauseListEntry, SearchQuery};
    use httpmock::prelude::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }

        fn location(&self, path: &str) -> String {
            format!("mock/{}", path)
        }
    }

    struct MockConfig {
        base_url: String,
        output_dir: String,
        save_debug_html: bool,
    }

    impl MockConfig {
        fn new(base_url: String) -> Self {
            Self {
                base_url,
                output_dir: "mock".to_string(),
                save_debug_html: false,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn base_url(&self) -> &str {
            &self.base_url
        }

        fn output_dir(&self) -> &str {
            &self.output_dir
        }

        fn save_debug_html(&self) -> bool {
            self.save_debug_html
        }
    }

    const CASE_HTML: &str = r#"<html><body><table>
        <tr><td>Court Name</td><td>Karkardooma Courts</td></tr>
        <tr><td>Petitioner</td><td>State vs Ramesh</td></tr>
        <tr><td>Next Date</td><td>16-10-2025</td></tr>
    </table></body></html>"#;

    #[tokio::test]
    async fn test_search_by_cnr_parses_case_page() {
        let server = MockServer::start_async().await;
        let home = server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(200).body("<html>home</html>");
            })
            .await;
        let search = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/CNRSearch")
                    .body_contains("cino=DLCT010123452024");
                then.status(200)
                    .header("Content-Type", "text/html")
                    .body(CASE_HTML);
            })
            .await;

        let storage = MockStorage::new();
        let scraper = ECourtsScraper::new(storage, MockConfig::new(server.url("/"))).unwrap();

        let info = scraper.search_by_cnr("DL", "DLCT010123452024").await;

        home.assert_async().await;
        search.assert_async().await;
        assert!(info.found);
        assert_eq!(info.case_id, "DLCT010123452024");
        assert_eq!(info.court_name.as_deref(), Some("Karkardooma Courts"));
        assert_eq!(info.party_names.as_deref(), Some("State vs Ramesh"));
        assert_eq!(info.next_hearing_date.as_deref(), Some("16-10-2025"));
    }

    #[tokio::test]
    async fn test_search_continues_when_session_init_fails() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(503);
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/CNRSearch");
                then.status(200).body(CASE_HTML);
            })
            .await;

        let scraper =
            ECourtsScraper::new(MockStorage::new(), MockConfig::new(server.url("/"))).unwrap();
        let info = scraper.search_by_cnr("DL", "X").await;

        assert!(info.found);
    }

    #[tokio::test]
    async fn test_search_http_error_becomes_error_record() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(200);
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/CNRSearch");
                then.status(500);
            })
            .await;

        let scraper =
            ECourtsScraper::new(MockStorage::new(), MockConfig::new(server.url("/"))).unwrap();
        let info = scraper.search_by_cnr("DL", "X").await;

        assert!(!info.found);
        assert_eq!(info.error.as_deref(), Some("HTTP 500"));
        assert!(info.note.is_some());
    }

    #[tokio::test]
    async fn test_short_cnr_response_is_reported_empty() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(200);
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/CNRSearch");
                then.status(200).body("<html></html>");
            })
            .await;

        let scraper =
            ECourtsScraper::new(MockStorage::new(), MockConfig::new(server.url("/"))).unwrap();
        let info = scraper.search_by_cnr("DL", "X").await;

        assert_eq!(info.error.as_deref(), Some("Empty response from server"));
    }

    #[tokio::test]
    async fn test_short_response_is_measured_in_characters() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(200);
            })
            .await;
        // 47 characters but well over 100 bytes
        let body = format!("<p>{}</p>", "न".repeat(40));
        assert!(body.len() > MIN_RESPONSE_LEN);
        server
            .mock_async(|when, then| {
                when.method(POST).path("/CNRSearch");
                then.status(200).body(body);
            })
            .await;

        let scraper =
            ECourtsScraper::new(MockStorage::new(), MockConfig::new(server.url("/"))).unwrap();
        let info = scraper.search_by_cnr("DL", "X").await;

        assert_eq!(info.error.as_deref(), Some("Empty response from server"));
    }

    #[tokio::test]
    async fn test_non_200_success_status_is_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(200);
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/CaseNumberSearch");
                then.status(202).body(CASE_HTML);
            })
            .await;

        let scraper =
            ECourtsScraper::new(MockStorage::new(), MockConfig::new(server.url("/"))).unwrap();
        let info = scraper
            .search_by_case_number("DL", "01", "CS", "123", "2024")
            .await;

        assert!(!info.found);
        assert_eq!(info.error.as_deref(), Some("HTTP 202"));
    }

    #[tokio::test]
    async fn test_unreachable_portal_reports_connection_failure() {
        // nothing listens on the discard port
        let scraper = ECourtsScraper::new(
            MockStorage::new(),
            MockConfig::new("http://127.0.0.1:9/".to_string()),
        )
        .unwrap();

        let info = scraper.search_by_cnr("DL", "DLCT010123452024").await;

        assert!(!info.found);
        assert_eq!(info.error.as_deref(), Some("Connection failed"));
        assert!(info.note.is_some());
    }

    #[tokio::test]
    async fn test_slow_portal_reports_timeout() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(200);
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/CNRSearch");
                then.status(200)
                    .delay(Duration::from_millis(1500))
                    .body(CASE_HTML);
            })
            .await;

        let scraper =
            ECourtsScraper::new(MockStorage::new(), MockConfig::new(server.url("/")))
                .unwrap()
                .with_timeouts(Timeouts::uniform(Duration::from_millis(300)));
        let info = scraper.search_by_cnr("DL", "X").await;

        assert!(!info.found);
        assert_eq!(info.error.as_deref(), Some("Request timeout"));
    }

    #[tokio::test]
    async fn test_search_by_case_number_posts_form_and_saves_debug_html() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(200);
            })
            .await;
        let search = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/CaseNumberSearch")
                    .body_contains("dist_code=01")
                    .body_contains("case_type=CS")
                    .body_contains("case_year=2024");
                then.status(200).body(CASE_HTML);
            })
            .await;

        let storage = MockStorage::new();
        let mut config = MockConfig::new(server.url("/"));
        config.save_debug_html = true;
        let scraper = ECourtsScraper::new(storage.clone(), config).unwrap();

        let info = scraper
            .search_by_case_number("DL", "01", "CS", "123", "2024")
            .await;

        search.assert_async().await;
        assert_eq!(info.case_id, "CS/123/2024");
        assert!(info.found);
        assert!(storage.get_file("debug_response.html").await.is_some());
    }

    #[tokio::test]
    async fn test_download_case_pdf() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/GetCasePDF");
                then.status(200)
                    .header("Content-Type", "application/pdf")
                    .body(b"%PDF-1.4 case file");
            })
            .await;

        let storage = MockStorage::new();
        let scraper =
            ECourtsScraper::new(storage.clone(), MockConfig::new(server.url("/"))).unwrap();

        let path = scraper.download_case_pdf("CS/123/2024").await.unwrap();

        assert_eq!(path, "mock/CS_123_2024.pdf");
        assert_eq!(
            storage.get_file("CS_123_2024.pdf").await.unwrap(),
            b"%PDF-1.4 case file".to_vec()
        );
    }

    #[tokio::test]
    async fn test_download_case_pdf_rejects_html() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/GetCasePDF");
                then.status(200)
                    .header("Content-Type", "text/html")
                    .body("<html>Session expired</html>");
            })
            .await;

        let storage = MockStorage::new();
        let scraper =
            ECourtsScraper::new(storage.clone(), MockConfig::new(server.url("/"))).unwrap();

        let err = scraper.download_case_pdf("CS/123/2024").await.unwrap_err();
        assert!(matches!(err, ScraperError::NotPdf { .. }));
        assert!(storage.get_file("CS_123_2024.pdf").await.is_none());
    }

    #[tokio::test]
    async fn test_download_cause_list_writes_json() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/ViewCauseList")
                    .body_contains("court_code=3")
                    .body_contains("hearing_date=15-10-2025");
                then.status(200).body(
                    r#"<table>
                        <tr><th>#</th><th>Case</th><th>Parties</th><th>Purpose</th></tr>
                        <tr><td>1</td><td>CS 123/2024</td><td>ABC vs XYZ</td><td>Arguments</td></tr>
                    </table>"#,
                );
            })
            .await;

        let storage = MockStorage::new();
        let scraper =
            ECourtsScraper::new(storage.clone(), MockConfig::new(server.url("/"))).unwrap();

        let path = scraper
            .download_cause_list("DL", "01", "3", Some("15-10-2025"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(path, "mock/causelist_15_10_2025.json");

        let saved = storage.get_file("causelist_15_10_2025.json").await.unwrap();
        let entries: Vec<CauseListEntry> = serde_json::from_slice(&saved).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].parties, "ABC vs XYZ");
    }

    #[tokio::test]
    async fn test_download_cause_list_http_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/ViewCauseList");
                then.status(404);
            })
            .await;

        let scraper =
            ECourtsScraper::new(MockStorage::new(), MockConfig::new(server.url("/"))).unwrap();
        let err = scraper
            .download_cause_list("DL", "01", "3", Some("15-10-2025"))
            .await
            .unwrap_err();

        assert!(matches!(err, ScraperError::UnexpectedStatus { status: 404, .. }));
    }

    #[test]
    fn test_save_results_preserves_unicode() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("out").join("results.json");

        let mut report = ResultsReport::new(SearchQuery::Cnr {
            cnr: "X".to_string(),
        });
        let mut info = CaseInfo::new("X");
        info.party_names = Some("राम बनाम श्याम".to_string());
        report.case_info = Some(info);

        save_results(&report, path.to_str().unwrap()).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("राम बनाम श्याम"));
        assert!(written.contains("\"type\": \"cnr\""));
    }
}
