use crate::config::toml_config::{expand_template, ScraperSettings};
use crate::core::extract::find_pdf_link;
use crate::core::http::{build_client, content_type, has_pdf_magic, is_pdf, size_kb};
use crate::domain::model::{
    now_timestamp, Court, DownloadOutcome, DownloadReport, DownloadStats, DownloadStatus,
};
use crate::domain::ports::Storage;
use crate::utils::error::{Result, ScraperError};
use crate::utils::naming::{cause_list_pdf_filename, report_filename};
use reqwest::{Client, StatusCode};
use std::fmt::Write as _;
use std::time::Duration;

const ACCEPT_PDF: &str = "application/pdf,text/html,application/xhtml+xml";

/// Downloads daily cause-list PDFs from district court sites by trying a
/// fixed list of candidate URLs per court.
pub struct CauseListScraper<S: Storage> {
    storage: S,
    client: Client,
    url_templates: Vec<String>,
    timeout: Duration,
    delay: Duration,
    stats: DownloadStats,
}

impl<S: Storage> CauseListScraper<S> {
    pub fn new(storage: S, settings: &ScraperSettings) -> Result<Self> {
        Ok(Self {
            storage,
            client: build_client(&settings.user_agent, ACCEPT_PDF)?,
            url_templates: settings.url_templates.clone(),
            timeout: Duration::from_secs(settings.timeout_seconds),
            delay: Duration::from_secs(settings.delay_seconds),
            stats: DownloadStats::default(),
        })
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn stats(&self) -> &DownloadStats {
        &self.stats
    }

    /// Tries every candidate URL once; returns the saved path on the first PDF.
    pub async fn download_cause_list_pdf(&mut self, court: &Court, date: &str) -> Option<String> {
        self.stats.total_attempted += 1;
        tracing::info!("📥 Downloading: {} ({})", court.name, date);

        for template in &self.url_templates {
            let url = expand_template(template, &court.code, date);
            tracing::info!("  🔗 Trying: {}", url);

            let body = match self.fetch_pdf(&url).await {
                Ok(Some(body)) => body,
                Ok(None) => continue,
                Err(ScraperError::HttpError(e)) if e.is_timeout() => {
                    tracing::warn!("  ⏱️  Timeout");
                    continue;
                }
                Err(ScraperError::HttpError(e)) if e.is_connect() => {
                    tracing::warn!("  🌐 Connection error");
                    continue;
                }
                Err(e) => {
                    tracing::warn!("  ❌ Error: {}", e);
                    continue;
                }
            };

            let filename = cause_list_pdf_filename(&court.name, date);
            match self.storage.write_file(&filename, &body).await {
                Ok(()) => {
                    let kb = size_kb(&body);
                    self.stats.successful_downloads += 1;
                    self.stats.total_size_kb += kb;

                    let path = self.storage.location(&filename);
                    tracing::info!("  ✅ SUCCESS: Downloaded {:.1} KB", kb);
                    tracing::info!("  📄 Saved as: {}", path);
                    return Some(path);
                }
                Err(e) => tracing::error!("  ❌ Could not save {}: {}", filename, e),
            }
        }

        self.stats.failed_downloads += 1;
        tracing::warn!("  ❌ FAILED: Could not download from any source");
        None
    }

    /// `Ok(None)` means this URL had nothing usable and the next one should be tried.
    async fn fetch_pdf(&self, url: &str) -> Result<Option<Vec<u8>>> {
        let response = self.client.get(url).timeout(self.timeout).send().await?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => {
                tracing::warn!("  ⚠️  Not found (404)");
                return Ok(None);
            }
            status => {
                tracing::warn!("  ⚠️  HTTP {}", status.as_u16());
                return Ok(None);
            }
        }

        let content_type = content_type(&response);
        let page_url = response.url().clone();
        let body = response.bytes().await?;

        if is_pdf(&content_type, &body) {
            return Ok(Some(body.to_vec()));
        }
        if !content_type.contains("html") {
            tracing::debug!("  Unexpected content type '{}'", content_type);
            return Ok(None);
        }

        tracing::info!("  📄 Got HTML page, searching for PDF link...");
        let html = String::from_utf8_lossy(&body);
        let Some(link) = find_pdf_link(&html, &page_url) else {
            return Ok(None);
        };

        tracing::info!("  🔗 Found PDF link: {}", link);
        let pdf_response = self
            .client
            .get(link.as_str())
            .timeout(self.timeout)
            .send()
            .await?;
        if pdf_response.status() != StatusCode::OK {
            return Ok(None);
        }
        let pdf_body = pdf_response.bytes().await?;
        if has_pdf_magic(&pdf_body) {
            Ok(Some(pdf_body.to_vec()))
        } else {
            Ok(None)
        }
    }

    /// Downloads every court in turn, pausing between courts, and writes the JSON report.
    pub async fn batch_download(
        &mut self,
        date: &str,
        courts: &[Court],
    ) -> Result<Vec<DownloadOutcome>> {
        tracing::info!("🏛️  DISTRICT COURT CAUSE LIST SCRAPER");
        tracing::info!("📅 Date: {}", date);
        tracing::info!("🏢 Courts: {}", courts.len());

        let mut results = Vec::with_capacity(courts.len());
        for (i, court) in courts.iter().enumerate() {
            tracing::info!("[{}/{}] Processing...", i + 1, courts.len());

            let file = self.download_cause_list_pdf(court, date).await;
            let status = if file.is_some() {
                DownloadStatus::Success
            } else {
                DownloadStatus::Failed
            };
            results.push(DownloadOutcome {
                court: court.name.clone(),
                file,
                status,
            });

            if i + 1 < courts.len() && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        let report_path = self.save_report(date, &results).await?;
        tracing::info!("📋 Report saved: {}", report_path);

        Ok(results)
    }

    pub async fn save_report(&self, date: &str, results: &[DownloadOutcome]) -> Result<String> {
        let report = DownloadReport {
            date: date.to_string(),
            timestamp: now_timestamp(),
            statistics: self.stats.clone(),
            results: results.to_vec(),
        };
        let json = serde_json::to_string_pretty(&report)?;

        let filename = report_filename(date);
        self.storage.write_file(&filename, json.as_bytes()).await?;
        Ok(self.storage.location(&filename))
    }

    pub fn summary(&self, date: &str, output_dir: &str, results: &[DownloadOutcome]) -> String {
        render_summary(&self.stats, date, output_dir, results)
    }
}

pub fn render_summary(
    stats: &DownloadStats,
    date: &str,
    output_dir: &str,
    results: &[DownloadOutcome],
) -> String {
    let rule = "=".repeat(70);
    let mut out = String::new();

    // writing into a String cannot fail
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "📊 DOWNLOAD SUMMARY");
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "📅 Date: {}", date);
    let _ = writeln!(out, "📁 Output Directory: {}/", output_dir);
    let _ = writeln!(out, "\n📈 Statistics:");
    let _ = writeln!(out, "  Total Attempted:  {}", stats.total_attempted);
    let _ = writeln!(out, "  ✅ Successful:     {}", stats.successful_downloads);
    let _ = writeln!(out, "  ❌ Failed:         {}", stats.failed_downloads);
    let _ = writeln!(out, "  📦 Total Size:     {:.1} KB", stats.total_size_kb);
    if stats.successful_downloads > 0 {
        if let Some(rate) = stats.success_rate() {
            let _ = writeln!(out, "  📊 Success Rate:   {:.1}%", rate);
        }
    }

    let _ = writeln!(out, "\n📄 Downloaded Files:");
    for result in results {
        match (&result.status, &result.file) {
            (DownloadStatus::Success, Some(file)) => {
                let _ = writeln!(out, "  ✅ {}", file);
            }
            _ => {
                let _ = writeln!(out, "  ❌ {} - FAILED", result.court);
            }
        }
    }
    let _ = write!(out, "{}", rule);
    out
}
