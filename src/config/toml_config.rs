use crate::domain::model::Court;
use crate::utils::error::{Result, ScraperError};
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36";

/// Candidate cause-list locations, tried in this order.
pub const DEFAULT_URL_TEMPLATES: [&str; 3] = [
    "https://districts.ecourts.gov.in/delhi/{court_code}/causelist_{date}.pdf",
    "https://delhicourts.nic.in/{court_code}/causelist.pdf?date={date}",
    "https://delhihighcourt.nic.in/dhc_case_status/causelist/{court_code}_{date}.pdf",
];

/// Optional `courts.toml` for the cause-list downloader.
///
/// ```toml
/// [scraper]
/// delay_seconds = 2
/// url_templates = ["https://example.org/{court_code}/{date}.pdf"]
///
/// [[courts]]
/// name = "Tis Hazari Courts"
/// code = "tis_hazari"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourtsConfig {
    #[serde(default)]
    pub scraper: ScraperSettings,
    #[serde(default = "delhi_courts")]
    pub courts: Vec<Court>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperSettings {
    #[serde(default = "default_delay")]
    pub delay_seconds: u64,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_url_templates")]
    pub url_templates: Vec<String>,
}

fn default_delay() -> u64 {
    2
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_url_templates() -> Vec<String> {
    DEFAULT_URL_TEMPLATES.iter().map(|t| t.to_string()).collect()
}

pub fn delhi_courts() -> Vec<Court> {
    vec![
        Court::new("Tis Hazari Courts", "tis_hazari"),
        Court::new("Karkardooma Courts", "karkardooma"),
        Court::new("Rohini Courts", "rohini"),
        Court::new("Dwarka Courts", "dwarka"),
        Court::new("Saket Courts", "saket"),
        Court::new("Patiala House Courts", "patiala_house"),
    ]
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            delay_seconds: default_delay(),
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
            url_templates: default_url_templates(),
        }
    }
}

impl Default for CourtsConfig {
    fn default() -> Self {
        Self {
            scraper: ScraperSettings::default(),
            courts: delhi_courts(),
        }
    }
}

impl CourtsConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScraperError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ScraperError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        let re = Regex::new(r"\$\{([^}]+)\}").expect("static pattern");

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }
}

/// Fills `{court_code}` and `{date}` in a URL template.
pub fn expand_template(template: &str, court_code: &str, date: &str) -> String {
    template
        .replace("{court_code}", court_code)
        .replace("{date}", date)
}

impl Validate for CourtsConfig {
    fn validate(&self) -> Result<()> {
        if self.courts.is_empty() {
            return Err(ScraperError::ConfigValidationError {
                field: "courts".to_string(),
                message: "At least one court must be configured".to_string(),
            });
        }
        for court in &self.courts {
            validate_non_empty_string("courts.name", &court.name)?;
            validate_non_empty_string("courts.code", &court.code)?;
        }

        if self.scraper.url_templates.is_empty() {
            return Err(ScraperError::ConfigValidationError {
                field: "scraper.url_templates".to_string(),
                message: "At least one URL template is required".to_string(),
            });
        }
        for template in &self.scraper.url_templates {
            let sample = expand_template(template, "court", "01-01-2025");
            validate_url("scraper.url_templates", &sample)?;
        }

        if self.scraper.timeout_seconds == 0 {
            return Err(ScraperError::InvalidConfigValueError {
                field: "scraper.timeout_seconds".to_string(),
                value: "0".to_string(),
                reason: "Timeout must be at least 1 second".to_string(),
            });
        }

        Ok(())
    }
}
