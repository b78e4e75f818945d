use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub const UNAVAILABLE_NOTE: &str =
    "The eCourts website may require CAPTCHA or be temporarily unavailable";

pub fn now_timestamp() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Fields scraped from a single case page. Any of them may be missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseInfo {
    pub case_id: String,
    pub found: bool,
    pub court_name: Option<String>,
    pub serial_number: Option<String>,
    pub party_names: Option<String>,
    pub case_status: Option<String>,
    pub next_hearing_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub timestamp: NaiveDateTime,
}

impl CaseInfo {
    pub fn new(case_id: impl Into<String>) -> Self {
        Self {
            case_id: case_id.into(),
            found: false,
            court_name: None,
            serial_number: None,
            party_names: None,
            case_status: None,
            next_hearing_date: None,
            error: None,
            note: None,
            timestamp: now_timestamp(),
        }
    }

    /// Record returned when the request itself failed.
    pub fn failed(case_id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            note: Some(UNAVAILABLE_NOTE.to_string()),
            ..Self::new(case_id)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingInfo {
    pub check_date: NaiveDate,
    pub is_listed: bool,
    pub serial_number: Option<String>,
    pub court_name: Option<String>,
    pub case_id: String,
    pub hearing_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CauseListEntry {
    pub serial_no: String,
    pub case_number: String,
    pub parties: String,
    pub purpose: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Court {
    pub name: String,
    pub code: String,
}

impl Court {
    pub fn new(name: &str, code: &str) -> Self {
        Self {
            name: name.to_string(),
            code: code.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchQuery {
    Cnr {
        cnr: String,
    },
    CaseNumber {
        case_type: String,
        case_number: String,
        case_year: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadKind {
    CasePdf,
    CauseList,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadRecord {
    #[serde(rename = "type")]
    pub kind: DownloadKind,
    pub file: String,
}

/// Everything the case lookup produced in one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsReport {
    pub timestamp: NaiveDateTime,
    pub query: SearchQuery,
    pub case_info: Option<CaseInfo>,
    pub listing_info: Option<ListingInfo>,
    pub downloads: Vec<DownloadRecord>,
}

impl ResultsReport {
    pub fn new(query: SearchQuery) -> Self {
        Self {
            timestamp: now_timestamp(),
            query,
            case_info: None,
            listing_info: None,
            downloads: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadStatus {
    Success,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadOutcome {
    pub court: String,
    pub file: Option<String>,
    pub status: DownloadStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DownloadStats {
    pub total_attempted: u32,
    pub successful_downloads: u32,
    pub failed_downloads: u32,
    pub total_size_kb: f64,
}

impl DownloadStats {
    /// Percentage of attempts that produced a file, if anything was attempted.
    pub fn success_rate(&self) -> Option<f64> {
        if self.total_attempted == 0 {
            return None;
        }
        Some(self.successful_downloads as f64 / self.total_attempted as f64 * 100.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadReport {
    pub date: String,
    pub timestamp: NaiveDateTime,
    pub statistics: DownloadStats,
    pub results: Vec<DownloadOutcome>,
}
