//! Heuristic extraction of case fields and cause-list rows from court HTML.
//!
//! Court pages have no stable markup, so extraction is a keyword scan over
//! table rows: the first cell names the field and the second holds its value.

use crate::domain::model::{CaseInfo, CauseListEntry};
use scraper::{ElementRef, Html, Selector};
use url::Url;

const NOT_FOUND_MARKERS: [&str; 2] = ["not found", "no record"];
const CAPTCHA_MARKER: &str = "captcha";
const PDF_LINK_KEYWORDS: [&str; 3] = ["pdf", "causelist", "download"];
const PDF_FORM_KEYWORDS: [&str; 2] = ["pdf", "causelist"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaseField {
    CourtName,
    SerialNumber,
    PartyNames,
    CaseStatus,
    NextHearingDate,
}

// Order matters: a header is assigned to the first group it matches.
const FIELD_KEYWORDS: [(CaseField, &[&str]); 5] = [
    (CaseField::CourtName, &["court name", "court", "bench"]),
    (CaseField::SerialNumber, &["serial", "sr. no", "sl. no"]),
    (CaseField::PartyNames, &["petitioner", "party", "parties"]),
    (CaseField::CaseStatus, &["status", "case status"]),
    (
        CaseField::NextHearingDate,
        &["next date", "hearing date", "next hearing"],
    ),
];

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

/// Text of every descendant node, each trimmed, concatenated without separator.
fn stripped_text(element: &ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn classify_header(header: &str) -> Option<CaseField> {
    FIELD_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| header.contains(k)))
        .map(|(field, _)| *field)
}

pub fn parse_case_details(html: &str, case_id: &str) -> CaseInfo {
    let mut info = CaseInfo::new(case_id);

    let text_lower = html.to_lowercase();
    if NOT_FOUND_MARKERS.iter().any(|m| text_lower.contains(m)) {
        tracing::warn!("⚠️  Case not found in eCourts database");
        info.error = Some("Case not found".to_string());
        return info;
    }
    if text_lower.contains(CAPTCHA_MARKER) {
        tracing::warn!("🔐 CAPTCHA detected - manual intervention may be required");
        info.error = Some("CAPTCHA required".to_string());
        return info;
    }

    let document = Html::parse_document(html);
    let table_sel = selector("table");
    let row_sel = selector("tr");
    let cell_sel = selector("td, th");

    let tables: Vec<ElementRef> = document.select(&table_sel).collect();
    tracing::debug!("📋 Found {} tables in response", tables.len());

    for table in tables {
        for row in table.select(&row_sel) {
            let cells: Vec<ElementRef> = row.select(&cell_sel).collect();
            if cells.len() < 2 {
                continue;
            }
            let header = stripped_text(&cells[0]).to_lowercase();
            let value = stripped_text(&cells[1]);

            match classify_header(&header) {
                Some(CaseField::CourtName) => info.court_name = Some(value),
                Some(CaseField::SerialNumber) => info.serial_number = Some(value),
                Some(CaseField::PartyNames) => info.party_names = Some(value),
                Some(CaseField::CaseStatus) => info.case_status = Some(value),
                Some(CaseField::NextHearingDate) => info.next_hearing_date = Some(value),
                None => {}
            }
        }
    }

    if info.court_name.is_some() || info.party_names.is_some() {
        info.found = true;
        tracing::info!("✓ Case information extracted successfully");
    } else {
        tracing::warn!("⚠️  Could not extract case details from response");
        info.error = Some("Could not parse case details".to_string());
    }

    info
}

/// Rows of every table after its header row; rows without a case number are dropped.
pub fn parse_cause_list(html: &str) -> Vec<CauseListEntry> {
    let document = Html::parse_document(html);
    let table_sel = selector("table");
    let row_sel = selector("tr");
    let cell_sel = selector("td");

    let mut entries = Vec::new();
    for table in document.select(&table_sel) {
        for row in table.select(&row_sel).skip(1) {
            let cells: Vec<String> = row.select(&cell_sel).map(|c| stripped_text(&c)).collect();
            if cells.len() < 2 {
                continue;
            }
            let column = |i: usize| cells.get(i).cloned().unwrap_or_default();
            let entry = CauseListEntry {
                serial_no: column(0),
                case_number: column(1),
                parties: column(2),
                purpose: column(3),
            };
            if !entry.case_number.is_empty() {
                entries.push(entry);
            }
        }
    }

    tracing::info!("✓ Parsed {} cases from cause list", entries.len());
    entries
}

/// Finds a link to the actual PDF on an HTML landing page.
pub fn find_pdf_link(html: &str, page_url: &Url) -> Option<Url> {
    let document = Html::parse_document(html);

    for link in document.select(&selector("a[href]")) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        let href_lower = href.to_lowercase();
        let text_lower = link.text().collect::<String>().to_lowercase();

        if PDF_LINK_KEYWORDS
            .iter()
            .any(|k| href_lower.contains(k) || text_lower.contains(k))
        {
            if let Ok(url) = page_url.join(href) {
                return Some(url);
            }
        }
    }

    for form in document.select(&selector("form")) {
        let action = form.value().attr("action").unwrap_or("");
        let action_lower = action.to_lowercase();
        if PDF_FORM_KEYWORDS.iter().any(|k| action_lower.contains(k)) {
            if let Ok(url) = page_url.join(action) {
                return Some(url);
            }
        }
    }

    None
}
