use regex::Regex;
use std::sync::OnceLock;

fn unsafe_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\s-]").expect("static pattern"))
}

/// `20-10-2025` and `20/10/2025` both become `20_10_2025`.
pub fn date_slug(date: &str) -> String {
    date.replace(['-', '/'], "_")
}

/// Court names keep word characters, whitespace and dashes; spaces become underscores.
pub fn court_slug(court_name: &str) -> String {
    unsafe_chars()
        .replace_all(court_name, "")
        .trim()
        .replace(' ', "_")
}

pub fn case_pdf_filename(case_id: &str) -> String {
    format!("{}.pdf", case_id.replace('/', "_"))
}

pub fn cause_list_pdf_filename(court_name: &str, date: &str) -> String {
    format!("{}_{}.pdf", court_slug(court_name), date_slug(date))
}

pub fn cause_list_json_filename(date: &str) -> String {
    format!("causelist_{}.json", date_slug(date))
}

pub fn report_filename(date: &str) -> String {
    format!("report_{}.json", date_slug(date))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_court_slug_strips_punctuation() {
        assert_eq!(court_slug("Tis Hazari Courts"), "Tis_Hazari_Courts");
        assert_eq!(court_slug("  Patiala House (New Delhi)! "), "Patiala_House_New_Delhi");
        assert_eq!(court_slug("Saket-Courts"), "Saket-Courts");
    }

    #[test]
    fn test_generated_filenames() {
        assert_eq!(case_pdf_filename("CS/123/2024"), "CS_123_2024.pdf");
        assert_eq!(
            cause_list_pdf_filename("Rohini Courts", "15-10-2025"),
            "Rohini_Courts_15_10_2025.pdf"
        );
        assert_eq!(cause_list_json_filename("15/10/2025"), "causelist_15_10_2025.json");
        assert_eq!(report_filename("15-10-2025"), "report_15_10_2025.json");
    }
}
