use crate::domain::model::{CaseInfo, ListingInfo};
use chrono::{Days, Local, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// Hearing dates appear in any of these formats on court pages.
const HEARING_DATE_FORMATS: [&str; 3] = ["%d-%m-%Y", "%d/%m/%Y", "%Y-%m-%d"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckDay {
    Today,
    Tomorrow,
}

impl CheckDay {
    pub fn resolve(self, today: NaiveDate) -> NaiveDate {
        match self {
            CheckDay::Today => today,
            CheckDay::Tomorrow => today.checked_add_days(Days::new(1)).unwrap_or(today),
        }
    }

    pub fn date(self) -> NaiveDate {
        self.resolve(Local::now().date_naive())
    }
}

impl fmt::Display for CheckDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckDay::Today => write!(f, "today"),
            CheckDay::Tomorrow => write!(f, "tomorrow"),
        }
    }
}

impl FromStr for CheckDay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "today" => Ok(CheckDay::Today),
            "tomorrow" => Ok(CheckDay::Tomorrow),
            other => Err(format!(
                "Invalid check date '{}': expected 'today' or 'tomorrow'",
                other
            )),
        }
    }
}

pub fn parse_hearing_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    HEARING_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

/// Whether the case's next hearing falls on `target`.
pub fn check_listing_on(case: &CaseInfo, target: NaiveDate) -> ListingInfo {
    let is_listed = match case.next_hearing_date.as_deref() {
        Some(raw) => match parse_hearing_date(raw) {
            Some(hearing) => hearing == target,
            None => {
                tracing::warn!("⚠️  Could not parse hearing date: {}", raw);
                false
            }
        },
        None => false,
    };

    ListingInfo {
        check_date: target,
        is_listed,
        serial_number: case.serial_number.clone(),
        court_name: case.court_name.clone(),
        case_id: case.case_id.clone(),
        hearing_date: case.next_hearing_date.clone(),
    }
}

pub fn check_listing(case: &CaseInfo, day: CheckDay) -> ListingInfo {
    let listing = check_listing_on(case, day.date());
    if listing.is_listed {
        tracing::info!("✓ Case is listed for {}", day);
    }
    listing
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn case_with_hearing(hearing: Option<&str>) -> CaseInfo {
        let mut case = CaseInfo::new("CS/123/2024");
        case.found = true;
        case.court_name = Some("Rohini Courts".to_string());
        case.serial_number = Some("7".to_string());
        case.next_hearing_date = hearing.map(str::to_string);
        case
    }

    #[test]
    fn test_parse_hearing_date_formats() {
        assert_eq!(parse_hearing_date("20-10-2025"), Some(date(2025, 10, 20)));
        assert_eq!(parse_hearing_date("20/10/2025"), Some(date(2025, 10, 20)));
        assert_eq!(parse_hearing_date("2025-10-20"), Some(date(2025, 10, 20)));
        assert_eq!(parse_hearing_date(" 20-10-2025 "), Some(date(2025, 10, 20)));
        assert_eq!(parse_hearing_date("20th October 2025"), None);
    }

    #[test]
    fn test_listed_on_matching_date() {
        let case = case_with_hearing(Some("21/10/2025"));
        let listing = check_listing_on(&case, date(2025, 10, 21));

        assert!(listing.is_listed);
        assert_eq!(listing.serial_number.as_deref(), Some("7"));
        assert_eq!(listing.court_name.as_deref(), Some("Rohini Courts"));
        assert_eq!(listing.case_id, "CS/123/2024");
        assert_eq!(listing.hearing_date.as_deref(), Some("21/10/2025"));
    }

    #[test]
    fn test_not_listed_on_other_date_or_garbage() {
        let case = case_with_hearing(Some("21-10-2025"));
        assert!(!check_listing_on(&case, date(2025, 10, 20)).is_listed);

        let case = case_with_hearing(Some("to be fixed"));
        assert!(!check_listing_on(&case, date(2025, 10, 20)).is_listed);

        let case = case_with_hearing(None);
        assert!(!check_listing_on(&case, date(2025, 10, 20)).is_listed);
    }

    #[test]
    fn test_check_day_resolution() {
        let today = date(2025, 12, 31);
        assert_eq!(CheckDay::Today.resolve(today), today);
        assert_eq!(CheckDay::Tomorrow.resolve(today), date(2026, 1, 1));
    }

    #[test]
    fn test_check_day_parsing() {
        assert_eq!("today".parse::<CheckDay>(), Ok(CheckDay::Today));
        assert_eq!("Tomorrow".parse::<CheckDay>(), Ok(CheckDay::Tomorrow));
        assert!("yesterday".parse::<CheckDay>().is_err());

        for day in [CheckDay::Today, CheckDay::Tomorrow] {
            assert_eq!(day.to_string().parse::<CheckDay>(), Ok(day));
        }
    }

    #[test]
    fn test_listing_serializes_iso_date() {
        let case = case_with_hearing(None);
        let json = serde_json::to_value(check_listing_on(&case, date(2025, 10, 20))).unwrap();
        assert_eq!(json["check_date"], "2025-10-20");
        assert_eq!(json["is_listed"], false);
    }
}
