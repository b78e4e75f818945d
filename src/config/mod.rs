pub mod cli;
#[cfg(feature = "web")]
pub mod server;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use args::CliConfig;

#[cfg(feature = "cli")]
mod args {
    use crate::core::ecourts::DEFAULT_BASE_URL;
    use crate::core::listing::CheckDay;
    use crate::domain::model::SearchQuery;
    use crate::domain::ports::ConfigProvider;
    use crate::utils::error::{Result, ScraperError};
    use crate::utils::validation::{
        validate_non_empty_string, validate_path, validate_url, Validate,
    };
    use clap::{ArgGroup, Parser};

    const EXAMPLES: &str = "\
Examples:
  # Search by CNR
  ecourts --cnr DLCT01-123456-2024 --state DL --today

  # Search by case number
  ecourts --case-number CS 123 2024 --state DL --dist 01";

    #[derive(Debug, Clone, Parser)]
    #[command(name = "ecourts")]
    #[command(about = "Fetch court listings from eCourts India")]
    #[command(after_help = EXAMPLES)]
    #[command(group(ArgGroup::new("search").required(true).args(["cnr", "case_number"])))]
    #[command(group(ArgGroup::new("day").args(["today", "tomorrow"])))]
    pub struct CliConfig {
        /// CNR number of the case
        #[arg(long)]
        pub cnr: Option<String>,

        /// Case type, number, and year
        #[arg(long, num_args = 3, value_names = ["TYPE", "NO", "YEAR"])]
        pub case_number: Option<Vec<String>>,

        /// State code (e.g., DL)
        #[arg(long)]
        pub state: String,

        /// District code
        #[arg(long)]
        pub dist: Option<String>,

        /// Check if listed today
        #[arg(long)]
        pub today: bool,

        /// Check if listed tomorrow
        #[arg(long)]
        pub tomorrow: bool,

        /// Download case PDF
        #[arg(long)]
        pub download_pdf: bool,

        /// Download cause list (needs --dist and --court)
        #[arg(long)]
        pub causelist: bool,

        /// Court code
        #[arg(long)]
        pub court: Option<String>,

        /// Results file
        #[arg(long, default_value = "results.json")]
        pub output: String,

        /// Download directory
        #[arg(long, default_value = "downloads")]
        pub output_dir: String,

        #[arg(long, default_value = DEFAULT_BASE_URL)]
        pub base_url: String,

        /// Keep the raw HTML responses in the download directory
        #[arg(long)]
        pub save_debug_html: bool,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl CliConfig {
        pub fn query(&self) -> Result<SearchQuery> {
            if let Some(cnr) = &self.cnr {
                return Ok(SearchQuery::Cnr { cnr: cnr.clone() });
            }
            match self.case_number.as_deref() {
                Some([case_type, case_number, case_year]) => Ok(SearchQuery::CaseNumber {
                    case_type: case_type.clone(),
                    case_number: case_number.clone(),
                    case_year: case_year.clone(),
                }),
                _ => Err(ScraperError::MissingConfigError {
                    field: "--cnr or --case-number".to_string(),
                }),
            }
        }

        pub fn check_day(&self) -> Option<CheckDay> {
            if self.tomorrow {
                Some(CheckDay::Tomorrow)
            } else if self.today {
                Some(CheckDay::Today)
            } else {
                None
            }
        }

        /// Both codes are needed to address a court's cause list.
        pub fn cause_list_target(&self) -> Option<(&str, &str)> {
            if !self.causelist {
                return None;
            }
            Some((self.dist.as_deref()?, self.court.as_deref()?))
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_url("base_url", &self.base_url)?;
            validate_path("output", &self.output)?;
            validate_path("output_dir", &self.output_dir)?;
            validate_non_empty_string("state", &self.state)?;

            if let SearchQuery::CaseNumber { .. } = self.query()? {
                if self.dist.as_deref().map_or(true, |d| d.trim().is_empty()) {
                    return Err(ScraperError::ConfigValidationError {
                        field: "dist".to_string(),
                        message: "--dist is required for case number search".to_string(),
                    });
                }
            }

            Ok(())
        }
    }

    impl ConfigProvider for CliConfig {
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

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_cnr_search() {
            let config =
                CliConfig::try_parse_from(["ecourts", "--cnr", "DLCT01-123456-2024", "--state", "DL", "--today"])
                    .unwrap();

            assert!(config.validate().is_ok());
            assert_eq!(
                config.query().unwrap(),
                SearchQuery::Cnr {
                    cnr: "DLCT01-123456-2024".to_string()
                }
            );
            assert_eq!(config.check_day(), Some(CheckDay::Today));
            assert_eq!(config.output, "results.json");
            assert_eq!(config.output_dir, "downloads");
        }

        #[test]
        fn test_case_number_requires_district() {
            let config = CliConfig::try_parse_from([
                "ecourts",
                "--case-number",
                "CS",
                "123",
                "2024",
                "--state",
                "DL",
            ])
            .unwrap();

            let err = config.validate().unwrap_err();
            assert!(matches!(err, ScraperError::ConfigValidationError { ref field, .. } if field == "dist"));
        }

        #[test]
        fn test_search_flags_are_exclusive_and_required() {
            assert!(CliConfig::try_parse_from(["ecourts", "--state", "DL"]).is_err());
            assert!(CliConfig::try_parse_from([
                "ecourts",
                "--cnr",
                "X",
                "--case-number",
                "CS",
                "1",
                "2024",
                "--state",
                "DL"
            ])
            .is_err());
            assert!(CliConfig::try_parse_from([
                "ecourts", "--cnr", "X", "--state", "DL", "--today", "--tomorrow"
            ])
            .is_err());
        }

        #[test]
        fn test_cause_list_target_needs_all_flags() {
            let config = CliConfig::try_parse_from([
                "ecourts", "--cnr", "X", "--state", "DL", "--causelist", "--dist", "01",
            ])
            .unwrap();
            assert_eq!(config.cause_list_target(), None);

            let config = CliConfig::try_parse_from([
                "ecourts", "--cnr", "X", "--state", "DL", "--causelist", "--dist", "01", "--court", "3",
            ])
            .unwrap();
            assert_eq!(config.cause_list_target(), Some(("01", "3")));
        }
    }
}
