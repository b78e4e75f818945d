use clap::{ArgGroup, Parser};
use ecourts_scraper::config::toml_config::CourtsConfig;
use ecourts_scraper::core::listing::CheckDay;
use ecourts_scraper::utils::logger;
use ecourts_scraper::utils::validation::{validate_court_date, Validate, COURT_DATE_FORMAT};
use ecourts_scraper::{CauseListScraper, LocalStorage};

const EXAMPLES: &str = "\
Examples:
  # Download today's cause lists
  causelist --today

  # Download tomorrow's cause lists
  causelist --tomorrow

  # Download for specific date
  causelist --date 20-10-2025

  # Specify output directory
  causelist --today --output downloads";

#[derive(Parser)]
#[command(name = "causelist")]
#[command(about = "District Court Cause List Scraper - Download daily cause lists as PDFs")]
#[command(after_help = EXAMPLES)]
#[command(group(ArgGroup::new("day").required(true).args(["today", "tomorrow", "date"])))]
struct Args {
    /// Download today's cause lists
    #[arg(long)]
    today: bool,

    /// Download tomorrow's cause lists
    #[arg(long)]
    tomorrow: bool,

    /// Specific date (DD-MM-YYYY format)
    #[arg(long)]
    date: Option<String>,

    /// Output directory
    #[arg(long, default_value = "cause_lists")]
    output: String,

    /// Path to a TOML file listing courts and URL templates
    #[arg(short, long)]
    config: Option<String>,

    /// Seconds to wait between courts (overrides the config file)
    #[arg(long)]
    delay: Option<u64>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn target_date(&self) -> ecourts_scraper::Result<String> {
        if let Some(date) = &self.date {
            validate_court_date("date", date)?;
            return Ok(date.clone());
        }
        let day = if self.tomorrow {
            CheckDay::Tomorrow
        } else {
            CheckDay::Today
        };
        Ok(day.date().format(COURT_DATE_FORMAT).to_string())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    let date = match args.target_date() {
        Ok(date) => date,
        Err(e) => {
            tracing::error!("❌ {}", e);
            eprintln!("❌ Error: Date must be in DD-MM-YYYY format");
            std::process::exit(1);
        }
    };

    // 載入 TOML 配置
    let mut config = match &args.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match CourtsConfig::from_file(path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 Make sure the file exists and is valid TOML format");
                    std::process::exit(1);
                }
            }
        }
        None => CourtsConfig::default(),
    };

    // 應用命令列覆蓋設定
    if let Some(delay) = args.delay {
        config.scraper.delay_seconds = delay;
        tracing::info!("🔧 Delay overridden to: {}s", delay);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let storage = LocalStorage::new(args.output.clone());
    let mut scraper = CauseListScraper::new(storage, &config.scraper)?;

    let outcome = tokio::select! {
        result = scraper.batch_download(&date, &config.courts) => result,
        _ = tokio::signal::ctrl_c() => {
            eprintln!("\n\n⚠️  Process interrupted by user");
            std::process::exit(130);
        }
    };

    let results = match outcome {
        Ok(results) => results,
        Err(e) => {
            tracing::error!("❌ Unexpected error: {}", e);
            eprintln!("\n❌ Unexpected error: {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    println!("\n{}", scraper.summary(&date, &args.output, &results));

    // 根據下載結果決定退出碼
    if scraper.stats().successful_downloads > 0 {
        println!("\n✅ Process completed successfully!");
        Ok(())
    } else {
        println!("\n⚠️  No cause lists were downloaded");
        std::process::exit(1);
    }
}
