use clap::Parser;
use ecourts_scraper::core::ecourts::save_results;
use ecourts_scraper::core::listing::check_listing;
use ecourts_scraper::domain::model::{
    CaseInfo, DownloadKind, DownloadRecord, ListingInfo, ResultsReport, SearchQuery,
};
use ecourts_scraper::utils::error::ErrorSeverity;
use ecourts_scraper::utils::{logger, validation::Validate};
use ecourts_scraper::{CliConfig, ECourtsScraper, LocalStorage};

fn rule() -> String {
    "=".repeat(70)
}

fn print_case(case_info: &CaseInfo) {
    println!("\n{}", rule());
    println!("📋 CASE INFORMATION");
    println!("{}", rule());
    println!("Case ID: {}", case_info.case_id);
    println!(
        "Found: {}",
        if case_info.found { "✓ Yes" } else { "✗ No" }
    );

    let fields = [
        ("Error", &case_info.error),
        ("Court", &case_info.court_name),
        ("Serial", &case_info.serial_number),
        ("Parties", &case_info.party_names),
        ("Status", &case_info.case_status),
        ("Next Hearing", &case_info.next_hearing_date),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            println!("{}: {}", label, value);
        }
    }
}

fn print_listing(day: &str, listing: &ListingInfo) {
    println!("\n📅 LISTING STATUS - {}", day.to_uppercase());
    println!("{}", rule());
    println!("Date: {}", listing.check_date);
    println!(
        "Listed: {}",
        if listing.is_listed { "✓ Yes" } else { "✗ No" }
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting ecourts CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let query = config.query()?;
    let check_day = config.check_day();
    let cause_list_target = config
        .cause_list_target()
        .map(|(dist, court)| (dist.to_string(), court.to_string()));
    let state_code = config.state.clone();
    let dist = config.dist.clone().unwrap_or_default();
    let output = config.output.clone();
    let download_pdf = config.download_pdf;

    println!("{}", rule());
    println!("⚖️  eCourts Scraper");
    println!("{}", rule());

    let storage = LocalStorage::new(config.output_dir.clone());
    let scraper = ECourtsScraper::new(storage, config)?;
    let mut report = ResultsReport::new(query.clone());

    // 查詢案件
    let case_info = match &query {
        SearchQuery::Cnr { cnr } => scraper.search_by_cnr(&state_code, cnr).await,
        SearchQuery::CaseNumber {
            case_type,
            case_number,
            case_year,
        } => {
            scraper
                .search_by_case_number(&state_code, &dist, case_type, case_number, case_year)
                .await
        }
    };
    print_case(&case_info);

    if let Some(day) = check_day {
        let listing = check_listing(&case_info, day);
        print_listing(&day.to_string(), &listing);
        report.listing_info = Some(listing);
    }

    // 下載檔案
    if download_pdf && case_info.found {
        match scraper.download_case_pdf(&case_info.case_id).await {
            Ok(file) => report.downloads.push(DownloadRecord {
                kind: DownloadKind::CasePdf,
                file,
            }),
            Err(e) => {
                tracing::warn!("❌ PDF download failed: {}", e);
                eprintln!("⚠️  {}", e.user_friendly_message());
            }
        }
    }

    if let Some((dist, court)) = &cause_list_target {
        match scraper
            .download_cause_list(&state_code, dist, court, None)
            .await
        {
            Ok(file) => report.downloads.push(DownloadRecord {
                kind: DownloadKind::CauseList,
                file,
            }),
            Err(e) => {
                tracing::warn!("❌ Cause list download failed: {}", e);
                eprintln!("⚠️  {}", e.user_friendly_message());
            }
        }
    }

    report.case_info = Some(case_info);

    // 儲存結果
    match save_results(&report, &output) {
        Ok(()) => {
            println!("\n{}", rule());
            println!("✓ Process completed!");
            println!("📁 Results saved to: {}", output);
        }
        Err(e) => {
            tracing::error!(
                "❌ Saving results failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
