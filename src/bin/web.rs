use anyhow::Context;
use clap::Parser;
use ecourts_scraper::config::server::ServerConfig;
use ecourts_scraper::utils::{logger, validation::Validate};
use ecourts_scraper::web::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();

    // 初始化日誌
    logger::init_server_logger(config.json_logs);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    std::fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("creating output directory {}", config.output_dir))?;

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("binding {}", address))?;

    tracing::info!("🚀 eCourts web interface listening on http://{}", address);
    tracing::info!("📁 Downloads served from: {}", config.output_dir);

    axum::serve(listener, router(AppState::new(config)))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("🛑 Shutting down");
        })
        .await
        .context("server error")?;

    Ok(())
}
