use crate::core::ecourts::DEFAULT_BASE_URL;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_url, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "ecourts-web")]
#[command(about = "Web interface for the eCourts scraper")]
pub struct ServerConfig {
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, default_value = "3000")]
    pub port: u16,

    /// Directory for downloaded PDFs and cause lists
    #[arg(long, default_value = "downloads")]
    pub output_dir: String,

    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[arg(long)]
    pub save_debug_html: bool,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            output_dir: "downloads".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            json_logs: false,
            save_debug_html: false,
        }
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        validate_path("output_dir", &self.output_dir)
    }
}

impl ConfigProvider for ServerConfig {
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
