pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "web")]
pub mod web;

pub use config::cli::LocalStorage;
#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use core::{district::CauseListScraper, ecourts::ECourtsScraper};
pub use utils::error::{Result, ScraperError};
