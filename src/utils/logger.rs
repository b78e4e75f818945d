use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// The library and every binary log under their own crate names.
const LOG_TARGETS: [&str; 4] = ["ecourts_scraper", "ecourts", "causelist", "ecourts_web"];

fn crate_directives(level: &str) -> String {
    LOG_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",")
}

fn cli_directives(verbose: bool) -> String {
    if verbose {
        format!("{},info", crate_directives("debug"))
    } else {
        crate_directives("info")
    }
}

fn server_directives() -> String {
    format!("{},tower_http=info", crate_directives("info"))
}

pub fn init_cli_logger(verbose: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli_directives(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

pub fn init_server_logger(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(server_directives()));

    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .json(), // one object per line for log shippers
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .compact(),
            )
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    /// Which of: ecourts info, causelist info, ecourts_web info, library debug, hyper info.
    fn enabled_under(directives: &str) -> [bool; 5] {
        let subscriber = tracing_subscriber::registry().with(EnvFilter::new(directives));
        tracing::subscriber::with_default(subscriber, || {
            [
                tracing::enabled!(target: "ecourts", Level::INFO),
                tracing::enabled!(target: "causelist", Level::INFO),
                tracing::enabled!(target: "ecourts_web", Level::INFO),
                tracing::enabled!(target: "ecourts_scraper::core::ecourts", Level::DEBUG),
                tracing::enabled!(target: "hyper::proto", Level::INFO),
            ]
        })
    }

    #[test]
    fn test_cli_filter_keeps_binary_logs() {
        assert_eq!(
            enabled_under(&cli_directives(false)),
            [true, true, true, false, false]
        );
        assert_eq!(
            enabled_under(&cli_directives(true)),
            [true, true, true, true, true]
        );
    }

    #[test]
    fn test_server_filter_keeps_startup_logs() {
        assert_eq!(
            enabled_under(&server_directives()),
            [true, true, true, false, false]
        );
    }
}
