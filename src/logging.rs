//! Logger setup for the command line tools

use std::sync::Once;

/// Logger configuration.
///
/// `filter` follows the `env_logger` filter syntax (e.g. "debug",
/// "maze_carver=trace") and wins over everything else. Each `verbose` step
/// raises the level of this crate only (info, debug, trace); other crates
/// stay at warn. With neither set, `RUST_LOG` is consulted.
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    pub filter: Option<String>,
    pub verbose: u8,
}

impl LoggingConfig {
    /// Filter directives to hand to `env_logger`
    fn directives(&self, rust_log: Option<String>) -> String {
        if let Some(filter) = &self.filter {
            return filter.clone();
        }
        let level = match self.verbose {
            0 => return rust_log.unwrap_or_else(|| "warn".to_string()),
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        format!("warn,{}={}", env!("CARGO_CRATE_NAME"), level)
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
///
/// Output goes to stderr without timestamps, so mazes printed on stdout
/// stay clean and log lines stay short.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let directives = config.directives(std::env::var("RUST_LOG").ok());

        env_logger::Builder::new()
            .parse_filters(&directives)
            .format_timestamp(None)
            .target(env_logger::Target::Stderr)
            .init();

        log::debug!("logging initialized with `{}`", directives);
    });
}

#[cfg(test)]
mod tests {
    use crate::logging::LoggingConfig;

    #[test]
    fn explicit_filter_wins() {
        let config = LoggingConfig {
            filter: Some("petgraph=info".to_string()),
            verbose: 3,
        };
        assert_eq!(
            config.directives(Some("error".to_string())),
            "petgraph=info"
        );
    }

    #[test]
    fn verbosity_raises_crate_level_only() {
        let levels = (1..=4)
            .map(|verbose| {
                LoggingConfig {
                    filter: None,
                    verbose,
                }
                .directives(Some("error".to_string()))
            })
            .collect::<Vec<_>>();
        assert_eq!(
            levels,
            [
                "warn,maze_carver=info",
                "warn,maze_carver=debug",
                "warn,maze_carver=trace",
                "warn,maze_carver=trace"
            ]
        );
    }

    #[test]
    fn falls_back_to_rust_log_then_warn() {
        let config = LoggingConfig::default();
        assert_eq!(config.directives(Some("debug".to_string())), "debug");
        assert_eq!(config.directives(None), "warn");
    }
}
