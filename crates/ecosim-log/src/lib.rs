//! Structured logging for the world generator.
//!
//! Console output with uptime timestamps and module paths, plus JSON file
//! logging in debug builds. The level comes from `RUST_LOG` when set, else
//! from the config's `debug.log_level`.

use std::fs::File;
use std::path::Path;

use ecosim_config::Config;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config set one.
pub const DEFAULT_FILTER: &str = "info";

/// Name of the JSON log written in debug builds.
pub const LOG_FILE_NAME: &str = "ecosim.log";

/// Filter directives taken from `config`, falling back to [`DEFAULT_FILTER`].
pub fn filter_directives(config: Option<&Config>) -> &str {
    match config {
        Some(config) if !config.debug.log_level.trim().is_empty() => &config.debug.log_level,
        _ => DEFAULT_FILTER,
    }
}

/// Install the global tracing subscriber.
///
/// * `log_dir` - directory for [`LOG_FILE_NAME`]; only used when `debug_build`
/// * `debug_build` - enables the JSON file layer
/// * `config` - source of the log level when `RUST_LOG` is unset
///
/// Must be called at most once per process.
///
/// ```no_run
/// use ecosim_config::Config;
/// use ecosim_log::init_logging;
///
/// let config = Config::default();
/// init_logging(Some(std::path::Path::new("./logs")), true, Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(config)));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_names(true) // worldgen workers are named
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = File::create(log_dir.join(LOG_FILE_NAME))
    {
        subscriber.with(json_file_layer(log_file)).init();
        return;
    }

    subscriber.init();
}

/// One JSON object per line, no ANSI codes.
fn json_file_layer<S>(log_file: File) -> impl Layer<S>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_timer(fmt::time::uptime())
        .json()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_from_config() {
        assert_eq!(filter_directives(None), "info");

        let mut config = Config::default();
        assert_eq!(filter_directives(Some(&config)), "info");

        config.debug.log_level = "debug,ecosim_terrain=trace".to_string();
        assert_eq!(filter_directives(Some(&config)), "debug,ecosim_terrain=trace");

        config.debug.log_level = "  ".to_string();
        assert_eq!(filter_directives(Some(&config)), DEFAULT_FILTER);
    }

    #[test]
    fn test_env_filter_parsing() {
        for directives in [
            "info",
            "debug,ecosim_terrain=trace",
            "warn,ecosim_worldgen=debug,ecosim_config=info",
            "error",
        ] {
            let filter = EnvFilter::try_new(directives);
            assert!(filter.is_ok(), "failed to parse filter: {directives}");
        }
        let filter = EnvFilter::new("info,ecosim_terrain=debug");
        assert!(format!("{filter}").contains("ecosim_terrain=debug"));
    }

    #[test]
    fn test_json_file_layer_writes_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOG_FILE_NAME);
        let file = File::create(&path).unwrap();

        let subscriber = tracing_subscriber::registry().with(json_file_layer(file));
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(seed = 7_u64, cells = 960_u64, "generated world");
            tracing::debug!("second line");
        });

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<serde_json::Value> = contents
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["level"], "INFO");
        assert_eq!(lines[0]["fields"]["message"], "generated world");
        assert_eq!(lines[0]["fields"]["seed"], 7);
        assert_eq!(lines[0]["fields"]["cells"], 960);
        assert_eq!(lines[1]["level"], "DEBUG");
        assert!(lines[0]["target"].as_str().unwrap().starts_with("ecosim_log"));
    }
}
