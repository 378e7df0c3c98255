//! Tracing subscriber initialisation.

use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Installs the global tracing subscriber.
///
/// Uses `config.log_level` as the filter (falling back to `info` if it does not
/// parse) and `config.log_format` to choose between text and JSON lines. Output goes
/// to stderr so command output on stdout stays clean.
pub fn init(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
