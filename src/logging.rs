use tracing::debug;

use crate::config::Config;

/// Install the global fmt subscriber. Logs go to stderr so stdout only
/// carries command output.
pub fn init_logging(config: &Config) {
    let log_level = config.log_level;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_max_level(log_level)
        .init();

    debug!("Logging initialized at level: {}", log_level);
}
