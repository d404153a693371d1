mod platform;

use std::path::PathBuf;

use log::LevelFilter;

fn main() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(platform::config::DEFAULT_CONFIG_PATH));
    let config = platform::config::load(&config_path)?;

    scout_logging::initialize(config.log, LevelFilter::Info, &config.log_path);
    platform::run_app(config)
}
