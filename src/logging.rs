//! File logging. The terminal belongs to the UI, so nothing is logged there.

use std::path::Path;

use anyhow::{Context, Result};
use log::LevelFilter;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

use crate::agent::AgentSettings;

/// Optional log4rs configuration, relative to the workspace root.
pub const LOG_CONFIG_FILE: &str = "config/log4rs.yaml";

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} {l:<5} {t} - {m}{n}";

/// Installs the global logger.
///
/// `config/log4rs.yaml` wins when present; otherwise everything at
/// `settings.log_level` and above goes to `settings.log_file`.
pub fn init(workspace_root: &Path, settings: &AgentSettings) -> Result<()> {
    let yaml = workspace_root.join(LOG_CONFIG_FILE);
    if yaml.is_file() {
        log4rs::init_file(&yaml, Default::default())
            .with_context(|| format!("failed to load logging config: {}", yaml.display()))?;
        return Ok(());
    }

    let config = file_config(&workspace_root.join(&settings.log_file), &settings.log_level)?;
    log4rs::init_config(config).context("logger already installed")?;
    Ok(())
}

fn file_config(log_file: &Path, level: &str) -> Result<Config> {
    let level = parse_level(level);
    let appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(log_file)
        .with_context(|| format!("failed to open log file: {}", log_file.display()))?;
    Config::builder()
        .appender(Appender::builder().build("file", Box::new(appender)))
        .build(Root::builder().appender("file").build(level))
        .context("invalid logging configuration")
}

/// Unknown levels fall back to `info`.
fn parse_level(raw: &str) -> LevelFilter {
    raw.trim().parse().unwrap_or(LevelFilter::Info)
}
