use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Url;
use serde::{Deserialize, Serialize};

use super::ids::IdStrategy;
use crate::i18n::LanguageKind;

/// Environment variable overriding the translation API base URL.
pub const ENV_API_BASE: &str = "AGENTE_API_BASE";
/// Environment variable overriding the log level.
pub const ENV_LOG_LEVEL: &str = "AGENTE_LOG_LEVEL";

const DEFAULT_API_PORT: u16 = 4000;

/// Widget settings, read from `config/agente.toml` when it exists.
///
/// The settings are resolved once at startup and passed down explicitly;
/// request code never looks at the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSettings {
    /// Explicit translation API base, e.g. `http://localhost:4000`.
    pub api_base: Option<String>,
    /// Port used when the base is derived from the host origin.
    pub api_port: u16,
    /// Language of every operator-facing string.
    pub language: LanguageKind,
    /// Whether "new tunnel" also wipes the message log.
    pub clear_on_new_tunnel: bool,
    /// Prefix the mock server puts on untranslated replies.
    pub fallback_marker: String,
    /// Delay of the deferred host notification.
    pub notify_delay_secs: u64,
    pub tick_rate_ms: u64,
    pub id_strategy: IdStrategy,
    pub log_level: String,
    pub log_file: PathBuf,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            api_base: None,
            api_port: DEFAULT_API_PORT,
            language: LanguageKind::default(),
            clear_on_new_tunnel: true,
            fallback_marker: String::from("[fallback]"),
            notify_delay_secs: 10,
            tick_rate_ms: 250,
            id_strategy: IdStrategy::default(),
            log_level: String::from("info"),
            log_file: PathBuf::from("logs/agente.log"),
        }
    }
}

impl AgentSettings {
    /// Reads `config/agente.toml` under `workspace_root`, falling back to
    /// defaults when the file is missing.
    pub fn load(workspace_root: &Path) -> Result<Self> {
        let config_path = Self::config_path(workspace_root);
        if !config_path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read settings: {}", config_path.display()))?;
        let parsed: AgentSettings = toml::from_str(&raw)
            .with_context(|| format!("failed to parse settings: {}", config_path.display()))?;
        Ok(parsed)
    }

    pub fn config_path(workspace_root: &Path) -> PathBuf {
        workspace_root.join("config/agente.toml")
    }

    /// Applies environment overrides. `lookup` is `std::env::var` in the binary.
    pub fn apply_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base) = lookup(ENV_API_BASE).filter(|value| !value.trim().is_empty()) {
            self.api_base = Some(base.trim().to_string());
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|value| !value.trim().is_empty()) {
            self.log_level = level.trim().to_string();
        }
        self
    }

    /// Resolves the translation API base.
    ///
    /// Order: explicit `api_base`, then the host origin's hostname with
    /// `api_port`, then localhost.
    pub fn resolve_api_base(&self, origin: Option<&str>) -> String {
        if let Some(base) = self.api_base.as_deref() {
            return base.trim_end_matches('/').to_string();
        }
        if let Some(url) = origin.and_then(|raw| Url::parse(raw).ok())
            && let Some(host) = url.host_str()
        {
            return format!("{}://{}:{}", url.scheme(), host, self.api_port);
        }
        format!("http://localhost:{}", self.api_port)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(10))
    }

    pub fn notify_delay(&self) -> Duration {
        Duration::from_secs(self.notify_delay_secs)
    }
}
