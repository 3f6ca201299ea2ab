//! The contract with the embedding host.
//!
//! The host hands the widget a configuration value that it never mutates:
//! an access token, the operator identity and, optionally, an endpoint the
//! widget may call to notify the host.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::{debug, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// The only token that unlocks the chat screen.
pub const ACCESS_TOKEN: &str = "NICORIVERA";

/// Environment variable naming the host configuration file.
pub const ENV_HOST_CONFIG: &str = "AGENTE_HOST_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostUser {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostAuth {
    #[serde(default)]
    pub user: Option<HostUser>,
}

/// Configuration supplied by the host shell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostConfig {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<HostUser>,
    #[serde(default)]
    pub auth: Option<HostAuth>,
    /// Endpoint backing the host's `notify` capability.
    #[serde(default)]
    pub notify_url: Option<String>,
    /// Origin of the host shell, used to derive the API base.
    #[serde(default)]
    pub origin: Option<String>,
}

impl HostConfig {
    /// Reads a JSON or YAML host configuration, picked by file extension.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read host config: {}", path.display()))?;
        let is_yaml = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("yaml") | Some("yml")
        );
        let config = if is_yaml {
            serde_yaml::from_str(&raw)
                .with_context(|| format!("failed to parse host config: {}", path.display()))?
        } else {
            serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse host config: {}", path.display()))?
        };
        Ok(config)
    }

    /// Display name of the operator: `auth.user.name`, then `user.name`.
    pub fn user_name(&self) -> Option<&str> {
        self.auth
            .as_ref()
            .and_then(|auth| auth.user.as_ref())
            .or(self.user.as_ref())
            .map(|user| user.name.as_str())
    }

    /// Copy of this configuration carrying a different token.
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..self.clone()
        }
    }

    /// Materializes the host's `notify` capability, if the host offers one.
    pub fn notifier(&self) -> Option<Arc<dyn HostNotifier>> {
        self.notify_url
            .as_ref()
            .filter(|url| !url.trim().is_empty())
            .map(|url| Arc::new(HttpNotifier::new(url.trim())) as Arc<dyn HostNotifier>)
    }
}

/// Why the gate refused the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GateRejection {
    #[error("no host configuration was provided")]
    MissingConfig,
    #[error("the host configuration has no token")]
    MissingToken,
    #[error("the host token is not valid")]
    InvalidToken,
}

/// Checks the host token. Exact, case-sensitive comparison.
pub fn validate(config: Option<&HostConfig>) -> Result<(), GateRejection> {
    let config = config.ok_or(GateRejection::MissingConfig)?;
    match config.token.as_deref() {
        None => Err(GateRejection::MissingToken),
        Some(ACCESS_TOKEN) => Ok(()),
        Some(_) => Err(GateRejection::InvalidToken),
    }
}

/// Options passed through to the host untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// A capability owned by the host. The widget only invokes it.
pub trait HostNotifier: Send + Sync {
    /// Fire-and-forget notification.
    fn notify(&self, message: &str, options: Option<NotifyOptions>);
}

#[derive(Serialize)]
struct NotifyPayload<'a> {
    message: &'a str,
    #[serde(flatten)]
    options: NotifyOptions,
}

/// Posts notifications as JSON to the host's notify endpoint.
pub struct HttpNotifier {
    url: String,
    client: Client,
}

impl HttpNotifier {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: Client::new(),
        }
    }
}

impl HostNotifier for HttpNotifier {
    fn notify(&self, message: &str, options: Option<NotifyOptions>) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("No async runtime, dropping host notification: {}", message);
            return;
        };
        let client = self.client.clone();
        let url = self.url.clone();
        let message = message.to_string();
        runtime.spawn(async move {
            let payload = NotifyPayload {
                message: &message,
                options: options.unwrap_or_default(),
            };
            match client.post(&url).json(&payload).send().await {
                Ok(response) if response.status().is_success() => {
                    debug!("Host notified at {}", url);
                }
                Ok(response) => warn!("Host notify returned {}", response.status()),
                Err(err) => warn!("Host notify failed: {}", err),
            }
        });
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::{HostNotifier, NotifyOptions};

    /// Notifier that records every call.
    #[derive(Default)]
    pub(crate) struct RecordingNotifier {
        pub calls: Mutex<Vec<(String, Option<NotifyOptions>)>>,
    }

    impl RecordingNotifier {
        pub(crate) fn calls(&self) -> Vec<(String, Option<NotifyOptions>)> {
            self.calls.lock().expect("lock").clone()
        }
    }

    impl HostNotifier for RecordingNotifier {
        fn notify(&self, message: &str, options: Option<NotifyOptions>) {
            self.calls
                .lock()
                .expect("lock")
                .push((message.to_string(), options));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_token(token: Option<&str>) -> HostConfig {
        HostConfig {
            token: token.map(str::to_string),
            ..HostConfig::default()
        }
    }

    #[test]
    fn gate_accepts_only_the_exact_token() {
        assert_eq!(validate(Some(&config_with_token(Some(ACCESS_TOKEN)))), Ok(()));
        assert_eq!(
            validate(Some(&config_with_token(Some("nicorivera")))),
            Err(GateRejection::InvalidToken)
        );
        assert_eq!(
            validate(Some(&config_with_token(Some(" NICORIVERA")))),
            Err(GateRejection::InvalidToken)
        );
        assert_eq!(
            validate(Some(&config_with_token(None))),
            Err(GateRejection::MissingToken)
        );
        assert_eq!(validate(None), Err(GateRejection::MissingConfig));
    }

    #[test]
    fn auth_user_name_takes_precedence() {
        let config = HostConfig {
            user: Some(HostUser { name: "Plain".into() }),
            auth: Some(HostAuth {
                user: Some(HostUser { name: "Auth".into() }),
            }),
            ..HostConfig::default()
        };
        assert_eq!(config.user_name(), Some("Auth"));

        let config = HostConfig {
            user: Some(HostUser { name: "Plain".into() }),
            auth: Some(HostAuth { user: None }),
            ..HostConfig::default()
        };
        assert_eq!(config.user_name(), Some("Plain"));
        assert_eq!(HostConfig::default().user_name(), None);
    }

    #[test]
    fn with_token_keeps_identity() {
        let config = HostConfig {
            user: Some(HostUser { name: "Nico".into() }),
            ..HostConfig::default()
        };
        let updated = config.with_token(ACCESS_TOKEN);
        assert_eq!(updated.user_name(), Some("Nico"));
        assert_eq!(updated.token.as_deref(), Some(ACCESS_TOKEN));
    }

    #[test]
    fn loads_json_and_yaml() {
        let dir = tempfile::tempdir().expect("tempdir");
        let json_path = dir.path().join("host.json");
        fs::write(
            &json_path,
            r#"{"token":"NICORIVERA","user":{"name":"Nico"},"notify_url":"http://localhost:5173/notify"}"#,
        )
        .expect("write json");
        let json = HostConfig::load(&json_path).expect("json");
        assert_eq!(json.token.as_deref(), Some(ACCESS_TOKEN));
        assert!(json.notifier().is_some());

        let yaml_path = dir.path().join("host.yaml");
        fs::write(&yaml_path, "token: other\nauth:\n  user:\n    name: Ana\n").expect("write yaml");
        let yaml = HostConfig::load(&yaml_path).expect("yaml");
        assert_eq!(yaml.user_name(), Some("Ana"));
        assert!(yaml.notifier().is_none());
        assert_eq!(validate(Some(&yaml)), Err(GateRejection::InvalidToken));
    }

    #[test]
    fn notify_payload_flattens_options() {
        let payload = NotifyPayload {
            message: "hola",
            options: NotifyOptions {
                title: Some("Agente (delay)".into()),
                target: Some("agente".into()),
            },
        };
        let value = serde_json::to_value(&payload).expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({"message": "hola", "title": "Agente (delay)", "target": "agente"})
        );
    }
}
