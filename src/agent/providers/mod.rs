//! Backends able to translate a chat message.
//!
//! The chat controller only sees the `Translator` trait; the HTTP client in
//! `http` is the production implementation.

/// `http` talks to the translation mock server over JSON/HTTP.
pub mod http;

use async_trait::async_trait;

use crate::agent::TranslateResponse;

/// Failures of a single translation request. None of them is retried.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    /// The server answered outside the 2xx range.
    #[error("API {status}: {status_text}")]
    Http { status: u16, status_text: String },
    /// The request never got a response.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    /// The server answered 2xx with a body that is not a translation.
    #[error("invalid translation response: {0}")]
    Decode(String),
}

#[async_trait]
pub trait Translator: Send + Sync {
    /// Name of the backend, shown in the status bar and logs.
    fn name(&self) -> &str;

    /// Translates `text`, tagging the request with `tunnel_id`.
    async fn translate(
        &self,
        text: &str,
        tunnel_id: &str,
    ) -> Result<TranslateResponse, TranslateError>;
}
