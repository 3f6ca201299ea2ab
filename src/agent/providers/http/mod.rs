use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;

use crate::agent::TranslateResponse;

use super::{TranslateError, Translator};

mod models;

/// Header correlating every request of a chat session on the server side.
pub const TUNNEL_HEADER: &str = "x-tunnel-id";

/// `Translator` backed by `POST {api_base}/translate`.
#[derive(Clone)]
pub struct HttpTranslator {
    endpoint: String,
    client: Client,
}

impl HttpTranslator {
    /// `api_base` is resolved once at startup and never re-read.
    pub fn new(api_base: &str) -> Self {
        Self {
            endpoint: format!("{}/translate", api_base.trim_end_matches('/')),
            client: Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    fn name(&self) -> &str {
        "HTTP"
    }

    async fn translate(
        &self,
        text: &str,
        tunnel_id: &str,
    ) -> Result<TranslateResponse, TranslateError> {
        let payload = models::TranslatePayload { text };
        let headers = build_headers(tunnel_id);
        debug!("POST {} (tunnel {})", self.endpoint, tunnel_id);

        let response = self
            .client
            .post(&self.endpoint)
            .headers(headers)
            .json(&payload)
            .send()
            .await
            .map_err(TranslateError::Network)?;

        let status = response.status();
        if !status.is_success() {
            warn!("Translation request failed with {}", status);
            return Err(TranslateError::Http {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        response
            .json::<TranslateResponse>()
            .await
            .map_err(|err| TranslateError::Decode(err.to_string()))
    }
}

fn build_headers(tunnel_id: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    // Ids are generated locally, but an unrepresentable value must not abort the send.
    match HeaderValue::from_str(tunnel_id) {
        Ok(value) => {
            headers.insert(TUNNEL_HEADER, value);
        }
        Err(err) => warn!("Tunnel id is not a valid header value: {}", err),
    }
    headers
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    use super::*;

    /// Serves exactly one canned response and hands back the raw request.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub server");
        let base = format!("http://{}", listener.local_addr().expect("local addr"));
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("accept");
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.expect("write response");
            socket.shutdown().await.ok();
            request
        });
        (base, handle)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let read = socket.read(&mut chunk).await.expect("read request");
            if read == 0 {
                break;
            }
            buffer.extend_from_slice(&chunk[..read]);
            let text = String::from_utf8_lossy(&buffer);
            if let Some(split) = text.find("\r\n\r\n") {
                let content_length = text[..split]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buffer.len() >= split + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buffer).into_owned()
    }

    #[tokio::test]
    async fn posts_text_with_tunnel_header() {
        let (base, server) = serve_once("200 OK", r#"{"translated":"hello","lang":"en"}"#).await;
        let translator = HttpTranslator::new(&base);

        let response = translator.translate("hola", "tunnel-123").await.expect("translated");
        assert_eq!(response, TranslateResponse::new("hello", "en"));

        let request = server.await.expect("server task");
        let lower = request.to_lowercase();
        assert!(request.starts_with("POST /translate HTTP/1.1"));
        assert!(lower.contains("x-tunnel-id: tunnel-123"));
        assert!(lower.contains("content-type: application/json"));
        assert!(request.ends_with(r#"{"text":"hola"}"#));
    }

    #[tokio::test]
    async fn non_success_status_carries_code_and_reason() {
        let (base, server) = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#).await;
        let translator = HttpTranslator::new(&base);

        let err = translator.translate("hola", "t").await.expect_err("http error");
        match &err {
            TranslateError::Http { status, status_text } => {
                assert_eq!(*status, 500);
                assert_eq!(status_text, "Internal Server Error");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.to_string(), "API 500: Internal Server Error");
        server.await.expect("server task");
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let (base, server) = serve_once("200 OK", r#"{"unexpected":true}"#).await;
        let translator = HttpTranslator::new(&base);

        let err = translator.translate("hola", "t").await.expect_err("decode error");
        assert!(matches!(err, TranslateError::Decode(_)));
        server.await.expect("server task");
    }

    #[tokio::test]
    async fn unreachable_server_is_a_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let base = format!("http://{}", listener.local_addr().expect("local addr"));
        drop(listener);

        let translator = HttpTranslator::new(&base);
        let err = translator.translate("hola", "t").await.expect_err("network error");
        assert!(matches!(err, TranslateError::Network(_)));
    }

    #[test]
    fn endpoint_ignores_trailing_slash() {
        assert_eq!(
            HttpTranslator::new("http://localhost:4000/").endpoint(),
            "http://localhost:4000/translate"
        );
    }
}
