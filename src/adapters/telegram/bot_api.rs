//! Implements BotApiPort over the Telegram Bot HTTP API using reqwest.
//!
//! The bot token is part of every URL path, so URLs are never logged and
//! transport errors are stripped of their URL before being wrapped.

use crate::adapters::telegram::mapper;
use crate::domain::{DomainError, RemoteFile, StickerSet};
use crate::ports::BotApiPort;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

/// Telegram Bot API adapter. One pooled reqwest client per instance.
pub struct HttpBotApi {
    client: Client,
    api_url: String,
    token: SecretString,
}

impl HttpBotApi {
    /// Create the adapter.
    ///
    /// # Arguments
    /// * `api_url` - Base URL without the `/bot<token>` part (e.g. `https://api.telegram.org`)
    /// * `token` - Bot token from @BotFather
    /// * `timeout` - Per-request timeout, surfaced as `DomainError::Network`
    pub fn new(
        api_url: impl Into<String>,
        token: SecretString,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Network(format!("build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.api_url,
            self.token.expose_secret(),
            method
        )
    }

    fn file_url(&self, file_path: &str) -> String {
        format!(
            "{}/file/bot{}/{}",
            self.api_url,
            self.token.expose_secret(),
            file_path.trim_start_matches('/')
        )
    }

    /// GET a Bot API method and decode its `result`.
    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        query: &[(&str, &str)],
    ) -> Result<T, DomainError> {
        debug!(method, "calling Bot API");
        let response = self
            .client
            .get(self.method_url(method))
            .query(query)
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(network_error)?;
        let decoded = mapper::decode_response(method, status, &body);
        if let Err(e) = &decoded {
            warn!(method, status, error = %e, "Bot API call failed");
        }
        decoded
    }
}

/// reqwest errors embed the request URL, which carries the token.
fn network_error(e: reqwest::Error) -> DomainError {
    DomainError::Network(e.without_url().to_string())
}

#[async_trait]
impl BotApiPort for HttpBotApi {
    async fn get_sticker_set(&self, name: &str) -> Result<StickerSet, DomainError> {
        self.call("getStickerSet", &[("name", name)]).await
    }

    async fn get_file(&self, file_id: &str) -> Result<RemoteFile, DomainError> {
        self.call("getFile", &[("file_id", file_id)]).await
    }

    async fn download_file(
        &self,
        file_path: &str,
        file_id: &str,
        dest: &mut (dyn AsyncWrite + Unpin + Send),
    ) -> Result<u64, DomainError> {
        let mut response = self
            .client
            .get(self.file_url(file_path))
            .query(&[("file_id", file_id)])
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.map_err(network_error)?;
            let err = mapper::error_from_reply(status.as_u16(), &body);
            warn!(file_id, status = status.as_u16(), error = %err, "file download rejected");
            return Err(err);
        }

        let mut written = 0u64;
        while let Some(chunk) = response.chunk().await.map_err(network_error)? {
            dest.write_all(&chunk)
                .await
                .map_err(|e| DomainError::storage("write sticker blob", e))?;
            written += chunk.len() as u64;
        }

        debug!(file_id, bytes = written, "file downloaded");
        Ok(written)
    }

    async fn get_updates(&self) -> Result<Vec<serde_json::Value>, DomainError> {
        self.call("getUpdates", &[]).await
    }

    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), DomainError> {
        let chat_id = chat_id.to_string();
        let _: serde_json::Value = self
            .call("sendMessage", &[("chat_id", chat_id.as_str()), ("text", text)])
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    const TOKEN: &str = "123456ABCdef";

    fn api(server: &MockServer) -> HttpBotApi {
        HttpBotApi::new(
            server.base_url(),
            SecretString::new(TOKEN.to_string()),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn get_sticker_set_returns_stickers_in_order() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path(format!("/bot{}/getStickerSet", TOKEN))
                    .query_param("name", "cats");
                then.status(200).json_body(json!({
                    "ok": true,
                    "result": {
                        "name": "cats",
                        "stickers": [
                            {"thumb": {"file_id": "t1"}},
                            {"thumb": {"file_id": "t2"}},
                            {"thumb": {"file_id": "t3"}}
                        ]
                    }
                }));
            })
            .await;

        let set = api(&server).get_sticker_set("cats").await.unwrap();

        assert_eq!(set.thumb_file_ids(), vec!["t1", "t2", "t3"]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn minimal_replies_without_envelope_flag_decode() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(format!("/bot{}/getStickerSet", TOKEN));
                then.status(200).json_body(json!({
                    "result": {"stickers": [{"thumb": {"file_id": "t1"}}, {"thumb": {"file_id": "t2"}}]}
                }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(format!("/bot{}/getFile", TOKEN));
                then.status(200)
                    .json_body(json!({"result": {"file_path": "thumbnails/file_7.webp"}}));
            })
            .await;
        let api = api(&server);

        let set = api.get_sticker_set("cats").await.unwrap();
        let file = api.get_file("t1").await.unwrap();

        assert_eq!(set.thumb_file_ids(), vec!["t1", "t2"]);
        assert_eq!(file.file_path, "thumbnails/file_7.webp");
    }

    #[tokio::test]
    async fn bad_request_surfaces_as_remote_api_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(format!("/bot{}/getStickerSet", TOKEN));
                then.status(400).json_body(json!({
                    "ok": false,
                    "error_code": 400,
                    "description": "Bad Request: STICKERSET_INVALID"
                }));
            })
            .await;

        let err = api(&server).get_sticker_set("ghost").await.unwrap_err();

        assert!(matches!(err, DomainError::RemoteApi { status: 400, .. }));
    }

    #[tokio::test]
    async fn get_file_returns_remote_path() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path(format!("/bot{}/getFile", TOKEN))
                    .query_param("file_id", "abc123");
                then.status(200).json_body(json!({
                    "ok": true,
                    "result": {"file_id": "abc123", "file_path": "thumbnails/file_7.webp"}
                }));
            })
            .await;

        let file = api(&server).get_file("abc123").await.unwrap();

        assert_eq!(file.file_path, "thumbnails/file_7.webp");
    }

    #[tokio::test]
    async fn download_file_streams_body_into_writer() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path(format!("/file/bot{}/thumbnails/file_7.webp", TOKEN))
                    .query_param("file_id", "abc123");
                then.status(200).body("RIFF....WEBPVP8 ");
            })
            .await;

        let mut buf: Vec<u8> = Vec::new();
        let written = api(&server)
            .download_file("thumbnails/file_7.webp", "abc123", &mut buf)
            .await
            .unwrap();

        assert_eq!(written, 16);
        assert_eq!(buf, b"RIFF....WEBPVP8 ");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn download_file_rejects_missing_blob() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path(format!("/file/bot{}/thumbnails/gone.webp", TOKEN));
                then.status(404)
                    .json_body(json!({"ok": false, "error_code": 404, "description": "Not Found"}));
            })
            .await;

        let mut buf: Vec<u8> = Vec::new();
        let err = api(&server)
            .download_file("thumbnails/gone.webp", "gone", &mut buf)
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::RemoteApi { status: 404, .. }));
        assert!(buf.is_empty());
    }

    #[tokio::test]
    async fn get_updates_keeps_elements_raw() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(format!("/bot{}/getUpdates", TOKEN));
                then.status(200).json_body(json!({
                    "ok": true,
                    "result": [
                        {"update_id": 1, "callback_query": {}},
                        {"update_id": 2, "message": {"chat": {"id": 555, "username": "alice"}}}
                    ]
                }));
            })
            .await;

        let updates = api(&server).get_updates().await.unwrap();

        assert_eq!(updates.len(), 2);
    }

    #[tokio::test]
    async fn send_message_passes_chat_id_and_text() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path(format!("/bot{}/sendMessage", TOKEN))
                    .query_param("chat_id", "555")
                    .query_param("text", "new pack: cats & dogs");
                then.status(200)
                    .json_body(json!({"ok": true, "result": {"message_id": 10}}));
            })
            .await;

        api(&server)
            .send_message(555, "new pack: cats & dogs")
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn rate_limit_is_reported_with_retry_after() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(format!("/bot{}/getUpdates", TOKEN));
                then.status(429).json_body(json!({
                    "ok": false,
                    "error_code": 429,
                    "description": "Too Many Requests: retry after 3",
                    "parameters": {"retry_after": 3}
                }));
            })
            .await;

        let err = api(&server).get_updates().await.unwrap_err();

        assert_eq!(err, DomainError::RateLimited { retry_after: 3 });
    }

    #[tokio::test]
    async fn network_errors_do_not_leak_token() {
        // Nothing listens on port 1.
        let api = HttpBotApi::new(
            "http://127.0.0.1:1",
            SecretString::new(TOKEN.to_string()),
            Duration::from_secs(2),
        )
        .unwrap();

        let err = api.get_sticker_set("cats").await.unwrap_err();

        assert!(matches!(err, DomainError::Network(_)));
        assert!(!err.to_string().contains(TOKEN));
    }
}
