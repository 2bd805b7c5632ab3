// SPDX-License-Identifier: MPL-2.0
//! REST client for the photo-booth server.
//!
//! Every endpoint answers with a JSON envelope `{success, message?, data?}`.
//! [`interpret`] turns a status code and body into either the parsed JSON or
//! an [`ApiError`]; the async methods only move bytes.
//!
//! A 401 or 403 from any endpoint maps to [`ApiError::AuthRequired`] so the
//! caller can send the user to the login route.

pub mod responses;

pub use responses::{Asset, Comment, GalleryItem, GalleryPage, UserImage};

use crate::application::port::BoothApi;
use crate::config::ServerConfig;
use crate::media::capture::ComposeUpload;
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use reqwest::multipart::{Form, Part};
use reqwest::RequestBuilder;
use serde_json::Value;
use std::fmt;

const USER_AGENT: &str = "Snapbooth/0.1.0";

// =============================================================================
// ApiError
// =============================================================================

/// Failures talking to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// 401 or 403: the session is missing or expired.
    AuthRequired,
    /// The server rejected the request; carries its message.
    Server(String),
    /// The request never got a response.
    Transport(String),
    /// The response could not be understood.
    Malformed(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::AuthRequired => write!(f, "Authentication required"),
            ApiError::Server(msg) => write!(f, "{msg}"),
            ApiError::Transport(msg) => write!(f, "Network error: {msg}"),
            ApiError::Malformed(msg) => write!(f, "Unexpected server response: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

/// Interprets a response.
///
/// Succeeds with the parsed body when the status is 2xx and the envelope does
/// not say `success: false`. Otherwise fails with the server's `message`, or
/// with `fallback` when there is none.
///
/// # Errors
///
/// See above; 401/403 always yield [`ApiError::AuthRequired`].
pub fn interpret(status: u16, body: &str, fallback: &str) -> Result<Value, ApiError> {
    if status == 401 || status == 403 {
        return Err(ApiError::AuthRequired);
    }

    let ok_status = (200..300).contains(&status);
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(err) if ok_status => return Err(ApiError::Malformed(err.to_string())),
        Err(_) => return Err(ApiError::Server(fallback.to_string())),
    };

    let refused = value.get("success").and_then(Value::as_bool) == Some(false);
    if !ok_status || refused {
        let message = responses::message_of(&value).unwrap_or_else(|| fallback.to_string());
        return Err(ApiError::Server(message));
    }

    Ok(value)
}

/// Joins `path` onto `base`, leaving absolute URLs untouched.
#[must_use]
pub fn join_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

// =============================================================================
// ApiClient
// =============================================================================

/// HTTP client bound to one server and session.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Builds a client from the `[server]` settings.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the session cookie is not a valid
    /// header value or the TLS backend fails to initialise.
    pub fn new(config: &ServerConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        if let Some(session) = config.resolved_session() {
            let cookie = HeaderValue::from_str(&format!("session={session}"))
                .map_err(|e| ApiError::Transport(format!("invalid session cookie: {e}")))?;
            headers.insert(COOKIE, cookie);
        }

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder, fallback: &str) -> Result<Value, ApiError> {
        let response = request.send().await.map_err(|e| {
            log::warn!("Request failed: {e}");
            ApiError::from(e)
        })?;
        let status = response.status().as_u16();
        log::debug!("{} -> {status}", response.url());
        let body = response.text().await?;
        interpret(status, &body, fallback)
    }

    /// `GET /api/assets`.
    pub async fn list_assets(&self) -> Result<Vec<Asset>, ApiError> {
        let value = self
            .send(self.client.get(self.url("/api/assets")), "Failed to load assets")
            .await?;
        Ok(responses::parse_assets(&value))
    }

    /// Downloads raw bytes (overlay images, thumbnails).
    pub async fn fetch_bytes(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        let response = self.client.get(self.url(path)).send().await?;
        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(ApiError::AuthRequired);
        }
        if !status.is_success() {
            return Err(ApiError::Server(format!("HTTP status: {status}")));
        }
        Ok(response.bytes().await?.to_vec())
    }

    /// `POST /api/compose`; returns the stored image path.
    pub async fn compose(&self, upload: &ComposeUpload) -> Result<String, ApiError> {
        let image = Part::bytes(upload.png.clone())
            .file_name("photo.png")
            .mime_str("image/png")?;
        let overlay = upload.overlay;
        let form = Form::new()
            .part("image", image)
            .text("asset_id", upload.asset_id.to_string())
            .text("overlay_x", overlay.x.to_string())
            .text("overlay_y", overlay.y.to_string())
            .text("overlay_w", overlay.w.to_string())
            .text("overlay_h", overlay.h.to_string());

        let value = self
            .send(
                self.client.post(self.url("/api/compose")).multipart(form),
                "Upload failed",
            )
            .await?;
        responses::parse_compose_path(&value)
    }

    /// `GET /api/user/images`.
    pub async fn user_images(&self) -> Result<Vec<UserImage>, ApiError> {
        let value = self
            .send(
                self.client.get(self.url("/api/user/images")),
                "Failed to load images",
            )
            .await?;
        Ok(responses::parse_user_images(&value))
    }

    /// `GET /api/gallery?page=N`.
    pub async fn gallery_page(&self, page: u32) -> Result<GalleryPage, ApiError> {
        let request = self
            .client
            .get(self.url("/api/gallery"))
            .query(&[("page", page)]);
        let value = self.send(request, "Failed to fetch gallery").await?;
        Ok(responses::parse_gallery_page(&value))
    }

    /// `POST /api/gallery/like`.
    pub async fn like(&self, image_id: u64) -> Result<(), ApiError> {
        let request = self
            .client
            .post(self.url("/api/gallery/like"))
            .form(&[("image_id", image_id.to_string())]);
        self.send(request, "Unable to like image").await?;
        Ok(())
    }

    /// `POST /api/gallery/comment`.
    pub async fn comment(&self, image_id: u64, body: &str) -> Result<(), ApiError> {
        let request = self
            .client
            .post(self.url("/api/gallery/comment"))
            .form(&[("image_id", image_id.to_string()), ("body", body.to_string())]);
        self.send(request, "Unable to add comment").await?;
        Ok(())
    }

    /// `POST /api/assets/upload`; returns the server's message.
    pub async fn upload_asset(
        &self,
        name: Option<&str>,
        file_name: &str,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ApiError> {
        let file = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime_type)?;
        let mut form = Form::new();
        if let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) {
            form = form.text("name", name.to_string());
        }
        form = form.part("file", file);

        let value = self
            .send(
                self.client.post(self.url("/api/assets/upload")).multipart(form),
                "Upload failed",
            )
            .await?;
        Ok(responses::message_of(&value).unwrap_or_else(|| "Uploaded".to_string()))
    }
}

// =============================================================================
// BoothApi
// =============================================================================

impl BoothApi for ApiClient {
    async fn list_assets(&self) -> Result<Vec<Asset>, ApiError> {
        ApiClient::list_assets(self).await
    }

    async fn fetch_bytes(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        ApiClient::fetch_bytes(self, path).await
    }

    async fn compose(&self, upload: &ComposeUpload) -> Result<String, ApiError> {
        ApiClient::compose(self, upload).await
    }

    async fn user_images(&self) -> Result<Vec<UserImage>, ApiError> {
        ApiClient::user_images(self).await
    }

    async fn gallery_page(&self, page: u32) -> Result<GalleryPage, ApiError> {
        ApiClient::gallery_page(self, page).await
    }

    async fn like(&self, image_id: u64) -> Result<(), ApiError> {
        ApiClient::like(self, image_id).await
    }

    async fn comment(&self, image_id: u64, body: &str) -> Result<(), ApiError> {
        ApiClient::comment(self, image_id, body).await
    }

    async fn upload_asset(
        &self,
        name: Option<&str>,
        file_name: &str,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ApiError> {
        ApiClient::upload_asset(self, name, file_name, mime_type, bytes).await
    }

    fn base_url(&self) -> &str {
        ApiClient::base_url(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_statuses_win_over_body() {
        assert_eq!(
            interpret(401, r#"{"success":true}"#, "x"),
            Err(ApiError::AuthRequired)
        );
        assert_eq!(interpret(403, "<html>", "x"), Err(ApiError::AuthRequired));
    }

    #[test]
    fn success_false_carries_server_message() {
        assert_eq!(
            interpret(200, r#"{"success":false,"message":"Invalid asset"}"#, "Upload failed"),
            Err(ApiError::Server("Invalid asset".into()))
        );
    }

    #[test]
    fn error_status_without_message_uses_fallback() {
        assert_eq!(
            interpret(500, r#"{"success":false}"#, "Upload failed"),
            Err(ApiError::Server("Upload failed".into()))
        );
        assert_eq!(
            interpret(502, "Bad Gateway", "Upload failed"),
            Err(ApiError::Server("Upload failed".into()))
        );
    }

    #[test]
    fn bare_array_is_accepted() {
        let value = interpret(200, r#"[{"id":1,"path":"/a.png"}]"#, "x").expect("ok");
        assert!(value.is_array());
    }

    #[test]
    fn unparsable_success_body_is_malformed() {
        assert!(matches!(
            interpret(200, "not json", "x"),
            Err(ApiError::Malformed(_))
        ));
    }

    #[test]
    fn urls_are_joined_once() {
        assert_eq!(
            join_url("http://localhost:8080/", "/api/assets"),
            "http://localhost:8080/api/assets"
        );
        assert_eq!(
            join_url("http://localhost:8080", "uploads/1.png"),
            "http://localhost:8080/uploads/1.png"
        );
        assert_eq!(
            join_url("http://localhost:8080", "https://cdn.example/a.png"),
            "https://cdn.example/a.png"
        );
    }

    #[test]
    fn client_uses_configured_base_url() {
        let config = ServerConfig {
            base_url: Some("http://booth.test/".into()),
            session: Some("abc".into()),
            ..ServerConfig::default()
        };
        let client = ApiClient::new(&config).expect("client");
        assert_eq!(client.base_url(), "http://booth.test");
        assert_eq!(client.url("/api/gallery"), "http://booth.test/api/gallery");
    }

    #[test]
    fn api_error_display() {
        assert_eq!(ApiError::AuthRequired.to_string(), "Authentication required");
        assert_eq!(
            ApiError::Transport("refused".into()).to_string(),
            "Network error: refused"
        );
    }
}
