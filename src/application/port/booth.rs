// SPDX-License-Identifier: MPL-2.0
//! Photo-booth server port.
//!
//! [`BoothApi`] lists the server operations the session driver and the CLI
//! commands need. [`ApiClient`] is the HTTP implementation; tests plug in an
//! in-memory one. The wire types it returns live next to the HTTP adapter.
//!
//! [`ApiClient`]: crate::infrastructure::http::ApiClient

use crate::infrastructure::http::{ApiError, Asset, GalleryPage, UserImage};
use crate::media::capture::ComposeUpload;

/// Server operations used by the photo booth.
// The driver runs on a single task, so the futures need not be `Send`.
#[allow(async_fn_in_trait)]
pub trait BoothApi {
    async fn list_assets(&self) -> Result<Vec<Asset>, ApiError>;

    /// Raw bytes of a server-relative or absolute path.
    async fn fetch_bytes(&self, path: &str) -> Result<Vec<u8>, ApiError>;

    /// Uploads a capture; returns the stored image path.
    async fn compose(&self, upload: &ComposeUpload) -> Result<String, ApiError>;

    async fn user_images(&self) -> Result<Vec<UserImage>, ApiError>;

    async fn gallery_page(&self, page: u32) -> Result<GalleryPage, ApiError>;

    async fn like(&self, image_id: u64) -> Result<(), ApiError>;

    async fn comment(&self, image_id: u64, body: &str) -> Result<(), ApiError>;

    /// Uploads a new overlay asset; returns the server's message.
    async fn upload_asset(
        &self,
        name: Option<&str>,
        file_name: &str,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ApiError>;

    /// Base URL, used to point the user at the login page.
    fn base_url(&self) -> &str;
}

impl<T: BoothApi> BoothApi for &T {
    async fn list_assets(&self) -> Result<Vec<Asset>, ApiError> {
        (**self).list_assets().await
    }

    async fn fetch_bytes(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        (**self).fetch_bytes(path).await
    }

    async fn compose(&self, upload: &ComposeUpload) -> Result<String, ApiError> {
        (**self).compose(upload).await
    }

    async fn user_images(&self) -> Result<Vec<UserImage>, ApiError> {
        (**self).user_images().await
    }

    async fn gallery_page(&self, page: u32) -> Result<GalleryPage, ApiError> {
        (**self).gallery_page(page).await
    }

    async fn like(&self, image_id: u64) -> Result<(), ApiError> {
        (**self).like(image_id).await
    }

    async fn comment(&self, image_id: u64, body: &str) -> Result<(), ApiError> {
        (**self).comment(image_id, body).await
    }

    async fn upload_asset(
        &self,
        name: Option<&str>,
        file_name: &str,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ApiError> {
        (**self)
            .upload_asset(name, file_name, mime_type, bytes)
            .await
    }

    fn base_url(&self) -> &str {
        (**self).base_url()
    }
}
