// SPDX-License-Identifier: MPL-2.0
//! Typed views over the server's JSON responses.
//!
//! The server is not consistent about envelopes: lists come either bare or
//! under `data`, and the compose path comes either under `data.path` or at
//! the top level. Parsing is tolerant; individual malformed list entries are
//! skipped instead of failing the whole response.

use super::ApiError;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// A decorative overlay image offered by the server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Asset {
    #[serde(alias = "ID", default)]
    pub id: u64,
    #[serde(alias = "Name", default)]
    pub name: String,
    #[serde(alias = "Path", default)]
    pub path: String,
}

/// One of the current user's previously composed images.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserImage {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub path: String,
}

/// A comment on a gallery image.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub body: String,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A public gallery entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GalleryItem {
    pub id: u64,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub author: String,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub liked: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub comments: Vec<Comment>,
}

/// One page of the gallery feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryPage {
    pub items: Vec<GalleryItem>,
    pub has_more: bool,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Comment>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Comment>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Returns the list either at the top level or under `data`.
fn list_of(value: &Value) -> Option<&Vec<Value>> {
    value
        .as_array()
        .or_else(|| value.get("data").and_then(Value::as_array))
}

fn parse_each<T: DeserializeOwned>(items: &[Value]) -> Vec<T> {
    items
        .iter()
        .filter_map(|item| match T::deserialize(item) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                log::debug!("Skipping malformed entry {item}: {err}");
                None
            }
        })
        .collect()
}

/// Parses `GET /api/assets`. Entries without an id or path are dropped.
#[must_use]
pub fn parse_assets(value: &Value) -> Vec<Asset> {
    list_of(value)
        .map(|items| parse_each::<Asset>(items))
        .unwrap_or_default()
        .into_iter()
        .filter(|asset| asset.id != 0 && !asset.path.is_empty())
        .collect()
}

/// Parses `GET /api/user/images`, keeping only entries with a path.
#[must_use]
pub fn parse_user_images(value: &Value) -> Vec<UserImage> {
    list_of(value)
        .map(|items| parse_each::<UserImage>(items))
        .unwrap_or_default()
        .into_iter()
        .filter(|image| !image.path.is_empty())
        .collect()
}

/// Extracts the stored image path from a compose response.
///
/// # Errors
///
/// Returns [`ApiError::Server`] when neither `data.path` nor `path` is present.
pub fn parse_compose_path(value: &Value) -> Result<String, ApiError> {
    value
        .get("data")
        .and_then(|data| data.get("path"))
        .or_else(|| value.get("path"))
        .and_then(Value::as_str)
        .filter(|path| !path.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ApiError::Server("No image path returned from server".to_string()))
}

/// Parses `GET /api/gallery?page=N`, with the payload at the top level or under `data`.
#[must_use]
pub fn parse_gallery_page(value: &Value) -> GalleryPage {
    let body = if value.get("items").is_some() {
        value
    } else {
        value.get("data").unwrap_or(value)
    };

    let items = body
        .get("items")
        .and_then(Value::as_array)
        .map(|items| parse_each::<GalleryItem>(items))
        .unwrap_or_default();
    let has_more = body
        .get("hasMore")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    GalleryPage { items, has_more }
}

/// Optional `message` field of any response.
#[must_use]
pub fn message_of(value: &Value) -> Option<String> {
    value
        .get("message")
        .and_then(Value::as_str)
        .filter(|msg| !msg.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn assets_from_bare_array() {
        let value = json!([
            {"id": 1, "name": "Hat", "path": "/assets/hat.png"},
            {"ID": 2, "Name": "Frame", "Path": "/assets/frame.png"}
        ]);
        let assets = parse_assets(&value);
        assert_eq!(assets.len(), 2);
        assert_eq!(assets[1].name, "Frame");
        assert_eq!(assets[1].path, "/assets/frame.png");
    }

    #[test]
    fn assets_from_envelope_skip_broken_entries() {
        let value = json!({
            "success": true,
            "data": [
                {"id": 3, "name": "Cat", "path": "/assets/cat.png"},
                {"id": "not-a-number", "path": "/assets/x.png"},
                {"id": 4, "name": "No path"},
                "garbage"
            ]
        });
        let assets = parse_assets(&value);
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].id, 3);
    }

    #[test]
    fn assets_from_unexpected_shape_is_empty() {
        assert!(parse_assets(&json!({"success": true})).is_empty());
        assert!(parse_assets(&json!("nope")).is_empty());
    }

    #[test]
    fn compose_path_lookup_order() {
        assert_eq!(
            parse_compose_path(&json!({"success": true, "data": {"path": "/u/1.png"}})).ok(),
            Some("/u/1.png".to_string())
        );
        assert_eq!(
            parse_compose_path(&json!({"success": true, "path": "/u/2.png"})).ok(),
            Some("/u/2.png".to_string())
        );
        assert_eq!(
            parse_compose_path(&json!({"success": true})),
            Err(ApiError::Server("No image path returned from server".into()))
        );
    }

    #[test]
    fn gallery_page_top_level_and_nested() {
        let top = json!({
            "success": true,
            "items": [{"id": 7, "path": "/g/7.png", "author": "ana", "likes": 2,
                       "liked": true, "comments": null,
                       "createdAt": "2024-05-01T10:00:00Z"}],
            "hasMore": true
        });
        let page = parse_gallery_page(&top);
        assert!(page.has_more);
        assert_eq!(page.items[0].likes, 2);
        assert!(page.items[0].comments.is_empty());
        assert!(page.items[0].created_at.is_some());

        let nested = json!({
            "success": true,
            "data": {"items": [{"id": 8, "path": "/g/8.png",
                                "comments": [{"author": "bo", "body": "nice"}]}],
                     "hasMore": false}
        });
        let page = parse_gallery_page(&nested);
        assert!(!page.has_more);
        assert_eq!(page.items[0].comments[0].body, "nice");
    }

    #[test]
    fn user_images_keep_entries_with_paths() {
        let value = json!({"success": true, "data": [
            {"id": 1, "path": "/u/1.png", "created_at": "2024-01-01"},
            {"id": 2}
        ]});
        let images = parse_user_images(&value);
        assert_eq!(images, vec![UserImage { id: 1, path: "/u/1.png".into() }]);
    }

    #[test]
    fn message_ignores_empty_strings() {
        assert_eq!(message_of(&json!({"message": ""})), None);
        assert_eq!(message_of(&json!({"message": "Oops"})), Some("Oops".into()));
    }
}
