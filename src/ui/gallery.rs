// SPDX-License-Identifier: MPL-2.0
//! Paginated gallery feed with likes and comments.
//!
//! Like the editor, the feed never performs I/O: callers ask it whether a
//! request should go out (`begin_*`), send the request, then hand the result
//! back (`finish_*`).

use crate::infrastructure::http::{ApiError, Comment, GalleryItem, GalleryPage};
use crate::ui::notifications::{self, Notification};
use chrono::Utc;
use std::collections::HashSet;

/// Status shown when a page fails to load.
pub const LOAD_FAILED_STATUS: &str = "Unable to load gallery right now.";

/// Author shown on comments the current user just posted.
pub const OWN_COMMENT_AUTHOR: &str = "You";

/// Side effects requested by the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    None,
    /// The server rejected the session; the user must log in.
    AuthRequired,
}

/// A page request accepted by [`Feed::begin_load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub append: bool,
}

/// Gallery feed state.
#[derive(Debug)]
pub struct Feed {
    items: Vec<GalleryItem>,
    page: u32,
    loading: bool,
    has_more: bool,
    loaded_once: bool,
    status: Option<String>,
    pending_likes: HashSet<u64>,
    pending_comments: HashSet<u64>,
    notifications: notifications::Manager,
}

impl Default for Feed {
    fn default() -> Self {
        Self::new()
    }
}

impl Feed {
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            page: 0,
            loading: false,
            has_more: true,
            loaded_once: false,
            status: None,
            pending_likes: HashSet::new(),
            pending_comments: HashSet::new(),
            notifications: notifications::Manager::new(),
        }
    }

    /// Starts loading `page`.
    ///
    /// Returns `None` while another load is running, or when appending past
    /// the last page.
    pub fn begin_load(&mut self, page: u32, append: bool) -> Option<PageRequest> {
        if self.loading || (append && !self.has_more) {
            return None;
        }
        self.loading = true;
        self.status = Some("Loading...".to_string());
        Some(PageRequest { page, append })
    }

    /// Request for the page after the current one.
    pub fn begin_load_more(&mut self) -> Option<PageRequest> {
        let next = self.page + 1;
        self.begin_load(next, true)
    }

    pub fn finish_load(
        &mut self,
        request: PageRequest,
        result: Result<GalleryPage, ApiError>,
    ) -> Event {
        self.loading = false;
        match result {
            Ok(GalleryPage { items, has_more }) => {
                log::debug!("Gallery page {} with {} items", request.page, items.len());
                if request.append {
                    self.items.extend(items);
                } else {
                    self.items = items;
                }
                self.page = request.page;
                self.has_more = has_more;
                self.loaded_once = true;
                self.status = None;
                Event::None
            }
            Err(ApiError::AuthRequired) => {
                self.status = None;
                Event::AuthRequired
            }
            Err(err) => {
                log::warn!("Gallery page {} failed: {err}", request.page);
                self.status = Some(LOAD_FAILED_STATUS.to_string());
                Event::None
            }
        }
    }

    /// Whether a like for `image_id` should be sent.
    ///
    /// Already-liked images, unknown images and likes in flight are skipped.
    pub fn begin_like(&mut self, image_id: u64) -> bool {
        let likeable = self
            .item(image_id)
            .is_some_and(|item| !item.liked && !self.pending_likes.contains(&image_id));
        if likeable {
            self.pending_likes.insert(image_id);
        }
        likeable
    }

    pub fn finish_like(&mut self, image_id: u64, result: Result<(), ApiError>) -> Event {
        self.pending_likes.remove(&image_id);
        match result {
            Ok(()) => {
                if let Some(item) = self.item_mut(image_id) {
                    item.likes += 1;
                    item.liked = true;
                }
                Event::None
            }
            Err(err) => self.failure(err),
        }
    }

    /// Trims `body` and returns it if a comment should be sent.
    pub fn begin_comment(&mut self, image_id: u64, body: &str) -> Option<String> {
        let body = body.trim();
        if body.is_empty() || self.pending_comments.contains(&image_id) {
            return None;
        }
        self.pending_comments.insert(image_id);
        Some(body.to_string())
    }

    pub fn finish_comment(
        &mut self,
        image_id: u64,
        body: String,
        result: Result<(), ApiError>,
    ) -> Event {
        self.pending_comments.remove(&image_id);
        match result {
            Ok(()) => {
                if let Some(item) = self.item_mut(image_id) {
                    item.comments.insert(
                        0,
                        Comment {
                            author: OWN_COMMENT_AUTHOR.to_string(),
                            body,
                            created_at: Some(Utc::now()),
                        },
                    );
                }
                Event::None
            }
            Err(err) => self.failure(err),
        }
    }

    fn failure(&mut self, err: ApiError) -> Event {
        if err == ApiError::AuthRequired {
            return Event::AuthRequired;
        }
        self.notifications.push(Notification::error(err.to_string()));
        Event::None
    }

    #[must_use]
    pub fn item(&self, image_id: u64) -> Option<&GalleryItem> {
        self.items.iter().find(|item| item.id == image_id)
    }

    fn item_mut(&mut self, image_id: u64) -> Option<&mut GalleryItem> {
        self.items.iter_mut().find(|item| item.id == image_id)
    }

    #[must_use]
    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Whether the "no images yet" placeholder should show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loaded_once && self.items.is_empty()
    }

    pub fn notifications_mut(&mut self) -> &mut notifications::Manager {
        &mut self.notifications
    }
}
