// SPDX-License-Identifier: MPL-2.0
//! User interface state, independent of any rendering toolkit.
//!
//! Components follow the Elm-style "state down, messages up" pattern: a front
//! end feeds messages in and acts on the events that come back.
//!
//! # Screens
//!
//! - [`editor`] - Compositing stage with pan, zoom, overlay and capture
//! - [`gallery`] - Paginated public feed with likes and comments
//!
//! # Shared Infrastructure
//!
//! - [`state`] - Reusable interaction state (zoom, drag)
//! - [`notifications`] - Queue of user-facing messages

pub mod editor;
pub mod gallery;
pub mod notifications;
pub mod state;
