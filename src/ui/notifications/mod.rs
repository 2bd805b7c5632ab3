// SPDX-License-Identifier: MPL-2.0
//! User-facing notifications.
//!
//! Every recoverable failure in the editor and the gallery ends up here as a
//! [`Notification`] instead of an error return; front ends decide how to show
//! them (toasts, terminal lines).
//!
//! - [`notification`] - `Notification` with severity levels
//! - [`manager`] - `Manager` holding pending notifications until drained

mod manager;
mod notification;

pub use manager::Manager;
pub use notification::{Notification, Severity};
