// SPDX-License-Identifier: MPL-2.0
//! Pending notification queue.
//!
//! Editors push notifications as things happen; the front end drains them
//! in push order and decides how to show them.

use super::notification::{Notification, Severity};

/// Holds notifications until the front end drains them.
#[derive(Debug, Default)]
pub struct Manager {
    pending: Vec<Notification>,
}

impl Manager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a notification. Warnings and errors are also logged.
    pub fn push(&mut self, notification: Notification) {
        match notification.severity() {
            Severity::Warning => log::warn!("{}", notification.message()),
            Severity::Error => log::error!("{}", notification.message()),
            Severity::Success => log::debug!("{}", notification.message()),
        }
        self.pending.push(notification);
    }

    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Removes every notification, oldest first.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }
}
