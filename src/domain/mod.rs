// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core business logic with ZERO external dependencies.
//!
//! This module contains pure domain types, value objects, and business rules.
//! It has no dependencies on external crates (except `std`) to ensure
//! testability and architectural purity.
//!
//! # Modules
//!
//! - [`compositing`]: Stage/overlay geometry and the capture crop
//!   ([`StageTransform`](compositing::StageTransform), [`OverlayBox`](compositing::OverlayBox),
//!   [`cover_fit_crop`](compositing::cover_fit_crop))
//! - [`ui`]: UI value objects ([`ZoomPercent`](ui::newtypes::ZoomPercent),
//!   [`ZoomStep`](ui::newtypes::ZoomStep))

pub mod compositing;
pub mod ui;
