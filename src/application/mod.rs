// SPDX-License-Identifier: MPL-2.0
//! Application layer - Ports that infrastructure adapters implement.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - Presentation layer (the editor) only sees the traits
//! - Server wire types ([`Asset`](crate::infrastructure::http::Asset) and
//!   friends) are shared with the HTTP adapter that decodes them

pub mod port;
