// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons.
//!
//! Stage and overlay geometry is all `f32`, so tests compare with the `approx`
//! crate's macros instead of `assert_eq!`.

// Re-export approx macros for convenient use in tests
pub use approx::assert_abs_diff_eq;
