//! This library is an internal component of [`flatland`],
//! which defines some core mathematical types and functions.
//! Do not depend on this library; use only [`flatland`] instead.
//!
//! [`flatland`]: https://crates.io/crates/flatland/

// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![warn(clippy::missing_inline_in_public_items)]

/// Do not use this module directly; its contents are re-exported from `flatland`.
#[macro_use]
pub mod math;

/// Do not use this module directly; its contents are re-exported from `flatland`.
pub mod util;

// reexport for convenience of our tests
#[doc(hidden)]
pub use euclid;
