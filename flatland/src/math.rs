//! Mathematical utilities and decisions.

#[doc(inline)]
pub use flatland_base::math::*;

#[doc(inline)]
pub use flatland_base::notnan;
