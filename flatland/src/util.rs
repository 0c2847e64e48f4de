//! Tools that we could imagine being in the Rust standard library, but aren't.

#[doc(no_inline)]
pub use manyfmt::{Fmt, Refmt, refmt};

pub use flatland_base::util::ConciseDebug;
#[doc(hidden)]
pub use flatland_base::util::{ErrorChain, log};
