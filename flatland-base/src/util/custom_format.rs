#![allow(clippy::missing_inline_in_public_items)]

use core::fmt;
use core::time::Duration;

use manyfmt::{Fmt, Refmt as _};

/// Format type for [`manyfmt::Fmt`] which is similar to [`fmt::Debug`], but uses an
/// alternate concise format.
///
/// This format may be on one line despite the pretty-printing option, and may lose
/// precision or Rust syntax in favor of a short at-a-glance representation.
#[expect(clippy::exhaustive_structs)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ConciseDebug;

impl<T: Fmt<ConciseDebug>, const N: usize> Fmt<ConciseDebug> for [T; N] {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>, fopt: &ConciseDebug) -> fmt::Result {
        fmt.debug_list().entries(self.iter().map(|item| item.refmt(fopt))).finish()
    }
}

impl<T: fmt::Debug, U> Fmt<ConciseDebug> for euclid::Point2D<T, U> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>, _: &ConciseDebug) -> fmt::Result {
        write!(fmt, "({:+.3?}, {:+.3?})", self.x, self.y)
    }
}
impl<T: fmt::Debug, U> Fmt<ConciseDebug> for euclid::Vector2D<T, U> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>, _: &ConciseDebug) -> fmt::Result {
        write!(fmt, "({:+.3?}, {:+.3?})", self.x, self.y)
    }
}
impl<T: fmt::Debug, U> Fmt<ConciseDebug> for euclid::Size2D<T, U> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>, _: &ConciseDebug) -> fmt::Result {
        write!(fmt, "{:.3?}×{:.3?}", self.width, self.height)
    }
}

/// Makes the assumption that [`Duration`]s are per-step timings and hence the
/// interesting precision is in the millisecond-to-microsecond range.
impl Fmt<ConciseDebug> for Duration {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>, _: &ConciseDebug) -> fmt::Result {
        write!(fmt, "{:5.2?} ms", (self.as_micros() as f32) / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{FreePoint, FreeSize, FreeVector};
    use pretty_assertions::assert_eq;

    #[test]
    fn euclid_types() {
        assert_eq!(
            FreePoint::new(1.0, -2.5).refmt(&ConciseDebug).to_string(),
            "(+1.000, -2.500)"
        );
        assert_eq!(
            FreeVector::new(0.0, 3.0).refmt(&ConciseDebug).to_string(),
            "(+0.000, +3.000)"
        );
        assert_eq!(
            FreeSize::new(100.0, 50.0).refmt(&ConciseDebug).to_string(),
            "100.000×50.000"
        );
    }

    #[test]
    fn array() {
        assert_eq!(
            [FreePoint::new(0.0, 0.0), FreePoint::new(1.0, 1.0)]
                .refmt(&ConciseDebug)
                .to_string(),
            "[(+0.000, +0.000), (+1.000, +1.000)]"
        );
    }

    #[test]
    fn duration() {
        assert_eq!(
            Duration::from_micros(16_667).refmt(&ConciseDebug).to_string(),
            "16.67 ms"
        );
    }
}
