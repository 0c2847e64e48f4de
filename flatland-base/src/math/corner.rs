use core::fmt;

use euclid::Vector2D;
use exhaust::Exhaust as _;
use manyfmt::Refmt as _;

use crate::math::{Axis, FreeCoordinate, FreePoint};
use crate::util::ConciseDebug;

/// Identifies one of the four corners of an axis-aligned box.
#[expect(clippy::exhaustive_enums)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, exhaust::Exhaust)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub enum Corner {
    BottomLeft,
    BottomRight,
    TopLeft,
    TopRight,
}

impl Corner {
    /// All four corners, in the order bottom-left, bottom-right, top-left, top-right.
    pub const ALL: [Self; 4] = [
        Self::BottomLeft,
        Self::BottomRight,
        Self::TopLeft,
        Self::TopRight,
    ];

    /// Returns the corner on the right side if `right`, and on the top side if `top`.
    #[inline]
    pub const fn from_sides(right: bool, top: bool) -> Self {
        match (right, top) {
            (false, false) => Self::BottomLeft,
            (true, false) => Self::BottomRight,
            (false, true) => Self::TopLeft,
            (true, true) => Self::TopRight,
        }
    }

    /// Returns the corner of a box which is furthest along `direction`.
    ///
    /// Zero components count as positive, so a zero vector yields [`Corner::TopRight`].
    #[inline]
    pub fn leading<U>(direction: Vector2D<FreeCoordinate, U>) -> Self {
        Self::from_sides(direction.x >= 0.0, direction.y >= 0.0)
    }

    /// Whether this corner lies on the upper bound of the given axis
    /// (the right side for X, the top side for Y).
    #[inline]
    pub const fn is_upper(self, axis: Axis) -> bool {
        match axis {
            Axis::X => matches!(self, Self::BottomRight | Self::TopRight),
            Axis::Y => matches!(self, Self::TopLeft | Self::TopRight),
        }
    }
}

/// The four corner points of an axis-aligned box.
///
/// Obtained from [`Aab::vertices()`](crate::math::Aab::vertices), which computes them from
/// the same four side coordinates as [`Aab`](crate::math::Aab) itself, so corners and sides
/// always agree.
#[derive(Clone, Copy, PartialEq)]
#[expect(clippy::exhaustive_structs)]
#[allow(missing_docs)]
pub struct BoundingVertices {
    pub bottom_left: FreePoint,
    pub bottom_right: FreePoint,
    pub top_left: FreePoint,
    pub top_right: FreePoint,
}

impl BoundingVertices {
    /// Returns the vertex at the given corner.
    #[inline]
    pub fn get(&self, corner: Corner) -> FreePoint {
        match corner {
            Corner::BottomLeft => self.bottom_left,
            Corner::BottomRight => self.bottom_right,
            Corner::TopLeft => self.top_left,
            Corner::TopRight => self.top_right,
        }
    }

    /// Iterates over the corners and their vertices, in [`Corner::ALL`] order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (Corner, FreePoint)> + '_ {
        Corner::exhaust().map(|corner| (corner, self.get(corner)))
    }
}

impl fmt::Debug for BoundingVertices {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundingVertices")
            .field("bottom_left", &self.bottom_left.refmt(&ConciseDebug))
            .field("bottom_right", &self.bottom_right.refmt(&ConciseDebug))
            .field("top_left", &self.top_left.refmt(&ConciseDebug))
            .field("top_right", &self.top_right.refmt(&ConciseDebug))
            .finish()
    }
}
