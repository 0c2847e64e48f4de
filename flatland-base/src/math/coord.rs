//! Numeric types used for coordinates and related quantities.

use euclid::{Point2D, Size2D, Vector2D};

/// Unit-of-measure type for the single shared coordinate space all bodies live in.
///
/// Positions in this space are conventionally pixels, with the origin at the bottom left
/// and +Y pointing up.
#[expect(clippy::exhaustive_enums)]
#[derive(Debug, Eq, PartialEq)]
pub enum Scene {}

/// Coordinates in the [`Scene`] space.
pub type FreeCoordinate = f64;

/// Positions in the [`Scene`] space.
pub type FreePoint = Point2D<FreeCoordinate, Scene>;

/// Displacements in the [`Scene`] space.
pub type FreeVector = Vector2D<FreeCoordinate, Scene>;

/// Sizes of objects in the [`Scene`] space.
pub type FreeSize = Size2D<FreeCoordinate, Scene>;

/// Returns whether every component of the vector is finite.
#[inline]
pub fn is_finite_vector<U>(vector: Vector2D<FreeCoordinate, U>) -> bool {
    vector.x.is_finite() && vector.y.is_finite()
}
