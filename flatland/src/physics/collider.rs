use euclid::{Vector2D, point2};

use crate::math::{
    Aab, BoundingVertices, FreeCoordinate, FreeSize, FreeVector, InvalidAabError,
};
use crate::physics::{Body, BodyHandle, ColliderHandle};

/// The shape of a [`Collider`].
///
/// Every operation that depends on shape matches on this exhaustively, so adding a shape
/// is a compile error at each place that must learn about it.
#[expect(clippy::exhaustive_enums)]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, exhaust::Exhaust)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "save", derive(serde::Serialize, serde::Deserialize))]
pub enum ColliderShape {
    /// An axis-aligned box covering the body's size, scaled and offset by the collider.
    #[default]
    Box,
}

/// Gives a [`Body`] a collision shape.
///
/// A collider is attached to at most one body, and a body has at most one collider; the
/// [`PhysicsWorld`](crate::physics::PhysicsWorld) keeps both sides of the link consistent.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct Collider {
    /// Shape of the collision volume.
    pub shape: ColliderShape,

    /// Displacement of the collision volume from the body's effective position.
    pub local_offset: FreeVector,

    /// Per-axis multiplier applied to the body's size to get the collision volume's size.
    pub local_scale: Vector2D<FreeCoordinate, euclid::UnknownUnit>,

    pub(crate) attached_body: Option<BodyHandle>,
}

impl Collider {
    /// Constructs a box collider exactly covering its body.
    #[inline]
    pub fn new_box() -> Self {
        Self {
            shape: ColliderShape::Box,
            local_offset: FreeVector::zero(),
            local_scale: Vector2D::splat(1.0),
            attached_body: None,
        }
    }

    /// Returns a copy of this collider with the given offset.
    #[must_use]
    #[inline]
    pub fn with_offset(self, local_offset: FreeVector) -> Self {
        Self {
            local_offset,
            ..self
        }
    }

    /// Returns a copy of this collider with the given scale.
    #[must_use]
    #[inline]
    pub fn with_scale(self, local_scale: Vector2D<FreeCoordinate, euclid::UnknownUnit>) -> Self {
        Self {
            local_scale,
            ..self
        }
    }

    /// Returns the handle of the body this collider is attached to, if any.
    #[inline]
    pub fn attached_body(&self) -> Option<BodyHandle> {
        self.attached_body
    }

    /// Computes the bounding sides of this collider when attached to `body`.
    ///
    /// ```text
    /// left   = body.effective_position().x + local_offset.x
    /// right  = left + body.size.width * local_scale.x
    /// bottom = body.effective_position().y + local_offset.y
    /// top    = bottom + body.size.height * local_scale.y
    /// ```
    ///
    /// `body` should be the body this collider is attached to; it is passed explicitly so
    /// that the collider itself need not borrow the world. If it is [`None`], the collider
    /// is detached and the extent is undefined.
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn bounding_sides(&self, body: Option<&Body>) -> Result<Aab, ExtentError> {
        let body = body.ok_or(DetachedColliderError { collider: None })?;
        match self.shape {
            ColliderShape::Box => {
                let origin = body.effective_position();
                let lower = point2(
                    origin.x + self.local_offset.x,
                    origin.y + self.local_offset.y,
                );
                let size = FreeSize::new(
                    body.size.width * self.local_scale.x,
                    body.size.height * self.local_scale.y,
                );
                Ok(Aab::try_from_lower_size(lower, size)?)
            }
        }
    }

    /// Computes the four corners of this collider when attached to `body`.
    ///
    /// These are derived from the same four numbers as
    /// [`bounding_sides()`](Self::bounding_sides), so they always agree with it exactly.
    #[inline]
    pub fn bounding_vertices(&self, body: Option<&Body>) -> Result<BoundingVertices, ExtentError> {
        Ok(self.bounding_sides(body)?.vertices())
    }
}

impl Default for Collider {
    #[inline]
    fn default() -> Self {
        Self::new_box()
    }
}

// -------------------------------------------------------------------------------------------------

/// Error from asking for the extent of a [`Collider`] that is not attached to a live body.
#[derive(Clone, Copy, Debug, Eq, PartialEq, displaydoc::Display)]
#[displaydoc("collider is not attached to a body")]
#[non_exhaustive]
pub struct DetachedColliderError {
    /// The collider, if it was identified by handle.
    pub collider: Option<ColliderHandle>,
}

impl core::error::Error for DetachedColliderError {}

/// Error from computing the extent of a [`Collider`].
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum ExtentError {
    /// The collider has no body to take a position and size from.
    #[error(transparent)]
    Detached(#[from] DetachedColliderError),

    /// The body's position or size, combined with the collider's offset and scale,
    /// produced sides that are misordered or NaN.
    #[error("collider extent is invalid")]
    Invalid(#[from] InvalidAabError),
}
