use core::fmt;

use euclid::{Vector2D, vec2};
use manyfmt::Refmt as _;

use crate::math::{FreeCoordinate, FreePoint, FreeSize, FreeVector, is_finite_vector};
use crate::physics::{Acceleration, ColliderHandle, StepContext, Velocity};
use crate::util::ConciseDebug;

/// Size given to bodies when none is specified.
pub const DEFAULT_BODY_SIZE: FreeSize = FreeSize::new(100.0, 100.0);

/// An object with a position, size, and velocity.
///
/// What it collides with is determined by the [`Collider`](crate::physics::Collider)
/// attached to it, if any, and by the [`PhysicsWorld`](crate::physics::PhysicsWorld) it is in.
#[derive(Clone, PartialEq)]
#[non_exhaustive]
pub struct Body {
    /// Position of the bottom-left corner of the body, in scene coordinates.
    ///
    /// The position used for collision is [`effective_position()`](Self::effective_position),
    /// which also includes [`offset`](Self::offset).
    pub position: FreePoint,

    /// Displacement relative to [`position`](Self::position).
    ///
    /// Integration accumulates motion here; a push-out folds it back into `position`.
    pub offset: FreeVector,

    /// Size of the body, which colliders scale to produce their extent.
    pub size: FreeSize,

    /// Velocity, in world units per second.
    pub velocity: Vector2D<FreeCoordinate, Velocity>,

    /// Fraction of velocity removed per second, proportional to the velocity.
    pub linear_drag: FreeCoordinate,

    /// Multiplier applied to the world's [gravity](crate::physics::PhysicsConfig::gravity).
    pub gravity_scale: FreeCoordinate,

    /// Static bodies never move: they are not integrated, never pushed out, and never
    /// tested against other static bodies.
    pub is_static: bool,

    /// Bodies which are not simulated take no part in integration or collision.
    pub is_simulated: bool,

    /// Maintained by [`PhysicsWorld`](crate::physics::PhysicsWorld).
    pub(crate) collider: Option<ColliderHandle>,
    // When adding a field, don't forget to expand the Debug impl.
}

impl fmt::Debug for Body {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            position,
            offset,
            size,
            velocity,
            linear_drag,
            gravity_scale,
            is_static,
            is_simulated,
            collider,
        } = self;
        fmt.debug_struct("Body")
            .field("position", &position.refmt(&ConciseDebug))
            .field("offset", &offset.refmt(&ConciseDebug))
            .field("size", &size.refmt(&ConciseDebug))
            .field("velocity", &velocity.refmt(&ConciseDebug))
            .field("linear_drag", linear_drag)
            .field("gravity_scale", gravity_scale)
            .field("is_static", is_static)
            .field("is_simulated", is_simulated)
            .field("collider", collider)
            .finish()
    }
}

impl Body {
    /// Constructs a dynamic, simulated [`Body`] at rest, with no drag and normal gravity.
    #[inline]
    pub fn new(position: impl Into<FreePoint>, size: impl Into<FreeSize>) -> Self {
        Self {
            position: position.into(),
            offset: FreeVector::zero(),
            size: size.into(),
            velocity: Vector2D::zero(),
            linear_drag: 0.0,
            gravity_scale: 1.0,
            is_static: false,
            is_simulated: true,
            collider: None,
        }
    }

    /// Constructs a static [`Body`], which will never move.
    #[inline]
    pub fn new_static(position: impl Into<FreePoint>, size: impl Into<FreeSize>) -> Self {
        Self {
            is_static: true,
            ..Self::new(position, size)
        }
    }

    /// Returns a copy of this body with the given velocity.
    #[must_use]
    #[inline]
    pub fn with_velocity(self, velocity: Vector2D<FreeCoordinate, Velocity>) -> Self {
        Self {
            velocity,
            ..self
        }
    }

    /// The position used for collision: [`position`](Self::position) plus
    /// [`offset`](Self::offset).
    #[inline]
    pub fn effective_position(&self) -> FreePoint {
        self.position + self.offset
    }

    /// Moves the body so that its effective position is exactly `position`, discarding
    /// the accumulated [`offset`](Self::offset).
    #[inline]
    pub fn set_effective_position(&mut self, position: FreePoint) {
        self.position = position;
        self.offset = FreeVector::zero();
    }

    /// Returns the handle of the collider attached to this body, if any.
    #[inline]
    pub fn collider(&self) -> Option<ColliderHandle> {
        self.collider
    }

    /// Whether this body can be moved by integration or push-out.
    #[inline]
    pub fn is_dynamic(&self) -> bool {
        self.is_simulated && !self.is_static
    }

    /// Advances the body's velocity and offset by one step, using semi-implicit Euler
    /// integration: the velocity is updated first, and the new velocity is used to move.
    ///
    /// ```text
    /// acceleration = (−drag·vx, −gravity·gravity_scale − drag·vy)
    /// velocity    += acceleration · Δt
    /// offset      += velocity · Δt · pixels_per_unit
    /// ```
    ///
    /// Does nothing if the body is static or not simulated, or if the step is paused.
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn integrate(&mut self, context: &StepContext) -> BodyStepInfo {
        if !self.is_dynamic() || context.paused {
            return BodyStepInfo::default();
        }
        let dt = context.delta_t;

        let acceleration: Vector2D<FreeCoordinate, Acceleration> = vec2(
            -self.linear_drag * self.velocity.x,
            -(context.gravity * self.gravity_scale) - self.linear_drag * self.velocity.y,
        );
        let old_velocity = self.velocity;
        self.velocity += (acceleration * dt).cast_unit();

        let mut velocity_reset = false;
        if !is_finite_vector(self.velocity) {
            log::warn!(
                "resetting non-finite velocity {:?} of body at {:?}",
                self.velocity.refmt(&ConciseDebug),
                self.effective_position().refmt(&ConciseDebug),
            );
            self.velocity = Vector2D::zero();
            velocity_reset = true;
        }

        let displacement: FreeVector =
            (self.velocity * (dt * context.pixels_per_unit)).cast_unit();
        self.offset += displacement;

        BodyStepInfo {
            integrated: true,
            velocity_reset,
            delta_v: self.velocity - old_velocity,
            displacement,
        }
    }
}

/// Diagnostic data returned by [`Body::integrate()`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct BodyStepInfo {
    /// Whether the body was integrated at all (it is dynamic and time was not paused).
    pub integrated: bool,
    /// Whether the velocity was non-finite and has been reset to zero.
    pub velocity_reset: bool,
    /// Change in velocity during this step.
    pub delta_v: Vector2D<FreeCoordinate, Velocity>,
    /// Change in the body's offset during this step.
    pub displacement: FreeVector,
}
