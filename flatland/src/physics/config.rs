use core::fmt;
use core::num::NonZeroU8;

use crate::math::{FreeCoordinate, NotNan, notnan};
use crate::time::Tick;

#[cfg(doc)]
use crate::physics::{Body, PhysicsWorld};

// -------------------------------------------------------------------------------------------------

/// The global characteristics of a [`PhysicsWorld`].
#[derive(Clone, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "save", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "save", serde(default))]
#[non_exhaustive]
pub struct PhysicsConfig {
    /// Downward acceleration applied to every dynamic body, in world units per second²,
    /// before multiplying by the body's [`gravity_scale`](Body::gravity_scale).
    ///
    /// Positive values pull toward −Y.
    pub gravity: NotNan<FreeCoordinate>,

    /// Number of scene units (pixels) per world unit. Velocities are in world units per
    /// second, so this converts them into scene displacements.
    pub pixels_per_unit: NotNan<FreeCoordinate>,

    /// Maximum number of times the collision phase of a step is repeated.
    ///
    /// Resolving one pair can push a body into another that was already visited.
    /// Additional passes give such chains a chance to settle; a pass in which nothing
    /// moved ends the step early.
    pub relaxation_passes: NonZeroU8,
}

impl PhysicsConfig {
    /// The configuration used when none is specified.
    pub const DEFAULT: Self = Self {
        gravity: notnan!(9.81),
        pixels_per_unit: notnan!(100.0),
        relaxation_passes: NonZeroU8::MIN,
    };

    /// Configuration with no gravity, for tests and top-down scenes.
    pub const ZERO_GRAVITY: Self = Self {
        gravity: notnan!(0.0),
        ..Self::DEFAULT
    };

    /// Combines this configuration with a [`Tick`] to produce the parameters for one
    /// step.
    #[inline]
    pub fn context(&self, tick: Tick) -> StepContext {
        StepContext {
            delta_t: tick.delta_t_f64(),
            gravity: self.gravity.into_inner(),
            pixels_per_unit: self.pixels_per_unit.into_inner(),
            paused: tick.paused(),
        }
    }
}

impl fmt::Debug for PhysicsConfig {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            gravity,
            pixels_per_unit,
            relaxation_passes,
        } = self;
        f.debug_struct("PhysicsConfig")
            .field("gravity", &gravity.into_inner())
            .field("pixels_per_unit", &pixels_per_unit.into_inner())
            .field("relaxation_passes", relaxation_passes)
            .finish()
    }
}

impl Default for PhysicsConfig {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

// -------------------------------------------------------------------------------------------------

/// Everything [`Body::integrate()`] needs to know about the current step.
///
/// Obtain one from [`PhysicsConfig::context()`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub struct StepContext {
    /// Length of the step, in seconds.
    pub delta_t: FreeCoordinate,
    /// See [`PhysicsConfig::gravity`].
    pub gravity: FreeCoordinate,
    /// See [`PhysicsConfig::pixels_per_unit`].
    pub pixels_per_unit: FreeCoordinate,
    /// See [`Tick::paused()`].
    pub paused: bool,
}
