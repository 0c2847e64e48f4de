//! Algorithms for detecting overlap between boxes and pushing one out of another.

use core::fmt;

use euclid::{Vector2D, point2};
use manyfmt::Refmt as _;

use crate::math::{Aab, Axis, Corner, FreeCoordinate, FreePoint, FreeVector};
use crate::physics::{ColliderShape, Velocity};
use crate::util::ConciseDebug;

/// Returns whether the two boxes share any interior area.
///
/// Boxes which only touch along an edge or at a corner do not overlap. The result does not
/// depend on the order of the arguments.
#[inline]
pub fn check_overlap(a: &Aab, b: &Aab) -> bool {
    a.overlaps(b)
}

/// Returns whether two colliders, of the given shapes and with the given extents,
/// overlap.
#[inline]
pub fn collider_overlap(
    a_shape: ColliderShape,
    a_sides: &Aab,
    b_shape: ColliderShape,
    b_sides: &Aab,
) -> bool {
    match (a_shape, b_shape) {
        (ColliderShape::Box, ColliderShape::Box) => check_overlap(a_sides, b_sides),
    }
}

/// Computes where a moving collider should be placed so that it no longer overlaps an
/// obstacle collider, dispatching on their shapes.
///
/// See [`resolve_push_out()`] for the box–box rules.
#[inline]
pub fn collider_push_out(
    obstacle_shape: ColliderShape,
    obstacle: Aab,
    moving_shape: ColliderShape,
    moving: Aab,
    velocity: Vector2D<FreeCoordinate, Velocity>,
) -> PushOut {
    match (obstacle_shape, moving_shape) {
        (ColliderShape::Box, ColliderShape::Box) => resolve_push_out(obstacle, moving, velocity),
    }
}

/// Result of [`resolve_push_out()`].
#[derive(Clone, Copy, PartialEq)]
#[non_exhaustive]
pub struct PushOut {
    /// New position of the bottom-left corner of the moving box.
    pub position: FreePoint,
    /// Which rule chose the position.
    pub method: PushOutMethod,
}

impl PushOut {
    /// Returns the displacement from `original` (the moving box's previous bottom-left
    /// corner) to the new position.
    #[inline]
    pub fn displacement_from(&self, original: FreePoint) -> FreeVector {
        self.position - original
    }
}

impl fmt::Debug for PushOut {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { position, method } = self;
        f.debug_struct("PushOut")
            .field("position", &position.refmt(&ConciseDebug))
            .field("method", method)
            .finish()
    }
}

/// Which rule of [`resolve_push_out()`] determined the result.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum PushOutMethod {
    /// The velocity was zero, so each axis was pushed to whichever side of the obstacle
    /// is nearer to the moving box's center.
    Nearest,
    /// The velocity was purely vertical; the box was pushed above or below the obstacle.
    Vertical,
    /// The velocity was purely horizontal; the box was pushed left or right of the
    /// obstacle.
    Horizontal,
    /// The box was moved back along its inverse velocity until its leading corner
    /// reached the obstacle's edge perpendicular to `exit`.
    CornerIntercept {
        /// Axis along which the box now touches the obstacle.
        exit: Axis,
    },
    /// No usable intercept existed (the velocity was too small or not finite), so the
    /// box was pushed along the axis on which it was least deeply embedded.
    LeastPenetration {
        /// Axis along which the box was moved.
        axis: Axis,
    },
}

/// Computes a new position for the `moving` box such that it does not overlap the
/// `obstacle` box, taking into account the direction `moving` was travelling.
///
/// The obstacle is treated as immovable, and the velocity is not changed. The rules,
/// with `w` and `h` the size of `moving`, are:
///
/// * **Zero velocity:** on each axis independently, the box goes to whichever side of the
///   obstacle is nearer to the box's center. Ties go left and bottom.
/// * **Vertical velocity:** X is unchanged; the box goes below the obstacle
///   (`obstacle.bottom() − h`) if it was moving up, and on top of it otherwise.
/// * **Horizontal velocity:** Y is unchanged; the box goes to the left of the obstacle
///   (`obstacle.left() − w`) if it was moving right, and to its right otherwise.
/// * **Diagonal velocity:** the corner of the box that leads in the direction of travel is
///   traced back along the inverse velocity, and the box is placed so that corner sits on
///   the first obstacle edge the trace crosses. If the trace crosses both edges at the same
///   point, the vertical edge (the X axis exit) is preferred.
///
/// Placement on an edge is exact: the resulting box touches the obstacle but, by
/// [`check_overlap()`], does not overlap it.
///
/// This function does not itself check for overlap; if the boxes are already separate,
/// the box is still moved to the side of the obstacle the rules select.
///
/// ```
/// use flatland::euclid::{point2, vec2};
/// use flatland::math::Aab;
/// use flatland::physics::{PushOutMethod, resolve_push_out};
///
/// let wall = Aab::new(0.0, 10.0, 0.0, 10.0);
/// let falling = Aab::new(2.0, 6.0, 8.0, 12.0);
/// let push_out = resolve_push_out(wall, falling, vec2(0.0, -5.0));
///
/// assert_eq!(push_out.position, point2(2.0, 10.0));
/// assert_eq!(push_out.method, PushOutMethod::Vertical);
/// ```
#[allow(clippy::missing_inline_in_public_items)]
pub fn resolve_push_out(
    obstacle: Aab,
    moving: Aab,
    velocity: Vector2D<FreeCoordinate, Velocity>,
) -> PushOut {
    let size = moving.size();
    let inverse: FreeVector = (-velocity).cast_unit();

    match (velocity.x == 0.0, velocity.y == 0.0) {
        (true, true) => {
            let center = moving.center();
            let nearest = |axis: Axis| {
                let (lower, upper) = obstacle.range(axis);
                if (lower - center[axis]).abs() <= (upper - center[axis]).abs() {
                    place_before(lower, size[axis])
                } else {
                    upper
                }
            };
            PushOut {
                position: point2(nearest(Axis::X), nearest(Axis::Y)),
                method: PushOutMethod::Nearest,
            }
        }
        (true, false) => PushOut {
            position: point2(
                moving.left(),
                place_along(&obstacle, Axis::Y, inverse.y, size.height),
            ),
            method: PushOutMethod::Vertical,
        },
        (false, true) => PushOut {
            position: point2(
                place_along(&obstacle, Axis::X, inverse.x, size.width),
                moving.bottom(),
            ),
            method: PushOutMethod::Horizontal,
        },
        (false, false) => corner_intercept(&obstacle, &moving, inverse),
    }
}

/// Diagonal case of [`resolve_push_out()`].
///
/// The leading corner moving along the inverse velocity reaches the obstacle's exit edge on
/// each axis at parameter `t` (in units of the inverse velocity). The smaller `t` is the
/// edge crossed first; the box keeps the corresponding point of the trace on the other
/// axis.
fn corner_intercept(obstacle: &Aab, moving: &Aab, inverse: FreeVector) -> PushOut {
    let size = moving.size();
    // Corner of `moving` that leads in the direction of travel, which is opposite the
    // inverse velocity.
    let corner = Corner::leading(-inverse);
    let corner_point = moving.corner(corner);

    let t_for = |axis: Axis| -> FreeCoordinate {
        let (lower, upper) = obstacle.range(axis);
        let line = if inverse[axis] < 0.0 { lower } else { upper };
        (line - corner_point[axis]) / inverse[axis]
    };
    let t_x = t_for(Axis::X);
    let t_y = t_for(Axis::Y);

    let exit = match (t_x.is_finite(), t_y.is_finite()) {
        (true, true) => {
            if t_x <= t_y {
                Axis::X
            } else {
                Axis::Y
            }
        }
        (true, false) => Axis::X,
        (false, true) => Axis::Y,
        (false, false) => return least_penetration(obstacle, moving, inverse),
    };
    let t = match exit {
        Axis::X => t_x,
        Axis::Y => t_y,
    };

    let mut position = moving.lower_bounds_p();
    position[exit] = place_along(obstacle, exit, inverse[exit], size[exit]);
    let other = exit.other();
    // Equivalent to moving the corner to the intercept and subtracting its offset within
    // the box, but without the extra rounding.
    let slid = moving.lower_bounds_p()[other] + t * inverse[other];
    if slid.is_finite() {
        position[other] = slid;
    }

    log::trace!(
        target: "flatland::physics::collision",
        "corner intercept: {corner:?} exits {exit:x} at t={t}"
    );

    PushOut {
        position,
        method: PushOutMethod::CornerIntercept { exit },
    }
}

/// Fallback for [`corner_intercept()`] when neither edge has a finite intercept.
fn least_penetration(obstacle: &Aab, moving: &Aab, inverse: FreeVector) -> PushOut {
    let size = moving.size();
    let depth = |axis: Axis| {
        let (o_lower, o_upper) = obstacle.range(axis);
        let (m_lower, m_upper) = moving.range(axis);
        o_upper.min(m_upper) - o_lower.max(m_lower)
    };
    // NaN depth (which can only come from NaN sides) counts as deepest.
    let (depth_x, depth_y) = (depth(Axis::X), depth(Axis::Y));
    let axis = if depth_x <= depth_y || depth_y.is_nan() {
        Axis::X
    } else {
        Axis::Y
    };

    let direction = if inverse[axis].is_nan() || inverse[axis] == 0.0 {
        // No usable direction at all: use the nearer side, as for zero velocity.
        let (lower, upper) = obstacle.range(axis);
        let center = moving.center()[axis];
        if (lower - center).abs() <= (upper - center).abs() {
            -1.0
        } else {
            1.0
        }
    } else {
        inverse[axis]
    };

    log::debug!(
        "no finite corner intercept for inverse velocity {:?}; pushing along {axis:x}",
        inverse.refmt(&ConciseDebug)
    );

    let mut position = moving.lower_bounds_p();
    position[axis] = place_along(obstacle, axis, direction, size[axis]);
    PushOut {
        position,
        method: PushOutMethod::LeastPenetration { axis },
    }
}

/// Returns the new lower coordinate on `axis` of a box of the given `extent` which has been
/// pushed out of `obstacle` in the direction given by the sign of `inverse_component`.
fn place_along(
    obstacle: &Aab,
    axis: Axis,
    inverse_component: FreeCoordinate,
    extent: FreeCoordinate,
) -> FreeCoordinate {
    let (lower, upper) = obstacle.range(axis);
    if inverse_component < 0.0 {
        place_before(lower, extent)
    } else {
        upper
    }
}

/// Returns a lower coordinate for a box of the given `extent` such that the box ends at
/// or before `edge`, as close to `edge` as the arithmetic allows.
///
/// `edge - extent` is the exact answer, but after rounding, adding `extent` back can land
/// past `edge`; in that case the result is stepped downward until it doesn't.
pub(crate) fn place_before(edge: FreeCoordinate, extent: FreeCoordinate) -> FreeCoordinate {
    let mut lower = edge - extent;
    let magnitude = edge.abs().max(extent.abs());
    let mut step = magnitude.next_up() - magnitude;
    while lower + extent > edge {
        lower -= step;
        step *= 2.0;
    }
    lower
}
