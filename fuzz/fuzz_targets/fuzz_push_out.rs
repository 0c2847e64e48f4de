#![no_main]
extern crate flatland;

use flatland::euclid::Vector2D;
use flatland::math::{Aab, FreeCoordinate, NotNan};
use flatland::physics::{Velocity, resolve_push_out};

use libfuzzer_sys::fuzz_target;

/// Coordinates beyond this are not interesting and risk overflow to infinity.
const LIMIT: FreeCoordinate = 1e9;

fuzz_target!(|input: (Aab, Aab, [NotNan<FreeCoordinate>; 2])| {
    let (obstacle, moving, velocity) = input;
    let velocity: Vector2D<FreeCoordinate, Velocity> =
        velocity.map(NotNan::into_inner).into();

    let in_range = |aab: &Aab| {
        aab.sides().iter().all(|side| side.abs() < LIMIT)
            && aab.size().width > 0.0
            && aab.size().height > 0.0
    };
    if !in_range(&obstacle)
        || !in_range(&moving)
        || !(velocity.x.is_finite() && velocity.y.is_finite())
        || !obstacle.overlaps(&moving)
    {
        return;
    }

    let push_out = resolve_push_out(obstacle, moving, velocity);
    let moved = Aab::try_from_lower_size(push_out.position, moving.size()).unwrap();

    assert!(
        !moved.overlaps(&obstacle),
        "{obstacle:?} {moving:?} {velocity:?} -> {push_out:?} still overlapping"
    );
});
