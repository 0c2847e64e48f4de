use core::num::NonZeroU8;

use euclid::{point2, vec2};
use pretty_assertions::assert_eq;
use rstest::rstest;

use super::*;
use crate::math::{Aab, Axis};
use crate::time::Tick;

fn frame() -> Tick {
    Tick::from_seconds(1.0 / 60.0)
}

/// Inserts `body` with a box collider covering it.
fn insert_boxed(world: &mut PhysicsWorld, name: &str, body: Body) -> (BodyHandle, ColliderHandle) {
    let body = world.insert_body(name, body);
    let collider = world.insert_collider(Collider::new_box());
    world.attach(body, collider).unwrap();
    (body, collider)
}

fn floor() -> Body {
    Body::new_static([0.0, 0.0], [1000.0, 100.0])
}

#[test]
fn falling_box_comes_to_rest_on_floor() {
    let mut world = PhysicsWorld::default();
    let (floor, floor_collider) = insert_boxed(&mut world, "floor", floor());
    let (falling, falling_collider) =
        insert_boxed(&mut world, "box", Body::new([100.0, 150.0], [50.0, 50.0]));

    let mut events = Vec::new();
    let mut total = StepInfo::default();
    for _ in 0..120 {
        total += world.step(frame(), |event| events.push(event));
    }

    let body = world.body(falling).unwrap();
    assert_eq!(body.position, point2(100.0, 100.0));
    assert_eq!(body.offset, vec2(0.0, 0.0));
    assert!(body.velocity.y < 0.0, "push-out does not change velocity");
    assert!(
        !world
            .collider_sides(falling_collider)
            .unwrap()
            .overlaps(&world.collider_sides(floor_collider).unwrap())
    );

    assert!(!events.is_empty());
    assert_eq!(total.overlaps, events.len());
    assert_eq!(total.bodies_integrated, 120);
    assert_eq!(total.errors, 0);
    for event in &events {
        assert_eq!((event.mover, event.obstacle), (falling, floor));
        assert_eq!(event.push_out.method, PushOutMethod::Vertical);
        assert_eq!(event.push_out.position, point2(100.0, 100.0));
    }
}

#[test]
fn static_bodies_never_move() {
    let mut world = PhysicsWorld::default();
    let mut wall = Body::new_static([0.1, 0.2], [10.3, 10.7]).with_velocity(vec2(5.0, 5.0));
    wall.offset = vec2(0.01, 0.02);
    let (wall, _) = insert_boxed(&mut world, "wall", wall);
    let (_, _) = insert_boxed(
        &mut world,
        "intruder",
        Body::new([5.0, 5.0], [3.0, 3.0]).with_velocity(vec2(-1.0, 0.5)),
    );
    let before = world.body(wall).unwrap().clone();

    for _ in 0..10 {
        let _ = world.step(frame(), |_| {});
    }

    let after = world.body(wall).unwrap();
    assert_eq!(after.position.x.to_bits(), before.position.x.to_bits());
    assert_eq!(after.position.y.to_bits(), before.position.y.to_bits());
    assert_eq!(after.offset.x.to_bits(), before.offset.x.to_bits());
    assert_eq!(after.offset.y.to_bits(), before.offset.y.to_bits());
    assert_eq!(after, &before);
}

#[test]
fn static_pairs_are_not_visited() {
    let mut world = PhysicsWorld::default();
    let (a, _) = insert_boxed(&mut world, "a", Body::new_static([0.0, 0.0], [10.0, 10.0]));
    let (b, _) = insert_boxed(&mut world, "b", Body::new_static([5.0, 5.0], [10.0, 10.0]));

    let info = world.step(frame(), |event| panic!("unexpected {event:?}"));

    assert_eq!(info.pairs_tested, 0);
    assert_eq!(info.overlaps, 0);
    assert_eq!(world.body(a).unwrap().position, point2(0.0, 0.0));
    assert_eq!(world.body(b).unwrap().position, point2(5.0, 5.0));
}

#[test]
fn resolve_pair_static_mover_is_an_error() {
    let mut world = PhysicsWorld::default();
    let (a, _) = insert_boxed(&mut world, "a", Body::new_static([0.0, 0.0], [10.0, 10.0]));
    let (b, _) = insert_boxed(&mut world, "b", Body::new([5.0, 5.0], [10.0, 10.0]));

    let error = world.resolve_pair(a, b).unwrap_err();
    assert_eq!(
        error,
        PairError::Static(StaticPairError {
            mover: a,
            obstacle: b
        })
    );
    assert_eq!(
        error.to_string(),
        "body #0 is static and cannot be pushed out of body #1"
    );
    assert_eq!(world.body(a).unwrap().position, point2(0.0, 0.0));
}

#[rstest]
fn resolve_pair_rejects_unsimulated(#[values(false, true)] exclude_obstacle: bool) {
    let mut world = PhysicsWorld::default();
    let (a, _) = insert_boxed(&mut world, "a", Body::new([5.0, 5.0], [10.0, 10.0]));
    let (b, _) = insert_boxed(&mut world, "b", Body::new_static([0.0, 0.0], [10.0, 10.0]));
    let excluded = if exclude_obstacle { b } else { a };
    world.body_mut(excluded).unwrap().is_simulated = false;

    let error = world.resolve_pair(a, b).unwrap_err();
    assert_eq!(error, PairError::NotSimulated { body: excluded });
    assert_eq!(error.to_string(), format!("{excluded} is not simulated"));
    assert_eq!(world.body(a).unwrap().effective_position(), point2(5.0, 5.0));
}

#[test]
fn resolve_pair_without_collider() {
    let mut world = PhysicsWorld::default();
    let (a, _) = insert_boxed(&mut world, "a", Body::new([0.0, 0.0], [10.0, 10.0]));
    let b = world.insert_body("b", Body::new([5.0, 5.0], [10.0, 10.0]));
    assert_eq!(
        world.resolve_pair(a, b),
        Err(PairError::NoCollider { body: b })
    );
}

#[test]
fn resolve_pair_not_overlapping() {
    let mut world = PhysicsWorld::default();
    let (a, _) = insert_boxed(&mut world, "a", Body::new([0.0, 0.0], [10.0, 10.0]));
    let (b, _) = insert_boxed(&mut world, "b", Body::new([10.0, 0.0], [10.0, 10.0]));
    assert_eq!(world.resolve_pair(a, b), Ok(None));
    assert_eq!(world.body(a).unwrap().position, point2(0.0, 0.0));
}

#[test]
fn push_out_resets_offset() {
    let mut world = PhysicsWorld::default();
    let (_, _) = insert_boxed(&mut world, "floor", floor());
    let mut body = Body::new([20.0, 200.0], [10.0, 10.0]).with_velocity(vec2(0.0, -1.0));
    body.offset = vec2(0.0, -105.0);
    let (b, _) = insert_boxed(&mut world, "b", body);

    let info = world.step(frame().pause(), |_| {});

    assert_eq!(info.moved, 1);
    let body = world.body(b).unwrap();
    assert_eq!(body.position, point2(20.0, 100.0));
    assert_eq!(body.offset, vec2(0.0, 0.0));
}

#[test]
fn paused_tick_does_not_integrate() {
    let mut world = PhysicsWorld::default();
    let (b, _) = insert_boxed(
        &mut world,
        "b",
        Body::new([0.0, 500.0], [10.0, 10.0]).with_velocity(vec2(3.0, 0.0)),
    );
    let before = world.body(b).unwrap().clone();

    let info = world.step(frame().pause(), |_| {});

    assert_eq!(info.bodies_integrated, 0);
    assert_eq!(world.body(b).unwrap(), &before);
}

/// Two boxes stacked slightly into each other and into the floor, all falling.
///
/// `upper` is resolved first, against `lower`; then `lower` is pushed up out of the floor,
/// back into `upper`. Only a second pass can fix that.
fn stacked_world(relaxation_passes: u8) -> (PhysicsWorld, BodyHandle, BodyHandle) {
    let mut config = PhysicsConfig::DEFAULT;
    config.relaxation_passes = NonZeroU8::new(relaxation_passes).unwrap();
    let mut world = PhysicsWorld::new(config);
    let falling = vec2(0.0, -1.0);
    let (upper, _) = insert_boxed(
        &mut world,
        "upper",
        Body::new([100.0, 135.0], [50.0, 50.0]).with_velocity(falling),
    );
    let (lower, _) = insert_boxed(
        &mut world,
        "lower",
        Body::new([100.0, 90.0], [50.0, 50.0]).with_velocity(falling),
    );
    let (_, _) = insert_boxed(&mut world, "floor", floor());
    (world, upper, lower)
}

#[rstest]
#[case::single(1, 1, 140.0)]
#[case::two(2, 2, 150.0)]
#[case::stops_early(5, 3, 150.0)]
fn relaxation_passes(
    #[case] allowed: u8,
    #[case] expected_passes: usize,
    #[case] expected_upper_y: f64,
) {
    let (mut world, upper, lower) = stacked_world(allowed);

    // Paused so that only the collision phase acts.
    let info = world.step(frame().pause(), |_| {});

    assert_eq!(info.passes, expected_passes);
    assert_eq!(world.body(lower).unwrap().position.y, 100.0);
    assert_eq!(world.body(upper).unwrap().position.y, expected_upper_y);
    assert_eq!(info.errors, 0);
}

#[test]
fn invalid_body_does_not_stop_the_step() {
    let mut world = PhysicsWorld::default();
    let (_, _) = insert_boxed(&mut world, "floor", floor());
    let (bad, _) = insert_boxed(&mut world, "bad", Body::new([0.0, 0.0], [f64::NAN, 1.0]));
    let (good, _) = insert_boxed(
        &mut world,
        "good",
        Body::new([20.0, 95.0], [10.0, 10.0]).with_velocity(vec2(0.0, -1.0)),
    );

    let info = world.step(frame().pause(), |_| {});

    // bad–floor, bad–good, and good–bad fail; good–floor succeeds.
    assert_eq!(info.errors, 3);
    assert_eq!(info.moved, 1);
    assert_eq!(world.body(good).unwrap().position, point2(20.0, 100.0));
    assert!(matches!(
        world.resolve_pair(bad, good),
        Err(PairError::Extent { body, source: ExtentError::Invalid(_) }) if body == bad
    ));
}

#[test]
fn removed_body_is_skipped() {
    let mut world = PhysicsWorld::default();
    let (_, _) = insert_boxed(&mut world, "floor", floor());
    let (gone, collider) = insert_boxed(&mut world, "gone", Body::new([0.0, 50.0], [5.0, 5.0]));
    world.remove_body(gone);

    let info = world.step(frame(), |_| {});

    assert_eq!(info.pairs_tested, 0);
    assert_eq!(info.errors, 0);
    let context = world.config().context(frame());
    assert_eq!(
        world.integrate_body(gone, &context),
        Err(DetachedBodyError { body: gone })
    );
    assert!(matches!(
        world.collider_sides(collider),
        Err(ExtentError::Detached(_))
    ));
}

/// Every overlapping pair is separated after a single pair resolution, from any approach
/// direction, including boxes with offset colliders.
#[rstest]
fn resolved_pair_separates(
    #[values(-7.0, -0.5, 0.0, 0.5, 7.0)] vx: f64,
    #[values(-7.0, -0.5, 0.0, 0.5, 7.0)] vy: f64,
    #[values(0.0, 0.1)] collider_offset: f64,
) {
    let mut world = PhysicsWorld::new(PhysicsConfig::ZERO_GRAVITY);
    let (obstacle, obstacle_collider) =
        insert_boxed(&mut world, "obstacle", Body::new_static([0.3, 0.3], [1.0, 1.0]));
    let mover = world.insert_body(
        "mover",
        Body::new([0.7, 0.2], [0.4, 0.6]).with_velocity(vec2(vx, vy)),
    );
    let mover_collider = world.insert_collider(
        Collider::new_box().with_offset(vec2(collider_offset, collider_offset)),
    );
    world.attach(mover, mover_collider).unwrap();

    let push_out = world.resolve_pair(mover, obstacle).unwrap().unwrap();

    let sides: Aab = world.collider_sides(mover_collider).unwrap();
    assert!(
        !sides.overlaps(&world.collider_sides(obstacle_collider).unwrap()),
        "{push_out:?} left {sides:?}"
    );
    for axis in Axis::ALL {
        assert!((sides.lower_bounds_p()[axis] - push_out.position[axis]).abs() < 1e-9);
    }
}
