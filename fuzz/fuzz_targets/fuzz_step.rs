#![no_main]
extern crate flatland;

use flatland::math::{FreeCoordinate, NotNan};
use flatland::physics::{Body, Collider, PhysicsConfig, PhysicsWorld};
use flatland::time::Tick;

use libfuzzer_sys::fuzz_target;

type BodyInput = (
    [NotNan<FreeCoordinate>; 2],
    [NotNan<FreeCoordinate>; 2],
    [NotNan<FreeCoordinate>; 2],
    bool,
);

fuzz_target!(|input: (PhysicsConfig, Vec<BodyInput>)| {
    let (config, bodies) = input;
    if bodies.len() > 16 || config.gravity.into_inner().abs() > 1e4 {
        return;
    }

    let mut world = PhysicsWorld::new(config);
    let mut statics = Vec::new();
    for (position, size, velocity, is_static) in bodies {
        let size = size.map(|s| s.into_inner().abs());
        let mut body = Body::new(position.map(NotNan::into_inner), size);
        body.velocity = velocity.map(NotNan::into_inner).into();
        body.is_static = is_static;

        let handle = world.insert_body("body", body.clone());
        let collider = world.insert_collider(Collider::new_box());
        world.attach(handle, collider).unwrap();
        if is_static {
            statics.push((handle, body));
        }
    }

    for _ in 0..20 {
        let _info = world.step(Tick::arbitrary(), |event| {
            assert!(
                !statics.iter().any(|(handle, _)| *handle == event.mover),
                "static body was pushed"
            );
        });
    }

    for (handle, before) in &statics {
        let after = world.body(*handle).unwrap();
        assert_eq!(after.position, before.position);
        assert_eq!(after.offset, before.offset);
    }
});
