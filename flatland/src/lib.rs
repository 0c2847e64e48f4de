//! Flatland is the physics core of a small 2D scene engine: bodies carrying
//! axis-aligned box colliders, moved each frame by a semi-implicit Euler integrator
//! and then separated from whatever they ended up overlapping.
//!
//! ## Concepts
//!
//! * A [`Body`] has a position, a size, and a velocity, and is either *static*
//!   (never moves) or *dynamic*.
//! * A [`Collider`] gives a body its collision shape. At present the only shape is an
//!   axis-aligned box, derived from the body's size and the collider's local offset
//!   and scale.
//! * A [`PhysicsWorld`] owns bodies and colliders in an arena, links them by
//!   handle, and advances them in time with [`PhysicsWorld::step()`].
//! * When a dynamic body is found overlapping another body, it is *pushed out* back
//!   along its inverse velocity. See [`resolve_push_out()`] for the exact rules.
//!
//! ## Coordinate system
//!
//! All positions share one scene space, [`Scene`](math::Scene), with +X to the right
//! and +Y up. Body positions refer to the bottom-left corner of the body. Velocities
//! are in world units per second and are scaled by
//! [`PhysicsConfig::pixels_per_unit`] when converted into scene displacements.
//!
//! ## Crate features
//!
//! This crate, `flatland`, defines the following feature flags:
//!
//! * `save`:
//!   Enable [`serde`] serialization of [`PhysicsConfig`], collider shapes, and the
//!   basic math types.
//! * `arbitrary`: Adds implementations of the [`arbitrary::Arbitrary`] trait for
//!   fuzzing / property testing on types defined by this crate.
//!
//! ## Dependencies and global state
//!
//! `flatland` has no global state. However, it does write log messages using the
//! [`log`] crate and is therefore subject to that global configuration.
//!
//! `flatland` depends on and re-exports the following crates as part of its public
//! API:
//!
//! * [`euclid`] for vector math (as `flatland::euclid`).
//! * [`ordered_float`] (as `flatland::math::NotNan`).
//!
//! [`Body`]: crate::physics::Body
//! [`Collider`]: crate::physics::Collider
//! [`PhysicsWorld`]: crate::physics::PhysicsWorld
//! [`PhysicsWorld::step()`]: crate::physics::PhysicsWorld::step
//! [`PhysicsConfig`]: crate::physics::PhysicsConfig
//! [`PhysicsConfig::pixels_per_unit`]: crate::physics::PhysicsConfig::pixels_per_unit
//! [`resolve_push_out()`]: crate::physics::resolve_push_out
#![cfg_attr(
    not(feature = "arbitrary"),
    doc = "[`arbitrary::Arbitrary`]: https://docs.rs/arbitrary/1/arbitrary/trait.Arbitrary.html"
)]
#![cfg_attr(not(feature = "save"), doc = "[`serde`]: https://docs.rs/serde/")]
// Lenience for tests.
#![cfg_attr(test,
    allow(clippy::float_cmp), // deterministic tests
)]

pub mod math;
pub mod physics;
pub mod time;
pub mod util;

/// Re-export the version of the [`euclid`] vector math library we're using.
#[doc(no_inline)]
pub use euclid;
