//! Bodies, box colliders, and the detection and resolution of overlaps between them.
//!
//! A step of the simulation has two phases. First every dynamic body is
//! [integrated](Body::integrate), accumulating its motion for the step. Then every ordered
//! pair of bodies is tested for overlap, and a dynamic body found overlapping another is
//! [pushed out](resolve_push_out) of it immediately, so later pairs see the corrected
//! position. [`PhysicsWorld::step()`] performs both phases.

mod body;
pub use body::*;
mod collider;
pub use collider::*;
mod collision;
pub use collision::*;
mod config;
pub use config::*;
mod world;
pub use world::*;

#[cfg(test)]
mod tests;

/// Unit-of-measure type for vectors that are velocity in world units per second.
#[expect(clippy::exhaustive_enums)]
#[derive(Debug, Eq, PartialEq)]
pub enum Velocity {}

/// Unit-of-measure type for vectors that are acceleration in world units per second².
#[expect(clippy::exhaustive_enums)]
#[derive(Debug, Eq, PartialEq)]
pub enum Acceleration {}
