//! Running [`flatland`] scenes without any graphics or user interaction.
//!
//! A scene is described by a JSON file deserialized into [`SceneDescription`]: a
//! [`PhysicsConfig`](flatland::physics::PhysicsConfig) plus a list of named bodies, each
//! with an optional box collider. [`SceneDescription::build()`] turns that into a
//! [`PhysicsWorld`], [`run()`] steps it, and [`write_positions()`] reports the outcome.
//!
//! This library exists mainly for the `flatland-headless` binary and for tests.

// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![forbid(unsafe_code)]

use std::io;

use flatland::physics::{PhysicsWorld, StepInfo};
use flatland::time::Tick;
use flatland::util::{ConciseDebug, Refmt as _};

pub mod logging;
mod scene;
pub use scene::*;

/// Steps `world` `ticks` times, each with the given `tick`, and returns the accumulated
/// [`StepInfo`].
pub fn run(world: &mut PhysicsWorld, ticks: u32, tick: Tick) -> StepInfo {
    let mut total = StepInfo::default();
    for i in 0..ticks {
        let info = world.step(tick, |event| {
            log::trace!(
                "{} pushed out of {} by {:?}",
                event.mover,
                event.obstacle,
                event.push_out.method
            );
        });
        log::debug!("step {i}: {info}");
        total += info;
    }
    total
}

/// Writes one line per body, in insertion order, giving its name and effective position.
pub fn write_positions(world: &PhysicsWorld, out: &mut dyn io::Write) -> io::Result<()> {
    for (_, name, body) in world.bodies() {
        writeln!(
            out,
            "{name}: {:?}",
            body.effective_position().refmt(&ConciseDebug)
        )?;
    }
    Ok(())
}
