//! Binary which runs a Flatland scene file for a fixed number of steps and prints where
//! every body ended up.

// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![forbid(unsafe_code)]

use std::io::Write as _;

use anyhow::Context as _;
use clap::Parser as _;

use flatland::time::Tick;
use flatland_headless::{SceneDescription, logging, run, write_positions};

mod command_options;
use command_options::HeadlessArgs;

fn main() -> Result<(), anyhow::Error> {
    // Destructure as a check that we're using all the args
    let HeadlessArgs {
        scene: scene_path,
        ticks,
        dt,
        relaxation_passes,
        logging: logging_args,
    } = HeadlessArgs::parse();

    logging::install(&logging_args)?;

    let mut scene = SceneDescription::read_from_file(&scene_path)?;
    if let Some(passes) = relaxation_passes {
        scene.config.relaxation_passes = passes;
    }
    let mut world = scene.build();
    log::debug!(
        "loaded {} bodies from {}",
        world.body_count(),
        scene_path.display()
    );

    let info = run(&mut world, ticks, Tick::from_seconds(dt));
    log::info!("{ticks} steps: {info}");
    if info.errors > 0 {
        log::warn!("{} collision pairs could not be resolved", info.errors);
    }

    let mut stdout = std::io::stdout().lock();
    write_positions(&world, &mut stdout).context("failed to write results")?;
    stdout.flush().context("failed to write results")?;
    Ok(())
}
