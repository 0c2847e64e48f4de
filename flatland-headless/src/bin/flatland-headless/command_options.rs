//! Command line option parsing.

use std::num::NonZeroU8;
use std::path::PathBuf;

use clap::Parser;

use flatland_headless::logging::LoggingArgs;

#[derive(Clone, Debug, Parser)]
#[command(author, about, version)]
pub(crate) struct HeadlessArgs {
    /// Scene description file, in JSON format.
    #[arg(value_name = "SCENE.json")]
    pub(crate) scene: PathBuf,

    /// Number of steps to simulate.
    #[arg(long = "ticks", value_name = "N", default_value_t = 60)]
    pub(crate) ticks: u32,

    /// Length of each step, in seconds.
    #[arg(
        long = "dt",
        value_name = "SECONDS",
        default_value = "0.016666666666666666",
        value_parser = parse_seconds,
    )]
    pub(crate) dt: f64,

    /// Number of collision passes per step, overriding the scene's configuration.
    #[arg(long = "relaxation-passes", value_name = "K")]
    pub(crate) relaxation_passes: Option<NonZeroU8>,

    #[command(flatten)]
    pub(crate) logging: LoggingArgs,
}

fn parse_seconds(input: &str) -> Result<f64, String> {
    let seconds: f64 = input.parse().map_err(|e| format!("{e}"))?;
    if seconds.is_finite() && seconds >= 0.0 {
        Ok(seconds)
    } else {
        Err(format!("must be a finite, non-negative number of seconds, not {seconds}"))
    }
}
