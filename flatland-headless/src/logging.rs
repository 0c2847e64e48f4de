//! Logging to stderr for the command-line tool.

use anyhow::Context as _;
use log::Log as _;

/// A [`clap::Args`] struct for options controlling log output to stderr.
#[derive(Clone, Debug, clap::Args)]
#[expect(clippy::module_name_repetitions)]
pub struct LoggingArgs {
    /// Additional logging to stderr, including every push-out.
    #[arg(long = "verbose", short = 'v')]
    pub verbose: bool,

    /// Remove timestamps from logs so that they are closer to deterministic.
    ///
    /// This option is intended for internal tests only.
    #[arg(long = "simplify-log-format", hide = true)]
    pub simplify_log_format: bool,
}

/// Install a [`log`] global logger based on user-provided `options`.
pub fn install(options: &LoggingArgs) -> Result<(), anyhow::Error> {
    use log::LevelFilter::{Error, Info, Off, Trace};

    let &LoggingArgs {
        verbose,
        simplify_log_format,
    } = options;

    let stderr_logger = *simplelog::WriteLogger::new(
        if verbose { Trace } else { Info },
        // Note: This has no target filters because `FlatlandLogger` calls
        // `util::log::standard_filter` to do it.
        simplelog::ConfigBuilder::new()
            .set_target_level(Off)
            .set_location_level(Off)
            .set_time_level(if simplify_log_format { Off } else { Error })
            .build(),
        std::io::stderr(),
    );
    let max_level = simplelog::SharedLogger::level(&stderr_logger);

    log::set_boxed_logger(Box::new(FlatlandLogger { stderr_logger }))
        .context("failed to initialize logging")?;
    log::set_max_level(max_level);
    Ok(())
}

/// [`log::Log`] implementation that [`install()`] registers globally.
struct FlatlandLogger {
    stderr_logger: simplelog::WriteLogger<std::io::Stderr>,
}

impl log::Log for FlatlandLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        flatland::util::log::standard_filter(metadata) && self.stderr_logger.enabled(metadata)
    }

    fn log(&self, record: &log::Record<'_>) {
        if self.enabled(record.metadata()) {
            self.stderr_logger.log(record);
        }
    }

    fn flush(&self) {
        self.stderr_logger.flush();
    }
}
