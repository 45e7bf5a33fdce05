//! Structures shared by cx command line tools

use clap::{value_parser, ArgAction, Args};

/// Common way to set logging levels.
///
/// Without any flag only warnings and errors are shown.
#[derive(Debug, Clone, Copy, Args)]
pub struct LoggingArgs {
    /// Show more logging, up to three times
    #[clap(short = 'v', long = "verbose", value_parser = value_parser!(u8).range(0..=3), action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,
    /// Show less logging, up to two times
    #[clap(short = 'q', long = "quiet", value_parser = value_parser!(u8).range(0..=2), action = ArgAction::Count, conflicts_with = "verbose")]
    quiet: u8,
}

impl LoggingArgs {
    /// The sum of `-v` and `-q` flags, each `-q` counting negative
    pub fn verbosity(&self) -> i8 {
        self.verbose as i8 - self.quiet as i8
    }

    /// Gets the logging level based on whether `-v[vv]` or `-q[q]` has been used
    #[cfg(feature = "tracing")]
    pub fn log_level_filter(&self) -> tracing::level_filters::LevelFilter {
        use tracing::level_filters::LevelFilter;
        match self.verbosity() {
            i8::MIN..=-2 => LevelFilter::OFF,
            -1 => LevelFilter::ERROR,
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}
