use clap::ArgAction;
use tracing::level_filters::LevelFilter;

/// The `-v`/`-q` flag pair shared by every invocation.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct Verbosity {
    #[clap(
        short,
        long,
        action = ArgAction::Count,
        help = "Use verbose output (or `-vv` and `-vvv` for more verbose output)",
        global = true,
        overrides_with = "quiet",
    )]
    verbose: u8,

    #[clap(
        short,
        long,
        action = ArgAction::Count,
        help = "Only log errors (or `-qq` for silent output)",
        global = true,
        overrides_with = "verbose",
    )]
    quiet: u8,
}

impl Verbosity {
    /// Maps the flag counts onto a `tracing` level filter.
    ///
    /// The default is `WARN`: progress output goes to stdout, so logging
    /// only has to carry diagnostics.
    pub fn level_filter(&self) -> LevelFilter {
        match (self.quiet, self.verbose) {
            (0, 0) => LevelFilter::WARN,
            (0, 1) => LevelFilter::INFO,
            (0, 2) => LevelFilter::DEBUG,
            (0, _) => LevelFilter::TRACE,
            (1, _) => LevelFilter::ERROR,
            (_, _) => LevelFilter::OFF,
        }
    }
}
