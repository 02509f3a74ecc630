//! The main entry point to the application.

#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::style,
    clippy::pedantic
)]

mod config;
mod error;
mod extract;
mod metadata;
mod verbosity;

use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::{env, io, panic};

use anyhow::bail;
use clap::Parser as _;
use colored::Colorize as _;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::verbosity::Verbosity;

#[derive(Debug, clap::Parser)]
#[clap(
    about = "Extract GIF frames as BMP files for the SD card loader",
    after_help = format!("{}: {}", "Repository".bold(), env!("CARGO_PKG_REPOSITORY")),
    version,
)]
struct Parser {
    /// Path to the source GIF.
    gif_file: PathBuf,

    /// Directory the BMP frames are written to.
    #[clap(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Directory the binary info record is written to.
    #[clap(long, value_name = "DIR")]
    metadata_dir: Option<PathBuf>,

    /// Read the output locations from a TOML file.
    #[clap(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[clap(flatten)]
    verbosity: Verbosity,
}

fn main() -> ExitCode {
    try_main().unwrap_or_else(|err| {
        let mut stderr = io::stderr().lock();
        _ = writeln!(stderr, "{}", "gif-to-bmp failed".bold().red());

        for cause in err.chain() {
            _ = writeln!(stderr, "  {}: {}", "Cause".bold(), cause);
        }

        ExitCode::FAILURE
    })
}

fn try_main() -> anyhow::Result<ExitCode> {
    setup_panic_hook();

    let args = match Parser::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // clap exits with 2 on usage errors; the loader's tooling
            // expects 1 for every pre-flight failure.
            err.print()?;
            let code = if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
            return Ok(code);
        }
    };
    setup_tracing(args.verbosity.level_filter());

    if !args.gif_file.exists() {
        bail!("file {} not found", args.gif_file.display());
    }

    if !has_gif_extension(&args.gif_file) {
        bail!("input file must be a GIF");
    }

    let mut config = match args.config {
        Some(ref path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(dir) = args.output_dir {
        config.set_output_dir(dir);
    }
    if let Some(dir) = args.metadata_dir {
        config.set_metadata_dir(dir);
    }

    // Extraction failures are reported on stdout but deliberately do not
    // change the exit status; downstream scripts read the printed frame
    // count instead.
    if let Err(err) = extract::extract_frames(&args.gif_file, &config) {
        println!("Error: {err}");
    }

    Ok(ExitCode::SUCCESS)
}

/// Accepts `anim.gif` and `anim.GIF` alike; everything else is rejected
/// before the file is ever opened.
fn has_gif_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gif"))
}

fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        original_hook(panic_info);

        let package_name = env!("CARGO_PKG_NAME");
        let repository = env!("CARGO_PKG_REPOSITORY");
        let package_version = env!("CARGO_PKG_VERSION");
        let args = env::args().collect::<Vec<_>>();

        eprintln!();
        eprintln!("{package_name} has panicked. This is a bug. Please report this at:");
        eprintln!("  {repository}/issues/new");
        eprintln!();
        eprintln!("If you can reliably reproduce this panic, re-run with RUST_BACKTRACE=1");
        eprintln!("and include the backtrace in your report.");
        eprintln!();
        eprintln!("Platform: {} {}", env::consts::OS, env::consts::ARCH);
        eprintln!("Version: {package_version}");
        eprintln!("Args: {args:?}");
    }));
}

fn setup_tracing(level_filter: LevelFilter) {
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::default().add_directive(
        format!("{}={level_filter}", env!("CARGO_CRATE_NAME"))
            .parse()
            .unwrap(),
    );

    let registry = tracing_subscriber::registry().with(filter);

    if level_filter == LevelFilter::TRACE {
        let subscriber = registry.with(
            tracing_subscriber::fmt::layer()
                .event_format(tracing_subscriber::fmt::format().pretty())
                .with_writer(io::stderr),
        );

        subscriber.init();
    } else {
        let subscriber = registry.with(tracing_subscriber::fmt::layer().with_writer(io::stderr));

        subscriber.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gif_extension_is_case_insensitive() {
        assert!(has_gif_extension(Path::new("anim.gif")));
        assert!(has_gif_extension(Path::new("anim.GIF")));
        assert!(has_gif_extension(Path::new("dir.with.dots/anim.Gif")));
    }

    #[test]
    fn non_gif_extensions_are_rejected() {
        assert!(!has_gif_extension(Path::new("anim.png")));
        assert!(!has_gif_extension(Path::new("anim.gif.png")));
        assert!(!has_gif_extension(Path::new("anim")));
        assert!(!has_gif_extension(Path::new("gif")));
        // A bare dotfile has no extension, only a stem.
        assert!(!has_gif_extension(Path::new(".gif")));
    }
}
