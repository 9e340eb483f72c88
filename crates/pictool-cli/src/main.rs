// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// pictool — apply one pixel filter to an image.
//
// Entry point. Parses the command line, loads the optional config, initialises
// logging, then runs decode -> filter -> encode.

mod cli;

use std::io;
use std::process::ExitCode;

use pictool_core::ToolConfig;
use pictool_core::error::PictoolError;
use pictool_core::human_errors::humanize_error;
use pictool_filters::{FilterContext, FilterRegistry, Picture};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cli::{Invocation, Verbosity};

fn main() -> ExitCode {
    let registry = FilterRegistry::builtin();

    // Usage errors (unknown filter, bad option, missing input) exit here with
    // status 2 before any file is touched.
    let matches = cli::command(&registry).get_matches();
    let Some(invocation) = Invocation::from_matches(&registry, &matches) else {
        return ExitCode::from(2);
    };

    let config = match &invocation.config {
        Some(path) => match ToolConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                init_tracing(invocation.verbosity, &ToolConfig::default().log_filter);
                return report(&err);
            }
        },
        None => ToolConfig::default(),
    };

    init_tracing(invocation.verbosity, &config.log_filter);

    match run(&registry, &invocation, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err),
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins over `-v`/`-q`, which win
/// over the config file.
fn init_tracing(verbosity: Verbosity, configured: &str) {
    let directive = match verbosity {
        Verbosity::Quiet => "error",
        Verbosity::Normal => configured,
        Verbosity::Verbose => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(
    registry: &FilterRegistry,
    invocation: &Invocation,
    config: &ToolConfig,
) -> Result<(), PictoolError> {
    let filter = registry.get(&invocation.filter)?;
    let params = registry.resolve(&invocation.filter, &invocation.values, config)?;

    let picture = Picture::open(&invocation.input)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut ctx = FilterContext::new(invocation.seed.or(config.seed), &mut out);
    let picture = picture.apply(filter, &params, &mut ctx)?;

    match &invocation.output {
        Some(path) => picture.save(path)?,
        None if picture.is_modified() => {
            warn!(filter = filter.name(), "No output path given; result discarded");
        }
        None => info!("No output path given"),
    }
    Ok(())
}

/// Log the raw error, print a human-readable version to stderr, and pick the
/// failure exit code. Tracing must already be initialised.
fn report(err: &PictoolError) -> ExitCode {
    tracing::error!(error = %err, "pictool failed");
    let human = humanize_error(err);
    eprintln!("error: {}", human.message);
    eprintln!("  hint: {}", human.suggestion);
    ExitCode::FAILURE
}
