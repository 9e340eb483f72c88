// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line surface. Every registered filter becomes a subcommand whose
// options are generated from the filter's parameter declarations.

use std::path::PathBuf;

use clap::builder::{BoolishValueParser, PossibleValuesParser};
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use pictool_core::types::{ParamKind, ParamSpec, Value};
use pictool_filters::{Filter, FilterRegistry};

/// How chatty logging should be, from `-v` / `-q`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

/// Everything parsed from one command line.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub filter: String,
    /// Options given explicitly on the command line, in declaration order.
    pub values: Vec<(String, Value)>,
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub seed: Option<u64>,
    pub verbosity: Verbosity,
}

/// Build the full `pictool` command from the registry.
pub fn command(registry: &FilterRegistry) -> Command {
    Command::new("pictool")
        .about("Apply a pixel filter to an image")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand_value_name("FILTER")
        .subcommand_help_heading("Filters")
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .help("JSON file with a seed, log filter, and per-filter defaults")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("N")
                .help("Seed for filters that use randomness")
                .value_parser(value_parser!(u64))
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log debug detail to stderr")
                .action(ArgAction::SetTrue)
                .conflicts_with("quiet")
                .global(true),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only log errors")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommands(registry.iter().map(filter_command))
}

fn filter_command(filter: &dyn Filter) -> Command {
    Command::new(filter.name())
        .about(filter.about())
        .args(filter.params().iter().map(param_arg))
        .arg(
            Arg::new("input")
                .value_name("INPUT")
                .help("Image to read")
                .required(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("output")
                .value_name("OUTPUT")
                .help("Where to write the result (omit to only run the filter)")
                .value_parser(value_parser!(PathBuf)),
        )
}

fn param_arg(spec: &ParamSpec) -> Arg {
    let default = Value::from(spec.default);
    let arg = Arg::new(spec.name)
        .long(spec.name)
        .value_name(spec.kind.value_name())
        .help(format!("{} [default: {default}]", spec.help));

    match spec.kind {
        ParamKind::Int => arg
            .value_parser(value_parser!(i64))
            .allow_negative_numbers(true),
        ParamKind::Float => arg
            .value_parser(value_parser!(f64))
            .allow_negative_numbers(true),
        // `--sepia` alone means true; an explicit value must use `=` so the
        // flag never swallows the input path.
        ParamKind::Bool => arg
            .value_parser(BoolishValueParser::new())
            .num_args(0..=1)
            .require_equals(true)
            .default_missing_value("true"),
        ParamKind::Choice(options) => {
            arg.value_parser(PossibleValuesParser::new(options.iter().copied()))
        }
    }
}

impl Invocation {
    /// Pull an `Invocation` out of matches produced by [`command`].
    ///
    /// Returns `None` if no filter subcommand was given, which `command`
    /// already forbids.
    pub fn from_matches(registry: &FilterRegistry, matches: &ArgMatches) -> Option<Self> {
        let (name, sub) = matches.subcommand()?;
        let filter = registry.get(name).ok()?;

        let values = filter
            .params()
            .iter()
            .filter_map(|spec| explicit_value(sub, spec).map(|v| (spec.name.to_owned(), v)))
            .collect();

        let verbosity = if sub.get_flag("verbose") {
            Verbosity::Verbose
        } else if sub.get_flag("quiet") {
            Verbosity::Quiet
        } else {
            Verbosity::Normal
        };

        Some(Self {
            filter: name.to_owned(),
            values,
            input: sub.get_one::<PathBuf>("input")?.clone(),
            output: sub.get_one::<PathBuf>("output").cloned(),
            config: sub.get_one::<PathBuf>("config").cloned(),
            seed: sub.get_one::<u64>("seed").copied(),
            verbosity,
        })
    }
}

fn explicit_value(matches: &ArgMatches, spec: &ParamSpec) -> Option<Value> {
    match spec.kind {
        ParamKind::Int => matches.get_one::<i64>(spec.name).copied().map(Value::Int),
        ParamKind::Float => matches.get_one::<f64>(spec.name).copied().map(Value::Float),
        ParamKind::Bool => matches.get_one::<bool>(spec.name).copied().map(Value::Bool),
        ParamKind::Choice(_) => matches.get_one::<String>(spec.name).cloned().map(Value::Text),
    }
}
