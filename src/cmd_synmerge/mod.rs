//! Subcommand modules for the `synmerge` binary.

pub mod cluster;
pub mod merge;
pub mod stat;

use clap::{Arg, ArgMatches};
use synmerge::libs::relation::LoadOptions;

/// `--score` and `--marker`, shared by every command that loads relations.
pub fn load_args() -> [Arg; 2] {
    [
        Arg::new("score")
            .long("score")
            .short('c')
            .num_args(1)
            .default_value("0")
            .allow_negative_numbers(true)
            .value_parser(clap::value_parser!(i64))
            .help("Minimum cutoff score in col3"),
        Arg::new("marker")
            .long("marker")
            .num_args(1)
            .default_value("###")
            .help("Lines starting with this string separate blocks"),
    ]
}

pub fn load_options(args: &ArgMatches) -> LoadOptions {
    LoadOptions {
        min_score: *args.get_one::<i64>("score").unwrap(),
        marker: args.get_one::<String>("marker").unwrap().to_string(),
    }
}
