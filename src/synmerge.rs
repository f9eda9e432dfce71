extern crate clap;
use clap::*;

use synmerge::libs::error::SynError;

mod cmd_synmerge;

fn main() {
    simple_logger::init_with_level(log::Level::Info).unwrap();

    let app = Command::new("synmerge")
        .version(crate_version!())
        .author(crate_authors!())
        .about("`synmerge` - merge pairwise gene synteny tables")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .subcommand(cmd_synmerge::merge::make_subcommand())
        .subcommand(cmd_synmerge::stat::make_subcommand())
        .subcommand(cmd_synmerge::cluster::make_subcommand())
        .after_help(
            r###"Subcommands:

* merge   - Join A-B, B-D and A-D tables and flag inconsistent triangles
* stat    - Load counters of synteny tables
* cluster - Fold any number of pairing files into one row per ortholog group

Exit status is 100 when an input has a malformed line or a duplicated ID.

"###,
        );

    // Check which subcommand the user ran...
    let res = match app.get_matches().subcommand() {
        Some(("merge", sub_matches)) => cmd_synmerge::merge::execute(sub_matches),
        Some(("stat", sub_matches)) => cmd_synmerge::stat::execute(sub_matches),
        Some(("cluster", sub_matches)) => cmd_synmerge::cluster::execute(sub_matches),
        _ => unreachable!(),
    };

    if let Err(err) = res {
        log::error!("{:#}", err);
        let code = if err.downcast_ref::<SynError>().is_some() {
            100
        } else {
            1
        };
        std::process::exit(code);
    }
}
