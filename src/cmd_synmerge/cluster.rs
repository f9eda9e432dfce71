use clap::*;
use std::io::Write;

use synmerge::libs::cluster::{read_pairs, PairClusters};

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("cluster")
        .about("Fold pairing files into ortholog groups")
        .after_help(
            r###"
Each input line pairs two IDs from different genomes in its first two
columns. The genome of an ID is its first --tag-len characters, and the
output has one column per genome, in order of first appearance.

Pairs are folded into the earliest group already holding one of their IDs.
A pair contradicting its group is reported, and the disputed slot becomes
`error`. Empty slots are `?`.

Lines starting with `#` and blank lines are skipped.

Examples:
1. Three genomes:
   synmerge cluster ab.tsv bd.tsv ad.tsv

2. IDs like `TraesA1g001` tagged by 6 characters:
   synmerge cluster *.pairs.tsv --tag-len 6 -o groups.tsv

"###,
        )
        .arg(
            Arg::new("infiles")
                .required(true)
                .num_args(1..)
                .index(1)
                .help("Input pairing file(s) to process"),
        )
        .arg(
            Arg::new("tag_len")
                .long("tag-len")
                .num_args(1)
                .default_value("3")
                .value_parser(value_parser!(usize))
                .help("Leading characters of an ID naming its genome"),
        )
        .arg(
            Arg::new("outfile")
                .long("outfile")
                .alias("output")
                .short('o')
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let tag_len = *args.get_one::<usize>("tag_len").unwrap();
    if tag_len == 0 {
        return Err(anyhow::anyhow!("--tag-len must be positive"));
    }

    //----------------------------
    // Operating
    //----------------------------
    let mut pairs = vec![];
    for infile in args.get_many::<String>("infiles").unwrap() {
        let reader = synmerge::reader(infile)?;
        pairs.extend(read_pairs(reader, infile)?);
    }

    let mut clusters = PairClusters::new(&pairs, tag_len);
    for (a, b) in &pairs {
        clusters.add(a, b)?;
    }

    for (held, offered) in clusters.conflicts() {
        log::warn!("inconsistent pairing {}/{}", held, offered);
    }
    log::info!(
        "{} pairs, {} genomes, {} groups, {} inconsistent pairings",
        pairs.len(),
        clusters.genomes().len(),
        clusters.clusters().len(),
        clusters.conflicts().len()
    );

    //----------------------------
    // Output
    //----------------------------
    let mut writer = synmerge::writer(args.get_one::<String>("outfile").unwrap())?;
    for row in clusters.rows() {
        writer.write_all(row.as_ref())?;
        writer.write_all("\n".as_ref())?;
    }
    writer.flush()?;

    Ok(())
}
