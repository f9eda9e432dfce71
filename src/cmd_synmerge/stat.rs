use clap::*;
use std::io::Write;

use synmerge::libs::relation::load_relation;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("stat")
        .about("Statistics of gene synteny tables")
        .after_help(
            r###"
Loads each table the way `merge` does and reports, one row per file:

    file  lines  blocks  valid  keys

* lines  - all lines read, block separators and blank lines included
* blocks - block separator lines
* valid  - records passing --score
* keys   - distinct IDs in col1

Malformed lines and duplicated IDs abort the run, as in `merge`.

Examples:
1. Tables on screen:
   synmerge stat ab.tsv bd.tsv ad.tsv

2. With a score cutoff:
   synmerge stat ab.tsv -c 30 -o ab.stat.tsv

"###,
        )
        .arg(
            Arg::new("infiles")
                .required(true)
                .num_args(1..)
                .index(1)
                .help("Input synteny file(s) to process"),
        )
        .args(super::load_args())
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
    let load_opt = super::load_options(args);

    let mut lines = vec!["file\tlines\tblocks\tvalid\tkeys".to_string()];
    for infile in args.get_many::<String>("infiles").unwrap() {
        let relation = load_relation(infile, &load_opt)?;
        let stats = relation.stats();
        lines.push(format!(
            "{}\t{}\t{}\t{}\t{}",
            infile, stats.lines, stats.blocks, stats.valid, stats.keys
        ));
    }

    let mut writer = synmerge::writer(args.get_one::<String>("outfile").unwrap())?;
    for line in &lines {
        writer.write_fmt(format_args!("{}\n", line))?;
    }
    writer.flush()?;

    Ok(())
}
