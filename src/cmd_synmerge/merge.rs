use clap::*;
use std::io::Write;

use synmerge::libs::relation::load_relation;
use synmerge::libs::triad::{merge_rows, MergeCounts, MergeOptions};

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("merge")
        .about("Merge 3 gene synteny tables into one")
        .after_help(
            r###"
Joins three synteny tables, A-B, B-D and A-D, on the keys of the first one.

Input format, tab separated, blocks separated by lines starting with `###`:
    syn1: A01  B01  [INT]
    syn2: B01  D01  [INT]
    syn3: A01  D01  [INT]

Output with --missing, one row per key of syn1, missing legs filled by NaN:
    A01  B01  [BLOCK]  B01  D01  [BLOCK]  A01  D01  [BLOCK]  [+++/***]

Output without --missing, resolved triangles only:
    A01  B01  D01

`+++` marks agreeing triangles and `***` everything else. With --problematic,
an inconsistent triangle also gets the D id of syn2 appended after the status.

Inputs can be gzipped or 'stdin'.

Examples:
1. Consistent triangles only:
   synmerge merge -1 ab.tsv -2 bd.tsv -3 ad.tsv -o out.tsv

2. Every key, including inconsistent and partial ones:
   synmerge merge -1 ab.tsv -2 bd.tsv -3 ad.tsv -m -r -o out.tsv

3. Ignore records scoring below 30:
   synmerge merge -1 ab.tsv -2 bd.tsv -3 ad.tsv -c 30 -o stdout

"###,
        )
        .arg(
            Arg::new("syn1")
                .short('1')
                .long("syn1")
                .required(true)
                .num_args(1)
                .help("Input synteny file 1, A-B"),
        )
        .arg(
            Arg::new("syn2")
                .short('2')
                .long("syn2")
                .required(true)
                .num_args(1)
                .help("Input synteny file 2, B-D"),
        )
        .arg(
            Arg::new("syn3")
                .short('3')
                .long("syn3")
                .required(true)
                .num_args(1)
                .help("Input synteny file 3, A-D"),
        )
        .args(super::load_args())
        .arg(
            Arg::new("missing")
                .long("missing")
                .short('m')
                .action(ArgAction::SetTrue)
                .help("Output partially or fully missing rows too"),
        )
        .arg(
            Arg::new("problematic")
                .long("problematic")
                .short('r')
                .action(ArgAction::SetTrue)
                .help("Output inconsistent triangles with the conflicting value"),
        )
        .arg(
            Arg::new("outfile")
                .long("output")
                .short('o')
                .num_args(1)
                .default_value("MyOut.synteny.tab")
                .help("Output filename. [stdout] for screen"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let load_opt = super::load_options(args);
    let opt = MergeOptions {
        missing: args.get_flag("missing"),
        problematic: args.get_flag("problematic"),
    };

    //----------------------------
    // Loading
    //----------------------------
    // all inputs are validated before the output is touched
    let r1 = load_relation(args.get_one::<String>("syn1").unwrap(), &load_opt)?;
    let r2 = load_relation(args.get_one::<String>("syn2").unwrap(), &load_opt)?;
    let r3 = load_relation(args.get_one::<String>("syn3").unwrap(), &load_opt)?;

    //----------------------------
    // Output
    //----------------------------
    let mut writer = synmerge::writer(args.get_one::<String>("outfile").unwrap())?;
    let mut counts = MergeCounts::default();

    for row in merge_rows(&r1, &r2, &r3) {
        counts.tally(&row.triad);
        if let Some(line) = row.render(&opt) {
            writer.write_all(line.as_ref())?;
            writer.write_all("\n".as_ref())?;
            counts.written += 1;
        }
    }
    writer.flush()?;

    log::info!(
        "{} keys: {} consistent, {} inconsistent, {} missing leg 2, {} missing leg 3, {} missing both",
        counts.total,
        counts.consistent,
        counts.inconsistent,
        counts.missing_leg2,
        counts.missing_leg3,
        counts.missing_both
    );
    log::info!("{} rows written", counts.written);

    Ok(())
}
