use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn command_cluster() -> anyhow::Result<()> {
    let mut cmd = cargo_bin_cmd!("synmerge");
    cmd.arg("cluster")
        .arg("tests/syn/ab.tsv")
        .arg("tests/syn/bd.tsv")
        .arg("tests/syn/ad.tsv")
        .arg("--tag-len")
        .arg("1")
        .assert()
        .success()
        .stdout(
            "\
A01\tB01\tD01
A02\tB02\tD02
A03\tB03\terror
A04\tB04\t?
A05\tB05\tD05
A06\tB06\tD06
",
        )
        .stderr(predicate::str::contains("inconsistent pairing D09/D03"))
        .stderr(predicate::str::contains(
            "14 pairs, 3 genomes, 6 groups, 1 inconsistent pairings",
        ));

    Ok(())
}

#[test]
fn command_cluster_four_genomes() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let ab = temp.path().join("ab.tsv");
    let de = temp.path().join("de.tsv");
    fs::write(&ab, "A01g1\tB01g1\nA01g2\tB01g2\n")?;
    fs::write(&de, "D01g1\tE01g1\nD01g1\tA01g1\n")?;
    let out = temp.path().join("groups.tsv");

    let mut cmd = cargo_bin_cmd!("synmerge");
    cmd.arg("cluster")
        .arg(&ab)
        .arg(&de)
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&out)?,
        "A01g1\tB01g1\tD01g1\t?\nA01g2\tB01g2\t?\t?\n?\t?\tD01g1\tE01g1\n"
    );

    Ok(())
}

#[test]
fn command_cluster_malformed() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let input = temp.path().join("pairs.tsv");
    fs::write(&input, "A01g1\tB01g1\nA01g2\n")?;

    let mut cmd = cargo_bin_cmd!("synmerge");
    cmd.arg("cluster")
        .arg(&input)
        .assert()
        .code(100)
        .stderr(predicate::str::contains("invalid line (2)"));

    Ok(())
}
