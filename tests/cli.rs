use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;

const BINARY: &str = "biotools";
const SAMPLE_FASTQ: &str = "tests/data/sample.fastq";
const SAMPLE_FASTA: &str = "tests/data/multiline.fasta";
const SAMPLE_GBK: &str = "tests/data/sample.gbk";

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[test]
fn file_doesnt_exist() -> TestResult {
    let temp = assert_fs::TempDir::new()?;

    Command::cargo_bin(BINARY)?
        .args(["filter", "file_which_does_not_exist.fastq", "--outdir"])
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));

    // nothing is written when the input is missing
    assert_eq!(std::fs::read_dir(temp.path())?.count(), 0);
    Ok(())
}

#[test]
fn filter_writes_surviving_reads() -> TestResult {
    let temp = assert_fs::TempDir::new()?;
    let report = temp.child("report.json");

    Command::cargo_bin(BINARY)?
        .args([
            "filter",
            SAMPLE_FASTQ,
            "--gc",
            "40,60",
            "--len",
            "1,10",
            "--qual",
            "30",
            "-o",
            "kept",
            "--report",
        ])
        .arg(report.path())
        .arg("--outdir")
        .arg(temp.path())
        .assert()
        .success();

    temp.child("kept.fastq")
        .assert("@r1 sample=1\nACGT\n+\nIIII\n");
    report.assert(predicate::str::contains("\"kept_reads\": 1"));
    report.assert(predicate::str::contains("\"dropped_gc\": 3"));

    Ok(())
}

#[test]
fn filter_with_scalar_gc_bound() -> TestResult {
    let temp = assert_fs::TempDir::new()?;

    Command::cargo_bin(BINARY)?
        .args(["filter", SAMPLE_FASTQ, "--gc", "0"])
        .arg("--outdir")
        .arg(temp.path())
        .assert()
        .success();

    temp.child("sample.fastq")
        .assert("@r3\nAAAATTTT\n+\n!!!!!!!!\n@r5\nA\n+\n5\n");
    Ok(())
}

#[test]
fn filter_rejects_bad_bounds() -> TestResult {
    let temp = assert_fs::TempDir::new()?;
    let outdir = temp.child("results");

    Command::cargo_bin(BINARY)?
        .args(["filter", SAMPLE_FASTQ, "--gc", "10,20,30", "--outdir"])
        .arg(outdir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected '<max>' or '<min>,<max>'"));

    outdir.assert(predicate::path::missing());
    Ok(())
}

#[test]
fn filter_rejects_inverted_bounds_and_nan_quality() -> TestResult {
    let temp = assert_fs::TempDir::new()?;
    let outdir = temp.child("results");

    Command::cargo_bin(BINARY)?
        .args(["filter", SAMPLE_FASTQ, "--gc", "80,20", "--outdir"])
        .arg(outdir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("is above the upper bound"));

    Command::cargo_bin(BINARY)?
        .args(["filter", SAMPLE_FASTQ, "--qual", "nan", "--outdir"])
        .arg(outdir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("quality threshold must be a number"));

    outdir.assert(predicate::path::missing());
    Ok(())
}

#[test]
fn dna_reverse_complement() -> TestResult {
    Command::cargo_bin(BINARY)?
        .args(["dna", "reverse-complement", "ATGc", "PLPK", "AUUg"])
        .assert()
        .success()
        .stdout("gCAT\ncAAU\n");
    Ok(())
}

#[test]
fn dna_transcribe() -> TestResult {
    Command::cargo_bin(BINARY)?
        .args(["dna", "transcribe", "ATgAAaC"])
        .assert()
        .success()
        .stdout("AUgAAaC\n");
    Ok(())
}

#[test]
fn protein_properties() -> TestResult {
    Command::cargo_bin(BINARY)?
        .args(["protein", "molecular-weight", "omg", "X1"])
        .assert()
        .success()
        .stdout("443.55\n");

    Command::cargo_bin(BINARY)?
        .args(["protein", "three-letter-code", "PLpk"])
        .assert()
        .success()
        .stdout("ProLeuProLys\n");

    Command::cargo_bin(BINARY)?
        .args(["protein", "charge", "RKd", "DEk", "RD"])
        .assert()
        .success()
        .stdout("positive\nnegative\nneutral\n");
    Ok(())
}

#[test]
fn fasta_oneline() -> TestResult {
    let temp = assert_fs::TempDir::new()?;
    let out = temp.child("oneline.fasta");

    Command::cargo_bin(BINARY)?
        .args(["fasta-oneline", SAMPLE_FASTA, "-o"])
        .arg(out.path())
        .assert()
        .success();

    out.assert(">seq1 first record\nMKVLAAGICLLLWSAQAEV\n>seq2\nACGTACGTAC\n>seq3\nAAAA\n");
    Ok(())
}

#[test]
fn fasta_oneline_default_output() -> TestResult {
    let temp = assert_fs::TempDir::new()?;
    let input = temp.child("wrapped.fasta");
    input.write_str(">a\nAC\nGT\n")?;

    Command::cargo_bin(BINARY)?
        .current_dir(temp.path())
        .args(["fasta-oneline", "wrapped.fasta"])
        .assert()
        .success();

    temp.child("out_wrapped.fasta").assert(">a\nACGT\n");
    Ok(())
}

#[test]
fn gbk_neighbours() -> TestResult {
    let temp = assert_fs::TempDir::new()?;
    let out = temp.child("neighbours.fasta");

    Command::cargo_bin(BINARY)?
        .args(["gbk-neighbours", SAMPLE_GBK, "thrA", "--before", "1", "--after", "2", "-o"])
        .arg(out.path())
        .assert()
        .success();

    out.assert(indoc::indoc! {"
        >thrL
        MKRISTTITTTITITTGNGAG
        >thrB
        MVKVYAPASSANMSVGFDVLGAAVTPVDGALLGDVVTVEAAETF
        >thrC
        MKLYNLKDHNEQVSFAQAVTQGLGKNQGLFFPHDLPEFSLTEIDE
    "});
    Ok(())
}

#[test]
fn gbk_unknown_gene() -> TestResult {
    let temp = assert_fs::TempDir::new()?;

    Command::cargo_bin(BINARY)?
        .args(["gbk-neighbours", SAMPLE_GBK, "lacZ", "-o"])
        .arg(temp.child("out.fasta").path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("gene `lacZ` was not found"));
    Ok(())
}
