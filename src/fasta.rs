use anyhow::{Context, Result};
use needletail::{parse_fastx_file, FastxReader};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Default output path for a file derived from `input`: `out_<stem>.fasta` in the working
/// directory.
pub fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    PathBuf::from(format!("out_{stem}.fasta"))
}

/// Writes one FASTA entry with its sequence on a single line.
pub fn write_entry(writer: &mut impl Write, header: &[u8], seq: &[u8]) -> std::io::Result<()> {
    writer.write_all(b">")?;
    writer.write_all(header)?;
    writer.write_all(b"\n")?;
    writer.write_all(seq)?;
    writer.write_all(b"\n")
}

/// Rewrites a FASTA file, which may wrap sequences across several lines, so that every
/// sequence sits on a single line. Headers are copied verbatim.
///
/// # Returns
///
/// The number of records written.
pub fn to_oneline(input: &Path, writer: &mut impl Write) -> Result<usize> {
    let mut reader = parse_fastx_file(input)
        .with_context(|| format!("Unable to open FASTA file {}", input.display()))?;

    let mut count = 0;
    while let Some(rec) = reader.next() {
        let rec = rec.with_context(|| format!("Invalid record in {}", input.display()))?;
        write_entry(writer, rec.id(), &rec.seq())?;
        count += 1;
    }

    writer.flush()?;
    Ok(count)
}

/// Converts `input` to one-line FASTA at `output`, or at `default_output(input)` if unset.
pub fn convert_file(input: &Path, output: Option<&Path>) -> Result<PathBuf> {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output(input));

    let file = File::create(&output)
        .with_context(|| format!("Unable to create output file {}", output.display()))?;
    let n = to_oneline(input, &mut BufWriter::new(file))?;

    info!("Wrote {n} records to {}", output.display());
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn joins_wrapped_sequences() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("multi.fasta");
        std::fs::write(
            &input,
            ">seq1 first record\nACGT\nACGT\nAC\n>seq2\nMKV\nLL\n>seq3\nA\n",
        )
        .unwrap();

        let mut out = Cursor::new(Vec::new());
        let n = to_oneline(&input, &mut out).unwrap();

        assert_eq!(n, 3);
        assert_eq!(
            String::from_utf8(out.into_inner()).unwrap(),
            ">seq1 first record\nACGTACGTAC\n>seq2\nMKVLL\n>seq3\nA\n"
        );
    }

    #[test]
    fn default_output_uses_stem() {
        assert_eq!(
            default_output(Path::new("data/example_multiline_fasta.fasta")),
            PathBuf::from("out_example_multiline_fasta.fasta")
        );
    }

    #[test]
    fn missing_input_is_an_error() {
        let mut out = Cursor::new(Vec::new());
        assert!(to_oneline(Path::new("does_not_exist.fasta"), &mut out).is_err());
    }
}
