use crate::error::GenbankError;
use crate::fasta::write_entry;
use anyhow::{Context, Result};
use gb_io::reader::SeqReader;
use gb_io::seq::Feature;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// A coding sequence feature carrying a `/gene` qualifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cds {
    pub gene: String,
    pub translation: Option<String>,
}

fn qualifier<'a>(feature: &'a Feature, key: &str) -> Option<&'a str> {
    feature
        .qualifier_values(key.into())
        .map(str::trim)
        .find(|v| !v.is_empty())
}

fn to_cds(feature: &Feature) -> Option<Cds> {
    if &*feature.kind != "CDS" {
        return None;
    }
    let gene = qualifier(feature, "gene")?.to_string();
    // translations may be wrapped over several lines
    let translation = qualifier(feature, "translation")
        .map(|t| t.chars().filter(|c| !c.is_whitespace()).collect());
    Some(Cds { gene, translation })
}

/// Collects the CDS features of every record in a GenBank stream, in file order. Features
/// without a `/gene` qualifier are skipped.
pub fn parse_cds(reader: impl Read) -> Result<Vec<Cds>> {
    let mut cds = Vec::new();

    for record in SeqReader::new(reader) {
        let record = record.context("Unable to parse GenBank record")?;
        cds.extend(record.features.iter().filter_map(to_cds));
    }

    debug!("Found {} CDS features with a gene name", cds.len());
    Ok(cds)
}

/// For every gene of interest, selects up to `n_before` CDS features before it and up to
/// `n_after` after it, in file order. The gene itself is not included.
pub fn select_neighbours<'a, S: AsRef<str>>(
    cds: &'a [Cds],
    genes: &[S],
    n_before: usize,
    n_after: usize,
) -> Result<Vec<&'a Cds>, GenbankError> {
    let mut selected = Vec::new();

    for gene in genes.iter().map(|g| g.as_ref()) {
        let idx = cds
            .iter()
            .position(|c| c.gene == gene)
            .ok_or_else(|| GenbankError::GeneNotFound {
                gene: gene.to_string(),
            })?;

        let start = idx.saturating_sub(n_before);
        let end = idx.saturating_add(n_after).min(cds.len() - 1);

        selected.extend(&cds[start..idx]);
        selected.extend(&cds[idx + 1..=end]);
    }

    Ok(selected)
}

/// Writes the translations of `cds` as FASTA, one entry per feature named after its gene.
pub fn write_fasta(cds: &[&Cds], writer: &mut impl Write) -> std::io::Result<usize> {
    let mut written = 0;
    for c in cds {
        let Some(translation) = &c.translation else {
            warn!("Gene {} has no translation, skipping", c.gene);
            continue;
        };
        write_entry(writer, c.gene.as_bytes(), translation.as_bytes())?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}

/// Writes the protein translations of the neighbours of `genes` in the GenBank file `input`
/// to `output`, or to `out_<stem>.fasta` if unset.
pub fn extract_neighbours<S: AsRef<str>>(
    input: &Path,
    genes: &[S],
    n_before: usize,
    n_after: usize,
    output: Option<&Path>,
) -> Result<PathBuf> {
    let file = File::open(input)
        .with_context(|| format!("Unable to open GenBank file {}", input.display()))?;
    let cds = parse_cds(BufReader::new(file))?;

    let selected = select_neighbours(&cds, genes, n_before, n_after)?;

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| crate::fasta::default_output(input));
    let out = File::create(&output)
        .with_context(|| format!("Unable to create output file {}", output.display()))?;
    let n = write_fasta(&selected, &mut BufWriter::new(out))?;

    info!("Wrote {n} neighbouring genes to {}", output.display());
    Ok(output)
}
