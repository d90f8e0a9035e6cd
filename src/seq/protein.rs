use std::fmt;

/// One-letter code, three-letter code and residue mass (Da) of the proteinogenic amino
/// acids, including selenocysteine (U) and pyrrolysine (O).
static RESIDUES: [(u8, &str, f64); 22] = [
    (b'A', "Ala", 71.08),
    (b'R', "Arg", 156.2),
    (b'N', "Asn", 114.1),
    (b'D', "Asp", 115.1),
    (b'C', "Cys", 103.1),
    (b'E', "Glu", 129.1),
    (b'Q', "Gln", 128.1),
    (b'G', "Gly", 57.05),
    (b'H', "His", 137.1),
    (b'I', "Ile", 113.2),
    (b'L', "Leu", 113.2),
    (b'K', "Lys", 128.2),
    (b'M', "Met", 131.2),
    (b'F', "Phe", 147.2),
    (b'P', "Pro", 97.12),
    (b'S', "Ser", 87.08),
    (b'T', "Thr", 101.1),
    (b'W', "Trp", 186.2),
    (b'Y', "Tyr", 163.2),
    (b'V', "Val", 99.13),
    (b'U', "Sec", 168.05),
    (b'O', "Pyl", 255.3),
];

const ALPHA_HELIX_FORMERS: &[u8] = b"AELMGYS";
const BETA_SHEET_FORMERS: &[u8] = b"YFWTVI";

fn residue(aa: u8) -> Option<&'static (u8, &'static str, f64)> {
    let aa = aa.to_ascii_uppercase();
    RESIDUES.iter().find(|(code, _, _)| *code == aa)
}

/// Charge of a residue side chain at pH 7.
#[inline(always)]
fn residue_charge(aa: u8) -> i64 {
    match aa.to_ascii_uppercase() {
        b'R' | b'K' | b'O' => 1,
        b'D' | b'E' => -1,
        _ => 0,
    }
}

/// Operations available on protein sequences.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProteinOp {
    /// Molecular weight of the chain, in Da
    MolecularWeight,
    /// Translate one-letter codes to three-letter codes
    ThreeLetterCode,
    /// Number of residues
    Length,
    /// Whether alpha helix or beta sheet forming residues dominate
    Folding,
    /// Overall charge at pH 7
    Charge,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Folding {
    AlphaHelix,
    BetaSheet,
    Equal,
}

impl fmt::Display for Folding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Folding::AlphaHelix => "alpha_helix",
            Folding::BetaSheet => "beta_sheet",
            Folding::Equal => "equally",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Charge {
    Positive,
    Negative,
    Neutral,
}

impl fmt::Display for Charge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Charge::Positive => "positive",
            Charge::Negative => "negative",
            Charge::Neutral => "neutral",
        })
    }
}

pub fn is_protein(seq: &str) -> bool {
    seq.bytes().all(|b| residue(b).is_some())
}

/// Keeps only the inputs made up entirely of amino acid one-letter codes.
pub fn protein_only<'a, S: AsRef<str>>(seqs: &'a [S]) -> Vec<&'a str> {
    seqs.iter()
        .map(|s| s.as_ref())
        .filter(|s| is_protein(s))
        .collect()
}

/// Sum of the residue masses. Unknown symbols contribute nothing.
pub fn molecular_weight(seq: &str) -> f64 {
    seq.bytes().filter_map(residue).map(|(_, _, mass)| mass).sum()
}

pub fn three_letter_code(seq: &str) -> String {
    seq.bytes()
        .filter_map(residue)
        .map(|(_, code, _)| *code)
        .collect()
}

pub fn length(seq: &str) -> usize {
    seq.len()
}

/// Compares the number of alpha helix and beta sheet forming residues. Tyrosine forms both
/// and is counted towards the alpha helix.
pub fn folding(seq: &str) -> Folding {
    let (mut alpha, mut beta) = (0usize, 0usize);
    for aa in seq.bytes().map(|b| b.to_ascii_uppercase()) {
        if ALPHA_HELIX_FORMERS.contains(&aa) {
            alpha += 1;
        } else if BETA_SHEET_FORMERS.contains(&aa) {
            beta += 1;
        }
    }

    match alpha.cmp(&beta) {
        std::cmp::Ordering::Greater => Folding::AlphaHelix,
        std::cmp::Ordering::Less => Folding::BetaSheet,
        std::cmp::Ordering::Equal => Folding::Equal,
    }
}

pub fn charge(seq: &str) -> Charge {
    let total: i64 = seq.bytes().map(residue_charge).sum();
    match total.signum() {
        1 => Charge::Positive,
        -1 => Charge::Negative,
        _ => Charge::Neutral,
    }
}

pub fn apply(op: ProteinOp, seq: &str) -> String {
    match op {
        ProteinOp::MolecularWeight => format!("{:.2}", molecular_weight(seq)),
        ProteinOp::ThreeLetterCode => three_letter_code(seq),
        ProteinOp::Length => length(seq).to_string(),
        ProteinOp::Folding => folding(seq).to_string(),
        ProteinOp::Charge => charge(seq).to_string(),
    }
}

/// Applies `op` to every protein sequence of `seqs`, skipping anything else.
pub fn run<S: AsRef<str>>(op: ProteinOp, seqs: &[S]) -> Vec<String> {
    let kept = protein_only(seqs);
    if kept.len() < seqs.len() {
        warn!(
            "Skipping {} input(s) which are not amino acid sequences",
            seqs.len() - kept.len()
        );
    }
    kept.into_iter().map(|s| apply(op, s)).collect()
}
