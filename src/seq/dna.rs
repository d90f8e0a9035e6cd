use crate::error::SequenceError;

/// Symbols accepted in a DNA or RNA sequence.
const NUCLEOTIDES: &[u8] = b"ATGCatgcUu";

/// Operations available on nucleic acid sequences.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum NucleicOp {
    /// DNA to RNA: T becomes U
    Transcribe,
    /// Reverse the sequence
    Reverse,
    /// Complement each base, using U instead of T for RNA
    Complement,
    /// Reverse, then complement
    ReverseComplement,
}

#[inline(always)]
fn dna_complement(b: u8) -> Option<u8> {
    match b {
        b'A' => Some(b'T'),
        b'T' => Some(b'A'),
        b'C' => Some(b'G'),
        b'G' => Some(b'C'),
        b'a' => Some(b't'),
        b't' => Some(b'a'),
        b'c' => Some(b'g'),
        b'g' => Some(b'c'),
        _ => None,
    }
}

#[inline(always)]
fn rna_complement(b: u8) -> Option<u8> {
    match b {
        b'A' => Some(b'U'),
        b'U' => Some(b'A'),
        b'C' => Some(b'G'),
        b'G' => Some(b'C'),
        b'a' => Some(b'u'),
        b'u' => Some(b'a'),
        b'c' => Some(b'g'),
        b'g' => Some(b'c'),
        _ => None,
    }
}

pub fn is_nucleic(seq: &str) -> bool {
    seq.bytes().all(|b| NUCLEOTIDES.contains(&b))
}

pub fn is_rna(seq: &str) -> bool {
    seq.bytes().any(|b| b == b'U' || b == b'u')
}

/// Keeps only the inputs made up entirely of DNA/RNA symbols.
pub fn nucleic_only<'a, S: AsRef<str>>(seqs: &'a [S]) -> Vec<&'a str> {
    seqs.iter()
        .map(|s| s.as_ref())
        .filter(|s| is_nucleic(s))
        .collect()
}

pub fn transcribe(seq: &str) -> String {
    seq.replace('T', "U").replace('t', "u")
}

pub fn reverse(seq: &str) -> String {
    seq.chars().rev().collect()
}

/// Complements `seq`, case preserved. A sequence containing U is treated as RNA.
pub fn complement(seq: &str) -> Result<String, SequenceError> {
    let table: fn(u8) -> Option<u8> = if is_rna(seq) { rna_complement } else { dna_complement };

    seq.bytes()
        .map(|b| {
            table(b).map(char::from).ok_or_else(|| SequenceError::InvalidSymbol {
                symbol: char::from(b),
                seq: seq.to_string(),
            })
        })
        .collect()
}

pub fn reverse_complement(seq: &str) -> Result<String, SequenceError> {
    complement(&reverse(seq))
}

pub fn apply(op: NucleicOp, seq: &str) -> Result<String, SequenceError> {
    match op {
        NucleicOp::Transcribe => Ok(transcribe(seq)),
        NucleicOp::Reverse => Ok(reverse(seq)),
        NucleicOp::Complement => complement(seq),
        NucleicOp::ReverseComplement => reverse_complement(seq),
    }
}

/// Applies `op` to every nucleic acid sequence of `seqs`, skipping anything else.
pub fn run<S: AsRef<str>>(op: NucleicOp, seqs: &[S]) -> Result<Vec<String>, SequenceError> {
    let kept = nucleic_only(seqs);
    if kept.len() < seqs.len() {
        warn!(
            "Skipping {} input(s) which are not DNA or RNA",
            seqs.len() - kept.len()
        );
    }
    kept.into_iter().map(|s| apply(op, s)).collect()
}
