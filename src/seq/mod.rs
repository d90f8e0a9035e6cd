pub mod dna;
pub mod protein;

pub use self::dna::NucleicOp;
pub use self::protein::ProteinOp;
