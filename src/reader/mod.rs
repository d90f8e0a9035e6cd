pub mod fastq;

pub use fastq::{parse_fastq, read_fastq};
