#[macro_use]
extern crate log;

pub mod cli;
pub mod error;
pub mod fasta;
pub mod filter;
pub mod genbank;
pub mod reader;
pub mod record;
pub mod seq;
pub mod writer;

pub use error::{FilterError, GenbankError, SequenceError};
pub use filter::{filter_records, BoundSpec, Bounds, FilterOptions, FilterReport};
pub use record::{Record, RecordSet};
