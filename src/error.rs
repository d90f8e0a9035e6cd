use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the FASTQ filtering pipeline.
#[derive(Error, Debug)]
pub enum FilterError {
    #[error("input file {path:?} does not exist")]
    NotFound { path: PathBuf },

    #[error("malformed input: {msg}")]
    MalformedInput { msg: String },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("invalid record `{id}`: {msg}")]
    InvalidRecord { id: String, msg: String },

    #[error("unable to write output at {path:?}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug, PartialEq)]
pub enum SequenceError {
    #[error("symbol '{symbol}' has no complement in sequence `{seq}`")]
    InvalidSymbol { symbol: char, seq: String },
}

#[derive(Error, Debug, PartialEq)]
pub enum GenbankError {
    #[error(
        "gene `{gene}` was not found among the CDS features of the input
suggestion: gene names are matched exactly against the /gene qualifier"
    )]
    GeneNotFound { gene: String },
}
