use crate::filter::{BoundSpec, DEFAULT_OUTPUT_DIR};
use crate::seq::{NucleicOp, ProteinOp};
use clap::builder::styling::AnsiColor;
use clap::builder::Styles;
use clap::{Parser, Subcommand};

const fn extra_build_info() -> &'static str {
    match option_env!("CARGO_BUILD_DESC") {
        Some(e) => e,
        None => env!("CARGO_PKG_VERSION"),
    }
}
pub const VERSION: &str = extra_build_info();
const INFO_STRING: &str = "
🧬 biotools version ";
const AFTER_STRING: &str = "
   ──────────────────────────────────
   small utilities for FASTQ, FASTA, GenBank,
   nucleic acid and protein sequences";

// colouring of the help
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().bold())
    .usage(AnsiColor::BrightMagenta.on_default().bold())
    .literal(AnsiColor::BrightMagenta.on_default())
    .placeholder(AnsiColor::White.on_default());

#[derive(Parser)]
#[command(
    version = VERSION,
    about = format!("{}{}{}", INFO_STRING, VERSION, AFTER_STRING),
    arg_required_else_help = true,
    flatten_help = true,
    styles = STYLES
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Filter the reads of a .fastq file by GC content, length and mean quality
    #[command(arg_required_else_help = true)]
    Filter {
        /// the input .fastq file
        input: String,

        /// keep reads whose GC content (in percent) is within the given interval [a,b].
        /// a single number b is read as the interval [0,b].
        /// both ends are inclusive, and b can be `inf`.
        #[arg(
            long,
            value_parser = |x: &str| x.parse::<BoundSpec>(),
            default_value = "0,100",
            allow_hyphen_values = true,
            verbatim_doc_comment
        )]
        gc: BoundSpec,

        /// keep reads whose length is within the given interval [a,b].
        /// see the docs for `--gc` for documentation on how to use the interval.
        /// an empty value (`--len ""`) disables the length filter.
        #[arg(
            long,
            value_parser = |x: &str| x.parse::<BoundSpec>(),
            default_value = "0,inf",
            allow_hyphen_values = true,
            verbatim_doc_comment
        )]
        len: BoundSpec,

        /// discard reads whose mean Phred+33 quality is below this threshold
        #[arg(long, default_value_t = 0.0)]
        qual: f64,

        /// the output file name, without the .fastq extension.
        /// defaults to the name of the input file.
        #[arg(short, verbatim_doc_comment)]
        output: Option<String>,

        /// the directory the filtered .fastq is written to.
        /// it is created if it does not exist.
        #[arg(long, default_value = DEFAULT_OUTPUT_DIR, verbatim_doc_comment)]
        outdir: String,

        /// also write a JSON report of the run to this path
        #[arg(long)]
        report: Option<String>,
    },

    /// Transcribe, reverse or complement DNA/RNA sequences. Inputs which are not DNA or RNA
    /// are skipped.
    #[command(arg_required_else_help = true)]
    Dna {
        #[arg(value_enum)]
        op: NucleicOp,

        /// the sequences, in upper or lower case
        #[arg(required = true)]
        seqs: Vec<String>,
    },

    /// Compute properties of protein sequences given in one-letter code. Inputs which are
    /// not protein sequences are skipped.
    #[command(arg_required_else_help = true)]
    Protein {
        #[arg(value_enum)]
        op: ProteinOp,

        /// the sequences, in upper or lower case
        #[arg(required = true)]
        seqs: Vec<String>,
    },

    /// Rewrite a multi-line .fasta so that each sequence is on a single line
    #[command(arg_required_else_help = true)]
    FastaOneline {
        /// the input .fasta file
        input: String,

        /// the output file. defaults to out_<input name>.fasta
        #[arg(short)]
        output: Option<String>,
    },

    /// Write the protein translations of the genes surrounding some genes of interest in a
    /// GenBank file to a .fasta
    #[command(arg_required_else_help = true)]
    GbkNeighbours {
        /// the input .gbk file
        input: String,

        /// genes of interest, as given by their /gene qualifier
        #[arg(required = true)]
        genes: Vec<String>,

        /// the number of genes to take before each gene of interest
        #[arg(long, default_value_t = 1)]
        before: usize,

        /// the number of genes to take after each gene of interest
        #[arg(long, default_value_t = 1)]
        after: usize,

        /// the output file. defaults to out_<input name>.fasta
        #[arg(short)]
        output: Option<String>,
    },
}
