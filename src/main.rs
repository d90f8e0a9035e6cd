extern crate env_logger;
#[macro_use]
extern crate log;
use std::{
    fs::File,
    io::{prelude::*, stdout, BufWriter},
    path::Path,
};

use anyhow::{Context, Result};
use clap::Parser;

use biotools::cli::{self, Cli, Commands};
use biotools::filter::{self, FilterOptions};
use biotools::seq::{dna, protein};
use biotools::{fasta, genbank};

/// Writes one line per result to standard output.
fn print_lines(lines: &[String]) -> Result<()> {
    let mut writer = BufWriter::new(stdout());
    for line in lines {
        writeln!(writer, "{line}")?;
    }
    writer.flush()?;
    Ok(())
}

fn try_main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .init();

    let cli = Cli::parse();

    info!("biotools v{}", cli::VERSION);

    match &cli.command {
        Commands::Filter {
            input,
            gc,
            len,
            qual,
            output,
            outdir,
            report,
        } => {
            let opts = FilterOptions {
                gc: *gc,
                length: *len,
                quality_threshold: *qual,
                output_name: output.clone(),
                output_dir: outdir.into(),
            };

            let summary = filter::filter_records(Path::new(input), &opts)
                .with_context(|| format!("Could not filter {input}"))?;

            if let Some(report) = report {
                let file = File::create(report)
                    .with_context(|| format!("Unable to create report file {report}"))?;
                serde_json::to_writer_pretty(BufWriter::new(file), &summary)
                    .context("Could not serialize report")?;
            }

            info!("Completed successfully, wrote {}", summary.output_path)
        }
        Commands::Dna { op, seqs } => {
            print_lines(&dna::run(*op, seqs)?)?;
        }
        Commands::Protein { op, seqs } => {
            print_lines(&protein::run(*op, seqs))?;
        }
        Commands::FastaOneline { input, output } => {
            fasta::convert_file(Path::new(input), output.as_deref().map(Path::new))?;
        }
        Commands::GbkNeighbours {
            input,
            genes,
            before,
            after,
            output,
        } => {
            genbank::extract_neighbours(
                Path::new(input),
                genes,
                *before,
                *after,
                output.as_deref().map(Path::new),
            )?;
        }
    };
    Ok(())
}

fn main() {
    if let Err(err) = try_main() {
        error!("{}", err);

        // report any errors that are produced
        err.chain()
            .skip(1)
            .for_each(|cause| error!("  because: {}", cause));

        std::process::exit(1);
    }
}
