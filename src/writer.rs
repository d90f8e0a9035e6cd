use crate::error::FilterError;
use crate::record::{Record, RecordSet};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Formats a record as a 4-line FASTQ block and writes it to the provided writer.
///
/// # Arguments
///
/// * `writer` - A mutable reference to an object that implements `std::io::Write`. It is
///   acceptable to use a `std::io::Cursor` instead of a file.
/// * `record` - The read to write.
pub fn write_record(writer: &mut impl Write, record: &Record) -> std::io::Result<()> {
    writeln!(writer, "@{}\n{}\n+\n{}", record.id, record.seq, record.qual)
}

/// Writes every record of `records` to `writer`, in order.
pub fn write_fastq(records: &RecordSet, writer: &mut impl Write) -> std::io::Result<()> {
    records
        .values()
        .try_for_each(|record| write_record(writer, record))?;
    writer.flush()
}

/// Writes `records` to `<dir>/<name>.fastq`, creating `dir` if it does not exist yet.
///
/// An existing file of the same name is overwritten. The file is written in place, so an
/// interrupted run leaves a partial file behind.
///
/// # Returns
///
/// The path of the written file.
pub fn save_fastq(records: &RecordSet, dir: &Path, name: &str) -> Result<PathBuf, FilterError> {
    std::fs::create_dir_all(dir).map_err(|source| FilterError::Output {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(format!("{name}.fastq"));
    if path.exists() {
        info!("Overwriting {}", path.display());
    }

    let output_err = |source| FilterError::Output {
        path: path.clone(),
        source,
    };
    let file = File::create(&path).map_err(output_err)?;
    let mut writer = BufWriter::new(file);
    write_fastq(records, &mut writer).map_err(output_err)?;

    Ok(path)
}
