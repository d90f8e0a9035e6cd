use crate::error::FilterError;
use crate::record::{Record, RecordSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Number of lines making up one FASTQ block.
const LINES_PER_RECORD: usize = 4;

/// Reads a whole FASTQ file into memory.
///
/// # Errors
///
/// * `NotFound` if `path` does not exist.
/// * `MalformedInput` if the file is empty, its line count is not a multiple of 4, a line is
///   not valid UTF-8, a header line does not start with `@`, or a sequence and its quality
///   string differ in length.
pub fn read_fastq(path: impl AsRef<Path>) -> Result<RecordSet, FilterError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(FilterError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path)?;
    debug!("Reading {}", path.display());
    parse_fastq(BufReader::new(file))
}

/// Parses FASTQ blocks from any buffered source. Later records with an identifier that has
/// already been seen replace the earlier record but keep its position.
pub fn parse_fastq(reader: impl BufRead) -> Result<RecordSet, FilterError> {
    let mut lines = Vec::new();
    for (i, line) in reader.split(b'\n').enumerate() {
        let mut line = line?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        let line = String::from_utf8(line).map_err(|e| FilterError::MalformedInput {
            msg: format!(
                "line {}: invalid character at byte {}",
                i + 1,
                e.utf8_error().valid_up_to()
            ),
        })?;
        lines.push(line);
    }

    if lines.is_empty() || lines.len() % LINES_PER_RECORD != 0 {
        return Err(FilterError::MalformedInput {
            msg: format!(
                "expected a positive multiple of {LINES_PER_RECORD} lines, found {}",
                lines.len()
            ),
        });
    }

    let mut records = RecordSet::with_capacity(lines.len() / LINES_PER_RECORD);

    for (block, chunk) in lines.chunks_exact(LINES_PER_RECORD).enumerate() {
        let line = block * LINES_PER_RECORD + 1;

        let Some(id) = chunk[0].strip_prefix('@') else {
            return Err(FilterError::MalformedInput {
                msg: format!("line {line}: header should start with @, got `{}`", chunk[0]),
            });
        };

        // chunk[2] is the separator line and is not kept
        let (seq, qual) = (&chunk[1], &chunk[3]);
        if seq.len() != qual.len() {
            return Err(FilterError::MalformedInput {
                msg: format!(
                    "line {}: read `{id}` has {} bases but {} quality scores",
                    line + 3,
                    seq.len(),
                    qual.len()
                ),
            });
        }

        let record = Record::new(id, seq.as_str(), qual.as_str());
        if records.insert(id.to_string(), record).is_some() {
            warn!("Duplicate read identifier `{id}` at line {line}, keeping the later record");
        }
    }

    debug!("Parsed {} reads", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(s: &str) -> Result<RecordSet, FilterError> {
        parse_fastq(Cursor::new(s.as_bytes().to_vec()))
    }

    #[test]
    fn parses_records_in_order() {
        let records = parse("@r2\nACGT\n+\nIIII\n@r1 extra\nGG\n+r1\n#I\n").unwrap();

        let ids: Vec<&str> = records.keys().map(|k| k.as_str()).collect();
        assert_eq!(ids, vec!["r2", "r1 extra"]);
        assert_eq!(records["r1 extra"], Record::new("r1 extra", "GG", "#I"));
    }

    #[test]
    fn tolerates_missing_final_newline_and_crlf() {
        let records = parse("@r1\r\nACGT\r\n+\r\nIIII").unwrap();
        assert_eq!(records["r1"].seq, "ACGT");
        assert_eq!(records["r1"].qual, "IIII");
    }

    #[test]
    fn keeps_empty_reads() {
        let records = parse("@empty\n\n+\n\n").unwrap();
        assert!(records["empty"].is_empty());
    }

    #[test]
    fn trailing_blank_line_breaks_the_line_count() {
        let err = parse("@r1\nACGT\n+\nIIII\n\n").unwrap_err();
        assert!(matches!(err, FilterError::MalformedInput { .. }));
        assert!(err.to_string().contains("found 5"));
    }

    #[test]
    fn non_utf8_quality_is_malformed() {
        let err = parse_fastq(Cursor::new(b"@r1\nACGT\n+\nII\xc8I\n".to_vec())).unwrap_err();
        assert!(matches!(err, FilterError::MalformedInput { .. }));
        assert!(err.to_string().contains("line 4"));
    }

    #[test]
    fn later_duplicate_overwrites_in_place() {
        let records = parse("@a\nA\n+\nI\n@b\nC\n+\nI\n@a\nGG\n+\nII\n").unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records.get_index(0).unwrap().1.seq, "GG");
        assert_eq!(records.get_index(1).unwrap().0, "b");
    }

    #[test]
    fn rejects_truncated_file() {
        let err = parse("@r1\nACGT\n+\n").unwrap_err();
        assert!(matches!(err, FilterError::MalformedInput { .. }));
        assert!(err.to_string().contains("found 3"));
    }

    #[test]
    fn rejects_empty_file() {
        assert!(matches!(
            parse("").unwrap_err(),
            FilterError::MalformedInput { .. }
        ));
    }

    #[test]
    fn rejects_length_mismatch() {
        let err = parse("@r1\nACGT\n+\nIII\n").unwrap_err();
        assert!(matches!(err, FilterError::MalformedInput { .. }));
        assert!(err.to_string().contains("line 4"));
    }

    #[test]
    fn rejects_missing_header_marker() {
        let err = parse("r1\nACGT\n+\nIIII\n").unwrap_err();
        assert!(matches!(err, FilterError::MalformedInput { .. }));
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = read_fastq("file_which_does_not_exist.fastq").unwrap_err();
        assert!(matches!(err, FilterError::NotFound { .. }));
    }
}
