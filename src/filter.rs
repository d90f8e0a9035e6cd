use crate::error::FilterError;
use crate::reader::read_fastq;
use crate::record::{Record, RecordSet};
use crate::writer::save_fastq;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Sentinel upper bound used when no maximum read length is given.
pub const MAX_LENGTH: usize = usize::MAX;

/// Directory that filtered files are written to unless told otherwise.
pub const DEFAULT_OUTPUT_DIR: &str = "fastq_filtrator_results";

const PHRED_OFFSET: u8 = 33;
const MAX_PHRED_SCORE: u8 = 40;

/// Phred+33 decoding table, indexed by ASCII code point. Only `!` (0) through `I` (40)
/// decode to a score.
static PHRED33: [Option<u8>; 128] = phred33_table();

const fn phred33_table() -> [Option<u8>; 128] {
    let mut table = [None; 128];
    let mut score = 0;
    while score <= MAX_PHRED_SCORE {
        table[(PHRED_OFFSET + score) as usize] = Some(score);
        score += 1;
    }
    table
}

/// Decodes a single Phred+33 quality character.
pub fn phred_score(c: u8) -> Option<u8> {
    PHRED33.get(c as usize).copied().flatten()
}

/// An inclusive `[lower, upper]` interval.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    pub fn contains(&self, v: f64) -> bool {
        self.lower <= v && v <= self.upper
    }
}

/// A user supplied bound, before it is resolved against the defaults of the filter it
/// belongs to.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum BoundSpec {
    /// An explicitly empty bound, `""` on the command line.
    Empty,
    /// A single number, read as the upper bound with an implicit lower bound of 0.
    Upper(f64),
    /// An explicit `(lower, upper)` pair.
    Range(f64, f64),
}

impl BoundSpec {
    /// Resolves a GC-content bound in percent. An empty bound is rejected.
    pub fn gc(self) -> Result<Bounds, FilterError> {
        self.interval("gc")?.ok_or_else(|| {
            FilterError::InvalidConfiguration(
                "gc bounds must be a number or a pair of numbers".to_string(),
            )
        })
    }

    /// Resolves a read length bound. An empty bound means no length filtering.
    pub fn length(self) -> Result<Bounds, FilterError> {
        Ok(self
            .interval("length")?
            .unwrap_or(Bounds::new(0.0, MAX_LENGTH as f64)))
    }

    fn interval(self, name: &str) -> Result<Option<Bounds>, FilterError> {
        let bounds = match self {
            BoundSpec::Empty => return Ok(None),
            BoundSpec::Upper(upper) => Bounds::new(0.0, upper),
            BoundSpec::Range(lower, upper) => Bounds::new(lower, upper),
        };

        if bounds.lower.is_nan() || bounds.upper.is_nan() {
            return Err(FilterError::InvalidConfiguration(format!(
                "{name} bounds must not be NaN"
            )));
        }
        if bounds.lower > bounds.upper {
            return Err(FilterError::InvalidConfiguration(format!(
                "{name} lower bound {} is above the upper bound {}",
                bounds.lower, bounds.upper
            )));
        }
        Ok(Some(bounds))
    }
}

impl From<f64> for BoundSpec {
    fn from(upper: f64) -> Self {
        BoundSpec::Upper(upper)
    }
}

impl From<(f64, f64)> for BoundSpec {
    fn from((lower, upper): (f64, f64)) -> Self {
        BoundSpec::Range(lower, upper)
    }
}

impl FromStr for BoundSpec {
    type Err = FilterError;

    /// Parses `""`, `"<max>"` or `"<min>,<max>"`. `inf` and `-inf` are accepted for
    /// unbounded ends.
    fn from_str(arg: &str) -> Result<Self, Self::Err> {
        let arg_lc = arg.trim().to_lowercase();
        if arg_lc.is_empty() {
            return Ok(BoundSpec::Empty);
        }

        let parse = |s: &str| -> Result<f64, FilterError> {
            match s.trim() {
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                v => v.parse::<f64>().ok().filter(|x| !x.is_nan()).ok_or_else(|| {
                    FilterError::InvalidConfiguration(format!(
                        "invalid bound value '{v}' (should be any number, `inf` or `-inf`)"
                    ))
                }),
            }
        };

        let parts: Vec<&str> = arg_lc.split(',').collect();
        match parts.as_slice() {
            [upper] => Ok(BoundSpec::Upper(parse(upper)?)),
            [lower, upper] => Ok(BoundSpec::Range(parse(lower)?, parse(upper)?)),
            _ => Err(FilterError::InvalidConfiguration(indoc::formatdoc! {"
                expected '<max>' or '<min>,<max>', got '{arg}', as in:
                  --gc 80
                  --gc 20,80
                  --len 50,inf
                "})),
        }
    }
}

/// Percentage of G and C bases in `record`, in either case.
///
/// # Errors
///
/// Returns `InvalidRecord` for an empty sequence, whose GC content is undefined.
pub fn gc_percent(record: &Record) -> Result<f64, FilterError> {
    if record.is_empty() {
        return Err(FilterError::InvalidRecord {
            id: record.id.clone(),
            msg: "GC content of an empty sequence is undefined".to_string(),
        });
    }

    let gc = record
        .seq
        .bytes()
        .filter(|b| matches!(b, b'G' | b'C' | b'g' | b'c'))
        .count();
    Ok(100.0 * gc as f64 / record.len() as f64)
}

pub fn passes_gc(record: &Record, bounds: &Bounds) -> Result<bool, FilterError> {
    Ok(bounds.contains(gc_percent(record)?))
}

pub fn passes_length(record: &Record, bounds: &Bounds) -> bool {
    bounds.contains(record.len() as f64)
}

/// Mean Phred score of `record`, averaged over the sequence length.
///
/// # Errors
///
/// * `MalformedInput` if a quality character lies outside `!`..=`I`.
/// * `InvalidRecord` if the read is empty.
pub fn mean_quality(record: &Record) -> Result<f64, FilterError> {
    if record.is_empty() {
        return Err(FilterError::InvalidRecord {
            id: record.id.clone(),
            msg: "mean quality of an empty read is undefined".to_string(),
        });
    }

    let mut total = 0u64;
    for c in record.qual.bytes() {
        let Some(score) = phred_score(c) else {
            return Err(FilterError::MalformedInput {
                msg: format!(
                    "quality character '{}' of read `{}` is outside the Phred+33 range",
                    c.escape_ascii(),
                    record.id
                ),
            });
        };
        total += score as u64;
    }

    Ok(total as f64 / record.len() as f64)
}

pub fn passes_quality(record: &Record, threshold: f64) -> Result<bool, FilterError> {
    Ok(mean_quality(record)? >= threshold)
}

/// Resolved limits for the three filter stages.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct FilterBounds {
    pub gc: Bounds,
    pub length: Bounds,
    pub quality: f64,
}

/// Number of reads removed by each stage.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct StageCounts {
    pub dropped_gc: usize,
    pub dropped_length: usize,
    pub dropped_quality: usize,
}

/// Keeps the records for which `keep` holds, returning a new set in the same order.
fn retain_stage<F>(records: RecordSet, mut keep: F) -> Result<(RecordSet, usize), FilterError>
where
    F: FnMut(&Record) -> Result<bool, FilterError>,
{
    let before = records.len();
    let mut kept = RecordSet::with_capacity(before);

    for (id, record) in records {
        if keep(&record)? {
            kept.insert(id, record);
        }
    }

    let dropped = before - kept.len();
    Ok((kept, dropped))
}

/// Applies the GC, length and quality stages in that order. A record removed by one stage
/// is never examined by a later one.
pub fn apply_filters(
    records: RecordSet,
    bounds: &FilterBounds,
) -> Result<(RecordSet, StageCounts), FilterError> {
    let (records, dropped_gc) = retain_stage(records, |r| passes_gc(r, &bounds.gc))?;
    debug!("GC stage removed {dropped_gc} reads");

    let (records, dropped_length) =
        retain_stage(records, |r| Ok(passes_length(r, &bounds.length)))?;
    debug!("Length stage removed {dropped_length} reads");

    let (records, dropped_quality) = retain_stage(records, |r| passes_quality(r, bounds.quality))?;
    debug!("Quality stage removed {dropped_quality} reads");

    Ok((
        records,
        StageCounts {
            dropped_gc,
            dropped_length,
            dropped_quality,
        },
    ))
}

/// Options for `filter_records`.
#[derive(Clone, Debug)]
pub struct FilterOptions {
    pub gc: BoundSpec,
    pub length: BoundSpec,
    pub quality_threshold: f64,
    /// Name of the output file, without the `.fastq` extension. Defaults to the input
    /// file name with its extension removed.
    pub output_name: Option<String>,
    pub output_dir: PathBuf,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            gc: BoundSpec::Range(0.0, 100.0),
            length: BoundSpec::Range(0.0, MAX_LENGTH as f64),
            quality_threshold: 0.0,
            output_name: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl FilterOptions {
    /// Validates the bound specifications.
    pub fn bounds(&self) -> Result<FilterBounds, FilterError> {
        if self.quality_threshold.is_nan() {
            return Err(FilterError::InvalidConfiguration(
                "quality threshold must be a number".to_string(),
            ));
        }
        Ok(FilterBounds {
            gc: self.gc.gc()?,
            length: self.length.length()?,
            quality: self.quality_threshold,
        })
    }
}

/// Summary of a `filter_records` run.
#[derive(Clone, Debug, Serialize)]
pub struct FilterReport {
    pub input_path: String,
    pub output_path: String,
    pub date: String,
    pub bounds: FilterBounds,
    pub input_reads: usize,
    pub kept_reads: usize,
    #[serde(flatten)]
    pub counts: StageCounts,
}

fn default_output_name(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "filtered".to_string())
}

/// Filters the FASTQ file at `input` by GC content, length and mean quality, and writes the
/// surviving reads to `<output_dir>/<output_name>.fastq`.
///
/// Bounds are validated before the input is read, so an invalid configuration never
/// produces any output.
///
/// # Errors
///
/// * `InvalidConfiguration` if a bound has an unsupported shape, a lower bound lies above
///   its upper bound, or the quality threshold is NaN.
/// * `NotFound` / `MalformedInput` from reading the input.
/// * `InvalidRecord` if an empty read reaches the GC stage.
/// * `Output` if the result cannot be written.
pub fn filter_records(input: &Path, opts: &FilterOptions) -> Result<FilterReport, FilterError> {
    let bounds = opts.bounds()?;

    let records = read_fastq(input)?;
    let input_reads = records.len();
    info!("Read {input_reads} reads from {}", input.display());

    let (records, counts) = apply_filters(records, &bounds)?;

    let name = opts
        .output_name
        .clone()
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| default_output_name(input));
    let output_path = save_fastq(&records, &opts.output_dir, &name)?;

    info!(
        "Stats: {} reads, {} removed by GC, {} by length, {} by quality, {} kept",
        input_reads,
        counts.dropped_gc,
        counts.dropped_length,
        counts.dropped_quality,
        records.len()
    );

    Ok(FilterReport {
        input_path: input.display().to_string(),
        output_path: output_path.display().to_string(),
        date: format!("{:?}", chrono::offset::Local::now()),
        bounds,
        input_reads,
        kept_reads: records.len(),
        counts,
    })
}
