use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};

use anyhow::{anyhow, bail, Context, Result};
use arrow::array::AsArray;
use arrow::datatypes::{DataType, Float64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Dataset, SoundingRecord};
use crate::error::{SbtError, SbtResult};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a CPTu sounding from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.txt` / `.tsv` – delimited text with a header row
/// * `.json`                  – `[{ "depth": 0.02, "qt": 1.1, ... }, ...]`
/// * `.parquet`               – flat numeric columns named like the CSV header
///
/// Recognized columns are `depth`, `qt`, `fs`, `u2` and `sigma_vo_eff`
/// (case-sensitive). Cells that are missing or not numeric become `NaN`.
pub fn load_file(path: &Path) -> SbtResult<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let loaded = match ext.as_str() {
        "csv" | "txt" | "tsv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(anyhow!("Unsupported file extension: .{other}")),
    };

    match loaded {
        Ok(dataset) => {
            let name = path.file_name().map(|n| n.to_string_lossy().into_owned());
            Ok(match name {
                Some(name) => dataset.with_source(name),
                None => dataset,
            })
        }
        Err(e) => Err(SbtError::LoadFailure {
            path: path.display().to_string(),
            message: format!("{e:#}"),
        }),
    }
}

// ---------------------------------------------------------------------------
// Background loading
// ---------------------------------------------------------------------------

/// A file load running on a worker thread.
///
/// The current dataset is untouched while the task runs; the caller decides
/// what to do with the result once it is taken.
pub struct LoadTask {
    path: PathBuf,
    receiver: Receiver<SbtResult<Dataset>>,
}

impl LoadTask {
    pub fn spawn(path: PathBuf) -> Self {
        let (sender, receiver) = mpsc::channel();
        let worker_path = path.clone();
        std::thread::spawn(move || {
            // The receiver may already be gone if the task was dropped.
            let _ = sender.send(load_file(&worker_path));
        });
        Self { path, receiver }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The load result if the worker has finished, without blocking.
    pub fn try_take(&self) -> Option<SbtResult<Dataset>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(self.worker_died())),
        }
    }

    /// Block until the worker has finished.
    pub fn wait(self) -> SbtResult<Dataset> {
        match self.receiver.recv() {
            Ok(result) => result,
            Err(_) => Err(self.worker_died()),
        }
    }

    fn worker_died(&self) -> SbtError {
        SbtError::LoadFailure {
            path: self.path.display().to_string(),
            message: "loader thread terminated unexpectedly".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Column lookup shared by all formats
// ---------------------------------------------------------------------------

/// Position of each recognized column in the source, ordered like
/// [`SoundingRecord::COLUMNS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnIndex([Option<usize>; 5]);

impl ColumnIndex {
    fn locate<'a>(headers: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let headers: Vec<&str> = headers.into_iter().collect();
        let index = SoundingRecord::COLUMNS.map(|name| headers.iter().position(|h| *h == name));

        if index.iter().all(Option::is_none) {
            bail!(
                "none of the columns {:?} found in header {:?}",
                SoundingRecord::COLUMNS,
                headers
            );
        }
        for (name, idx) in SoundingRecord::COLUMNS.iter().zip(&index) {
            if idx.is_none() {
                log::warn!("Column '{name}' not found; its values will be NaN");
            }
        }
        Ok(Self(index))
    }

    fn record(&self, cell: impl Fn(usize) -> f64) -> SoundingRecord {
        SoundingRecord::from_columns(self.0.map(|idx| idx.map(&cell).unwrap_or(f64::NAN)))
    }
}

fn parse_cell(s: &str) -> f64 {
    s.trim().parse::<f64>().unwrap_or(f64::NAN)
}

// ---------------------------------------------------------------------------
// Delimited text loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading CSV file")?;
    parse_delimited(&text)
}

/// Parse delimited text with a header row.
///
/// The delimiter is guessed from the header line; rows may be ragged.
pub fn parse_delimited(text: &str) -> Result<Dataset> {
    let delimiter = sniff_delimiter(text.lines().next().unwrap_or(""));
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers().context("reading CSV headers")?.clone();
    let columns = ColumnIndex::locate(headers.iter())?;

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(columns.record(|idx| row.get(idx).map(parse_cell).unwrap_or(f64::NAN)));
    }

    Ok(Dataset::new(records))
}

/// The candidate delimiter occurring most often in the header, `,` on a tie.
pub fn sniff_delimiter(header: &str) -> u8 {
    const CANDIDATES: [u8; 4] = [b',', b';', b'\t', b'|'];
    let count = |d: u8| header.bytes().filter(|&b| b == d).count();
    CANDIDATES
        .iter()
        .copied()
        .fold((b',', 0), |best, d| {
            let n = count(d);
            if n > best.1 {
                (d, n)
            } else {
                best
            }
        })
        .0
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "depth": 0.02, "qt": 1.21, "fs": 0.012, "u2": 0.01, "sigma_vo_eff": 0.3 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

pub fn parse_json(text: &str) -> Result<Dataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        let values = SoundingRecord::COLUMNS.map(|name| match obj.get(name) {
            Some(JsonValue::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
            Some(JsonValue::String(s)) => parse_cell(s),
            _ => f64::NAN,
        });
        records.push(SoundingRecord::from_columns(values));
    }

    Ok(Dataset::new(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per recognized field.
///
/// Integer, float and string columns are cast to Float64; nulls and
/// unparseable strings become `NaN`.
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;

    let field_names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let columns = ColumnIndex::locate(field_names.iter().map(String::as_str))?;

    let reader = builder.build().context("building parquet reader")?;
    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let mut values: Vec<Vec<f64>> = Vec::with_capacity(batch.num_columns());
        for (idx, field) in batch.schema().fields().iter().enumerate() {
            if !columns.0.contains(&Some(idx)) {
                values.push(Vec::new());
                continue;
            }
            let cast = arrow::compute::cast(batch.column(idx), &DataType::Float64)
                .with_context(|| format!("column '{}' is not numeric", field.name()))?;
            let floats = cast.as_primitive::<Float64Type>();
            values.push(floats.iter().map(|v| v.unwrap_or(f64::NAN)).collect());
        }

        for row in 0..batch.num_rows() {
            records.push(columns.record(|idx| values[idx][row]));
        }
    }

    Ok(Dataset::new(records))
}
