// 🏗️ Parser Framework - CSV / JSON decoders, plain or gzip-wrapped
// Turns an input file into RawRecords; validation is left to the loader

use crate::record::{RawRecord, FIELD_ORDER};
use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

// ============================================================================
// CORE TYPES
// ============================================================================

/// InputFormat - Record encoding, independent of compression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputFormat {
    Csv,
    Json,
}

impl InputFormat {
    /// Human-readable name for display
    pub fn name(&self) -> &str {
        match self {
            InputFormat::Csv => "CSV",
            InputFormat::Json => "JSON",
        }
    }
}

/// SourceFormat - What detect_format() found for a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFormat {
    pub format: InputFormat,
    pub gzip: bool,
}

// ============================================================================
// DECODER TRAIT
// ============================================================================

/// RecordDecoder - One implementation per input encoding
pub trait RecordDecoder: Send + Sync {
    /// Decode every record in `reader`
    ///
    /// # Arguments
    /// * `reader` - Uncompressed input stream
    /// * `source_name` - Used in error messages only
    fn decode(&self, reader: Box<dyn Read>, source_name: &str) -> Result<Vec<RawRecord>>;

    /// Get the format this decoder handles
    fn format(&self) -> InputFormat;
}

// ============================================================================
// FACTORY FUNCTIONS
// ============================================================================

/// Detect the format from the file extension (case-insensitive)
///
/// # Examples:
/// ```
/// use population_stats::parser::{detect_format, InputFormat};
/// use std::path::Path;
///
/// let found = detect_format(Path::new("people.csv.gz")).unwrap();
/// assert_eq!(found.format, InputFormat::Csv);
/// assert!(found.gzip);
/// ```
pub fn detect_format(file_path: &Path) -> Result<SourceFormat> {
    let filename = file_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");

    let mut extensions = filename.rsplit('.');
    let last = extensions.next().unwrap_or("").to_lowercase();

    let (ext, gzip) = if last == "gz" && filename.contains('.') {
        let inner = extensions.next().unwrap_or("").to_lowercase();
        (inner, true)
    } else {
        (last, false)
    };

    // A name without any dot has no extension at all
    let format = match ext.as_str() {
        "csv" if filename.contains('.') => InputFormat::Csv,
        "json" if filename.contains('.') => InputFormat::Json,
        _ => {
            return Err(anyhow::anyhow!(
                "Unsupported input format: {} (expected .csv, .json, .csv.gz or .json.gz)",
                filename
            ))
        }
    };

    Ok(SourceFormat { format, gzip })
}

/// Get the decoder for a format
pub fn get_decoder(format: InputFormat) -> Box<dyn RecordDecoder> {
    match format {
        InputFormat::Csv => Box::new(CsvDecoder::new()),
        InputFormat::Json => Box::new(JsonDecoder::new()),
    }
}

/// Open a file, unwrapping gzip when the format says so
pub fn open_input(file_path: &Path, source: SourceFormat) -> Result<Box<dyn Read>> {
    let file = File::open(file_path)
        .with_context(|| format!("Failed to open file: {}", file_path.display()))?;
    let reader = BufReader::new(file);

    if source.gzip {
        Ok(Box::new(GzDecoder::new(reader)))
    } else {
        Ok(Box::new(reader))
    }
}

/// Detect, open and decode a file
pub fn decode_file(file_path: &Path) -> Result<Vec<RawRecord>> {
    let source = detect_format(file_path)?;
    debug!(
        path = %file_path.display(),
        input_format = source.format.name(),
        gzip = source.gzip,
        "decoding input"
    );

    let reader = open_input(file_path, source)?;
    let filename = file_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("input")
        .to_string();

    get_decoder(source.format).decode(reader, &filename)
}

// ============================================================================
// CSV DECODER
// ============================================================================

/// CSV with one header row
pub struct CsvDecoder;

impl CsvDecoder {
    pub fn new() -> Self {
        CsvDecoder
    }
}

impl Default for CsvDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Column index per field: by header name when the header names every
/// field, otherwise the reference column order.
fn column_layout(headers: &csv::StringRecord) -> [(usize, &'static str); 6] {
    let by_name: Option<Vec<usize>> = FIELD_ORDER
        .iter()
        .map(|field| headers.iter().position(|h| h.trim() == *field))
        .collect();

    let mut layout = [(0, ""); 6];
    for (i, field) in FIELD_ORDER.iter().enumerate() {
        let column = by_name.as_ref().map_or(i, |cols| cols[i]);
        layout[i] = (column, *field);
    }
    layout
}

impl RecordDecoder for CsvDecoder {
    fn decode(&self, reader: Box<dyn Read>, source_name: &str) -> Result<Vec<RawRecord>> {
        use csv::ReaderBuilder;

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = reader
            .headers()
            .with_context(|| format!("Failed to read CSV header in {}", source_name))?
            .clone();
        let layout = column_layout(&headers);

        let mut records = Vec::new();

        for (index, result) in reader.records().enumerate() {
            let row = result.with_context(|| {
                format!("Failed to parse CSV record {} in {}", index + 1, source_name)
            })?;

            // Physical line the record starts on; blank lines and quoted
            // newlines are counted
            let line = row.position().map_or(index + 2, |p| p.line() as usize);
            let mut raw = RawRecord::new(line);
            for (column, field) in layout {
                // Short rows leave the field missing
                if let Some(value) = row.get(column) {
                    raw.set_field(field, value.to_string());
                }
            }

            records.push(raw);
        }

        Ok(records)
    }

    fn format(&self) -> InputFormat {
        InputFormat::Csv
    }
}

// ============================================================================
// JSON DECODER
// ============================================================================

/// JSON array of objects
pub struct JsonDecoder;

impl JsonDecoder {
    pub fn new() -> Self {
        JsonDecoder
    }
}

impl Default for JsonDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Scalar JSON value as text; null and containers count as missing
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

impl RecordDecoder for JsonDecoder {
    fn decode(&self, reader: Box<dyn Read>, source_name: &str) -> Result<Vec<RawRecord>> {
        let json: Value = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse JSON from {}", source_name))?;

        let items = json
            .as_array()
            .ok_or_else(|| anyhow::anyhow!("JSON in {} is not an array of records", source_name))?;

        let records: Vec<RawRecord> = items
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                // JSON array index (1-based for consistency)
                let mut raw = RawRecord::new(idx + 1);
                if let Some(object) = item.as_object() {
                    for field in FIELD_ORDER {
                        if let Some(text) = object.get(field).and_then(scalar_text) {
                            raw.set_field(field, text);
                        }
                    }
                }
                raw
            })
            .collect();

        Ok(records)
    }

    fn format(&self) -> InputFormat {
        InputFormat::Json
    }
}

// ============================================================================
// TESTS
// ============================================================================
