//! Frame export to CSV and JSON files
//!
//! CSV output quotes values containing commas, quotes, or newlines; JSON
//! output is a pretty-printed array of records. Multiple frames exported to
//! one CSV path fan out to numbered files (`data.csv` -> `data_0.csv`, ...).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::Result;
use crate::frame::ReportFrame;

/// Write a frame as CSV
pub fn write_csv<W: Write>(frame: &ReportFrame, writer: &mut W) -> Result<()> {
    let header: Vec<&str> = frame.column_names();
    writeln!(writer, "{}", header.join(","))?;

    for row in &frame.rows {
        let cells: Vec<String> = row.iter().map(csv_escape).collect();
        writeln!(writer, "{}", cells.join(","))?;
    }

    Ok(())
}

/// Export a frame to a CSV file
pub fn export_csv(frame: &ReportFrame, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_csv(frame, &mut writer)?;
    writer.flush()?;
    debug!(path = %path.display(), rows = frame.row_count, "exported csv");
    Ok(())
}

/// Export multiple frames to numbered CSV files
///
/// Returns the paths written, one per frame, in frame order.
pub fn export_csv_all(frames: &[ReportFrame], path: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let path = path.as_ref();
    let mut written = Vec::with_capacity(frames.len());

    for (index, frame) in frames.iter().enumerate() {
        let target = numbered_path(path, index);
        export_csv(frame, &target)?;
        written.push(target);
    }

    Ok(written)
}

/// Convert a frame to an array of records (column name -> cell value)
pub fn to_records(frame: &ReportFrame) -> Vec<Map<String, Value>> {
    frame
        .rows
        .iter()
        .map(|row| {
            frame
                .columns
                .iter()
                .zip(row.iter())
                .map(|(column, value)| (column.name.clone(), value.clone()))
                .collect()
        })
        .collect()
}

/// Write a frame as a pretty-printed JSON array of records
pub fn write_json<W: Write>(frame: &ReportFrame, writer: &mut W) -> Result<()> {
    let records = to_records(frame);
    serde_json::to_writer_pretty(&mut *writer, &records)?;
    writeln!(writer)?;
    Ok(())
}

/// Export a frame to a JSON file
pub fn export_json(frame: &ReportFrame, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_json(frame, &mut writer)?;
    writer.flush()?;
    debug!(path = %path.display(), rows = frame.row_count, "exported json");
    Ok(())
}

/// Export multiple frames to one JSON file as an array of record arrays
pub fn export_json_all(frames: &[ReportFrame], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let output: Vec<_> = frames.iter().map(to_records).collect();
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &output)?;
    writeln!(writer)?;
    writer.flush()?;
    debug!(path = %path.display(), frames = frames.len(), "exported json batch");
    Ok(())
}

/// Format a cell for display
fn format_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Escape a cell for CSV output
fn csv_escape(value: &Value) -> String {
    let s = format_value(value);
    if s.contains(',') || s.contains('\n') || s.contains('"') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s
    }
}

/// Insert an index before the extension: `data.csv` -> `data_1.csv`
fn numbered_path(path: &Path, index: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{}_{}.{}", stem, index, ext.to_string_lossy()),
        None => format!("{}_{}", stem, index),
    };
    path.with_file_name(name)
}
