//! Tabular result frames
//!
//! Flattens a report response into a column-typed table: dimension columns
//! stay strings, metric columns are coerced to integers or floats according
//! to their header's metric type. Cells that fail to parse become null.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use ga4_report::response::{MetricType, ReportResponse};

use crate::error::{FrameError, Result};

/// Data types carried by frame columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// UTF-8 string (all dimension columns)
    String,
    /// Signed 64-bit integer
    Int64,
    /// 64-bit floating point
    Float64,
}

impl DataType {
    /// Map a metric header's type to a column type
    pub fn from_metric_type(metric_type: MetricType) -> Self {
        if metric_type.is_integer() {
            Self::Int64
        } else if metric_type.is_float() {
            Self::Float64
        } else {
            Self::String
        }
    }
}

/// Column definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name
    pub name: String,
    /// Data type
    pub data_type: DataType,
}

impl Column {
    /// Create a column definition
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// A flattened report result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportFrame {
    /// Column definitions, dimensions first then metrics
    pub columns: Vec<Column>,
    /// Row data as JSON values; nulls mark unparseable metric cells
    pub rows: Vec<Vec<Value>>,
    /// Number of rows in this frame
    pub row_count: usize,
}

impl ReportFrame {
    /// Create a frame from columns and rows
    pub fn new(columns: Vec<Column>, rows: Vec<Vec<Value>>) -> Self {
        let row_count = rows.len();
        Self {
            columns,
            rows,
            row_count,
        }
    }

    /// Create an empty frame
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    /// Flatten a report response into a frame
    pub fn from_response(response: &ReportResponse) -> Result<Self> {
        let mut columns =
            Vec::with_capacity(response.dimension_headers.len() + response.metric_headers.len());

        for header in &response.dimension_headers {
            columns.push(Column::new(&header.name, DataType::String));
        }
        for header in &response.metric_headers {
            columns.push(Column::new(
                &header.name,
                DataType::from_metric_type(header.metric_type),
            ));
        }

        let mut rows = Vec::with_capacity(response.rows.len());
        for (index, row) in response.rows.iter().enumerate() {
            if row.dimension_values.len() != response.dimension_headers.len() {
                return Err(FrameError::RowShape {
                    row: index,
                    expected: response.dimension_headers.len(),
                    got: row.dimension_values.len(),
                    section: "dimension",
                });
            }
            if row.metric_values.len() != response.metric_headers.len() {
                return Err(FrameError::RowShape {
                    row: index,
                    expected: response.metric_headers.len(),
                    got: row.metric_values.len(),
                    section: "metric",
                });
            }

            let mut cells = Vec::with_capacity(columns.len());
            for cell in &row.dimension_values {
                cells.push(Value::String(cell.value.clone()));
            }
            for (cell, header) in row.metric_values.iter().zip(&response.metric_headers) {
                cells.push(coerce_metric(&cell.value, header.metric_type));
            }
            rows.push(cells);
        }

        Ok(Self::new(columns, rows))
    }

    /// Whether the frame has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names in order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Index of a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Index of a column by name, or an error naming it
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| FrameError::MissingColumn(name.to_string()))
    }
}

/// Coerce a metric cell to its column type
///
/// Mirrors the API contract: every cell arrives as a string. Unparseable
/// values become null instead of failing the whole frame.
fn coerce_metric(raw: &str, metric_type: MetricType) -> Value {
    if metric_type.is_integer() {
        match raw.parse::<i64>() {
            Ok(n) => Value::from(n),
            Err(_) => Value::Null,
        }
    } else if metric_type.is_float() {
        match raw.parse::<f64>() {
            Ok(f) => Value::from(f),
            Err(_) => Value::Null,
        }
    } else {
        Value::String(raw.to_string())
    }
}
