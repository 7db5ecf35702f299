//! Report response model
//!
//! Serde structs mirroring the GA4 Data API v1beta response surface. All cell
//! values arrive as strings; typed interpretation happens downstream using the
//! metric headers' [`MetricType`].

use serde::{Deserialize, Serialize};

/// A `runReport` / `runRealtimeReport` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    /// Dimension column headers, in column order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dimension_headers: Vec<DimensionHeader>,
    /// Metric column headers, in column order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metric_headers: Vec<MetricHeader>,
    /// Result rows
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rows: Vec<Row>,
    /// Total row count across all pages
    #[serde(default, skip_serializing_if = "is_zero")]
    pub row_count: i64,
    /// Response kind, e.g. "analyticsData#runReport"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

fn is_zero(n: &i64) -> bool {
    *n == 0
}

impl ReportResponse {
    /// All column names, dimensions first then metrics
    pub fn headers(&self) -> Vec<&str> {
        self.dimension_headers
            .iter()
            .map(|h| h.name.as_str())
            .chain(self.metric_headers.iter().map(|h| h.name.as_str()))
            .collect()
    }
}

/// A `batchRunReports` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BatchReportsResponse {
    /// One response per sub-request, in request order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reports: Vec<ReportResponse>,
    /// Response kind, e.g. "analyticsData#batchRunReports"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Header for a dimension column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionHeader {
    /// Dimension API name
    pub name: String,
}

/// Header for a metric column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricHeader {
    /// Metric API name
    pub name: String,
    /// Value type of the metric column
    #[serde(rename = "type", default)]
    pub metric_type: MetricType,
}

/// A single result row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    /// One value per dimension header
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dimension_values: Vec<CellValue>,
    /// One value per metric header
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metric_values: Vec<CellValue>,
}

/// A single cell value (always a string on the wire)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellValue {
    /// The raw value
    #[serde(default)]
    pub value: String,
}

impl CellValue {
    /// Create a cell value
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// Metric value types reported in metric headers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetricType {
    /// Type not set by the API
    #[default]
    MetricTypeUnspecified,
    /// Integer count
    TypeInteger,
    /// Floating point
    TypeFloat,
    /// Duration in seconds
    TypeSeconds,
    /// Duration in milliseconds
    TypeMilliseconds,
    /// Duration in minutes
    TypeMinutes,
    /// Duration in hours
    TypeHours,
    /// Custom-metric standard unit
    TypeStandard,
    /// Currency amount
    TypeCurrency,
    /// Length in feet
    TypeFeet,
    /// Length in miles
    TypeMiles,
    /// Length in meters
    TypeMeters,
    /// Length in kilometers
    TypeKilometers,
}

impl MetricType {
    /// Whether values of this type are whole numbers
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Self::TypeInteger | Self::TypeSeconds | Self::TypeMilliseconds
        )
    }

    /// The wire name of this type, e.g. "TYPE_INTEGER"
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MetricTypeUnspecified => "METRIC_TYPE_UNSPECIFIED",
            Self::TypeInteger => "TYPE_INTEGER",
            Self::TypeFloat => "TYPE_FLOAT",
            Self::TypeSeconds => "TYPE_SECONDS",
            Self::TypeMilliseconds => "TYPE_MILLISECONDS",
            Self::TypeMinutes => "TYPE_MINUTES",
            Self::TypeHours => "TYPE_HOURS",
            Self::TypeStandard => "TYPE_STANDARD",
            Self::TypeCurrency => "TYPE_CURRENCY",
            Self::TypeFeet => "TYPE_FEET",
            Self::TypeMiles => "TYPE_MILES",
            Self::TypeMeters => "TYPE_METERS",
            Self::TypeKilometers => "TYPE_KILOMETERS",
        }
    }

    /// Whether values of this type are fractional
    pub fn is_float(&self) -> bool {
        matches!(
            self,
            Self::TypeFloat
                | Self::TypeCurrency
                | Self::TypeStandard
                | Self::TypeMinutes
                | Self::TypeHours
                | Self::TypeFeet
                | Self::TypeMiles
                | Self::TypeMeters
                | Self::TypeKilometers
        )
    }
}

/// A `getMetadata` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MetadataResponse {
    /// Dimensions available on the property
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dimensions: Vec<DimensionMetadata>,
    /// Metrics available on the property
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metrics: Vec<MetricMetadata>,
}

/// Metadata for one dimension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DimensionMetadata {
    /// API name used in requests
    #[serde(default)]
    pub api_name: String,
    /// Human-readable name
    #[serde(default)]
    pub ui_name: String,
    /// Description
    #[serde(default)]
    pub description: String,
    /// Whether this is a user-defined dimension
    #[serde(default)]
    pub custom_definition: bool,
}

/// Metadata for one metric
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MetricMetadata {
    /// API name used in requests
    #[serde(default)]
    pub api_name: String,
    /// Human-readable name
    #[serde(default)]
    pub ui_name: String,
    /// Description
    #[serde(default)]
    pub description: String,
    /// Whether this is a user-defined metric
    #[serde(default)]
    pub custom_definition: bool,
    /// Value type of the metric
    #[serde(rename = "type", default)]
    pub metric_type: MetricType,
}
