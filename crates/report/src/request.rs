//! Report request model
//!
//! Serde structs mirroring the GA4 Data API v1beta request surface, with
//! builder-style construction. Filter trees built by [`crate::filter`] are
//! embedded as `dimension_filter` / `metric_filter`.

use serde::{Deserialize, Serialize};

use crate::daterange::DateRange;
use crate::error::{ReportError, Result};
use crate::filter::FilterExpression;

/// A dimension to report on (e.g. "country", "pagePath")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    /// API name of the dimension
    pub name: String,
}

impl Dimension {
    /// Create a dimension by API name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl From<&str> for Dimension {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Dimension {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// A metric to report on (e.g. "activeUsers", "sessions")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    /// API name of the metric
    pub name: String,
    /// Optional derived-metric expression
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
    /// Whether the metric is hidden from the response
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub invisible: bool,
}

impl Metric {
    /// Create a metric by API name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expression: None,
            invisible: false,
        }
    }

    /// Set a derived-metric expression
    pub fn with_expression(mut self, expression: impl Into<String>) -> Self {
        self.expression = Some(expression.into());
        self
    }
}

impl From<&str> for Metric {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Metric {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Result ordering for a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBy {
    /// Order by a metric's values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<MetricOrderBy>,
    /// Order by a dimension's values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension: Option<DimensionOrderBy>,
    /// Sort descending
    #[serde(default)]
    pub desc: bool,
}

impl OrderBy {
    /// Ascending order by a metric
    pub fn metric(name: impl Into<String>) -> Self {
        Self {
            metric: Some(MetricOrderBy {
                metric_name: name.into(),
            }),
            dimension: None,
            desc: false,
        }
    }

    /// Descending order by a metric
    pub fn metric_desc(name: impl Into<String>) -> Self {
        let mut order = Self::metric(name);
        order.desc = true;
        order
    }

    /// Ascending order by a dimension
    pub fn dimension(name: impl Into<String>) -> Self {
        Self {
            metric: None,
            dimension: Some(DimensionOrderBy {
                dimension_name: name.into(),
            }),
            desc: false,
        }
    }

    /// Descending order by a dimension
    pub fn dimension_desc(name: impl Into<String>) -> Self {
        let mut order = Self::dimension(name);
        order.desc = true;
        order
    }
}

/// Metric ordering target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricOrderBy {
    /// Metric to sort by
    pub metric_name: String,
}

/// Dimension ordering target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionOrderBy {
    /// Dimension to sort by
    pub dimension_name: String,
}

/// A `runReport` request
///
/// Built with `ReportRequest::new(property)` plus `with_*` methods. Realtime
/// reports reuse this type; their `date_ranges` are ignored by the API.
///
/// # Example
///
/// ```
/// use ga4_report::daterange::DateRange;
/// use ga4_report::filter::dimension_filter;
/// use ga4_report::request::ReportRequest;
///
/// let request = ReportRequest::new("123456789")
///     .unwrap()
///     .with_dimensions(["country", "city"])
///     .with_metrics(["activeUsers", "sessions"])
///     .with_date_range(DateRange::new("2024-01-01", "2024-01-31"))
///     .with_dimension_filter(dimension_filter("country", "==", "US").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    /// Property resource name, always "properties/<numeric id>"
    pub property: String,
    /// Dimensions to report on
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dimensions: Vec<Dimension>,
    /// Metrics to report on
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metrics: Vec<Metric>,
    /// Date ranges to query
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub date_ranges: Vec<DateRange>,
    /// Filter over dimension values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension_filter: Option<FilterExpression>,
    /// Filter over metric values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_filter: Option<FilterExpression>,
    /// Result ordering
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order_bys: Vec<OrderBy>,
    /// Maximum number of rows to return
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    /// Row offset for paging
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
}

impl ReportRequest {
    /// Create a request for a property
    ///
    /// Accepts a bare numeric ID or a "properties/<id>" resource name and
    /// normalizes to the latter. Non-numeric IDs are rejected.
    pub fn new(property: &str) -> Result<Self> {
        Ok(Self {
            property: normalize_property(property)?,
            dimensions: Vec::new(),
            metrics: Vec::new(),
            date_ranges: Vec::new(),
            dimension_filter: None,
            metric_filter: None,
            order_bys: Vec::new(),
            limit: None,
            offset: None,
        })
    }

    /// Set the dimensions (accepts names or [`Dimension`] values)
    pub fn with_dimensions<I, D>(mut self, dimensions: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<Dimension>,
    {
        self.dimensions = dimensions.into_iter().map(Into::into).collect();
        self
    }

    /// Set the metrics (accepts names or [`Metric`] values)
    pub fn with_metrics<I, M>(mut self, metrics: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<Metric>,
    {
        self.metrics = metrics.into_iter().map(Into::into).collect();
        self
    }

    /// Add a date range
    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_ranges.push(range);
        self
    }

    /// Set the dimension filter tree
    pub fn with_dimension_filter(mut self, filter: FilterExpression) -> Self {
        self.dimension_filter = Some(filter);
        self
    }

    /// Set the metric filter tree
    pub fn with_metric_filter(mut self, filter: FilterExpression) -> Self {
        self.metric_filter = Some(filter);
        self
    }

    /// Add a result ordering
    pub fn with_order_by(mut self, order_by: OrderBy) -> Self {
        self.order_bys.push(order_by);
        self
    }

    /// Set the row limit
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the row offset
    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// A `batchRunReports` request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReportsRequest {
    /// Property resource name shared by all sub-requests
    pub property: String,
    /// Up to five sub-requests
    pub requests: Vec<ReportRequest>,
}

impl BatchReportsRequest {
    /// Create a batch request from individual report requests
    ///
    /// The property is taken from the first request; the API requires all
    /// sub-requests to target the same property.
    pub fn new(requests: Vec<ReportRequest>) -> Result<Self> {
        let property = requests
            .first()
            .map(|r| r.property.clone())
            .ok_or(ReportError::EmptyBatch)?;
        Ok(Self { property, requests })
    }
}

/// Normalize a property ID to its "properties/<id>" resource name
pub fn normalize_property(property: &str) -> Result<String> {
    let id = property.trim().trim_start_matches("properties/");
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
        return Err(ReportError::InvalidProperty(property.to_string()));
    }
    Ok(format!("properties/{}", id))
}
