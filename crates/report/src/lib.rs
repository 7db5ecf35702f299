//! GA4 report request model and filter expression builder
//!
//! This crate carries the request/response model for the GA4 Data API v1beta
//! and the filter expression builder that turns a small operator vocabulary
//! into the nested filter trees the API consumes.
//!
//! - **Filters**: [`filter`] — dimension/metric leaf construction, AND/OR/NOT
//!   combinators, typed numeric values
//! - **Requests**: [`request`] — `ReportRequest` and friends, serde-mapped to
//!   the API's JSON shape
//! - **Responses**: [`response`] — typed headers and string-valued rows
//! - **Date ranges**: [`daterange`] — "last N days" helpers
//!
//! # Usage
//!
//! ```
//! use ga4_report::daterange::DateRange;
//! use ga4_report::filter::{and_filter, dimension_filter, metric_filter};
//! use ga4_report::request::ReportRequest;
//!
//! let countries = and_filter(vec![
//!     dimension_filter("country", "==", "United States").unwrap(),
//!     dimension_filter("pagePath", "contains", "/blog/").unwrap(),
//! ])
//! .unwrap();
//!
//! let request = ReportRequest::new("123456789")
//!     .unwrap()
//!     .with_dimensions(["country", "pagePath"])
//!     .with_metrics(["activeUsers", "sessions"])
//!     .with_date_range(DateRange::last_days(30))
//!     .with_dimension_filter(countries)
//!     .with_metric_filter(metric_filter("sessions", ">", 100).unwrap());
//! ```

pub mod daterange;
pub mod error;
pub mod filter;
pub mod request;
pub mod response;

#[cfg(test)]
mod filter_test;

// Re-exports for convenience
pub use daterange::DateRange;
pub use error::{ReportError, Result};
pub use filter::{
    and_filter, dimension_filter, dimension_filter_with_case, metric_filter, not_filter,
    or_filter, FilterExpression, FilterValue,
};
pub use request::{BatchReportsRequest, Dimension, Metric, OrderBy, ReportRequest};
pub use response::{BatchReportsResponse, MetadataResponse, MetricType, ReportResponse};
