//! Query orchestration for GA4 reports
//!
//! The [`ReportClient`] trait is the seam between report construction and
//! whatever transport actually talks to the Analytics Data API. The free
//! functions here drive a client and shape its responses into
//! [`ReportFrame`]s, so callers never handle raw response rows.

pub mod credentials;
pub mod error;
pub mod helpers;


use async_trait::async_trait;
use tracing::debug;

use ga4_frame::{Column, DataType, ReportFrame};
use ga4_report::request::{BatchReportsRequest, ReportRequest};
use ga4_report::response::{BatchReportsResponse, MetadataResponse, ReportResponse};

pub use crate::credentials::ServiceAccount;
pub use crate::error::{ClientError, Result};
pub use crate::helpers::{compare_date_ranges, top_pages, traffic_sources};

/// Transport seam for the Analytics Data API
///
/// Implementations issue the actual API calls. Tests substitute a stub that
/// returns canned responses.
#[async_trait]
pub trait ReportClient: Send + Sync {
    /// Execute a single report request
    async fn run_report(&self, request: &ReportRequest) -> Result<ReportResponse>;

    /// Execute up to five report requests against one property
    async fn batch_run_reports(
        &self,
        request: &BatchReportsRequest,
    ) -> Result<BatchReportsResponse>;

    /// Execute a realtime report; date ranges on the request are ignored
    async fn run_realtime_report(&self, request: &ReportRequest) -> Result<ReportResponse>;

    /// Fetch the dimension and metric catalogue for a property
    async fn get_metadata(&self, property: &str) -> Result<MetadataResponse>;
}

/// Run one report and shape the response into a frame
pub async fn query(client: &dyn ReportClient, request: &ReportRequest) -> Result<ReportFrame> {
    debug!(property = %request.property, "running report");
    let response = client.run_report(request).await?;
    let frame = ReportFrame::from_response(&response)?;
    debug!(rows = frame.row_count, "report complete");
    Ok(frame)
}

/// Run a batch of reports, one frame per request
pub async fn query_batch(
    client: &dyn ReportClient,
    request: &BatchReportsRequest,
) -> Result<Vec<ReportFrame>> {
    debug!(
        property = %request.property,
        reports = request.requests.len(),
        "running batch report"
    );
    let response = client.batch_run_reports(request).await?;
    let mut frames = Vec::with_capacity(response.reports.len());
    for report in &response.reports {
        frames.push(ReportFrame::from_response(report)?);
    }
    Ok(frames)
}

/// Run a realtime report and shape the response into a frame
pub async fn query_realtime(
    client: &dyn ReportClient,
    request: &ReportRequest,
) -> Result<ReportFrame> {
    debug!(property = %request.property, "running realtime report");
    let response = client.run_realtime_report(request).await?;
    Ok(ReportFrame::from_response(&response)?)
}

/// Fetch property metadata as a frame of dimensions and metrics
///
/// Rows are sorted by kind then API name, with duplicate entries dropped.
pub async fn metadata_frame(client: &dyn ReportClient, property: &str) -> Result<ReportFrame> {
    let metadata = client.get_metadata(property).await?;

    let mut rows: Vec<Vec<serde_json::Value>> = Vec::new();
    for dim in &metadata.dimensions {
        rows.push(metadata_row(
            "Dimension",
            "STRING",
            &dim.api_name,
            &dim.ui_name,
            &dim.description,
            dim.custom_definition,
        ));
    }
    for metric in &metadata.metrics {
        rows.push(metadata_row(
            "Metric",
            metric.metric_type.as_str(),
            &metric.api_name,
            &metric.ui_name,
            &metric.description,
            metric.custom_definition,
        ));
    }

    // sort by kind then API name, drop duplicate catalogue entries
    rows.sort_by(|a, b| {
        let left = (a[0].as_str().unwrap_or(""), a[2].as_str().unwrap_or(""));
        let right = (b[0].as_str().unwrap_or(""), b[2].as_str().unwrap_or(""));
        left.cmp(&right)
    });
    rows.dedup_by(|a, b| a[0] == b[0] && a[2] == b[2]);

    let columns = vec![
        Column::new("Type", DataType::String),
        Column::new("Data type", DataType::String),
        Column::new("API Name", DataType::String),
        Column::new("UI Name", DataType::String),
        Column::new("Description", DataType::String),
        Column::new("Custom definition", DataType::String),
    ];
    Ok(ReportFrame::new(columns, rows))
}

fn metadata_row(
    kind: &str,
    data_type: &str,
    api_name: &str,
    ui_name: &str,
    description: &str,
    custom: bool,
) -> Vec<serde_json::Value> {
    vec![
        kind.into(),
        data_type.into(),
        api_name.into(),
        ui_name.into(),
        description.into(),
        if custom { "true" } else { "false" }.into(),
    ]
}
