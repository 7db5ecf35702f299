//! Canned reports and period-over-period comparison

use tracing::debug;

use ga4_frame::{compare_frames, ReportFrame};
use ga4_report::daterange::DateRange;
use ga4_report::request::{OrderBy, ReportRequest};

use crate::error::Result;
use crate::{query, ReportClient};

/// Run the same report over two date ranges and compare the metrics
///
/// The frames are joined on `dimensions`; the result carries current,
/// previous, absolute change and percentage change columns per metric.
pub async fn compare_date_ranges(
    client: &dyn ReportClient,
    property: &str,
    dimensions: &[&str],
    metrics: &[&str],
    current: DateRange,
    previous: DateRange,
) -> Result<ReportFrame> {
    debug!(property, "comparing date ranges");
    let current_frame = query(client, &period_request(property, dimensions, metrics, current)?).await?;
    let previous_frame =
        query(client, &period_request(property, dimensions, metrics, previous)?).await?;
    Ok(compare_frames(&current_frame, &previous_frame, dimensions)?)
}

fn period_request(
    property: &str,
    dimensions: &[&str],
    metrics: &[&str],
    range: DateRange,
) -> Result<ReportRequest> {
    Ok(ReportRequest::new(property)?
        .with_dimensions(dimensions.iter().copied())
        .with_metrics(metrics.iter().copied())
        .with_date_range(range))
}

/// The most viewed pages over a date range, busiest first
pub async fn top_pages(
    client: &dyn ReportClient,
    property: &str,
    range: DateRange,
    limit: i64,
) -> Result<ReportFrame> {
    let request = ReportRequest::new(property)?
        .with_dimensions(["pagePath", "pageTitle"])
        .with_metrics(["screenPageViews", "activeUsers", "averageSessionDuration"])
        .with_date_range(range)
        .with_order_by(OrderBy::metric_desc("screenPageViews"))
        .with_limit(limit);
    query(client, &request).await
}

/// Session sources over a date range, largest first
pub async fn traffic_sources(
    client: &dyn ReportClient,
    property: &str,
    range: DateRange,
    limit: i64,
) -> Result<ReportFrame> {
    let request = ReportRequest::new(property)?
        .with_dimensions(["sessionSource", "sessionMedium", "sessionCampaign"])
        .with_metrics(["sessions", "activeUsers", "conversions"])
        .with_date_range(range)
        .with_order_by(OrderBy::metric_desc("sessions"))
        .with_limit(limit);
    query(client, &request).await
}
