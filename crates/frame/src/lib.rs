//! GA4 result frames
//!
//! Reshapes report responses into column-typed tables and provides the glue
//! around them:
//!
//! - **Frames**: [`frame`] — flattening with metric-type coercion
//! - **Export**: [`export`] — CSV and JSON files, single or batched
//! - **Comparison**: [`compare`] — period-over-period outer join with change
//!   columns
//!
//! # Usage
//!
//! ```ignore
//! use ga4_frame::{export_csv, ReportFrame};
//!
//! let frame = ReportFrame::from_response(&response)?;
//! export_csv(&frame, "analytics_data.csv")?;
//! ```

pub mod compare;
pub mod error;
pub mod export;
pub mod frame;


// Re-exports for convenience
pub use compare::compare_frames;
pub use error::{FrameError, Result};
pub use export::{export_csv, export_csv_all, export_json, export_json_all, to_records};
pub use frame::{Column, DataType, ReportFrame};
