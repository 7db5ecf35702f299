//! Client-side error types

use thiserror::Error;

/// Errors produced while preparing or executing report queries
#[derive(Debug, Error)]
pub enum ClientError {
    /// The service account keyfile does not exist
    #[error("service account keyfile not found: {0}")]
    CredentialsNotFound(String),

    /// The service account path points at something other than a file
    #[error("service account keyfile is not a file: {0}")]
    CredentialsNotFile(String),

    /// The backend failed to execute a request
    #[error("request failed: {0}")]
    Execution(String),

    /// Invalid request or filter construction
    #[error(transparent)]
    Report(#[from] ga4_report::ReportError),

    /// Response could not be shaped into a frame
    #[error(transparent)]
    Frame(#[from] ga4_frame::FrameError),
}

pub type Result<T> = std::result::Result<T, ClientError>;
