//! Error types for the alarmsync binary.

use thiserror::Error;

/// Result type alias for the binary's modules.
pub type Result<T> = std::result::Result<T, AlarmsyncError>;

/// Errors that can occur while reading or mutating remote state.
#[derive(Error, Debug)]
pub enum AlarmsyncError {
    #[error("AWS SDK error: {0}")]
    AwsSdk(String),

    #[error("table '{table_name}' reports no provisioned throughput")]
    MissingThroughput { table_name: String },

    #[error(transparent)]
    Catalog(#[from] alarmsync_core::CatalogError),
}
