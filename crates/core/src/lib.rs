//! Functional core for alarmsync.
//!
//! Pure data types and pure functions: configuration with bounds validation,
//! the alarm domain model, catalog indexing, reconcile planning, and apply
//! orchestration over an abstract sink. No AWS SDK types and no I/O live here;
//! the `alarmsync` binary is the imperative shell around this crate.

pub mod apply;
pub mod catalog;
pub mod config;
pub mod model;
pub mod planning;

pub use apply::{apply_plan, AlarmAction, AlarmSink, ApplyOutcome, ApplyReport, SinkError};
pub use catalog::{index_namespace_alarms, AlarmRecord, CatalogError};
pub use config::{ConfigError, SyncConfig};
pub use model::{alarm_name, DesiredAlarm, MetricKind, TableRecord, DYNAMODB_NAMESPACE};
pub use planning::{filter_table_names, format_plan, reconcile, ReconcilePlan};
