//! Plan application over an abstract alarm sink (Functional Core).
//!
//! The sink trait is the seam to the monitoring service: the binary provides
//! a CloudWatch implementation, tests provide an in-memory recording one.
//! Application is best-effort per alarm; one failure never aborts siblings.

use async_trait::async_trait;
use thiserror::Error;

use crate::model::DesiredAlarm;
use crate::planning::ReconcilePlan;

/// Errors returned by an alarm sink mutation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct SinkError(pub String);

/// Mutation operations on the monitoring service.
#[async_trait]
pub trait AlarmSink: Send + Sync {
    /// Creates a new alarm.
    async fn create_alarm(&self, alarm: &DesiredAlarm) -> Result<(), SinkError>;

    /// Updates an existing alarm in place.
    async fn update_alarm(&self, alarm: &DesiredAlarm) -> Result<(), SinkError>;
}

/// What happened (or would happen) to one alarm.
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyOutcome {
    Created,
    Updated,
    WouldCreate,
    WouldUpdate,
    Failed { action: &'static str, message: String },
}

/// One line of the final report.
#[derive(Debug, Clone, PartialEq)]
pub struct AlarmAction {
    pub name: String,
    pub threshold: f64,
    pub outcome: ApplyOutcome,
}

impl AlarmAction {
    /// Renders the action as one report line.
    pub fn describe(&self) -> String {
        match &self.outcome {
            ApplyOutcome::Created => format!("Created alarm: {} (threshold {})", self.name, self.threshold),
            ApplyOutcome::Updated => format!("Updated alarm: {} (threshold {})", self.name, self.threshold),
            ApplyOutcome::WouldCreate => {
                format!("Would create alarm: {} (threshold {})", self.name, self.threshold)
            }
            ApplyOutcome::WouldUpdate => {
                format!("Would update alarm: {} (threshold {})", self.name, self.threshold)
            }
            ApplyOutcome::Failed { action, message } => {
                format!("Failed to {action} alarm {}: {message}", self.name)
            }
        }
    }
}

/// Report of one apply pass, one action per planned alarm.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ApplyReport {
    pub actions: Vec<AlarmAction>,
}

impl ApplyReport {
    pub fn failures(&self) -> impl Iterator<Item = &AlarmAction> {
        self.actions
            .iter()
            .filter(|a| matches!(a.outcome, ApplyOutcome::Failed { .. }))
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}

/// Applies a reconcile plan through the sink.
///
/// With `dry_run` set, the sink is never invoked and every planned alarm is
/// reported as would-create / would-update. Otherwise each alarm is applied
/// independently and per-item failures are collected into the report.
pub async fn apply_plan(
    sink: &dyn AlarmSink,
    plan: &ReconcilePlan,
    dry_run: bool,
) -> ApplyReport {
    let mut report = ApplyReport::default();

    for alarm in &plan.to_create {
        let outcome = if dry_run {
            ApplyOutcome::WouldCreate
        } else {
            match sink.create_alarm(alarm).await {
                Ok(()) => ApplyOutcome::Created,
                Err(err) => ApplyOutcome::Failed {
                    action: "create",
                    message: err.0,
                },
            }
        };
        report.actions.push(AlarmAction {
            name: alarm.name.clone(),
            threshold: alarm.threshold,
            outcome,
        });
    }

    for alarm in &plan.to_update {
        let outcome = if dry_run {
            ApplyOutcome::WouldUpdate
        } else {
            match sink.update_alarm(alarm).await {
                Ok(()) => ApplyOutcome::Updated,
                Err(err) => ApplyOutcome::Failed {
                    action: "update",
                    message: err.0,
                },
            }
        };
        report.actions.push(AlarmAction {
            name: alarm.name.clone(),
            threshold: alarm.threshold,
            outcome,
        });
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SyncConfig;
    use crate::model::TableRecord;
    use crate::planning::reconcile;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Records every mutation; fails on names listed in `fail_on`.
    #[derive(Default)]
    struct RecordingSink {
        calls: Mutex<Vec<String>>,
        fail_on: Vec<String>,
    }

    #[async_trait]
    impl AlarmSink for RecordingSink {
        async fn create_alarm(&self, alarm: &DesiredAlarm) -> Result<(), SinkError> {
            self.calls.lock().unwrap().push(format!("create {}", alarm.name));
            if self.fail_on.contains(&alarm.name) {
                return Err(SinkError("access denied".to_string()));
            }
            Ok(())
        }

        async fn update_alarm(&self, alarm: &DesiredAlarm) -> Result<(), SinkError> {
            self.calls.lock().unwrap().push(format!("update {}", alarm.name));
            if self.fail_on.contains(&alarm.name) {
                return Err(SinkError("access denied".to_string()));
            }
            Ok(())
        }
    }

    fn test_plan() -> ReconcilePlan {
        let config =
            SyncConfig::new(80, 300, 12, "arn:aws:sns:us-east-1:123456789012:ddb", None).unwrap();
        let tables = vec![
            TableRecord {
                name: "Orders".to_string(),
                read_capacity: 100,
                write_capacity: 25,
            },
            TableRecord {
                name: "Items".to_string(),
                read_capacity: 50,
                write_capacity: 50,
            },
        ];
        reconcile(&tables, &HashMap::new(), &config)
    }

    #[tokio::test]
    async fn test_dry_run_makes_no_calls() {
        let sink = RecordingSink::default();
        let plan = test_plan();

        let report = apply_plan(&sink, &plan, true).await;

        assert!(sink.calls.lock().unwrap().is_empty());
        assert_eq!(report.actions.len(), plan.len());
        assert!(report
            .actions
            .iter()
            .all(|a| a.outcome == ApplyOutcome::WouldCreate));
    }

    #[tokio::test]
    async fn test_apply_calls_sink_per_alarm() {
        let sink = RecordingSink::default();
        let plan = test_plan();

        let report = apply_plan(&sink, &plan, false).await;

        assert_eq!(sink.calls.lock().unwrap().len(), 4);
        assert!(!report.has_failures());
        assert!(report
            .actions
            .iter()
            .all(|a| a.outcome == ApplyOutcome::Created));
    }

    #[tokio::test]
    async fn test_one_failure_does_not_stop_siblings() {
        let plan = test_plan();
        let sink = RecordingSink {
            calls: Mutex::new(Vec::new()),
            fail_on: vec![plan.to_create[0].name.clone()],
        };

        let report = apply_plan(&sink, &plan, false).await;

        // Every alarm was still attempted.
        assert_eq!(sink.calls.lock().unwrap().len(), 4);
        assert_eq!(report.failures().count(), 1);
        assert_eq!(
            report
                .actions
                .iter()
                .filter(|a| a.outcome == ApplyOutcome::Created)
                .count(),
            3
        );
    }

    #[tokio::test]
    async fn test_updates_use_update_operation() {
        let sink = RecordingSink::default();
        let plan = ReconcilePlan {
            to_create: Vec::new(),
            to_update: test_plan().to_create,
        };

        let report = apply_plan(&sink, &plan, false).await;

        assert!(sink
            .calls
            .lock()
            .unwrap()
            .iter()
            .all(|call| call.starts_with("update ")));
        assert!(report
            .actions
            .iter()
            .all(|a| a.outcome == ApplyOutcome::Updated));
    }

    #[test]
    fn test_describe_lines() {
        let action = AlarmAction {
            name: "Orders-ReadLimit-BasicAlarm".to_string(),
            threshold: 24000.0,
            outcome: ApplyOutcome::WouldCreate,
        };
        assert_eq!(
            action.describe(),
            "Would create alarm: Orders-ReadLimit-BasicAlarm (threshold 24000)"
        );
    }
}
