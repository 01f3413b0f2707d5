//! Pure functions for calculating reconcile plans (Functional Core).

use std::collections::HashMap;

use crate::config::SyncConfig;
use crate::model::{DesiredAlarm, MetricKind, TableRecord};

/// Planned changes for one reconciliation run.
///
/// The two sets are disjoint by alarm name and sorted by name, so a plan is
/// deterministic for a given inventory and catalog.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReconcilePlan {
    /// Desired alarms with no existing counterpart.
    pub to_create: Vec<DesiredAlarm>,
    /// Desired alarms whose existing threshold differs from the computed one.
    pub to_update: Vec<DesiredAlarm>,
}

impl ReconcilePlan {
    /// True when the catalog already matches the desired state.
    pub fn is_noop(&self) -> bool {
        self.to_create.is_empty() && self.to_update.is_empty()
    }

    /// Total number of alarms the plan would touch.
    pub fn len(&self) -> usize {
        self.to_create.len() + self.to_update.len()
    }

    pub fn is_empty(&self) -> bool {
        self.is_noop()
    }
}

/// Pure function: Retains the table names covered by the prefix filter.
///
/// No prefix means every name survives. Comparison is exact-match and
/// case-sensitive.
pub fn filter_table_names(names: Vec<String>, prefix: Option<&str>) -> Vec<String> {
    match prefix {
        None => names,
        Some(prefix) => names
            .into_iter()
            .filter(|name| name.starts_with(prefix))
            .collect(),
    }
}

/// Pure function: Calculate what changes are needed to reach desired state.
///
/// Derives two desired alarms per table (one per metric kind) and classifies
/// each one exactly once against the existing catalog: absent name goes to
/// `to_create`, present name with a different threshold goes to `to_update`
/// (exact numeric inequality, no tolerance), and an unchanged threshold is
/// omitted entirely. Running the result through the monitoring service and
/// reconciling again therefore yields an empty plan.
pub fn reconcile(
    tables: &[TableRecord],
    existing: &HashMap<String, f64>,
    config: &SyncConfig,
) -> ReconcilePlan {
    let mut plan = ReconcilePlan::default();

    for table in tables {
        for kind in MetricKind::ALL {
            let desired = DesiredAlarm::derive(table, kind, config);

            match existing.get(&desired.name) {
                None => plan.to_create.push(desired),
                Some(&threshold) if threshold != desired.threshold => {
                    plan.to_update.push(desired);
                }
                Some(_) => {}
            }
        }
    }

    plan.to_create.sort_by(|a, b| a.name.cmp(&b.name));
    plan.to_update.sort_by(|a, b| a.name.cmp(&b.name));
    plan
}

/// Pure function: Format a reconcile plan for display.
pub fn format_plan(plan: &ReconcilePlan) -> Vec<String> {
    if plan.is_noop() {
        return vec!["= Alarms are up to date".to_string()];
    }

    let mut lines = Vec::with_capacity(plan.len());
    for alarm in &plan.to_create {
        lines.push(format!(
            "+ Create alarm: {} (threshold {})",
            alarm.name, alarm.threshold
        ));
    }
    for alarm in &plan.to_update {
        lines.push(format!(
            "~ Update alarm: {} (threshold {})",
            alarm.name, alarm.threshold
        ));
    }
    lines
}
