//! Alarm domain model (Functional Core - pure data).
//!
//! Pure types and name-derivation functions. All functions are sync and have
//! no side effects.

use crate::config::SyncConfig;

/// CloudWatch namespace that owns every alarm this tool manages.
pub const DYNAMODB_NAMESPACE: &str = "AWS/DynamoDB";

/// Suffix appended to every derived alarm name.
pub const ALARM_NAME_SUFFIX: &str = "BasicAlarm";

/// A managed table with its provisioned throughput.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct TableRecord {
    pub name: String,
    pub read_capacity: i64,
    pub write_capacity: i64,
}

/// The two capacity-consumption metrics we alarm on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Read,
    Write,
}

impl MetricKind {
    /// Both metric kinds, in the order alarms are derived per table.
    pub const ALL: [MetricKind; 2] = [MetricKind::Read, MetricKind::Write];

    /// CloudWatch metric name.
    pub fn metric_name(&self) -> &'static str {
        match self {
            MetricKind::Read => "ConsumedReadCapacityUnits",
            MetricKind::Write => "ConsumedWriteCapacityUnits",
        }
    }

    /// Token used in the derived alarm name.
    pub fn name_suffix(&self) -> &'static str {
        match self {
            MetricKind::Read => "ReadLimit",
            MetricKind::Write => "WriteLimit",
        }
    }

    /// The provisioned capacity this metric is measured against.
    pub fn capacity_of(&self, table: &TableRecord) -> i64 {
        match self {
            MetricKind::Read => table.read_capacity,
            MetricKind::Write => table.write_capacity,
        }
    }
}

/// Derive the canonical alarm name for a table and metric kind.
///
/// Pattern: `<table>-<ReadLimit|WriteLimit>-BasicAlarm`. This is the join key
/// between desired and existing alarms; table names are unique within an
/// account/region, so derived names are too.
pub fn alarm_name(table_name: &str, kind: MetricKind) -> String {
    format!("{table_name}-{}-{ALARM_NAME_SUFFIX}", kind.name_suffix())
}

/// The alarm configuration that should exist right now for one
/// (table, metric) pair, computed from current provisioned capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct DesiredAlarm {
    pub name: String,
    pub table_name: String,
    pub metric: MetricKind,
    pub threshold: f64,
    pub period: i32,
    pub evaluation_periods: i32,
    pub sns_topic: String,
}

impl DesiredAlarm {
    /// Builds the desired alarm for one table and metric kind.
    ///
    /// Threshold is `ratio * capacity * period`: the number of capacity units
    /// the table may consume over one period before the alarm fires. A table
    /// with zero provisioned capacity yields a zero threshold, which is still
    /// a legitimate alarm.
    pub fn derive(table: &TableRecord, kind: MetricKind, config: &SyncConfig) -> Self {
        let capacity = kind.capacity_of(table);
        Self {
            name: alarm_name(&table.name, kind),
            table_name: table.name.clone(),
            metric: kind,
            threshold: config.ratio * capacity as f64 * f64::from(config.period),
            period: config.period,
            evaluation_periods: config.evaluation_periods,
            sns_topic: config.sns_topic.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SyncConfig {
        SyncConfig::new(80, 300, 12, "arn:aws:sns:us-east-1:123456789012:ddb", None).unwrap()
    }

    #[test]
    fn test_alarm_name_derivation() {
        assert_eq!(
            alarm_name("Orders", MetricKind::Read),
            "Orders-ReadLimit-BasicAlarm"
        );
        assert_eq!(
            alarm_name("Orders", MetricKind::Write),
            "Orders-WriteLimit-BasicAlarm"
        );
    }

    #[test]
    fn test_metric_names() {
        assert_eq!(MetricKind::Read.metric_name(), "ConsumedReadCapacityUnits");
        assert_eq!(MetricKind::Write.metric_name(), "ConsumedWriteCapacityUnits");
    }

    #[test]
    fn test_capacity_selection() {
        let table = TableRecord {
            name: "Orders".to_string(),
            read_capacity: 100,
            write_capacity: 25,
        };
        assert_eq!(MetricKind::Read.capacity_of(&table), 100);
        assert_eq!(MetricKind::Write.capacity_of(&table), 25);
    }

    #[test]
    fn test_threshold_formula() {
        let table = TableRecord {
            name: "Orders".to_string(),
            read_capacity: 100,
            write_capacity: 25,
        };
        let alarm = DesiredAlarm::derive(&table, MetricKind::Read, &test_config());
        // 100 * 0.8 * 300
        assert_eq!(alarm.threshold, 24000.0);
    }

    #[test]
    fn test_zero_capacity_threshold() {
        let table = TableRecord {
            name: "Empty".to_string(),
            read_capacity: 0,
            write_capacity: 0,
        };
        let alarm = DesiredAlarm::derive(&table, MetricKind::Write, &test_config());
        assert_eq!(alarm.threshold, 0.0);
    }
}
