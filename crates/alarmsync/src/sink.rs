//! CloudWatch implementation of the alarm sink (Imperative Shell).

use alarmsync_core::{AlarmSink, DesiredAlarm, SinkError, DYNAMODB_NAMESPACE};
use async_trait::async_trait;
use aws_sdk_cloudwatch::types::{ComparisonOperator, Dimension, Statistic};
use aws_sdk_cloudwatch::Client;

/// Alarm sink backed by the CloudWatch API.
///
/// CloudWatch exposes a single upsert (`PutMetricAlarm`), so create and
/// update map onto the same call; the distinction only matters for the
/// report.
pub struct CloudWatchSink {
    client: Client,
}

impl CloudWatchSink {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn put_alarm(&self, alarm: &DesiredAlarm) -> Result<(), SinkError> {
        let dimension = Dimension::builder()
            .name("TableName")
            .value(&alarm.table_name)
            .build();

        self.client
            .put_metric_alarm()
            .alarm_name(&alarm.name)
            .namespace(DYNAMODB_NAMESPACE)
            .metric_name(alarm.metric.metric_name())
            .statistic(Statistic::Sum)
            .comparison_operator(ComparisonOperator::GreaterThanOrEqualToThreshold)
            .threshold(alarm.threshold)
            .period(alarm.period)
            .evaluation_periods(alarm.evaluation_periods)
            .alarm_actions(&alarm.sns_topic)
            .dimensions(dimension)
            .send()
            .await
            .map_err(|e| SinkError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl AlarmSink for CloudWatchSink {
    async fn create_alarm(&self, alarm: &DesiredAlarm) -> Result<(), SinkError> {
        tracing::debug!(alarm = %alarm.name, threshold = alarm.threshold, "Creating alarm");
        self.put_alarm(alarm).await
    }

    async fn update_alarm(&self, alarm: &DesiredAlarm) -> Result<(), SinkError> {
        tracing::debug!(alarm = %alarm.name, threshold = alarm.threshold, "Updating alarm");
        self.put_alarm(alarm).await
    }
}
