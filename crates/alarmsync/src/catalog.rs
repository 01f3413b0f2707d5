//! Existing-alarm catalog reader (Imperative Shell).
//!
//! Follows the `DescribeAlarms` continuation token sequentially, accumulating
//! every alarm record before handing the full set to the core's indexer. A
//! broken pagination sequence is fatal for the run.

use std::collections::HashMap;

use alarmsync_core::{index_namespace_alarms, AlarmRecord};
use aws_sdk_cloudwatch::Client;

use crate::error::{AlarmsyncError, Result};

/// Fetches all alarms in the given namespace as a name -> threshold map.
pub async fn list_namespace_alarms(
    client: &Client,
    namespace: &str,
) -> Result<HashMap<String, f64>> {
    let mut records = Vec::new();
    let mut next_token: Option<String> = None;
    let mut pages = 0u32;

    loop {
        let page = client
            .describe_alarms()
            .set_next_token(next_token.clone())
            .send()
            .await
            .map_err(|e| AlarmsyncError::AwsSdk(e.to_string()))?;
        pages += 1;

        for alarm in page.metric_alarms() {
            records.push(AlarmRecord {
                name: alarm.alarm_name().unwrap_or_default().to_string(),
                namespace: alarm.namespace().unwrap_or_default().to_string(),
                threshold: alarm.threshold().unwrap_or_default(),
            });
        }

        match page.next_token() {
            Some(token) => next_token = Some(token.to_string()),
            None => break,
        }
    }

    tracing::debug!(alarms = records.len(), pages, "Collected alarm catalog");

    Ok(index_namespace_alarms(&records, namespace)?)
}
