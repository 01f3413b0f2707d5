//! Managed-table inventory reader (Imperative Shell).
//!
//! Lists every table name the storage service knows, applies the prefix
//! filter, then describes each survivor for its provisioned throughput.
//! A failed describe aborts the whole read: a partial inventory would let
//! the planner silently skip alarms for tables it never saw.

use alarmsync_core::{filter_table_names, TableRecord};
use aws_sdk_dynamodb::Client;

use crate::error::{AlarmsyncError, Result};

/// Fetches the set of managed tables, optionally filtered by name prefix.
///
/// Sorted by name so downstream output is deterministic.
pub async fn list_managed_tables(
    client: &Client,
    prefix: Option<&str>,
) -> Result<Vec<TableRecord>> {
    let mut names = Vec::new();
    let mut start_name: Option<String> = None;

    // ListTables pages at 100 names; follow the evaluated-name token.
    loop {
        let page = client
            .list_tables()
            .set_exclusive_start_table_name(start_name.clone())
            .send()
            .await
            .map_err(|e| AlarmsyncError::AwsSdk(e.to_string()))?;

        names.extend(page.table_names().iter().cloned());

        match page.last_evaluated_table_name() {
            Some(token) => start_name = Some(token.to_string()),
            None => break,
        }
    }

    let mut retained = filter_table_names(names, prefix);
    retained.sort();
    tracing::debug!(tables = retained.len(), "Table names after prefix filter");

    let mut tables = Vec::with_capacity(retained.len());
    for name in retained {
        tables.push(describe_throughput(client, name).await?);
    }

    Ok(tables)
}

async fn describe_throughput(client: &Client, name: String) -> Result<TableRecord> {
    let response = client
        .describe_table()
        .table_name(&name)
        .send()
        .await
        .map_err(|e| AlarmsyncError::AwsSdk(e.to_string()))?;

    // On-demand tables report no provisioned throughput; there is nothing to
    // derive a threshold from, so the run aborts rather than guessing.
    let throughput = response
        .table()
        .and_then(|table| table.provisioned_throughput())
        .ok_or_else(|| AlarmsyncError::MissingThroughput {
            table_name: name.clone(),
        })?;

    let (read_capacity, write_capacity) = match (
        throughput.read_capacity_units(),
        throughput.write_capacity_units(),
    ) {
        (Some(read), Some(write)) => (read, write),
        _ => {
            return Err(AlarmsyncError::MissingThroughput { table_name: name });
        }
    };

    tracing::trace!(table = %name, read_capacity, write_capacity, "Described table");

    Ok(TableRecord {
        name,
        read_capacity,
        write_capacity,
    })
}
