//! alarmsync - reconcile CloudWatch capacity alarms for DynamoDB tables.
//!
//! For every managed table, derives the read/write consumption alarms that
//! should exist from the table's provisioned throughput, diffs them against
//! the alarms already in the `AWS/DynamoDB` namespace, and creates or updates
//! whatever is missing or stale. Safe to run from cron: a steady-state run
//! makes no mutations.

mod catalog;
mod client;
mod error;
mod inventory;
mod prelude;
mod sink;

use alarmsync_core::{apply_plan, format_plan, reconcile, ApplyOutcome, SyncConfig, DYNAMODB_NAMESPACE};
use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::prelude::*;

/// Reconcile CloudWatch capacity alarms for DynamoDB tables
#[derive(Parser, Debug)]
#[command(name = "alarmsync")]
#[command(version, about, long_about = "Reconcile CloudWatch capacity alarms for DynamoDB tables.

Each managed table gets one ConsumedReadCapacityUnits and one
ConsumedWriteCapacityUnits alarm, with the threshold derived from the table's
provisioned throughput (ratio x capacity x period). Existing alarms whose
threshold no longer matches are updated in place; alarms are never deleted.

Environment variables:
  AWS_ENDPOINT_URL    - Use a local stack endpoint
  AWS_PROFILE         - AWS profile to use for credentials")]
struct Cli {
    /// SNS topic ARN notified when an alarm fires
    #[arg(long, short = 's', value_name = "ARN")]
    sns_topic: String,

    /// Only manage tables whose name starts with this prefix
    #[arg(long, short = 'p', value_name = "STR")]
    prefix: Option<String>,

    /// Alarm threshold as a percent of provisioned capacity (10-95)
    #[arg(long, short = 'r', default_value = "80", value_name = "N")]
    ratio: u32,

    /// Alarm period in seconds (>= 60)
    #[arg(long, short = 'a', default_value = "300", value_name = "SEC")]
    period: i32,

    /// Consecutive evaluation periods before the alarm fires (>= 1)
    #[arg(long, short = 'e', default_value = "12", value_name = "N")]
    evaluation_periods: i32,

    /// AWS region to connect to
    #[arg(long, short = 'R', default_value = "us-east-1", env = "AWS_REGION")]
    region: String,

    /// Show planned changes without calling AWS
    #[arg(long, short = 'd')]
    dry_run: bool,

    /// Silence the command output
    #[arg(long)]
    silent: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "alarmsync=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Bounds are checked before any AWS client exists.
    let config = SyncConfig::new(
        cli.ratio,
        cli.period,
        cli.evaluation_periods,
        cli.sns_topic,
        cli.prefix,
    )?;

    let aws_config = client::AwsConfig::new(cli.region);

    if !cli.silent {
        aprintln!("{} {}", p_b("Target:"), aws_config.target_display());
        aprintln!();
    }

    let (dynamo_client, cloudwatch_client) = client::create_clients(&aws_config).await;

    let tables = inventory::list_managed_tables(&dynamo_client, config.prefix.as_deref()).await?;
    tracing::info!(tables = tables.len(), "Fetched table inventory");

    let existing = catalog::list_namespace_alarms(&cloudwatch_client, DYNAMODB_NAMESPACE).await?;
    tracing::info!(alarms = existing.len(), "Indexed existing alarms");

    let plan = reconcile(&tables, &existing, &config);

    if !cli.silent {
        aprintln!("{}", p_c("Plan:"));
        for line in format_plan(&plan) {
            if line.starts_with('+') {
                aprintln!("  {}", p_g(&line));
            } else if line.starts_with('~') {
                aprintln!("  {}", p_y(&line));
            } else {
                aprintln!("  {}", line);
            }
        }
        aprintln!();
    }

    if plan.is_noop() {
        if !cli.silent {
            aprintln!("{}", p_g("Alarms are up to date."));
        }
        return Ok(());
    }

    let sink = sink::CloudWatchSink::new(cloudwatch_client);
    let report = apply_plan(&sink, &plan, cli.dry_run).await;

    if !cli.silent {
        for action in &report.actions {
            let line = action.describe();
            match &action.outcome {
                ApplyOutcome::Failed { .. } => aprintln!("{}", p_r(&line)),
                ApplyOutcome::Updated | ApplyOutcome::WouldUpdate => aprintln!("{}", p_y(&line)),
                _ => aprintln!("{}", p_g(&line)),
            }
        }
    }

    let failed = report.failures().count();
    if failed > 0 {
        anyhow::bail!("{failed} alarm(s) failed to apply");
    }

    Ok(())
}
