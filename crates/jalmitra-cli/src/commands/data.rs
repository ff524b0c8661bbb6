use super::Output;
use anyhow::Result;
use clap::{Args, ValueEnum};
use jalmitra_application::{AppContext, SensorSnapshot};
use jalmitra_core::sensor::{Alert, AlertFilter, ManualReading};
use serde_json::json;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FilterArg {
    All,
    Active,
    Resolved,
}

impl From<FilterArg> for AlertFilter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => AlertFilter::All,
            FilterArg::Active => AlertFilter::Active,
            FilterArg::Resolved => AlertFilter::Resolved,
        }
    }
}

#[derive(Args)]
pub struct SubmitArgs {
    /// Water level, 0-100 %
    #[arg(long)]
    pub level: Option<f64>,
    /// Total dissolved solids, ppm
    #[arg(long)]
    pub tds: Option<f64>,
    /// Water temperature, °C
    #[arg(long)]
    pub temperature: Option<f64>,
    #[arg(long)]
    pub ph: Option<f64>,
}

impl From<SubmitArgs> for ManualReading {
    fn from(args: SubmitArgs) -> Self {
        ManualReading {
            level_percent: args.level,
            total_dissolved_solids_ppm: args.tds,
            temperature_celsius: args.temperature,
            ph: args.ph,
        }
    }
}

pub async fn refresh(context: &AppContext, output: &Output) -> Result<()> {
    let outcome = context.refresh().await?;
    tracing::debug!(?outcome, "refresh finished");
    print_snapshot(output, &context.sensor().snapshot())
}

pub fn alerts(context: &AppContext, output: &Output, filter: FilterArg) -> Result<()> {
    let snapshot = context.sensor().snapshot();
    let alerts: Vec<&Alert> = snapshot.alerts_filtered(filter.into()).collect();

    output.emit(&alerts, || {
        if alerts.is_empty() {
            println!("No alerts");
        }
        for alert in &alerts {
            print_alert(alert);
        }
    })
}

/// Resolution is local to the current run.
pub fn resolve(context: &AppContext, output: &Output, alert_id: &str) -> Result<()> {
    let changed = context.resolve_alert(alert_id);
    let snapshot = context.sensor().snapshot();
    let alert = snapshot.alert(alert_id);

    output.emit(&json!({ "changed": changed, "alert": alert }), || match alert {
        Some(alert) if changed => println!("Resolved {}", alert.id),
        Some(alert) => println!("{} was already resolved", alert.id),
        None => println!("No alert with id {alert_id}"),
    })
}

pub async fn submit(context: &AppContext, output: &Output, args: SubmitArgs) -> Result<()> {
    context.submit_manual_reading(args.into()).await?;
    print_snapshot(output, &context.sensor().snapshot())
}

fn print_snapshot(output: &Output, snapshot: &SensorSnapshot) -> Result<()> {
    output.emit(snapshot, || {
        println!("Well {}", snapshot.well_id);
        if let Some(reading) = &snapshot.reading {
            println!("  level        {:.0}% ({})", reading.level_percent, reading.level_status);
            println!("  TDS          {:.0} ppm", reading.total_dissolved_solids_ppm);
            println!("  pH           {:.1}", reading.ph);
            println!("  temperature  {:.0}°C", reading.temperature_celsius);
            println!("  synced       {}", reading.last_sync_timestamp.to_rfc3339());
        }
        if let Some(usage) = &snapshot.usage {
            let marker = if usage.over_limit() { " (over limit)" } else { "" };
            println!(
                "  usage        {:.0} / {:.0} L{marker}",
                usage.today_usage_liters, usage.today_limit_liters
            );
        }
        println!("  alerts       {} unresolved", snapshot.unresolved_count());
    })
}

fn print_alert(alert: &Alert) {
    let state = if alert.resolved { "resolved" } else { "active" };
    println!(
        "{:<4} {:<11} {:<8} {}  {}",
        alert.id,
        alert.alert_type,
        state,
        alert.timestamp.format("%Y-%m-%d %H:%M"),
        alert.message
    );
}
