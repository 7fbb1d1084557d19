//! # Statistics Commands
//!
//! Fleet statistics for the manager screen, and the spreadsheet report.
//!
//! ## Report Layout
//! One folder per export, one CSV sheet per section:
//! ```text
//! rental_stats_20261017_142530/
//! ├── summary.csv        total_vehicles, available, rented, %, mean price
//! ├── by_category.csv    category, vehicles, mean_price_per_day
//! ├── top5.csv           id, model, total_rental_count
//! ├── long_rentals.csv   id, model, current_rental_days
//! └── full_data.csv      every vehicle, ordered by id
//! ```
//! Missing values ("no data") are empty cells.

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use fleet_core::stats::{FleetStats, RankedVehicle};
use fleet_core::{Vehicle, VehicleFilter};
use fleet_db::Database;

/// Sheet names, in the order they are written.
pub const REPORT_SHEETS: [&str; 5] = ["summary", "by_category", "top5", "long_rentals", "full_data"];

/// One consistent snapshot of the fleet and its statistics.
#[derive(Debug, Clone)]
pub struct StatsReport {
    pub generated_at: DateTime<Utc>,
    pub summary: FleetStats,
    pub fleet: Vec<Vehicle>,
}

/// Computes statistics over the whole fleet.
pub async fn fleet_statistics(db: &Database) -> AppResult<FleetStats> {
    debug!("fleet_statistics command");
    let vehicles = db.vehicles().list(&VehicleFilter::all()).await?;
    Ok(FleetStats::compute(&vehicles))
}

/// `rental_stats_<YYYYmmdd_HHMMSS>`
pub fn default_report_name(now: DateTime<Utc>) -> String {
    format!("rental_stats_{}", now.format("%Y%m%d_%H%M%S"))
}

/// Builds the report from one read of the fleet, so summary and dump agree.
pub async fn build_report(db: &Database) -> AppResult<StatsReport> {
    let fleet = db.vehicles().list(&VehicleFilter::all()).await?;
    Ok(StatsReport {
        generated_at: Utc::now(),
        summary: FleetStats::compute(&fleet),
        fleet,
    })
}

/// Writes the report sheets and returns the folder holding them.
///
/// An existing directory gets a new [`default_report_name`] folder inside
/// it; any other `target` becomes the report folder itself.
pub async fn export_report(db: &Database, target: &Path) -> AppResult<PathBuf> {
    let report = build_report(db).await?;

    let is_dir = tokio::fs::metadata(target)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false);
    let folder = if is_dir {
        target.join(default_report_name(report.generated_at))
    } else {
        target.to_path_buf()
    };
    tokio::fs::create_dir_all(&folder).await?;

    for (name, bytes) in render_sheets(&report)? {
        tokio::fs::write(folder.join(format!("{}.csv", name)), bytes).await?;
    }

    info!(folder = %folder.display(), vehicles = report.fleet.len(), "Statistics report exported");
    Ok(folder)
}

/// Encodes every sheet in [`REPORT_SHEETS`] order.
pub fn render_sheets(report: &StatsReport) -> AppResult<Vec<(&'static str, Vec<u8>)>> {
    let stats = &report.summary;

    let summary = sheet(
        &["total_vehicles", "available", "rented", "available_pct", "rented_pct", "mean_price_per_day"],
        [vec![
            stats.total.to_string(),
            stats.available.to_string(),
            stats.rented.to_string(),
            percent(stats.available_pct),
            percent(stats.rented_pct),
            stats.mean_price.map(|m| m.to_string()).unwrap_or_default(),
        ]],
    )?;

    let by_category = sheet(
        &["category", "vehicles", "mean_price_per_day"],
        stats
            .by_category
            .iter()
            .map(|c| vec![c.category.clone(), c.count.to_string(), c.mean_price.to_string()]),
    )?;

    let top5 = sheet(&["id", "model", "total_rental_count"], ranked_rows(&stats.top_rented))?;
    let long_rentals = sheet(&["id", "model", "current_rental_days"], ranked_rows(&stats.longest_rentals))?;

    let full_data = sheet(
        &[
            "id",
            "model",
            "category",
            "price_per_day",
            "status",
            "current_rental_days",
            "total_rental_count",
            "created_at",
        ],
        report.fleet.iter().map(|v| {
            vec![
                v.id.clone(),
                v.model.clone(),
                v.category.clone(),
                v.price_per_day().to_string(),
                v.status.to_string(),
                v.current_rental_days.to_string(),
                v.total_rental_count.to_string(),
                v.created_at.to_rfc3339(),
            ]
        }),
    )?;

    Ok(vec![
        ("summary", summary),
        ("by_category", by_category),
        ("top5", top5),
        ("long_rentals", long_rentals),
        ("full_data", full_data),
    ])
}

fn ranked_rows(ranked: &[RankedVehicle]) -> impl Iterator<Item = Vec<String>> + '_ {
    ranked
        .iter()
        .map(|r| vec![r.id.clone(), r.model.clone(), r.value.to_string()])
}

fn percent(value: Option<f64>) -> String {
    value.map(|p| format!("{:.2}", p)).unwrap_or_default()
}

/// One CSV document: header row, then `rows`.
fn sheet<I>(headers: &[&str], rows: I) -> AppResult<Vec<u8>>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let encode = |e: csv::Error| AppError::internal(format!("Failed to encode report: {}", e));

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(headers).map_err(encode)?;
    for row in rows {
        writer.write_record(&row).map_err(encode)?;
    }
    writer
        .into_inner()
        .map_err(|e| AppError::internal(format!("Failed to encode report: {}", e.error())))
}
