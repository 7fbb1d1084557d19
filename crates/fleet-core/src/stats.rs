//! # Fleet Statistics
//!
//! Aggregates over a snapshot of the fleet. Pure functions: the same slice in
//! gives the same [`FleetStats`] out, whatever order the slice is in.
//!
//! ## What Is Computed
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  FleetStats                                                             │
//! │  ├── total / available / rented          counts                         │
//! │  ├── available_pct / rented_pct          None on an empty fleet         │
//! │  ├── mean_price                          None on an empty fleet         │
//! │  ├── by_category[]                       sorted by category name        │
//! │  ├── rental_counts (mean, max, min)      of total_rental_count          │
//! │  ├── top_rented[..5]                     total_rental_count desc        │
//! │  ├── longest_rentals[..5]                Rented only, days desc         │
//! │  └── price_distribution                  count, mean, std, quartiles    │
//! │                                                                         │
//! │  Ranking ties are broken by id ascending (numeric: M002 < M010).        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! "No data" is always `None`, never zero and never an error.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ids::id_sort_key;
use crate::money::Money;
use crate::types::{Vehicle, VehicleStatus};
use crate::TOP_N;

// =============================================================================
// Result Types
// =============================================================================

/// Mean price and size of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub category: String,
    pub count: usize,
    pub mean_price: Money,
}

/// Summary of `total_rental_count` across the fleet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalCountStats {
    pub mean: f64,
    pub max: i64,
    pub min: i64,
}

/// One row of a top-N ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedVehicle {
    pub id: String,
    pub model: String,
    pub value: i64,
}

/// Distribution of daily prices, in major units.
///
/// Quartiles use linear interpolation between closest ranks. The standard
/// deviation is the sample one (n - 1) and is `None` for a single vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSummary {
    pub count: usize,
    pub mean: f64,
    pub std_dev: Option<f64>,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Everything the statistics screen and the report export show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetStats {
    pub total: usize,
    pub available: usize,
    pub rented: usize,
    pub available_pct: Option<f64>,
    pub rented_pct: Option<f64>,
    pub mean_price: Option<Money>,
    pub by_category: Vec<CategoryStats>,
    pub rental_counts: Option<RentalCountStats>,
    pub top_rented: Vec<RankedVehicle>,
    pub longest_rentals: Vec<RankedVehicle>,
    pub price_distribution: Option<PriceSummary>,
}

// =============================================================================
// Computation
// =============================================================================

impl FleetStats {
    pub fn compute(vehicles: &[Vehicle]) -> Self {
        let total = vehicles.len();
        let available = vehicles
            .iter()
            .filter(|v| v.status == VehicleStatus::Available)
            .count();
        let rented = total - available;

        let pct = |part: usize| (total > 0).then(|| part as f64 / total as f64 * 100.0);

        FleetStats {
            total,
            available,
            rented,
            available_pct: pct(available),
            rented_pct: pct(rented),
            mean_price: Money::mean(vehicles.iter().map(Vehicle::price_per_day)),
            by_category: by_category(vehicles),
            rental_counts: rental_counts(vehicles),
            top_rented: rank(vehicles.iter(), |v| v.total_rental_count),
            longest_rentals: rank(
                vehicles.iter().filter(|v| v.status == VehicleStatus::Rented),
                |v| v.current_rental_days,
            ),
            price_distribution: price_summary(vehicles),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

fn by_category(vehicles: &[Vehicle]) -> Vec<CategoryStats> {
    let mut groups: BTreeMap<&str, Vec<Money>> = BTreeMap::new();
    for v in vehicles {
        groups.entry(v.category.as_str()).or_default().push(v.price_per_day());
    }

    groups
        .into_iter()
        .filter_map(|(category, prices)| {
            let count = prices.len();
            Money::mean(prices).map(|mean_price| CategoryStats {
                category: category.to_string(),
                count,
                mean_price,
            })
        })
        .collect()
}

fn rental_counts(vehicles: &[Vehicle]) -> Option<RentalCountStats> {
    let counts = vehicles.iter().map(|v| v.total_rental_count);
    let max = counts.clone().max()?;
    let min = counts.clone().min()?;
    let sum: i64 = counts.sum();

    Some(RentalCountStats {
        mean: sum as f64 / vehicles.len() as f64,
        max,
        min,
    })
}

fn rank<'a, I, F>(vehicles: I, value: F) -> Vec<RankedVehicle>
where
    I: Iterator<Item = &'a Vehicle>,
    F: Fn(&Vehicle) -> i64,
{
    let mut ranked: Vec<&Vehicle> = vehicles.collect();
    ranked.sort_by(|a, b| {
        value(b)
            .cmp(&value(a))
            .then_with(|| id_sort_key(&a.id).cmp(&id_sort_key(&b.id)))
    });

    ranked
        .into_iter()
        .take(TOP_N)
        .map(|v| RankedVehicle {
            id: v.id.clone(),
            model: v.model.clone(),
            value: value(v),
        })
        .collect()
}

fn price_summary(vehicles: &[Vehicle]) -> Option<PriceSummary> {
    let mut prices: Vec<f64> = vehicles.iter().map(|v| v.price_per_day().as_major_f64()).collect();
    if prices.is_empty() {
        return None;
    }
    prices.sort_by(f64::total_cmp);

    let n = prices.len();
    let mean = prices.iter().sum::<f64>() / n as f64;
    let std_dev = (n > 1).then(|| {
        let variance = prices.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        variance.sqrt()
    });

    Some(PriceSummary {
        count: n,
        mean,
        std_dev,
        min: prices[0],
        q1: quantile(&prices, 0.25),
        median: quantile(&prices, 0.5),
        q3: quantile(&prices, 0.75),
        max: prices[n - 1],
    })
}

/// Linear-interpolated quantile of an ascending, non-empty slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn vehicle(id: &str, category: &str, price: i64, status: VehicleStatus, days: i64, total: i64) -> Vehicle {
        let now = Utc::now();
        Vehicle {
            id: id.to_string(),
            model: format!("Model {id}"),
            category: category.to_string(),
            price_per_day_cents: Money::from_major(price).cents(),
            status,
            current_rental_days: days,
            total_rental_count: total,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_empty_fleet_has_no_data() {
        let stats = FleetStats::compute(&[]);
        assert!(stats.is_empty());
        assert_eq!(stats.available, 0);
        assert_eq!(stats.rented, 0);
        assert_eq!(stats.available_pct, None);
        assert_eq!(stats.rented_pct, None);
        assert_eq!(stats.mean_price, None);
        assert!(stats.by_category.is_empty());
        assert_eq!(stats.rental_counts, None);
        assert!(stats.top_rented.is_empty());
        assert!(stats.longest_rentals.is_empty());
        assert_eq!(stats.price_distribution, None);
    }

    #[test]
    fn test_counts_and_percentages() {
        let fleet = vec![
            vehicle("M001", "SUV", 500_000, VehicleStatus::Rented, 3, 1),
            vehicle("M002", "MPV", 300_000, VehicleStatus::Available, 0, 0),
            vehicle("M003", "MPV", 400_000, VehicleStatus::Available, 0, 2),
            vehicle("M004", "Sedan", 600_000, VehicleStatus::Available, 0, 5),
        ];
        let stats = FleetStats::compute(&fleet);

        assert_eq!(stats.total, 4);
        assert_eq!(stats.available, 3);
        assert_eq!(stats.rented, 1);
        assert_eq!(stats.available_pct, Some(75.0));
        assert_eq!(stats.rented_pct, Some(25.0));
        assert_eq!(stats.mean_price, Some(Money::from_major(450_000)));

        let rc = stats.rental_counts.unwrap();
        assert_eq!(rc.mean, 2.0);
        assert_eq!(rc.max, 5);
        assert_eq!(rc.min, 0);
    }

    #[test]
    fn test_categories_sorted_by_name() {
        let fleet = vec![
            vehicle("M001", "SUV", 500_000, VehicleStatus::Available, 0, 0),
            vehicle("M002", "MPV", 300_000, VehicleStatus::Available, 0, 0),
            vehicle("M003", "MPV", 400_000, VehicleStatus::Available, 0, 0),
        ];
        let stats = FleetStats::compute(&fleet);

        let names: Vec<_> = stats.by_category.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["MPV", "SUV"]);
        assert_eq!(stats.by_category[0].count, 2);
        assert_eq!(stats.by_category[0].mean_price, Money::from_major(350_000));
    }

    #[test]
    fn test_ties_rank_by_id_ascending() {
        let fleet = vec![
            vehicle("M002", "SUV", 1, VehicleStatus::Available, 0, 5),
            vehicle("M001", "SUV", 1, VehicleStatus::Available, 0, 5),
        ];
        let stats = FleetStats::compute(&fleet);
        let ids: Vec<_> = stats.top_rented.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["M001", "M002"]);
    }

    #[test]
    fn test_tie_break_is_numeric_not_lexicographic() {
        let fleet = vec![
            vehicle("M1000", "SUV", 1, VehicleStatus::Available, 0, 1),
            vehicle("M999", "SUV", 1, VehicleStatus::Available, 0, 1),
        ];
        let stats = FleetStats::compute(&fleet);
        assert_eq!(stats.top_rented[0].id, "M999");
    }

    #[test]
    fn test_top_n_is_capped() {
        let fleet: Vec<_> = (1..=8)
            .map(|i| vehicle(&format!("M{i:03}"), "SUV", 1, VehicleStatus::Available, 0, i))
            .collect();
        let stats = FleetStats::compute(&fleet);
        assert_eq!(stats.top_rented.len(), TOP_N);
        assert_eq!(stats.top_rented[0].id, "M008");
        assert_eq!(stats.top_rented[0].value, 8);
    }

    #[test]
    fn test_longest_rentals_only_rented() {
        let fleet = vec![
            vehicle("M001", "SUV", 1, VehicleStatus::Rented, 2, 1),
            vehicle("M002", "SUV", 1, VehicleStatus::Available, 0, 9),
            vehicle("M003", "SUV", 1, VehicleStatus::Rented, 7, 1),
        ];
        let stats = FleetStats::compute(&fleet);
        let ids: Vec<_> = stats.longest_rentals.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["M003", "M001"]);
        assert_eq!(stats.longest_rentals[0].value, 7);
    }

    #[test]
    fn test_price_distribution() {
        let fleet: Vec<_> = [100, 200, 300, 400]
            .iter()
            .enumerate()
            .map(|(i, p)| vehicle(&format!("M{:03}", i + 1), "SUV", *p, VehicleStatus::Available, 0, 0))
            .collect();
        let d = FleetStats::compute(&fleet).price_distribution.unwrap();

        assert_eq!(d.count, 4);
        assert_eq!(d.mean, 250.0);
        assert_eq!(d.min, 100.0);
        assert_eq!(d.q1, 175.0);
        assert_eq!(d.median, 250.0);
        assert_eq!(d.q3, 325.0);
        assert_eq!(d.max, 400.0);
        let std = d.std_dev.unwrap();
        assert!((std - 129.0994).abs() < 1e-3);
    }

    #[test]
    fn test_single_vehicle_has_no_std_dev() {
        let fleet = vec![vehicle("M001", "SUV", 100, VehicleStatus::Available, 0, 0)];
        let d = FleetStats::compute(&fleet).price_distribution.unwrap();
        assert_eq!(d.std_dev, None);
        assert_eq!(d.median, 100.0);
    }
}
