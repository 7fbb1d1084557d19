//! # Rendering
//!
//! Turns vehicles and statistics into terminal text. Nothing here reads the
//! database or changes state.
//!
//! ```text
//! +------+---------------+----------+---------------+-----------+------+---------+
//! | ID   | Model         | Category |     Price/day | Status    | Days | Rentals |
//! +======+===============+==========+===============+===========+======+=========+
//! | M001 | Toyota Avanza | MPV      | Rp 350,000.00 | Available |    0 |       2 |
//! +------+---------------+----------+---------------+-----------+------+---------+
//! ```

use fleet_core::stats::{FleetStats, RankedVehicle};
use fleet_core::{Money, Vehicle};

// =============================================================================
// Currency
// =============================================================================

/// Formats amounts with a symbol and thousands separators (`Rp 500,000.00`).
#[derive(Debug, Clone)]
pub struct Currency {
    symbol: String,
}

impl Currency {
    pub fn new(symbol: impl Into<String>) -> Self {
        Currency { symbol: symbol.into() }
    }

    pub fn format(&self, amount: Money) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        format!(
            "{}{} {}.{:02}",
            sign,
            self.symbol,
            group_thousands(amount.major().unsigned_abs()),
            amount.minor_part()
        )
    }

    /// Statistics carry prices as major-unit floats; rounds to the cent.
    pub fn format_major(&self, amount: f64) -> String {
        self.format(Money::from_cents((amount * 100.0).round() as i64))
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

// =============================================================================
// Table
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Grid table with a header row.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<(String, Align)>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[(&str, Align)]) -> Self {
        Table {
            headers: headers.iter().map(|(h, a)| (h.to_string(), *a)).collect(),
            rows: Vec::new(),
        }
    }

    /// Adds a row; missing cells render empty, extra cells are dropped.
    pub fn row(&mut self, cells: Vec<String>) -> &mut Self {
        self.rows.push(cells);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, (h, _))| {
                self.rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .map(|c| c.chars().count())
                    .chain(std::iter::once(h.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let rule = |fill: char| {
            let mut line = String::from("+");
            for w in &widths {
                line.extend(std::iter::repeat(fill).take(w + 2));
                line.push('+');
            }
            line
        };
        let line = |cells: &mut dyn Iterator<Item = &str>| {
            let mut out = String::from("|");
            for (i, (_, align)) in self.headers.iter().enumerate() {
                let cell = cells.next().unwrap_or("");
                let pad = widths[i] - cell.chars().count();
                let padded = match align {
                    Align::Left => format!(" {}{} ", cell, " ".repeat(pad)),
                    Align::Right => format!(" {}{} ", " ".repeat(pad), cell),
                };
                out.push_str(&padded);
                out.push('|');
            }
            out
        };

        let mut out = vec![rule('-')];
        out.push(line(&mut self.headers.iter().map(|(h, _)| h.as_str())));
        out.push(rule('='));
        for row in &self.rows {
            out.push(line(&mut row.iter().map(String::as_str)));
            out.push(rule('-'));
        }
        out.join("\n")
    }
}

// =============================================================================
// Vehicles
// =============================================================================

pub fn render_vehicles(vehicles: &[Vehicle], currency: &Currency) -> String {
    if vehicles.is_empty() {
        return "No vehicles found.".to_string();
    }

    let mut table = Table::new(&[
        ("ID", Align::Left),
        ("Model", Align::Left),
        ("Category", Align::Left),
        ("Price/day", Align::Right),
        ("Status", Align::Left),
        ("Days", Align::Right),
        ("Rentals", Align::Right),
    ]);
    for v in vehicles {
        table.row(vec![
            v.id.clone(),
            v.model.clone(),
            v.category.clone(),
            currency.format(v.price_per_day()),
            v.status.label().to_string(),
            v.current_rental_days.to_string(),
            v.total_rental_count.to_string(),
        ]);
    }
    table.render()
}

// =============================================================================
// Statistics
// =============================================================================

const NO_DATA: &str = "no data";

fn pct(value: Option<f64>) -> String {
    value.map_or_else(|| NO_DATA.to_string(), |p| format!("{:.1}%", p))
}

fn ranking(title: &str, unit: &str, rows: &[RankedVehicle]) -> String {
    let mut table = Table::new(&[("#", Align::Right), ("ID", Align::Left), ("Model", Align::Left), (unit, Align::Right)]);
    for (i, r) in rows.iter().enumerate() {
        table.row(vec![(i + 1).to_string(), r.id.clone(), r.model.clone(), r.value.to_string()]);
    }
    if table.is_empty() {
        format!("{}: {}", title, NO_DATA)
    } else {
        format!("{}:\n{}", title, table.render())
    }
}

pub fn render_stats(stats: &FleetStats, currency: &Currency) -> String {
    let mut sections = Vec::new();

    sections.push(format!(
        "Total vehicles: {}\nAvailable: {} ({})\nRented: {} ({})\nMean price/day: {}",
        stats.total,
        stats.available,
        pct(stats.available_pct),
        stats.rented,
        pct(stats.rented_pct),
        stats.mean_price.map_or_else(|| NO_DATA.to_string(), |m| currency.format(m)),
    ));

    if stats.by_category.is_empty() {
        sections.push(format!("By category: {}", NO_DATA));
    } else {
        let mut table = Table::new(&[
            ("Category", Align::Left),
            ("Units", Align::Right),
            ("Mean price/day", Align::Right),
        ]);
        for c in &stats.by_category {
            table.row(vec![c.category.clone(), c.count.to_string(), currency.format(c.mean_price)]);
        }
        sections.push(format!("By category:\n{}", table.render()));
    }

    sections.push(match &stats.rental_counts {
        Some(r) => format!(
            "Rentals per vehicle: mean {:.2}, max {}, min {}",
            r.mean, r.max, r.min
        ),
        None => format!("Rentals per vehicle: {}", NO_DATA),
    });

    sections.push(ranking("Most rented", "Rentals", &stats.top_rented));
    sections.push(ranking("Longest running rentals", "Days", &stats.longest_rentals));

    sections.push(match &stats.price_distribution {
        Some(p) => format!(
            "Price distribution ({} vehicles):\n  mean {}  std dev {}\n  min {}  Q1 {}  median {}  Q3 {}  max {}",
            p.count,
            currency.format_major(p.mean),
            p.std_dev.map_or_else(|| NO_DATA.to_string(), |s| currency.format_major(s)),
            currency.format_major(p.min),
            currency.format_major(p.q1),
            currency.format_major(p.median),
            currency.format_major(p.q3),
            currency.format_major(p.max),
        ),
        None => format!("Price distribution: {}", NO_DATA),
    });

    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use fleet_core::VehicleStatus;

    fn vehicle(id: &str, price: i64, status: VehicleStatus, days: i64, total: i64) -> Vehicle {
        let now = Utc::now();
        Vehicle {
            id: id.to_string(),
            model: "Toyota Avanza".to_string(),
            category: "MPV".to_string(),
            price_per_day_cents: price * 100,
            status,
            current_rental_days: days,
            total_rental_count: total,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_currency_format() {
        let rp = Currency::new("Rp");
        assert_eq!(rp.format(Money::from_major(500_000)), "Rp 500,000.00");
        assert_eq!(rp.format(Money::from_cents(99)), "Rp 0.99");
        assert_eq!(rp.format(Money::from_major(1_234_567)), "Rp 1,234,567.00");
        assert_eq!(rp.format(Money::from_cents(-150)), "-Rp 1.50");
        assert_eq!(rp.format_major(350_000.256), "Rp 350,000.26");
    }

    #[test]
    fn test_table_alignment() {
        let mut table = Table::new(&[("ID", Align::Left), ("N", Align::Right)]);
        table.row(vec!["M001".into(), "7".into()]);
        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "+------+---+");
        assert_eq!(lines[1], "| ID   | N |");
        assert_eq!(lines[2], "+======+===+");
        assert_eq!(lines[3], "| M001 | 7 |");
    }

    #[test]
    fn test_render_vehicles() {
        let rp = Currency::new("Rp");
        assert_eq!(render_vehicles(&[], &rp), "No vehicles found.");

        let text = render_vehicles(&[vehicle("M001", 350_000, VehicleStatus::Rented, 3, 1)], &rp);
        assert!(text.contains("| M001 |"));
        assert!(text.contains("Rp 350,000.00"));
        assert!(text.contains("| Rented "));
    }

    #[test]
    fn test_render_empty_stats() {
        let text = render_stats(&FleetStats::compute(&[]), &Currency::new("Rp"));
        assert!(text.contains("Total vehicles: 0"));
        assert!(text.contains("Available: 0 (no data)"));
        assert!(text.contains("Most rented: no data"));
        assert!(text.contains("Price distribution: no data"));
    }

    #[test]
    fn test_render_stats() {
        let fleet = [
            vehicle("M001", 300_000, VehicleStatus::Available, 0, 5),
            vehicle("M002", 500_000, VehicleStatus::Rented, 2, 5),
        ];
        let text = render_stats(&FleetStats::compute(&fleet), &Currency::new("Rp"));
        assert!(text.contains("Available: 1 (50.0%)"));
        assert!(text.contains("Mean price/day: Rp 400,000.00"));
        assert!(text.contains("Longest running rentals:"));
    }
}
