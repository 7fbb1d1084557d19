//! # Domain Types
//!
//! Core domain types used throughout the rental fleet.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐   ┌─────────────────┐   ┌─────────────────┐  │
//! │  │       Vehicle        │   │      User       │   │  VehicleStatus  │  │
//! │  │  ──────────────────  │   │  ─────────────  │   │  ─────────────  │  │
//! │  │  id (M001)           │   │  id (U001)      │   │  Available      │  │
//! │  │  model, category     │   │  name, email    │   │  Rented         │  │
//! │  │  price_per_day_cents │   │  password_hash  │   └─────────────────┘  │
//! │  │  status              │   │  role           │                        │
//! │  │  current_rental_days │   └─────────────────┘   ┌─────────────────┐  │
//! │  │  total_rental_count  │                         │      Role       │  │
//! │  └──────────────────────┘                         │  Manager        │  │
//! │                                                   │  Customer       │  │
//! │  ┌──────────────────────┐                         └─────────────────┘  │
//! │  │     RentalState      │  (status, days, total) - the part of a       │
//! │  │                      │  vehicle that transitions and undo touch     │
//! │  └──────────────────────┘                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Unlike UUID-keyed entities, vehicles and users carry short sequential
//! business ids (`M001`, `U002`) that are also the primary key. See [`crate::ids`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Vehicle Status
// =============================================================================

/// Availability of a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    /// On the lot, can be rented.
    Available,
    /// Out with a customer.
    Rented,
}

impl VehicleStatus {
    /// Title-case label for tables and menus.
    pub fn label(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "Available",
            VehicleStatus::Rented => "Rented",
        }
    }
}

impl Default for VehicleStatus {
    fn default() -> Self {
        VehicleStatus::Available
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleStatus::Available => write!(f, "available"),
            VehicleStatus::Rented => write!(f, "rented"),
        }
    }
}

impl FromStr for VehicleStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "available" => Ok(VehicleStatus::Available),
            "rented" => Ok(VehicleStatus::Rented),
            _ => Err(ValidationError::NotAllowed {
                field: "status".to_string(),
                allowed: vec!["available".to_string(), "rented".to_string()],
            }),
        }
    }
}

// =============================================================================
// Rental State
// =============================================================================

/// The three fields a status transition changes.
///
/// Captured as a pre-image before every rent/return so the undo engine can
/// write it back verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalState {
    pub status: VehicleStatus,
    pub current_rental_days: i64,
    pub total_rental_count: i64,
}

// =============================================================================
// Vehicle
// =============================================================================

/// A rentable vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Vehicle {
    /// Sequential identifier (`M001`), immutable once assigned.
    pub id: String,

    /// Descriptive model name ("Toyota Avanza").
    pub model: String,

    /// Vehicle class ("MPV", "SUV"). Free text, see [`crate::catalog`].
    pub category: String,

    /// Daily rental price in minor units.
    pub price_per_day_cents: i64,

    /// Current availability.
    pub status: VehicleStatus,

    /// Length of the running rental; 0 whenever the vehicle is available.
    pub current_rental_days: i64,

    /// Number of rentals ever started on this vehicle.
    pub total_rental_count: i64,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    /// Returns the daily price as Money.
    #[inline]
    pub fn price_per_day(&self) -> Money {
        Money::from_cents(self.price_per_day_cents)
    }

    /// Returns the transition-relevant fields.
    pub fn rental_state(&self) -> RentalState {
        RentalState {
            status: self.status,
            current_rental_days: self.current_rental_days,
            total_rental_count: self.total_rental_count,
        }
    }

    /// Overwrites the transition-relevant fields.
    pub fn set_rental_state(&mut self, state: RentalState) {
        self.status = state.status;
        self.current_rental_days = state.current_rental_days;
        self.total_rental_count = state.total_rental_count;
    }

    /// Estimated cost of renting this vehicle for `days`.
    pub fn rental_quote(&self, days: i64) -> Money {
        self.price_per_day().multiply_days(days)
    }

    #[inline]
    pub fn is_available(&self) -> bool {
        self.status == VehicleStatus::Available
    }
}

// =============================================================================
// Vehicle Filter
// =============================================================================

/// Selection criteria for listing vehicles. Empty filter = whole fleet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehicleFilter {
    /// Exact status match.
    pub status: Option<VehicleStatus>,
    /// Exact category match.
    pub category: Option<String>,
    /// Case-insensitive substring of model or category.
    pub keyword: Option<String>,
}

impl VehicleFilter {
    pub fn all() -> Self {
        VehicleFilter::default()
    }

    pub fn with_status(status: VehicleStatus) -> Self {
        VehicleFilter {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn with_category(category: impl Into<String>) -> Self {
        VehicleFilter {
            category: Some(category.into()),
            ..Default::default()
        }
    }

    pub fn with_keyword(keyword: impl Into<String>) -> Self {
        VehicleFilter {
            keyword: Some(keyword.into()),
            ..Default::default()
        }
    }

    /// In-memory equivalent of the SQL filter, used by tests and by callers
    /// that already hold a snapshot.
    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        if let Some(status) = self.status {
            if vehicle.status != status {
                return false;
            }
        }
        if let Some(ref category) = self.category {
            if &vehicle.category != category {
                return false;
            }
        }
        if let Some(ref keyword) = self.keyword {
            let keyword = keyword.to_lowercase();
            if !vehicle.model.to_lowercase().contains(&keyword)
                && !vehicle.category.to_lowercase().contains(&keyword)
            {
                return false;
            }
        }
        true
    }
}

// =============================================================================
// Role
// =============================================================================

/// What a signed-in user may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Maintains the fleet, sees statistics, registers users.
    Manager,
    /// Browses, rents and returns vehicles.
    Customer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Manager => write!(f, "manager"),
            Role::Customer => write!(f, "customer"),
        }
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "manager" => Ok(Role::Manager),
            "customer" => Ok(Role::Customer),
            _ => Err(ValidationError::NotAllowed {
                field: "role".to_string(),
                allowed: vec!["manager".to_string(), "customer".to_string()],
            }),
        }
    }
}

// =============================================================================
// User
// =============================================================================

/// A registered account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    /// Sequential identifier (`U001`).
    pub id: String,
    pub name: String,
    /// Lower-cased, unique.
    pub email: String,
    /// Argon2 PHC string. Never serialized out.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================
