//! # Rental Commands
//!
//! Quote, rent and return.
//!
//! ## Rental Flow
//! ```text
//! ┌──────────────┐  quote_rental   ┌──────────────┐  start_rental  ┌──────────────┐
//! │  Available   │ ──────────────► │  y/n prompt  │ ─────────────► │    Rented    │
//! │  days 0      │   (no write)    │              │                │  days N      │
//! │  total T     │                 └──────────────┘                │  total T+1   │
//! └──────────────┘                                                 └──────┬───────┘
//!        ▲                            end_rental                          │
//!        └────────────────────────────────────────────────────────────────┘
//!                                 days 0, total unchanged
//! ```

use tracing::{debug, info};

use crate::error::AppResult;
use crate::state::Session;
use fleet_core::fleet::{plan_end_rental, plan_start_rental};
use fleet_core::validation::normalize_vehicle_id;
use fleet_core::{CoreError, Money, Vehicle};
use fleet_db::Database;

/// Price of a prospective rental, shown before the customer confirms.
#[derive(Debug, Clone)]
pub struct RentalQuote {
    pub vehicle: Vehicle,
    pub days: i64,
    pub total: Money,
}

/// Result of a return request.
#[derive(Debug, Clone)]
pub enum ReturnOutcome {
    /// The vehicle went back to Available.
    Returned(Vehicle),

    /// The vehicle was not out on a rental; nothing was written.
    AlreadyAvailable(Vehicle),
}

async fn fetch(db: &Database, id: &str) -> AppResult<Vehicle> {
    db.vehicles()
        .get_by_id(id)
        .await?
        .ok_or_else(|| CoreError::VehicleNotFound(id.to_string()).into())
}

/// Checks that `id` can be rented for `days` and prices it. Writes nothing.
pub async fn quote_rental(db: &Database, id: &str, days: i64) -> AppResult<RentalQuote> {
    let id = normalize_vehicle_id(id);
    debug!(id = %id, days, "quote_rental command");

    let vehicle = fetch(db, &id).await?;
    plan_start_rental(&vehicle, days)?;

    let total = vehicle.rental_quote(days);
    Ok(RentalQuote { vehicle, days, total })
}

/// Rents a vehicle for `days`.
///
/// ## Errors
/// - `NotFound` - unknown id
/// - `Conflict` - already rented (checked before `days`)
/// - `Validation` - `days <= 0`
pub async fn start_rental(db: &Database, session: &mut Session, id: &str, days: i64) -> AppResult<Vehicle> {
    let id = normalize_vehicle_id(id);
    debug!(id = %id, days, "start_rental command");

    let mut vehicle = fetch(db, &id).await?;
    let transition = plan_start_rental(&vehicle, days)?;

    db.vehicles()
        .update_rental_state(&id, transition.expected_status(), &transition.next)
        .await?;

    session.undo.record(transition.undo_descriptor());
    transition.apply_to(&mut vehicle);

    info!(
        id = %vehicle.id,
        days = vehicle.current_rental_days,
        total_rentals = vehicle.total_rental_count,
        user = %session.user().email,
        "Rental started"
    );

    Ok(vehicle)
}

/// Returns a rented vehicle.
///
/// An available vehicle is reported as [`ReturnOutcome::AlreadyAvailable`]
/// and leaves the undo slot as it was.
pub async fn end_rental(db: &Database, session: &mut Session, id: &str) -> AppResult<ReturnOutcome> {
    let id = normalize_vehicle_id(id);
    debug!(id = %id, "end_rental command");

    let mut vehicle = fetch(db, &id).await?;
    let Some(transition) = plan_end_rental(&vehicle) else {
        return Ok(ReturnOutcome::AlreadyAvailable(vehicle));
    };

    db.vehicles()
        .update_rental_state(&id, transition.expected_status(), &transition.next)
        .await?;

    session.undo.record(transition.undo_descriptor());
    transition.apply_to(&mut vehicle);

    info!(
        id = %vehicle.id,
        total_rentals = vehicle.total_rental_count,
        user = %session.user().email,
        "Rental ended"
    );

    Ok(ReturnOutcome::Returned(vehicle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::vehicle::add_vehicle;
    use crate::error::ErrorCode;
    use chrono::Utc;
    use fleet_core::fleet::NewVehicle;
    use fleet_core::{Role, UndoDescriptor, User, VehicleStatus};
    use fleet_db::DbConfig;

    fn session() -> Session {
        Session::new(User {
            id: "U002".to_string(),
            name: "Customer".to_string(),
            email: "customer@rental.com".to_string(),
            password_hash: String::new(),
            role: Role::Customer,
            created_at: Utc::now(),
        })
    }

    async fn fleet_of_one() -> (Database, Session) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut session = session();
        add_vehicle(&db, &mut session, &NewVehicle::new("Toyota Avanza", "MPV", Money::from_major(350_000)))
            .await
            .unwrap();
        session.undo.clear();
        (db, session)
    }

    #[tokio::test]
    async fn test_quote_does_not_write() {
        let (db, session) = fleet_of_one().await;

        let quote = quote_rental(&db, "m001", 3).await.unwrap();
        assert_eq!(quote.total, Money::from_major(1_050_000));
        assert_eq!(quote.vehicle.id, "M001");

        let stored = db.vehicles().get_by_id("M001").await.unwrap().unwrap();
        assert_eq!(stored.status, VehicleStatus::Available);
        assert!(session.undo.is_empty());
    }

    #[tokio::test]
    async fn test_start_rental_records_pre_image() {
        let (db, mut session) = fleet_of_one().await;

        let rented = start_rental(&db, &mut session, "M001", 3).await.unwrap();
        assert_eq!(rented.status, VehicleStatus::Rented);
        assert_eq!(rented.current_rental_days, 3);
        assert_eq!(rented.total_rental_count, 1);

        let pending = session.undo.pending().unwrap();
        assert!(matches!(
            pending,
            UndoDescriptor::StatusChange { id, prev_status: VehicleStatus::Available, prev_days: 0, prev_total: 0 }
                if id == "M001"
        ));
    }

    #[tokio::test]
    async fn test_rent_twice_is_conflict_whatever_the_days() {
        let (db, mut session) = fleet_of_one().await;
        start_rental(&db, &mut session, "M001", 2).await.unwrap();
        let before = session.undo.pending().cloned();

        let err = start_rental(&db, &mut session, "M001", 0).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(session.undo.pending().cloned(), before);

        let stored = db.vehicles().get_by_id("M001").await.unwrap().unwrap();
        assert_eq!(stored.current_rental_days, 2);
        assert_eq!(stored.total_rental_count, 1);
    }

    #[tokio::test]
    async fn test_non_positive_days_rejected() {
        let (db, mut session) = fleet_of_one().await;
        let err = start_rental(&db, &mut session, "M001", 0).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Validation);
        assert!(session.undo.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_vehicle() {
        let (db, mut session) = fleet_of_one().await;
        let err = start_rental(&db, &mut session, "M404", -1).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = end_rental(&db, &mut session, "M404").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_return_available_is_noop() {
        let (db, mut session) = fleet_of_one().await;

        let outcome = end_rental(&db, &mut session, "M001").await.unwrap();
        assert!(matches!(outcome, ReturnOutcome::AlreadyAvailable(ref v) if v.id == "M001"));
        assert!(session.undo.is_empty());
    }

    #[tokio::test]
    async fn test_return_keeps_total() {
        let (db, mut session) = fleet_of_one().await;
        start_rental(&db, &mut session, "M001", 4).await.unwrap();

        let ReturnOutcome::Returned(vehicle) = end_rental(&db, &mut session, "M001").await.unwrap() else {
            panic!("expected a return");
        };
        assert_eq!(vehicle.status, VehicleStatus::Available);
        assert_eq!(vehicle.current_rental_days, 0);
        assert_eq!(vehicle.total_rental_count, 1);
    }
}
