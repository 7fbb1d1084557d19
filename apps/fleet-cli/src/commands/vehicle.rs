//! # Vehicle Commands
//!
//! Listing, filtering and adding vehicles.

use chrono::Utc;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::state::Session;
use fleet_core::fleet::{build_vehicle, NewVehicle};
use fleet_core::ids::{next_id, Namespace};
use fleet_core::validation::normalize_vehicle_id;
use fleet_core::{UndoDescriptor, Vehicle, VehicleFilter};
use fleet_db::Database;

/// Lists vehicles matching `filter`, ordered by id.
pub async fn list_vehicles(db: &Database, filter: &VehicleFilter) -> AppResult<Vec<Vehicle>> {
    debug!(?filter, "list_vehicles command");
    Ok(db.vehicles().list(filter).await?)
}

/// Distinct categories currently in the fleet.
pub async fn list_categories(db: &Database) -> AppResult<Vec<String>> {
    Ok(db.vehicles().categories().await?)
}

/// Fetches one vehicle; the id is normalized (`m001` → `M001`).
pub async fn get_vehicle(db: &Database, id: &str) -> AppResult<Vehicle> {
    let id = normalize_vehicle_id(id);
    db.vehicles()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Vehicle", &id))
}

/// The id the next added vehicle will receive.
///
/// Shown to the manager before confirming. Only valid while nobody else
/// writes to the same database.
pub async fn next_vehicle_id(db: &Database) -> AppResult<String> {
    let last = db.vehicles().last_id().await?;
    Ok(next_id(Namespace::Vehicle, last.as_deref()))
}

/// Adds a vehicle: Available, no rental days, no rentals.
///
/// ## Errors
/// - `Validation` - negative price, blank model or category
/// - `DuplicateKey` - another writer took the allocated id
///
/// On success the session can undo the addition.
pub async fn add_vehicle(db: &Database, session: &mut Session, draft: &NewVehicle) -> AppResult<Vehicle> {
    let id = next_vehicle_id(db).await?;
    let vehicle = build_vehicle(id, draft, Utc::now())?;

    db.vehicles().insert(&vehicle).await?;

    session.undo.record(UndoDescriptor::insert_vehicle(&vehicle.id));

    info!(
        id = %vehicle.id,
        model = %vehicle.model,
        category = %vehicle.category,
        price_per_day = %vehicle.price_per_day(),
        "Vehicle added"
    );

    Ok(vehicle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use chrono::Utc;
    use fleet_core::{Money, Role, User, VehicleStatus};
    use fleet_db::DbConfig;

    fn manager() -> Session {
        Session::new(User {
            id: "U001".to_string(),
            name: "Admin Manager".to_string(),
            email: "admin@rental.com".to_string(),
            password_hash: String::new(),
            role: Role::Manager,
            created_at: Utc::now(),
        })
    }

    #[tokio::test]
    async fn test_add_vehicle_assigns_sequential_ids() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut session = manager();

        assert_eq!(next_vehicle_id(&db).await.unwrap(), "M001");

        let first = add_vehicle(&db, &mut session, &NewVehicle::new("Model X", "SUV", Money::from_major(500_000)))
            .await
            .unwrap();
        let second = add_vehicle(&db, &mut session, &NewVehicle::new("Honda Brio", "Hatchback", Money::zero()))
            .await
            .unwrap();

        assert_eq!(first.id, "M001");
        assert_eq!(first.status, VehicleStatus::Available);
        assert_eq!(second.id, "M002");
        assert_eq!(
            session.undo.pending(),
            Some(&UndoDescriptor::insert_vehicle("M002"))
        );
    }

    #[tokio::test]
    async fn test_invalid_vehicle_writes_nothing() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut session = manager();

        let err = add_vehicle(&db, &mut session, &NewVehicle::new("Model X", "   ", Money::from_major(1)))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Validation);

        let err = add_vehicle(&db, &mut session, &NewVehicle::new("Model X", "SUV", Money::from_cents(-100)))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Validation);

        assert!(session.undo.is_empty());
        assert!(list_vehicles(&db, &VehicleFilter::all()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_vehicle_normalizes_id() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut session = manager();
        add_vehicle(&db, &mut session, &NewVehicle::new("Model X", "SUV", Money::from_major(1)))
            .await
            .unwrap();

        assert_eq!(get_vehicle(&db, " m001 ").await.unwrap().id, "M001");
        let err = get_vehicle(&db, "M404").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Vehicle not found: M404");
    }
}
