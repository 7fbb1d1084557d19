//! End-to-end rental scenarios through the session commands, against an
//! in-memory database.

use chrono::Utc;

use fleet_cli::commands::rental::{end_rental, start_rental, ReturnOutcome};
use fleet_cli::commands::stats::{export_report, fleet_statistics};
use fleet_cli::commands::undo::{undo_last, UndoOutcome};
use fleet_cli::commands::vehicle::{add_vehicle, list_vehicles};
use fleet_cli::error::ErrorCode;
use fleet_cli::state::Session;
use fleet_core::fleet::{is_consistent, NewVehicle};
use fleet_core::{Money, RentalState, Role, User, VehicleFilter, VehicleStatus};
use fleet_db::{Database, DbConfig};

fn session(role: Role) -> Session {
    Session::new(User {
        id: "U001".to_string(),
        name: "Tester".to_string(),
        email: "tester@rental.com".to_string(),
        password_hash: String::new(),
        role,
        created_at: Utc::now(),
    })
}

async fn empty_fleet() -> Database {
    Database::new(DbConfig::in_memory()).await.unwrap()
}

async fn assert_fleet_consistent(db: &Database) {
    for v in list_vehicles(db, &VehicleFilter::all()).await.unwrap() {
        assert!(is_consistent(&v), "inconsistent vehicle {:?}", v);
    }
}

#[tokio::test]
async fn test_create_rent_undo_scenario() {
    let db = empty_fleet().await;
    let mut session = session(Role::Manager);

    let vehicle = add_vehicle(&db, &mut session, &NewVehicle::new("Model X", "SUV", Money::from_major(500_000)))
        .await
        .unwrap();
    assert_eq!(vehicle.id, "M001");
    assert_eq!(
        vehicle.rental_state(),
        RentalState { status: VehicleStatus::Available, current_rental_days: 0, total_rental_count: 0 }
    );

    let rented = start_rental(&db, &mut session, "M001", 3).await.unwrap();
    assert_eq!(
        rented.rental_state(),
        RentalState { status: VehicleStatus::Rented, current_rental_days: 3, total_rental_count: 1 }
    );

    let outcome = undo_last(&db, &mut session).await.unwrap();
    assert!(matches!(outcome, UndoOutcome::StatusRestored { .. }));

    let stored = db.vehicles().get_by_id("M001").await.unwrap().unwrap();
    assert_eq!(
        stored.rental_state(),
        RentalState { status: VehicleStatus::Available, current_rental_days: 0, total_rental_count: 0 }
    );

    let err = undo_last(&db, &mut session).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::NothingToUndo);
}

#[tokio::test]
async fn test_rent_return_cycles_keep_invariants() {
    let db = empty_fleet().await;
    let mut session = session(Role::Customer);
    add_vehicle(&db, &mut session, &NewVehicle::new("Honda Jazz", "Hatchback", Money::from_major(250_000)))
        .await
        .unwrap();

    let mut last_total = 0;
    for days in 1..=4 {
        let rented = start_rental(&db, &mut session, "M001", days).await.unwrap();
        assert!(rented.total_rental_count > last_total);
        last_total = rented.total_rental_count;
        assert_fleet_consistent(&db).await;

        let ReturnOutcome::Returned(returned) = end_rental(&db, &mut session, "M001").await.unwrap() else {
            panic!("vehicle should have been rented");
        };
        assert_eq!(returned.total_rental_count, last_total);
        assert_fleet_consistent(&db).await;
    }
    assert_eq!(last_total, 4);
}

#[tokio::test]
async fn test_conflict_leaves_state_unchanged() {
    let db = empty_fleet().await;
    let mut session = session(Role::Customer);
    add_vehicle(&db, &mut session, &NewVehicle::new("Toyota Camry", "Sedan", Money::from_major(450_000)))
        .await
        .unwrap();
    start_rental(&db, &mut session, "M001", 2).await.unwrap();
    let before = db.vehicles().get_by_id("M001").await.unwrap().unwrap();

    let err = start_rental(&db, &mut session, "M001", 5).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::Conflict);

    let after = db.vehicles().get_by_id("M001").await.unwrap().unwrap();
    assert_eq!(after.rental_state(), before.rental_state());
}

#[tokio::test]
async fn test_return_then_undo_restores_exact_tuple() {
    let db = empty_fleet().await;
    let mut session = session(Role::Customer);
    add_vehicle(&db, &mut session, &NewVehicle::new("Mazda CX-5", "SUV", Money::from_major(600_000)))
        .await
        .unwrap();
    start_rental(&db, &mut session, "M001", 7).await.unwrap();
    let before_return = db.vehicles().get_by_id("M001").await.unwrap().unwrap().rental_state();

    end_rental(&db, &mut session, "M001").await.unwrap();
    undo_last(&db, &mut session).await.unwrap();

    let restored = db.vehicles().get_by_id("M001").await.unwrap().unwrap().rental_state();
    assert_eq!(restored, before_return);
}

#[tokio::test]
async fn test_create_then_undo_leaves_id_absent() {
    let db = empty_fleet().await;
    let mut session = session(Role::Manager);
    add_vehicle(&db, &mut session, &NewVehicle::new("Honda Civic", "Sedan", Money::from_major(450_000)))
        .await
        .unwrap();

    assert_eq!(
        undo_last(&db, &mut session).await.unwrap(),
        UndoOutcome::VehicleRemoved { id: "M001".to_string() }
    );
    assert!(db.vehicles().get_by_id("M001").await.unwrap().is_none());

    // The freed id is handed out again.
    let again = add_vehicle(&db, &mut session, &NewVehicle::new("Honda Civic", "Sedan", Money::from_major(450_000)))
        .await
        .unwrap();
    assert_eq!(again.id, "M001");
}

#[tokio::test]
async fn test_sessions_have_separate_undo_slots() {
    let db = empty_fleet().await;
    let mut manager = session(Role::Manager);
    let mut customer = session(Role::Customer);

    add_vehicle(&db, &mut manager, &NewVehicle::new("Toyota Yaris", "Hatchback", Money::from_major(250_000)))
        .await
        .unwrap();

    let err = undo_last(&db, &mut customer).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::NothingToUndo);
    assert!(!manager.undo.is_empty());
}

#[tokio::test]
async fn test_undo_overwrites_later_changes_from_another_session() {
    let db = empty_fleet().await;
    let mut first = session(Role::Customer);
    let mut second = session(Role::Customer);
    add_vehicle(&db, &mut first, &NewVehicle::new("Toyota Avanza", "MPV", Money::from_major(350_000)))
        .await
        .unwrap();

    start_rental(&db, &mut first, "M001", 3).await.unwrap();
    end_rental(&db, &mut first, "M001").await.unwrap();

    // the second customer rents it before the first one undoes the return
    let rented = start_rental(&db, &mut second, "M001", 7).await.unwrap();
    assert_eq!(
        rented.rental_state(),
        RentalState { status: VehicleStatus::Rented, current_rental_days: 7, total_rental_count: 2 }
    );

    // restore is unconditional: the first session's pre-image wins, rental count included
    let before_return = RentalState { status: VehicleStatus::Rented, current_rental_days: 3, total_rental_count: 1 };
    assert_eq!(
        undo_last(&db, &mut first).await.unwrap(),
        UndoOutcome::StatusRestored { id: "M001".to_string(), state: before_return }
    );
    let stored = db.vehicles().get_by_id("M001").await.unwrap().unwrap();
    assert_eq!(stored.rental_state(), before_return);
    assert!(!second.undo.is_empty());
}

#[tokio::test]
async fn test_statistics_and_spreadsheet_export() {
    let db = empty_fleet().await;
    let mut session = session(Role::Manager);
    for (model, category, price) in [
        ("Toyota Avanza", "MPV", 350_000),
        ("Honda Brio", "Hatchback", 250_000),
        ("Toyota Fortuner", "SUV", 600_000),
    ] {
        add_vehicle(&db, &mut session, &NewVehicle::new(model, category, Money::from_major(price)))
            .await
            .unwrap();
    }
    start_rental(&db, &mut session, "M003", 5).await.unwrap();

    let stats = fleet_statistics(&db).await.unwrap();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.rented, 1);
    assert_eq!(stats.mean_price, Some(Money::from_major(400_000)));
    assert_eq!(stats.by_category.len(), 3);
    assert_eq!(stats.by_category[0].category, "Hatchback");
    assert_eq!(stats.longest_rentals[0].id, "M003");
    assert_eq!(stats.longest_rentals[0].value, 5);

    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("march_report");
    let folder = export_report(&db, &target).await.unwrap();
    assert_eq!(folder, target);

    let read = |sheet: &str| std::fs::read_to_string(folder.join(format!("{}.csv", sheet))).unwrap();

    let summary = read("summary");
    assert_eq!(summary.lines().nth(1), Some("3,2,1,66.67,33.33,400000.00"));

    let by_category = read("by_category");
    assert_eq!(by_category.lines().nth(1), Some("Hatchback,1,250000.00"));

    let long_rentals = read("long_rentals");
    assert_eq!(long_rentals.lines().collect::<Vec<_>>(), ["id,model,current_rental_days", "M003,Toyota Fortuner,5"]);

    let top5 = read("top5");
    assert_eq!(top5.lines().nth(1), Some("M003,Toyota Fortuner,1"));

    let full = read("full_data");
    assert_eq!(full.lines().count(), 4);
    assert!(full.lines().nth(3).unwrap().starts_with("M003,Toyota Fortuner,SUV,600000.00,rented,5,1,"));
}
