//! # Vehicle Repository
//!
//! Database operations for vehicles.
//!
//! ## Key Operations
//! - Listing with optional status / category / keyword filters
//! - Insert of a freshly built vehicle
//! - Guarded rental-state updates (rent, return)
//! - Unconditional rental-state restore and delete (undo replay)
//!
//! ## Guarded Updates
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  A rent is planned against a snapshot, then committed with:             │
//! │                                                                         │
//! │     UPDATE vehicles SET status = 'rented', ...                          │
//! │     WHERE id = 'M001' AND status = 'available'                          │
//! │                                                                         │
//! │  The precondition and the write are one statement. If another writer   │
//! │  got there first the update matches nothing and we report a Conflict   │
//! │  instead of silently overwriting.                                      │
//! │                                                                         │
//! │  Undo replays are the exception: they write the pre-image back         │
//! │  unconditionally (overwrite wins).                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use fleet_core::{RentalState, Vehicle, VehicleFilter, VehicleStatus};

const VEHICLE_COLUMNS: &str = "id, model, category, price_per_day_cents, status, \
     current_rental_days, total_rental_count, created_at, updated_at";

/// Numeric order for sequential ids (M999 before M1000).
const ORDER_BY_ID: &str = " ORDER BY LENGTH(id), id";

/// Repository for vehicle database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = VehicleRepository::new(pool);
///
/// let available = repo.list(&VehicleFilter::with_status(VehicleStatus::Available)).await?;
/// let vehicle = repo.get_by_id("M001").await?;
/// ```
#[derive(Debug, Clone)]
pub struct VehicleRepository {
    pool: SqlitePool,
}

impl VehicleRepository {
    /// Creates a new VehicleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        VehicleRepository { pool }
    }

    /// Gets a vehicle by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Vehicle))` - Vehicle found
    /// * `Ok(None)` - Vehicle not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Vehicle>> {
        let sql = format!("SELECT {VEHICLE_COLUMNS} FROM vehicles WHERE id = ?1");
        let vehicle = sqlx::query_as::<_, Vehicle>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    /// Checks whether a vehicle id exists.
    pub async fn exists(&self, id: &str) -> DbResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM vehicles WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(found.is_some())
    }

    /// Lists vehicles matching `filter`, ordered by id.
    ///
    /// ## Filters
    /// - `status`: exact match
    /// - `category`: exact match
    /// - `keyword`: case-insensitive substring of model or category
    ///
    /// An empty filter returns the whole fleet.
    pub async fn list(&self, filter: &VehicleFilter) -> DbResult<Vec<Vehicle>> {
        debug!(?filter, "Listing vehicles");

        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {VEHICLE_COLUMNS} FROM vehicles WHERE 1 = 1"));

        if let Some(status) = filter.status {
            query.push(" AND status = ").push_bind(status);
        }

        if let Some(ref category) = filter.category {
            query.push(" AND category = ").push_bind(category.clone());
        }

        if let Some(ref keyword) = filter.keyword {
            let pattern = like_pattern(keyword);
            query
                .push(" AND (LOWER(model) LIKE ")
                .push_bind(pattern.clone())
                .push(" ESCAPE '\\' OR LOWER(category) LIKE ")
                .push_bind(pattern)
                .push(" ESCAPE '\\')");
        }

        query.push(ORDER_BY_ID);

        let vehicles = query
            .build_query_as::<Vehicle>()
            .fetch_all(&self.pool)
            .await?;

        debug!(count = vehicles.len(), "List returned vehicles");
        Ok(vehicles)
    }

    /// Distinct categories present in the fleet, alphabetically.
    pub async fn categories(&self) -> DbResult<Vec<String>> {
        let categories: Vec<String> =
            sqlx::query_scalar("SELECT DISTINCT category FROM vehicles ORDER BY category")
                .fetch_all(&self.pool)
                .await?;

        Ok(categories)
    }

    /// Highest vehicle id in numeric order, `None` for an empty fleet.
    pub async fn last_id(&self) -> DbResult<Option<String>> {
        let id: Option<String> = sqlx::query_scalar(
            "SELECT id FROM vehicles ORDER BY LENGTH(id) DESC, id DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(id)
    }

    /// Inserts a new vehicle.
    ///
    /// ## Returns
    /// * `Ok(())` - Inserted
    /// * `Err(DbError::UniqueViolation)` - The id is already taken
    pub async fn insert(&self, vehicle: &Vehicle) -> DbResult<()> {
        debug!(id = %vehicle.id, model = %vehicle.model, "Inserting vehicle");

        sqlx::query(
            r#"
            INSERT INTO vehicles (
                id, model, category, price_per_day_cents, status,
                current_rental_days, total_rental_count, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&vehicle.id)
        .bind(&vehicle.model)
        .bind(&vehicle.category)
        .bind(vehicle.price_per_day_cents)
        .bind(vehicle.status)
        .bind(vehicle.current_rental_days)
        .bind(vehicle.total_rental_count)
        .bind(vehicle.created_at)
        .bind(vehicle.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { .. } => DbError::duplicate("vehicle id", &vehicle.id),
            other => other,
        })?;

        Ok(())
    }

    /// Writes a new rental state, provided the row still has `expected` status.
    ///
    /// ## Returns
    /// * `Ok(())` - Written
    /// * `Err(DbError::NotFound)` - No such vehicle
    /// * `Err(DbError::Conflict)` - The vehicle is no longer `expected`
    pub async fn update_rental_state(
        &self,
        id: &str,
        expected: VehicleStatus,
        state: &RentalState,
    ) -> DbResult<()> {
        debug!(
            id = %id,
            expected = %expected,
            status = %state.status,
            days = state.current_rental_days,
            "Updating rental state"
        );

        let result = sqlx::query(
            r#"
            UPDATE vehicles
            SET
                status = ?2,
                current_rental_days = ?3,
                total_rental_count = ?4,
                updated_at = ?5
            WHERE id = ?1 AND status = ?6
            "#,
        )
        .bind(id)
        .bind(state.status)
        .bind(state.current_rental_days)
        .bind(state.total_rental_count)
        .bind(Utc::now())
        .bind(expected)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            if self.exists(id).await? {
                return Err(DbError::conflict(
                    "Vehicle",
                    id,
                    format!("expected status {expected}"),
                ));
            }
            return Err(DbError::not_found("Vehicle", id));
        }

        Ok(())
    }

    /// Writes a rental state back whatever the row currently holds.
    ///
    /// ## Returns
    /// * `Ok(())` - Written
    /// * `Err(DbError::NotFound)` - No such vehicle
    pub async fn restore_rental_state(&self, id: &str, state: &RentalState) -> DbResult<()> {
        debug!(id = %id, status = %state.status, "Restoring rental state");

        let result = sqlx::query(
            r#"
            UPDATE vehicles
            SET
                status = ?2,
                current_rental_days = ?3,
                total_rental_count = ?4,
                updated_at = ?5
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(state.status)
        .bind(state.current_rental_days)
        .bind(state.total_rental_count)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Vehicle", id));
        }

        Ok(())
    }

    /// Deletes a vehicle.
    ///
    /// ## Returns
    /// * `Ok(())` - Deleted
    /// * `Err(DbError::NotFound)` - No such vehicle
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting vehicle");

        let result = sqlx::query("DELETE FROM vehicles WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Vehicle", id));
        }

        Ok(())
    }

    /// Counts vehicles (for diagnostics and the seed binary).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM vehicles")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// `%keyword%`, lower-cased, with LIKE wildcards in the keyword escaped.
fn like_pattern(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len() + 2);
    escaped.push('%');
    for c in keyword.trim().to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

// =============================================================================
// Unit Tests
// =============================================================================
