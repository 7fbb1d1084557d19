//! # User Commands
//!
//! Registration, login and the default accounts.
//!
//! Passwords are hashed with Argon2 (default parameters, random salt) and
//! stored as PHC strings. Plain text never reaches the store or the logs.

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use chrono::Utc;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult, ErrorCode};
use fleet_core::ids::{next_id, Namespace};
use fleet_core::validation::{normalize_email, validate_email, validate_password, validate_user_name};
use fleet_core::{Role, User};
use fleet_db::Database;

/// Password of the seeded default accounts.
pub const DEFAULT_PASSWORD: &str = "admin";

/// Seeded when missing: (name, email, role).
pub const DEFAULT_USERS: [(&str, &str, Role); 2] = [
    ("Admin Manager", "admin@rental.com", Role::Manager),
    ("Customer", "customer@rental.com", Role::Customer),
];

/// Registration form.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Hashes a password for storage.
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;

    Ok(hash.to_string())
}

/// Checks a password against a stored hash. A malformed hash never matches.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Registers an account.
///
/// ## Errors
/// - `Validation` - blank name or password, malformed email
/// - `DuplicateKey` - email already registered
pub async fn register_user(db: &Database, form: &NewUser) -> AppResult<User> {
    let name = validate_user_name(&form.name)?;
    let email = validate_email(&form.email)?;
    validate_password(&form.password)?;

    let users = db.users();
    if users.email_exists(&email).await? {
        return Err(AppError::new(
            ErrorCode::DuplicateKey,
            format!("email '{}' already exists", email),
        ));
    }

    let last = users.last_id().await?;
    let user = User {
        id: next_id(Namespace::User, last.as_deref()),
        name,
        email,
        password_hash: hash_password(&form.password)?,
        role: form.role,
        created_at: Utc::now(),
    };
    users.insert(&user).await?;

    info!(id = %user.id, email = %user.email, role = %user.role, "User registered");
    Ok(user)
}

/// Returns the user when email and password match, `None` otherwise.
pub async fn authenticate(db: &Database, email: &str, password: &str) -> AppResult<Option<User>> {
    let email = normalize_email(email);
    debug!(email = %email, "authenticate command");

    let Some(user) = db.users().get_by_email(&email).await? else {
        return Ok(None);
    };

    if verify_password(password, &user.password_hash) {
        info!(id = %user.id, role = %user.role, "User logged in");
        Ok(Some(user))
    } else {
        warn!(email = %email, "Login failed: wrong password");
        Ok(None)
    }
}

/// Creates the default manager and customer accounts that are missing.
/// Returns how many were created.
pub async fn ensure_default_users(db: &Database) -> AppResult<usize> {
    let mut created = 0;

    for (name, email, role) in DEFAULT_USERS {
        if db.users().email_exists(email).await? {
            continue;
        }

        register_user(
            db,
            &NewUser {
                name: name.to_string(),
                email: email.to_string(),
                password: DEFAULT_PASSWORD.to_string(),
                role,
            },
        )
        .await?;
        created += 1;
    }

    if created > 0 {
        info!(created, "Default accounts created");
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleet_db::DbConfig;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("s3cret").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("s3cret", &hash));
        assert!(!verify_password("S3cret", &hash));
        assert!(!verify_password("s3cret", "not-a-hash"));
    }

    #[tokio::test]
    async fn test_default_users_seeded_once() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert_eq!(ensure_default_users(&db).await.unwrap(), 2);
        assert_eq!(ensure_default_users(&db).await.unwrap(), 0);
        assert_eq!(db.users().count().await.unwrap(), 2);

        let admin = authenticate(&db, " Admin@Rental.com ", "admin").await.unwrap().unwrap();
        assert_eq!(admin.id, "U001");
        assert_eq!(admin.role, Role::Manager);

        let customer = authenticate(&db, "customer@rental.com", "admin").await.unwrap().unwrap();
        assert_eq!(customer.id, "U002");
        assert_eq!(customer.role, Role::Customer);
    }

    #[tokio::test]
    async fn test_register_rejects_duplicates_and_bad_input() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let form = NewUser {
            name: "Sari".to_string(),
            email: "sari@example.com".to_string(),
            password: "pw".to_string(),
            role: Role::Customer,
        };
        register_user(&db, &form).await.unwrap();

        let err = register_user(&db, &NewUser { email: "SARI@example.com".into(), ..form.clone() })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateKey);

        let err = register_user(&db, &NewUser { email: "sari-at-example".into(), ..form.clone() })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Validation);

        let err = register_user(&db, &NewUser { name: "  ".into(), email: "b@example.com".into(), ..form.clone() })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Validation);

        let err = register_user(&db, &NewUser { password: String::new(), email: "c@example.com".into(), ..form })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Validation);
    }

    #[tokio::test]
    async fn test_wrong_password_or_unknown_email() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        ensure_default_users(&db).await.unwrap();

        assert!(authenticate(&db, "admin@rental.com", "nope").await.unwrap().is_none());
        assert!(authenticate(&db, "ghost@rental.com", "admin").await.unwrap().is_none());
    }
}
