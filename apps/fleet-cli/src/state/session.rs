//! # Session State
//!
//! One signed-in user and their undo slot.

use fleet_core::{Role, UndoSlot, User};

/// Context owned by the menu loop for the duration of one login.
#[derive(Debug)]
pub struct Session {
    user: User,

    /// Last reversible action. Written by commands after a successful
    /// commit, consumed by undo.
    pub undo: UndoSlot,
}

impl Session {
    /// Opens a session with an empty undo slot.
    pub fn new(user: User) -> Self {
        Session {
            user,
            undo: UndoSlot::new(),
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn role(&self) -> Role {
        self.user.role
    }

    pub fn is_manager(&self) -> bool {
        self.user.role == Role::Manager
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use fleet_core::UndoDescriptor;

    fn user(role: Role) -> User {
        User {
            id: "U001".to_string(),
            name: "Admin Manager".to_string(),
            email: "admin@rental.com".to_string(),
            password_hash: String::new(),
            role,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_new_session_has_nothing_to_undo() {
        let session = Session::new(user(Role::Manager));
        assert!(session.undo.is_empty());
        assert!(session.is_manager());
    }

    #[test]
    fn test_sessions_do_not_share_undo() {
        let mut first = Session::new(user(Role::Customer));
        first.undo.record(UndoDescriptor::insert_vehicle("M001"));

        let second = Session::new(user(Role::Customer));
        assert!(!first.undo.is_empty());
        assert!(second.undo.is_empty());
        assert_eq!(second.role(), Role::Customer);
    }
}
