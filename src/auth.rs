//! Mock local login against the stored users list.
//!
//! This keeps the dashboard's behavior of a built-in admin account plus
//! locally registered users. It is a convenience gate, not a security
//! boundary.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::error::{AppError, Result};
use crate::model::{Role, SessionUser, User};
use crate::store::{next_id, Store};

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@repair.com";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

#[cfg(not(test))]
const HASH_COST: u32 = bcrypt::DEFAULT_COST;
#[cfg(test)]
const HASH_COST: u32 = 4;

pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub password: String,
    pub password_confirmation: String,
}

pub fn login(store: &mut Store, email: &str, password: &str) -> Result<SessionUser> {
    let email = email.trim();
    let stored = store
        .users
        .iter()
        .find(|u| u.email.eq_ignore_ascii_case(email))
        .filter(|u| bcrypt::verify(password, &u.password_hash).unwrap_or(false))
        .map(SessionUser::from);

    let user = match stored {
        Some(user) => user,
        None if email == DEFAULT_ADMIN_EMAIL && password == DEFAULT_ADMIN_PASSWORD => SessionUser {
            id: "1".into(),
            name: "John Doe".into(),
            email: DEFAULT_ADMIN_EMAIL.into(),
            role: Role::Admin,
        },
        None => {
            warn!(email, "login rejected");
            return Err(AppError::InvalidCredentials);
        }
    };

    info!(user = %user.email, role = ?user.role, "login successful");
    store.set_session(Some(user.clone()));
    Ok(user)
}

pub fn logout(store: &mut Store) {
    if let Some(user) = store.session() {
        info!(user = %user.email, "logout");
    }
    store.set_session(None);
}

pub fn require_session(store: &Store) -> Result<&SessionUser> {
    store.session().ok_or(AppError::NotLoggedIn)
}

pub fn register(store: &mut Store, new_user: NewUser, now: DateTime<Utc>) -> Result<User> {
    if new_user.password != new_user.password_confirmation {
        return Err(AppError::PasswordMismatch);
    }
    if new_user.password.len() < 6 {
        return Err(AppError::InvalidInput("password must have at least 6 characters".into()));
    }
    let email = new_user.email.trim().to_string();
    if store.users.iter().any(|u| u.email.eq_ignore_ascii_case(&email)) {
        return Err(AppError::InvalidInput(format!("user {email} already exists")));
    }

    let password_hash = bcrypt::hash(&new_user.password, HASH_COST)
        .map_err(|e| AppError::InvalidInput(format!("failed to hash password: {e}")))?;
    let user = User {
        id: next_id("U-", now, |id| store.users.contains(id)),
        name: new_user.name.trim().to_string(),
        email,
        role: new_user.role,
        phone: None,
        position: None,
        department: None,
        password_hash,
    };
    store.add_user(user.clone());
    info!(user = %user.email, "user registered");
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(password: &str, confirmation: &str) -> NewUser {
        NewUser {
            name: "Sarah Johnson".into(),
            email: "sarah@example.com".into(),
            role: Role::Technician,
            password: password.into(),
            password_confirmation: confirmation.into(),
        }
    }

    #[test]
    fn test_default_admin_login() {
        let mut store = Store::in_memory();
        let user = login(&mut store, DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD).unwrap();
        assert_eq!(user.role, Role::Admin);
        assert_eq!(require_session(&store).unwrap().email, DEFAULT_ADMIN_EMAIL);
    }

    #[test]
    fn test_wrong_password_is_rejected() {
        let mut store = Store::in_memory();
        let err = login(&mut store, DEFAULT_ADMIN_EMAIL, "nope").unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
        assert!(matches!(require_session(&store), Err(AppError::NotLoggedIn)));
    }

    #[test]
    fn test_registered_user_can_log_in_and_out() {
        let mut store = Store::in_memory();
        let user = register(&mut store, new_user("geheim123", "geheim123"), Utc::now()).unwrap();
        assert_ne!(user.password_hash, "geheim123");

        let session = login(&mut store, "Sarah@Example.com", "geheim123").unwrap();
        assert_eq!(session.id, user.id);
        assert_eq!(session.role, Role::Technician);

        logout(&mut store);
        assert!(store.session().is_none());
    }

    #[test]
    fn test_register_rejects_mismatch_and_duplicates() {
        let mut store = Store::in_memory();
        let err = register(&mut store, new_user("geheim123", "geheim124"), Utc::now()).unwrap_err();
        assert!(matches!(err, AppError::PasswordMismatch));
        register(&mut store, new_user("geheim123", "geheim123"), Utc::now()).unwrap();
        assert!(register(&mut store, new_user("geheim123", "geheim123"), Utc::now()).is_err());
        assert_eq!(store.users.len(), 1);
    }
}
