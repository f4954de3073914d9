//! Mocked sign-in and guest checkout.
//!
//! There is no real identity system. A session is restored from local
//! storage at startup, created through the mock auth backend or guest
//! form, and cleared on logout. Persistence is best effort; a session
//! that fails to save still works for the rest of the run.

use tracing::warn;

use crate::domain::models::{GuestProfile, UserProfile};
use crate::infrastructure::persistence::SessionStore;
use crate::infrastructure::services::{AuthBackend, ServiceError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    Anonymous,
    Guest(GuestProfile),
    Authenticated(UserProfile),
}

impl Session {
    /// Restores the session saved by a previous run. A stored token with
    /// its user profile wins over stored guest details.
    pub fn restore(store: &SessionStore) -> Session {
        if store.load_token().is_some() {
            if let Some(user) = store.load_user() {
                return Session::Authenticated(user);
            }
        }
        if let Some(guest) = store.load_guest() {
            return Session::Guest(guest);
        }
        Session::Anonymous
    }

    /// Signs in through the auth backend and persists the result.
    pub fn login(
        auth: &dyn AuthBackend,
        store: &SessionStore,
        email: &str,
        password: &str,
    ) -> Result<Session, ServiceError> {
        let (token, user) = auth.login(email, password)?;
        if let Err(e) = store.save_login(&token, &user) {
            warn!(error = %e, "failed to persist login session");
        }
        Ok(Session::Authenticated(user))
    }

    /// Starts a guest checkout with the given contact details.
    pub fn continue_as_guest(store: &SessionStore, name: &str, email: &str) -> Session {
        let guest = GuestProfile {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            phone_number: None,
        };
        if let Err(e) = store.save_guest(&guest) {
            warn!(error = %e, "failed to persist guest session");
        }
        Session::Guest(guest)
    }

    /// Clears every stored session key and returns to anonymous.
    pub fn logout(store: &SessionStore) -> Session {
        store.clear();
        Session::Anonymous
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Session::Anonymous)
    }

    /// Name shown in the header, when the session has one.
    pub fn display_name(&self) -> Option<&str> {
        match self {
            Session::Anonymous => None,
            Session::Guest(guest) => Some(&guest.name),
            Session::Authenticated(user) => Some(&user.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::KeyValueStore;
    use crate::infrastructure::services::MockAuthBackend;
    use chrono::Utc;
    use std::time::Duration;

    fn store_in(dir: &tempfile::TempDir) -> SessionStore {
        SessionStore::new(KeyValueStore::new(dir.path()))
    }

    #[test]
    fn test_restore_empty_is_anonymous() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Session::restore(&store_in(&dir)), Session::Anonymous);
    }

    #[test]
    fn test_restore_prefers_login_over_guest() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let user = UserProfile::dummy("jane@example.com", Utc::now());
        store.save_login("mock_jwt_token_1", &user).unwrap();
        store
            .save_guest(&GuestProfile {
                name: "Pat Guest".to_string(),
                email: "pat@example.com".to_string(),
                phone_number: None,
            })
            .unwrap();

        assert_eq!(Session::restore(&store), Session::Authenticated(user));
    }

    #[test]
    fn test_restore_guest_when_no_token() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let guest = GuestProfile {
            name: "Pat Guest".to_string(),
            email: "pat@example.com".to_string(),
            phone_number: None,
        };
        store.save_guest(&guest).unwrap();
        assert_eq!(Session::restore(&store), Session::Guest(guest));
    }

    #[test]
    fn test_login_persists_and_restores() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let auth = MockAuthBackend::with_latency(Duration::ZERO);

        let session = Session::login(&auth, &store, "jane@example.com", "secret").unwrap();
        assert!(matches!(&session, Session::Authenticated(u) if u.email == "jane@example.com"));
        assert_eq!(Session::restore(&store), session);
    }

    #[test]
    fn test_logout_clears_everything() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let auth = MockAuthBackend::with_latency(Duration::ZERO);
        Session::login(&auth, &store, "jane@example.com", "secret").unwrap();

        assert_eq!(Session::logout(&store), Session::Anonymous);
        assert_eq!(Session::restore(&store), Session::Anonymous);
    }

    #[test]
    fn test_guest_details_are_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let session = Session::continue_as_guest(&store, "  Pat Guest ", " pat@example.com ");
        match session {
            Session::Guest(guest) => {
                assert_eq!(guest.name, "Pat Guest");
                assert_eq!(guest.email, "pat@example.com");
            }
            other => panic!("expected guest session, got {:?}", other),
        }
    }
}
