//! Local JSON persistence.
//!
//! A tiny string key-value store backed by one file per key, with typed
//! repositories layered on top for bookings and session data. Reads
//! degrade to empty state on any failure; only writes surface errors to
//! the caller, and even those are treated as best-effort upstream.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::domain::models::{ConfirmedBooking, GuestProfile, UserProfile};

pub const KEY_CONFIRMED_BOOKINGS: &str = "confirmed_bookings";
pub const KEY_AUTH_TOKEN: &str = "auth_token";
pub const KEY_USER_DATA: &str = "user_data";
pub const KEY_GUEST_DATA: &str = "guest_data";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage encoding error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// String key to string value, one file per key under a data directory.
#[derive(Debug, Clone)]
pub struct KeyValueStore {
    root: PathBuf,
}

impl KeyValueStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The per-user data directory, falling back to the current directory
    /// when the platform offers none.
    pub fn default_location() -> Self {
        let root = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("suds");
        Self::new(root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Some(value),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(key, error = %e, "failed to read stored value");
                None
            }
        }
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    pub fn remove(&self, key: &str) {
        let path = self.path_for(key);
        if let Err(e) = fs::remove_file(&path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(key, error = %e, "failed to remove stored value");
            }
        }
    }
}

/// Append-only log of confirmed bookings, stored as one JSON array.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    store: KeyValueStore,
}

impl BookingRepository {
    pub fn new(store: KeyValueStore) -> Self {
        Self { store }
    }

    /// Loads the booking log. Absence, unreadable files, and parse
    /// failures all yield an empty list.
    pub fn load(&self) -> Vec<ConfirmedBooking> {
        let Some(raw) = self.store.get(KEY_CONFIRMED_BOOKINGS) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(bookings) => bookings,
            Err(e) => {
                warn!(error = %e, "stored booking log is unreadable, starting empty");
                Vec::new()
            }
        }
    }

    pub fn save(&self, bookings: &[ConfirmedBooking]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(bookings)?;
        self.store.set(KEY_CONFIRMED_BOOKINGS, &json)?;
        Ok(())
    }
}

/// Session keys: auth token plus the signed-in or guest profile.
#[derive(Debug, Clone)]
pub struct SessionStore {
    store: KeyValueStore,
}

impl SessionStore {
    pub fn new(store: KeyValueStore) -> Self {
        Self { store }
    }

    pub fn load_token(&self) -> Option<String> {
        self.store.get(KEY_AUTH_TOKEN)
    }

    pub fn load_user(&self) -> Option<UserProfile> {
        let raw = self.store.get(KEY_USER_DATA)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "stored user profile is unreadable");
                None
            }
        }
    }

    pub fn load_guest(&self) -> Option<GuestProfile> {
        let raw = self.store.get(KEY_GUEST_DATA)?;
        match serde_json::from_str(&raw) {
            Ok(guest) => Some(guest),
            Err(e) => {
                warn!(error = %e, "stored guest profile is unreadable");
                None
            }
        }
    }

    pub fn save_login(&self, token: &str, user: &UserProfile) -> Result<(), StoreError> {
        self.store.set(KEY_AUTH_TOKEN, token)?;
        self.store.set(KEY_USER_DATA, &serde_json::to_string(user)?)?;
        Ok(())
    }

    pub fn save_guest(&self, guest: &GuestProfile) -> Result<(), StoreError> {
        self.store.set(KEY_GUEST_DATA, &serde_json::to_string(guest)?)?;
        Ok(())
    }

    /// Removes every session key. Used by logout.
    pub fn clear(&self) {
        self.store.remove(KEY_AUTH_TOKEN);
        self.store.remove(KEY_USER_DATA);
        self.store.remove(KEY_GUEST_DATA);
    }
}
