//! Mocked external services.
//!
//! The app has no backend; authentication, payment, and area lookup are
//! trait seams with mock implementations that simulate request latency.
//! Tests construct them with zero latency.

use std::time::Duration;

use chrono::Utc;
use tracing::info;

use crate::domain::models::{BookingData, UserProfile};
use crate::domain::neighborhoods::neighborhood_for_zip;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error("Please enter both email and password")]
    InvalidCredentials,
    #[error("Your card was declined. Please check the number and try again.")]
    CardDeclined,
}

/// Resolves credentials to a signed-in profile.
pub trait AuthBackend {
    fn login(&self, email: &str, password: &str) -> Result<(String, UserProfile), ServiceError>;
}

/// Takes a payment and returns a receipt id.
pub trait PaymentGateway {
    fn charge(&self, data: &BookingData, amount_cents: u64) -> Result<String, ServiceError>;
}

/// Resolves a zip code to a serviced neighborhood.
pub trait AreaLookup {
    fn lookup(&self, zip: &str) -> Option<&'static str>;
}

/// Accepts any non-empty credentials and resolves them to the canned
/// account.
#[derive(Debug, Clone)]
pub struct MockAuthBackend {
    latency: Duration,
}

impl MockAuthBackend {
    pub fn new() -> Self {
        Self { latency: Duration::from_secs(1) }
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for MockAuthBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthBackend for MockAuthBackend {
    fn login(&self, email: &str, password: &str) -> Result<(String, UserProfile), ServiceError> {
        std::thread::sleep(self.latency);
        if email.trim().is_empty() || password.is_empty() {
            return Err(ServiceError::InvalidCredentials);
        }
        let now = Utc::now();
        let token = format!("mock_jwt_token_{}", now.timestamp_millis());
        info!(email, "mock login succeeded");
        Ok((token, UserProfile::dummy(email, now)))
    }
}

/// Approves every charge except the all-zeros test card.
#[derive(Debug, Clone)]
pub struct MockPaymentGateway {
    latency: Duration,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self { latency: Duration::from_secs(2) }
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for MockPaymentGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl PaymentGateway for MockPaymentGateway {
    fn charge(&self, data: &BookingData, amount_cents: u64) -> Result<String, ServiceError> {
        std::thread::sleep(self.latency);
        if data.payment_method == "card" {
            let digits: String =
                data.card_number.chars().filter(|c| c.is_ascii_digit()).collect();
            if !digits.is_empty() && digits.bytes().all(|b| b == b'0') {
                return Err(ServiceError::CardDeclined);
            }
        }
        let receipt_id = format!("PAY-{}", Utc::now().timestamp_millis());
        info!(amount_cents, receipt_id, "mock charge approved");
        Ok(receipt_id)
    }
}

/// Looks the zip up in the static neighborhood table.
#[derive(Debug, Clone)]
pub struct MockAreaLookup {
    latency: Duration,
}

impl MockAreaLookup {
    pub fn new() -> Self {
        Self { latency: Duration::from_millis(300) }
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for MockAreaLookup {
    fn default() -> Self {
        Self::new()
    }
}

impl AreaLookup for MockAreaLookup {
    fn lookup(&self, zip: &str) -> Option<&'static str> {
        std::thread::sleep(self.latency);
        neighborhood_for_zip(zip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant_auth() -> MockAuthBackend {
        MockAuthBackend::with_latency(Duration::ZERO)
    }

    #[test]
    fn test_login_rejects_empty_credentials() {
        let auth = instant_auth();
        assert_eq!(
            auth.login("", "secret").unwrap_err(),
            ServiceError::InvalidCredentials
        );
        assert_eq!(
            auth.login("jane@example.com", "").unwrap_err(),
            ServiceError::InvalidCredentials
        );
    }

    #[test]
    fn test_login_returns_canned_profile_with_given_email() {
        let auth = instant_auth();
        let (token, user) = auth.login("jane@example.com", "secret").unwrap();
        assert!(token.starts_with("mock_jwt_token_"));
        assert_eq!(user.email, "jane@example.com");
        assert_eq!(user.name, "John Doe");
    }

    #[test]
    fn test_charge_approves_and_returns_receipt_id() {
        let gateway = MockPaymentGateway::with_latency(Duration::ZERO);
        let mut data = BookingData::default();
        data.payment_method = "card".to_string();
        data.card_number = "4111 1111 1111 1111".to_string();
        let receipt = gateway.charge(&data, 7560).unwrap();
        assert!(receipt.starts_with("PAY-"));
    }

    #[test]
    fn test_charge_declines_all_zero_card() {
        let gateway = MockPaymentGateway::with_latency(Duration::ZERO);
        let mut data = BookingData::default();
        data.payment_method = "card".to_string();
        data.card_number = "0000 0000 0000 0000".to_string();
        assert_eq!(gateway.charge(&data, 7560).unwrap_err(), ServiceError::CardDeclined);
    }

    #[test]
    fn test_area_lookup_uses_static_table() {
        let lookup = MockAreaLookup::with_latency(Duration::ZERO);
        assert_eq!(lookup.lookup("10001"), Some("Chelsea, New York, NY"));
        assert_eq!(lookup.lookup("60601"), None);
    }
}
