use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Answers collected across the booking wizard.
///
/// Every field is a string, mirroring raw form input. Fields are only
/// validated at step-transition time by the navigation policy, never on
/// write.
///
/// # Examples
///
/// ```
/// use suds::domain::{BookingData, BookingField};
///
/// let mut data = BookingData::default();
/// assert_eq!(data.booking_hours, "2");
/// data.set(BookingField::ZipCode, "94110");
/// assert_eq!(data.zip_code, "94110");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingData {
    pub zip_code: String,
    pub neighborhood: String,
    pub cleaning_type: String,
    pub bedrooms: String,
    pub bathrooms: String,
    pub square_footage: String,
    pub timing: String,
    pub selected_date: String,
    pub selected_hour: String,
    pub selected_minute: String,
    pub selected_cleaner: String,
    pub selected_time_slot: String,
    pub booking_hours: String,
    pub home_address: String,
    pub phone_number: String,
    pub booking_notes: String,
    pub allow_substitute: String,
    pub payment_method: String,
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
    pub cardholder_name: String,
    pub billing_address: String,
    pub payment_completed: String,
    pub guest_name: String,
    pub guest_email: String,
}

impl Default for BookingData {
    fn default() -> Self {
        Self {
            zip_code: String::new(),
            neighborhood: String::new(),
            cleaning_type: String::new(),
            bedrooms: "2".to_string(),
            bathrooms: "2".to_string(),
            square_footage: String::new(),
            timing: String::new(),
            selected_date: String::new(),
            selected_hour: String::new(),
            selected_minute: String::new(),
            selected_cleaner: String::new(),
            selected_time_slot: String::new(),
            booking_hours: "2".to_string(),
            home_address: String::new(),
            phone_number: String::new(),
            booking_notes: String::new(),
            allow_substitute: "true".to_string(),
            payment_method: String::new(),
            card_number: String::new(),
            expiry_date: String::new(),
            cvv: String::new(),
            cardholder_name: String::new(),
            billing_address: String::new(),
            payment_completed: "false".to_string(),
            guest_name: String::new(),
            guest_email: String::new(),
        }
    }
}

/// Selector for the single field-update operation on [`BookingData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingField {
    ZipCode,
    Neighborhood,
    CleaningType,
    Bedrooms,
    Bathrooms,
    SquareFootage,
    Timing,
    SelectedDate,
    SelectedHour,
    SelectedMinute,
    SelectedCleaner,
    SelectedTimeSlot,
    BookingHours,
    HomeAddress,
    PhoneNumber,
    BookingNotes,
    AllowSubstitute,
    PaymentMethod,
    CardNumber,
    ExpiryDate,
    Cvv,
    CardholderName,
    BillingAddress,
    PaymentCompleted,
    GuestName,
    GuestEmail,
}

impl BookingData {
    pub fn get(&self, field: BookingField) -> &str {
        self.slot(field)
    }

    pub fn set(&mut self, field: BookingField, value: impl Into<String>) {
        *self.slot_mut(field) = value.into();
    }

    fn slot(&self, field: BookingField) -> &String {
        match field {
            BookingField::ZipCode => &self.zip_code,
            BookingField::Neighborhood => &self.neighborhood,
            BookingField::CleaningType => &self.cleaning_type,
            BookingField::Bedrooms => &self.bedrooms,
            BookingField::Bathrooms => &self.bathrooms,
            BookingField::SquareFootage => &self.square_footage,
            BookingField::Timing => &self.timing,
            BookingField::SelectedDate => &self.selected_date,
            BookingField::SelectedHour => &self.selected_hour,
            BookingField::SelectedMinute => &self.selected_minute,
            BookingField::SelectedCleaner => &self.selected_cleaner,
            BookingField::SelectedTimeSlot => &self.selected_time_slot,
            BookingField::BookingHours => &self.booking_hours,
            BookingField::HomeAddress => &self.home_address,
            BookingField::PhoneNumber => &self.phone_number,
            BookingField::BookingNotes => &self.booking_notes,
            BookingField::AllowSubstitute => &self.allow_substitute,
            BookingField::PaymentMethod => &self.payment_method,
            BookingField::CardNumber => &self.card_number,
            BookingField::ExpiryDate => &self.expiry_date,
            BookingField::Cvv => &self.cvv,
            BookingField::CardholderName => &self.cardholder_name,
            BookingField::BillingAddress => &self.billing_address,
            BookingField::PaymentCompleted => &self.payment_completed,
            BookingField::GuestName => &self.guest_name,
            BookingField::GuestEmail => &self.guest_email,
        }
    }

    fn slot_mut(&mut self, field: BookingField) -> &mut String {
        match field {
            BookingField::ZipCode => &mut self.zip_code,
            BookingField::Neighborhood => &mut self.neighborhood,
            BookingField::CleaningType => &mut self.cleaning_type,
            BookingField::Bedrooms => &mut self.bedrooms,
            BookingField::Bathrooms => &mut self.bathrooms,
            BookingField::SquareFootage => &mut self.square_footage,
            BookingField::Timing => &mut self.timing,
            BookingField::SelectedDate => &mut self.selected_date,
            BookingField::SelectedHour => &mut self.selected_hour,
            BookingField::SelectedMinute => &mut self.selected_minute,
            BookingField::SelectedCleaner => &mut self.selected_cleaner,
            BookingField::SelectedTimeSlot => &mut self.selected_time_slot,
            BookingField::BookingHours => &mut self.booking_hours,
            BookingField::HomeAddress => &mut self.home_address,
            BookingField::PhoneNumber => &mut self.phone_number,
            BookingField::BookingNotes => &mut self.booking_notes,
            BookingField::AllowSubstitute => &mut self.allow_substitute,
            BookingField::PaymentMethod => &mut self.payment_method,
            BookingField::CardNumber => &mut self.card_number,
            BookingField::ExpiryDate => &mut self.expiry_date,
            BookingField::Cvv => &mut self.cvv,
            BookingField::CardholderName => &mut self.cardholder_name,
            BookingField::BillingAddress => &mut self.billing_address,
            BookingField::PaymentCompleted => &mut self.payment_completed,
            BookingField::GuestName => &mut self.guest_name,
            BookingField::GuestEmail => &mut self.guest_email,
        }
    }

    /// True when the scheduled-timing answers are all present.
    pub fn scheduled_complete(&self) -> bool {
        self.timing == "scheduled"
            && !self.selected_date.is_empty()
            && !self.selected_hour.is_empty()
            && !self.selected_minute.is_empty()
    }
}

/// One past job shown on a cleaner's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub booking_id: String,
    pub date: String,
    pub cleaning_type: String,
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
}

/// A cleaner in the mock roster. Read-only data; the slot list depends on
/// the timing mode it was generated for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cleaner {
    pub id: String,
    pub name: String,
    pub rating: f64,
    pub reviews: u32,
    pub verified: bool,
    pub available_slots: Vec<String>,
    #[serde(default)]
    pub booking_history: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Pending,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn label(self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Pending => "PENDING",
            BookingStatus::Completed => "COMPLETED",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }
}

/// Immutable snapshot of a completed wizard run. Appended to the booking
/// log and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmedBooking {
    pub id: String,
    pub booking_data: BookingData,
    pub cleaner: Cleaner,
    pub confirmed_at: DateTime<Utc>,
    pub status: BookingStatus,
}

/// Profile of a signed-in user. Canned data; there is no real identity
/// system behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub default_address: String,
    pub member_since: String,
    pub last_login_at: DateTime<Utc>,
}

impl UserProfile {
    /// The canned account every successful mock login resolves to, with
    /// the attempted email substituted in.
    pub fn dummy(email: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: "1".to_string(),
            name: "John Doe".to_string(),
            email: email.to_string(),
            phone_number: "(555) 123-4567".to_string(),
            default_address: "123 Main St, New York, NY 10001".to_string(),
            member_since: "2024-01-15".to_string(),
            last_login_at: now,
        }
    }
}

/// Contact details captured for a guest checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestProfile {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}
