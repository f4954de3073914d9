//! Wizard step machine and per-step navigation policy.
//!
//! Steps are named states, not raw indices. Conditional branches (the
//! timing split and the payment outcome) are decided by the flow
//! controller; this module only answers what each step allows.

use crate::domain::models::BookingData;
use crate::domain::validation::{is_valid_address, is_valid_phone_number, is_valid_zip_code};

/// One screen of the booking wizard, in visit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    ZipCode,
    CleaningType,
    SpaceSize,
    Timing,
    CleanerBrowse,
    CleanerProfile,
    Contact,
    Payment,
    Pending,
    Confirmed,
}

impl Step {
    pub const ALL: [Step; 10] = [
        Step::ZipCode,
        Step::CleaningType,
        Step::SpaceSize,
        Step::Timing,
        Step::CleanerBrowse,
        Step::CleanerProfile,
        Step::Contact,
        Step::Payment,
        Step::Pending,
        Step::Confirmed,
    ];

    /// One-based position shown in the progress header.
    pub fn position(self) -> usize {
        Step::ALL.iter().position(|s| *s == self).map_or(1, |i| i + 1)
    }

    pub fn from_position(position: usize) -> Option<Step> {
        if (1..=Step::ALL.len()).contains(&position) {
            Some(Step::ALL[position - 1])
        } else {
            None
        }
    }

    /// The step one position later, ignoring branch rules.
    pub fn succ(self) -> Option<Step> {
        Step::from_position(self.position() + 1)
    }

    /// The step one position earlier, ignoring branch rules.
    pub fn pred(self) -> Option<Step> {
        self.position().checked_sub(1).and_then(Step::from_position)
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::ZipCode => "Where do you need cleaning?",
            Step::CleaningType => "What kind of clean?",
            Step::SpaceSize => "Tell us about your space",
            Step::Timing => "When should we come?",
            Step::CleanerBrowse => "Choose your cleaner",
            Step::CleanerProfile => "Cleaner profile",
            Step::Contact => "Booking details",
            Step::Payment => "Payment",
            Step::Pending => "Reservation pending",
            Step::Confirmed => "Booking confirmed",
        }
    }
}

/// What the footer of a wizard step offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavPolicy {
    pub show_back: bool,
    pub show_next: bool,
    pub next_label: &'static str,
    pub next_enabled: bool,
}

fn card_fields_complete(data: &BookingData) -> bool {
    !data.card_number.is_empty()
        && !data.expiry_date.is_empty()
        && !data.cvv.is_empty()
        && !data.cardholder_name.is_empty()
        && !data.billing_address.is_empty()
}

/// Computes the navigation affordances for a step given the answers so
/// far. Pure; the caller decides what pressing Next actually does.
pub fn policy(step: Step, data: &BookingData) -> NavPolicy {
    match step {
        Step::ZipCode => NavPolicy {
            show_back: false,
            show_next: true,
            next_label: "Next",
            next_enabled: is_valid_zip_code(&data.zip_code) && !data.neighborhood.is_empty(),
        },
        Step::CleaningType => NavPolicy {
            show_back: true,
            show_next: true,
            next_label: "Next",
            next_enabled: !data.cleaning_type.is_empty(),
        },
        Step::SpaceSize => NavPolicy {
            show_back: true,
            show_next: true,
            next_label: "Next",
            next_enabled: !data.bedrooms.is_empty()
                && !data.bathrooms.is_empty()
                && !data.square_footage.is_empty(),
        },
        Step::Timing => NavPolicy {
            show_back: true,
            show_next: true,
            next_label: "Next",
            next_enabled: data.timing == "asap" || data.scheduled_complete(),
        },
        Step::CleanerBrowse => NavPolicy {
            show_back: true,
            show_next: true,
            next_label: "View Profile",
            next_enabled: true,
        },
        Step::CleanerProfile => NavPolicy {
            show_back: true,
            show_next: true,
            next_label: "Book Now",
            next_enabled: true,
        },
        Step::Contact => NavPolicy {
            show_back: true,
            show_next: true,
            next_label: "Continue to Payment",
            next_enabled: is_valid_address(&data.home_address)
                && is_valid_phone_number(&data.phone_number),
        },
        Step::Payment => NavPolicy {
            show_back: true,
            show_next: true,
            next_label: "Pay Now",
            next_enabled: match data.payment_method.as_str() {
                "card" => card_fields_complete(data),
                "" => false,
                _ => true,
            },
        },
        Step::Pending => NavPolicy {
            show_back: false,
            show_next: true,
            next_label: "Confirm Reservation",
            next_enabled: true,
        },
        Step::Confirmed => NavPolicy {
            show_back: false,
            show_next: true,
            next_label: "Done",
            next_enabled: true,
        },
    }
}

/// Where Back goes from a step, or `None` when Back is unavailable.
/// Contact branches on the timing mode; the scheduled flow never visited
/// the cleaner screens.
pub fn back_target(step: Step, data: &BookingData) -> Option<Step> {
    match step {
        Step::ZipCode | Step::Pending | Step::Confirmed => None,
        Step::CleanerBrowse => Some(Step::Timing),
        Step::CleanerProfile => Some(Step::CleanerBrowse),
        Step::Contact => {
            if data.timing == "scheduled" {
                Some(Step::Timing)
            } else {
                Some(Step::CleanerBrowse)
            }
        }
        Step::Payment => Some(Step::Contact),
        other => other.pred(),
    }
}
