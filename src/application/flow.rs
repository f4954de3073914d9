//! Booking flow controller: the single source of truth for the wizard
//! position, the collected answers, and the confirmed-booking log.
//!
//! Side effects stay at the edges. Randomness and the current date are
//! passed into [`BookingFlow::next`], and persistence goes through an
//! explicit repository handle.

use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use tracing::{info, warn};

use crate::domain::cleaners::roster;
use crate::domain::models::{
    BookingData, BookingField, BookingStatus, Cleaner, ConfirmedBooking,
};
use crate::domain::navigation::{back_target, policy, Step};
use crate::infrastructure::persistence::BookingRepository;

/// Flat rate per hour of cleaning, in cents.
pub const HOURLY_RATE_CENTS: u64 = 3500;
/// Sales tax applied at payment time.
pub const TAX_RATE: f64 = 0.08;
/// Trust and support fee shown on the receipt.
pub const TRUST_FEE_RATE: f64 = 0.075;

fn booked_hours(data: &BookingData) -> u64 {
    data.booking_hours.parse().unwrap_or(2)
}

/// Hours times the hourly rate.
pub fn base_cost_cents(data: &BookingData) -> u64 {
    booked_hours(data) * HOURLY_RATE_CENTS
}

pub fn tax_cents(base_cents: u64) -> u64 {
    (base_cents as f64 * TAX_RATE).round() as u64
}

/// What the payment step charges: base plus tax.
pub fn payment_total_cents(data: &BookingData) -> u64 {
    let base = base_cost_cents(data);
    base + tax_cents(base)
}

pub fn trust_fee_cents(base_cents: u64) -> u64 {
    (base_cents as f64 * TRUST_FEE_RATE).round() as u64
}

/// What the receipt tab totals: base plus the trust and support fee.
pub fn receipt_total_cents(data: &BookingData) -> u64 {
    let base = base_cost_cents(data);
    base + trust_fee_cents(base)
}

pub fn format_usd(cents: u64) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

/// What pressing Next did, and what the caller still has to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextOutcome {
    /// Nothing changed: Next was disabled, or the step resolves its
    /// selection outside the flow.
    Stayed,
    /// Moved to another step.
    Moved,
    /// The payment step wants a charge. The caller runs the gateway and,
    /// on success, calls [`BookingFlow::complete_payment`].
    ChargeRequested,
    /// The pending step wants confirmation via
    /// [`BookingFlow::confirm_pending`].
    ConfirmRequested,
    /// Done was pressed on the confirmation step; the wizard reset.
    Finished,
}

#[derive(Debug, Clone)]
pub struct BookingFlow {
    pub step: Step,
    pub data: BookingData,
    pub confirmed: Vec<ConfirmedBooking>,
}

impl Default for BookingFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingFlow {
    pub fn new() -> Self {
        Self {
            step: Step::ZipCode,
            data: BookingData::default(),
            confirmed: Vec::new(),
        }
    }

    /// Writes one field. No cross-field validation happens here, with one
    /// exception: deep cleans need at least three hours, so switching the
    /// cleaning type adjusts the hours when the user has not gone past
    /// the derived value.
    pub fn update_field(&mut self, field: BookingField, value: impl Into<String>) {
        let value = value.into();
        if field == BookingField::CleaningType {
            let previous = self.data.cleaning_type.clone();
            if value == "deep" && booked_hours(&self.data) < 3 {
                self.data.booking_hours = "3".to_string();
            } else if value == "routine" && previous == "deep" && self.data.booking_hours == "3" {
                self.data.booking_hours = "2".to_string();
            }
        }
        self.data.set(field, value);
    }

    /// Moves one step forward in the visit order, ignoring branch rules.
    /// No-op at the last step.
    pub fn advance(&mut self) {
        if let Some(next) = self.step.succ() {
            self.step = next;
        }
    }

    /// Moves one step backward in the visit order, ignoring branch rules.
    /// No-op at the first step.
    pub fn retreat(&mut self) {
        if let Some(prev) = self.step.pred() {
            self.step = prev;
        }
    }

    pub fn jump_to(&mut self, step: Step) {
        self.step = step;
    }

    /// Applies the Next action for the current step, including the timing
    /// branch: a completed schedule auto-assigns a random available
    /// cleaner and skips straight to the contact step, while ASAP sends
    /// the user to browse cleaners themselves.
    pub fn next(&mut self, rng: &mut impl Rng, today: NaiveDate) -> NextOutcome {
        if !policy(self.step, &self.data).next_enabled {
            return NextOutcome::Stayed;
        }
        match self.step {
            Step::Timing => {
                if self.data.timing == "asap" {
                    self.data.selected_cleaner.clear();
                    self.data.selected_time_slot.clear();
                    self.jump_to(Step::CleanerBrowse);
                } else {
                    self.auto_assign_cleaner(rng, today);
                    self.jump_to(Step::Contact);
                }
                NextOutcome::Moved
            }
            Step::CleanerBrowse | Step::CleanerProfile => {
                // The caller owns the highlighted cleaner and slot; it
                // jumps the flow itself once a slot is booked.
                NextOutcome::Stayed
            }
            Step::Payment => NextOutcome::ChargeRequested,
            Step::Pending => NextOutcome::ConfirmRequested,
            Step::Confirmed => {
                self.finish();
                NextOutcome::Finished
            }
            _ => {
                self.advance();
                NextOutcome::Moved
            }
        }
    }

    /// Applies the Back action for the current step. No-op where Back is
    /// unavailable.
    pub fn back(&mut self) {
        if let Some(target) = back_target(self.step, &self.data) {
            self.jump_to(target);
        }
    }

    fn auto_assign_cleaner(&mut self, rng: &mut impl Rng, today: NaiveDate) {
        let candidates: Vec<Cleaner> = roster("scheduled", &self.data, today)
            .into_iter()
            .filter(|c| !c.available_slots.is_empty())
            .collect();
        if candidates.is_empty() {
            return;
        }
        let pick = &candidates[rng.gen_range(0..candidates.len())];
        self.data.selected_cleaner = pick.id.clone();
        self.data.selected_time_slot = pick.available_slots[0].clone();
        info!(cleaner = %pick.name, slot = %self.data.selected_time_slot, "auto-assigned cleaner");
    }

    /// Records a successful charge: marks payment complete, appends the
    /// booking, and moves to the pending or confirmed step. An ASAP
    /// booking that refuses substitutes waits for dispatch confirmation;
    /// everything else confirms immediately.
    pub fn complete_payment(
        &mut self,
        cleaner: Cleaner,
        now: DateTime<Utc>,
        repo: &BookingRepository,
    ) -> String {
        self.data.payment_completed = "true".to_string();
        let needs_dispatch =
            self.data.timing == "asap" && self.data.allow_substitute == "false";
        let status = if needs_dispatch {
            BookingStatus::Pending
        } else {
            BookingStatus::Confirmed
        };

        let booking = ConfirmedBooking {
            id: now.timestamp_millis().to_string(),
            booking_data: self.data.clone(),
            cleaner,
            confirmed_at: now,
            status,
        };
        let id = booking.id.clone();
        self.confirmed.push(booking);
        self.persist(repo);
        self.jump_to(if needs_dispatch { Step::Pending } else { Step::Confirmed });
        id
    }

    /// Confirms the booking that is waiting for dispatch and moves to the
    /// confirmation step.
    pub fn confirm_pending(&mut self, repo: &BookingRepository) {
        if let Some(booking) = self
            .confirmed
            .iter_mut()
            .rev()
            .find(|b| b.status == BookingStatus::Pending)
        {
            booking.status = BookingStatus::Confirmed;
            self.persist(repo);
        }
        self.jump_to(Step::Confirmed);
    }

    /// Resets the wizard for the next booking. The confirmed log is kept.
    pub fn finish(&mut self) {
        self.data = BookingData::default();
        self.step = Step::ZipCode;
    }

    pub fn load_confirmed_bookings(&mut self, repo: &BookingRepository) {
        self.confirmed = repo.load();
    }

    fn persist(&self, repo: &BookingRepository) {
        // Best effort: the in-memory log is already updated.
        if let Err(e) = repo.save(&self.confirmed) {
            warn!(error = %e, "failed to persist booking log");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::KeyValueStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 29).unwrap()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn repo_in(dir: &tempfile::TempDir) -> BookingRepository {
        BookingRepository::new(KeyValueStore::new(dir.path()))
    }

    fn sample_cleaner() -> Cleaner {
        Cleaner {
            id: "1".to_string(),
            name: "Sarah Johnson".to_string(),
            rating: 4.9,
            reviews: 127,
            verified: true,
            available_slots: vec!["Today 2:00 PM".to_string()],
            booking_history: Vec::new(),
        }
    }

    #[test]
    fn test_update_field_is_idempotent() {
        let mut a = BookingFlow::new();
        let mut b = BookingFlow::new();
        a.update_field(BookingField::ZipCode, "10001");
        b.update_field(BookingField::ZipCode, "10001");
        b.update_field(BookingField::ZipCode, "10001");
        assert_eq!(a.data, b.data);

        a.update_field(BookingField::CleaningType, "deep");
        b.update_field(BookingField::CleaningType, "deep");
        b.update_field(BookingField::CleaningType, "deep");
        assert_eq!(a.data, b.data);

        a.update_field(BookingField::CleaningType, "routine");
        b.update_field(BookingField::CleaningType, "routine");
        b.update_field(BookingField::CleaningType, "routine");
        assert_eq!(a.data, b.data);
    }

    #[test]
    fn test_deep_clean_raises_hours_to_three() {
        let mut flow = BookingFlow::new();
        assert_eq!(flow.data.booking_hours, "2");
        flow.update_field(BookingField::CleaningType, "deep");
        assert_eq!(flow.data.booking_hours, "3");
    }

    #[test]
    fn test_deep_clean_keeps_higher_hours() {
        let mut flow = BookingFlow::new();
        flow.update_field(BookingField::BookingHours, "5");
        flow.update_field(BookingField::CleaningType, "deep");
        assert_eq!(flow.data.booking_hours, "5");
    }

    #[test]
    fn test_routine_lowers_only_the_derived_three() {
        let mut flow = BookingFlow::new();
        flow.update_field(BookingField::CleaningType, "deep");
        flow.update_field(BookingField::CleaningType, "routine");
        assert_eq!(flow.data.booking_hours, "2");

        // A hand-picked 4 survives the switch back
        flow.update_field(BookingField::CleaningType, "deep");
        flow.update_field(BookingField::BookingHours, "4");
        flow.update_field(BookingField::CleaningType, "routine");
        assert_eq!(flow.data.booking_hours, "4");
    }

    fn filled_through_timing(timing: &str) -> BookingFlow {
        let mut flow = BookingFlow::new();
        flow.update_field(BookingField::ZipCode, "10001");
        flow.update_field(BookingField::Neighborhood, "Chelsea, New York, NY");
        flow.update_field(BookingField::CleaningType, "deep");
        flow.update_field(BookingField::SquareFootage, "Under 3,000 sq ft");
        flow.update_field(BookingField::Timing, timing);
        if timing == "scheduled" {
            flow.update_field(BookingField::SelectedDate, "2026-08-29");
            flow.update_field(BookingField::SelectedHour, "14");
            flow.update_field(BookingField::SelectedMinute, "0");
        }
        flow.jump_to(Step::Timing);
        flow
    }

    #[test]
    fn test_scheduled_next_auto_assigns_and_skips_browse() {
        let mut flow = filled_through_timing("scheduled");
        assert_eq!(flow.next(&mut rng(), today()), NextOutcome::Moved);
        assert_eq!(flow.step, Step::Contact);
        assert!(!flow.data.selected_cleaner.is_empty());
        // First slot is always the exact selection
        assert_eq!(flow.data.selected_time_slot, "Today 2:00 PM");
    }

    #[test]
    fn test_asap_next_goes_to_browse_with_cleaner_unset() {
        let mut flow = filled_through_timing("asap");
        assert_eq!(flow.next(&mut rng(), today()), NextOutcome::Moved);
        assert_eq!(flow.step, Step::CleanerBrowse);
        assert!(flow.data.selected_cleaner.is_empty());
        assert!(flow.data.selected_time_slot.is_empty());
    }

    #[test]
    fn test_next_on_cleaner_steps_never_skips_slot_selection() {
        let mut flow = filled_through_timing("asap");
        flow.next(&mut rng(), today());
        assert_eq!(flow.step, Step::CleanerBrowse);

        // Contact is only reachable once a slot has been booked
        assert_eq!(flow.next(&mut rng(), today()), NextOutcome::Stayed);
        assert_eq!(flow.step, Step::CleanerBrowse);

        flow.jump_to(Step::CleanerProfile);
        assert_eq!(flow.next(&mut rng(), today()), NextOutcome::Stayed);
        assert_eq!(flow.step, Step::CleanerProfile);
        assert!(flow.data.selected_time_slot.is_empty());
    }

    #[test]
    fn test_next_stays_when_disabled() {
        let mut flow = BookingFlow::new();
        assert_eq!(flow.next(&mut rng(), today()), NextOutcome::Stayed);
        assert_eq!(flow.step, Step::ZipCode);
    }

    #[test]
    fn test_payment_outcome_branches_on_substitute_preference() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo_in(&dir);

        let mut flow = filled_through_timing("asap");
        flow.update_field(BookingField::AllowSubstitute, "false");
        flow.jump_to(Step::Payment);
        flow.complete_payment(sample_cleaner(), Utc::now(), &repo);
        assert_eq!(flow.step, Step::Pending);
        assert_eq!(flow.confirmed.last().map(|b| b.status), Some(BookingStatus::Pending));

        let mut flow = filled_through_timing("asap");
        flow.jump_to(Step::Payment);
        flow.complete_payment(sample_cleaner(), Utc::now(), &repo);
        assert_eq!(flow.step, Step::Confirmed);
        assert_eq!(
            flow.confirmed.last().map(|b| b.status),
            Some(BookingStatus::Confirmed)
        );
        assert_eq!(flow.data.payment_completed, "true");
    }

    #[test]
    fn test_confirm_pending_flips_status() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo_in(&dir);

        let mut flow = filled_through_timing("asap");
        flow.update_field(BookingField::AllowSubstitute, "false");
        flow.jump_to(Step::Payment);
        flow.complete_payment(sample_cleaner(), Utc::now(), &repo);

        flow.confirm_pending(&repo);
        assert_eq!(flow.step, Step::Confirmed);
        assert_eq!(
            flow.confirmed.last().map(|b| b.status),
            Some(BookingStatus::Confirmed)
        );

        // And the persisted log agrees
        let mut fresh = BookingFlow::new();
        fresh.load_confirmed_bookings(&repo);
        assert_eq!(fresh.confirmed, flow.confirmed);
    }

    #[test]
    fn test_finish_resets_wizard_but_keeps_log() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo_in(&dir);

        let mut flow = filled_through_timing("asap");
        flow.jump_to(Step::Payment);
        flow.complete_payment(sample_cleaner(), Utc::now(), &repo);
        assert_eq!(flow.next(&mut rng(), today()), NextOutcome::Finished);

        assert_eq!(flow.step, Step::ZipCode);
        assert_eq!(flow.data, BookingData::default());
        assert_eq!(flow.confirmed.len(), 1);
    }

    #[test]
    fn test_payment_persist_failure_keeps_memory_state() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();
        // Root is a regular file, so every save fails
        let repo = BookingRepository::new(KeyValueStore::new(&blocker));

        let mut flow = filled_through_timing("asap");
        flow.jump_to(Step::Payment);
        flow.complete_payment(sample_cleaner(), Utc::now(), &repo);
        assert_eq!(flow.confirmed.len(), 1);
        assert_eq!(flow.step, Step::Confirmed);
    }

    #[test]
    fn test_pricing_constants() {
        let mut data = BookingData::default();
        data.booking_hours = "3".to_string();
        let base = base_cost_cents(&data);
        assert_eq!(base, 10500);
        assert_eq!(tax_cents(base), 840);
        assert_eq!(payment_total_cents(&data), 11340);
        assert_eq!(trust_fee_cents(base), 788);
        assert_eq!(receipt_total_cents(&data), 11288);
        assert_eq!(format_usd(11340), "$113.40");
        assert_eq!(format_usd(5), "$0.05");
    }
}
