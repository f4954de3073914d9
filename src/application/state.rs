//! Main application state: the booking flow, the session, the booking
//! list and detail views, and the handles to the mocked services.
//!
//! This structure holds all the data needed to render the terminal UI
//! and react to user input.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Local, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::application::flow::{payment_total_cents, BookingFlow, NextOutcome};
use crate::application::session::Session;
use crate::domain::cleaners::roster;
use crate::domain::models::{BookingField, Cleaner, ConfirmedBooking};
use crate::domain::navigation::{policy, Step};
use crate::domain::validation::payment_info_error;
use crate::infrastructure::persistence::{BookingRepository, KeyValueStore, SessionStore};
use crate::infrastructure::services::{
    AreaLookup, AuthBackend, MockAreaLookup, MockAuthBackend, MockPaymentGateway, PaymentGateway,
};

/// Which screen currently owns the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// The booking wizard
    Book,
    /// The list of confirmed bookings
    Bookings,
    /// One confirmed booking, with receipt / task info / chat tabs
    BookingDetail,
    /// The sign-in-or-guest modal shown before payment
    CheckoutAuth,
    /// Help screen is displayed
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailTab {
    Receipt,
    TaskInfo,
    Chat,
}

impl DetailTab {
    pub const ALL: [DetailTab; 3] = [DetailTab::Receipt, DetailTab::TaskInfo, DetailTab::Chat];

    pub fn title(self) -> &'static str {
        match self {
            DetailTab::Receipt => "Receipt",
            DetailTab::TaskInfo => "Task Info",
            DetailTab::Chat => "Chat",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatSender {
    Customer,
    Cleaner,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub sender: ChatSender,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

/// Which half of the checkout modal is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckoutTab {
    #[default]
    Login,
    Guest,
}

/// Input state of the sign-in-or-guest modal.
#[derive(Debug, Clone, Default)]
pub struct CheckoutForm {
    pub tab: CheckoutTab,
    pub email: String,
    pub password: String,
    pub guest_name: String,
    pub guest_email: String,
    pub focus: usize,
    pub error: Option<String>,
}

pub struct App {
    /// Wizard position, answers, and the confirmed-booking log
    pub flow: BookingFlow,
    /// Who is checking out
    pub session: Session,
    /// Current application mode
    pub mode: AppMode,
    /// Focused field index on form steps, cycled with Tab
    pub focus: usize,
    /// Selection in the cleaner browse list
    pub browse_index: usize,
    /// Selected slot on the cleaner profile
    pub slot_index: usize,
    /// Selection in the bookings list
    pub bookings_index: usize,
    /// Id of the booking open in the detail view
    pub open_booking: Option<String>,
    pub detail_tab: DetailTab,
    /// Chat transcripts keyed by booking id
    pub chat_threads: HashMap<String, Vec<ChatMessage>>,
    /// Draft message in the chat tab
    pub chat_input: String,
    pub checkout: CheckoutForm,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Blocking alert from a failed service call
    pub alert: Option<String>,
    pub help_scroll: usize,
    pub should_quit: bool,

    pub bookings_repo: BookingRepository,
    pub session_store: SessionStore,
    auth: Box<dyn AuthBackend>,
    payment: Box<dyn PaymentGateway>,
    area: Box<dyn AreaLookup>,
    rng: StdRng,
}

impl App {
    /// Builds the app over a data directory, restoring the booking log
    /// and any saved session.
    pub fn new(store: KeyValueStore) -> Self {
        Self::with_services(
            store,
            Box::new(MockAuthBackend::new()),
            Box::new(MockPaymentGateway::new()),
            Box::new(MockAreaLookup::new()),
            StdRng::from_entropy(),
        )
    }

    pub fn with_services(
        store: KeyValueStore,
        auth: Box<dyn AuthBackend>,
        payment: Box<dyn PaymentGateway>,
        area: Box<dyn AreaLookup>,
        rng: StdRng,
    ) -> Self {
        let bookings_repo = BookingRepository::new(store.clone());
        let session_store = SessionStore::new(store);
        let mut flow = BookingFlow::new();
        flow.load_confirmed_bookings(&bookings_repo);
        let session = Session::restore(&session_store);
        Self {
            flow,
            session,
            mode: AppMode::Book,
            focus: 0,
            browse_index: 0,
            slot_index: 0,
            bookings_index: 0,
            open_booking: None,
            detail_tab: DetailTab::Receipt,
            chat_threads: HashMap::new(),
            chat_input: String::new(),
            checkout: CheckoutForm::default(),
            status_message: None,
            alert: None,
            help_scroll: 0,
            should_quit: false,
            bookings_repo,
            session_store,
            auth,
            payment,
            area,
            rng,
        }
    }

    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// The roster for the current answers and timing mode.
    pub fn cleaners(&self) -> Vec<Cleaner> {
        roster(&self.flow.data.timing, &self.flow.data, self.today())
    }

    /// The cleaner the wizard has settled on, if any.
    pub fn selected_cleaner(&self) -> Option<Cleaner> {
        let id = &self.flow.data.selected_cleaner;
        if id.is_empty() {
            return None;
        }
        self.cleaners().into_iter().find(|c| &c.id == id)
    }

    /// Writes one wizard field through the flow controller.
    pub fn update_field(&mut self, field: BookingField, value: impl Into<String>) {
        self.flow.update_field(field, value);
        if field == BookingField::ZipCode {
            self.resolve_area();
        }
    }

    /// Re-resolves the neighborhood from the current zip. Called after
    /// every zip edit; an unserviced or incomplete zip clears it.
    fn resolve_area(&mut self) {
        let found = self.area.lookup(&self.flow.data.zip_code);
        self.flow.data.neighborhood = found.unwrap_or_default().to_string();
    }

    /// Applies Next on the wizard, routing through the checkout gate and
    /// the mocked payment gateway where the flow asks for them.
    pub fn press_next(&mut self) {
        if self.step() == Step::Contact
            && policy(Step::Contact, &self.flow.data).next_enabled
            && self.session.is_anonymous()
        {
            self.checkout = CheckoutForm::default();
            self.mode = AppMode::CheckoutAuth;
            return;
        }

        let today = self.today();
        match self.flow.next(&mut self.rng, today) {
            NextOutcome::ChargeRequested => self.charge(),
            NextOutcome::ConfirmRequested => {
                self.flow.confirm_pending(&self.bookings_repo);
                self.set_status("Reservation confirmed");
            }
            NextOutcome::Finished => {
                self.focus = 0;
                self.browse_index = 0;
                self.slot_index = 0;
                self.set_status("Ready for your next booking");
            }
            NextOutcome::Moved => {
                self.focus = 0;
            }
            NextOutcome::Stayed => {}
        }
    }

    pub fn press_back(&mut self) {
        self.flow.back();
        self.focus = 0;
    }

    pub fn step(&self) -> Step {
        self.flow.step
    }

    fn charge(&mut self) {
        if let Some(message) = payment_info_error(&self.flow.data, self.today()) {
            self.alert = Some(message.to_string());
            return;
        }
        let Some(cleaner) = self.selected_cleaner() else {
            self.alert = Some("Please select a cleaner before paying.".to_string());
            return;
        };
        let amount = payment_total_cents(&self.flow.data);
        match self.payment.charge(&self.flow.data, amount) {
            Ok(receipt_id) => {
                info!(receipt_id, "payment accepted");
                let id =
                    self.flow
                        .complete_payment(cleaner.clone(), Utc::now(), &self.bookings_repo);
                self.seed_chat(&id, &cleaner);
                self.set_status(format!("Payment accepted ({})", receipt_id));
            }
            Err(e) => {
                self.alert = Some(e.to_string());
            }
        }
    }

    /// Picks a cleaner in the browse list and moves to their profile.
    pub fn view_cleaner_profile(&mut self) {
        let cleaners = self.cleaners();
        if let Some(cleaner) = cleaners.get(self.browse_index) {
            self.update_field(BookingField::SelectedCleaner, cleaner.id.clone());
            self.slot_index = 0;
            self.flow.jump_to(Step::CleanerProfile);
        }
    }

    /// Books the profiled cleaner at the highlighted slot.
    pub fn book_from_profile(&mut self) {
        let Some(cleaner) = self.selected_cleaner() else {
            return;
        };
        if let Some(slot) = cleaner.available_slots.get(self.slot_index) {
            self.update_field(BookingField::SelectedTimeSlot, slot.clone());
            self.flow.jump_to(Step::Contact);
            self.focus = 0;
        }
    }

    /// Attempts sign-in with the modal's credentials. On success the
    /// wizard continues to payment.
    pub fn submit_checkout_login(&mut self) {
        match Session::login(
            self.auth.as_ref(),
            &self.session_store,
            &self.checkout.email,
            &self.checkout.password,
        ) {
            Ok(session) => {
                self.session = session;
                self.finish_checkout_gate();
            }
            Err(e) => self.checkout.error = Some(e.to_string()),
        }
    }

    /// Continues as guest with the modal's contact details. On success
    /// the wizard continues to payment.
    pub fn submit_checkout_guest(&mut self) {
        let name = self.checkout.guest_name.trim().to_string();
        let email = self.checkout.guest_email.trim().to_string();
        if name.is_empty() || email.is_empty() {
            self.checkout.error = Some("Please enter your name and email".to_string());
            return;
        }
        self.session = Session::continue_as_guest(&self.session_store, &name, &email);
        self.flow.data.guest_name = name;
        self.flow.data.guest_email = email;
        self.finish_checkout_gate();
    }

    fn finish_checkout_gate(&mut self) {
        self.mode = AppMode::Book;
        self.checkout = CheckoutForm::default();
        self.flow.jump_to(Step::Payment);
        self.focus = 0;
    }

    pub fn cancel_checkout(&mut self) {
        self.mode = AppMode::Book;
        self.checkout = CheckoutForm::default();
    }

    pub fn logout(&mut self) {
        self.session = Session::logout(&self.session_store);
        self.set_status("Signed out");
    }

    pub fn open_bookings(&mut self) {
        self.bookings_index = 0;
        self.mode = AppMode::Bookings;
    }

    /// Opens the highlighted booking in the detail view, seeding its chat
    /// thread on first open.
    pub fn open_booking_detail(&mut self) {
        let Some(booking) = self.flow.confirmed.get(self.bookings_index) else {
            return;
        };
        let id = booking.id.clone();
        let cleaner = booking.cleaner.clone();
        self.seed_chat(&id, &cleaner);
        self.open_booking = Some(id);
        self.detail_tab = DetailTab::Receipt;
        self.chat_input.clear();
        self.mode = AppMode::BookingDetail;
    }

    pub fn current_booking(&self) -> Option<&ConfirmedBooking> {
        let id = self.open_booking.as_ref()?;
        self.flow.confirmed.iter().find(|b| &b.id == id)
    }

    fn seed_chat(&mut self, booking_id: &str, cleaner: &Cleaner) {
        if self.chat_threads.contains_key(booking_id) {
            return;
        }
        let base = Utc::now();
        let first = cleaner.name.split_whitespace().next().unwrap_or(&cleaner.name);
        self.chat_threads.insert(
            booking_id.to_string(),
            vec![
                ChatMessage {
                    sender: ChatSender::Cleaner,
                    text: format!(
                        "Hi! This is {}. I have your booking and I'm looking forward to it.",
                        first
                    ),
                    sent_at: base,
                },
                ChatMessage {
                    sender: ChatSender::Cleaner,
                    text: "Let me know if there's anything I should know about \
                           your place before I arrive."
                        .to_string(),
                    sent_at: base + Duration::minutes(1),
                },
            ],
        );
    }

    /// Appends the draft message to the open booking's chat thread.
    pub fn send_chat_message(&mut self) {
        let text = self.chat_input.trim().to_string();
        if text.is_empty() {
            return;
        }
        let Some(id) = self.open_booking.clone() else {
            return;
        };
        self.chat_threads.entry(id).or_default().push(ChatMessage {
            sender: ChatSender::Customer,
            text,
            sent_at: Utc::now(),
        });
        self.chat_input.clear();
    }

    pub fn chat_for_open_booking(&self) -> &[ChatMessage] {
        self.open_booking
            .as_ref()
            .and_then(|id| self.chat_threads.get(id))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::BookingStatus;
    use std::time::Duration as StdDuration;

    fn test_app(dir: &tempfile::TempDir) -> App {
        App::with_services(
            KeyValueStore::new(dir.path()),
            Box::new(MockAuthBackend::with_latency(StdDuration::ZERO)),
            Box::new(MockPaymentGateway::with_latency(StdDuration::ZERO)),
            Box::new(MockAreaLookup::with_latency(StdDuration::ZERO)),
            StdRng::seed_from_u64(7),
        )
    }

    fn fill_asap_through_contact(app: &mut App) {
        app.update_field(BookingField::ZipCode, "10001");
        app.press_next();
        app.update_field(BookingField::CleaningType, "deep");
        app.press_next();
        app.update_field(BookingField::SquareFootage, "Under 3,000 sq ft");
        app.press_next();
        app.update_field(BookingField::Timing, "asap");
        app.press_next();
        app.view_cleaner_profile();
        app.book_from_profile();
        app.update_field(BookingField::HomeAddress, "123 Main Street, Apt 4");
        app.update_field(BookingField::PhoneNumber, "(555) 123-4567");
    }

    #[test]
    fn test_zip_entry_resolves_neighborhood() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        app.update_field(BookingField::ZipCode, "10001");
        assert_eq!(app.flow.data.neighborhood, "Chelsea, New York, NY");

        app.update_field(BookingField::ZipCode, "1000");
        assert!(app.flow.data.neighborhood.is_empty());
    }

    #[test]
    fn test_asap_walkthrough_reaches_browse_with_five_cleaners() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        app.update_field(BookingField::ZipCode, "10001");
        app.press_next();
        assert_eq!(app.step(), Step::CleaningType);
        app.update_field(BookingField::CleaningType, "deep");
        assert_eq!(app.flow.data.booking_hours, "3");
        app.press_next();
        app.update_field(BookingField::SquareFootage, "Under 3,000 sq ft");
        app.press_next();
        app.update_field(BookingField::Timing, "asap");
        app.press_next();

        assert_eq!(app.step(), Step::CleanerBrowse);
        let cleaners = app.cleaners();
        assert_eq!(cleaners.len(), 5);
        assert_eq!(cleaners[0].available_slots[0], "Today 2:00 PM");
    }

    #[test]
    fn test_anonymous_contact_next_opens_checkout_gate() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        fill_asap_through_contact(&mut app);
        assert_eq!(app.step(), Step::Contact);

        app.press_next();
        assert_eq!(app.mode, AppMode::CheckoutAuth);
        // Still on the contact step underneath the modal
        assert_eq!(app.step(), Step::Contact);
    }

    #[test]
    fn test_guest_checkout_continues_to_payment() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        fill_asap_through_contact(&mut app);
        app.press_next();

        app.checkout.guest_name = "Pat Guest".to_string();
        app.checkout.guest_email = "pat@example.com".to_string();
        app.submit_checkout_guest();

        assert_eq!(app.mode, AppMode::Book);
        assert_eq!(app.step(), Step::Payment);
        assert_eq!(app.flow.data.guest_name, "Pat Guest");
        assert!(!app.session.is_anonymous());
    }

    #[test]
    fn test_login_gate_rejects_empty_then_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        fill_asap_through_contact(&mut app);
        app.press_next();

        app.submit_checkout_login();
        assert!(app.checkout.error.is_some());
        assert_eq!(app.mode, AppMode::CheckoutAuth);

        app.checkout.email = "jane@example.com".to_string();
        app.checkout.password = "secret".to_string();
        app.submit_checkout_login();
        assert_eq!(app.step(), Step::Payment);
        assert_eq!(app.session.display_name(), Some("John Doe"));
    }

    #[test]
    fn test_payment_success_confirms_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        fill_asap_through_contact(&mut app);
        app.press_next();
        app.checkout.guest_name = "Pat Guest".to_string();
        app.checkout.guest_email = "pat@example.com".to_string();
        app.submit_checkout_guest();

        app.update_field(BookingField::PaymentMethod, "card");
        app.update_field(BookingField::CardNumber, "4111 1111 1111 1111");
        app.update_field(BookingField::ExpiryDate, "12/29");
        app.update_field(BookingField::Cvv, "123");
        app.update_field(BookingField::CardholderName, "Pat Guest");
        app.update_field(BookingField::BillingAddress, "123 Main Street, Apt 4");
        app.press_next();

        assert_eq!(app.step(), Step::Confirmed);
        assert_eq!(app.flow.confirmed.len(), 1);
        assert_eq!(app.flow.confirmed[0].status, BookingStatus::Confirmed);
        // Chat thread was seeded at confirmation time
        let id = app.flow.confirmed[0].id.clone();
        assert!(!app.chat_threads[&id].is_empty());

        // A second app over the same directory sees the booking
        let app2 = test_app(&dir);
        assert_eq!(app2.flow.confirmed.len(), 1);
    }

    #[test]
    fn test_bad_card_details_block_payment() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        fill_asap_through_contact(&mut app);
        app.press_next();
        app.checkout.guest_name = "Pat Guest".to_string();
        app.checkout.guest_email = "pat@example.com".to_string();
        app.submit_checkout_guest();

        // Twelve digits is one short of a real card number
        app.update_field(BookingField::PaymentMethod, "card");
        app.update_field(BookingField::CardNumber, "4111 1111 1111");
        app.update_field(BookingField::ExpiryDate, "01/20");
        app.update_field(BookingField::Cvv, "123");
        app.update_field(BookingField::CardholderName, "Pat Guest");
        app.update_field(BookingField::BillingAddress, "123 Main Street, Apt 4");
        app.press_next();
        assert_eq!(app.alert.as_deref(), Some("Please enter a valid card number"));
        assert_eq!(app.step(), Step::Payment);
        assert!(app.flow.confirmed.is_empty());

        app.alert = None;
        app.update_field(BookingField::CardNumber, "4111 1111 1111 1111");
        app.press_next();
        assert_eq!(app.alert.as_deref(), Some("Card has expired"));
        assert_eq!(app.step(), Step::Payment);
        assert!(app.flow.confirmed.is_empty());

        app.alert = None;
        app.update_field(BookingField::ExpiryDate, "12/29");
        app.press_next();
        assert!(app.alert.is_none());
        assert_eq!(app.step(), Step::Confirmed);
        assert_eq!(app.flow.confirmed.len(), 1);
    }

    #[test]
    fn test_declined_card_raises_alert_and_stays() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        fill_asap_through_contact(&mut app);
        app.press_next();
        app.checkout.guest_name = "Pat Guest".to_string();
        app.checkout.guest_email = "pat@example.com".to_string();
        app.submit_checkout_guest();

        app.update_field(BookingField::PaymentMethod, "card");
        app.update_field(BookingField::CardNumber, "0000 0000 0000 0000");
        app.update_field(BookingField::ExpiryDate, "12/29");
        app.update_field(BookingField::Cvv, "123");
        app.update_field(BookingField::CardholderName, "Pat Guest");
        app.update_field(BookingField::BillingAddress, "123 Main Street, Apt 4");
        app.press_next();

        assert!(app.alert.is_some());
        assert_eq!(app.step(), Step::Payment);
        assert!(app.flow.confirmed.is_empty());
    }

    #[test]
    fn test_chat_appends_customer_messages() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        fill_asap_through_contact(&mut app);
        app.press_next();
        app.checkout.guest_name = "Pat Guest".to_string();
        app.checkout.guest_email = "pat@example.com".to_string();
        app.submit_checkout_guest();
        app.update_field(BookingField::PaymentMethod, "paypal");
        app.press_next();

        app.open_bookings();
        app.open_booking_detail();
        assert_eq!(app.mode, AppMode::BookingDetail);

        let seeded = app.chat_for_open_booking().len();
        app.chat_input = "The entrance is around the back.".to_string();
        app.send_chat_message();
        let thread = app.chat_for_open_booking();
        assert_eq!(thread.len(), seeded + 1);
        assert_eq!(thread.last().map(|m| m.sender), Some(ChatSender::Customer));
        assert!(app.chat_input.is_empty());

        // Blank drafts are ignored
        app.chat_input = "   ".to_string();
        app.send_chat_message();
        assert_eq!(app.chat_for_open_booking().len(), seeded + 1);
    }
}
