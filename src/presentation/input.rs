//! Keyboard handling for every screen.
//!
//! One entry point, [`InputHandler::handle_key_event`], dispatches on the
//! current mode and, inside the wizard, on the current step. Text fields
//! edit the booking data directly; phone, card, and expiry input is
//! re-masked on every keystroke.

use crossterm::event::{KeyCode, KeyModifiers};

use crate::application::{App, AppMode, CheckoutTab, DetailTab};
use crate::domain::models::BookingField;
use crate::domain::navigation::Step;
use crate::domain::validation::{format_card_number, format_expiry_date, format_phone_number};

/// Value, label, and price tag for the cleaning-type options.
pub const CLEANING_TYPES: &[(&str, &str, &str)] = &[
    ("routine", "Routine Clean", "from $35/hr"),
    ("deep", "Deep Clean", "from $45/hr"),
    ("movein", "Move-in Cleaning", "from $40/hr"),
];

pub const SQUARE_FOOTAGE_OPTIONS: &[&str] =
    &["Under 1,000 sq ft", "Under 3,000 sq ft", "Over 3,000 sq ft"];

pub const PAYMENT_METHODS: &[(&str, &str)] = &[
    ("card", "Credit / Debit Card"),
    ("paypal", "PayPal"),
    ("applepay", "Apple Pay"),
];

pub const ROOM_OPTIONS: &[&str] = &["1", "2", "3", "4", "5"];

pub const MINUTE_OPTIONS: &[&str] = &["0", "15", "30", "45"];

pub const MIN_HOUR: i32 = 8;
pub const MAX_HOUR: i32 = 18;
pub const MIN_BOOKING_HOURS: i32 = 2;
pub const MAX_BOOKING_HOURS: i32 = 8;

/// How many days ahead the scheduled picker reaches.
pub const MAX_SCHEDULE_DAYS: i64 = 13;

/// Focusable text fields of the contact step, in Tab order. The
/// substitute toggle and the hours selector follow these.
pub const CONTACT_FIELDS: &[BookingField] = &[
    BookingField::HomeAddress,
    BookingField::PhoneNumber,
    BookingField::BookingNotes,
];

/// Focusable card fields of the payment step, in Tab order after the
/// method selector.
pub const CARD_FIELDS: &[BookingField] = &[
    BookingField::CardNumber,
    BookingField::ExpiryDate,
    BookingField::Cvv,
    BookingField::CardholderName,
    BookingField::BillingAddress,
];

fn cycle(current: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (current + 1) % len
    } else {
        (current + len - 1) % len
    }
}

fn option_index(options: &[&str], value: &str) -> Option<usize> {
    options.iter().position(|o| *o == value)
}

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        // A blocking alert eats every key until it is dismissed
        if app.alert.is_some() {
            if matches!(key, KeyCode::Enter | KeyCode::Esc) {
                app.alert = None;
            }
            return;
        }

        if modifiers.contains(KeyModifiers::CONTROL) && key == KeyCode::Char('q') {
            app.should_quit = true;
            return;
        }

        match app.mode {
            AppMode::Book => Self::handle_book(app, key, modifiers),
            AppMode::Bookings => Self::handle_bookings(app, key),
            AppMode::BookingDetail => Self::handle_booking_detail(app, key),
            AppMode::CheckoutAuth => Self::handle_checkout(app, key),
            AppMode::Help => Self::handle_help(app, key),
        }
    }

    fn handle_book(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match key {
            KeyCode::F(1) => {
                app.help_scroll = 0;
                app.mode = AppMode::Help;
                return;
            }
            KeyCode::F(2) => {
                app.open_bookings();
                return;
            }
            KeyCode::Char('l') if modifiers.contains(KeyModifiers::CONTROL) => {
                app.logout();
                return;
            }
            _ => {}
        }

        match app.step() {
            Step::ZipCode => Self::handle_zip(app, key),
            Step::CleaningType => Self::handle_cleaning_type(app, key),
            Step::SpaceSize => Self::handle_space_size(app, key),
            Step::Timing => Self::handle_timing(app, key),
            Step::CleanerBrowse => Self::handle_cleaner_browse(app, key),
            Step::CleanerProfile => Self::handle_cleaner_profile(app, key),
            Step::Contact => Self::handle_contact(app, key),
            Step::Payment => Self::handle_payment(app, key),
            Step::Pending | Step::Confirmed => {
                if key == KeyCode::Enter {
                    app.press_next();
                }
            }
        }
    }

    fn handle_zip(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if app.flow.data.zip_code.len() < 5 {
                    let zip = format!("{}{}", app.flow.data.zip_code, c);
                    app.update_field(BookingField::ZipCode, zip);
                }
            }
            KeyCode::Backspace => {
                let mut zip = app.flow.data.zip_code.clone();
                zip.pop();
                app.update_field(BookingField::ZipCode, zip);
            }
            KeyCode::Enter => app.press_next(),
            _ => {}
        }
    }

    fn handle_cleaning_type(app: &mut App, key: KeyCode) {
        let values: Vec<&str> = CLEANING_TYPES.iter().map(|(v, _, _)| *v).collect();
        let current = option_index(&values, &app.flow.data.cleaning_type);
        match key {
            KeyCode::Up | KeyCode::Down => {
                let index = match current {
                    Some(i) => cycle(i, values.len(), key == KeyCode::Down),
                    None => 0,
                };
                app.update_field(BookingField::CleaningType, values[index]);
            }
            KeyCode::Char(c @ '1'..='3') => {
                let index = c as usize - '1' as usize;
                app.update_field(BookingField::CleaningType, values[index]);
            }
            KeyCode::Enter => app.press_next(),
            KeyCode::Esc => app.press_back(),
            _ => {}
        }
    }

    fn adjust_option(app: &mut App, field: BookingField, options: &[&str], forward: bool) {
        let index = match option_index(options, app.flow.data.get(field)) {
            Some(i) => cycle(i, options.len(), forward),
            None => 0,
        };
        app.update_field(field, options[index]);
    }

    fn handle_space_size(app: &mut App, key: KeyCode) {
        // Focus order: bedrooms, bathrooms, square footage
        match key {
            KeyCode::Tab | KeyCode::Down => app.focus = cycle(app.focus, 3, true),
            KeyCode::BackTab | KeyCode::Up => app.focus = cycle(app.focus, 3, false),
            KeyCode::Left | KeyCode::Right => {
                let forward = key == KeyCode::Right;
                match app.focus {
                    0 => Self::adjust_option(app, BookingField::Bedrooms, ROOM_OPTIONS, forward),
                    1 => Self::adjust_option(app, BookingField::Bathrooms, ROOM_OPTIONS, forward),
                    _ => Self::adjust_option(
                        app,
                        BookingField::SquareFootage,
                        SQUARE_FOOTAGE_OPTIONS,
                        forward,
                    ),
                }
            }
            KeyCode::Enter => app.press_next(),
            KeyCode::Esc => app.press_back(),
            _ => {}
        }
    }

    fn handle_timing(app: &mut App, key: KeyCode) {
        let scheduled = app.flow.data.timing == "scheduled";
        // Focus order: mode, then date / hour / minute when scheduled
        let focusable = if scheduled { 4 } else { 1 };
        match key {
            KeyCode::Char('a') => {
                app.update_field(BookingField::Timing, "asap");
                app.focus = 0;
            }
            KeyCode::Char('s') => {
                app.update_field(BookingField::Timing, "scheduled");
            }
            KeyCode::Tab | KeyCode::Down => app.focus = cycle(app.focus, focusable, true),
            KeyCode::BackTab | KeyCode::Up => app.focus = cycle(app.focus, focusable, false),
            KeyCode::Left | KeyCode::Right => {
                let forward = key == KeyCode::Right;
                match app.focus {
                    0 => {
                        let timing = if app.flow.data.timing == "asap" {
                            "scheduled"
                        } else {
                            "asap"
                        };
                        app.update_field(BookingField::Timing, timing);
                    }
                    1 => Self::adjust_schedule_date(app, forward),
                    2 => Self::adjust_schedule_hour(app, forward),
                    _ => Self::adjust_option(
                        app,
                        BookingField::SelectedMinute,
                        MINUTE_OPTIONS,
                        forward,
                    ),
                }
            }
            KeyCode::Enter => app.press_next(),
            KeyCode::Esc => app.press_back(),
            _ => {}
        }
    }

    fn adjust_schedule_date(app: &mut App, forward: bool) {
        let today = app.today();
        let current = chrono::NaiveDate::parse_from_str(&app.flow.data.selected_date, "%Y-%m-%d")
            .unwrap_or(today);
        let offset = (current - today).num_days();
        let next = if forward {
            (offset + 1).min(MAX_SCHEDULE_DAYS)
        } else {
            (offset - 1).max(0)
        };
        let date = today + chrono::Duration::days(next);
        app.update_field(BookingField::SelectedDate, date.format("%Y-%m-%d").to_string());
        if app.flow.data.selected_hour.is_empty() {
            app.update_field(BookingField::SelectedHour, "10");
        }
        if app.flow.data.selected_minute.is_empty() {
            app.update_field(BookingField::SelectedMinute, "0");
        }
    }

    fn adjust_schedule_hour(app: &mut App, forward: bool) {
        let current: i32 = app.flow.data.selected_hour.parse().unwrap_or(10);
        let next = if forward {
            (current + 1).min(MAX_HOUR)
        } else {
            (current - 1).max(MIN_HOUR)
        };
        app.update_field(BookingField::SelectedHour, next.to_string());
        if app.flow.data.selected_minute.is_empty() {
            app.update_field(BookingField::SelectedMinute, "0");
        }
    }

    fn handle_cleaner_browse(app: &mut App, key: KeyCode) {
        let count = app.cleaners().len();
        match key {
            KeyCode::Up => app.browse_index = cycle(app.browse_index, count, false),
            KeyCode::Down => app.browse_index = cycle(app.browse_index, count, true),
            KeyCode::Enter => app.view_cleaner_profile(),
            KeyCode::Esc => app.press_back(),
            _ => {}
        }
    }

    fn handle_cleaner_profile(app: &mut App, key: KeyCode) {
        let slots = app
            .selected_cleaner()
            .map(|c| c.available_slots.len())
            .unwrap_or(0);
        match key {
            KeyCode::Up => app.slot_index = cycle(app.slot_index, slots, false),
            KeyCode::Down => app.slot_index = cycle(app.slot_index, slots, true),
            KeyCode::Enter => app.book_from_profile(),
            KeyCode::Esc => app.press_back(),
            _ => {}
        }
    }

    fn handle_contact(app: &mut App, key: KeyCode) {
        // Focus: three text fields, then the substitute toggle, then hours
        let focusable = CONTACT_FIELDS.len() + 2;
        match key {
            KeyCode::Tab | KeyCode::Down => {
                app.focus = cycle(app.focus, focusable, true);
                return;
            }
            KeyCode::BackTab | KeyCode::Up => {
                app.focus = cycle(app.focus, focusable, false);
                return;
            }
            KeyCode::Enter => {
                app.press_next();
                return;
            }
            KeyCode::Esc => {
                app.press_back();
                return;
            }
            _ => {}
        }

        if app.focus < CONTACT_FIELDS.len() {
            let field = CONTACT_FIELDS[app.focus];
            Self::edit_text_field(app, field, key);
        } else if app.focus == CONTACT_FIELDS.len() {
            if matches!(key, KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right) {
                let flipped = if app.flow.data.allow_substitute == "true" {
                    "false"
                } else {
                    "true"
                };
                app.update_field(BookingField::AllowSubstitute, flipped);
            }
        } else if matches!(key, KeyCode::Left | KeyCode::Right) {
            let current: i32 = app.flow.data.booking_hours.parse().unwrap_or(2);
            let next = if key == KeyCode::Right {
                (current + 1).min(MAX_BOOKING_HOURS)
            } else {
                (current - 1).max(MIN_BOOKING_HOURS)
            };
            app.update_field(BookingField::BookingHours, next.to_string());
        }
    }

    fn handle_payment(app: &mut App, key: KeyCode) {
        let card = app.flow.data.payment_method == "card";
        // Focus: the method selector, then the card form when relevant
        let focusable = if card { 1 + CARD_FIELDS.len() } else { 1 };
        match key {
            KeyCode::Tab | KeyCode::Down => {
                app.focus = cycle(app.focus, focusable, true);
                return;
            }
            KeyCode::BackTab | KeyCode::Up => {
                app.focus = cycle(app.focus, focusable, false);
                return;
            }
            KeyCode::Enter => {
                app.press_next();
                return;
            }
            KeyCode::Esc => {
                app.press_back();
                return;
            }
            _ => {}
        }

        if app.focus == 0 {
            let values: Vec<&str> = PAYMENT_METHODS.iter().map(|(v, _)| *v).collect();
            match key {
                KeyCode::Left | KeyCode::Right => {
                    let index = match option_index(&values, &app.flow.data.payment_method) {
                        Some(i) => cycle(i, values.len(), key == KeyCode::Right),
                        None => 0,
                    };
                    app.update_field(BookingField::PaymentMethod, values[index]);
                    app.focus = 0;
                }
                KeyCode::Char(c @ '1'..='3') => {
                    let index = c as usize - '1' as usize;
                    app.update_field(BookingField::PaymentMethod, values[index]);
                }
                _ => {}
            }
        } else {
            let field = CARD_FIELDS[app.focus - 1];
            Self::edit_text_field(app, field, key);
        }
    }

    /// Routes plain typing and backspace into a text field, re-masking
    /// the fields that carry a display format.
    fn edit_text_field(app: &mut App, field: BookingField, key: KeyCode) {
        let current = app.flow.data.get(field).to_string();
        let edited = match key {
            KeyCode::Char(c) => {
                let mut value = current;
                value.push(c);
                value
            }
            KeyCode::Backspace => {
                let mut value = current;
                value.pop();
                value
            }
            _ => return,
        };
        let masked = match field {
            BookingField::PhoneNumber => format_phone_number(&edited),
            BookingField::CardNumber => format_card_number(&edited),
            BookingField::ExpiryDate => format_expiry_date(&edited),
            BookingField::Cvv => edited.chars().filter(|c| c.is_ascii_digit()).take(4).collect(),
            _ => edited,
        };
        app.update_field(field, masked);
    }

    fn handle_bookings(app: &mut App, key: KeyCode) {
        let count = app.flow.confirmed.len();
        match key {
            KeyCode::Up => app.bookings_index = cycle(app.bookings_index, count, false),
            KeyCode::Down => app.bookings_index = cycle(app.bookings_index, count, true),
            KeyCode::Enter => app.open_booking_detail(),
            KeyCode::Esc | KeyCode::Char('q') => app.mode = AppMode::Book,
            KeyCode::F(1) => {
                app.help_scroll = 0;
                app.mode = AppMode::Help;
            }
            _ => {}
        }
    }

    fn handle_booking_detail(app: &mut App, key: KeyCode) {
        let chatting = app.detail_tab == DetailTab::Chat;
        match key {
            KeyCode::Tab => {
                let index = DetailTab::ALL
                    .iter()
                    .position(|t| *t == app.detail_tab)
                    .unwrap_or(0);
                app.detail_tab = DetailTab::ALL[cycle(index, DetailTab::ALL.len(), true)];
            }
            KeyCode::BackTab => {
                let index = DetailTab::ALL
                    .iter()
                    .position(|t| *t == app.detail_tab)
                    .unwrap_or(0);
                app.detail_tab = DetailTab::ALL[cycle(index, DetailTab::ALL.len(), false)];
            }
            KeyCode::Enter if chatting => app.send_chat_message(),
            KeyCode::Char(c) if chatting => app.chat_input.push(c),
            KeyCode::Backspace if chatting => {
                app.chat_input.pop();
            }
            KeyCode::Esc => {
                app.open_booking = None;
                app.chat_input.clear();
                app.mode = AppMode::Bookings;
            }
            KeyCode::Char('q') => {
                app.open_booking = None;
                app.chat_input.clear();
                app.mode = AppMode::Bookings;
            }
            _ => {}
        }
    }

    fn handle_checkout(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                app.cancel_checkout();
                return;
            }
            KeyCode::Left | KeyCode::Right => {
                app.checkout.tab = match app.checkout.tab {
                    CheckoutTab::Login => CheckoutTab::Guest,
                    CheckoutTab::Guest => CheckoutTab::Login,
                };
                app.checkout.focus = 0;
                app.checkout.error = None;
                return;
            }
            KeyCode::Tab | KeyCode::Down => {
                app.checkout.focus = cycle(app.checkout.focus, 2, true);
                return;
            }
            KeyCode::BackTab | KeyCode::Up => {
                app.checkout.focus = cycle(app.checkout.focus, 2, false);
                return;
            }
            KeyCode::Enter => {
                match app.checkout.tab {
                    CheckoutTab::Login => app.submit_checkout_login(),
                    CheckoutTab::Guest => app.submit_checkout_guest(),
                }
                return;
            }
            _ => {}
        }

        let buffer = match (app.checkout.tab, app.checkout.focus) {
            (CheckoutTab::Login, 0) => &mut app.checkout.email,
            (CheckoutTab::Login, _) => &mut app.checkout.password,
            (CheckoutTab::Guest, 0) => &mut app.checkout.guest_name,
            (CheckoutTab::Guest, _) => &mut app.checkout.guest_email,
        };
        match key {
            KeyCode::Char(c) => buffer.push(c),
            KeyCode::Backspace => {
                buffer.pop();
            }
            _ => {}
        }
    }

    fn handle_help(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                app.help_scroll = app.help_scroll.saturating_sub(1)
            }
            KeyCode::Down | KeyCode::Char('j') => app.help_scroll += 1,
            KeyCode::PageUp => app.help_scroll = app.help_scroll.saturating_sub(10),
            KeyCode::PageDown => app.help_scroll += 10,
            KeyCode::Home => app.help_scroll = 0,
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::F(1) => app.mode = AppMode::Book,
            _ => {}
        }
    }
}
