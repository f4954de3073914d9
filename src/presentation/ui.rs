//! Terminal rendering for every screen.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::application::flow::{
    base_cost_cents, format_usd, payment_total_cents, receipt_total_cents, tax_cents,
    trust_fee_cents, HOURLY_RATE_CENTS,
};
use crate::application::{App, AppMode, ChatSender, CheckoutTab, DetailTab, Session};
use crate::domain::models::{BookingData, ConfirmedBooking};
use crate::domain::navigation::{policy, Step};
use crate::presentation::input::{
    CARD_FIELDS, CLEANING_TYPES, CONTACT_FIELDS, PAYMENT_METHODS, ROOM_OPTIONS,
    SQUARE_FOOTAGE_OPTIONS,
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    match app.mode {
        AppMode::Book | AppMode::CheckoutAuth => render_wizard(f, app, chunks[1]),
        AppMode::Bookings => render_bookings(f, app, chunks[1]),
        AppMode::BookingDetail => render_booking_detail(f, app, chunks[1]),
        AppMode::Help => render_wizard(f, app, chunks[1]),
    }
    render_status_bar(f, app, chunks[2]);

    if app.mode == AppMode::CheckoutAuth {
        render_checkout_modal(f, app);
    }
    if app.mode == AppMode::Help {
        render_help_popup(f, app.help_scroll);
    }
    if let Some(ref alert) = app.alert {
        render_alert(f, alert);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let who = match &app.session {
        Session::Anonymous => "not signed in".to_string(),
        Session::Guest(guest) => format!("guest: {}", guest.name),
        Session::Authenticated(user) => user.name.clone(),
    };
    let text = match app.mode {
        AppMode::Bookings => format!("suds - Home Cleaning | My Bookings | {}", who),
        AppMode::BookingDetail => format!("suds - Home Cleaning | Booking Detail | {}", who),
        _ => format!(
            "suds - Home Cleaning | Step {}/10: {} | {}",
            app.step().position(),
            app.step().title(),
            who
        ),
    };
    let header = Paragraph::new(text).style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn focused_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

fn field_line<'a>(label: &'a str, value: &'a str, focused: bool) -> Line<'a> {
    let marker = if focused { "> " } else { "  " };
    Line::from(vec![
        Span::styled(marker, focused_style(focused)),
        Span::styled(format!("{:<16}", label), Style::default().fg(Color::Gray)),
        Span::styled(value, focused_style(focused).add_modifier(Modifier::BOLD)),
    ])
}

fn option_lines<'a>(
    options: impl IntoIterator<Item = (&'a str, String)>,
    selected: &str,
) -> Vec<Line<'a>> {
    options
        .into_iter()
        .map(|(value, label)| {
            let marker = if value == selected { "(o) " } else { "( ) " };
            let style = if value == selected {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(Span::styled(format!("{}{}", marker, label), style))
        })
        .collect()
}

fn step_block(title: &str) -> Block<'_> {
    Block::default().borders(Borders::ALL).title(title.to_string())
}

fn render_wizard(f: &mut Frame, app: &App, area: Rect) {
    match app.step() {
        Step::ZipCode => render_zip_step(f, app, area),
        Step::CleaningType => render_cleaning_type_step(f, app, area),
        Step::SpaceSize => render_space_size_step(f, app, area),
        Step::Timing => render_timing_step(f, app, area),
        Step::CleanerBrowse => render_cleaner_browse(f, app, area),
        Step::CleanerProfile => render_cleaner_profile(f, app, area),
        Step::Contact => render_contact_step(f, app, area),
        Step::Payment => render_payment_step(f, app, area),
        Step::Pending => render_pending_step(f, app, area),
        Step::Confirmed => render_confirmed_step(f, app, area),
    }
}

fn render_zip_step(f: &mut Frame, app: &App, area: Rect) {
    let data = &app.flow.data;
    let mut lines = vec![
        Line::from("Enter the zip code where you need cleaning."),
        Line::from(""),
        Line::from(vec![
            Span::raw("Zip code: "),
            Span::styled(
                format!("{}_", data.zip_code),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
    ];
    if !data.neighborhood.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("✓ We clean in {}", data.neighborhood),
            Style::default().fg(Color::Green),
        )));
    } else if data.zip_code.len() == 5 {
        lines.push(Line::from(Span::styled(
            "Sorry, we don't serve that area yet.",
            Style::default().fg(Color::Red),
        )));
    }
    let widget = Paragraph::new(lines)
        .block(step_block("Where do you need cleaning?"))
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn render_cleaning_type_step(f: &mut Frame, app: &App, area: Rect) {
    let options = CLEANING_TYPES
        .iter()
        .enumerate()
        .map(|(i, (value, label, price))| (*value, format!("{}. {} ({})", i + 1, label, price)));
    let mut lines = vec![Line::from("Pick a service. Deep cleans book at least 3 hours."), Line::from("")];
    lines.extend(option_lines(options, &app.flow.data.cleaning_type));
    let widget = Paragraph::new(lines).block(step_block("What kind of clean?"));
    f.render_widget(widget, area);
}

fn render_space_size_step(f: &mut Frame, app: &App, area: Rect) {
    let data = &app.flow.data;
    let lines = vec![
        Line::from("Tab moves between rows, Left/Right changes the value."),
        Line::from(""),
        field_line("Bedrooms", &data.bedrooms, app.focus == 0),
        field_line("Bathrooms", &data.bathrooms, app.focus == 1),
        field_line(
            "Square footage",
            if data.square_footage.is_empty() {
                "(choose)"
            } else {
                &data.square_footage
            },
            app.focus == 2,
        ),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "Options: bedrooms/bathrooms {}..{}, footage: {}",
                ROOM_OPTIONS[0],
                ROOM_OPTIONS[ROOM_OPTIONS.len() - 1],
                SQUARE_FOOTAGE_OPTIONS.join(" / ")
            ),
            Style::default().fg(Color::Gray),
        )),
    ];
    let widget = Paragraph::new(lines)
        .block(step_block("Tell us about your space"))
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn render_timing_step(f: &mut Frame, app: &App, area: Rect) {
    let data = &app.flow.data;
    let mut lines = vec![
        Line::from("a: as soon as possible, s: pick a date and time."),
        Line::from(""),
    ];
    lines.extend(option_lines(
        [
            ("asap", "As soon as possible".to_string()),
            ("scheduled", "Schedule for later".to_string()),
        ],
        &data.timing,
    ));
    if data.timing == "scheduled" {
        lines.push(Line::from(""));
        lines.push(field_line(
            "Date",
            if data.selected_date.is_empty() {
                "(Left/Right to pick)"
            } else {
                &data.selected_date
            },
            app.focus == 1,
        ));
        lines.push(field_line(
            "Hour",
            if data.selected_hour.is_empty() {
                "-"
            } else {
                &data.selected_hour
            },
            app.focus == 2,
        ));
        lines.push(field_line(
            "Minute",
            if data.selected_minute.is_empty() {
                "-"
            } else {
                &data.selected_minute
            },
            app.focus == 3,
        ));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "We'll match you with an available cleaner automatically.",
            Style::default().fg(Color::Gray),
        )));
    }
    let widget = Paragraph::new(lines).block(step_block("When should we come?"));
    f.render_widget(widget, area);
}

fn render_cleaner_browse(f: &mut Frame, app: &App, area: Rect) {
    let cleaners = app.cleaners();
    let items: Vec<ListItem> = cleaners
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let badge = if c.verified { " [verified]" } else { "" };
            let text = format!(
                "{}  {:.1}★ ({} reviews){}  next: {}",
                c.name,
                c.rating,
                c.reviews,
                badge,
                c.available_slots.first().map(String::as_str).unwrap_or("-")
            );
            let style = if i == app.browse_index {
                Style::default().bg(Color::Blue).fg(Color::White)
            } else {
                Style::default()
            };
            ListItem::new(text).style(style)
        })
        .collect();
    let list = List::new(items).block(step_block("Choose your cleaner (Enter for profile)"));
    f.render_widget(list, area);
}

fn render_cleaner_profile(f: &mut Frame, app: &App, area: Rect) {
    let Some(cleaner) = app.selected_cleaner() else {
        f.render_widget(
            Paragraph::new("No cleaner selected.").block(step_block("Cleaner profile")),
            area,
        );
        return;
    };
    let mut lines = vec![
        Line::from(Span::styled(
            cleaner.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "{:.1}★ from {} reviews{}",
            cleaner.rating,
            cleaner.reviews,
            if cleaner.verified { "  ·  identity verified" } else { "" }
        )),
        Line::from(""),
        Line::from("Available times (Enter books the highlighted one):"),
    ];
    for (i, slot) in cleaner.available_slots.iter().enumerate() {
        let style = if i == app.slot_index {
            Style::default().bg(Color::Blue).fg(Color::White)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(format!("  {}", slot), style)));
    }
    if !cleaner.booking_history.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from("Recent jobs:"));
        for entry in &cleaner.booking_history {
            lines.push(Line::from(format!(
                "  {}  {}  {}★",
                entry.date, entry.cleaning_type, entry.rating
            )));
            if let Some(review) = &entry.review {
                lines.push(Line::from(Span::styled(
                    format!("    \"{}\"", review),
                    Style::default().fg(Color::Gray),
                )));
            }
        }
    }
    let widget = Paragraph::new(lines)
        .block(step_block("Cleaner profile"))
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn render_contact_step(f: &mut Frame, app: &App, area: Rect) {
    let data = &app.flow.data;
    let labels = ["Address", "Phone", "Notes"];
    let mut lines = vec![
        Line::from("Where should the cleaner go, and how do we reach you?"),
        Line::from(""),
    ];
    for (i, field) in CONTACT_FIELDS.iter().enumerate() {
        lines.push(field_line(labels[i], data.get(*field), app.focus == i));
    }
    lines.push(field_line(
        "Allow substitute",
        if data.allow_substitute == "true" { "yes" } else { "no" },
        app.focus == CONTACT_FIELDS.len(),
    ));
    lines.push(field_line(
        "Hours",
        &data.booking_hours,
        app.focus == CONTACT_FIELDS.len() + 1,
    ));
    lines.push(Line::from(""));
    if let Some(slot_line) = summary_slot(data) {
        lines.push(Line::from(Span::styled(slot_line, Style::default().fg(Color::Gray))));
    }
    let widget = Paragraph::new(lines)
        .block(step_block("Booking details"))
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn summary_slot(data: &BookingData) -> Option<String> {
    if data.selected_time_slot.is_empty() {
        None
    } else {
        Some(format!("Arriving: {}", data.selected_time_slot))
    }
}

fn render_payment_step(f: &mut Frame, app: &App, area: Rect) {
    let data = &app.flow.data;
    let base = base_cost_cents(data);
    let mut lines = vec![
        Line::from(format!(
            "{} hours × {}  =  {}",
            data.booking_hours,
            format_usd(HOURLY_RATE_CENTS),
            format_usd(base)
        )),
        Line::from(format!("Tax (8%): {}", format_usd(tax_cents(base)))),
        Line::from(Span::styled(
            format!("Total due: {}", format_usd(payment_total_cents(data))),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    let options = PAYMENT_METHODS
        .iter()
        .enumerate()
        .map(|(i, (value, label))| (*value, format!("{}. {}", i + 1, label)));
    lines.extend(option_lines(options, &data.payment_method));
    if data.payment_method == "card" {
        let labels = ["Card number", "Expiry (MM/YY)", "CVV", "Name on card", "Billing address"];
        lines.push(Line::from(""));
        for (i, field) in CARD_FIELDS.iter().enumerate() {
            lines.push(field_line(labels[i], data.get(*field), app.focus == i + 1));
        }
    }
    let widget = Paragraph::new(lines)
        .block(step_block("Payment"))
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn render_pending_step(f: &mut Frame, app: &App, area: Rect) {
    let cleaner = app.selected_cleaner().map(|c| c.name).unwrap_or_default();
    let lines = vec![
        Line::from(Span::styled(
            "Reservation pending",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!(
            "You asked for {} specifically, so we're holding your slot until they accept.",
            cleaner
        )),
        Line::from("Press Enter to confirm the reservation."),
    ];
    let widget = Paragraph::new(lines)
        .block(step_block("Reservation pending"))
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn render_confirmed_step(f: &mut Frame, app: &App, area: Rect) {
    let data = &app.flow.data;
    let cleaner = app.selected_cleaner().map(|c| c.name).unwrap_or_default();
    let lines = vec![
        Line::from(Span::styled(
            "✓ Booking confirmed!",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Cleaner: {}", cleaner)),
        Line::from(format!("When: {}", data.selected_time_slot)),
        Line::from(format!("Where: {}", data.home_address)),
        Line::from(format!("Total paid: {}", format_usd(payment_total_cents(data)))),
        Line::from(""),
        Line::from("Press Enter when you're done. F2 shows all your bookings."),
    ];
    let widget = Paragraph::new(lines)
        .block(step_block("Booking confirmed"))
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn render_bookings(f: &mut Frame, app: &App, area: Rect) {
    if app.flow.confirmed.is_empty() {
        let widget = Paragraph::new("No bookings yet. Esc returns to the wizard.")
            .block(step_block("My Bookings"));
        f.render_widget(widget, area);
        return;
    }
    let items: Vec<ListItem> = app
        .flow
        .confirmed
        .iter()
        .enumerate()
        .map(|(i, b)| {
            let text = format!(
                "{}  {}  {}  {}  {}",
                b.confirmed_at.format("%Y-%m-%d"),
                b.cleaner.name,
                b.booking_data.selected_time_slot,
                format_usd(payment_total_cents(&b.booking_data)),
                b.status.label()
            );
            let style = if i == app.bookings_index {
                Style::default().bg(Color::Blue).fg(Color::White)
            } else {
                Style::default()
            };
            ListItem::new(text).style(style)
        })
        .collect();
    let list = List::new(items).block(step_block("My Bookings (Enter opens, Esc closes)"));
    f.render_widget(list, area);
}

fn render_booking_detail(f: &mut Frame, app: &App, area: Rect) {
    let Some(booking) = app.current_booking() else {
        f.render_widget(
            Paragraph::new("Booking not found.").block(step_block("Booking Detail")),
            area,
        );
        return;
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let titles: Vec<Line> = DetailTab::ALL.iter().map(|t| Line::from(t.title())).collect();
    let selected = DetailTab::ALL
        .iter()
        .position(|t| *t == app.detail_tab)
        .unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, chunks[0]);

    match app.detail_tab {
        DetailTab::Receipt => render_receipt_tab(f, booking, chunks[1]),
        DetailTab::TaskInfo => render_task_info_tab(f, booking, chunks[1]),
        DetailTab::Chat => render_chat_tab(f, app, chunks[1]),
    }
}

fn render_receipt_tab(f: &mut Frame, booking: &ConfirmedBooking, area: Rect) {
    let data = &booking.booking_data;
    let base = base_cost_cents(data);
    let lines = vec![
        Line::from(format!("Booking #{}", booking.id)),
        Line::from(format!("Confirmed {}", booking.confirmed_at.format("%b %-d, %Y %H:%M UTC"))),
        Line::from(""),
        Line::from(format!(
            "Cleaning ({} hrs × {}): {}",
            data.booking_hours,
            format_usd(HOURLY_RATE_CENTS),
            format_usd(base)
        )),
        Line::from(format!(
            "Trust & support fee (7.5%): {}",
            format_usd(trust_fee_cents(base))
        )),
        Line::from(Span::styled(
            format!("Total: {}", format_usd(receipt_total_cents(data))),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Status: {}", booking.status.label())),
    ];
    let widget = Paragraph::new(lines).block(step_block("Receipt"));
    f.render_widget(widget, area);
}

fn render_task_info_tab(f: &mut Frame, booking: &ConfirmedBooking, area: Rect) {
    let data = &booking.booking_data;
    let label = CLEANING_TYPES
        .iter()
        .find(|(v, _, _)| *v == data.cleaning_type)
        .map(|(_, l, _)| *l)
        .unwrap_or(data.cleaning_type.as_str());
    let lines = vec![
        Line::from(format!("Cleaner: {}", booking.cleaner.name)),
        Line::from(format!("Service: {}", label)),
        Line::from(format!("When: {}", data.selected_time_slot)),
        Line::from(format!("Address: {}", data.home_address)),
        Line::from(format!("Phone: {}", data.phone_number)),
        Line::from(format!(
            "Space: {} bed / {} bath, {}",
            data.bedrooms, data.bathrooms, data.square_footage
        )),
        Line::from(format!(
            "Substitute cleaner ok: {}",
            if data.allow_substitute == "true" { "yes" } else { "no" }
        )),
        Line::from(format!(
            "Notes: {}",
            if data.booking_notes.is_empty() { "-" } else { &data.booking_notes }
        )),
    ];
    let widget = Paragraph::new(lines)
        .block(step_block("Task Info"))
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn render_chat_tab(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let lines: Vec<Line> = app
        .chat_for_open_booking()
        .iter()
        .map(|m| {
            let (who, color) = match m.sender {
                ChatSender::Customer => ("you", Color::Green),
                ChatSender::Cleaner => ("cleaner", Color::Cyan),
            };
            Line::from(vec![
                Span::styled(
                    format!("[{}] {}: ", m.sent_at.format("%H:%M"), who),
                    Style::default().fg(color),
                ),
                Span::raw(m.text.clone()),
            ])
        })
        .collect();
    let transcript = Paragraph::new(lines)
        .block(step_block("Chat"))
        .wrap(Wrap { trim: false });
    f.render_widget(transcript, chunks[0]);

    let input = Paragraph::new(format!("{}_", app.chat_input))
        .block(Block::default().borders(Borders::ALL).title("Message (Enter sends)"))
        .style(Style::default().fg(Color::Green));
    f.render_widget(input, chunks[1]);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_checkout_modal(f: &mut Frame, app: &App) {
    let area = centered_rect(f.area(), 60, 14);
    f.render_widget(Clear, area);

    let form = &app.checkout;
    let password_mask = "*".repeat(form.password.chars().count());
    let (tab_line, fields): (Line, [Line; 2]) = match form.tab {
        CheckoutTab::Login => (
            Line::from(vec![
                Span::styled("[ Sign in ]", Style::default().fg(Color::Yellow)),
                Span::raw("   Continue as guest  (Left/Right switches)"),
            ]),
            [
                field_line("Email", &form.email, form.focus == 0),
                field_line("Password", &password_mask, form.focus == 1),
            ],
        ),
        CheckoutTab::Guest => (
            Line::from(vec![
                Span::raw("  Sign in   "),
                Span::styled("[ Continue as guest ]", Style::default().fg(Color::Yellow)),
                Span::raw("  (Left/Right switches)"),
            ]),
            [
                field_line("Name", &form.guest_name, form.focus == 0),
                field_line("Email", &form.guest_email, form.focus == 1),
            ],
        ),
    };
    let mut lines = vec![
        Line::from("One more thing before payment."),
        Line::from(""),
        tab_line,
        Line::from(""),
    ];
    lines.extend(fields);
    if let Some(error) = &form.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    }
    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Checkout")
                .style(Style::default().fg(Color::White)),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn render_alert(f: &mut Frame, alert: &str) {
    let area = centered_rect(f.area(), 50, 7);
    f.render_widget(Clear, area);
    let widget = Paragraph::new(vec![
        Line::from(alert.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to dismiss",
            Style::default().fg(Color::Gray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Something went wrong")
            .style(Style::default().fg(Color::Red)),
    )
    .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let text = if let Some(ref status) = app.status_message {
        status.clone()
    } else {
        match app.mode {
            AppMode::Book => {
                let nav = policy(app.step(), &app.flow.data);
                let mut hints = Vec::new();
                if nav.show_next {
                    let state = if nav.next_enabled { "" } else { " (disabled)" };
                    hints.push(format!("Enter: {}{}", nav.next_label, state));
                }
                if nav.show_back {
                    hints.push("Esc: Back".to_string());
                }
                hints.push("F2: My Bookings".to_string());
                hints.push("F1: Help".to_string());
                hints.push("Ctrl+Q: quit".to_string());
                hints.join(" | ")
            }
            AppMode::Bookings => "↑↓: select | Enter: open | Esc: back | Ctrl+Q: quit".to_string(),
            AppMode::BookingDetail => {
                "Tab: switch tab | type + Enter: chat | Esc: back".to_string()
            }
            AppMode::CheckoutAuth => {
                "Left/Right: sign in / guest | Tab: field | Enter: submit | Esc: cancel".to_string()
            }
            AppMode::Help => "↑↓/jk: scroll | Esc/q: close help".to_string(),
        }
    };
    let style = match app.mode {
        AppMode::CheckoutAuth => Style::default().fg(Color::Yellow),
        AppMode::Help => Style::default().fg(Color::Cyan),
        _ => Style::default(),
    };
    let widget = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(style);
    f.render_widget(widget, area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };
    f.render_widget(Clear, popup_area);

    let help_text = get_help_text();
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;
    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());
    let visible_text = help_lines[start_line..end_line].join("\n");

    let widget = Paragraph::new(visible_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("suds Help")
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));
    f.render_widget(widget, popup_area);
}

fn get_help_text() -> String {
    r#"SUDS - HOME CLEANING BOOKING

=== THE WIZARD ===
Work through the steps with Enter (next) and Esc (back). The status bar
always shows what Enter will do and whether it is currently enabled.

1. Zip code     type 5 digits; we confirm the neighborhood we serve
2. Service      1/2/3 or arrow keys: routine, deep, or move-in clean
3. Space        Tab between rows, Left/Right to change values
4. Timing       'a' for as soon as possible, 's' to schedule a slot
5. Cleaner      (ASAP only) arrow keys browse, Enter opens a profile
6. Profile      pick a time slot, Enter books it
7. Details      address, phone, notes, substitute policy, hours
8. Payment      pick a method; card payments want the full card form
9. Pending      Enter confirms a held reservation
10. Done        Enter starts a fresh booking

Scheduled bookings skip the cleaner screens: we match you with an
available cleaner automatically.

=== CHECKOUT ===
If you're not signed in, payment is gated behind a quick sign-in or
guest checkout. Any email and password work in this demo build.

=== MY BOOKINGS (F2) ===
Arrow keys select a booking, Enter opens it. Inside, Tab cycles the
Receipt, Task Info, and Chat tabs. On the chat tab, type a message and
press Enter to send it.

=== KEYS EVERYWHERE ===
F1        this help
F2        my bookings
Ctrl+L    sign out
Ctrl+Q    quit
"#
    .to_string()
}
