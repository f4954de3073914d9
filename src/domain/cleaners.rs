//! Mock cleaner roster.
//!
//! The five cleaners are fixed; only their available slots vary with the
//! timing mode. ASAP bookings get canned same-day/next-day slots, while
//! scheduled bookings get alternatives generated around the chosen time.

use chrono::{Duration, NaiveDate};

use crate::domain::models::{BookingData, Cleaner, HistoryEntry};

/// Earliest and latest starting hour a cleaner will take, 24-hour clock.
const BUSINESS_HOURS: std::ops::RangeInclusive<i32> = 8..=18;

/// Formats a date relative to `today`: "Today", "Tomorrow", or e.g.
/// "Sat, Mar 8".
pub fn format_date_for_display(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today".to_string()
    } else if date == today + Duration::days(1) {
        "Tomorrow".to_string()
    } else {
        date.format("%a, %b %-d").to_string()
    }
}

/// Formats a 24-hour clock time as e.g. "2:00 PM".
pub fn format_time_for_display(hour: i32, minute: i32) -> String {
    let hour12 = if hour > 12 {
        hour - 12
    } else if hour == 0 {
        12
    } else {
        hour
    };
    let ampm = if hour >= 12 { "PM" } else { "AM" };
    format!("{}:{:02} {}", hour12, minute, ampm)
}

/// Generates up to five display slots around the chosen date and time:
/// the exact selection first, then same-day alternatives within business
/// hours, then next-day options. Empty when the selection is incomplete
/// or unparseable.
pub fn generate_alternative_slots(data: &BookingData, today: NaiveDate) -> Vec<String> {
    if data.selected_date.is_empty()
        || data.selected_hour.is_empty()
        || data.selected_minute.is_empty()
    {
        return Vec::new();
    }

    let date = match NaiveDate::parse_from_str(&data.selected_date, "%Y-%m-%d") {
        Ok(d) => d,
        Err(_) => return Vec::new(),
    };
    let hour: i32 = match data.selected_hour.parse() {
        Ok(h) => h,
        Err(_) => return Vec::new(),
    };
    let minute: i32 = match data.selected_minute.parse() {
        Ok(m) => m,
        Err(_) => return Vec::new(),
    };

    let mut slots = Vec::new();
    let day_display = format_date_for_display(date, today);
    slots.push(format!("{} {}", day_display, format_time_for_display(hour, minute)));

    for offset in [-2, -1, 1, 2] {
        let alt = hour + offset;
        if BUSINESS_HOURS.contains(&alt) {
            slots.push(format!("{} {}", day_display, format_time_for_display(alt, minute)));
        }
    }

    let next_day_display = format_date_for_display(date + Duration::days(1), today);
    for offset in [0, 1, -1] {
        let alt = hour + offset;
        if BUSINESS_HOURS.contains(&alt) {
            slots.push(format!(
                "{} {}",
                next_day_display,
                format_time_for_display(alt, minute)
            ));
        }
    }

    slots.truncate(5);
    slots
}

fn history(entries: &[(&str, &str, &str, u8, Option<&str>)]) -> Vec<HistoryEntry> {
    entries
        .iter()
        .map(|(id, date, kind, rating, review)| HistoryEntry {
            booking_id: (*id).to_string(),
            date: (*date).to_string(),
            cleaning_type: (*kind).to_string(),
            rating: *rating,
            review: review.map(str::to_string),
        })
        .collect()
}

/// Builds the mock roster for the given timing mode. `today` anchors the
/// relative date labels for scheduled-slot generation.
pub fn roster(timing: &str, data: &BookingData, today: NaiveDate) -> Vec<Cleaner> {
    let slots_for = |asap: &[&str]| -> Vec<String> {
        if timing == "asap" {
            asap.iter().map(|s| (*s).to_string()).collect()
        } else {
            generate_alternative_slots(data, today)
        }
    };

    vec![
        Cleaner {
            id: "1".to_string(),
            name: "Sarah Johnson".to_string(),
            rating: 4.9,
            reviews: 127,
            verified: true,
            available_slots: slots_for(&[
                "Today 2:00 PM",
                "Today 4:30 PM",
                "Today 6:00 PM",
                "Tomorrow 9:00 AM",
                "Tomorrow 11:30 AM",
            ]),
            booking_history: history(&[
                (
                    "BK001",
                    "2024-01-15",
                    "Routine Clean",
                    5,
                    Some("Excellent work! Very thorough and professional."),
                ),
                (
                    "BK007",
                    "2024-02-20",
                    "Deep Clean",
                    5,
                    Some("Amazing deep clean. Highly recommend!"),
                ),
            ]),
        },
        Cleaner {
            id: "2".to_string(),
            name: "Mike Rodriguez".to_string(),
            rating: 4.8,
            reviews: 89,
            verified: true,
            available_slots: slots_for(&[
                "Today 3:15 PM",
                "Today 5:45 PM",
                "Tomorrow 8:30 AM",
                "Tomorrow 1:00 PM",
                "Tomorrow 3:30 PM",
            ]),
            booking_history: history(&[(
                "BK003",
                "2024-01-28",
                "Move-in Cleaning",
                4,
                Some("Good job overall, very reliable."),
            )]),
        },
        Cleaner {
            id: "3".to_string(),
            name: "Emma Chen".to_string(),
            rating: 5.0,
            reviews: 203,
            verified: true,
            available_slots: slots_for(&[
                "Today 1:30 PM",
                "Today 4:00 PM",
                "Today 7:00 PM",
                "Tomorrow 10:00 AM",
                "Tomorrow 2:15 PM",
                "Tomorrow 5:00 PM",
            ]),
            booking_history: history(&[
                ("BK012", "2024-01-10", "Routine Clean", 4, Some("Good job, arrived on time.")),
                ("BK018", "2024-02-15", "Routine Clean", 5, Some("Amazing attention to detail!")),
                ("BK024", "2024-03-05", "Routine Clean", 4, None),
                (
                    "BK030",
                    "2024-03-20",
                    "Deep Clean",
                    5,
                    Some("Outstanding deep cleaning service!"),
                ),
            ]),
        },
        Cleaner {
            id: "4".to_string(),
            name: "David Thompson".to_string(),
            rating: 4.7,
            reviews: 156,
            verified: true,
            available_slots: slots_for(&[
                "Today 12:00 PM",
                "Today 3:00 PM",
                "Today 5:30 PM",
                "Tomorrow 9:30 AM",
                "Tomorrow 12:30 PM",
            ]),
            booking_history: Vec::new(),
        },
        Cleaner {
            id: "5".to_string(),
            name: "Lisa Martinez".to_string(),
            rating: 4.9,
            reviews: 98,
            verified: true,
            available_slots: slots_for(&[
                "Today 2:45 PM",
                "Today 4:15 PM",
                "Today 6:30 PM",
                "Tomorrow 8:00 AM",
                "Tomorrow 11:00 AM",
                "Tomorrow 4:00 PM",
            ]),
            booking_history: Vec::new(),
        },
    ]
}
