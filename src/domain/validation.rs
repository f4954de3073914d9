//! Field validators and progressive input formatters.
//!
//! All functions here are pure: no I/O, no clock access except where a
//! reference date is passed in explicitly.

use chrono::NaiveDate;

use crate::domain::models::BookingData;

/// A zip code is valid iff it is exactly five ASCII digits.
pub fn is_valid_zip_code(zip: &str) -> bool {
    zip.len() == 5 && zip.bytes().all(|b| b.is_ascii_digit())
}

/// Heuristic street-address check: at least 10 characters after trimming,
/// and a digit followed somewhere later by two separate alphabetic runs
/// (roughly "number + street name"). Intentionally permissive; this is not
/// address verification.
pub fn is_valid_address(address: &str) -> bool {
    let trimmed = address.trim();
    if trimmed.len() < 10 {
        return false;
    }

    let mut saw_digit = false;
    let mut alpha_runs = 0;
    let mut in_alpha_run = false;
    for ch in trimmed.chars() {
        if !saw_digit {
            if ch.is_ascii_digit() {
                saw_digit = true;
            }
            continue;
        }
        if ch.is_alphabetic() {
            if !in_alpha_run {
                in_alpha_run = true;
                alpha_runs += 1;
                if alpha_runs >= 2 {
                    return true;
                }
            }
        } else {
            in_alpha_run = false;
        }
    }
    false
}

fn digits_of(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// A phone number is valid iff stripping all non-digit characters leaves
/// exactly 10 digits.
pub fn is_valid_phone_number(phone: &str) -> bool {
    digits_of(phone).len() == 10
}

/// Progressively masks digits into `(xxx) xxx-xxxx` as the user types.
/// Works on any input regardless of validity; extra digits past ten are
/// dropped.
pub fn format_phone_number(input: &str) -> String {
    let digits = digits_of(input);
    match digits.len() {
        0 => String::new(),
        1..=3 => digits,
        4..=6 => format!("({}) {}", &digits[..3], &digits[3..]),
        _ => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..digits.len().min(10)]),
    }
}

/// A card number is plausible iff it has 13 to 19 digits after stripping
/// spaces. No issuer or checksum validation; payment is mocked.
pub fn is_valid_card_number(card: &str) -> bool {
    let digits = digits_of(card);
    (13..=19).contains(&digits.len())
}

/// Groups card digits into blocks of four, capped at 16 digits.
pub fn format_card_number(input: &str) -> String {
    let digits: String = digits_of(input).chars().take(16).collect();
    digits
        .as_bytes()
        .chunks(4)
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Masks digits into `MM/YY` as the user types.
pub fn format_expiry_date(input: &str) -> String {
    let digits: String = digits_of(input).chars().take(4).collect();
    if digits.len() >= 2 {
        format!("{}/{}", &digits[..2], &digits[2..])
    } else {
        digits
    }
}

/// Checks an `MM/YY` expiry against a reference date. Returns an error
/// message suitable for inline display, or `None` when the expiry is fine.
pub fn expiry_error(expiry: &str, today: NaiveDate) -> Option<&'static str> {
    if expiry.len() != 5 {
        return Some("Please enter MM/YY format");
    }
    let (month_str, year_str) = match expiry.split_once('/') {
        Some(parts) => parts,
        None => return Some("Please enter MM/YY format"),
    };
    let month: u32 = match month_str.parse() {
        Ok(m) => m,
        Err(_) => return Some("Please enter MM/YY format"),
    };
    let year: i32 = match year_str.parse() {
        Ok(y) => y,
        Err(_) => return Some("Please enter MM/YY format"),
    };
    if !(1..=12).contains(&month) {
        return Some("Invalid month");
    }

    use chrono::Datelike;
    let current_year = today.year() % 100;
    let current_month = today.month();
    if year < current_year || (year == current_year && month < current_month) {
        return Some("Card has expired");
    }
    None
}

/// Pay-time check of the card form, run when the user submits payment.
/// Returns the first problem found as a display-ready message, or `None`
/// when the details are chargeable. Wallet methods carry no card fields
/// to check.
pub fn payment_info_error(data: &BookingData, today: NaiveDate) -> Option<&'static str> {
    if data.payment_method != "card" {
        return None;
    }
    if data.cardholder_name.trim().is_empty() {
        return Some("Cardholder name is required");
    }
    if !is_valid_card_number(&data.card_number) {
        return Some("Please enter a valid card number");
    }
    if let Some(message) = expiry_error(&data.expiry_date, today) {
        return Some(message);
    }
    if digits_of(&data.cvv).len() < 3 {
        return Some("Please enter a valid CVV");
    }
    if data.billing_address.trim().is_empty() {
        return Some("Billing address is required");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zip_code_validation() {
        assert!(is_valid_zip_code("12345"));
        assert!(is_valid_zip_code("00000"));
        assert!(!is_valid_zip_code("1234"));
        assert!(!is_valid_zip_code("123456"));
        assert!(!is_valid_zip_code("12345a"));
        assert!(!is_valid_zip_code("1234a"));
        assert!(!is_valid_zip_code(""));
        assert!(!is_valid_zip_code("12 45"));
    }

    #[test]
    fn test_address_validation() {
        assert!(is_valid_address("123 Main Street"));
        assert!(is_valid_address("456 Oak Ave, Unit 2A"));
        assert!(is_valid_address("  77 Mass Ave Cambridge  "));
        // Too short
        assert!(!is_valid_address("12 Elm"));
        // No digit
        assert!(!is_valid_address("Main Street Apartment"));
        // Digit but only one word after it
        assert!(!is_valid_address("9999999 Main"));
        assert!(!is_valid_address(""));
    }

    #[test]
    fn test_phone_validation() {
        assert!(is_valid_phone_number("(555) 123-4567"));
        assert!(is_valid_phone_number("5551234567"));
        assert!(is_valid_phone_number("555.123.4567"));
        assert!(!is_valid_phone_number("555-1234"));
        assert!(!is_valid_phone_number("(555) 123-45678"));
        assert!(!is_valid_phone_number(""));
    }

    #[test]
    fn test_phone_formatting_progressive() {
        assert_eq!(format_phone_number(""), "");
        assert_eq!(format_phone_number("5"), "5");
        assert_eq!(format_phone_number("555"), "555");
        assert_eq!(format_phone_number("5551"), "(555) 1");
        assert_eq!(format_phone_number("555123"), "(555) 123");
        assert_eq!(format_phone_number("5551234"), "(555) 123-4");
        assert_eq!(format_phone_number("5551234567"), "(555) 123-4567");
        // Non-digits stripped, overflow dropped
        assert_eq!(format_phone_number("555-123-4567 x99"), "(555) 123-4567");
    }

    #[test]
    fn test_card_number_validation() {
        assert!(is_valid_card_number("4111 1111 1111 1111"));
        assert!(is_valid_card_number("4111111111111"));
        assert!(!is_valid_card_number("411111111111"));
        assert!(!is_valid_card_number(""));
    }

    #[test]
    fn test_card_number_formatting() {
        assert_eq!(format_card_number("4111111111111111"), "4111 1111 1111 1111");
        assert_eq!(format_card_number("41111"), "4111 1");
        // Capped at 16 digits
        assert_eq!(format_card_number("41111111111111112222"), "4111 1111 1111 1111");
    }

    #[test]
    fn test_expiry_formatting() {
        assert_eq!(format_expiry_date("1"), "1");
        assert_eq!(format_expiry_date("12"), "12/");
        assert_eq!(format_expiry_date("1229"), "12/29");
        assert_eq!(format_expiry_date("12/29"), "12/29");
    }

    #[test]
    fn test_payment_info_error_checks_the_card_form() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 29).unwrap();
        let mut data = BookingData::default();
        data.payment_method = "card".to_string();
        data.cardholder_name = "John Doe".to_string();
        data.card_number = "4111 1111 1111 1111".to_string();
        data.expiry_date = "12/29".to_string();
        data.cvv = "123".to_string();
        data.billing_address = "123 Main St, New York, NY".to_string();
        assert_eq!(payment_info_error(&data, today), None);

        data.card_number = "4111 1111 1111".to_string();
        assert_eq!(
            payment_info_error(&data, today),
            Some("Please enter a valid card number")
        );
        data.card_number = "4111 1111 1111 1111".to_string();

        data.expiry_date = "01/20".to_string();
        assert_eq!(payment_info_error(&data, today), Some("Card has expired"));
        data.expiry_date = "12/29".to_string();

        data.cvv = "12".to_string();
        assert_eq!(payment_info_error(&data, today), Some("Please enter a valid CVV"));
        data.cvv = "123".to_string();

        data.cardholder_name = "   ".to_string();
        assert_eq!(
            payment_info_error(&data, today),
            Some("Cardholder name is required")
        );
        data.cardholder_name = "John Doe".to_string();

        data.billing_address.clear();
        assert_eq!(
            payment_info_error(&data, today),
            Some("Billing address is required")
        );

        // Wallet methods have no card form to validate
        data.payment_method = "paypal".to_string();
        assert_eq!(payment_info_error(&data, today), None);
    }

    #[test]
    fn test_expiry_validation() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 29).unwrap();
        assert_eq!(expiry_error("12/29", today), None);
        assert_eq!(expiry_error("08/26", today), None);
        assert_eq!(expiry_error("07/26", today), Some("Card has expired"));
        assert_eq!(expiry_error("12/25", today), Some("Card has expired"));
        assert_eq!(expiry_error("13/29", today), Some("Invalid month"));
        assert_eq!(expiry_error("00/29", today), Some("Invalid month"));
        assert_eq!(expiry_error("1229", today), Some("Please enter MM/YY format"));
        assert_eq!(expiry_error("", today), Some("Please enter MM/YY format"));
    }
}
