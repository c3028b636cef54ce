//! Display formatting for listings and profile fields, Turkish locale.

use crate::models::Property;
use chrono::{Datelike, NaiveDate};

const MONTHS: [&str; 12] = [
    "Ocak", "Şubat", "Mart", "Nisan", "Mayıs", "Haziran", "Temmuz", "Ağustos", "Eylül", "Ekim",
    "Kasım", "Aralık",
];

/// Turkish lira with `.` grouping and `,` decimals: `₺1.234.567,50`
pub fn format_currency(amount: Option<f64>) -> String {
    let Some(amount) = amount.filter(|a| a.is_finite()) else {
        return "-".to_string();
    };

    let cents = (amount.abs() * 100.0).round() as u128;
    let whole = group_thousands(cents / 100);
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };

    format!("{sign}₺{whole},{:02}", cents % 100)
}

fn group_thousands(n: u128) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }

    out
}

pub fn format_area(area: Option<f64>) -> String {
    match area.filter(|a| a.is_finite()) {
        Some(area) => format!("{area} m²"),
        None => "-".to_string(),
    }
}

/// `(555) 123 4567` for ten-digit numbers; anything else is returned as given
pub fn format_phone_number(phone_number: &str) -> String {
    if phone_number.is_empty() {
        return "-".to_string();
    }

    let digits: String = phone_number.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() == 10 {
        format!("({}) {} {}", &digits[..3], &digits[3..6], &digits[6..])
    } else {
        phone_number.to_string()
    }
}

pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => format!(
            "{} {} {}",
            date.day(),
            MONTHS[date.month0() as usize],
            date.year()
        ),
        None => "-".to_string(),
    }
}

pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_length).collect();
    format!("{cut}...")
}

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// One-line card text for a listing
pub fn property_summary(property: &Property) -> String {
    format!(
        "{} - {} | {} | {} | {} | {}",
        property.property_type.label(),
        property.property_status.label(),
        format_area(Some(property.area)),
        property.number_of_rooms.label(),
        truncate_text(property.address.as_deref().unwrap_or("-"), 50),
        format_currency(Some(property.price)),
    )
}
