//! Value formatting for quotation documents
//!
//! Currency, dates, quantities and status labels/colors. All functions are
//! pure; the layout calls them and never formats values inline.

use chrono::{NaiveDate, NaiveDateTime};

use crate::config::Labels;
use crate::quotation::QuotationStatus;
use crate::types::{palette, Color};

/// `R$ 10.50`: always two decimals, whatever the input precision
pub fn format_currency(amount: f64) -> String {
    // Anything that rounds to zero prints unsigned
    let rounded = (amount * 100.0).round() / 100.0;
    let amount = if rounded == 0.0 { 0.0 } else { amount };
    format!("R$ {:.2}", amount)
}

/// Quantities print the shortest form: `2`, `1.5`
pub fn format_quantity(quantity: f64) -> String {
    quantity.to_string()
}

/// `DD/MM/YYYY`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// `HH:MM:SS`
pub fn format_time(timestamp: NaiveDateTime) -> String {
    timestamp.format("%H:%M:%S").to_string()
}

/// Display text and optional highlight color for a status.
///
/// Unknown statuses are printed verbatim with no color override.
pub fn status_display<'a>(status: &'a QuotationStatus, labels: &'a Labels) -> (&'a str, Option<Color>) {
    match status {
        QuotationStatus::Pending => (labels.status_pending.as_str(), Some(palette::STATUS_PENDING)),
        QuotationStatus::Approved => (labels.status_approved.as_str(), Some(palette::STATUS_APPROVED)),
        QuotationStatus::Rejected => (labels.status_rejected.as_str(), Some(palette::STATUS_REJECTED)),
        QuotationStatus::Other(raw) => (raw.as_str(), None),
    }
}

/// `city, state` with empty parts dropped
pub fn format_location(city: Option<&str>, state: Option<&str>) -> String {
    [city, state]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_two_decimals() {
        assert_eq!(format_currency(10.0), "R$ 10.00");
        assert_eq!(format_currency(10.5), "R$ 10.50");
        assert_eq!(format_currency(1234.567), "R$ 1234.57");
        assert_eq!(format_currency(0.1 + 0.2), "R$ 0.30");
        assert_eq!(format_currency(-0.0), "R$ 0.00");
        assert_eq!(format_currency(-0.004), "R$ 0.00");
        assert_eq!(format_currency(-1.5), "R$ -1.50");
    }

    #[test]
    fn test_currency_shape() {
        for amount in [0.0, 0.004, 3.0, 99.999, 12345.6, 7.25] {
            let text = format_currency(amount);
            let digits = text.strip_prefix("R$ ").unwrap();
            let (whole, frac) = digits.split_once('.').unwrap();
            assert!(whole.chars().all(|c| c.is_ascii_digit()), "{}", text);
            assert_eq!(frac.len(), 2, "{}", text);
        }
    }

    #[test]
    fn test_quantity() {
        assert_eq!(format_quantity(2.0), "2");
        assert_eq!(format_quantity(1.5), "1.5");
    }

    #[test]
    fn test_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(format_date(date), "05/03/2024");
        let timestamp = date.and_hms_opt(7, 4, 9).unwrap();
        assert_eq!(format_time(timestamp), "07:04:09");
    }

    #[test]
    fn test_status_colors() {
        let labels = Labels::default();
        assert_eq!(
            status_display(&QuotationStatus::Pending, &labels),
            ("Pendente", Some(palette::STATUS_PENDING))
        );
        assert_eq!(
            status_display(&QuotationStatus::Approved, &labels),
            ("Aprovado", Some(palette::STATUS_APPROVED))
        );
        assert_eq!(
            status_display(&QuotationStatus::Rejected, &labels),
            ("Rejeitado", Some(palette::STATUS_REJECTED))
        );
        let other = QuotationStatus::from("em análise");
        assert_eq!(status_display(&other, &labels), ("em análise", None));
    }

    #[test]
    fn test_location() {
        assert_eq!(format_location(Some("Recife"), Some("PE")), "Recife, PE");
        assert_eq!(format_location(Some("Recife"), None), "Recife");
        assert_eq!(format_location(Some(""), Some("PE")), "PE");
        assert_eq!(format_location(None, None), "");
    }
}
