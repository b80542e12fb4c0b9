use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to cents, half away from zero, and fixes the scale at two places.
pub fn to_cents(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// `$` + thousands-grouped amount with exactly two decimals, e.g. `$12,345.60`.
pub fn format_currency(value: Decimal) -> String {
    let cents = to_cents(value);
    let digits = cents.abs().to_string();
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if cents.is_sign_negative() && !cents.is_zero() { "-" } else { "" };
    format!("{sign}${grouped}.{frac_part}")
}

/// `Month D, YYYY` with no leading zero on the day.
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Download name derived from the project, e.g. `Iron_Plumbing_Bid_Main_St.pdf`.
/// Falls back to `fallback` when the project name has nothing filename-safe.
pub fn download_filename(prefix: &str, fallback: &str, project_name: &str) -> String {
    let slug: String = project_name
        .trim()
        .chars()
        .map(|c| if c == ' ' { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        .collect();

    if slug.is_empty() {
        fallback.to_string()
    } else {
        format!("{prefix}_{slug}.pdf")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_grouping() {
        assert_eq!(format_currency(Decimal::new(1234560, 2)), "$12,345.60");
        assert_eq!(format_currency(Decimal::new(1_000_000, 0)), "$1,000,000.00");
        assert_eq!(format_currency(Decimal::new(999, 0)), "$999.00");
    }

    #[test]
    fn test_currency_zero_and_rounding() {
        assert_eq!(format_currency(Decimal::ZERO), "$0.00");
        assert_eq!(format_currency(Decimal::new(10005, 3)), "$10.01");
    }

    #[test]
    fn test_to_cents_keeps_two_places() {
        assert_eq!(to_cents(Decimal::from(240)).to_string(), "240.00");
        assert_eq!(to_cents(Decimal::new(12345, 3)).to_string(), "12.35");
    }

    #[test]
    fn test_long_date_has_no_leading_zero() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 6).unwrap();
        assert_eq!(format_long_date(date), "October 6, 2026");
        let date = NaiveDate::from_ymd_opt(2025, 1, 21).unwrap();
        assert_eq!(format_long_date(date), "January 21, 2025");
    }

    #[test]
    fn test_download_filename() {
        assert_eq!(
            download_filename("Iron_Plumbing_Bid", "Iron_Bid.pdf", "Main St Clinic"),
            "Iron_Plumbing_Bid_Main_St_Clinic.pdf"
        );
        assert_eq!(
            download_filename("Iron_Plumbing_Bid", "Iron_Bid.pdf", "  "),
            "Iron_Bid.pdf"
        );
        assert_eq!(
            download_filename("Iron_Plumbing_Dossier", "Iron_Dossier.pdf", "Lot #4/B"),
            "Iron_Plumbing_Dossier_Lot_4B.pdf"
        );
    }
}
