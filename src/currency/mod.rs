//! Locale-aware formatting of money, plain decimals and dates.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::Config;

const MONEY_PRECISION: u32 = 2;

/// Formatting preferences extracted from [`Config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatter {
    pub currency_suffix: String,
    pub date_format: String,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Formatter {
    pub fn from_config(config: &Config) -> Self {
        Self {
            currency_suffix: config.currency_suffix.clone(),
            date_format: config.date_format.clone(),
        }
    }

    /// `55` → `"55.00 $"`.
    pub fn money(&self, amount: Decimal) -> String {
        format!("{} {}", format_fixed(amount), self.currency_suffix)
    }

    pub fn date(&self, date: NaiveDate) -> String {
        date.format(&self.date_format).to_string()
    }

    /// Rate disclosure as printed next to mileage rows: `"0.25 $/km"`.
    pub fn rate_per_km(&self, rate: Decimal) -> String {
        format!("{} {}/km", format_plain(rate), self.currency_suffix)
    }
}

/// Rounds half away from zero and always prints two decimals.
pub fn format_fixed(amount: Decimal) -> String {
    let mut rounded =
        amount.round_dp_with_strategy(MONEY_PRECISION, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_PRECISION);
    rounded.to_string()
}

/// Shortest exact representation: `20.0` → `"20"`, `2.50` → `"2.5"`.
pub fn format_plain(value: Decimal) -> String {
    value.normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_uses_two_decimals_and_suffix() {
        let fmt = Formatter::default();
        assert_eq!(fmt.money(Decimal::new(55, 0)), "55.00 $");
        assert_eq!(fmt.money(Decimal::new(12345, 3)), "12.35 $");
        assert_eq!(fmt.money(Decimal::ZERO), "0.00 $");
    }

    #[test]
    fn plain_strips_trailing_zeros() {
        assert_eq!(format_plain(Decimal::new(200, 1)), "20");
        assert_eq!(format_plain(Decimal::new(250, 2)), "2.5");
        assert_eq!(format_plain(Decimal::new(25, 2)), "0.25");
    }

    #[test]
    fn date_uses_configured_pattern() {
        let fmt = Formatter::default();
        let date = NaiveDate::from_ymd_opt(2025, 1, 7).unwrap();
        assert_eq!(fmt.date(date), "2025-01-07");
    }

    #[test]
    fn rate_disclosure_format() {
        let fmt = Formatter::default();
        assert_eq!(fmt.rate_per_km(Decimal::new(25, 2)), "0.25 $/km");
    }
}
