//! Display Formatting
//!
//! US-locale renderings used by the dashboard views and the assistant context.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round half away from zero and insert thousands separators
fn grouped(value: Decimal, dp: u32) -> String {
    let rounded = value
        .abs()
        .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.*}", dp as usize, rounded);

    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text.as_str(), None),
    };

    let mut out = String::with_capacity(text.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

fn is_negative_at(value: Decimal, dp: u32) -> bool {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero) < Decimal::ZERO
}

/// `$1,234.56`, `-$12.50`
pub fn usd(value: Decimal) -> String {
    let sign = if is_negative_at(value, 2) { "-" } else { "" };
    format!("{}${}", sign, grouped(value, 2))
}

/// `+$1,234.56`, `-$12.50`, `+$0.00`
pub fn signed_usd(value: Decimal) -> String {
    let sign = if is_negative_at(value, 2) { "-" } else { "+" };
    format!("{}${}", sign, grouped(value, 2))
}

/// Fixed-precision percentage: `0.75%`
pub fn percent(value: Decimal, dp: u32) -> String {
    let sign = if is_negative_at(value, dp) { "-" } else { "" };
    format!("{}{}%", sign, grouped(value, dp))
}

/// Holding change as entered: `+1.2%`, `-0.4%`, `0%`
pub fn change(value: Decimal) -> String {
    let sign = if value > Decimal::ZERO { "+" } else { "" };
    format!("{}{}%", sign, value.normalize())
}

/// Unit counts with three decimals: `2,314.810`
pub fn units(value: Decimal) -> String {
    grouped(value, 3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_usd() {
        assert_eq!(usd(dec!(145230.50)), "$145,230.50");
        assert_eq!(usd(dec!(302931.5)), "$302,931.50");
        assert_eq!(usd(dec!(850)), "$850.00");
        assert_eq!(usd(dec!(-12.50)), "-$12.50");
        assert_eq!(usd(dec!(1000000)), "$1,000,000.00");
        assert_eq!(usd(dec!(287784.925)), "$287,784.93");
        assert_eq!(usd(dec!(-0.001)), "$0.00");
    }

    #[test]
    fn test_signed_usd() {
        assert_eq!(signed_usd(dec!(2284.171)), "+$2,284.17");
        assert_eq!(signed_usd(dec!(-168.401)), "-$168.40");
        assert_eq!(signed_usd(Decimal::ZERO), "+$0.00");
    }

    #[test]
    fn test_percent_and_change() {
        assert_eq!(percent(dec!(0.754022), 2), "0.75%");
        assert_eq!(percent(dec!(-3.456), 1), "-3.5%");
        assert_eq!(change(dec!(1.2)), "+1.2%");
        assert_eq!(change(dec!(-0.4)), "-0.4%");
        assert_eq!(change(dec!(0.0)), "0%");
    }

    #[test]
    fn test_units() {
        assert_eq!(units(dec!(842.12)), "842.120");
        assert_eq!(units(dec!(2314.81)), "2,314.810");
    }
}
