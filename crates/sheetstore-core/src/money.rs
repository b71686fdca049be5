//! Price parsing and display for spreadsheet-sourced amounts.
//!
//! Sheet cells carry prices as free text (`"₹499"`, `"1,299.50"`, `"Rs 50"`),
//! so parsing is lenient and total: it never fails, it falls back to zero.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Largest unit price accepted from a sheet cell or a stored cart line
/// (one trillion). Anything above it parses as zero, which keeps every
/// `price * quantity` and cart total well inside [`Decimal`]'s range.
pub const MAX_PRICE: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Parses a free-text price cell into a non-negative [`Decimal`].
///
/// Every character other than an ASCII digit, `.` or `-` is discarded, then
/// the longest leading number (`-?digits[.digits]`) is read. Anything that
/// does not yield a number, any negative number, and anything above
/// [`MAX_PRICE`] becomes zero.
#[must_use]
pub fn parse_price(raw: &str) -> Decimal {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    if cleaned.starts_with('-') {
        return Decimal::ZERO;
    }

    let Some((int_digits, frac_digits)) = leading_number(&cleaned) else {
        return Decimal::ZERO;
    };

    let int_digits = if int_digits.is_empty() { "0" } else { int_digits };
    let canonical = if frac_digits.is_empty() {
        int_digits.to_owned()
    } else {
        format!("{int_digits}.{frac_digits}")
    };

    bounded_price(Decimal::from_str(&canonical).unwrap_or(Decimal::ZERO))
}

/// Returns `price` when it is within `0..=MAX_PRICE`, otherwise zero.
#[must_use]
pub fn bounded_price(price: Decimal) -> Decimal {
    if price.is_sign_negative() || price > MAX_PRICE {
        Decimal::ZERO
    } else {
        price
    }
}

/// Splits the leading `digits[.digits]` run of `s` into its integer and
/// fractional digit slices. Returns `None` when no digit is present.
fn leading_number(s: &str) -> Option<(&str, &str)> {
    let bytes = s.as_bytes();
    let int_end = bytes
        .iter()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(bytes.len());

    let (frac_start, frac_end) = if bytes.get(int_end) == Some(&b'.') {
        let start = int_end + 1;
        let len = bytes[start..]
            .iter()
            .position(|b| !b.is_ascii_digit())
            .unwrap_or(bytes.len() - start);
        (start, start + len)
    } else {
        (int_end, int_end)
    };

    if int_end == 0 && frac_end == frac_start {
        return None;
    }

    Some((&s[..int_end], &s[frac_start..frac_end]))
}

/// Formats `amount` as `<symbol><amount>` with two decimal places and Indian
/// digit grouping (`₹1,23,456.00`).
#[must_use]
pub fn format_money(symbol: &str, amount: Decimal) -> String {
    let text = format!("{:.2}", amount.round_dp(2));
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, "00"));
    format!("{sign}{symbol}{}.{frac_part}", group_indian(int_part))
}

/// Groups the last three digits, then every two digits before them.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_owned();
    }

    let (head, last_three) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (front, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = front;
    }
    if !rest.is_empty() {
        groups.push(rest);
    }
    groups.reverse();

    format!("{},{last_three}", groups.join(","))
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_price_strips_currency_symbol() {
        assert_eq!(parse_price("₹499"), dec!(499));
    }

    #[test]
    fn parse_price_strips_thousands_separator() {
        assert_eq!(parse_price("1,299.50"), dec!(1299.50));
    }

    #[test]
    fn parse_price_non_numeric_is_zero() {
        assert_eq!(parse_price("not-a-number"), Decimal::ZERO);
        assert_eq!(parse_price(""), Decimal::ZERO);
        assert_eq!(parse_price("..."), Decimal::ZERO);
        assert_eq!(parse_price("-"), Decimal::ZERO);
    }

    #[test]
    fn parse_price_reads_leading_number_only() {
        assert_eq!(parse_price("100-200"), dec!(100));
        assert_eq!(parse_price("1.2.3"), dec!(1.2));
    }

    #[test]
    fn parse_price_leading_dot_reads_fraction() {
        assert_eq!(parse_price(".5"), dec!(0.5));
    }

    #[test]
    fn parse_price_trailing_dot_is_integer() {
        assert_eq!(parse_price("45."), dec!(45));
    }

    #[test]
    fn parse_price_negative_clamps_to_zero() {
        assert_eq!(parse_price("-250"), Decimal::ZERO);
    }

    #[test]
    fn parse_price_overflow_is_zero() {
        let huge = "9".repeat(80);
        assert_eq!(parse_price(&huge), Decimal::ZERO);
    }

    #[test]
    fn parse_price_above_ceiling_is_zero() {
        assert_eq!(parse_price("1000000000000"), dec!(1000000000000));
        assert_eq!(parse_price("1000000000000.01"), Decimal::ZERO);
        assert_eq!(parse_price("79228162514264337593543950335"), Decimal::ZERO);
    }

    #[test]
    fn max_price_is_one_trillion() {
        assert_eq!(MAX_PRICE, dec!(1000000000000));
    }

    #[test]
    fn bounded_price_rejects_negative_and_huge() {
        assert_eq!(bounded_price(dec!(-1)), Decimal::ZERO);
        assert_eq!(bounded_price(Decimal::MAX), Decimal::ZERO);
        assert_eq!(bounded_price(dec!(499.50)), dec!(499.50));
    }

    #[test]
    fn format_money_handles_decimal_max() {
        assert!(format_money("₹", Decimal::MAX).starts_with("₹79,22"));
    }

    #[test]
    fn parse_price_is_total_over_mixed_inputs() {
        let inputs = [
            "₹",
            "abc",
            "--1",
            "1e5",
            "½",
            "  42  ",
            "0.0.0",
            "१२३",
            "\u{0}",
            "₹ 1,00,000",
        ];
        for input in inputs {
            let value = parse_price(input);
            assert!(!value.is_sign_negative(), "negative price for {input:?}");
        }
        assert_eq!(parse_price("₹ 1,00,000"), dec!(100000));
        assert_eq!(parse_price("  42  "), dec!(42));
    }

    #[test]
    fn format_money_small_amount() {
        assert_eq!(format_money("₹", dec!(499)), "₹499.00");
    }

    #[test]
    fn format_money_indian_grouping() {
        assert_eq!(format_money("₹", dec!(1234)), "₹1,234.00");
        assert_eq!(format_money("₹", dec!(123456)), "₹1,23,456.00");
        assert_eq!(format_money("₹", dec!(12345678.5)), "₹1,23,45,678.50");
    }

    #[test]
    fn format_money_rounds_to_two_places() {
        assert_eq!(format_money("$", dec!(10.005)), "$10.00");
        assert_eq!(format_money("$", dec!(10.499)), "$10.50");
    }

    #[test]
    fn format_money_zero() {
        assert_eq!(format_money("₹", Decimal::ZERO), "₹0.00");
    }
}
