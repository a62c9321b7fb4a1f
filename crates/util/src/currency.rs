//! Display formatting for amounts stored in minor currency units.

use tally_types::CurrencyFormat;

/// Renders `value` (minor units) as a signed currency string.
///
/// `-1234567` with two minor digits and `$` renders as `-$12,345.67`.
pub fn format_amount(value: i64, format: &CurrencyFormat) -> String {
    let magnitude = value.unsigned_abs();
    let scale = 10_u64.checked_pow(u32::from(format.minor_digits)).unwrap_or(u64::MAX);
    let whole = magnitude / scale;
    let fraction = magnitude % scale;

    let mut rendered = String::new();
    if value < 0 {
        rendered.push('-');
    }
    rendered.push_str(&format.symbol);
    rendered.push_str(&group_thousands(whole));
    if format.minor_digits > 0 && scale != u64::MAX {
        rendered.push('.');
        rendered.push_str(&format!("{:0width$}", fraction, width = usize::from(format.minor_digits)));
    }
    rendered
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dollars() -> CurrencyFormat {
        CurrencyFormat::default()
    }

    #[test]
    fn formats_cents_with_grouping() {
        assert_eq!(format_amount(1_234_567, &dollars()), "$12,345.67");
        assert_eq!(format_amount(-12_345, &dollars()), "-$123.45");
        assert_eq!(format_amount(5, &dollars()), "$0.05");
        assert_eq!(format_amount(0, &dollars()), "$0.00");
    }

    #[test]
    fn whole_units_skip_the_fraction() {
        let yen = CurrencyFormat {
            symbol: "¥".to_string(),
            minor_digits: 0,
        };
        assert_eq!(format_amount(-1_000, &yen), "-¥1,000");
        assert_eq!(format_amount(999, &yen), "¥999");
    }

    #[test]
    fn extreme_values_do_not_panic() {
        let rendered = format_amount(i64::MIN, &dollars());
        assert!(rendered.starts_with("-$92,233,720,368,547,758."));
        assert_eq!(format_amount(i64::MAX, &dollars()), "$92,233,720,368,547,758.07");
    }
}
