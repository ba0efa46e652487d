use num_format::{Locale, ToFormattedString};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Renders an amount with the locale's thousands separator. Whole amounts
/// print without a fraction; anything else keeps up to two decimals.
pub fn format_amount(amount: Decimal, locale: &Locale) -> String {
    let rounded = amount.round_dp(2).normalize();
    let whole = rounded.abs().trunc();

    let Some(whole_units) = whole.to_u64() else {
        return rounded.to_string();
    };

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        locale.minus_sign()
    } else {
        ""
    };
    let integer_part = whole_units.to_formatted_string(locale);

    let fraction = (rounded.abs() - whole).normalize();
    if fraction.is_zero() {
        return format!("{}{}", sign, integer_part);
    }

    // "0.5" -> "5"
    let fraction_digits = fraction.to_string();
    let fraction_digits = fraction_digits.trim_start_matches("0.");
    format!(
        "{}{}{}{}",
        sign,
        integer_part,
        locale.decimal(),
        fraction_digits
    )
}

pub fn parse_locale(name: &str) -> anyhow::Result<Locale> {
    Locale::from_name(name).map_err(|e| anyhow::anyhow!("Unknown number locale {:?}: {}", name, e))
}
