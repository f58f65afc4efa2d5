use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde_json::{Number, Value};

pub const JPY: &str = "JPY";
pub const USD: &str = "USD";

const NEAR_ZERO: Decimal = dec!(0.01);

/// Renders an API amount for display.
///
/// * absent or `null` -> `"0"`
/// * magnitude below 0.01 -> `"0"` for JPY or integer-typed input, `"0.00"` otherwise
/// * JPY -> truncated toward zero, thousands-separated, no decimals
/// * anything else -> thousands-separated, two decimals
///
/// Values that cannot be read as a number are returned in their raw form.
pub fn format_amount(value: Option<&Value>, currency: &str) -> String {
    match value {
        None | Some(Value::Null) => String::from("0"),
        Some(Value::String(text)) => format_text_amount(text, currency),
        Some(Value::Number(number)) => format_number_amount(number, currency),
        Some(other) => other.to_string(),
    }
}

/// Same rules as [`format_amount`] for a value computed locally, which is
/// always treated as fractional.
pub fn format_decimal(value: Decimal, currency: &str) -> String {
    render_amount(value, false, currency)
}

/// Currency-marked amount: `$1,234.50`, `¥1,234` or `1,234.50 EUR`.
pub fn format_money(value: Decimal, currency: &str) -> String {
    attach_currency(&format_decimal(value, currency), currency)
}

/// Quantity with up to four decimals and trailing zeros removed.
pub fn format_quantity(value: Option<&Value>) -> String {
    match value.and_then(decimal_from_value) {
        Some(quantity) => {
            let mut rounded = quantity.round_dp_with_strategy(4, RoundingStrategy::MidpointNearestEven);
            rounded.rescale(4);
            let grouped = group_thousands(&rounded.to_string());
            grouped
                .trim_end_matches('0')
                .trim_end_matches('.')
                .to_string()
        }
        None => raw_string(value),
    }
}

/// Signed percentage with two decimals, e.g. `+1.50%`.
pub fn format_percent(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(2);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("{}%", rounded)
    } else {
        format!("+{}%", rounded.abs())
    }
}

/// Lenient decimal parsing: plain decimals, scientific notation (`0E-10`)
/// and anything `f64` accepts.
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    Decimal::from_str(trimmed)
        .ok()
        .or_else(|| Decimal::from_scientific(trimmed).ok())
        .or_else(|| {
            trimmed
                .parse::<f64>()
                .ok()
                .filter(|float| float.is_finite())
                .and_then(Decimal::from_f64_retain)
        })
}

pub fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(text) => parse_decimal(text),
        Value::Number(number) => decimal_from_number(number),
        _ => None,
    }
}

/// Display form of a JSON value without the quotes serde_json puts around
/// strings.
pub fn raw_string(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::from("0"),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

fn format_text_amount(text: &str, currency: &str) -> String {
    match parse_decimal(text) {
        Some(decimal) => {
            let integer_typed = !text.contains(['.', 'e', 'E']);
            render_amount(decimal, integer_typed, currency)
        }
        None => text.to_string(),
    }
}

fn format_number_amount(number: &Number, currency: &str) -> String {
    let integer_typed = number.is_i64() || number.is_u64();
    match decimal_from_number(number) {
        Some(decimal) => render_amount(decimal, integer_typed, currency),
        None => number.to_string(),
    }
}

fn decimal_from_number(number: &Number) -> Option<Decimal> {
    if let Some(int) = number.as_i64() {
        return Some(Decimal::from(int));
    }
    if let Some(int) = number.as_u64() {
        return Some(Decimal::from(int));
    }
    number.as_f64().and_then(Decimal::from_f64_retain)
}

fn render_amount(value: Decimal, integer_typed: bool, currency: &str) -> String {
    let is_jpy = currency == JPY;

    if value.abs() < NEAR_ZERO {
        return String::from(if is_jpy || integer_typed { "0" } else { "0.00" });
    }

    if is_jpy {
        let truncated = value.trunc();
        if truncated.is_zero() {
            return String::from("0");
        }
        let mut whole = truncated;
        whole.rescale(0);
        group_thousands(&whole.to_string())
    } else {
        let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
        rounded.rescale(2);
        group_thousands(&rounded.to_string())
    }
}

fn attach_currency(amount: &str, currency: &str) -> String {
    match currency {
        USD => format!("${}", amount),
        JPY => format!("¥{}", amount),
        other => format!("{} {}", amount, other),
    }
}

/// Inserts `,` every three digits of the integer part of a plain decimal
/// string.
pub fn group_thousands(plain: &str) -> String {
    let (sign, unsigned) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(plain.len() + int_part.len() / 3);
    grouped.push_str(sign);
    for (idx, digit) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(frac_part) = frac_part {
        grouped.push('.');
        grouped.push_str(frac_part);
    }

    grouped
}
