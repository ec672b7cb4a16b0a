//! Built-in formatting functions.

use std::sync::OnceLock;

use chrono::{Datelike, Local, NaiveDate};
use phonenumber::country;
use regex::Regex;

use super::registry::{formatting_fn, FormattingRegistry};
use crate::config::MappingConfig;
use crate::error::MappingError;

/// Names of the built-in functions.
pub const BUILTIN_FUNCTIONS: [&str; 6] = [
    "format_phone_number",
    "calculate_age",
    "extract_country_from_address",
    "add_prefix",
    "capitalize_name",
    "current_date",
];

pub const INVALID_PHONE_NUMBER: &str = "Invalid number";

/// Registers every built-in function.
///
/// `format_phone_number` falls back to `config.default_phone_region`.
pub fn register_builtin_functions(
    registry: &FormattingRegistry,
    config: &MappingConfig,
) -> Result<(), MappingError> {
    let region = config.default_phone_region.clone();
    registry.register(
        "format_phone_number",
        formatting_fn(move |value, args| {
            let region = args.first().map(String::as_str).unwrap_or(&region);
            format_phone_number(value, region).map(Some)
        }),
    )?;

    registry.register(
        "calculate_age",
        formatting_fn(|value, args| {
            let format = args.first().map(String::as_str).unwrap_or("%Y-%m-%d");
            Ok(calculate_age(value, format, Local::now().date_naive()).map(|age| age.to_string()))
        }),
    )?;
    registry.register(
        "extract_country_from_address",
        formatting_fn(|value, _| Ok(extract_country_from_address(value))),
    )?;
    registry.register(
        "add_prefix",
        formatting_fn(|value, args| {
            let prefix = args.first().map(String::as_str).unwrap_or("");
            Ok(Some(add_prefix(value, prefix)))
        }),
    )?;
    registry.register(
        "capitalize_name",
        formatting_fn(|value, _| Ok(Some(capitalize_name(value)))),
    )?;
    registry.register(
        "current_date",
        formatting_fn(|_, _| Ok(Some(Local::now().format("%Y-%m-%d %H:%M:%S%.6f").to_string()))),
    )?;
    Ok(())
}

fn phone_noise(international: bool) -> &'static Regex {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    static DIGITS_AND_PLUS: OnceLock<Regex> = OnceLock::new();
    if international {
        DIGITS_AND_PLUS.get_or_init(|| Regex::new(r"[^\d+]").expect("valid regex"))
    } else {
        DIGITS.get_or_init(|| Regex::new(r"\D").expect("valid regex"))
    }
}

/// Formats a phone number as `+<country code>-<national number>`.
///
/// Numbers starting with `+` carry their own country code; others are read
/// as local numbers of `region` (ISO code such as `IN`). A country code
/// repeated in front of a local number is dropped. Returns
/// [`INVALID_PHONE_NUMBER`] when the number does not parse or is not valid.
///
/// # Errors
/// `FormattingFailed` if a local number is given with an unknown region.
pub fn format_phone_number(value: &str, region: &str) -> Result<String, MappingError> {
    let value = value.trim();
    let international = value.starts_with('+');
    let cleaned = phone_noise(international).replace_all(value, "").into_owned();

    let parsed = if international {
        phonenumber::parse(None, &cleaned)
    } else {
        let country = parse_region(region)?;
        phonenumber::parse(Some(country), &cleaned).and_then(|number| {
            if cleaned.starts_with(&number.code().value().to_string()) {
                phonenumber::parse(Some(country), number.national().value().to_string())
            } else {
                Ok(number)
            }
        })
    };

    match parsed {
        Ok(number) if phonenumber::is_valid(&number) => Ok(format!(
            "+{}-{}",
            number.code().value(),
            number.national().value()
        )),
        _ => Ok(INVALID_PHONE_NUMBER.to_string()),
    }
}

fn parse_region(region: &str) -> Result<country::Id, MappingError> {
    region
        .trim()
        .to_ascii_uppercase()
        .parse::<country::Id>()
        .map_err(|_| MappingError::FormattingFailed {
            function: "format_phone_number".to_string(),
            message: format!("unknown region '{}'", region),
        })
}

/// Age in whole years on `today` for a date of birth in `format`.
///
/// Returns `None` if the date does not parse.
pub fn calculate_age(dob: &str, format: &str, today: NaiveDate) -> Option<i32> {
    let dob = NaiveDate::parse_from_str(dob.trim(), format).ok()?;
    let before_birthday = (today.month(), today.day()) < (dob.month(), dob.day());
    Some(today.year() - dob.year() - i32::from(before_birthday))
}

/// Last comma-separated part of an address, if it has more than one part.
pub fn extract_country_from_address(address: &str) -> Option<String> {
    let parts: Vec<&str> = address.trim().split(',').collect();
    if parts.len() > 1 {
        parts.last().map(|p| p.trim().to_string())
    } else {
        None
    }
}

/// Prepends `prefix` to a non-empty value.
pub fn add_prefix(value: &str, prefix: &str) -> String {
    if value.is_empty() {
        String::new()
    } else {
        format!("{}{}", prefix, value)
    }
}

/// Upper-cases the first letter of each word and lower-cases the rest.
pub fn capitalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
