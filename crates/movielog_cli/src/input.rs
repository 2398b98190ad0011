//! Prompt-driven input collection and validation.
//!
//! # Responsibility
//! - Collect user input line by line, re-prompting on invalid values.
//! - Enforce the presentation-side validation rules: required text,
//!   four-digit years, `DD/MM/YYYY` calendar dates, numeric ratings.
//!
//! # Invariants
//! - Validation happens here, before anything reaches the repository;
//!   the repository never sees malformed years or dates.
//! - Watched dates are kept as the original text once validated, never
//!   converted to a date type.

use movielog_core::FieldUpdate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, BufRead, Write};

/// Literal a user enters at an update prompt to clear an optional field.
pub const CLEAR_SENTINEL: &str = "-";

static DATE_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2})/(\d{2})/(\d{4})$").expect("date shape pattern is valid")
});

/// Input rejection reported back to the user at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was left empty.
    Required(&'static str),
    /// Release year is not exactly four digits or not an integer.
    InvalidYear(String),
    /// Rating does not parse as a number.
    InvalidRating(String),
    /// Watched date is not a real `DD/MM/YYYY` calendar date.
    InvalidDate(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Required(field) => write!(f, "{field} is required"),
            Self::InvalidYear(input) => {
                write!(f, "invalid year `{input}`; expected exactly 4 digits")
            }
            Self::InvalidRating(input) => {
                write!(f, "invalid rating `{input}`; expected a number")
            }
            Self::InvalidDate(input) => {
                write!(f, "invalid date `{input}`; expected DD/MM/YYYY")
            }
        }
    }
}

impl Error for ValidationError {}

/// Validates a release year: exactly four ASCII digits, integer-parseable.
pub fn parse_release_year(input: &str) -> Result<i32, ValidationError> {
    let trimmed = input.trim();
    if trimmed.len() != 4 || !trimmed.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(ValidationError::InvalidYear(trimmed.to_string()));
    }
    trimmed
        .parse()
        .map_err(|_| ValidationError::InvalidYear(trimmed.to_string()))
}

/// Validates a rating as a plain number. Range 0-10 is a UI convention
/// only and deliberately not enforced, matching the store contract.
pub fn parse_rating(input: &str) -> Result<f64, ValidationError> {
    let trimmed = input.trim();
    trimmed
        .parse()
        .map_err(|_| ValidationError::InvalidRating(trimmed.to_string()))
}

/// Validates a watched date as a real `DD/MM/YYYY` calendar date and
/// returns the original (trimmed) text for storage.
pub fn parse_watched_date(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    let captures = DATE_SHAPE
        .captures(trimmed)
        .ok_or_else(|| ValidationError::InvalidDate(trimmed.to_string()))?;

    // The shape regex guarantees the captures are digit runs.
    let day: u32 = captures[1].parse().unwrap_or(0);
    let month: u32 = captures[2].parse().unwrap_or(0);
    let year: i32 = captures[3].parse().unwrap_or(0);

    if !(1..=12).contains(&month) || day < 1 || day > days_in_month(month, year) {
        return Err(ValidationError::InvalidDate(trimmed.to_string()));
    }

    Ok(trimmed.to_string())
}

fn days_in_month(month: u32, year: i32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn read_trimmed(prompt: &str) -> io::Result<String> {
    print!("{prompt} ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Prompts until a non-empty value is entered.
pub fn prompt_required(label: &'static str, prompt: &str) -> io::Result<String> {
    loop {
        let value = read_trimmed(prompt)?;
        if !value.is_empty() {
            return Ok(value);
        }
        println!("{}", ValidationError::Required(label));
    }
}

/// Prompts until a valid four-digit year is entered.
pub fn prompt_release_year(prompt: &str) -> io::Result<i32> {
    loop {
        match parse_release_year(&read_trimmed(prompt)?) {
            Ok(year) => return Ok(year),
            Err(err) => println!("{err}"),
        }
    }
}

/// Prompts for an optional free-text field. Empty input means absent.
pub fn prompt_optional_text(prompt: &str) -> io::Result<Option<String>> {
    let value = read_trimmed(prompt)?;
    Ok(if value.is_empty() { None } else { Some(value) })
}

/// Prompts for an optional rating, re-prompting on non-numeric input.
pub fn prompt_optional_rating(prompt: &str) -> io::Result<Option<f64>> {
    loop {
        let value = read_trimmed(prompt)?;
        if value.is_empty() {
            return Ok(None);
        }
        match parse_rating(&value) {
            Ok(rating) => return Ok(Some(rating)),
            Err(err) => println!("{err}"),
        }
    }
}

/// Prompts for an optional watched date, re-prompting on invalid input.
pub fn prompt_optional_date(prompt: &str) -> io::Result<Option<String>> {
    loop {
        let value = read_trimmed(prompt)?;
        if value.is_empty() {
            return Ok(None);
        }
        match parse_watched_date(&value) {
            Ok(date) => return Ok(Some(date)),
            Err(err) => println!("{err}"),
        }
    }
}

/// Update prompt for a required text field: empty keeps the current value.
pub fn prompt_patch_text(prompt: &str) -> io::Result<Option<String>> {
    let value = read_trimmed(prompt)?;
    Ok(if value.is_empty() { None } else { Some(value) })
}

/// Update prompt for the release year: empty keeps the current value.
pub fn prompt_patch_year(prompt: &str) -> io::Result<Option<i32>> {
    loop {
        let value = read_trimmed(prompt)?;
        if value.is_empty() {
            return Ok(None);
        }
        match parse_release_year(&value) {
            Ok(year) => return Ok(Some(year)),
            Err(err) => println!("{err}"),
        }
    }
}

/// Update prompt for an optional text field: empty keeps, `-` clears.
pub fn prompt_patch_optional_text(prompt: &str) -> io::Result<FieldUpdate<String>> {
    let value = read_trimmed(prompt)?;
    Ok(match value.as_str() {
        "" => FieldUpdate::Keep,
        CLEAR_SENTINEL => FieldUpdate::Clear,
        _ => FieldUpdate::Set(value),
    })
}

/// Update prompt for the rating: empty keeps, `-` clears.
pub fn prompt_patch_rating(prompt: &str) -> io::Result<FieldUpdate<f64>> {
    loop {
        let value = read_trimmed(prompt)?;
        match value.as_str() {
            "" => return Ok(FieldUpdate::Keep),
            CLEAR_SENTINEL => return Ok(FieldUpdate::Clear),
            other => match parse_rating(other) {
                Ok(rating) => return Ok(FieldUpdate::Set(rating)),
                Err(err) => println!("{err}"),
            },
        }
    }
}

/// Update prompt for the watched date: empty keeps, `-` clears.
pub fn prompt_patch_date(prompt: &str) -> io::Result<FieldUpdate<String>> {
    loop {
        let value = read_trimmed(prompt)?;
        match value.as_str() {
            "" => return Ok(FieldUpdate::Keep),
            CLEAR_SENTINEL => return Ok(FieldUpdate::Clear),
            other => match parse_watched_date(other) {
                Ok(date) => return Ok(FieldUpdate::Set(date)),
                Err(err) => println!("{err}"),
            },
        }
    }
}

/// Yes/no confirmation. Empty input resolves to `default_yes`.
pub fn prompt_confirm(prompt: &str, default_yes: bool) -> io::Result<bool> {
    let hint = if default_yes { "[Y/n]" } else { "[y/N]" };
    loop {
        let value = read_trimmed(&format!("{prompt} {hint}"))?;
        match value.to_ascii_lowercase().as_str() {
            "" => return Ok(default_yes),
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => println!("please answer y or n"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_rating, parse_release_year, parse_watched_date, ValidationError};

    #[test]
    fn release_year_requires_exactly_four_digits() {
        assert_eq!(parse_release_year("1979").unwrap(), 1979);
        assert_eq!(parse_release_year(" 2021 ").unwrap(), 2021);

        for bad in ["79", "20211", "19a9", "-199", ""] {
            assert!(matches!(
                parse_release_year(bad),
                Err(ValidationError::InvalidYear(_))
            ));
        }
    }

    #[test]
    fn rating_parses_numbers_without_range_check() {
        assert_eq!(parse_rating("7.5").unwrap(), 7.5);
        assert_eq!(parse_rating("10").unwrap(), 10.0);
        // No enforced range in the store; 0-10 is a UI convention.
        assert_eq!(parse_rating("42").unwrap(), 42.0);

        assert!(matches!(
            parse_rating("ten"),
            Err(ValidationError::InvalidRating(_))
        ));
    }

    #[test]
    fn watched_date_accepts_real_calendar_dates() {
        assert_eq!(parse_watched_date("31/12/1999").unwrap(), "31/12/1999");
        assert_eq!(parse_watched_date(" 01/01/2024 ").unwrap(), "01/01/2024");
        // 2024 is a leap year, 1900 is not.
        assert_eq!(parse_watched_date("29/02/2024").unwrap(), "29/02/2024");
        assert_eq!(parse_watched_date("29/02/2000").unwrap(), "29/02/2000");
    }

    #[test]
    fn watched_date_rejects_bad_shape_and_impossible_dates() {
        for bad in [
            "2024-02-29",
            "1/1/2024",
            "32/01/2024",
            "00/01/2024",
            "15/13/2024",
            "31/04/2024",
            "29/02/1900",
            "29/02/2023",
            "date",
        ] {
            assert!(
                matches!(
                    parse_watched_date(bad),
                    Err(ValidationError::InvalidDate(_))
                ),
                "expected `{bad}` to be rejected"
            );
        }
    }
}
