//! Scalar parsers for text tokens.
//!
//! Each parser takes text and returns a typed number or an error. The bounded
//! variants build on the plain ones:
//!
//! | Parser | Accepts |
//! |--------|---------|
//! | [`parse_int`] | any integer literal |
//! | [`parse_float`] | any floating-point literal |
//! | [`parse_positive_int`] | integers `>= 0` |
//! | [`parse_positive_float`] | floats `>= 0.0` |
//! | [`parse_float_between_0_and_1`] | floats in `[0.0, 1.0]` |
//! | [`parse_positive_int_less_than`] | integers in `[0, bound)` |
//!
//! "Positive" includes zero. Surrounding whitespace is ignored.
//!
//! ```
//! use typed_columns::scalar::{parse_positive_int_less_than, parse_float_between_0_and_1};
//!
//! assert_eq!(parse_positive_int_less_than("5", 6)?, 5);
//! assert!(parse_positive_int_less_than("5", 5).is_err());
//! assert_eq!(parse_float_between_0_and_1(" 0.99999 ")?, 0.99999);
//! # Ok::<(), typed_columns::error::ReaderError>(())
//! ```

use crate::error::{ReaderError, Result};
use crate::row::Value;

/// Something a scalar parser can read text from.
///
/// Plain strings always provide text. A [`Value`] only does when it is
/// [`Value::Text`]; handing an already converted number to a parser is a
/// [`ReaderError::Type`] error.
pub trait ScalarInput {
    /// Borrow the input as text.
    ///
    /// # Errors
    ///
    /// Returns [`ReaderError::Type`] if the input is not text.
    fn as_text(&self) -> Result<&str>;
}

impl ScalarInput for str {
    fn as_text(&self) -> Result<&str> {
        Ok(self)
    }
}

impl ScalarInput for String {
    fn as_text(&self) -> Result<&str> {
        Ok(self)
    }
}

impl ScalarInput for Value {
    fn as_text(&self) -> Result<&str> {
        match self {
            Self::Text(s) => Ok(s),
            other => Err(ReaderError::Type(format!(
                "input is not a string: {other} ({})",
                other.kind_name()
            ))),
        }
    }
}

impl<T: ScalarInput + ?Sized> ScalarInput for &T {
    fn as_text(&self) -> Result<&str> {
        (**self).as_text()
    }
}

/// Parse an integer literal.
///
/// # Errors
///
/// [`ReaderError::Parse`] if the text is not an integer that fits in `i64`,
/// [`ReaderError::Type`] if the input is not text.
pub fn parse_int<T: ScalarInput + ?Sized>(input: &T) -> Result<i64> {
    let text = input.as_text()?;
    text.trim()
        .parse::<i64>()
        .map_err(|e| ReaderError::Parse(format!("not an integer: {text:?} ({e})")))
}

/// Parse a floating-point literal.
///
/// # Errors
///
/// [`ReaderError::Parse`] if the text is not a float,
/// [`ReaderError::Type`] if the input is not text.
pub fn parse_float<T: ScalarInput + ?Sized>(input: &T) -> Result<f64> {
    let text = input.as_text()?;
    text.trim()
        .parse::<f64>()
        .map_err(|e| ReaderError::Parse(format!("not a float: {text:?} ({e})")))
}

/// Parse a non-negative integer.
///
/// # Errors
///
/// As [`parse_int`], plus [`ReaderError::Range`] for negative values.
pub fn parse_positive_int<T: ScalarInput + ?Sized>(input: &T) -> Result<i64> {
    let value = parse_int(input)?;
    if value < 0 {
        return Err(ReaderError::Range(format!(
            "integer value is not positive: {value}"
        )));
    }
    Ok(value)
}

/// Parse a non-negative float.
///
/// # Errors
///
/// As [`parse_float`], plus [`ReaderError::Range`] for negative values.
pub fn parse_positive_float<T: ScalarInput + ?Sized>(input: &T) -> Result<f64> {
    let value = parse_float(input)?;
    if value < 0.0 {
        return Err(ReaderError::Range(format!(
            "float value is not positive: {value}"
        )));
    }
    Ok(value)
}

/// Parse a float in the closed interval `[0.0, 1.0]`.
///
/// # Errors
///
/// As [`parse_float`], plus [`ReaderError::Range`] outside the interval.
pub fn parse_float_between_0_and_1<T: ScalarInput + ?Sized>(input: &T) -> Result<f64> {
    let value = parse_float(input)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(ReaderError::Range(format!(
            "float value is not in range [0.0, 1.0]: {value}"
        )));
    }
    Ok(value)
}

/// Parse a non-negative integer strictly below `bound`.
///
/// # Errors
///
/// As [`parse_positive_int`], plus [`ReaderError::Range`] when the value is
/// `>= bound`.
pub fn parse_positive_int_less_than<T: ScalarInput + ?Sized>(input: &T, bound: i64) -> Result<i64> {
    let value = parse_positive_int(input)?;
    if value >= bound {
        return Err(ReaderError::Range(format!(
            "integer value {value} is greater than or equal to threshold {bound}"
        )));
    }
    Ok(value)
}
