//! Loose value comparison for selected-option matching
//!
//! Submitted form values arrive as text while option keys are often
//! integers, so selection uses a permissive comparator over the closed
//! scalar set instead of exact equality:
//!
//! - numbers compare numerically, regardless of integer/float kind
//! - numeric text compares numerically against numbers and other numeric text
//! - anything else compares by its textual form
//!
//! On top of that, [`compare_values`] pins the zero case: an option and a
//! candidate that both stringify to `"0"` always match.

use crate::value::ChoiceValue;
use regex::Regex;
use std::sync::LazyLock;

// Numeric text: optional surrounding whitespace, optional sign, digits with
// optional fraction and exponent.
static NUMERIC_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[ \t\n\r\x0B\x0C]*[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?[ \t\n\r\x0B\x0C]*$")
		.expect("NUMERIC_REGEX: invalid regex pattern")
});

#[derive(Debug, Clone, Copy)]
enum Number {
	Int(i64),
	Float(f64),
}

impl PartialEq for Number {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Number::Int(a), Number::Int(b)) => a == b,
			(a, b) => a.as_f64() == b.as_f64(),
		}
	}
}

impl Number {
	fn as_f64(self) -> f64 {
		match self {
			Number::Int(i) => i as f64,
			Number::Float(x) => x,
		}
	}
}

fn parse_numeric(text: &str) -> Option<Number> {
	if !NUMERIC_REGEX.is_match(text) {
		return None;
	}
	let trimmed = text.trim_matches(|c: char| c.is_ascii_whitespace() || c == '\x0B');
	trimmed
		.parse::<i64>()
		.map(Number::Int)
		.ok()
		.or_else(|| trimmed.parse::<f64>().ok().map(Number::Float))
}

fn as_number(value: &ChoiceValue) -> Option<Number> {
	match value {
		ChoiceValue::Int(i) => Some(Number::Int(*i)),
		ChoiceValue::Float(x) => Some(Number::Float(*x)),
		ChoiceValue::Text(s) => parse_numeric(s),
	}
}

/// Returns whether `text` is numeric in the loose-comparison sense.
///
/// # Examples
///
/// ```
/// use htchoice_forms::compare::is_numeric;
///
/// assert!(is_numeric("42"));
/// assert!(is_numeric(" -1.5e3 "));
/// assert!(!is_numeric("4 apples"));
/// assert!(!is_numeric(""));
/// ```
pub fn is_numeric(text: &str) -> bool {
	parse_numeric(text).is_some()
}

/// Loose equality over choice scalars.
///
/// # Examples
///
/// ```
/// use htchoice_forms::ChoiceValue;
/// use htchoice_forms::compare::loose_eq;
///
/// assert!(loose_eq(&ChoiceValue::Int(3), &ChoiceValue::from("3")));
/// assert!(loose_eq(&ChoiceValue::from("1e1"), &ChoiceValue::from("10")));
/// assert!(!loose_eq(&ChoiceValue::Int(0), &ChoiceValue::from("a")));
/// ```
pub fn loose_eq(a: &ChoiceValue, b: &ChoiceValue) -> bool {
	match (as_number(a), as_number(b)) {
		(Some(x), Some(y)) => x == y,
		_ => a.to_string() == b.to_string(),
	}
}

/// Whether `candidate` selects the option stored under `option`.
///
/// An absent candidate never selects anything.
///
/// # Examples
///
/// ```
/// use htchoice_forms::ChoiceValue;
/// use htchoice_forms::compare::compare_values;
///
/// assert!(compare_values(&ChoiceValue::Int(0), Some(&ChoiceValue::from("0"))));
/// assert!(compare_values(&ChoiceValue::Int(3), Some(&ChoiceValue::from("3"))));
/// assert!(!compare_values(&ChoiceValue::Int(3), None));
/// assert!(!compare_values(&ChoiceValue::Int(3), Some(&ChoiceValue::Int(4))));
/// ```
pub fn compare_values(option: &ChoiceValue, candidate: Option<&ChoiceValue>) -> bool {
	let Some(candidate) = candidate else {
		return false;
	};
	if candidate.to_string() == "0" && option.to_string() == "0" {
		return true;
	}
	loose_eq(option, candidate)
}
