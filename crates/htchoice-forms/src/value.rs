//! Scalar values carried by choice options
//!
//! Option values, labels and submitted candidates all live in the closed
//! scalar set [`ChoiceValue`]. Keys of a resolved option map use the narrower
//! [`OptionKey`], which canonicalizes scalars the way associative-array keys
//! behave: integral text becomes an integer key, floats are truncated.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

// Canonical decimal integer: no sign other than a leading minus, no leading
// zeros, and "-0" excluded.
static INTEGER_KEY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^(?:0|-?[1-9][0-9]*)$").expect("INTEGER_KEY_REGEX: invalid regex pattern")
});

/// A scalar option value, label or submitted candidate.
///
/// # Examples
///
/// ```
/// use htchoice_forms::ChoiceValue;
///
/// assert_eq!(ChoiceValue::from(3).to_string(), "3");
/// assert_eq!(ChoiceValue::from(2.0).to_string(), "2");
/// assert_eq!(ChoiceValue::from("Drama").to_string(), "Drama");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChoiceValue {
	Int(i64),
	Float(f64),
	Text(String),
}

impl ChoiceValue {
	/// Convert a JSON scalar into a choice value.
	///
	/// Booleans become `0`/`1`. Null, arrays and objects are not scalars and
	/// yield `None`.
	///
	/// # Examples
	///
	/// ```
	/// use htchoice_forms::ChoiceValue;
	/// use serde_json::json;
	///
	/// assert_eq!(ChoiceValue::from_json(&json!(7)), Some(ChoiceValue::Int(7)));
	/// assert_eq!(ChoiceValue::from_json(&json!(true)), Some(ChoiceValue::Int(1)));
	/// assert_eq!(ChoiceValue::from_json(&json!(null)), None);
	/// assert_eq!(ChoiceValue::from_json(&json!([1, 2])), None);
	/// ```
	pub fn from_json(value: &serde_json::Value) -> Option<Self> {
		match value {
			serde_json::Value::Number(n) => n
				.as_i64()
				.map(ChoiceValue::Int)
				.or_else(|| n.as_f64().map(ChoiceValue::Float)),
			serde_json::Value::String(s) => Some(ChoiceValue::Text(s.clone())),
			serde_json::Value::Bool(b) => Some(ChoiceValue::Int(i64::from(*b))),
			serde_json::Value::Null
			| serde_json::Value::Array(_)
			| serde_json::Value::Object(_) => None,
		}
	}
}

/// Floats always print in plain decimal form, never in exponent notation:
/// `1e21` prints as `"1000000000000000000000"` and `1e-7` as `"0.0000001"`.
/// Loose comparison still matches such values against exponent text, since
/// numeric text is compared by value.
impl fmt::Display for ChoiceValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ChoiceValue::Int(i) => write!(f, "{}", i),
			// Integral floats print without a fraction ("3", not "3.0")
			ChoiceValue::Float(x) => write!(f, "{}", x),
			ChoiceValue::Text(s) => f.write_str(s),
		}
	}
}

impl From<i64> for ChoiceValue {
	fn from(value: i64) -> Self {
		ChoiceValue::Int(value)
	}
}

impl From<i32> for ChoiceValue {
	fn from(value: i32) -> Self {
		ChoiceValue::Int(i64::from(value))
	}
}

impl From<u32> for ChoiceValue {
	fn from(value: u32) -> Self {
		ChoiceValue::Int(i64::from(value))
	}
}

impl From<f64> for ChoiceValue {
	fn from(value: f64) -> Self {
		ChoiceValue::Float(value)
	}
}

impl From<&str> for ChoiceValue {
	fn from(value: &str) -> Self {
		ChoiceValue::Text(value.to_string())
	}
}

impl From<String> for ChoiceValue {
	fn from(value: String) -> Self {
		ChoiceValue::Text(value)
	}
}

impl From<OptionKey> for ChoiceValue {
	fn from(key: OptionKey) -> Self {
		match key {
			OptionKey::Int(i) => ChoiceValue::Int(i),
			OptionKey::Text(s) => ChoiceValue::Text(s),
		}
	}
}

/// Key of a resolved option map.
///
/// Converting any scalar into a key canonicalizes it, so `1`, `1.7` and `"1"`
/// all address the same option while `"01"` and `"1.0"` stay textual.
///
/// # Examples
///
/// ```
/// use htchoice_forms::OptionKey;
///
/// assert_eq!(OptionKey::from("5"), OptionKey::Int(5));
/// assert_eq!(OptionKey::from("05"), OptionKey::Text("05".to_string()));
/// assert_eq!(OptionKey::from(2.9), OptionKey::Int(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum OptionKey {
	Int(i64),
	Text(String),
}

impl OptionKey {
	fn from_text(text: String) -> Self {
		if INTEGER_KEY_REGEX.is_match(&text) {
			// Out-of-range integers stay textual
			if let Ok(i) = text.parse::<i64>() {
				return OptionKey::Int(i);
			}
		}
		OptionKey::Text(text)
	}

	/// The key as a choice value, for comparison against candidates.
	pub fn to_value(&self) -> ChoiceValue {
		ChoiceValue::from(self.clone())
	}
}

impl fmt::Display for OptionKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			OptionKey::Int(i) => write!(f, "{}", i),
			OptionKey::Text(s) => f.write_str(s),
		}
	}
}

impl From<ChoiceValue> for OptionKey {
	fn from(value: ChoiceValue) -> Self {
		match value {
			ChoiceValue::Int(i) => OptionKey::Int(i),
			// Saturating truncation toward zero; NaN maps to 0
			ChoiceValue::Float(x) => OptionKey::Int(x as i64),
			ChoiceValue::Text(s) => OptionKey::from_text(s),
		}
	}
}

impl From<i64> for OptionKey {
	fn from(value: i64) -> Self {
		OptionKey::Int(value)
	}
}

impl From<i32> for OptionKey {
	fn from(value: i32) -> Self {
		OptionKey::Int(i64::from(value))
	}
}

impl From<f64> for OptionKey {
	fn from(value: f64) -> Self {
		OptionKey::from(ChoiceValue::Float(value))
	}
}

impl From<&str> for OptionKey {
	fn from(value: &str) -> Self {
		OptionKey::from_text(value.to_string())
	}
}

impl From<String> for OptionKey {
	fn from(value: String) -> Self {
		OptionKey::from_text(value)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case("0", OptionKey::Int(0))]
	#[case("42", OptionKey::Int(42))]
	#[case("-7", OptionKey::Int(-7))]
	#[case("-0", OptionKey::Text("-0".to_string()))]
	#[case("007", OptionKey::Text("007".to_string()))]
	#[case("+5", OptionKey::Text("+5".to_string()))]
	#[case("1.0", OptionKey::Text("1.0".to_string()))]
	#[case(" 1", OptionKey::Text(" 1".to_string()))]
	#[case("99999999999999999999", OptionKey::Text("99999999999999999999".to_string()))]
	#[case("en", OptionKey::Text("en".to_string()))]
	fn test_text_key_canonicalization(#[case] input: &str, #[case] expected: OptionKey) {
		assert_eq!(OptionKey::from(input), expected);
	}

	#[rstest]
	fn test_float_key_truncates_toward_zero() {
		assert_eq!(OptionKey::from(1.9), OptionKey::Int(1));
		assert_eq!(OptionKey::from(-1.9), OptionKey::Int(-1));
	}

	#[rstest]
	fn test_float_display_drops_integral_fraction() {
		assert_eq!(ChoiceValue::Float(3.0).to_string(), "3");
		assert_eq!(ChoiceValue::Float(0.5).to_string(), "0.5");
	}

	#[rstest]
	#[case(1e21, "1000000000000000000000")]
	#[case(1e-7, "0.0000001")]
	#[case(-2.5e3, "-2500")]
	fn test_float_display_has_no_exponent(#[case] input: f64, #[case] expected: &str) {
		assert_eq!(ChoiceValue::Float(input).to_string(), expected);
	}

	#[rstest]
	fn test_from_json_large_unsigned_becomes_float() {
		let value = ChoiceValue::from_json(&json!(u64::MAX));
		assert!(matches!(value, Some(ChoiceValue::Float(_))));
	}

	#[rstest]
	fn test_choice_value_deserializes_untagged() {
		let values: Vec<ChoiceValue> = serde_json::from_value(json!([1, 2.5, "x"])).unwrap();
		assert_eq!(
			values,
			vec![
				ChoiceValue::Int(1),
				ChoiceValue::Float(2.5),
				ChoiceValue::Text("x".to_string())
			]
		);
	}
}
