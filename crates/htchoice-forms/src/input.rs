//! Option input shapes
//!
//! [`OptionsInput`] is what callers hand to a choice widget. The typed
//! constructors pick the shape explicitly; [`OptionsInput::from_json`] is the
//! one place that inspects data at runtime to decide which shape it has.

use crate::error::{OptionsError, OptionsResult};
use crate::value::{ChoiceValue, OptionKey};
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A deferred options source, invoked with no arguments at resolution time.
pub type OptionsProducer = dyn Fn() -> anyhow::Result<OptionsInput> + Send + Sync;

/// A record whose first two fields are an option's value and label.
///
/// Field names do not matter, only their order.
///
/// # Examples
///
/// ```
/// use htchoice_forms::{ChoiceRow, ChoiceValue, OptionsInput};
///
/// struct Genre {
///     id: i64,
///     name: String,
/// }
///
/// impl ChoiceRow for Genre {
///     fn field_values(&self) -> Vec<ChoiceValue> {
///         vec![self.id.into(), self.name.clone().into()]
///     }
/// }
///
/// let rows = vec![
///     Genre { id: 1, name: "Action".to_string() },
///     Genre { id: 2, name: "Drama".to_string() },
/// ];
/// let input = OptionsInput::from_rows(rows).unwrap();
/// assert!(matches!(input, OptionsInput::Rows(ref r) if r.len() == 2));
/// ```
pub trait ChoiceRow {
	/// The row's field values in declaration order.
	fn field_values(&self) -> Vec<ChoiceValue>;
}

impl ChoiceRow for Vec<ChoiceValue> {
	fn field_values(&self) -> Vec<ChoiceValue> {
		self.clone()
	}
}

impl ChoiceRow for &[ChoiceValue] {
	fn field_values(&self) -> Vec<ChoiceValue> {
		self.to_vec()
	}
}

impl<A, B> ChoiceRow for (A, B)
where
	A: Clone + Into<ChoiceValue>,
	B: Clone + Into<ChoiceValue>,
{
	fn field_values(&self) -> Vec<ChoiceValue> {
		vec![self.0.clone().into(), self.1.clone().into()]
	}
}

impl<A, B, C> ChoiceRow for (A, B, C)
where
	A: Clone + Into<ChoiceValue>,
	B: Clone + Into<ChoiceValue>,
	C: Clone + Into<ChoiceValue>,
{
	fn field_values(&self) -> Vec<ChoiceValue> {
		vec![
			self.0.clone().into(),
			self.1.clone().into(),
			self.2.clone().into(),
		]
	}
}

/// Raw options as supplied to a choice widget.
#[derive(Clone)]
pub enum OptionsInput {
	/// Explicit value to label mapping, in insertion order.
	Mapping(IndexMap<OptionKey, ChoiceValue>),
	/// Scalars used as both value and label.
	List(Vec<ChoiceValue>),
	/// `(value, label)` pairs.
	Tuples(Vec<(ChoiceValue, ChoiceValue)>),
	/// Records whose first field is the value and second the label.
	Rows(Vec<Vec<ChoiceValue>>),
	/// Options produced on demand, possibly by yet another producer.
	Producer(Arc<OptionsProducer>),
}

impl fmt::Debug for OptionsInput {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			OptionsInput::Mapping(map) => f.debug_tuple("Mapping").field(map).finish(),
			OptionsInput::List(list) => f.debug_tuple("List").field(list).finish(),
			OptionsInput::Tuples(pairs) => f.debug_tuple("Tuples").field(pairs).finish(),
			OptionsInput::Rows(rows) => f.debug_tuple("Rows").field(rows).finish(),
			OptionsInput::Producer(_) => f.write_str("Producer(..)"),
		}
	}
}

impl OptionsInput {
	/// Build an explicit mapping. A repeated key keeps its first position and
	/// its last label.
	///
	/// # Examples
	///
	/// ```
	/// use htchoice_forms::OptionsInput;
	///
	/// let input = OptionsInput::from_mapping([(1, "Black"), (2, "White"), (3, "Gray")]);
	/// assert!(matches!(input, OptionsInput::Mapping(ref m) if m.len() == 3));
	/// ```
	pub fn from_mapping<K, L>(entries: impl IntoIterator<Item = (K, L)>) -> Self
	where
		K: Into<OptionKey>,
		L: Into<ChoiceValue>,
	{
		let mut map = IndexMap::new();
		for (key, label) in entries {
			if let Some(previous) = map.insert(key.into(), label.into()) {
				tracing::debug!("duplicate option value replaced label {:?}", previous);
			}
		}
		OptionsInput::Mapping(map)
	}

	/// Build a list whose values double as labels.
	///
	/// # Examples
	///
	/// ```
	/// use htchoice_forms::OptionsInput;
	///
	/// let input = OptionsInput::from_list(["en", "es", "pt", "fr"]);
	/// assert!(matches!(input, OptionsInput::List(ref l) if l.len() == 4));
	/// ```
	pub fn from_list<V: Into<ChoiceValue>>(values: impl IntoIterator<Item = V>) -> Self {
		OptionsInput::List(values.into_iter().map(Into::into).collect())
	}

	/// Build a list of `(value, label)` pairs.
	pub fn from_tuples<V, L>(pairs: impl IntoIterator<Item = (V, L)>) -> Self
	where
		V: Into<ChoiceValue>,
		L: Into<ChoiceValue>,
	{
		OptionsInput::Tuples(
			pairs
				.into_iter()
				.map(|(value, label)| (value.into(), label.into()))
				.collect(),
		)
	}

	/// Build a dataset from row records.
	///
	/// Fails with [`OptionsError::InvalidRowShape`] on the first row exposing
	/// fewer than two fields.
	pub fn from_rows<R: ChoiceRow>(rows: impl IntoIterator<Item = R>) -> OptionsResult<Self> {
		let rows = rows
			.into_iter()
			.enumerate()
			.map(|(index, row)| {
				let fields = row.field_values();
				check_row_width(index, fields.len())?;
				Ok(fields)
			})
			.collect::<OptionsResult<Vec<_>>>()?;
		Ok(OptionsInput::Rows(rows))
	}

	/// Defer options until the widget is about to read them.
	///
	/// # Examples
	///
	/// ```
	/// use htchoice_forms::OptionsInput;
	///
	/// let input = OptionsInput::from_producer(|| {
	///     Ok(OptionsInput::from_mapping([(1, "Category A"), (2, "Category B")]))
	/// });
	/// assert!(input.is_producer());
	/// ```
	pub fn from_producer<F>(producer: F) -> Self
	where
		F: Fn() -> anyhow::Result<OptionsInput> + Send + Sync + 'static,
	{
		OptionsInput::Producer(Arc::new(producer))
	}

	/// Detect the shape of dynamic option data.
	///
	/// - an empty array or object is an empty mapping
	/// - a collection whose first element is an array or object is a dataset
	/// - an object whose first key is textual or a positive integer is a mapping
	/// - any other array or object is a list of values
	///
	/// Any other JSON value fails with [`OptionsError::InvalidOptionsType`].
	///
	/// # Examples
	///
	/// ```
	/// use htchoice_forms::{OptionsError, OptionsInput};
	/// use serde_json::json;
	///
	/// let rows = OptionsInput::from_json(&json!([
	///     {"id": 1, "name": "Action"},
	///     {"id": 2, "name": "Drama"},
	/// ]))
	/// .unwrap();
	/// assert!(matches!(rows, OptionsInput::Rows(_)));
	///
	/// let err = OptionsInput::from_json(&json!(42)).unwrap_err();
	/// assert!(matches!(err, OptionsError::InvalidOptionsType(_)));
	/// ```
	pub fn from_json(value: &Value) -> OptionsResult<Self> {
		match value {
			Value::Array(items) => match items.first() {
				None => Ok(OptionsInput::Mapping(IndexMap::new())),
				Some(first) if is_json_row(first) => rows_from_json(items.iter()),
				Some(_) => Ok(OptionsInput::List(
					items.iter().map(scalar_from_json).collect::<OptionsResult<_>>()?,
				)),
			},
			Value::Object(entries) => {
				let Some((first_key, first_value)) = entries.iter().next() else {
					return Ok(OptionsInput::Mapping(IndexMap::new()));
				};
				if is_json_row(first_value) {
					return rows_from_json(entries.values());
				}
				match OptionKey::from(first_key.as_str()) {
					OptionKey::Int(i) if i <= 0 => Ok(OptionsInput::List(
						entries
							.values()
							.map(scalar_from_json)
							.collect::<OptionsResult<_>>()?,
					)),
					_ => Ok(OptionsInput::Mapping(
						entries
							.iter()
							.map(|(key, label)| {
								Ok::<_, OptionsError>((
									OptionKey::from(key.as_str()),
									scalar_from_json(label)?,
								))
							})
							.collect::<OptionsResult<_>>()?,
					)),
				}
			}
			other => Err(OptionsError::InvalidOptionsType(json_kind(other).to_string())),
		}
	}

	pub fn is_producer(&self) -> bool {
		matches!(self, OptionsInput::Producer(_))
	}
}

impl TryFrom<Value> for OptionsInput {
	type Error = OptionsError;

	fn try_from(value: Value) -> Result<Self, Self::Error> {
		OptionsInput::from_json(&value)
	}
}

pub(crate) fn check_row_width(index: usize, fields: usize) -> OptionsResult<()> {
	if fields < 2 {
		return Err(OptionsError::InvalidRowShape { index, fields });
	}
	Ok(())
}

fn is_json_row(value: &Value) -> bool {
	matches!(value, Value::Array(_) | Value::Object(_))
}

fn rows_from_json<'a>(rows: impl Iterator<Item = &'a Value>) -> OptionsResult<OptionsInput> {
	let rows = rows
		.enumerate()
		.map(|(index, row)| {
			let fields: Vec<&Value> = match row {
				Value::Array(items) => items.iter().collect(),
				Value::Object(entries) => entries.values().collect(),
				Value::Null => Vec::new(),
				scalar => vec![scalar],
			};
			check_row_width(index, fields.len())?;
			// Only the value and label columns matter
			fields
				.into_iter()
				.take(2)
				.map(scalar_from_json)
				.collect::<OptionsResult<Vec<_>>>()
		})
		.collect::<OptionsResult<Vec<_>>>()?;
	Ok(OptionsInput::Rows(rows))
}

fn scalar_from_json(value: &Value) -> OptionsResult<ChoiceValue> {
	ChoiceValue::from_json(value)
		.ok_or_else(|| OptionsError::InvalidOptionsType(json_kind(value).to_string()))
}

fn json_kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "boolean",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}
