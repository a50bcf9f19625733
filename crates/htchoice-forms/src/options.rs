//! Option normalization and lazy resolution
//!
//! [`ChoiceOptions`] turns any [`OptionsInput`] into a canonical
//! [`ResolvedOptions`] map. Concrete shapes are normalized as soon as they are
//! set, so shape errors surface at configuration time. Producers are kept
//! until the options are first read, which lets option sets be fetched late
//! (for example from a database) and lets a producer hand back another
//! producer.

use crate::compare::compare_values;
use crate::error::{OptionsError, OptionsResult};
use crate::input::{OptionsInput, OptionsProducer, check_row_width};
use crate::value::{ChoiceValue, OptionKey};
use indexmap::IndexMap;
use serde::Serialize;
use std::sync::Arc;

/// Canonical ordered value to label map.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResolvedOptions {
	entries: IndexMap<OptionKey, ChoiceValue>,
}

impl ResolvedOptions {
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert an option; an existing key keeps its position and takes the new label.
	pub fn insert(&mut self, key: OptionKey, label: ChoiceValue) {
		if let Some(previous) = self.entries.insert(key, label) {
			tracing::debug!("duplicate option value replaced label {:?}", previous);
		}
	}

	pub fn get(&self, key: &OptionKey) -> Option<&ChoiceValue> {
		self.entries.get(key)
	}

	pub fn contains_key(&self, key: &OptionKey) -> bool {
		self.entries.contains_key(key)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn iter(&self) -> indexmap::map::Iter<'_, OptionKey, ChoiceValue> {
		self.entries.iter()
	}

	pub fn keys(&self) -> indexmap::map::Keys<'_, OptionKey, ChoiceValue> {
		self.entries.keys()
	}

	/// Options as `(value, label)` string pairs, in order.
	pub fn to_pairs(&self) -> Vec<(String, String)> {
		self.entries
			.iter()
			.map(|(key, label)| (key.to_string(), label.to_string()))
			.collect()
	}
}

impl<'a> IntoIterator for &'a ResolvedOptions {
	type Item = (&'a OptionKey, &'a ChoiceValue);
	type IntoIter = indexmap::map::Iter<'a, OptionKey, ChoiceValue>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.iter()
	}
}

impl FromIterator<(OptionKey, ChoiceValue)> for ResolvedOptions {
	fn from_iter<T: IntoIterator<Item = (OptionKey, ChoiceValue)>>(iter: T) -> Self {
		let mut options = ResolvedOptions::new();
		for (key, label) in iter {
			options.insert(key, label);
		}
		options
	}
}

enum OptionsState {
	Deferred(Arc<OptionsProducer>),
	Resolved(ResolvedOptions),
}

/// Options holder of a choice widget.
///
/// # Examples
///
/// ```
/// use htchoice_forms::{ChoiceOptions, OptionKey, OptionsInput};
///
/// let mut options = ChoiceOptions::new();
/// options
///     .set_options(OptionsInput::from_producer(|| {
///         Ok(OptionsInput::from_producer(|| {
///             Ok(OptionsInput::from_mapping([(1, "Category A"), (2, "Category B")]))
///         }))
///     }))
///     .unwrap();
///
/// let resolved = options.resolve().unwrap();
/// assert_eq!(resolved.len(), 2);
/// assert_eq!(resolved.get(&OptionKey::Int(2)).unwrap().to_string(), "Category B");
/// ```
pub struct ChoiceOptions {
	state: OptionsState,
	max_depth: Option<usize>,
}

impl Default for ChoiceOptions {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for ChoiceOptions {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let mut debug = f.debug_struct("ChoiceOptions");
		match &self.state {
			OptionsState::Deferred(_) => debug.field("state", &"Deferred"),
			OptionsState::Resolved(options) => debug.field("state", options),
		};
		debug.field("max_depth", &self.max_depth).finish()
	}
}

impl ChoiceOptions {
	/// Create an empty, resolved options holder.
	pub fn new() -> Self {
		Self {
			state: OptionsState::Resolved(ResolvedOptions::new()),
			max_depth: None,
		}
	}

	/// Create a holder from an initial input.
	pub fn with_input(input: OptionsInput) -> OptionsResult<Self> {
		let mut options = Self::new();
		options.set_options(input)?;
		Ok(options)
	}

	/// Limit how many producer hops [`resolve`](Self::resolve) follows.
	///
	/// Unlimited by default; a producer chain that never ends will then never
	/// finish resolving.
	pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
		self.max_depth = max_depth;
		self
	}

	pub fn max_depth(&self) -> Option<usize> {
		self.max_depth
	}

	/// Replace the stored options.
	///
	/// Concrete shapes are normalized immediately; producers are stored
	/// without being invoked.
	pub fn set_options(&mut self, input: OptionsInput) -> OptionsResult<&mut Self> {
		self.state = normalize(input)?;
		Ok(self)
	}

	/// Whether a producer is still waiting to be invoked.
	pub fn is_deferred(&self) -> bool {
		matches!(self.state, OptionsState::Deferred(_))
	}

	/// Invoke pending producers until concrete options are stored.
	///
	/// Errors raised by a producer are returned unchanged and leave that
	/// producer in place, so a later call retries it.
	pub fn resolve(&mut self) -> OptionsResult<&ResolvedOptions> {
		if !self.is_deferred() {
			tracing::trace!("options already resolved");
		}
		let mut hops = 0usize;
		while let OptionsState::Deferred(producer) = &self.state {
			if let Some(max_depth) = self.max_depth
				&& hops >= max_depth
			{
				return Err(OptionsError::ResolveDepthExceeded(max_depth));
			}
			let producer = Arc::clone(producer);
			hops += 1;
			tracing::debug!("invoking options producer (hop {})", hops);
			let next = producer().map_err(|err| match err.downcast::<OptionsError>() {
				Ok(options_err) => options_err,
				Err(other) => OptionsError::Producer(other),
			})?;
			self.set_options(next)?;
		}
		match &self.state {
			OptionsState::Resolved(options) => Ok(options),
			OptionsState::Deferred(_) => unreachable!("resolution loop exits only when resolved"),
		}
	}

	/// Resolved options, if no producer is pending.
	pub fn resolved(&self) -> Option<&ResolvedOptions> {
		match &self.state {
			OptionsState::Resolved(options) => Some(options),
			OptionsState::Deferred(_) => None,
		}
	}

	/// Whether `candidate` selects the option stored under `key`.
	///
	/// See [`compare_values`] for the matching rules.
	pub fn compare_values(&self, key: &OptionKey, candidate: Option<&ChoiceValue>) -> bool {
		compare_values(&key.to_value(), candidate)
	}
}

fn normalize(input: OptionsInput) -> OptionsResult<OptionsState> {
	let options: ResolvedOptions = match input {
		OptionsInput::Producer(producer) => return Ok(OptionsState::Deferred(producer)),
		OptionsInput::Mapping(entries) => entries.into_iter().collect(),
		OptionsInput::List(values) => values
			.into_iter()
			.map(|value| (OptionKey::from(value.clone()), value))
			.collect(),
		OptionsInput::Tuples(pairs) => pairs
			.into_iter()
			.map(|(value, label)| (OptionKey::from(value), label))
			.collect(),
		OptionsInput::Rows(rows) => {
			let mut options = ResolvedOptions::new();
			for (index, row) in rows.into_iter().enumerate() {
				check_row_width(index, row.len())?;
				let mut fields = row.into_iter();
				if let (Some(value), Some(label)) = (fields.next(), fields.next()) {
					options.insert(OptionKey::from(value), label);
				}
			}
			options
		}
	};
	Ok(OptionsState::Resolved(options))
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::sync::atomic::{AtomicUsize, Ordering};
	use std::sync::{Arc, Mutex};

	fn keys(options: &ResolvedOptions) -> Vec<String> {
		options.keys().map(ToString::to_string).collect()
	}

	#[rstest]
	fn test_list_values_double_as_labels() {
		let mut options = ChoiceOptions::with_input(OptionsInput::from_list(["en", "es", "pt"])).unwrap();

		let resolved = options.resolve().unwrap();

		assert_eq!(
			resolved.to_pairs(),
			vec![
				("en".to_string(), "en".to_string()),
				("es".to_string(), "es".to_string()),
				("pt".to_string(), "pt".to_string()),
			]
		);
	}

	#[rstest]
	fn test_tuples_use_first_as_value() {
		let mut options =
			ChoiceOptions::with_input(OptionsInput::from_tuples([(1, "Action"), (2, "Drama")])).unwrap();

		let resolved = options.resolve().unwrap();

		assert_eq!(resolved.get(&OptionKey::Int(1)), Some(&ChoiceValue::from("Action")));
		assert_eq!(resolved.get(&OptionKey::Int(2)), Some(&ChoiceValue::from("Drama")));
	}

	#[rstest]
	fn test_duplicate_values_keep_first_position_last_label() {
		let mut options = ChoiceOptions::with_input(OptionsInput::from_tuples([
			(ChoiceValue::Int(1), "One"),
			(ChoiceValue::Int(2), "Two"),
			(ChoiceValue::from("1"), "Uno"),
		]))
		.unwrap();

		let resolved = options.resolve().unwrap();

		assert_eq!(keys(resolved), vec!["1", "2"]);
		assert_eq!(resolved.get(&OptionKey::Int(1)), Some(&ChoiceValue::from("Uno")));
	}

	#[rstest]
	fn test_rows_variant_built_directly_is_still_checked() {
		let mut options = ChoiceOptions::new();

		let result = options.set_options(OptionsInput::Rows(vec![vec![ChoiceValue::Int(1)]]));

		assert!(matches!(
			result,
			Err(OptionsError::InvalidRowShape {
				index: 0,
				fields: 1
			})
		));
	}

	#[rstest]
	fn test_set_options_replaces_previous_options() {
		let mut options = ChoiceOptions::with_input(OptionsInput::from_list(["a", "b"])).unwrap();

		options.set_options(OptionsInput::from_list(["c"])).unwrap();

		assert_eq!(keys(options.resolve().unwrap()), vec!["c"]);
	}

	#[rstest]
	fn test_producer_not_invoked_until_resolve() {
		let calls = Arc::new(AtomicUsize::new(0));
		let counter = Arc::clone(&calls);
		let mut options = ChoiceOptions::with_input(OptionsInput::from_producer(move || {
			counter.fetch_add(1, Ordering::SeqCst);
			Ok(OptionsInput::from_list([1, 2]))
		}))
		.unwrap();

		assert!(options.is_deferred());
		assert!(options.resolved().is_none());
		assert_eq!(calls.load(Ordering::SeqCst), 0);

		let first = options.resolve().unwrap().clone();
		let second = options.resolve().unwrap().clone();

		assert_eq!(first, second);
		assert_eq!(calls.load(Ordering::SeqCst), 1);
	}

	#[rstest]
	fn test_producer_error_is_retried() {
		let calls = Arc::new(AtomicUsize::new(0));
		let counter = Arc::clone(&calls);
		let mut options = ChoiceOptions::with_input(OptionsInput::from_producer(move || {
			if counter.fetch_add(1, Ordering::SeqCst) == 0 {
				anyhow::bail!("connection refused");
			}
			Ok(OptionsInput::from_list(["ok"]))
		}))
		.unwrap();

		let err = options.resolve().unwrap_err();
		assert!(matches!(err, OptionsError::Producer(_)));
		assert_eq!(err.to_string(), "connection refused");
		assert!(options.is_deferred());

		assert_eq!(keys(options.resolve().unwrap()), vec!["ok"]);
	}

	#[rstest]
	fn test_shape_error_inside_producer_keeps_its_kind() {
		let mut options = ChoiceOptions::with_input(OptionsInput::from_producer(|| {
			Ok(OptionsInput::from_json(&serde_json::json!(42))?)
		}))
		.unwrap();

		assert!(matches!(
			options.resolve(),
			Err(OptionsError::InvalidOptionsType(_))
		));
	}

	#[rstest]
	fn test_max_depth_stops_endless_chain() {
		fn endless() -> anyhow::Result<OptionsInput> {
			Ok(OptionsInput::from_producer(endless))
		}
		let mut options = ChoiceOptions::with_input(OptionsInput::from_producer(endless))
			.unwrap()
			.with_max_depth(Some(5));

		assert!(matches!(
			options.resolve(),
			Err(OptionsError::ResolveDepthExceeded(5))
		));
	}

	#[rstest]
	fn test_compare_values_against_integer_key() {
		let options = ChoiceOptions::new();

		assert!(options.compare_values(&OptionKey::Int(3), Some(&ChoiceValue::from("3"))));
		assert!(!options.compare_values(&OptionKey::Int(3), None));
	}

	/// Collects the message of every event it sees.
	struct LogCapture {
		logs: Arc<Mutex<Vec<String>>>,
	}

	impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for LogCapture {
		fn on_event(
			&self,
			event: &tracing::Event<'_>,
			_ctx: tracing_subscriber::layer::Context<'_, S>,
		) {
			struct MessageVisitor {
				message: String,
			}

			impl tracing::field::Visit for MessageVisitor {
				fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
					if field.name() == "message" {
						self.message = format!("{:?}", value);
					}
				}
			}

			let mut visitor = MessageVisitor {
				message: String::new(),
			};
			event.record(&mut visitor);
			self.logs.lock().unwrap().push(format!(
				"[{}] {}",
				event.metadata().level(),
				visitor.message
			));
		}
	}

	fn captured<T>(f: impl FnOnce() -> T) -> (T, Vec<String>) {
		use tracing_subscriber::layer::SubscriberExt as _;

		let logs = Arc::new(Mutex::new(Vec::new()));
		let subscriber = tracing_subscriber::registry().with(LogCapture { logs: logs.clone() });
		let out = tracing::subscriber::with_default(subscriber, f);
		let logs = logs.lock().unwrap().clone();
		(out, logs)
	}

	#[rstest]
	fn test_duplicate_mapping_key_is_logged() {
		// Arrange
		let (mut options, logs) = captured(|| {
			ChoiceOptions::with_input(OptionsInput::from_mapping([(1, "a"), (2, "x"), (1, "b")]))
				.unwrap()
		});

		// Act
		let resolved = options.resolve().unwrap();

		// Assert
		assert_eq!(keys(resolved), vec!["1", "2"]);
		assert_eq!(resolved.get(&OptionKey::Int(1)), Some(&ChoiceValue::from("b")));
		assert!(
			logs.iter()
				.any(|line| line.starts_with("[DEBUG] duplicate option value replaced label"))
		);
	}

	#[rstest]
	#[case(OptionsInput::from_list(["1", "2"]))]
	#[case(OptionsInput::from_tuples([(1, "a"), (2, "b")]))]
	fn test_distinct_keys_log_nothing(#[case] input: OptionsInput) {
		let (_, logs) = captured(|| ChoiceOptions::with_input(input).unwrap());

		assert!(!logs.iter().any(|line| line.contains("duplicate option value")));
	}

	#[rstest]
	fn test_colliding_list_values_are_logged() {
		let ((), logs) = captured(|| {
			ChoiceOptions::with_input(OptionsInput::from_list(["1", "01", "1"])).unwrap();
		});

		assert_eq!(
			logs.iter()
				.filter(|line| line.contains("duplicate option value"))
				.count(),
			1
		);
	}
}
