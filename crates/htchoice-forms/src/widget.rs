//! Choice widget base
//!
//! A [`ChoiceWidget`] owns everything a choice control needs regardless of
//! how it is drawn: its name, its options, the current value and whether the
//! user may interact with it. The markup itself comes from a [`ChoiceRender`]
//! implementation, which decides between single and multiple selection and
//! which HTML elements to emit.

use crate::compare::compare_values;
use crate::config::ChoiceConfig;
use crate::error::OptionsResult;
use crate::input::OptionsInput;
use crate::options::ChoiceOptions;
use crate::value::{ChoiceValue, OptionKey};
use indexmap::IndexMap;

/// One resolved option as seen by a renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Choice<'a> {
	pub value: &'a OptionKey,
	pub label: &'a ChoiceValue,
	pub selected: bool,
}

impl Choice<'_> {
	/// Whether value and label are the same scalar, kind included.
	pub fn is_self_labelled(&self) -> bool {
		self.value.to_value() == *self.label
	}
}

/// Markup strategy for a choice widget.
pub trait ChoiceRender {
	/// Render the interactive form of the widget.
	fn render_writable(&self, widget: &ChoiceWidget, choices: &[Choice<'_>]) -> String;

	/// Render the widget for display only.
	fn render_readonly(&self, widget: &ChoiceWidget, choices: &[Choice<'_>]) -> String;
}

/// Escape text for use in HTML content and attribute values.
pub fn html_escape(s: &str) -> String {
	s.replace('&', "&amp;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
		.replace('"', "&quot;")
		.replace('\'', "&#x27;")
}

/// A named choice control with lazily resolved options.
///
/// # Examples
///
/// ```
/// use htchoice_forms::{ChoiceValue, ChoiceWidget, OptionsInput};
/// use serde_json::json;
///
/// let mut widget = ChoiceWidget::new("season")
///     .options(OptionsInput::from_mapping([
///         (1, "Spring"),
///         (2, "Summer"),
///         (3, "Fall"),
///         (4, "Winter"),
///     ]))
///     .unwrap()
///     .context(&json!({"season": 3}));
///
/// let selected: Vec<String> = widget
///     .choices()
///     .unwrap()
///     .iter()
///     .filter(|choice| choice.selected)
///     .map(|choice| choice.label.to_string())
///     .collect();
/// assert_eq!(selected, vec!["Fall"]);
/// ```
#[derive(Debug)]
pub struct ChoiceWidget {
	name: String,
	options: ChoiceOptions,
	value: Option<ChoiceValue>,
	readonly: bool,
	attrs: IndexMap<String, String>,
}

impl ChoiceWidget {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			options: ChoiceOptions::new(),
			value: None,
			readonly: false,
			attrs: IndexMap::new(),
		}
	}

	/// Create a widget whose readonly flag and resolution limit come from `config`.
	pub fn from_config(name: impl Into<String>, config: &ChoiceConfig) -> Self {
		let mut widget = Self::new(name);
		widget.readonly = config.readonly;
		widget.options = ChoiceOptions::new().with_max_depth(config.max_resolve_depth);
		widget
	}

	/// Replace the widget's options. See [`ChoiceOptions::set_options`].
	pub fn options(mut self, input: OptionsInput) -> OptionsResult<Self> {
		self.options.set_options(input)?;
		Ok(self)
	}

	pub fn set_options(&mut self, input: OptionsInput) -> OptionsResult<&mut Self> {
		self.options.set_options(input)?;
		Ok(self)
	}

	/// Take the current value from submitted form data.
	///
	/// Looks up the widget's name in a JSON object. A missing entry, or one
	/// that is not a scalar, leaves the widget without a value.
	pub fn context(mut self, data: &serde_json::Value) -> Self {
		self.value = data.get(&self.name).and_then(ChoiceValue::from_json);
		self
	}

	pub fn value(mut self, value: impl Into<ChoiceValue>) -> Self {
		self.value = Some(value.into());
		self
	}

	pub fn readonly(mut self, readonly: bool) -> Self {
		self.readonly = readonly;
		self
	}

	/// Add an extra HTML attribute for renderers to emit.
	///
	/// Values are escaped on render; names are emitted verbatim, so they must
	/// be valid attribute names and never come from untrusted input.
	///
	/// # Panics
	///
	/// In debug builds, panics if `name` is empty or contains whitespace,
	/// quotes, `>`, `/` or `=`.
	pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		let name = name.into();
		debug_assert!(
			is_attr_name(&name),
			"invalid HTML attribute name {:?}",
			name
		);
		self.attrs.insert(name, value.into());
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn current_value(&self) -> Option<&ChoiceValue> {
		self.value.as_ref()
	}

	pub fn is_readonly(&self) -> bool {
		self.readonly
	}

	pub fn attrs(&self) -> &IndexMap<String, String> {
		&self.attrs
	}

	pub fn options_ref(&self) -> &ChoiceOptions {
		&self.options
	}

	/// Resolve options and pair each with its selection state.
	pub fn choices(&mut self) -> OptionsResult<Vec<Choice<'_>>> {
		self.options.resolve()?;
		Ok(self.resolved_choices())
	}

	/// Resolve options and render with `renderer`, honouring readonly mode.
	pub fn render<R: ChoiceRender + ?Sized>(&mut self, renderer: &R) -> OptionsResult<String> {
		self.options.resolve()?;
		let choices = self.resolved_choices();
		let html = if self.readonly {
			renderer.render_readonly(self, &choices)
		} else {
			renderer.render_writable(self, &choices)
		};
		Ok(html)
	}

	fn resolved_choices(&self) -> Vec<Choice<'_>> {
		let Some(options) = self.options.resolved() else {
			return Vec::new();
		};
		options
			.iter()
			.map(|(value, label)| Choice {
				value,
				label,
				selected: compare_values(&value.to_value(), self.value.as_ref()),
			})
			.collect()
	}
}

fn is_attr_name(name: &str) -> bool {
	!name.is_empty()
		&& !name
			.chars()
			.any(|c| c.is_whitespace() || c.is_control() || matches!(c, '"' | '\'' | '>' | '/' | '=' | '<'))
}
