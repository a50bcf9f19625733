//! Text-based choice widget
//!
//! Lists every option as a line of text and asks the user to type the value
//! of the desired option into an input. Mostly useful as a minimal example of
//! a [`ChoiceRender`] implementation.

use crate::config::{ChoiceConfig, DEFAULT_INPUT_SIZE, DEFAULT_QUESTION};
use crate::widget::{Choice, ChoiceRender, ChoiceWidget, html_escape};

/// Renders options as `value - label` lines below a typed-in input.
///
/// # Examples
///
/// ```
/// use htchoice_forms::widgets::SimpleChoice;
/// use htchoice_forms::{ChoiceWidget, OptionsInput};
///
/// let mut widget = ChoiceWidget::new("color")
///     .options(OptionsInput::from_mapping([(1, "Black"), (2, "White"), (3, "Gray")]))
///     .unwrap();
///
/// let html = widget.render(&SimpleChoice::new()).unwrap();
/// assert!(html.contains("<input"));
/// assert!(html.contains("1 - Black"));
/// assert!(html.contains("3 - Gray"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleChoice {
	question: String,
	input_size: u32,
}

impl Default for SimpleChoice {
	fn default() -> Self {
		Self::new()
	}
}

impl SimpleChoice {
	pub fn new() -> Self {
		Self {
			question: DEFAULT_QUESTION.to_string(),
			input_size: DEFAULT_INPUT_SIZE,
		}
	}

	pub fn from_config(config: &ChoiceConfig) -> Self {
		Self {
			question: config.question.clone(),
			input_size: config.input_size,
		}
	}

	pub fn with_question(mut self, question: impl Into<String>) -> Self {
		self.question = question.into();
		self
	}

	pub fn question(&self) -> &str {
		&self.question
	}

	fn render_options(&self, choices: &[Choice<'_>]) -> String {
		let mut html = String::new();
		for choice in choices {
			let value = html_escape(&choice.value.to_string());
			let mut line = if choice.is_self_labelled() {
				format!("- {}", value)
			} else {
				format!("{} - {}", value, html_escape(&choice.label.to_string()))
			};
			if choice.selected {
				line = format!("<b>{} (selected)</b>", line);
			}
			html.push_str(&line);
			html.push_str("<br/>\n");
		}
		html
	}
}

impl ChoiceRender for SimpleChoice {
	fn render_writable(&self, widget: &ChoiceWidget, choices: &[Choice<'_>]) -> String {
		let value = widget
			.current_value()
			.map(ToString::to_string)
			.unwrap_or_default();

		let mut html = format!("{} \n", html_escape(&self.question));
		html.push_str(&format!(
			r#"<input name="{}" value="{}" size="{}""#,
			html_escape(widget.name()),
			html_escape(&value),
			self.input_size
		));
		for (key, val) in widget.attrs() {
			html.push_str(&format!(r#" {}="{}""#, key, html_escape(val)));
		}
		html.push_str(" /> <br/> \n");
		html.push_str(&self.render_options(choices));
		html
	}

	fn render_readonly(&self, _widget: &ChoiceWidget, choices: &[Choice<'_>]) -> String {
		self.render_options(choices)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::input::OptionsInput;
	use rstest::rstest;

	#[rstest]
	fn test_writable_layout() {
		let mut widget = ChoiceWidget::new("color")
			.options(OptionsInput::from_mapping([(1, "Black"), (2, "White")]))
			.unwrap()
			.value(2);

		let html = widget.render(&SimpleChoice::new()).unwrap();

		assert_eq!(
			html,
			"Type in the desired option: \n\
			 <input name=\"color\" value=\"2\" size=\"10\" /> <br/> \n\
			 1 - Black<br/>\n\
			 <b>2 - White (selected)</b><br/>\n"
		);
	}

	#[rstest]
	fn test_readonly_omits_input() {
		let mut widget = ChoiceWidget::new("color")
			.options(OptionsInput::from_list(["en"]))
			.unwrap()
			.readonly(true);

		let html = widget.render(&SimpleChoice::new()).unwrap();

		assert_eq!(html, "- en<br/>\n");
	}

	#[rstest]
	fn test_config_question_and_size() {
		let config = ChoiceConfig::default()
			.with_question("Pick one:")
			.with_input_size(3);
		let mut widget = ChoiceWidget::new("n").attr("class", "narrow");

		let html = widget.render(&SimpleChoice::from_config(&config)).unwrap();

		assert_eq!(
			html,
			"Pick one: \n<input name=\"n\" value=\"\" size=\"3\" class=\"narrow\" /> <br/> \n"
		);
	}

	#[rstest]
	fn test_labels_are_escaped() {
		let mut widget = ChoiceWidget::new("n")
			.options(OptionsInput::from_mapping([(1, "<script>")]))
			.unwrap()
			.readonly(true);

		let html = widget.render(&SimpleChoice::new()).unwrap();

		assert_eq!(html, "1 - &lt;script&gt;<br/>\n");
	}

	#[rstest]
	#[case(OptionsInput::from_mapping([(1, "1")]), "1 - 1<br/>\n")]
	#[case(OptionsInput::from_mapping([(1, 1)]), "- 1<br/>\n")]
	#[case(OptionsInput::from_list(["1"]), "1 - 1<br/>\n")]
	#[case(OptionsInput::from_list([1]), "- 1<br/>\n")]
	fn test_value_and_label_must_share_kind(#[case] input: OptionsInput, #[case] expected: &str) {
		let mut widget = ChoiceWidget::new("n").options(input).unwrap().readonly(true);

		let html = widget.render(&SimpleChoice::new()).unwrap();

		assert_eq!(html, expected);
	}
}
