//! Select dropdown widget

use crate::widget::{Choice, ChoiceRender, ChoiceWidget, html_escape};

/// Renders a `<select>` element; readonly widgets are rendered disabled.
///
/// # Examples
///
/// ```
/// use htchoice_forms::widgets::Select;
/// use htchoice_forms::{ChoiceWidget, OptionsInput};
///
/// let mut widget = ChoiceWidget::new("language")
///     .options(OptionsInput::from_list(["en", "es"]))
///     .unwrap()
///     .value("es");
///
/// assert_eq!(
///     widget.render(&Select::new()).unwrap(),
///     r#"<select name="language"><option value="en">en</option><option value="es" selected>es</option></select>"#
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct Select;

impl Select {
	pub fn new() -> Self {
		Self
	}

	fn render_select(&self, widget: &ChoiceWidget, choices: &[Choice<'_>], disabled: bool) -> String {
		let mut html = format!(r#"<select name="{}""#, html_escape(widget.name()));

		for (key, val) in widget.attrs() {
			html.push_str(&format!(r#" {}="{}""#, key, html_escape(val)));
		}

		if disabled {
			html.push_str(" disabled");
		}

		html.push('>');

		for choice in choices {
			html.push_str("<option");
			html.push_str(&format!(
				r#" value="{}""#,
				html_escape(&choice.value.to_string())
			));

			if choice.selected {
				html.push_str(" selected");
			}

			html.push('>');
			html.push_str(&html_escape(&choice.label.to_string()));
			html.push_str("</option>");
		}

		html.push_str("</select>");
		html
	}
}

impl ChoiceRender for Select {
	fn render_writable(&self, widget: &ChoiceWidget, choices: &[Choice<'_>]) -> String {
		self.render_select(widget, choices, false)
	}

	fn render_readonly(&self, widget: &ChoiceWidget, choices: &[Choice<'_>]) -> String {
		self.render_select(widget, choices, true)
	}
}
