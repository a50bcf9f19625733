//! Widget configuration
//!
//! Choice widgets can be configured from a TOML table such as:
//!
//! ```toml
//! question = "Type in the desired language code:"
//! input_size = 4
//! readonly = false
//! max_resolve_depth = 8
//! ```
//!
//! Every key is optional.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_QUESTION: &str = "Type in the desired option:";
pub const DEFAULT_INPUT_SIZE: u32 = 10;

/// Settings shared by choice widgets and their renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChoiceConfig {
	/// Prompt shown above the input in writable mode
	pub question: String,
	/// `size` attribute of the typed-in input
	pub input_size: u32,
	/// Start widgets in readonly mode
	pub readonly: bool,
	/// Maximum number of producer hops; unlimited when absent
	pub max_resolve_depth: Option<usize>,
}

impl Default for ChoiceConfig {
	fn default() -> Self {
		Self {
			question: DEFAULT_QUESTION.to_string(),
			input_size: DEFAULT_INPUT_SIZE,
			readonly: false,
			max_resolve_depth: None,
		}
	}
}

impl ChoiceConfig {
	/// Parse configuration from TOML.
	///
	/// # Examples
	///
	/// ```
	/// use htchoice_forms::ChoiceConfig;
	///
	/// let config = ChoiceConfig::from_toml_str("readonly = true").unwrap();
	/// assert!(config.readonly);
	/// assert_eq!(config.input_size, 10);
	/// ```
	pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(source)?)
	}

	pub fn with_question(mut self, question: impl Into<String>) -> Self {
		self.question = question.into();
		self
	}

	pub fn with_input_size(mut self, input_size: u32) -> Self {
		self.input_size = input_size;
		self
	}
}
