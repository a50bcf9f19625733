//! Choice widgets for HTML forms
//!
//! This crate provides the shared machinery of select, radio and
//! checkbox-like controls:
//! - Normalization of option inputs (mappings, value lists, tuples, datasets)
//!   into one ordered value to label map
//! - Lazily produced options, resolved just before rendering
//! - Loose matching of submitted values against option keys
//! - A widget base with pluggable renderers
//!
//! ## Example
//!
//! ```
//! use htchoice_forms::widgets::SimpleChoice;
//! use htchoice_forms::{ChoiceWidget, OptionsInput};
//! use serde_json::json;
//!
//! let mut widget = ChoiceWidget::new("category")
//!     .options(OptionsInput::from_producer(|| {
//!         // pretend this was fetched from the db
//!         Ok(OptionsInput::from_json(&json!([
//!             {"id": 1, "name": "Action"},
//!             {"id": 2, "name": "Drama"},
//!             {"id": 3, "name": "Sci-fi"},
//!         ]))?)
//!     }))
//!     .unwrap()
//!     .context(&json!({"category": 3}));
//!
//! let html = widget.render(&SimpleChoice::new()).unwrap();
//! assert!(html.contains("<b>3 - Sci-fi"));
//! ```

pub mod compare;
pub mod config;
pub mod error;
pub mod input;
pub mod options;
pub mod value;
pub mod widget;
pub mod widgets;

pub use compare::{compare_values, loose_eq};
pub use config::ChoiceConfig;
pub use error::{ConfigError, OptionsError, OptionsResult};
pub use input::{ChoiceRow, OptionsInput, OptionsProducer};
pub use options::{ChoiceOptions, ResolvedOptions};
pub use value::{ChoiceValue, OptionKey};
pub use widget::{Choice, ChoiceRender, ChoiceWidget};
pub use widgets::{Select, SimpleChoice};
