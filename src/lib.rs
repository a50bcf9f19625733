//! # htchoice
//!
//! Building blocks for HTML "choice" widgets such as selects, radio groups
//! and checkbox lists.
//!
//! A choice widget accepts its options in whatever shape is at hand (an
//! explicit value to label mapping, a plain list of values, `(value, label)`
//! tuples, database rows, or a closure that produces any of these later) and
//! normalizes them into a single ordered map. Submitted values are matched
//! against option keys loosely, so a form value `"3"` selects the option
//! stored under the integer `3`.
//!
//! ## Feature Flags
//!
//! - `forms` (default) - Choice widgets and option normalization
//!
//! ## Quick Example
//!
//! ```rust
//! # #[cfg(feature = "forms")]
//! # {
//! use htchoice::forms::{ChoiceWidget, OptionsInput, Select};
//!
//! let mut widget = ChoiceWidget::new("color")
//!     .options(OptionsInput::from_mapping([(1, "Black"), (2, "White")]))
//!     .unwrap()
//!     .value("2");
//!
//! let html = widget.render(&Select::new()).unwrap();
//! assert!(html.contains(r#"<option value="2" selected>White</option>"#));
//! # }
//! ```

#[cfg(feature = "forms")]
pub mod forms;
