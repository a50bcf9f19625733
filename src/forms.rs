//! Choice widgets module.
//!
//! This module provides option normalization, lazily produced options and
//! the choice widget base with its renderers.
//!
//! # Examples
//!
//! ```rust
//! # #[cfg(feature = "forms")]
//! use htchoice::forms::{ChoiceWidget, OptionsInput};
//! ```

#[cfg(feature = "forms")]
pub use htchoice_forms::*;
