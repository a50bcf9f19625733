//! Error types for option configuration and resolution

/// Errors raised while configuring or resolving choice options.
#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
	/// The supplied value is neither an array-like shape nor a producer.
	#[error("options must be an array or a callable (got {0})")]
	InvalidOptionsType(String),
	/// A row in a dataset-shaped input exposes fewer than two fields.
	#[error("each option must have at least two fields (row {index} has {fields})")]
	InvalidRowShape { index: usize, fields: usize },
	/// The configured producer chain is longer than the allowed depth.
	#[error("options producer chain exceeded {0} hops")]
	ResolveDepthExceeded(usize),
	/// A producer failed with an error of its own.
	#[error(transparent)]
	Producer(#[from] anyhow::Error),
}

pub type OptionsResult<T> = Result<T, OptionsError>;

/// Errors raised while loading widget configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("Invalid widget configuration: {0}")]
	Parse(#[from] toml::de::Error),
}
