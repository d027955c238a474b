// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration error types.

use thiserror::Error;

/// Errors raised while building or normalizing SDK configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
	/// `apiKey` or `endpoint` was absent or empty.
	#[error("API key and endpoint are required for initialization")]
	MissingCredentials,

	/// An environment variable held a value that could not be parsed.
	#[error("invalid value for {field}: {value:?}")]
	InvalidValue { field: &'static str, value: String },
}

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
