// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the SkopeLink SDK.

use skope_link_core::ConfigError;
use thiserror::Error;

/// SkopeLink SDK errors.
#[derive(Debug, Error)]
pub enum SkopeLinkError {
	/// Initialization was given an unusable configuration.
	#[error(transparent)]
	Config(#[from] ConfigError),

	/// An operation needed configuration before `initialize` was called.
	#[error("SDK not initialized. Call init() before tracking events.")]
	NotInitialized,

	/// HTTP request failed before a response arrived.
	#[error("HTTP request failed: {0}")]
	RequestFailed(#[from] reqwest::Error),

	/// The endpoint answered with a non-success status.
	#[error("failed to send events: {status} {status_text}")]
	ServerError { status: u16, status_text: String },

	/// A custom transport failed without an HTTP status.
	#[error("transport error: {0}")]
	Transport(String),

	/// The batch could not be encoded.
	#[error("serialization error: {0}")]
	SerializationError(#[from] serde_json::Error),
}

impl SkopeLinkError {
	/// Returns true for failures that happen while sending a batch.
	///
	/// These are recovered inside `flush` by requeueing the batch.
	pub fn is_transmission(&self) -> bool {
		matches!(
			self,
			SkopeLinkError::RequestFailed(_)
				| SkopeLinkError::ServerError { .. }
				| SkopeLinkError::Transport(_)
				| SkopeLinkError::SerializationError(_)
		)
	}
}

/// Result type alias for SDK operations.
pub type Result<T> = std::result::Result<T, SkopeLinkError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn config_error_is_transparent() {
		let err = SkopeLinkError::from(ConfigError::MissingCredentials);
		assert_eq!(
			err.to_string(),
			"API key and endpoint are required for initialization"
		);
		assert!(!err.is_transmission());
	}

	#[test]
	fn server_error_message_includes_status_text() {
		let err = SkopeLinkError::ServerError {
			status: 503,
			status_text: "Service Unavailable".to_string(),
		};
		assert_eq!(err.to_string(), "failed to send events: 503 Service Unavailable");
		assert!(err.is_transmission());
	}

	#[test]
	fn transport_and_serialization_are_transmission_errors() {
		assert!(SkopeLinkError::Transport("Network error".to_string()).is_transmission());

		let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
		assert!(SkopeLinkError::from(json_err).is_transmission());
	}

	#[test]
	fn not_initialized_is_advisory() {
		let err = SkopeLinkError::NotInitialized;
		assert!(!err.is_transmission());
		assert!(err.to_string().starts_with("SDK not initialized"));
	}
}
