// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! SDK configuration: the caller-facing input shape and its normalized form.
//!
//! [`SdkConfig`] mirrors what an embedding application hands to
//! `EventBatcher::initialize`. Every field is optional so it can be filled
//! from code, from a JSON/TOML document (camelCase keys), or from the
//! environment. [`SdkConfig::normalize`] validates it and applies defaults,
//! producing the immutable [`Config`] the batcher runs on.
//!
//! # Environment
//!
//! | Variable | Field |
//! |----------|-------|
//! | `SKOPE_API_KEY` | `apiKey` |
//! | `SKOPE_ENDPOINT` | `endpoint` |
//! | `SKOPE_USER_ID` | `userId` |
//! | `SKOPE_BATCH_SIZE` | `batchSize` |
//! | `SKOPE_RETRY_ATTEMPTS` | `retryAttempts` |

use serde::Deserialize;

use crate::api_key::ApiKey;
use crate::error::{ConfigError, Result};

/// Batch size used when none (or zero) is configured.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Retry attempts recorded when none (or zero) is configured.
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;

/// Path appended to the endpoint for batch submission.
pub const TRACK_PATH: &str = "/analytics/track";

const ENV_API_KEY: &str = "SKOPE_API_KEY";
const ENV_ENDPOINT: &str = "SKOPE_ENDPOINT";
const ENV_USER_ID: &str = "SKOPE_USER_ID";
const ENV_BATCH_SIZE: &str = "SKOPE_BATCH_SIZE";
const ENV_RETRY_ATTEMPTS: &str = "SKOPE_RETRY_ATTEMPTS";

/// Configuration as supplied by the embedding application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdkConfig {
	/// The API key to authenticate requests.
	pub api_key: Option<ApiKey>,
	/// The base URL of the collection endpoint.
	pub endpoint: Option<String>,
	/// User ID attached to every tracked event.
	pub user_id: Option<String>,
	/// Number of queued events that triggers an automatic flush.
	pub batch_size: Option<usize>,
	/// Carried for the embedding application; the batcher does not bound
	/// retries with it.
	pub retry_attempts: Option<u32>,
}

impl SdkConfig {
	/// Creates a configuration with the two required fields set.
	pub fn new(api_key: impl Into<ApiKey>, endpoint: impl Into<String>) -> Self {
		Self {
			api_key: Some(api_key.into()),
			endpoint: Some(endpoint.into()),
			..Self::default()
		}
	}

	/// Sets the user ID attached to every event.
	pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
		self.user_id = Some(user_id.into());
		self
	}

	/// Sets the auto-flush threshold.
	pub fn batch_size(mut self, batch_size: usize) -> Self {
		self.batch_size = Some(batch_size);
		self
	}

	/// Sets the retry attempts value.
	pub fn retry_attempts(mut self, retry_attempts: u32) -> Self {
		self.retry_attempts = Some(retry_attempts);
		self
	}

	/// Reads the configuration from `SKOPE_*` environment variables.
	///
	/// Missing variables leave the field unset; validation happens in
	/// [`SdkConfig::normalize`].
	pub fn from_env() -> Result<Self> {
		Self::from_env_with(|name| std::env::var(name).ok())
	}

	/// Like [`SdkConfig::from_env`], reading variables through `lookup`.
	pub fn from_env_with<F>(lookup: F) -> Result<Self>
	where
		F: Fn(&str) -> Option<String>,
	{
		let var = |name: &str| lookup(name).filter(|value| !value.is_empty());

		Ok(Self {
			api_key: var(ENV_API_KEY).map(ApiKey::new),
			endpoint: var(ENV_ENDPOINT),
			user_id: var(ENV_USER_ID),
			batch_size: parse_var(ENV_BATCH_SIZE, var(ENV_BATCH_SIZE))?,
			retry_attempts: parse_var(ENV_RETRY_ATTEMPTS, var(ENV_RETRY_ATTEMPTS))?,
		})
	}

	/// Validates the configuration and applies defaults.
	///
	/// Fails with [`ConfigError::MissingCredentials`] when the API key or
	/// endpoint is absent or empty. A `batch_size` or `retry_attempts` of
	/// zero is treated the same as an absent one and replaced by the default.
	pub fn normalize(self) -> Result<Config> {
		let api_key = self
			.api_key
			.filter(|key| !key.is_empty())
			.ok_or(ConfigError::MissingCredentials)?;

		let endpoint = self
			.endpoint
			.map(|url| url.trim_end_matches('/').to_string())
			.filter(|url| !url.is_empty())
			.ok_or(ConfigError::MissingCredentials)?;

		Ok(Config {
			api_key,
			endpoint,
			user_id: self.user_id,
			batch_size: self
				.batch_size
				.filter(|&n| n != 0)
				.unwrap_or(DEFAULT_BATCH_SIZE),
			retry_attempts: self
				.retry_attempts
				.filter(|&n| n != 0)
				.unwrap_or(DEFAULT_RETRY_ATTEMPTS),
		})
	}
}

fn parse_var<T: std::str::FromStr>(field: &'static str, value: Option<String>) -> Result<Option<T>> {
	value
		.map(|raw| {
			raw.trim()
				.parse()
				.map_err(|_| ConfigError::InvalidValue { field, value: raw })
		})
		.transpose()
}

/// Normalized, immutable configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
	pub api_key: ApiKey,
	/// Endpoint base URL without a trailing slash.
	pub endpoint: String,
	pub user_id: Option<String>,
	pub batch_size: usize,
	pub retry_attempts: u32,
}

impl Config {
	/// Full URL batches are posted to.
	pub fn track_url(&self) -> String {
		format!("{}{}", self.endpoint, TRACK_PATH)
	}
}

impl TryFrom<SdkConfig> for Config {
	type Error = ConfigError;

	fn try_from(config: SdkConfig) -> Result<Self> {
		config.normalize()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use std::collections::HashMap;

	fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
		let map: HashMap<String, String> = vars
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		move |name| map.get(name).cloned()
	}

	#[test]
	fn missing_api_key_is_rejected() {
		let config = SdkConfig {
			endpoint: Some("https://api.example.com".to_string()),
			..Default::default()
		};
		assert_eq!(config.normalize(), Err(ConfigError::MissingCredentials));
	}

	#[test]
	fn empty_credentials_are_rejected() {
		assert_eq!(
			SdkConfig::new("", "").normalize(),
			Err(ConfigError::MissingCredentials)
		);
		assert_eq!(
			SdkConfig::new("key", "").normalize(),
			Err(ConfigError::MissingCredentials)
		);
		assert_eq!(
			SdkConfig::new("", "https://api.example.com").normalize(),
			Err(ConfigError::MissingCredentials)
		);
	}

	#[test]
	fn defaults_applied_when_absent() {
		let config = SdkConfig::new("test_api_key", "https://api.example.com")
			.normalize()
			.unwrap();
		assert_eq!(config.batch_size, 10);
		assert_eq!(config.retry_attempts, 3);
		assert_eq!(config.user_id, None);
	}

	#[test]
	fn zero_values_fall_back_to_defaults() {
		let config = SdkConfig::new("k", "https://e")
			.batch_size(0)
			.retry_attempts(0)
			.normalize()
			.unwrap();
		assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);
		assert_eq!(config.retry_attempts, DEFAULT_RETRY_ATTEMPTS);
	}

	#[test]
	fn explicit_values_are_kept() {
		let config = SdkConfig::new("test_api_key", "https://api.example.com")
			.batch_size(5)
			.retry_attempts(2)
			.user_id("user123")
			.normalize()
			.unwrap();
		assert_eq!(config.api_key.expose(), "test_api_key");
		assert_eq!(config.endpoint, "https://api.example.com");
		assert_eq!(config.batch_size, 5);
		assert_eq!(config.retry_attempts, 2);
		assert_eq!(config.user_id.as_deref(), Some("user123"));
	}

	#[test]
	fn trailing_slash_is_trimmed() {
		let config = SdkConfig::new("k", "https://api.example.com/")
			.normalize()
			.unwrap();
		assert_eq!(config.endpoint, "https://api.example.com");
		assert_eq!(config.track_url(), "https://api.example.com/analytics/track");
	}

	#[test]
	fn deserializes_camel_case_json() {
		let config: SdkConfig = serde_json::from_str(
			r#"{"apiKey": "k", "endpoint": "https://e", "userId": "u1", "batchSize": 2}"#,
		)
		.unwrap();
		let config = config.normalize().unwrap();
		assert_eq!(config.api_key.expose(), "k");
		assert_eq!(config.user_id.as_deref(), Some("u1"));
		assert_eq!(config.batch_size, 2);
		assert_eq!(config.retry_attempts, 3);
	}

	#[test]
	fn deserializes_toml() {
		let config: SdkConfig = toml::from_str(
			r#"
apiKey = "k"
endpoint = "https://e"
retryAttempts = 7
"#,
		)
		.unwrap();
		let config = Config::try_from(config).unwrap();
		assert_eq!(config.retry_attempts, 7);
		assert_eq!(config.batch_size, 10);
	}

	#[test]
	fn from_env_reads_all_fields() {
		let config = SdkConfig::from_env_with(env(&[
			("SKOPE_API_KEY", "k"),
			("SKOPE_ENDPOINT", "https://e"),
			("SKOPE_USER_ID", "u1"),
			("SKOPE_BATCH_SIZE", "25"),
			("SKOPE_RETRY_ATTEMPTS", " 5 "),
		]))
		.unwrap()
		.normalize()
		.unwrap();
		assert_eq!(config.endpoint, "https://e");
		assert_eq!(config.user_id.as_deref(), Some("u1"));
		assert_eq!(config.batch_size, 25);
		assert_eq!(config.retry_attempts, 5);
	}

	#[test]
	fn from_env_treats_empty_as_unset() {
		let config = SdkConfig::from_env_with(env(&[
			("SKOPE_API_KEY", "k"),
			("SKOPE_ENDPOINT", ""),
			("SKOPE_BATCH_SIZE", ""),
		]))
		.unwrap();
		assert!(config.endpoint.is_none());
		assert!(config.batch_size.is_none());
		assert_eq!(config.normalize(), Err(ConfigError::MissingCredentials));
	}

	#[test]
	fn from_env_rejects_bad_numbers() {
		let err = SdkConfig::from_env_with(env(&[("SKOPE_BATCH_SIZE", "ten")])).unwrap_err();
		assert_eq!(
			err,
			ConfigError::InvalidValue {
				field: "SKOPE_BATCH_SIZE",
				value: "ten".to_string(),
			}
		);
	}

	proptest! {
		#[test]
		fn positive_batch_size_is_preserved(batch_size in 1..10_000usize) {
			let config = SdkConfig::new("k", "https://e").batch_size(batch_size).normalize().unwrap();
			prop_assert_eq!(config.batch_size, batch_size);
		}

		#[test]
		fn non_empty_credentials_always_normalize(
			key in "[a-zA-Z0-9_]{1,40}",
			host in "[a-z]{1,20}",
		) {
			let endpoint = format!("https://{host}.example.com");
			let config = SdkConfig::new(key.clone(), endpoint.clone()).normalize().unwrap();
			prop_assert_eq!(config.api_key.expose(), key.as_str());
			prop_assert_eq!(config.endpoint, endpoint);
			prop_assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);
			prop_assert_eq!(config.retry_attempts, DEFAULT_RETRY_ATTEMPTS);
		}
	}
}
