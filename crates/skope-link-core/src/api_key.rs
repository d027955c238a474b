// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! API key wrapper that keeps the credential out of logs.

use std::fmt;

use serde::{Deserialize, Deserializer};
use zeroize::Zeroizing;

/// Placeholder printed instead of the key.
pub const REDACTED: &str = "[REDACTED]";

/// The API key sent in the `api-key` header of every batch.
///
/// `Debug` and `Display` never print the key, and the backing buffer is
/// zeroed when the last copy is dropped. Call [`ApiKey::expose`] at the one
/// place the raw value is needed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(Zeroizing<String>);

impl ApiKey {
	/// Wraps a raw API key.
	pub fn new(key: impl Into<String>) -> Self {
		Self(Zeroizing::new(key.into()))
	}

	/// Returns the raw key.
	pub fn expose(&self) -> &str {
		self.0.as_str()
	}

	/// Returns true if the key is the empty string.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl fmt::Debug for ApiKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("ApiKey").field(&REDACTED).finish()
	}
}

impl fmt::Display for ApiKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl From<&str> for ApiKey {
	fn from(key: &str) -> Self {
		Self::new(key)
	}
}

impl From<String> for ApiKey {
	fn from(key: String) -> Self {
		Self::new(key)
	}
}

impl<'de> Deserialize<'de> for ApiKey {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		String::deserialize(deserializer).map(Self::new)
	}
}
