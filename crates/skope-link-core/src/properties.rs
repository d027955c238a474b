// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Event property map.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Caller-supplied properties for a tracked event.
///
/// A thin wrapper over a JSON object. Anything that converts into a
/// `serde_json::Value` can be stored, and a `json!({...})` object literal
/// converts straight into `Properties`.
///
/// # Example
///
/// ```
/// use skope_link_core::Properties;
///
/// let props = Properties::new()
///     .insert("plan", "premium")
///     .insert("seats", 5);
/// assert_eq!(props.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties {
	inner: Map<String, Value>,
}

impl Properties {
	/// Creates an empty property map.
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts a key-value pair (builder style).
	pub fn insert<K, V>(mut self, key: K, value: V) -> Self
	where
		K: Into<String>,
		V: Into<Value>,
	{
		self.set(key, value);
		self
	}

	/// Inserts a key-value pair in place, returning the previous value.
	pub fn set<K, V>(&mut self, key: K, value: V) -> Option<Value>
	where
		K: Into<String>,
		V: Into<Value>,
	{
		self.inner.insert(key.into(), value.into())
	}

	/// Removes a key, returning its value.
	pub fn remove(&mut self, key: &str) -> Option<Value> {
		self.inner.remove(key)
	}

	/// Gets a value by key.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.inner.get(key)
	}

	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	pub fn len(&self) -> usize {
		self.inner.len()
	}

	/// Consumes the properties, returning the underlying JSON object.
	pub fn into_map(self) -> Map<String, Value> {
		self.inner
	}
}

impl From<Map<String, Value>> for Properties {
	fn from(inner: Map<String, Value>) -> Self {
		Self { inner }
	}
}

/// Non-object values carry no named properties and become an empty map.
impl From<Value> for Properties {
	fn from(value: Value) -> Self {
		match value {
			Value::Object(inner) => Self { inner },
			_ => Self::new(),
		}
	}
}

impl From<Properties> for Value {
	fn from(props: Properties) -> Self {
		Value::Object(props.inner)
	}
}

impl<K, V> FromIterator<(K, V)> for Properties
where
	K: Into<String>,
	V: Into<Value>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			inner: iter
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}
}
