// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Tracked events and the batch wire format.
//!
//! A batch is posted as a bare JSON array:
//!
//! ```json
//! [
//!   {
//!     "event_name": "user_signup",
//!     "event_properties": { "plan": "premium", "userId": "user123" },
//!     "session_id": "k3j2h1g0f",
//!     "source": "sdk"
//!   }
//! ]
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::properties::Properties;
use crate::session::generate_session_id;

/// Value of the `source` field on every event.
pub const EVENT_SOURCE: &str = "sdk";

/// Property key carrying the configured user ID.
pub const USER_ID_PROPERTY: &str = "userId";

/// A single event as queued and as sent on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedEvent {
	pub event_name: String,
	pub event_properties: Map<String, Value>,
	pub session_id: String,
	pub source: String,
}

impl TrackedEvent {
	/// Builds an event with a fresh session ID.
	///
	/// The `userId` property always reflects `user_id`: a caller-supplied
	/// `userId` is replaced, or removed when no user ID is configured.
	pub fn new(event_name: impl Into<String>, properties: Properties, user_id: Option<&str>) -> Self {
		Self::with_session_id(event_name, properties, user_id, generate_session_id())
	}

	/// Builds an event with an explicit session ID.
	pub fn with_session_id(
		event_name: impl Into<String>,
		properties: Properties,
		user_id: Option<&str>,
		session_id: impl Into<String>,
	) -> Self {
		let mut event_properties = properties.into_map();
		event_properties.remove(USER_ID_PROPERTY);
		if let Some(user_id) = user_id {
			event_properties.insert(USER_ID_PROPERTY.to_string(), Value::from(user_id));
		}

		Self {
			event_name: event_name.into(),
			event_properties,
			session_id: session_id.into(),
			source: EVENT_SOURCE.to_string(),
		}
	}

	/// Returns the user ID recorded on this event, if any.
	pub fn user_id(&self) -> Option<&str> {
		self.event_properties
			.get(USER_ID_PROPERTY)
			.and_then(Value::as_str)
	}
}

/// Serializes a batch into the request body.
pub fn encode_batch(events: &[TrackedEvent]) -> serde_json::Result<String> {
	serde_json::to_string(events)
}
