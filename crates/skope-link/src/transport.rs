// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Outbound transport for event batches.
//!
//! The batcher only needs "POST this body with these headers and tell me the
//! status". [`Transport`] is that seam; [`HttpTransport`] is the default
//! implementation on top of `reqwest`. Timeouts belong to the transport.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{Result, SkopeLinkError};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "api-key";

/// Content type of every batch body.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Default timeout for [`HttpTransport`] requests.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A POST request handed to a [`Transport`].
#[derive(Clone)]
pub struct TransportRequest {
	pub url: String,
	pub headers: Vec<(String, String)>,
	pub body: String,
}

impl TransportRequest {
	/// Creates a request with a JSON body and the matching `Content-Type`.
	pub fn json(url: impl Into<String>, body: impl Into<String>) -> Self {
		Self {
			url: url.into(),
			headers: vec![("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string())],
			body: body.into(),
		}
	}

	/// Appends a header (builder style).
	pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));
		self
	}

	/// Looks up a header value, ignoring ASCII case in the name.
	pub fn header_value(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(n, _)| n.eq_ignore_ascii_case(name))
			.map(|(_, v)| v.as_str())
	}
}

impl fmt::Debug for TransportRequest {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let headers: Vec<(&str, &str)> = self
			.headers
			.iter()
			.map(|(name, value)| {
				if name.eq_ignore_ascii_case(API_KEY_HEADER) {
					(name.as_str(), skope_link_core::api_key::REDACTED)
				} else {
					(name.as_str(), value.as_str())
				}
			})
			.collect();

		f.debug_struct("TransportRequest")
			.field("url", &self.url)
			.field("headers", &headers)
			.field("body_len", &self.body.len())
			.finish()
	}
}

/// Status returned by a [`Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
	pub status: u16,
	pub status_text: String,
}

impl TransportResponse {
	pub fn new(status: u16, status_text: impl Into<String>) -> Self {
		Self {
			status,
			status_text: status_text.into(),
		}
	}

	/// Returns true for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// An HTTP POST capability.
///
/// Return `Err` when no response was obtained (network failure, timeout).
/// Non-2xx responses are returned as `Ok` and judged by the caller.
#[async_trait]
pub trait Transport: Send + Sync {
	async fn post(&self, request: TransportRequest) -> Result<TransportResponse>;
}

/// [`Transport`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
	client: reqwest::Client,
}

impl HttpTransport {
	/// Creates a transport with [`DEFAULT_REQUEST_TIMEOUT`].
	pub fn new() -> Result<Self> {
		Self::with_timeout(DEFAULT_REQUEST_TIMEOUT)
	}

	/// Creates a transport with a custom request timeout.
	pub fn with_timeout(timeout: Duration) -> Result<Self> {
		let client = skope_common_http::builder()
			.timeout(timeout)
			.build()
			.map_err(SkopeLinkError::RequestFailed)?;
		Ok(Self { client })
	}

	/// Wraps an existing client.
	pub fn from_client(client: reqwest::Client) -> Self {
		Self { client }
	}
}

#[async_trait]
impl Transport for HttpTransport {
	async fn post(&self, request: TransportRequest) -> Result<TransportResponse> {
		debug!(url = %request.url, body_len = request.body.len(), "POST event batch");

		let mut builder = self.client.post(request.url.as_str());
		for (name, value) in &request.headers {
			builder = builder.header(name.as_str(), value.as_str());
		}

		let response = builder.body(request.body).send().await?;
		let status = response.status();

		Ok(TransportResponse {
			status: status.as_u16(),
			status_text: status.canonical_reason().unwrap_or_default().to_string(),
		})
	}
}
