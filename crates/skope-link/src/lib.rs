// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! SkopeLink Rust SDK.
//!
//! Collects named events in memory and posts them in batches to a SkopeLink
//! collection endpoint. Delivery is best-effort: a batch that fails to send
//! is put back at the front of the queue and goes out with the next flush.
//!
//! # Features
//!
//! - **Non-blocking tracking**: `track` only appends to the queue
//! - **Automatic batching**: a flush starts once `batch_size` events are queued
//! - **Single-flight flush**: at most one batch is in flight per batcher
//! - **Requeue on failure**: failed events keep their place ahead of newer ones
//! - **Pluggable transport**: swap the `reqwest` transport for your own
//!
//! # Example
//!
//! ```ignore
//! use skope_link::{EventBatcher, Properties, SdkConfig};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let batcher = EventBatcher::http()?;
//!     batcher.initialize(SdkConfig::from_env()?)?;
//!
//!     // Optional: also flush every 30 seconds.
//!     let flush_loop = batcher.spawn_flush_loop(Duration::from_secs(30));
//!
//!     batcher.track("user_signup", Properties::new().insert("plan", "premium"));
//!
//!     flush_loop.shutdown().await;
//!     Ok(())
//! }
//! ```
//!
//! # Wire format
//!
//! Each flush is a `POST {endpoint}/analytics/track` with headers
//! `Content-Type: application/json` and `api-key: <key>`, and a JSON array of
//! events as the body. See [`skope_link_core::event`] for the event shape.

mod batch;
mod error;
mod flush_loop;
mod transport;

#[cfg(test)]
mod testing;

pub use batch::{EventBatcher, TrackStatus};
pub use error::{Result, SkopeLinkError};
pub use flush_loop::FlushLoopHandle;
pub use transport::{
	HttpTransport, Transport, TransportRequest, TransportResponse, API_KEY_HEADER,
	CONTENT_TYPE_JSON, DEFAULT_REQUEST_TIMEOUT,
};

// Re-export core types for convenience
pub use skope_link_core::{
	ApiKey, Config, ConfigError, Properties, SdkConfig, TrackedEvent, DEFAULT_BATCH_SIZE,
	DEFAULT_RETRY_ATTEMPTS,
};
