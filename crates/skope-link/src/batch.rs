// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Event queue and single-flight flush.
//!
//! [`EventBatcher`] owns a FIFO queue of [`TrackedEvent`]s and a `flushing`
//! flag. Both live under one mutex so that "is a flush running, is there
//! anything to send, take the queue, mark flushing" is a single step that
//! completes before any `.await`.
//!
//! ```text
//! IDLE     --flush(), queue non-empty--> FLUSHING
//! IDLE     --flush(), queue empty------> IDLE      (no-op)
//! FLUSHING --flush()-------------------> FLUSHING  (no-op)
//! FLUSHING --transport success---------> IDLE      (batch discarded)
//! FLUSHING --transport failure---------> IDLE      (batch restored at the front)
//! ```
//!
//! A failed batch is spliced back in front of whatever was tracked while it
//! was in flight, and is sent again by the next flush. There is no retry
//! counter: the configured `retry_attempts` is informational only.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use skope_link_core::{encode_batch, Config, Properties, SdkConfig, TrackedEvent};
use tracing::{debug, error, info, warn};

use crate::error::{Result, SkopeLinkError};
use crate::transport::{HttpTransport, Transport, TransportRequest, API_KEY_HEADER};

/// What a call to [`EventBatcher::track`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackStatus {
	/// The event was appended to the queue.
	Queued,
	/// The event was appended and this call started a background flush.
	FlushTriggered,
	/// No configuration yet; the event was dropped.
	NotInitialized,
}

#[derive(Default)]
struct QueueState {
	events: Vec<TrackedEvent>,
	flushing: bool,
}

struct BatcherInner {
	config: RwLock<Option<Arc<Config>>>,
	state: Mutex<QueueState>,
	transport: Arc<dyn Transport>,
}

impl BatcherInner {
	// Never held across an await, so a poisoned lock still guards a
	// consistent queue.
	fn state(&self) -> MutexGuard<'_, QueueState> {
		self.state.lock().unwrap_or_else(PoisonError::into_inner)
	}

	fn config(&self) -> Option<Arc<Config>> {
		self.config
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.clone()
	}
}

/// Client-side event batcher.
///
/// Cloning is cheap; clones share the same queue, flag, and configuration.
///
/// # Example
///
/// ```ignore
/// use skope_link::{EventBatcher, Properties, SdkConfig};
///
/// let batcher = EventBatcher::http()?;
/// batcher.initialize(
///     SdkConfig::new("my_api_key", "https://collect.example.com").user_id("user123"),
/// )?;
///
/// batcher.track("user_signup", Properties::new().insert("plan", "premium"));
///
/// // Wait for delivery of whatever is queued.
/// batcher.flush().await;
/// ```
#[derive(Clone)]
pub struct EventBatcher {
	inner: Arc<BatcherInner>,
}

impl EventBatcher {
	/// Creates an uninitialized batcher sending through `transport`.
	pub fn new(transport: Arc<dyn Transport>) -> Self {
		Self {
			inner: Arc::new(BatcherInner {
				config: RwLock::new(None),
				state: Mutex::new(QueueState::default()),
				transport,
			}),
		}
	}

	/// Creates an uninitialized batcher using [`HttpTransport`].
	pub fn http() -> Result<Self> {
		Ok(Self::new(Arc::new(HttpTransport::new()?)))
	}

	/// Creates and initializes a batcher in one step.
	pub fn with_config(config: SdkConfig, transport: Arc<dyn Transport>) -> Result<Self> {
		let batcher = Self::new(transport);
		batcher.initialize(config)?;
		Ok(batcher)
	}

	/// Validates and stores the configuration.
	///
	/// Replaces any earlier configuration. Events already queued stay queued.
	pub fn initialize(&self, config: SdkConfig) -> Result<()> {
		let config = config.normalize()?;

		info!(
			endpoint = %config.endpoint,
			batch_size = config.batch_size,
			retry_attempts = config.retry_attempts,
			"SkopeLink SDK initialized"
		);

		*self
			.inner
			.config
			.write()
			.unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(config));
		Ok(())
	}

	/// Queues an event.
	///
	/// Never blocks and never waits on the network. Before [`initialize`]
	/// the event is dropped with a warning. When the queue reaches the
	/// configured batch size a flush is started in the background; callers
	/// that need delivery confirmation should await [`flush`] themselves.
	///
	/// A background flush needs a Tokio runtime. Without one the batch stays
	/// queued for the next explicit [`flush`].
	///
	/// [`initialize`]: EventBatcher::initialize
	/// [`flush`]: EventBatcher::flush
	pub fn track(&self, event_name: impl Into<String>, properties: impl Into<Properties>) -> TrackStatus {
		let Some(config) = self.inner.config() else {
			warn!("{}", SkopeLinkError::NotInitialized);
			return TrackStatus::NotInitialized;
		};

		let event = TrackedEvent::new(event_name, properties.into(), config.user_id.as_deref());
		let queued = {
			let mut state = self.inner.state();
			state.events.push(event);
			state.events.len()
		};
		debug!(queued, batch_size = config.batch_size, "Event queued");

		if queued < config.batch_size {
			return TrackStatus::Queued;
		}

		let Some(attempt) = self.begin_flush() else {
			return TrackStatus::Queued;
		};

		match tokio::runtime::Handle::try_current() {
			Ok(handle) => {
				handle.spawn(attempt.run());
				TrackStatus::FlushTriggered
			}
			Err(_) => {
				warn!(queued, "No Tokio runtime for background flush, events stay queued");
				drop(attempt);
				TrackStatus::Queued
			}
		}
	}

	/// Sends everything currently queued as one batch.
	///
	/// The queue is claimed when `flush` is *called*, not when the returned
	/// future is first polled: the in-flight check, the snapshot, and the
	/// queue reset all happen before this method returns. If a flush is
	/// already running or the queue is empty, the future completes
	/// immediately without contacting the transport.
	///
	/// Transport failures are logged and never returned. The failed batch
	/// goes back to the front of the queue, ahead of anything tracked in the
	/// meantime. Dropping the future before it completes counts as a
	/// failure.
	pub fn flush(&self) -> impl Future<Output = ()> + Send + 'static {
		let attempt = self.begin_flush();
		async move {
			if let Some(attempt) = attempt {
				attempt.run().await;
			}
		}
	}

	/// Number of events waiting to be sent.
	pub fn queue_len(&self) -> usize {
		self.inner.state().events.len()
	}

	/// Snapshot of the queue in send order.
	pub fn queued_events(&self) -> Vec<TrackedEvent> {
		self.inner.state().events.clone()
	}

	/// Returns true while a batch is in flight.
	pub fn is_flushing(&self) -> bool {
		self.inner.state().flushing
	}

	pub fn is_initialized(&self) -> bool {
		self.inner.config().is_some()
	}

	/// The active configuration.
	pub fn config(&self) -> Result<Config> {
		self.inner
			.config()
			.map(|config| Config::clone(&config))
			.ok_or(SkopeLinkError::NotInitialized)
	}

	fn begin_flush(&self) -> Option<FlushAttempt> {
		// Nothing can be queued before initialize, so a missing config also
		// means an empty queue.
		let config = self.inner.config()?;

		let mut state = self.inner.state();
		if state.flushing || state.events.is_empty() {
			return None;
		}
		state.flushing = true;
		let events = std::mem::take(&mut state.events);
		drop(state);

		Some(FlushAttempt {
			config,
			batch: InFlightBatch {
				inner: Arc::clone(&self.inner),
				events,
				delivered: false,
			},
		})
	}
}

/// A claimed batch plus the configuration it is sent with.
struct FlushAttempt {
	config: Arc<Config>,
	batch: InFlightBatch,
}

impl FlushAttempt {
	async fn run(self) {
		let FlushAttempt { config, batch } = self;
		let count = batch.events.len();
		debug!(count, "Flushing event batch");

		match send_batch(batch.inner.transport.as_ref(), &config, &batch.events).await {
			Ok(()) => {
				info!(count, "Event batch sent");
				batch.delivered();
			}
			Err(e) => {
				error!(error = %e, requeued = count, "Error sending events, requeuing");
			}
		}
	}
}

/// Events removed from the queue for one transmission.
///
/// Dropping it clears the `flushing` flag. Unless [`InFlightBatch::delivered`]
/// was called first, the events are put back at the front of the queue. This
/// covers transport errors, panics inside the transport, and a flush future
/// that is dropped mid-flight.
struct InFlightBatch {
	inner: Arc<BatcherInner>,
	events: Vec<TrackedEvent>,
	delivered: bool,
}

impl InFlightBatch {
	fn delivered(mut self) {
		self.delivered = true;
	}
}

impl Drop for InFlightBatch {
	fn drop(&mut self) {
		let mut state = self.inner.state();
		if !self.delivered {
			let newer = std::mem::replace(&mut state.events, std::mem::take(&mut self.events));
			state.events.extend(newer);
		}
		state.flushing = false;
	}
}

async fn send_batch(transport: &dyn Transport, config: &Config, events: &[TrackedEvent]) -> Result<()> {
	let request = TransportRequest::json(config.track_url(), encode_batch(events)?)
		.header(API_KEY_HEADER, config.api_key.expose());

	let response = transport.post(request).await?;
	if !response.is_success() {
		return Err(SkopeLinkError::ServerError {
			status: response.status,
			status_text: response.status_text,
		});
	}
	Ok(())
}
