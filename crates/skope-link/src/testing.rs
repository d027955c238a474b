// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-memory transports for batcher tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use skope_link_core::TrackedEvent;
use tokio::sync::Notify;

use crate::batch::EventBatcher;
use crate::error::{Result, SkopeLinkError};
use crate::transport::{Transport, TransportRequest, TransportResponse};

/// Scripted outcome for one transport call.
#[derive(Debug, Clone)]
pub enum Outcome {
	Status(u16),
	NetworkError,
	Panic,
}

/// Records every request and answers from a script (200 when exhausted).
#[derive(Default)]
pub struct MockTransport {
	requests: Mutex<Vec<TransportRequest>>,
	script: Mutex<VecDeque<Outcome>>,
}

impl MockTransport {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn then(&self, outcome: Outcome) -> &Self {
		self.script.lock().unwrap().push_back(outcome);
		self
	}

	pub fn calls(&self) -> usize {
		self.requests.lock().unwrap().len()
	}

	pub fn requests(&self) -> Vec<TransportRequest> {
		self.requests.lock().unwrap().clone()
	}

	/// Decoded bodies of every request, in call order.
	pub fn batches(&self) -> Vec<Vec<TrackedEvent>> {
		self.requests()
			.iter()
			.map(|r| serde_json::from_str(&r.body).unwrap())
			.collect()
	}

	pub fn batch_names(&self) -> Vec<Vec<String>> {
		self.batches()
			.into_iter()
			.map(|batch| batch.into_iter().map(|e| e.event_name).collect())
			.collect()
	}
}

#[async_trait]
impl Transport for MockTransport {
	async fn post(&self, request: TransportRequest) -> Result<TransportResponse> {
		self.requests.lock().unwrap().push(request);
		let outcome = self.script.lock().unwrap().pop_front();
		match outcome.unwrap_or(Outcome::Status(200)) {
			Outcome::Status(status) => Ok(TransportResponse::new(status, "scripted")),
			Outcome::NetworkError => Err(SkopeLinkError::Transport("Network error".to_string())),
			Outcome::Panic => panic!("transport exploded"),
		}
	}
}

/// Wraps a [`MockTransport`], parking each call until released.
#[derive(Default)]
pub struct GatedTransport {
	pub inner: MockTransport,
	pub entered: Notify,
	pub release: Notify,
}

#[async_trait]
impl Transport for GatedTransport {
	async fn post(&self, request: TransportRequest) -> Result<TransportResponse> {
		self.entered.notify_one();
		self.release.notified().await;
		self.inner.post(request).await
	}
}

/// Yields until no flush is in flight.
pub async fn wait_idle(batcher: &EventBatcher) {
	tokio::time::timeout(Duration::from_secs(5), async {
		while batcher.is_flushing() {
			tokio::task::yield_now().await;
		}
	})
	.await
	.expect("flush did not finish");
}
