// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Periodic background flush.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{error, info};

use crate::batch::EventBatcher;

const MIN_PERIOD: Duration = Duration::from_millis(1);
const MAX_PERIOD: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Handle to a running interval flush loop.
///
/// Dropping the handle leaves the loop running for the life of the runtime;
/// call [`FlushLoopHandle::shutdown`] to stop it.
pub struct FlushLoopHandle {
	shutdown: Arc<Notify>,
	task: JoinHandle<()>,
}

impl FlushLoopHandle {
	/// Stops the loop after one final flush and waits for it to finish.
	///
	/// The final flush is a no-op if another flush is still in flight.
	pub async fn shutdown(self) {
		self.shutdown.notify_one();
		if let Err(e) = self.task.await {
			error!(error = %e, "Flush loop task failed");
		}
	}

	/// Returns true once the loop has exited.
	pub fn is_finished(&self) -> bool {
		self.task.is_finished()
	}
}

impl EventBatcher {
	/// Spawns a task that flushes every `period`.
	///
	/// The first tick fires one full period after spawning. Ticks that land
	/// on an in-flight flush do nothing. Periods are clamped to the range of
	/// one millisecond to one year.
	///
	/// Must be called from within a Tokio runtime.
	pub fn spawn_flush_loop(&self, period: Duration) -> FlushLoopHandle {
		let period = period.clamp(MIN_PERIOD, MAX_PERIOD);
		let batcher = self.clone();
		let shutdown = Arc::new(Notify::new());
		let signal = Arc::clone(&shutdown);

		let task = tokio::spawn(async move {
			info!(flush_interval = ?period, "Starting interval flush loop");

			let mut ticker = interval_at(Instant::now() + period, period);
			ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

			loop {
				tokio::select! {
					_ = ticker.tick() => batcher.flush().await,
					_ = signal.notified() => break,
				}
			}

			batcher.flush().await;
			info!("Interval flush loop stopped");
		});

		FlushLoopHandle { shutdown, task }
	}
}
