// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Example: track a few events and flush them to a collection endpoint.
//!
//! Run with:
//!   SKOPE_API_KEY=... SKOPE_ENDPOINT=https://collect.example.com \
//!     cargo run --example track -p skope-link

use std::time::Duration;

use skope_link::{EventBatcher, Properties, SdkConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.init();

	let config = SdkConfig::from_env()?;
	let batcher = EventBatcher::http()?;
	batcher.initialize(config)?;

	let flush_loop = batcher.spawn_flush_loop(Duration::from_secs(5));

	batcher.track("app_started", Properties::new().insert("example", true));
	for page in ["/", "/pricing", "/signup"] {
		batcher.track("page_view", Properties::new().insert("path", page));
	}
	batcher.track(
		"user_signup",
		serde_json::json!({ "plan": "premium", "seats": 5 }),
	);

	println!("Queued {} events, flushing...", batcher.queue_len());
	batcher.flush().await;

	if batcher.queue_len() > 0 {
		println!(
			"{} events could not be delivered and remain queued",
			batcher.queue_len()
		);
	} else {
		println!("All events delivered");
	}

	flush_loop.shutdown().await;
	Ok(())
}
