// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! HTTP client builder with a consistent User-Agent header.

use reqwest::ClientBuilder;

/// SDK version reported in the User-Agent.
const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Platform string in `{os}-{arch}` format, e.g. "linux-x86_64".
pub fn platform() -> String {
	format!("{}-{}", std::env::consts::OS, std::env::consts::ARCH)
}

/// Creates a new HTTP client builder with the standard SkopeLink User-Agent.
///
/// Use this when you need to customize the client (e.g., set timeout).
///
/// # Example
/// ```ignore
/// let client = skope_common_http::builder()
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// ```
pub fn builder() -> ClientBuilder {
	reqwest::Client::builder().user_agent(user_agent())
}

/// Returns the standard SkopeLink User-Agent string.
///
/// Format: `skope-link/{version}/{platform}`
pub fn user_agent() -> String {
	format!("skope-link/{}/{}", SDK_VERSION, platform())
}
