// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP utilities for SkopeLink.
//!
//! Every outbound request made by the SDK goes through a client built here,
//! so the collection endpoint always sees the same User-Agent shape.

mod client;

pub use client::{builder, platform, user_agent};
