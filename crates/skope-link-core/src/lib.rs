// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for the SkopeLink event SDK.
//!
//! Everything in this crate is pure: configuration normalization, the event
//! record and its wire encoding, the property builder, and session-id
//! generation. The batching engine and HTTP transport live in `skope-link`.

pub mod api_key;
pub mod config;
pub mod error;
pub mod event;
pub mod properties;
pub mod session;

pub use api_key::ApiKey;
pub use config::{Config, SdkConfig, DEFAULT_BATCH_SIZE, DEFAULT_RETRY_ATTEMPTS, TRACK_PATH};
pub use error::{ConfigError, Result};
pub use event::{encode_batch, TrackedEvent, EVENT_SOURCE, USER_ID_PROPERTY};
pub use properties::Properties;
pub use session::{generate_session_id, generate_session_id_with, SESSION_ID_LEN};
