// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Session-correlation tokens attached to each tracked event.

/// Length of a generated session ID.
pub const SESSION_ID_LEN: usize = 9;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generates a random base-36 session ID, e.g. `"k3j2h1g0f"`.
///
/// Not cryptographically random; it only correlates events on the server.
pub fn generate_session_id() -> String {
	generate_session_id_with(&mut fastrand::Rng::new())
}

/// Generates a session ID from the given RNG.
pub fn generate_session_id_with(rng: &mut fastrand::Rng) -> String {
	(0..SESSION_ID_LEN)
		.map(|_| ALPHABET[rng.usize(..ALPHABET.len())] as char)
		.collect()
}
