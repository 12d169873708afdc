// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — PAKE Credential Service (Client)
// Licensed under the MIT License

//! Client side (initiator) of the Ecliptix PAKE credential service.
//!
//! Covers the blinding, unblinding, envelope, and session-key steps of the
//! two-phase protocol. A registration is one `create_challenge` /
//! `create_registration_envelope` round trip; a login is one
//! `create_challenge` / `derive_session_keys` round trip. Each run needs a
//! fresh [`BlindingChallenge`].

/// Client-side login flow.
mod authentication;
/// Client-side registration flow.
mod registration;
/// Client identity and per-run blinding state.
mod state;

pub use authentication::derive_session_keys;
pub use registration::{
    create_challenge, create_registration_envelope, derive_lockbox_key, randomize_password,
};
pub use state::{BlindingChallenge, PakeClient};
