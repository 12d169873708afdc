// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — PAKE Credential Service (Server)
// Licensed under the MIT License

//! Server side (responder) of the Ecliptix PAKE credential service.
//!
//! Holds the per-user credential records and issued sessions behind injected
//! store abstractions, answers blinded challenges with the per-user OPRF
//! secret, and derives the server half of the directional session keys. The
//! server never sees a password, never decrypts a lockbox, and a stolen
//! store yields nothing an offline dictionary attack can use.

/// Login flow, session issuance, and session lookup.
mod authentication;
/// Registration flow for the responder.
mod registration;
/// Server state, credential records, and session records.
mod state;
/// Injected store abstractions and in-memory implementations.
mod store;

pub use authentication::{
    derive_session_keys, get_login_challenge_response, issue_session, revoke_session, session,
};
pub use registration::{
    create_registration_challenge_response, update_client_registration_envelope,
};
pub use state::{CredentialRecord, CredentialServer, RegistrationState, SessionRecord};
pub use store::{
    CredentialStore, MemoryCredentialStore, MemorySessionStore, SessionStore,
};
