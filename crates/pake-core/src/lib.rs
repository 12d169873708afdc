// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — PAKE Credential Service
// Licensed under the MIT License

//! Core library for the Ecliptix PAKE credential service.
//!
//! Implements the shared building blocks of an OPAQUE-style asymmetric PAKE
//! over Edwards25519: a client blinds its password into an opaque challenge,
//! the server evaluates the challenge with a per-user secret it never
//! reveals, and the unblinded result keys an Argon2id-stretched lockbox that
//! carries the client's long-term key-exchange credentials. Neither the
//! password nor anything offline-attackable from it ever crosses the wire or
//! lands in server storage.
//!
//! # Crate layout
//!
//! * [`types`] -- shared constants, error types, and secure byte containers.
//! * [`crypto`] -- low-level cryptographic primitives (libsodium wrappers).
//! * [`lockbox`] -- credential envelope seal/open under the password-derived key.
//! * [`message`] -- authenticated messaging under directional session keys.
//! * [`protocol`] -- wire-format serialization for the two protocol phases.

/// Low-level cryptographic primitives wrapping libsodium.
pub mod crypto;
/// Credential lockbox seal and open operations.
pub mod lockbox;
/// Authenticated message encryption under session keys.
pub mod message;
/// Wire-format serialization and parsing for protocol messages.
pub mod protocol;
/// Shared constants, error types, and secure byte containers.
pub mod types;
