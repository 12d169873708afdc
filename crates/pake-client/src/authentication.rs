// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — PAKE Credential Service
// Licensed under the MIT License

use pake_core::crypto;
use pake_core::lockbox;
use pake_core::types::{ChallengeResponse, Lockbox, PakeResult, SessionKeys};
use zeroize::Zeroize;

use crate::registration::derive_lockbox_key;
use crate::state::BlindingChallenge;

/// Derives the client's directional session keys at login time.
///
/// Recomputes the lockbox key from the fresh login challenge/response,
/// opens the stored envelope, and runs the client-role key exchange with
/// the recovered long-term key pair against the server public key sealed
/// inside the envelope at registration time.
///
/// # Errors
///
/// Returns [`pake_core::types::PakeError::AuthenticationFailure`] if the
/// envelope does not open -- a wrong password or a tampered envelope. The
/// failure is surfaced as-is; retrying cannot succeed without new input.
pub fn derive_session_keys(
    password: &[u8],
    challenge: &BlindingChallenge,
    response: &ChallengeResponse,
    lockbox: &Lockbox,
) -> PakeResult<SessionKeys> {
    let mut lockbox_key = derive_lockbox_key(password, challenge, response)?;
    let opened = lockbox::open(lockbox, &lockbox_key);
    lockbox_key.zeroize();
    let contents = opened?;

    crypto::kx_client_session_keys(
        &contents.client_public_key,
        &contents.client_secret_key,
        &contents.server_public_key,
    )
}
