// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — PAKE Credential Service
// Licensed under the MIT License

use pake_core::crypto;
use pake_core::types::{
    ChallengeResponse, Lockbox, PakeError, PakeResult, KX_PUBLIC_KEY_LENGTH,
    MAX_USERNAME_LENGTH, POINT_LENGTH,
};
use zeroize::Zeroize;

use crate::state::{CredentialRecord, CredentialServer, RegistrationState};

/// Serves a registration start request.
///
/// Draws the fresh per-user OPRF secret `k`, computes `opaque_public_key =
/// clamp(k)·G` and `opaque_response = clamp(k)·challenge`, and stores a
/// pending credential record. The clamped code path is intentional: this key
/// is long-lived, and login-time evaluation must clamp identically.
///
/// # Errors
///
/// Returns [`PakeError::AlreadyRegistered`] if a record for `username`
/// exists; the first record is left unmodified.
/// Returns [`PakeError::InvalidInput`] for an empty or oversized username.
/// Returns [`PakeError::InvalidPublicKey`] if the challenge is not a
/// canonical point.
pub fn create_registration_challenge_response(
    server: &CredentialServer,
    username: &str,
    client_public_key: &[u8; KX_PUBLIC_KEY_LENGTH],
    opaque_challenge: &[u8; POINT_LENGTH],
) -> PakeResult<ChallengeResponse> {
    if username.is_empty() || username.len() > MAX_USERNAME_LENGTH {
        return Err(PakeError::InvalidInput);
    }
    crypto::validate_point(opaque_challenge)?;

    let mut opaque_private_key = crypto::random_scalar()?;

    let opaque_public_key = crypto::scalar_mult_base(&opaque_private_key)?;
    let opaque_response = crypto::scalar_mult(&opaque_private_key, opaque_challenge)?;

    let record = CredentialRecord {
        opaque_public_key,
        opaque_private_key,
        client_public_key: *client_public_key,
        state: RegistrationState::Pending,
    };
    opaque_private_key.zeroize();

    server.users().insert_if_absent(username, record)?;
    tracing::debug!(username, "registration challenge issued");

    Ok(ChallengeResponse {
        opaque_response,
        opaque_public_key,
        server_public_key: *server.public_key(),
    })
}

/// Serves a registration finish request, completing the record.
///
/// The lockbox bytes are stored verbatim; the server never attempts to
/// decrypt them.
///
/// # Errors
///
/// Returns [`PakeError::UserNotFound`] if registration start never ran for
/// `username`.
pub fn update_client_registration_envelope(
    server: &CredentialServer,
    username: &str,
    lockbox: &Lockbox,
) -> PakeResult<()> {
    let mut record = server
        .users()
        .get(username)
        .ok_or(PakeError::UserNotFound)?;
    record.state = RegistrationState::Registered {
        lockbox: lockbox.clone(),
    };
    server.users().set(username, record)?;
    tracing::debug!(username, "registration envelope stored");
    Ok(())
}
