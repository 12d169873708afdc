// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — PAKE Credential Service
// Licensed under the MIT License

use pake_core::crypto;
use pake_core::types::{
    ChallengeResponse, Lockbox, PakeError, PakeResult, SessionKeys, SessionToken,
    KX_PUBLIC_KEY_LENGTH, POINT_LENGTH, SESSION_TOKEN_LENGTH,
};

use crate::state::{CredentialServer, RegistrationState, SessionRecord};

/// Serves a login start request.
///
/// Recomputes the challenge response with the *stored* per-user secret and
/// returns the *stored* `opaque_public_key` -- determinism here is required
/// for the client to reach the same unblinded value as at registration.
/// The stored envelope rides along for the client to open.
///
/// # Errors
///
/// Returns [`PakeError::Unauthorized`] if no record exists or registration
/// was never completed; the two causes are deliberately indistinguishable
/// so callers cannot enumerate usernames.
pub fn get_login_challenge_response(
    server: &CredentialServer,
    username: &str,
    opaque_challenge: &[u8; POINT_LENGTH],
) -> PakeResult<(ChallengeResponse, Lockbox)> {
    let record = server
        .users()
        .get(username)
        .ok_or(PakeError::Unauthorized)?;
    let RegistrationState::Registered { lockbox } = &record.state else {
        return Err(PakeError::Unauthorized);
    };

    crypto::validate_point(opaque_challenge)?;
    let opaque_response = crypto::scalar_mult(&record.opaque_private_key, opaque_challenge)?;

    tracing::debug!(username, "login challenge served");
    Ok((
        ChallengeResponse {
            opaque_response,
            opaque_public_key: record.opaque_public_key,
            server_public_key: *server.public_key(),
        },
        lockbox.clone(),
    ))
}

/// Derives the server's directional session keys against a client public key.
///
/// The output swaps directions with the client's: server `shared_tx` equals
/// client `shared_rx` and vice versa.
///
/// # Errors
///
/// Returns [`PakeError::CryptoError`] if the key exchange rejects the key.
pub fn derive_session_keys(
    server: &CredentialServer,
    client_public_key: &[u8; KX_PUBLIC_KEY_LENGTH],
) -> PakeResult<SessionKeys> {
    crypto::kx_server_session_keys(
        &server.keypair().public_key,
        &server.keypair().secret_key,
        client_public_key,
    )
}

/// Issues a bearer session for a registered user.
///
/// Derives the session keys from the stored client public key, draws an
/// unguessable random token, and stores the session record under it.
///
/// # Errors
///
/// Returns [`PakeError::Unauthorized`] if the record is missing or still
/// pending.
pub fn issue_session(server: &CredentialServer, username: &str) -> PakeResult<SessionToken> {
    let record = server
        .users()
        .get(username)
        .ok_or(PakeError::Unauthorized)?;
    if !matches!(record.state, RegistrationState::Registered { .. }) {
        return Err(PakeError::Unauthorized);
    }

    let keys = derive_session_keys(server, &record.client_public_key)?;

    let mut token_bytes = [0u8; SESSION_TOKEN_LENGTH];
    crypto::random_bytes(&mut token_bytes)?;
    let token = SessionToken(token_bytes);

    server.sessions().insert(
        token.clone(),
        SessionRecord {
            username: username.to_owned(),
            keys,
        },
    );
    tracing::info!(username, "session issued");
    Ok(token)
}

/// Looks up the session behind a bearer token.
pub fn session(server: &CredentialServer, token: &SessionToken) -> Option<SessionRecord> {
    server.sessions().get(token)
}

/// Revokes a session. Returns `true` if a session existed for the token.
pub fn revoke_session(server: &CredentialServer, token: &SessionToken) -> bool {
    let removed = server.sessions().remove(token);
    if let Some(record) = &removed {
        tracing::info!(username = record.username.as_str(), "session revoked");
    }
    removed.is_some()
}
