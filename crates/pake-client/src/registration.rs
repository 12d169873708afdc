// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — PAKE Credential Service
// Licensed under the MIT License

use pake_core::crypto;
use pake_core::lockbox;
use pake_core::types::{
    ChallengeResponse, Lockbox, PakeError, PakeResult, DIGEST_LENGTH, SYMMETRIC_KEY_LENGTH,
};
use zeroize::Zeroize;

use crate::state::{BlindingChallenge, PakeClient};

/// Blinds `password` into an opaque challenge.
///
/// Hashes the password onto a uniformly distributed curve point `P`, draws a
/// fresh secret scalar `r`, and returns `P + r·G` together with `r`. The
/// server learns nothing about `P` from the challenge.
///
/// # Errors
///
/// Returns [`PakeError::InvalidInput`] if `password` is empty.
/// Returns [`PakeError::CryptoError`] if a curve operation fails.
pub fn create_challenge(password: &[u8]) -> PakeResult<BlindingChallenge> {
    if password.is_empty() {
        return Err(PakeError::InvalidInput);
    }

    let mut digest = crypto::hash(password)?;
    let password_point = crypto::point_from_uniform(&digest);
    digest.zeroize();
    let password_point = password_point?;

    let random_scalar = crypto::random_scalar()?;
    let blinding_point = crypto::scalar_mult_base_noclamp(&random_scalar)?;
    let opaque_challenge = crypto::point_add(&password_point, &blinding_point)?;

    Ok(BlindingChallenge {
        opaque_challenge,
        random_scalar,
    })
}

/// Unblinds the server's challenge response into the randomized password.
///
/// Computes `response + (-r)·opaque_public_key`. Because the response is
/// `k·(P + r·G)` and `opaque_public_key` is `k·G`, the blinding term cancels
/// exactly, leaving `k·P` -- a value only the server's per-user secret could
/// have produced, yet one the server never sees unblinded. The result is
/// bound to the raw password and `opaque_public_key` through the combined
/// hash.
///
/// # Errors
///
/// Returns [`PakeError::InvalidInput`] if `password` is empty.
/// Returns [`PakeError::InvalidPublicKey`] if a response element is not a
/// canonical point.
/// Returns [`PakeError::CryptoError`] if a curve operation fails.
pub fn randomize_password(
    password: &[u8],
    challenge: &BlindingChallenge,
    response: &ChallengeResponse,
) -> PakeResult<[u8; DIGEST_LENGTH]> {
    if password.is_empty() {
        return Err(PakeError::InvalidInput);
    }
    crypto::validate_point(&response.opaque_response)?;
    crypto::validate_point(&response.opaque_public_key)?;

    let mut negated_scalar = crypto::scalar_negate(&challenge.random_scalar);
    let cancellation = crypto::scalar_mult_noclamp(&negated_scalar, &response.opaque_public_key);
    negated_scalar.zeroize();
    let cancellation = cancellation?;

    let mut unblinded = crypto::point_add(&response.opaque_response, &cancellation)?;
    let randomized = crypto::combined_hash(&[
        password,
        &response.opaque_public_key,
        &unblinded,
    ]);
    unblinded.zeroize();
    randomized
}

/// Stretches the randomized password into the symmetric lockbox key.
///
/// Deliberately expensive (Argon2id, INTERACTIVE cost); callers should
/// expect tens to hundreds of milliseconds.
///
/// # Errors
///
/// Propagates the errors of [`randomize_password`] and the KDF.
pub fn derive_lockbox_key(
    password: &[u8],
    challenge: &BlindingChallenge,
    response: &ChallengeResponse,
) -> PakeResult<[u8; SYMMETRIC_KEY_LENGTH]> {
    let mut randomized = randomize_password(password, challenge, response)?;
    let key = crypto::password_kdf(&randomized);
    randomized.zeroize();
    key
}

/// Seals the client's long-term credentials into the registration envelope.
///
/// The envelope round-trips through the server, which stores it verbatim
/// and cannot decrypt it.
///
/// # Errors
///
/// Propagates the errors of [`derive_lockbox_key`] and the seal operation.
pub fn create_registration_envelope(
    client: &PakeClient,
    password: &[u8],
    challenge: &BlindingChallenge,
    response: &ChallengeResponse,
) -> PakeResult<Lockbox> {
    let mut lockbox_key = derive_lockbox_key(password, challenge, response)?;
    let sealed = lockbox::seal(&lockbox_key, client.keypair(), &response.server_public_key);
    lockbox_key.zeroize();
    sealed
}
