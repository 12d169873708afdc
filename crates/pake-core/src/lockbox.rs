// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — PAKE Credential Service
// Licensed under the MIT License

use crate::crypto;
use crate::types::{
    constant_time_eq, KeyExchangeKeyPair, Lockbox, PakeError, PakeResult,
    KX_PUBLIC_KEY_LENGTH, KX_SECRET_KEY_LENGTH, LOCKBOX_CIPHERTEXT_LENGTH,
    LOCKBOX_PLAINTEXT_LENGTH, LOCKBOX_VERSION, NONCE_LENGTH, SYMMETRIC_KEY_LENGTH,
};
use zeroize::{Zeroize, ZeroizeOnDrop};

const VERSION_OFFSET: usize = 0;
const CLIENT_PUBLIC_KEY_OFFSET: usize = 1;
const CLIENT_SECRET_KEY_OFFSET: usize = CLIENT_PUBLIC_KEY_OFFSET + KX_PUBLIC_KEY_LENGTH;
const SERVER_PUBLIC_KEY_OFFSET: usize = CLIENT_SECRET_KEY_OFFSET + KX_SECRET_KEY_LENGTH;

/// The credential triple recovered from an opened lockbox. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct LockboxContents {
    /// The client's long-term key-exchange public key.
    pub client_public_key: [u8; KX_PUBLIC_KEY_LENGTH],
    /// The client's long-term key-exchange secret key.
    pub client_secret_key: [u8; KX_SECRET_KEY_LENGTH],
    /// The server public key observed at registration time.
    pub server_public_key: [u8; KX_PUBLIC_KEY_LENGTH],
}

/// Seals the client's long-term key pair and the server's public key into a
/// lockbox under the password-derived key.
///
/// The plaintext layout is a private wire format of this protocol:
/// `version || client_public_key || client_secret_key || server_public_key`,
/// encrypted with a fresh random nonce.
///
/// # Errors
///
/// Returns [`PakeError::CryptoError`] if nonce generation or encryption fails.
pub fn seal(
    lockbox_key: &[u8; SYMMETRIC_KEY_LENGTH],
    client_keypair: &KeyExchangeKeyPair,
    server_public_key: &[u8; KX_PUBLIC_KEY_LENGTH],
) -> PakeResult<Lockbox> {
    let mut plaintext = [0u8; LOCKBOX_PLAINTEXT_LENGTH];
    plaintext[VERSION_OFFSET] = LOCKBOX_VERSION;
    plaintext[CLIENT_PUBLIC_KEY_OFFSET..CLIENT_SECRET_KEY_OFFSET]
        .copy_from_slice(&client_keypair.public_key);
    plaintext[CLIENT_SECRET_KEY_OFFSET..SERVER_PUBLIC_KEY_OFFSET]
        .copy_from_slice(&client_keypair.secret_key);
    plaintext[SERVER_PUBLIC_KEY_OFFSET..].copy_from_slice(server_public_key);

    let mut nonce = [0u8; NONCE_LENGTH];
    crypto::random_bytes(&mut nonce)?;

    let result = crypto::aead_encrypt(lockbox_key, &nonce, &plaintext);
    plaintext.zeroize();
    let sealed = result?;

    let ciphertext: [u8; LOCKBOX_CIPHERTEXT_LENGTH] = sealed
        .as_slice()
        .try_into()
        .map_err(|_| PakeError::InvalidLockbox)?;
    Ok(Lockbox { ciphertext, nonce })
}

/// Opens a sealed lockbox and recovers the client's credential triple.
///
/// Verifies the version tag and that the recovered public key matches the
/// recovered secret key before returning the contents.
///
/// # Errors
///
/// Returns [`PakeError::AuthenticationFailure`] if the AEAD tag does not
/// verify (wrong password, tampering, or corrupted storage) or the recovered
/// key pair is inconsistent.
/// Returns [`PakeError::InvalidLockbox`] if the decrypted structure has an
/// unknown version or unexpected length.
pub fn open(
    lockbox: &Lockbox,
    lockbox_key: &[u8; SYMMETRIC_KEY_LENGTH],
) -> PakeResult<LockboxContents> {
    let mut plaintext = crypto::aead_decrypt(lockbox_key, &lockbox.nonce, &lockbox.ciphertext)?;

    if plaintext.len() != LOCKBOX_PLAINTEXT_LENGTH {
        plaintext.zeroize();
        return Err(PakeError::InvalidLockbox);
    }
    if plaintext[VERSION_OFFSET] != LOCKBOX_VERSION {
        plaintext.zeroize();
        return Err(PakeError::InvalidLockbox);
    }

    let mut contents = LockboxContents {
        client_public_key: [0u8; KX_PUBLIC_KEY_LENGTH],
        client_secret_key: [0u8; KX_SECRET_KEY_LENGTH],
        server_public_key: [0u8; KX_PUBLIC_KEY_LENGTH],
    };
    contents
        .client_public_key
        .copy_from_slice(&plaintext[CLIENT_PUBLIC_KEY_OFFSET..CLIENT_SECRET_KEY_OFFSET]);
    contents
        .client_secret_key
        .copy_from_slice(&plaintext[CLIENT_SECRET_KEY_OFFSET..SERVER_PUBLIC_KEY_OFFSET]);
    contents
        .server_public_key
        .copy_from_slice(&plaintext[SERVER_PUBLIC_KEY_OFFSET..]);
    plaintext.zeroize();

    let derived_public_key = crypto::kx_public_from_secret(&contents.client_secret_key)?;
    if !constant_time_eq(&contents.client_public_key, &derived_public_key) {
        return Err(PakeError::AuthenticationFailure);
    }

    Ok(contents)
}
