// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — PAKE Credential Service
// Licensed under the MIT License

use crate::crypto;
use crate::types::{PakeResult, SecureBytes, NONCE_LENGTH, SESSION_KEY_LENGTH};

/// A message sealed under one directional session key.
#[derive(Clone)]
pub struct EncryptedMessage {
    /// AEAD ciphertext with the tag appended.
    pub ciphertext: Vec<u8>,
    /// Fresh random nonce chosen at encryption time.
    pub nonce: [u8; NONCE_LENGTH],
}

/// Encrypts `plaintext` under the sender's `shared_tx` key with a fresh
/// random nonce.
///
/// # Errors
///
/// Returns [`crate::types::PakeError::InvalidInput`] if `plaintext` is empty.
/// Returns [`crate::types::PakeError::CryptoError`] if encryption fails.
pub fn encrypt_message(
    plaintext: &[u8],
    key: &[u8; SESSION_KEY_LENGTH],
) -> PakeResult<EncryptedMessage> {
    let mut nonce = [0u8; NONCE_LENGTH];
    crypto::random_bytes(&mut nonce)?;
    let ciphertext = crypto::aead_encrypt(key, &nonce, plaintext)?;
    Ok(EncryptedMessage { ciphertext, nonce })
}

/// Decrypts a message under the receiver's `shared_rx` key.
///
/// # Errors
///
/// Returns [`crate::types::PakeError::AuthenticationFailure`] if the key,
/// nonce, or ciphertext do not match exactly what was produced by the peer.
/// The failure is surfaced to the caller; no garbage plaintext is returned.
pub fn decrypt_message(
    ciphertext: &[u8],
    nonce: &[u8; NONCE_LENGTH],
    key: &[u8; SESSION_KEY_LENGTH],
) -> PakeResult<SecureBytes> {
    let plaintext = crypto::aead_decrypt(key, nonce, ciphertext)?;
    Ok(SecureBytes::from(plaintext))
}
