// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — PAKE Credential Service
// Licensed under the MIT License

use pake_core::crypto;
use pake_core::types::{
    constant_time_eq, KeyExchangeKeyPair, PakeError, PakeResult, KX_PUBLIC_KEY_LENGTH,
    POINT_LENGTH, SCALAR_LENGTH,
};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A client identity: the long-term key-exchange key pair, created once and
/// reused across registration and every login.
pub struct PakeClient {
    keypair: KeyExchangeKeyPair,
}

impl PakeClient {
    /// Generates a fresh client identity.
    ///
    /// # Errors
    ///
    /// Returns [`PakeError::CryptoError`] if key generation fails.
    pub fn generate() -> PakeResult<Self> {
        let keypair = crypto::kx_keypair()?;
        Ok(Self { keypair })
    }

    /// Restores a client identity from an existing key pair, verifying that
    /// the public key belongs to the secret key.
    ///
    /// # Errors
    ///
    /// Returns [`PakeError::InvalidPublicKey`] if the keys do not match.
    pub fn from_keypair(keypair: KeyExchangeKeyPair) -> PakeResult<Self> {
        let derived = crypto::kx_public_from_secret(&keypair.secret_key)?;
        if !constant_time_eq(&keypair.public_key, &derived) {
            return Err(PakeError::InvalidPublicKey);
        }
        Ok(Self { keypair })
    }

    /// Returns the client's long-term public key.
    pub fn public_key(&self) -> &[u8; KX_PUBLIC_KEY_LENGTH] {
        &self.keypair.public_key
    }

    pub(crate) fn keypair(&self) -> &KeyExchangeKeyPair {
        &self.keypair
    }
}

/// Per-run blinding state: the opaque challenge sent to the server and the
/// secret scalar that hides the password point inside it.
///
/// The scalar is freshly random for every run, never serialized, and never
/// derived from the password. Reusing it across runs breaks the blinding
/// guarantee, so the only way to obtain one is [`create_challenge`].
///
/// [`create_challenge`]: crate::create_challenge
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct BlindingChallenge {
    /// `P + r·G`, the only part that goes on the wire.
    pub opaque_challenge: [u8; POINT_LENGTH],
    pub(crate) random_scalar: [u8; SCALAR_LENGTH],
}

impl std::fmt::Debug for BlindingChallenge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlindingChallenge")
            .field("opaque_challenge", &self.opaque_challenge)
            .field("random_scalar", &"[REDACTED]")
            .finish()
    }
}
