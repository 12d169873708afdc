// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — PAKE Credential Service
// Licensed under the MIT License

use std::sync::Arc;

use pake_core::crypto;
use pake_core::types::{
    constant_time_eq, KeyExchangeKeyPair, Lockbox, PakeError, PakeResult, SessionKeys,
    KX_PUBLIC_KEY_LENGTH, POINT_LENGTH, SCALAR_LENGTH,
};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::store::{
    CredentialStore, MemoryCredentialStore, MemorySessionStore, SessionStore,
};

/// Registration progress for one username.
///
/// A record is created `Pending` at registration start and becomes
/// `Registered` once the client's envelope arrives; no transition is
/// reversible.
#[derive(Clone, Zeroize)]
pub enum RegistrationState {
    /// Start has been served; the envelope has not arrived yet. Login is
    /// refused in this state.
    Pending,
    /// Registration is complete; the sealed envelope is held verbatim.
    Registered {
        /// Opaque ciphertext the server cannot decrypt.
        lockbox: Lockbox,
    },
}

/// The per-username credential record. Zeroized on drop.
///
/// `opaque_private_key` is the per-user OPRF secret `k`; it is generated at
/// registration start, reused unchanged for every later login (client and
/// server must reach the identical unblinded value), and never leaves the
/// server.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct CredentialRecord {
    /// `k · G`, returned to the client on every challenge response.
    pub opaque_public_key: [u8; POINT_LENGTH],
    /// The per-user OPRF secret `k`.
    pub opaque_private_key: [u8; SCALAR_LENGTH],
    /// The client's long-term key-exchange public key.
    pub client_public_key: [u8; KX_PUBLIC_KEY_LENGTH],
    /// Pending-envelope vs registered, as a type-level distinction.
    pub state: RegistrationState,
}

/// A session issued at login, keyed by its bearer token. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SessionRecord {
    /// The username the session was issued for.
    pub username: String,
    /// Server-side directional keys for this session.
    pub keys: SessionKeys,
}

/// The server process: one long-term key-exchange key pair plus the two
/// injected stores.
pub struct CredentialServer {
    keypair: KeyExchangeKeyPair,
    users: Arc<dyn CredentialStore>,
    sessions: Arc<dyn SessionStore>,
}

impl CredentialServer {
    /// Creates a server with a fresh key pair and in-memory stores.
    ///
    /// # Errors
    ///
    /// Returns [`PakeError::CryptoError`] if key generation fails.
    pub fn new() -> PakeResult<Self> {
        Ok(Self {
            keypair: crypto::kx_keypair()?,
            users: Arc::new(MemoryCredentialStore::default()),
            sessions: Arc::new(MemorySessionStore::default()),
        })
    }

    /// Creates a server from an existing key pair and caller-supplied stores.
    ///
    /// # Errors
    ///
    /// Returns [`PakeError::InvalidPublicKey`] if the public key does not
    /// belong to the secret key.
    pub fn with_stores(
        keypair: KeyExchangeKeyPair,
        users: Arc<dyn CredentialStore>,
        sessions: Arc<dyn SessionStore>,
    ) -> PakeResult<Self> {
        let derived = crypto::kx_public_from_secret(&keypair.secret_key)?;
        if !constant_time_eq(&keypair.public_key, &derived) {
            return Err(PakeError::InvalidPublicKey);
        }
        Ok(Self {
            keypair,
            users,
            sessions,
        })
    }

    /// Returns the server's long-term public key, shared by all users.
    pub fn public_key(&self) -> &[u8; KX_PUBLIC_KEY_LENGTH] {
        &self.keypair.public_key
    }

    pub(crate) fn keypair(&self) -> &KeyExchangeKeyPair {
        &self.keypair
    }

    pub(crate) fn users(&self) -> &dyn CredentialStore {
        self.users.as_ref()
    }

    pub(crate) fn sessions(&self) -> &dyn SessionStore {
        self.sessions.as_ref()
    }
}
