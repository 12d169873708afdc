// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — PAKE Credential Service
// Licensed under the MIT License

use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of an Edwards25519 group element encoding in bytes.
pub const POINT_LENGTH: usize = 32;
/// Length of an Edwards25519 scalar in bytes.
pub const SCALAR_LENGTH: usize = 32;
/// Length of a generichash (BLAKE2b) digest in bytes.
pub const DIGEST_LENGTH: usize = 32;
/// Length of the generichash key used by the combined hash in bytes.
pub const HASH_KEY_LENGTH: usize = 32;
/// Length of a symmetric AEAD key in bytes.
pub const SYMMETRIC_KEY_LENGTH: usize = 32;
/// Length of an XChaCha20 nonce in bytes.
pub const NONCE_LENGTH: usize = 24;
/// Length of a Poly1305 authentication tag in bytes.
pub const AEAD_TAG_LENGTH: usize = 16;
/// Length of the fixed Argon2id salt in bytes.
pub const KDF_SALT_LENGTH: usize = 16;
/// Length of a key-exchange public key in bytes.
pub const KX_PUBLIC_KEY_LENGTH: usize = 32;
/// Length of a key-exchange secret key in bytes.
pub const KX_SECRET_KEY_LENGTH: usize = 32;
/// Length of one directional session key in bytes.
pub const SESSION_KEY_LENGTH: usize = 32;
/// Length of a bearer session token in bytes.
pub const SESSION_TOKEN_LENGTH: usize = 32;

/// Version tag carried in the first plaintext byte of every lockbox.
pub const LOCKBOX_VERSION: u8 = 1;
/// Length of the serialized lockbox plaintext in bytes.
pub const LOCKBOX_PLAINTEXT_LENGTH: usize =
    1 + KX_PUBLIC_KEY_LENGTH + KX_SECRET_KEY_LENGTH + KX_PUBLIC_KEY_LENGTH;
/// Length of a sealed lockbox (plaintext plus AEAD tag) in bytes.
pub const LOCKBOX_CIPHERTEXT_LENGTH: usize = LOCKBOX_PLAINTEXT_LENGTH + AEAD_TAG_LENGTH;

/// Maximum accepted username length in bytes.
pub const MAX_USERNAME_LENGTH: usize = 255;

/// Length of a serialized challenge response in bytes.
pub const CHALLENGE_RESPONSE_LENGTH: usize = POINT_LENGTH + POINT_LENGTH + KX_PUBLIC_KEY_LENGTH;
/// Length of a serialized login start response in bytes.
pub const LOGIN_RESPONSE_LENGTH: usize =
    CHALLENGE_RESPONSE_LENGTH + NONCE_LENGTH + LOCKBOX_CIPHERTEXT_LENGTH + SESSION_TOKEN_LENGTH;

const _: () = assert!(POINT_LENGTH == SCALAR_LENGTH);
const _: () = assert!(DIGEST_LENGTH == SYMMETRIC_KEY_LENGTH);
const _: () = assert!(LOCKBOX_PLAINTEXT_LENGTH == 97);
const _: () = assert!(LOCKBOX_CIPHERTEXT_LENGTH == 113);
const _: () = assert!(CHALLENGE_RESPONSE_LENGTH == 96);
const _: () = assert!(LOGIN_RESPONSE_LENGTH == 265);

/// Enumerates all error conditions that can arise during protocol operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PakeError {
    /// An input parameter has an invalid value or length.
    #[error("invalid input parameter")]
    InvalidInput,
    /// A low-level cryptographic primitive returned an error code.
    #[error("cryptographic operation failed")]
    CryptoError,
    /// A protocol message has an unexpected format or length.
    #[error("protocol message has invalid format or length")]
    InvalidProtocolMessage,
    /// The supplied group element is not a valid Edwards25519 point.
    #[error("invalid public key")]
    InvalidPublicKey,
    /// The lockbox has an invalid structure or an unknown version tag.
    #[error("lockbox has invalid format")]
    InvalidLockbox,
    /// AEAD decryption or a key-consistency check failed.
    #[error("authentication failed")]
    AuthenticationFailure,
    /// The username is already registered.
    #[error("account already registered")]
    AlreadyRegistered,
    /// No credential record exists for the username.
    #[error("unknown user")]
    UserNotFound,
    /// The credential record is missing or incomplete; login is refused.
    #[error("unauthorized")]
    Unauthorized,
}

/// Convenience alias for `Result<T, PakeError>`.
pub type PakeResult<T> = Result<T, PakeError>;

/// A heap-allocated byte buffer that is zeroized on drop.
///
/// Wraps a `Vec<u8>` so that variable-length secrets (decrypted messages,
/// randomized passwords) are scrubbed from memory when no longer needed.
/// The `Debug` implementation redacts the contents.
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct SecureBytes(Vec<u8>);

impl SecureBytes {
    /// Returns an immutable reference to the underlying bytes.
    pub fn data(&self) -> &[u8] {
        &self.0
    }

    /// Returns the number of bytes in the buffer.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the buffer contains no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::ops::Deref for SecureBytes {
    type Target = [u8];
    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for SecureBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for SecureBytes {
    fn from(v: Vec<u8>) -> Self {
        Self(v)
    }
}

impl std::fmt::Debug for SecureBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecureBytes([REDACTED; {}])", self.0.len())
    }
}

/// A long-term `crypto_kx` key pair.
///
/// Held by the client identity and by the server process. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct KeyExchangeKeyPair {
    /// X25519 public key.
    pub public_key: [u8; KX_PUBLIC_KEY_LENGTH],
    /// X25519 secret key. Never transmitted; persisted only inside a lockbox.
    pub secret_key: [u8; KX_SECRET_KEY_LENGTH],
}

/// Directional session keys produced by the key exchange.
///
/// One side's `shared_tx` equals the other side's `shared_rx` by
/// construction. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SessionKeys {
    /// Key for messages this side sends.
    pub shared_tx: [u8; SESSION_KEY_LENGTH],
    /// Key for messages this side receives.
    pub shared_rx: [u8; SESSION_KEY_LENGTH],
}

/// The server's answer to a blinded challenge, identical in shape for the
/// registration and login phases.
#[derive(Clone)]
pub struct ChallengeResponse {
    /// `k · opaque_challenge` under the per-user secret `k`.
    pub opaque_response: [u8; POINT_LENGTH],
    /// `k · G`, stable across all logins for the user.
    pub opaque_public_key: [u8; POINT_LENGTH],
    /// The server's long-term key-exchange public key.
    pub server_public_key: [u8; KX_PUBLIC_KEY_LENGTH],
}

/// A sealed credential envelope.
///
/// Ciphertext the server stores verbatim and cannot decrypt; only the
/// password-derived lockbox key opens it.
#[derive(Clone, Zeroize)]
pub struct Lockbox {
    /// AEAD ciphertext of the versioned credential plaintext.
    pub ciphertext: [u8; LOCKBOX_CIPHERTEXT_LENGTH],
    /// Fresh random XChaCha20 nonce chosen at seal time.
    pub nonce: [u8; NONCE_LENGTH],
}

/// An unguessable bearer token identifying an issued session.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Zeroize)]
pub struct SessionToken(pub [u8; SESSION_TOKEN_LENGTH]);

impl SessionToken {
    /// Returns the raw token bytes.
    pub fn as_bytes(&self) -> &[u8; SESSION_TOKEN_LENGTH] {
        &self.0
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SessionToken([REDACTED])")
    }
}

/// Compares two byte slices in constant time using libsodium's `sodium_memcmp`.
///
/// Returns `true` if the slices are equal. If the lengths differ, returns
/// `false` immediately (length itself is not secret).
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    // SAFETY: Both pointers come from valid slices. Length equality is verified before the call.
    unsafe {
        libsodium_sys::sodium_memcmp(
            a.as_ptr() as *const _,
            b.as_ptr() as *const _,
            a.len(),
        ) == 0
    }
}

/// Returns `true` if every byte in `data` is zero, checked in constant time.
pub fn is_all_zero(data: &[u8]) -> bool {
    // SAFETY: Pointer comes from a valid slice.
    unsafe { libsodium_sys::sodium_is_zero(data.as_ptr(), data.len()) == 1 }
}
