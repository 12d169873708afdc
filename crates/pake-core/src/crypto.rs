// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — PAKE Credential Service
// Licensed under the MIT License

use crate::types::{
    is_all_zero, KeyExchangeKeyPair, PakeError, PakeResult, SessionKeys, DIGEST_LENGTH,
    HASH_KEY_LENGTH, KDF_SALT_LENGTH, KX_PUBLIC_KEY_LENGTH, KX_SECRET_KEY_LENGTH, NONCE_LENGTH,
    AEAD_TAG_LENGTH, POINT_LENGTH, SCALAR_LENGTH, SESSION_KEY_LENGTH, SYMMETRIC_KEY_LENGTH,
};
use zeroize::Zeroize;

/// Argon2id iteration count (INTERACTIVE profile).
const KDF_OPSLIMIT: u64 = 2;
/// Argon2id memory limit in bytes (64 MiB, INTERACTIVE profile).
const KDF_MEMLIMIT: usize = 67_108_864;
/// Algorithm identifier for Argon2id v1.3 in libsodium.
const KDF_ALG_ARGON2ID13: i32 = 2;

/// Initializes libsodium. Idempotent and safe to call from multiple threads.
///
/// # Errors
///
/// Returns [`PakeError::CryptoError`] if the library cannot be initialized.
pub fn init() -> PakeResult<()> {
    // SAFETY: sodium_init may be called concurrently and repeatedly.
    let rc = unsafe { libsodium_sys::sodium_init() };
    if rc < 0 {
        return Err(PakeError::CryptoError);
    }
    Ok(())
}

/// Fills `buf` with cryptographically secure random bytes.
///
/// # Errors
///
/// Returns [`PakeError::InvalidInput`] if `buf` is empty.
pub fn random_bytes(buf: &mut [u8]) -> PakeResult<()> {
    if buf.is_empty() {
        return Err(PakeError::InvalidInput);
    }
    init()?;
    // SAFETY: buf is a valid mutable slice; length matches buf.len().
    unsafe {
        libsodium_sys::randombytes_buf(buf.as_mut_ptr() as *mut _, buf.len());
    }
    Ok(())
}

/// Generates a uniformly random, non-zero Edwards25519 scalar.
///
/// Loops until a non-zero scalar is obtained (overwhelmingly likely on the
/// first try).
///
/// # Errors
///
/// Returns [`PakeError::CryptoError`] if libsodium cannot be initialized.
pub fn random_scalar() -> PakeResult<[u8; SCALAR_LENGTH]> {
    init()?;
    loop {
        let mut scalar = [0u8; SCALAR_LENGTH];
        // SAFETY: Output is a 32-byte array.
        unsafe {
            libsodium_sys::crypto_core_ed25519_scalar_random(scalar.as_mut_ptr());
        }
        if !is_all_zero(&scalar) {
            return Ok(scalar);
        }
    }
}

/// Computes `-scalar` modulo the Edwards25519 group order.
pub fn scalar_negate(scalar: &[u8; SCALAR_LENGTH]) -> [u8; SCALAR_LENGTH] {
    let mut negated = [0u8; SCALAR_LENGTH];
    // SAFETY: Both arrays are 32 bytes as required.
    unsafe {
        libsodium_sys::crypto_core_ed25519_scalar_negate(negated.as_mut_ptr(), scalar.as_ptr());
    }
    negated
}

/// Adds two Edwards25519 group elements: `P + Q`.
///
/// # Errors
///
/// Returns [`PakeError::CryptoError`] if either encoding is not a valid point.
pub fn point_add(
    p: &[u8; POINT_LENGTH],
    q: &[u8; POINT_LENGTH],
) -> PakeResult<[u8; POINT_LENGTH]> {
    let mut sum = [0u8; POINT_LENGTH];
    // SAFETY: All arrays are 32 bytes as required. Return code is checked.
    unsafe {
        if libsodium_sys::crypto_core_ed25519_add(sum.as_mut_ptr(), p.as_ptr(), q.as_ptr()) != 0 {
            return Err(PakeError::CryptoError);
        }
    }
    Ok(sum)
}

/// Maps 32 uniform bytes onto an Edwards25519 point of the prime-order
/// subgroup (hash-to-curve).
///
/// # Errors
///
/// Returns [`PakeError::CryptoError`] if the mapping fails.
pub fn point_from_uniform(uniform: &[u8; DIGEST_LENGTH]) -> PakeResult<[u8; POINT_LENGTH]> {
    let mut point = [0u8; POINT_LENGTH];
    // SAFETY: Input and output are 32-byte arrays. Return code is checked.
    unsafe {
        if libsodium_sys::crypto_core_ed25519_from_uniform(point.as_mut_ptr(), uniform.as_ptr())
            != 0
        {
            return Err(PakeError::CryptoError);
        }
    }
    Ok(point)
}

/// Validates that `point` is a canonical Edwards25519 element of the
/// prime-order subgroup.
///
/// # Errors
///
/// Returns [`PakeError::InvalidPublicKey`] if `point` has the wrong length,
/// is all zeros, or is not a valid encoding.
pub fn validate_point(point: &[u8]) -> PakeResult<()> {
    if point.len() != POINT_LENGTH {
        return Err(PakeError::InvalidPublicKey);
    }
    if is_all_zero(point) {
        return Err(PakeError::InvalidPublicKey);
    }
    // SAFETY: Pointer comes from a valid slice of POINT_LENGTH bytes.
    unsafe {
        if libsodium_sys::crypto_core_ed25519_is_valid_point(point.as_ptr()) != 1 {
            return Err(PakeError::InvalidPublicKey);
        }
    }
    Ok(())
}

/// Computes the clamped base-point multiplication `clamp(scalar) · G`.
///
/// Used for long-lived per-user keys; the clamping matches the login-time
/// challenge evaluation so both sides reach the identical unblinded value.
///
/// # Errors
///
/// Returns [`PakeError::CryptoError`] if the result would be the identity.
pub fn scalar_mult_base(scalar: &[u8; SCALAR_LENGTH]) -> PakeResult<[u8; POINT_LENGTH]> {
    let mut point = [0u8; POINT_LENGTH];
    // SAFETY: All arrays are 32 bytes as required. Return code is checked.
    unsafe {
        if libsodium_sys::crypto_scalarmult_ed25519_base(point.as_mut_ptr(), scalar.as_ptr()) != 0
        {
            return Err(PakeError::CryptoError);
        }
    }
    Ok(point)
}

/// Computes the unclamped base-point multiplication `scalar · G`.
///
/// Used for the single-use blinding term, where the scalar must enter the
/// arithmetic exactly as drawn.
///
/// # Errors
///
/// Returns [`PakeError::CryptoError`] if the scalar is zero modulo the group order.
pub fn scalar_mult_base_noclamp(scalar: &[u8; SCALAR_LENGTH]) -> PakeResult<[u8; POINT_LENGTH]> {
    let mut point = [0u8; POINT_LENGTH];
    // SAFETY: All arrays are 32 bytes as required. Return code is checked.
    unsafe {
        if libsodium_sys::crypto_scalarmult_ed25519_base_noclamp(
            point.as_mut_ptr(),
            scalar.as_ptr(),
        ) != 0
        {
            return Err(PakeError::CryptoError);
        }
    }
    Ok(point)
}

/// Computes the clamped scalar multiplication `clamp(scalar) · P`.
///
/// # Errors
///
/// Returns [`PakeError::CryptoError`] if `point` is invalid or the result
/// would be the identity.
pub fn scalar_mult(
    scalar: &[u8; SCALAR_LENGTH],
    point: &[u8; POINT_LENGTH],
) -> PakeResult<[u8; POINT_LENGTH]> {
    let mut product = [0u8; POINT_LENGTH];
    // SAFETY: All arrays are 32 bytes as required. Return code is checked.
    unsafe {
        if libsodium_sys::crypto_scalarmult_ed25519(
            product.as_mut_ptr(),
            scalar.as_ptr(),
            point.as_ptr(),
        ) != 0
        {
            return Err(PakeError::CryptoError);
        }
    }
    Ok(product)
}

/// Computes the unclamped scalar multiplication `scalar · P`.
///
/// # Errors
///
/// Returns [`PakeError::CryptoError`] if `point` is invalid or the result
/// would be the identity.
pub fn scalar_mult_noclamp(
    scalar: &[u8; SCALAR_LENGTH],
    point: &[u8; POINT_LENGTH],
) -> PakeResult<[u8; POINT_LENGTH]> {
    let mut product = [0u8; POINT_LENGTH];
    // SAFETY: All arrays are 32 bytes as required. Return code is checked.
    unsafe {
        if libsodium_sys::crypto_scalarmult_ed25519_noclamp(
            product.as_mut_ptr(),
            scalar.as_ptr(),
            point.as_ptr(),
        ) != 0
        {
            return Err(PakeError::CryptoError);
        }
    }
    Ok(product)
}

/// Computes the unkeyed generichash (BLAKE2b) digest of `input`.
///
/// # Errors
///
/// Returns [`PakeError::InvalidInput`] if `input` is empty.
/// Returns [`PakeError::CryptoError`] if the hash call fails.
pub fn hash(input: &[u8]) -> PakeResult<[u8; DIGEST_LENGTH]> {
    if input.is_empty() {
        return Err(PakeError::InvalidInput);
    }
    let mut digest = [0u8; DIGEST_LENGTH];
    // SAFETY: Output is a 32-byte array, input is a valid slice. A null key
    // pointer with zero length selects the unkeyed construction.
    unsafe {
        if libsodium_sys::crypto_generichash(
            digest.as_mut_ptr(),
            DIGEST_LENGTH,
            input.as_ptr(),
            input.len() as u64,
            std::ptr::null(),
            0,
        ) != 0
        {
            return Err(PakeError::CryptoError);
        }
    }
    Ok(digest)
}

/// Feeds all `parts` through one keyed generichash state in order and
/// finalizes once.
///
/// Binding multiple values into a single digest this way prevents
/// cross-protocol confusion if any one part were hashed alone.
///
/// # Errors
///
/// Returns [`PakeError::InvalidInput`] if `parts` is empty.
/// Returns [`PakeError::CryptoError`] if a hash step fails.
pub fn combined_hash(parts: &[&[u8]]) -> PakeResult<[u8; DIGEST_LENGTH]> {
    if parts.is_empty() {
        return Err(PakeError::InvalidInput);
    }

    let key = [0u8; HASH_KEY_LENGTH];
    let mut digest = [0u8; DIGEST_LENGTH];
    // SAFETY: State is initialized by _init before use. Subsequent _update and
    // _final calls use the initialized state pointer. Return codes are checked.
    unsafe {
        let mut state =
            std::mem::MaybeUninit::<libsodium_sys::crypto_generichash_state>::uninit();
        let state_ptr = state.as_mut_ptr();
        if libsodium_sys::crypto_generichash_init(
            state_ptr,
            key.as_ptr(),
            key.len(),
            DIGEST_LENGTH,
        ) != 0
        {
            return Err(PakeError::CryptoError);
        }
        for part in parts {
            if libsodium_sys::crypto_generichash_update(
                state_ptr,
                part.as_ptr(),
                part.len() as u64,
            ) != 0
            {
                return Err(PakeError::CryptoError);
            }
        }
        if libsodium_sys::crypto_generichash_final(state_ptr, digest.as_mut_ptr(), DIGEST_LENGTH)
            != 0
        {
            return Err(PakeError::CryptoError);
        }
    }
    Ok(digest)
}

/// Stretches `input` into a symmetric key with Argon2id (INTERACTIVE cost).
///
/// The salt is fixed and all-zero: the input is the randomized password,
/// which already carries the entropy of the server's per-user OPRF secret
/// and is never the raw password. Callers must expect this to take tens to
/// hundreds of milliseconds.
///
/// # Errors
///
/// Returns [`PakeError::InvalidInput`] if `input` is empty.
/// Returns [`PakeError::CryptoError`] if Argon2id fails (e.g., insufficient memory).
pub fn password_kdf(input: &[u8]) -> PakeResult<[u8; SYMMETRIC_KEY_LENGTH]> {
    if input.is_empty() {
        return Err(PakeError::InvalidInput);
    }

    let salt = [0u8; KDF_SALT_LENGTH];
    let mut key = [0u8; SYMMETRIC_KEY_LENGTH];
    // SAFETY: All buffers are valid and correctly sized. opslimit/memlimit are
    // constant. Algorithm is Argon2id13. Return code is checked.
    unsafe {
        if libsodium_sys::crypto_pwhash(
            key.as_mut_ptr(),
            key.len() as u64,
            input.as_ptr().cast(),
            input.len() as u64,
            salt.as_ptr(),
            KDF_OPSLIMIT,
            KDF_MEMLIMIT,
            KDF_ALG_ARGON2ID13,
        ) != 0
        {
            key.zeroize();
            return Err(PakeError::CryptoError);
        }
    }
    Ok(key)
}

/// Encrypts `plaintext` with XChaCha20-Poly1305-IETF.
///
/// The returned ciphertext carries the Poly1305 tag appended.
///
/// # Errors
///
/// Returns [`PakeError::InvalidInput`] if `plaintext` is empty.
/// Returns [`PakeError::CryptoError`] if encryption fails.
pub fn aead_encrypt(
    key: &[u8; SYMMETRIC_KEY_LENGTH],
    nonce: &[u8; NONCE_LENGTH],
    plaintext: &[u8],
) -> PakeResult<Vec<u8>> {
    if plaintext.is_empty() {
        return Err(PakeError::InvalidInput);
    }

    let mut ciphertext = vec![0u8; plaintext.len() + AEAD_TAG_LENGTH];
    let mut ciphertext_len: u64 = 0;
    // SAFETY: Output buffer holds plaintext length plus the tag. Key is 32
    // bytes, nonce is 24 bytes. No associated data. Return code is checked.
    unsafe {
        if libsodium_sys::crypto_aead_xchacha20poly1305_ietf_encrypt(
            ciphertext.as_mut_ptr(),
            &mut ciphertext_len,
            plaintext.as_ptr(),
            plaintext.len() as u64,
            std::ptr::null(),
            0,
            std::ptr::null(),
            nonce.as_ptr(),
            key.as_ptr(),
        ) != 0
        {
            return Err(PakeError::CryptoError);
        }
    }
    ciphertext.truncate(ciphertext_len as usize);
    Ok(ciphertext)
}

/// Decrypts and authenticates an XChaCha20-Poly1305-IETF ciphertext.
///
/// # Errors
///
/// Returns [`PakeError::InvalidInput`] if `ciphertext` is shorter than a tag.
/// Returns [`PakeError::AuthenticationFailure`] if the key, nonce, or
/// ciphertext do not match what was produced at encryption time.
pub fn aead_decrypt(
    key: &[u8; SYMMETRIC_KEY_LENGTH],
    nonce: &[u8; NONCE_LENGTH],
    ciphertext: &[u8],
) -> PakeResult<Vec<u8>> {
    if ciphertext.len() <= AEAD_TAG_LENGTH {
        return Err(PakeError::InvalidInput);
    }

    let mut plaintext = vec![0u8; ciphertext.len() - AEAD_TAG_LENGTH];
    let mut plaintext_len: u64 = 0;
    // SAFETY: Output buffer holds ciphertext length minus the tag. Key is 32
    // bytes, nonce is 24 bytes. No associated data. Return code is checked;
    // a non-zero return means the tag did not verify.
    unsafe {
        if libsodium_sys::crypto_aead_xchacha20poly1305_ietf_decrypt(
            plaintext.as_mut_ptr(),
            &mut plaintext_len,
            std::ptr::null_mut(),
            ciphertext.as_ptr(),
            ciphertext.len() as u64,
            std::ptr::null(),
            0,
            nonce.as_ptr(),
            key.as_ptr(),
        ) != 0
        {
            plaintext.zeroize();
            return Err(PakeError::AuthenticationFailure);
        }
    }
    plaintext.truncate(plaintext_len as usize);
    Ok(plaintext)
}

/// Generates a fresh `crypto_kx` key pair.
///
/// # Errors
///
/// Returns [`PakeError::CryptoError`] if key generation fails.
pub fn kx_keypair() -> PakeResult<KeyExchangeKeyPair> {
    init()?;
    let mut public_key = [0u8; KX_PUBLIC_KEY_LENGTH];
    let mut secret_key = [0u8; KX_SECRET_KEY_LENGTH];
    // SAFETY: Both arrays are 32 bytes as required. Return code is checked.
    unsafe {
        if libsodium_sys::crypto_kx_keypair(public_key.as_mut_ptr(), secret_key.as_mut_ptr()) != 0
        {
            return Err(PakeError::CryptoError);
        }
    }
    Ok(KeyExchangeKeyPair {
        public_key,
        secret_key,
    })
}

/// Recomputes the X25519 public key belonging to `secret_key`.
///
/// # Errors
///
/// Returns [`PakeError::CryptoError`] if the base multiplication fails.
pub fn kx_public_from_secret(
    secret_key: &[u8; KX_SECRET_KEY_LENGTH],
) -> PakeResult<[u8; KX_PUBLIC_KEY_LENGTH]> {
    let mut public_key = [0u8; KX_PUBLIC_KEY_LENGTH];
    // SAFETY: Both arrays are 32 bytes as required. Return code is checked.
    unsafe {
        if libsodium_sys::crypto_scalarmult_base(public_key.as_mut_ptr(), secret_key.as_ptr())
            != 0
        {
            return Err(PakeError::CryptoError);
        }
    }
    Ok(public_key)
}

/// Derives directional session keys in the client role.
///
/// The client's `shared_tx` equals the server's `shared_rx` and vice versa.
///
/// # Errors
///
/// Returns [`PakeError::CryptoError`] if the peer public key is unacceptable.
pub fn kx_client_session_keys(
    client_public_key: &[u8; KX_PUBLIC_KEY_LENGTH],
    client_secret_key: &[u8; KX_SECRET_KEY_LENGTH],
    server_public_key: &[u8; KX_PUBLIC_KEY_LENGTH],
) -> PakeResult<SessionKeys> {
    let mut shared_rx = [0u8; SESSION_KEY_LENGTH];
    let mut shared_tx = [0u8; SESSION_KEY_LENGTH];
    // SAFETY: All arrays are 32 bytes as required. Return code is checked.
    unsafe {
        if libsodium_sys::crypto_kx_client_session_keys(
            shared_rx.as_mut_ptr(),
            shared_tx.as_mut_ptr(),
            client_public_key.as_ptr(),
            client_secret_key.as_ptr(),
            server_public_key.as_ptr(),
        ) != 0
        {
            return Err(PakeError::CryptoError);
        }
    }
    Ok(SessionKeys {
        shared_tx,
        shared_rx,
    })
}

/// Derives directional session keys in the server role.
///
/// # Errors
///
/// Returns [`PakeError::CryptoError`] if the peer public key is unacceptable.
pub fn kx_server_session_keys(
    server_public_key: &[u8; KX_PUBLIC_KEY_LENGTH],
    server_secret_key: &[u8; KX_SECRET_KEY_LENGTH],
    client_public_key: &[u8; KX_PUBLIC_KEY_LENGTH],
) -> PakeResult<SessionKeys> {
    let mut shared_rx = [0u8; SESSION_KEY_LENGTH];
    let mut shared_tx = [0u8; SESSION_KEY_LENGTH];
    // SAFETY: All arrays are 32 bytes as required. Return code is checked.
    unsafe {
        if libsodium_sys::crypto_kx_server_session_keys(
            shared_rx.as_mut_ptr(),
            shared_tx.as_mut_ptr(),
            server_public_key.as_ptr(),
            server_secret_key.as_ptr(),
            client_public_key.as_ptr(),
        ) != 0
        {
            return Err(PakeError::CryptoError);
        }
    }
    Ok(SessionKeys {
        shared_tx,
        shared_rx,
    })
}
