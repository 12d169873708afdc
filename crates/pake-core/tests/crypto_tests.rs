use pake_core::crypto;
use pake_core::types::*;

#[test]
fn init_succeeds() {
    crypto::init().unwrap();
}

#[test]
fn random_bytes_fills_buffer() {
    let mut buf = [0u8; 64];
    crypto::random_bytes(&mut buf).unwrap();
    assert!(!buf.iter().all(|&b| b == 0));
}

#[test]
fn random_bytes_empty_fails() {
    let mut buf = [];
    assert!(crypto::random_bytes(&mut buf).is_err());
}

#[test]
fn random_scalar_nonzero_and_distinct() {
    let a = crypto::random_scalar().unwrap();
    let b = crypto::random_scalar().unwrap();
    assert!(!a.iter().all(|&x| x == 0));
    assert_ne!(a, b);
}

#[test]
fn point_from_uniform_is_valid_and_deterministic() {
    let digest = crypto::hash(b"some password").unwrap();
    let p1 = crypto::point_from_uniform(&digest).unwrap();
    let p2 = crypto::point_from_uniform(&digest).unwrap();
    assert_eq!(p1, p2);
    crypto::validate_point(&p1).unwrap();
}

#[test]
fn validate_point_rejects_zero() {
    let zero = [0u8; POINT_LENGTH];
    assert_eq!(
        crypto::validate_point(&zero),
        Err(PakeError::InvalidPublicKey)
    );
}

#[test]
fn validate_point_rejects_garbage() {
    let garbage = [0xFF; POINT_LENGTH];
    assert!(crypto::validate_point(&garbage).is_err());
}

#[test]
fn validate_point_rejects_wrong_length() {
    let short = [1u8; 16];
    assert!(crypto::validate_point(&short).is_err());
}

#[test]
fn scalar_mult_base_noclamp_matches_manual_blinding_cancellation() {
    // Full blinding round trip at the primitive level: the unblinded value
    // must equal k·P for the server's clamped secret k.
    let digest = crypto::hash(b"correct horse battery staple").unwrap();
    let password_point = crypto::point_from_uniform(&digest).unwrap();

    let r = crypto::random_scalar().unwrap();
    let blinding_point = crypto::scalar_mult_base_noclamp(&r).unwrap();
    let challenge = crypto::point_add(&password_point, &blinding_point).unwrap();

    let mut k = [0u8; SCALAR_LENGTH];
    crypto::random_bytes(&mut k).unwrap();
    let opaque_public_key = crypto::scalar_mult_base(&k).unwrap();
    let response = crypto::scalar_mult(&k, &challenge).unwrap();

    let negated = crypto::scalar_negate(&r);
    let cancellation = crypto::scalar_mult_noclamp(&negated, &opaque_public_key).unwrap();
    let unblinded = crypto::point_add(&response, &cancellation).unwrap();

    let expected = crypto::scalar_mult(&k, &password_point).unwrap();
    assert_eq!(unblinded, expected);
}

#[test]
fn scalar_negate_round_trips_through_addition() {
    let r = crypto::random_scalar().unwrap();
    let point = crypto::scalar_mult_base_noclamp(&r).unwrap();
    let negated = crypto::scalar_negate(&r);
    let negated_point = crypto::scalar_mult_base_noclamp(&negated).unwrap();
    // P + (-P) is the identity, which ed25519_add encodes but scalar_mult
    // would reject; adding a third point instead keeps everything on the
    // valid-path API.
    let other = crypto::random_scalar().unwrap();
    let other_point = crypto::scalar_mult_base_noclamp(&other).unwrap();
    let sum = crypto::point_add(&point, &other_point).unwrap();
    let back = crypto::point_add(&sum, &negated_point).unwrap();
    assert_eq!(back, other_point);
}

#[test]
fn hash_is_deterministic() {
    let a = crypto::hash(b"input").unwrap();
    let b = crypto::hash(b"input").unwrap();
    assert_eq!(a, b);
    assert_ne!(a, crypto::hash(b"other").unwrap());
}

#[test]
fn hash_empty_fails() {
    assert!(crypto::hash(b"").is_err());
}

#[test]
fn combined_hash_binds_all_parts_in_order() {
    let abc = crypto::combined_hash(&[b"a", b"b", b"c"]).unwrap();
    let acb = crypto::combined_hash(&[b"a", b"c", b"b"]).unwrap();
    let ab = crypto::combined_hash(&[b"a", b"b"]).unwrap();
    assert_ne!(abc, acb);
    assert_ne!(abc, ab);

    let again = crypto::combined_hash(&[b"a", b"b", b"c"]).unwrap();
    assert_eq!(abc, again);
}

#[test]
fn combined_hash_no_parts_fails() {
    assert!(crypto::combined_hash(&[]).is_err());
}

#[test]
fn password_kdf_is_deterministic_and_input_sensitive() {
    let key1 = crypto::password_kdf(b"randomized password bytes").unwrap();
    let key2 = crypto::password_kdf(b"randomized password bytes").unwrap();
    let key3 = crypto::password_kdf(b"different bytes").unwrap();
    assert_eq!(key1, key2);
    assert_ne!(key1, key3);
}

#[test]
fn aead_round_trip() {
    let mut key = [0u8; SYMMETRIC_KEY_LENGTH];
    crypto::random_bytes(&mut key).unwrap();
    let mut nonce = [0u8; NONCE_LENGTH];
    crypto::random_bytes(&mut nonce).unwrap();

    let ciphertext = crypto::aead_encrypt(&key, &nonce, b"attack at dawn").unwrap();
    assert_eq!(ciphertext.len(), b"attack at dawn".len() + AEAD_TAG_LENGTH);

    let plaintext = crypto::aead_decrypt(&key, &nonce, &ciphertext).unwrap();
    assert_eq!(plaintext, b"attack at dawn");
}

#[test]
fn aead_decrypt_rejects_tampered_ciphertext() {
    let key = [1u8; SYMMETRIC_KEY_LENGTH];
    let nonce = [2u8; NONCE_LENGTH];
    let mut ciphertext = crypto::aead_encrypt(&key, &nonce, b"payload").unwrap();
    ciphertext[0] ^= 0x01;
    assert_eq!(
        crypto::aead_decrypt(&key, &nonce, &ciphertext),
        Err(PakeError::AuthenticationFailure)
    );
}

#[test]
fn aead_decrypt_rejects_wrong_key_and_nonce() {
    let key = [1u8; SYMMETRIC_KEY_LENGTH];
    let nonce = [2u8; NONCE_LENGTH];
    let ciphertext = crypto::aead_encrypt(&key, &nonce, b"payload").unwrap();

    let wrong_key = [3u8; SYMMETRIC_KEY_LENGTH];
    assert_eq!(
        crypto::aead_decrypt(&wrong_key, &nonce, &ciphertext),
        Err(PakeError::AuthenticationFailure)
    );

    let wrong_nonce = [4u8; NONCE_LENGTH];
    assert_eq!(
        crypto::aead_decrypt(&key, &wrong_nonce, &ciphertext),
        Err(PakeError::AuthenticationFailure)
    );
}

#[test]
fn aead_decrypt_rejects_truncated_input() {
    let key = [1u8; SYMMETRIC_KEY_LENGTH];
    let nonce = [2u8; NONCE_LENGTH];
    assert_eq!(
        crypto::aead_decrypt(&key, &nonce, &[0u8; AEAD_TAG_LENGTH]),
        Err(PakeError::InvalidInput)
    );
}

#[test]
fn kx_keypair_is_consistent() {
    let keypair = crypto::kx_keypair().unwrap();
    let derived = crypto::kx_public_from_secret(&keypair.secret_key).unwrap();
    assert_eq!(keypair.public_key, derived);
}

#[test]
fn kx_session_keys_swap_directions() {
    let client = crypto::kx_keypair().unwrap();
    let server = crypto::kx_keypair().unwrap();

    let client_keys = crypto::kx_client_session_keys(
        &client.public_key,
        &client.secret_key,
        &server.public_key,
    )
    .unwrap();
    let server_keys = crypto::kx_server_session_keys(
        &server.public_key,
        &server.secret_key,
        &client.public_key,
    )
    .unwrap();

    assert_eq!(client_keys.shared_tx, server_keys.shared_rx);
    assert_eq!(client_keys.shared_rx, server_keys.shared_tx);
    assert_ne!(client_keys.shared_tx, client_keys.shared_rx);
}

#[test]
fn constant_time_eq_behaves() {
    assert!(constant_time_eq(b"same", b"same"));
    assert!(!constant_time_eq(b"same", b"diff"));
    assert!(!constant_time_eq(b"short", b"longer"));
}
