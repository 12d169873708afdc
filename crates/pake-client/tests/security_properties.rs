//! Failure-path and blinding guarantees of the full protocol.

use pake_client::{
    create_challenge, create_registration_envelope, derive_session_keys, randomize_password,
    PakeClient,
};
use pake_core::types::*;
use pake_server::{
    create_registration_challenge_response, get_login_challenge_response,
    update_client_registration_envelope, CredentialServer,
};

fn register(server: &CredentialServer, client: &PakeClient, username: &str, password: &[u8]) {
    let challenge = create_challenge(password).unwrap();
    let response = create_registration_challenge_response(
        server,
        username,
        client.public_key(),
        &challenge.opaque_challenge,
    )
    .unwrap();
    let lockbox = create_registration_envelope(client, password, &challenge, &response).unwrap();
    update_client_registration_envelope(server, username, &lockbox).unwrap();
}

#[test]
fn wrong_password_fails_to_open_the_envelope() {
    let server = CredentialServer::new().unwrap();
    let client = PakeClient::generate().unwrap();
    register(&server, &client, "alice", b"right password");

    let challenge = create_challenge(b"wrong password").unwrap();
    let (response, lockbox) =
        get_login_challenge_response(&server, "alice", &challenge.opaque_challenge).unwrap();

    assert_eq!(
        derive_session_keys(b"wrong password", &challenge, &response, &lockbox).err(),
        Some(PakeError::AuthenticationFailure)
    );
}

#[test]
fn tampered_envelope_fails_even_with_the_right_password() {
    let server = CredentialServer::new().unwrap();
    let client = PakeClient::generate().unwrap();
    register(&server, &client, "alice", b"pw");

    let challenge = create_challenge(b"pw").unwrap();
    let (response, mut lockbox) =
        get_login_challenge_response(&server, "alice", &challenge.opaque_challenge).unwrap();
    lockbox.ciphertext[0] ^= 0x01;

    assert_eq!(
        derive_session_keys(b"pw", &challenge, &response, &lockbox).err(),
        Some(PakeError::AuthenticationFailure)
    );
}

#[test]
fn second_registration_for_the_same_name_is_refused() {
    let server = CredentialServer::new().unwrap();
    let client = PakeClient::generate().unwrap();
    register(&server, &client, "alice", b"pw");

    let challenge = create_challenge(b"other pw").unwrap();
    assert_eq!(
        create_registration_challenge_response(
            &server,
            "alice",
            client.public_key(),
            &challenge.opaque_challenge,
        )
        .err(),
        Some(PakeError::AlreadyRegistered)
    );
}

#[test]
fn login_for_unknown_user_is_indistinguishable_from_pending() {
    let server = CredentialServer::new().unwrap();
    let client = PakeClient::generate().unwrap();

    let challenge = create_challenge(b"pw").unwrap();
    let unknown =
        get_login_challenge_response(&server, "ghost", &challenge.opaque_challenge).err();

    // Start but never finish a registration.
    let pending_challenge = create_challenge(b"pw").unwrap();
    create_registration_challenge_response(
        &server,
        "half",
        client.public_key(),
        &pending_challenge.opaque_challenge,
    )
    .unwrap();
    let pending =
        get_login_challenge_response(&server, "half", &challenge.opaque_challenge).err();

    assert_eq!(unknown, Some(PakeError::Unauthorized));
    assert_eq!(pending, Some(PakeError::Unauthorized));
}

#[test]
fn distinct_challenges_unblind_to_the_same_randomized_password() {
    let server = CredentialServer::new().unwrap();
    let client = PakeClient::generate().unwrap();
    register(&server, &client, "alice", b"pw");

    let c1 = create_challenge(b"pw").unwrap();
    let c2 = create_challenge(b"pw").unwrap();
    // The wire-visible challenges differ every run even for an identical
    // password; the server cannot link them.
    assert_ne!(c1.opaque_challenge, c2.opaque_challenge);

    let (r1, _) = get_login_challenge_response(&server, "alice", &c1.opaque_challenge).unwrap();
    let (r2, _) = get_login_challenge_response(&server, "alice", &c2.opaque_challenge).unwrap();
    assert_ne!(r1.opaque_response, r2.opaque_response);

    // Both runs cancel their blinding term and reach the identical value.
    let p1 = randomize_password(b"pw", &c1, &r1).unwrap();
    let p2 = randomize_password(b"pw", &c2, &r2).unwrap();
    assert_eq!(p1, p2);
}

#[test]
fn randomized_password_differs_across_users() {
    let server = CredentialServer::new().unwrap();
    let alice = PakeClient::generate().unwrap();
    let bob = PakeClient::generate().unwrap();
    register(&server, &alice, "alice", b"same pw");
    register(&server, &bob, "bob", b"same pw");

    // Identical passwords under different per-user secrets randomize to
    // different values, so a stolen store cannot cross-match users.
    let ca = create_challenge(b"same pw").unwrap();
    let cb = create_challenge(b"same pw").unwrap();
    let (ra, _) = get_login_challenge_response(&server, "alice", &ca.opaque_challenge).unwrap();
    let (rb, _) = get_login_challenge_response(&server, "bob", &cb.opaque_challenge).unwrap();

    let pa = randomize_password(b"same pw", &ca, &ra).unwrap();
    let pb = randomize_password(b"same pw", &cb, &rb).unwrap();
    assert_ne!(pa, pb);
}

#[test]
fn randomize_password_rejects_invalid_response_points() {
    let challenge = create_challenge(b"pw").unwrap();
    let response = ChallengeResponse {
        opaque_response: [0u8; POINT_LENGTH],
        opaque_public_key: [0u8; POINT_LENGTH],
        server_public_key: [0u8; KX_PUBLIC_KEY_LENGTH],
    };
    assert_eq!(
        randomize_password(b"pw", &challenge, &response).err(),
        Some(PakeError::InvalidPublicKey)
    );
}

#[test]
fn restored_client_identity_must_be_consistent() {
    let keypair = pake_core::crypto::kx_keypair().unwrap();
    assert!(PakeClient::from_keypair(keypair.clone()).is_ok());

    let mut broken = keypair;
    broken.public_key[0] ^= 0x01;
    assert_eq!(
        PakeClient::from_keypair(broken).err(),
        Some(PakeError::InvalidPublicKey)
    );
}
