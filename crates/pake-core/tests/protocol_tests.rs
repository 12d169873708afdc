use pake_core::message::EncryptedMessage;
use pake_core::protocol;
use pake_core::types::*;

fn sample_lockbox() -> Lockbox {
    Lockbox {
        ciphertext: [7u8; LOCKBOX_CIPHERTEXT_LENGTH],
        nonce: [9u8; NONCE_LENGTH],
    }
}

fn sample_response() -> ChallengeResponse {
    ChallengeResponse {
        opaque_response: [1u8; POINT_LENGTH],
        opaque_public_key: [2u8; POINT_LENGTH],
        server_public_key: [3u8; KX_PUBLIC_KEY_LENGTH],
    }
}

#[test]
fn registration_start_request_round_trip() {
    let data = protocol::write_registration_start_request(
        "a@example.com",
        &[4u8; KX_PUBLIC_KEY_LENGTH],
        &[5u8; POINT_LENGTH],
    )
    .unwrap();

    let parsed = protocol::parse_registration_start_request(&data).unwrap();
    assert_eq!(parsed.username, "a@example.com");
    assert_eq!(parsed.client_public_key, &[4u8; KX_PUBLIC_KEY_LENGTH]);
    assert_eq!(parsed.opaque_challenge, &[5u8; POINT_LENGTH]);
}

#[test]
fn empty_username_rejected_on_write() {
    assert_eq!(
        protocol::write_registration_start_request(
            "",
            &[0u8; KX_PUBLIC_KEY_LENGTH],
            &[0u8; POINT_LENGTH],
        )
        .err(),
        Some(PakeError::InvalidInput)
    );
}

#[test]
fn oversized_username_rejected_on_write() {
    let long = "x".repeat(MAX_USERNAME_LENGTH + 1);
    assert_eq!(
        protocol::write_login_start_request(&long, &[0u8; POINT_LENGTH]).err(),
        Some(PakeError::InvalidInput)
    );
}

#[test]
fn truncated_request_rejected_on_parse() {
    let data = protocol::write_registration_start_request(
        "user",
        &[4u8; KX_PUBLIC_KEY_LENGTH],
        &[5u8; POINT_LENGTH],
    )
    .unwrap();
    assert!(protocol::parse_registration_start_request(&data[..data.len() - 1]).is_err());
    assert!(protocol::parse_registration_start_request(&[]).is_err());
}

#[test]
fn username_with_invalid_utf8_rejected_on_parse() {
    // len=2 prefix followed by invalid UTF-8, padded to the exact layout.
    let mut data = vec![2u8, 0xFF, 0xFE];
    data.extend_from_slice(&[0u8; KX_PUBLIC_KEY_LENGTH + POINT_LENGTH]);
    assert_eq!(
        protocol::parse_registration_start_request(&data).err(),
        Some(PakeError::InvalidProtocolMessage)
    );
}

#[test]
fn challenge_response_round_trip() {
    let response = sample_response();
    let data = protocol::write_challenge_response(&response);
    assert_eq!(data.len(), CHALLENGE_RESPONSE_LENGTH);

    let parsed = protocol::parse_challenge_response(&data).unwrap();
    assert_eq!(parsed.opaque_response, response.opaque_response);
    assert_eq!(parsed.opaque_public_key, response.opaque_public_key);
    assert_eq!(parsed.server_public_key, response.server_public_key);
}

#[test]
fn registration_finish_request_round_trip() {
    let lockbox = sample_lockbox();
    let data = protocol::write_registration_finish_request("bob", &lockbox).unwrap();

    let parsed = protocol::parse_registration_finish_request(&data).unwrap();
    assert_eq!(parsed.username, "bob");
    assert_eq!(parsed.lockbox_nonce, &lockbox.nonce);
    assert_eq!(parsed.lockbox, &lockbox.ciphertext);
}

#[test]
fn login_start_request_round_trip() {
    let data = protocol::write_login_start_request("carol", &[6u8; POINT_LENGTH]).unwrap();
    let parsed = protocol::parse_login_start_request(&data).unwrap();
    assert_eq!(parsed.username, "carol");
    assert_eq!(parsed.opaque_challenge, &[6u8; POINT_LENGTH]);
}

#[test]
fn login_start_response_round_trip() {
    let response = sample_response();
    let lockbox = sample_lockbox();
    let token = SessionToken([8u8; SESSION_TOKEN_LENGTH]);

    let data = protocol::write_login_start_response(&response, &lockbox, &token);
    assert_eq!(data.len(), LOGIN_RESPONSE_LENGTH);

    let parsed = protocol::parse_login_start_response(&data).unwrap();
    assert_eq!(
        parsed.challenge_response.opaque_response,
        response.opaque_response
    );
    assert_eq!(parsed.lockbox.ciphertext, lockbox.ciphertext);
    assert_eq!(parsed.lockbox.nonce, lockbox.nonce);
    assert_eq!(parsed.session_token, token);
}

#[test]
fn login_start_response_wrong_length_rejected() {
    assert!(protocol::parse_login_start_response(&[0u8; LOGIN_RESPONSE_LENGTH - 1]).is_err());
    assert!(protocol::parse_login_start_response(&[0u8; LOGIN_RESPONSE_LENGTH + 1]).is_err());
}

#[test]
fn authenticated_message_round_trip() {
    let message = EncryptedMessage {
        ciphertext: vec![1u8; 40],
        nonce: [2u8; NONCE_LENGTH],
    };
    let data = protocol::write_authenticated_message(&message);

    let parsed = protocol::parse_authenticated_message(&data).unwrap();
    assert_eq!(parsed.nonce, &message.nonce);
    assert_eq!(parsed.ciphertext, message.ciphertext.as_slice());
}

#[test]
fn authenticated_message_too_short_rejected() {
    let data = [0u8; NONCE_LENGTH + AEAD_TAG_LENGTH];
    assert_eq!(
        protocol::parse_authenticated_message(&data).err(),
        Some(PakeError::InvalidProtocolMessage)
    );
}
