// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — PAKE Credential Service
// Licensed under the MIT License

//! Wire-format serialization and parsing for the registration and login
//! round trips.
//!
//! Usernames travel length-prefixed (one byte, 1..=255, UTF-8); every other
//! field is fixed-length. The password, the blinding scalar, the per-user
//! OPRF secret, the client secret key, and session keys have no wire
//! representation at all.

use crate::message::EncryptedMessage;
use crate::types::{
    ChallengeResponse, Lockbox, PakeError, PakeResult, SessionToken, AEAD_TAG_LENGTH,
    CHALLENGE_RESPONSE_LENGTH, KX_PUBLIC_KEY_LENGTH, LOCKBOX_CIPHERTEXT_LENGTH,
    LOGIN_RESPONSE_LENGTH, MAX_USERNAME_LENGTH, NONCE_LENGTH, POINT_LENGTH,
    SESSION_TOKEN_LENGTH,
};

const RESPONSE_OPAQUE_RESPONSE_OFFSET: usize = 0;
const RESPONSE_OPAQUE_KEY_OFFSET: usize = POINT_LENGTH;
const RESPONSE_SERVER_KEY_OFFSET: usize = POINT_LENGTH + POINT_LENGTH;

const LOGIN_RESPONSE_NONCE_OFFSET: usize = CHALLENGE_RESPONSE_LENGTH;
const LOGIN_RESPONSE_LOCKBOX_OFFSET: usize = LOGIN_RESPONSE_NONCE_OFFSET + NONCE_LENGTH;
const LOGIN_RESPONSE_TOKEN_OFFSET: usize =
    LOGIN_RESPONSE_LOCKBOX_OFFSET + LOCKBOX_CIPHERTEXT_LENGTH;

/// Borrowed view of a parsed registration start request.
pub struct RegistrationStartRequestRef<'a> {
    pub username: &'a str,
    pub client_public_key: &'a [u8; KX_PUBLIC_KEY_LENGTH],
    pub opaque_challenge: &'a [u8; POINT_LENGTH],
}

/// Borrowed view of a parsed registration finish request.
pub struct RegistrationFinishRequestRef<'a> {
    pub username: &'a str,
    pub lockbox_nonce: &'a [u8; NONCE_LENGTH],
    pub lockbox: &'a [u8; LOCKBOX_CIPHERTEXT_LENGTH],
}

/// Borrowed view of a parsed login start request.
pub struct LoginStartRequestRef<'a> {
    pub username: &'a str,
    pub opaque_challenge: &'a [u8; POINT_LENGTH],
}

/// Owned contents of a parsed login start response.
pub struct LoginStartResponse {
    pub challenge_response: ChallengeResponse,
    pub lockbox: Lockbox,
    pub session_token: SessionToken,
}

/// Borrowed view of a parsed authenticated message.
pub struct AuthenticatedMessageRef<'a> {
    pub nonce: &'a [u8; NONCE_LENGTH],
    pub ciphertext: &'a [u8],
}

fn write_username(out: &mut Vec<u8>, username: &str) -> PakeResult<()> {
    let bytes = username.as_bytes();
    if bytes.is_empty() || bytes.len() > MAX_USERNAME_LENGTH {
        return Err(PakeError::InvalidInput);
    }
    out.push(bytes.len() as u8);
    out.extend_from_slice(bytes);
    Ok(())
}

fn split_username(data: &[u8]) -> PakeResult<(&str, &[u8])> {
    let (&len, rest) = data
        .split_first()
        .ok_or(PakeError::InvalidProtocolMessage)?;
    let len = len as usize;
    if len == 0 || rest.len() < len {
        return Err(PakeError::InvalidProtocolMessage);
    }
    let (name_bytes, rest) = rest.split_at(len);
    let username =
        std::str::from_utf8(name_bytes).map_err(|_| PakeError::InvalidProtocolMessage)?;
    Ok((username, rest))
}

fn fixed<const N: usize>(data: &[u8]) -> PakeResult<&[u8; N]> {
    data.try_into().map_err(|_| PakeError::InvalidProtocolMessage)
}

/// Serializes a registration start request.
///
/// # Errors
///
/// Returns [`PakeError::InvalidInput`] if the username is empty or longer
/// than [`MAX_USERNAME_LENGTH`] bytes.
pub fn write_registration_start_request(
    username: &str,
    client_public_key: &[u8; KX_PUBLIC_KEY_LENGTH],
    opaque_challenge: &[u8; POINT_LENGTH],
) -> PakeResult<Vec<u8>> {
    let mut out = Vec::with_capacity(1 + username.len() + KX_PUBLIC_KEY_LENGTH + POINT_LENGTH);
    write_username(&mut out, username)?;
    out.extend_from_slice(client_public_key);
    out.extend_from_slice(opaque_challenge);
    Ok(out)
}

/// Parses a registration start request.
///
/// # Errors
///
/// Returns [`PakeError::InvalidProtocolMessage`] on any length or encoding
/// mismatch.
pub fn parse_registration_start_request(
    data: &[u8],
) -> PakeResult<RegistrationStartRequestRef<'_>> {
    let (username, rest) = split_username(data)?;
    if rest.len() != KX_PUBLIC_KEY_LENGTH + POINT_LENGTH {
        return Err(PakeError::InvalidProtocolMessage);
    }
    let (key, challenge) = rest.split_at(KX_PUBLIC_KEY_LENGTH);
    Ok(RegistrationStartRequestRef {
        username,
        client_public_key: fixed(key)?,
        opaque_challenge: fixed(challenge)?,
    })
}

/// Serializes a challenge response (registration start response).
pub fn write_challenge_response(
    response: &ChallengeResponse,
) -> [u8; CHALLENGE_RESPONSE_LENGTH] {
    let mut out = [0u8; CHALLENGE_RESPONSE_LENGTH];
    out[RESPONSE_OPAQUE_RESPONSE_OFFSET..RESPONSE_OPAQUE_KEY_OFFSET]
        .copy_from_slice(&response.opaque_response);
    out[RESPONSE_OPAQUE_KEY_OFFSET..RESPONSE_SERVER_KEY_OFFSET]
        .copy_from_slice(&response.opaque_public_key);
    out[RESPONSE_SERVER_KEY_OFFSET..].copy_from_slice(&response.server_public_key);
    out
}

/// Parses a challenge response.
///
/// # Errors
///
/// Returns [`PakeError::InvalidProtocolMessage`] if `data` is not exactly
/// [`CHALLENGE_RESPONSE_LENGTH`] bytes.
pub fn parse_challenge_response(data: &[u8]) -> PakeResult<ChallengeResponse> {
    if data.len() != CHALLENGE_RESPONSE_LENGTH {
        return Err(PakeError::InvalidProtocolMessage);
    }
    let mut response = ChallengeResponse {
        opaque_response: [0u8; POINT_LENGTH],
        opaque_public_key: [0u8; POINT_LENGTH],
        server_public_key: [0u8; KX_PUBLIC_KEY_LENGTH],
    };
    response
        .opaque_response
        .copy_from_slice(&data[RESPONSE_OPAQUE_RESPONSE_OFFSET..RESPONSE_OPAQUE_KEY_OFFSET]);
    response
        .opaque_public_key
        .copy_from_slice(&data[RESPONSE_OPAQUE_KEY_OFFSET..RESPONSE_SERVER_KEY_OFFSET]);
    response
        .server_public_key
        .copy_from_slice(&data[RESPONSE_SERVER_KEY_OFFSET..]);
    Ok(response)
}

/// Serializes a registration finish request.
///
/// # Errors
///
/// Returns [`PakeError::InvalidInput`] if the username is empty or too long.
pub fn write_registration_finish_request(
    username: &str,
    lockbox: &Lockbox,
) -> PakeResult<Vec<u8>> {
    let mut out =
        Vec::with_capacity(1 + username.len() + NONCE_LENGTH + LOCKBOX_CIPHERTEXT_LENGTH);
    write_username(&mut out, username)?;
    out.extend_from_slice(&lockbox.nonce);
    out.extend_from_slice(&lockbox.ciphertext);
    Ok(out)
}

/// Parses a registration finish request.
///
/// # Errors
///
/// Returns [`PakeError::InvalidProtocolMessage`] on any length or encoding
/// mismatch.
pub fn parse_registration_finish_request(
    data: &[u8],
) -> PakeResult<RegistrationFinishRequestRef<'_>> {
    let (username, rest) = split_username(data)?;
    if rest.len() != NONCE_LENGTH + LOCKBOX_CIPHERTEXT_LENGTH {
        return Err(PakeError::InvalidProtocolMessage);
    }
    let (nonce, ciphertext) = rest.split_at(NONCE_LENGTH);
    Ok(RegistrationFinishRequestRef {
        username,
        lockbox_nonce: fixed(nonce)?,
        lockbox: fixed(ciphertext)?,
    })
}

/// Serializes a login start request.
///
/// # Errors
///
/// Returns [`PakeError::InvalidInput`] if the username is empty or too long.
pub fn write_login_start_request(
    username: &str,
    opaque_challenge: &[u8; POINT_LENGTH],
) -> PakeResult<Vec<u8>> {
    let mut out = Vec::with_capacity(1 + username.len() + POINT_LENGTH);
    write_username(&mut out, username)?;
    out.extend_from_slice(opaque_challenge);
    Ok(out)
}

/// Parses a login start request.
///
/// # Errors
///
/// Returns [`PakeError::InvalidProtocolMessage`] on any length or encoding
/// mismatch.
pub fn parse_login_start_request(data: &[u8]) -> PakeResult<LoginStartRequestRef<'_>> {
    let (username, rest) = split_username(data)?;
    if rest.len() != POINT_LENGTH {
        return Err(PakeError::InvalidProtocolMessage);
    }
    Ok(LoginStartRequestRef {
        username,
        opaque_challenge: fixed(rest)?,
    })
}

/// Serializes a login start response.
pub fn write_login_start_response(
    challenge_response: &ChallengeResponse,
    lockbox: &Lockbox,
    session_token: &SessionToken,
) -> [u8; LOGIN_RESPONSE_LENGTH] {
    let mut out = [0u8; LOGIN_RESPONSE_LENGTH];
    out[..CHALLENGE_RESPONSE_LENGTH].copy_from_slice(&write_challenge_response(challenge_response));
    out[LOGIN_RESPONSE_NONCE_OFFSET..LOGIN_RESPONSE_LOCKBOX_OFFSET]
        .copy_from_slice(&lockbox.nonce);
    out[LOGIN_RESPONSE_LOCKBOX_OFFSET..LOGIN_RESPONSE_TOKEN_OFFSET]
        .copy_from_slice(&lockbox.ciphertext);
    out[LOGIN_RESPONSE_TOKEN_OFFSET..].copy_from_slice(session_token.as_bytes());
    out
}

/// Parses a login start response.
///
/// # Errors
///
/// Returns [`PakeError::InvalidProtocolMessage`] if `data` is not exactly
/// [`LOGIN_RESPONSE_LENGTH`] bytes.
pub fn parse_login_start_response(data: &[u8]) -> PakeResult<LoginStartResponse> {
    if data.len() != LOGIN_RESPONSE_LENGTH {
        return Err(PakeError::InvalidProtocolMessage);
    }
    let challenge_response = parse_challenge_response(&data[..CHALLENGE_RESPONSE_LENGTH])?;

    let mut lockbox = Lockbox {
        ciphertext: [0u8; LOCKBOX_CIPHERTEXT_LENGTH],
        nonce: [0u8; NONCE_LENGTH],
    };
    lockbox
        .nonce
        .copy_from_slice(&data[LOGIN_RESPONSE_NONCE_OFFSET..LOGIN_RESPONSE_LOCKBOX_OFFSET]);
    lockbox
        .ciphertext
        .copy_from_slice(&data[LOGIN_RESPONSE_LOCKBOX_OFFSET..LOGIN_RESPONSE_TOKEN_OFFSET]);

    let mut token = [0u8; SESSION_TOKEN_LENGTH];
    token.copy_from_slice(&data[LOGIN_RESPONSE_TOKEN_OFFSET..]);

    Ok(LoginStartResponse {
        challenge_response,
        lockbox,
        session_token: SessionToken(token),
    })
}

/// Serializes an authenticated message (`nonce || ciphertext`). The session
/// token travels out-of-band as a bearer credential.
pub fn write_authenticated_message(message: &EncryptedMessage) -> Vec<u8> {
    let mut out = Vec::with_capacity(NONCE_LENGTH + message.ciphertext.len());
    out.extend_from_slice(&message.nonce);
    out.extend_from_slice(&message.ciphertext);
    out
}

/// Parses an authenticated message.
///
/// # Errors
///
/// Returns [`PakeError::InvalidProtocolMessage`] if `data` is too short to
/// hold a nonce and a tagged ciphertext.
pub fn parse_authenticated_message(data: &[u8]) -> PakeResult<AuthenticatedMessageRef<'_>> {
    if data.len() <= NONCE_LENGTH + AEAD_TAG_LENGTH {
        return Err(PakeError::InvalidProtocolMessage);
    }
    let (nonce, ciphertext) = data.split_at(NONCE_LENGTH);
    Ok(AuthenticatedMessageRef {
        nonce: fixed(nonce)?,
        ciphertext,
    })
}
