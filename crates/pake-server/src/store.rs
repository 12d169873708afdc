// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — PAKE Credential Service
// Licensed under the MIT License

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use pake_core::types::{PakeError, PakeResult, SessionToken};
use parking_lot::RwLock;

use crate::state::{CredentialRecord, SessionRecord};

/// Keyed storage for credential records.
///
/// `insert_if_absent` must be atomic per username: concurrent
/// registration-start calls for the same name race on "check absence, then
/// insert", and exactly one may win.
pub trait CredentialStore: Send + Sync {
    /// Looks up the record for `username`.
    fn get(&self, username: &str) -> Option<CredentialRecord>;

    /// Inserts a record only if no record exists for `username`.
    ///
    /// # Errors
    ///
    /// Returns [`PakeError::AlreadyRegistered`] if a record exists; the
    /// existing record is left untouched.
    fn insert_if_absent(&self, username: &str, record: CredentialRecord) -> PakeResult<()>;

    /// Replaces the record for an existing `username`.
    ///
    /// # Errors
    ///
    /// Returns [`PakeError::UserNotFound`] if no record exists.
    fn set(&self, username: &str, record: CredentialRecord) -> PakeResult<()>;
}

/// Keyed storage for issued sessions.
pub trait SessionStore: Send + Sync {
    /// Stores a session under its bearer token.
    fn insert(&self, token: SessionToken, record: SessionRecord);

    /// Looks up the session for `token`. Read-only; may be served concurrently.
    fn get(&self, token: &SessionToken) -> Option<SessionRecord>;

    /// Removes the session for `token`, revoking it.
    fn remove(&self, token: &SessionToken) -> Option<SessionRecord>;
}

/// In-memory credential store backed by a read-write-locked map.
#[derive(Default)]
pub struct MemoryCredentialStore {
    records: RwLock<BTreeMap<String, CredentialRecord>>,
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, username: &str) -> Option<CredentialRecord> {
        self.records.read().get(username).cloned()
    }

    fn insert_if_absent(&self, username: &str, record: CredentialRecord) -> PakeResult<()> {
        match self.records.write().entry(username.to_owned()) {
            Entry::Occupied(_) => Err(PakeError::AlreadyRegistered),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            }
        }
    }

    fn set(&self, username: &str, record: CredentialRecord) -> PakeResult<()> {
        match self.records.write().get_mut(username) {
            Some(existing) => {
                *existing = record;
                Ok(())
            }
            None => Err(PakeError::UserNotFound),
        }
    }
}

/// In-memory session store backed by a read-write-locked map.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<BTreeMap<SessionToken, SessionRecord>>,
}

impl SessionStore for MemorySessionStore {
    fn insert(&self, token: SessionToken, record: SessionRecord) {
        self.sessions.write().insert(token, record);
    }

    fn get(&self, token: &SessionToken) -> Option<SessionRecord> {
        self.sessions.read().get(token).cloned()
    }

    fn remove(&self, token: &SessionToken) -> Option<SessionRecord> {
        self.sessions.write().remove(token)
    }
}
