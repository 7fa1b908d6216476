//! Session resolution: maps a presented token to the company it belongs to.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{header, HeaderMap};
use newsdash_core::{CompanyId, SessionsFile};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use thiserror::Error;

/// Cookie carrying the session token when no bearer header is sent.
pub const SESSION_COOKIE: &str = "newsdash_session";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("missing session token")]
    Missing,

    #[error("unknown or expired session token")]
    Invalid,
}

/// Resolves the authenticated company for a request.
#[async_trait]
pub trait SessionResolver: Send + Sync {
    async fn resolve(&self, headers: &HeaderMap) -> Result<CompanyId, SessionError>;
}

#[derive(Debug, Clone)]
struct RegisteredSession {
    token_sha256: String,
    company_id: CompanyId,
}

/// Static token registry loaded from the sessions file.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<Vec<RegisteredSession>>,
}

impl SessionRegistry {
    #[must_use]
    pub fn from_file(file: &SessionsFile) -> Self {
        let sessions = file
            .sessions
            .iter()
            .map(|entry| RegisteredSession {
                token_sha256: entry.token_sha256.clone(),
                company_id: CompanyId::new(entry.company_id.trim()),
            })
            .collect();
        Self {
            sessions: Arc::new(sessions),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Looks a raw token up by digest. Every entry is compared so the time
    /// taken does not depend on which one matches.
    fn lookup(&self, token: &str) -> Option<CompanyId> {
        let digest = format!("{:x}", Sha256::digest(token.as_bytes()));
        let mut found = None;
        for session in self.sessions.iter() {
            if bool::from(session.token_sha256.as_bytes().ct_eq(digest.as_bytes())) {
                found = Some(session.company_id.clone());
            }
        }
        found
    }
}

#[async_trait]
impl SessionResolver for SessionRegistry {
    async fn resolve(&self, headers: &HeaderMap) -> Result<CompanyId, SessionError> {
        let token = extract_token(headers).ok_or(SessionError::Missing)?;
        self.lookup(token).ok_or(SessionError::Invalid)
    }
}

/// Bearer header first, then the session cookie.
fn extract_token(headers: &HeaderMap) -> Option<&str> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|s| !s.is_empty());

    bearer.or_else(|| {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == SESSION_COOKIE)
            .map(|(_, value)| value.trim())
            .filter(|s| !s.is_empty())
    })
}
