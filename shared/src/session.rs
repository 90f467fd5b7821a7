//! Proxy session records and the newest-first list that holds them.

use serde::{Deserialize, Serialize};

use crate::api::{ApiClientConfig, CreateSessionResponse};

/// A created proxy session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque token issued by the API
    pub token: String,
    /// Shareable proxy URL derived from the token
    pub url: String,
    /// Hostname as submitted
    pub name: String,
    /// IP as submitted; empty when none was given
    pub ip: String,
}

impl Session {
    pub fn from_response(
        response: &CreateSessionResponse,
        hostname: &str,
        ip: &str,
        config: &ApiClientConfig,
    ) -> Self {
        Self {
            token: response.token.clone(),
            url: config.proxy_url(&response.token),
            name: hostname.to_string(),
            ip: ip.to_string(),
        }
    }

    /// IP for display, falling back to "No IP"
    pub fn ip_label(&self) -> &str {
        if self.ip.is_empty() {
            "No IP"
        } else {
            &self.ip
        }
    }
}

/// Sessions created during this page lifetime, newest first.
///
/// The only mutation is [`SessionList::prepend`]; entries are never
/// reordered, replaced or deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionList {
    sessions: Vec<Session>,
}

impl SessionList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prepend(&mut self, session: Session) {
        self.sessions.insert(0, session);
    }

    pub fn first(&self) -> Option<&Session> {
        self.sessions.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Session> {
        self.sessions.iter()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn as_slice(&self) -> &[Session] {
        &self.sessions
    }
}

impl<'a> IntoIterator for &'a SessionList {
    type Item = &'a Session;
    type IntoIter = std::slice::Iter<'a, Session>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
