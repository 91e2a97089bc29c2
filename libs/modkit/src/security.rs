//! Caller identity carried by inbound requests.
//!
//! The gateway in front of the services authenticates the user and forwards
//! the outcome as two plain headers:
//!
//! - `X-User-Email`: the caller's email (absent for anonymous callers)
//! - `X-User-Roles`: role tokens separated by commas and/or whitespace,
//!   e.g. `ROLE_ADMIN, ROLE_USER`
//!
//! Extraction is total. Missing or garbled metadata yields an anonymous
//! context with no roles, never an error, so read-only endpoints keep working
//! and every role check simply fails.

use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt;

use axum::extract::FromRequestParts;
use axum::http::{request::Parts, HeaderMap, HeaderName};

pub const USER_EMAIL_HEADER: &str = "x-user-email";
pub const USER_ROLES_HEADER: &str = "x-user-roles";

/// Prefix used by Spring-style role names (`ROLE_ADMIN`).
const ROLE_PREFIX: &str = "ROLE_";

/// Set of uppercase role tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSet(BTreeSet<String>);

impl RoleSet {
    /// Parse a raw role string. Never fails: anything unusable is dropped.
    pub fn parse(raw: &str) -> Self {
        Self::from_tokens(raw.split(|c: char| c == ',' || c.is_whitespace()))
    }

    pub fn from_tokens<I, T>(tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        Self(
            tokens
                .into_iter()
                .map(|t| t.as_ref().trim().to_ascii_uppercase())
                .filter(|t| !t.is_empty())
                .collect(),
        )
    }

    /// True if the set grants `role`. Both `ADMIN` and `ROLE_ADMIN` grant "ADMIN".
    pub fn has(&self, role: &str) -> bool {
        let wanted = role.trim().to_ascii_uppercase();
        let bare = wanted.strip_prefix(ROLE_PREFIX).unwrap_or(&wanted);
        if bare.is_empty() {
            return false;
        }
        self.0.contains(bare) || self.0.contains(&format!("{ROLE_PREFIX}{bare}"))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.iter().collect();
        f.write_str(&joined.join(","))
    }
}

/// Per-request caller identity. Built fresh for every request and passed
/// explicitly into service calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecurityCtx {
    email: Option<String>,
    roles: RoleSet,
}

impl SecurityCtx {
    pub fn new(email: Option<String>, roles: RoleSet) -> Self {
        let email = email
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());
        Self { email, roles }
    }

    /// Build from header-like `(key, value)` pairs. Keys compare ASCII
    /// case-insensitively; repeated role keys are merged.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut email = None;
        let mut raw_roles = Vec::new();

        for (key, value) in pairs {
            let key = key.as_ref();
            if key.eq_ignore_ascii_case(USER_EMAIL_HEADER) {
                if email.is_none() {
                    email = Some(value.as_ref().to_string());
                }
            } else if key.eq_ignore_ascii_case(USER_ROLES_HEADER) {
                raw_roles.push(value.as_ref().to_string());
            }
        }

        Self::new(email, RoleSet::parse(&raw_roles.join(",")))
    }

    /// Build from HTTP headers. Values that are not valid UTF-8 are ignored.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let wanted = [
            HeaderName::from_static(USER_EMAIL_HEADER),
            HeaderName::from_static(USER_ROLES_HEADER),
        ];
        Self::from_pairs(wanted.iter().flat_map(|name| {
            headers
                .get_all(name)
                .into_iter()
                .filter_map(|v| v.to_str().ok())
                .map(move |v| (name.as_str(), v))
        }))
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn roles(&self) -> &RoleSet {
        &self.roles
    }
}

impl<S> FromRequestParts<S> for SecurityCtx
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}
