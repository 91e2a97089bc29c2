//! Role policy for appointment operations.
//!
//! `authorize` is a pure function of the operation and the caller's roles,
//! so the whole table can be checked without a service or a database.

use std::fmt;

use modkit::RoleSet;

pub const ADMIN_ROLE: &str = "ADMIN";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    List,
    Create,
    Read,
    Update,
    Delete,
    SearchByCustomer,
}

impl OperationKind {
    pub const ALL: [OperationKind; 6] = [
        Self::List,
        Self::Create,
        Self::Read,
        Self::Update,
        Self::Delete,
        Self::SearchByCustomer,
    ];

    /// Role a caller must hold, or `None` for public operations.
    pub const fn required_role(self) -> Option<&'static str> {
        match self {
            Self::List | Self::Update | Self::Delete => Some(ADMIN_ROLE),
            Self::Read | Self::Create | Self::SearchByCustomer => None,
        }
    }

    pub const fn is_mutating(self) -> bool {
        matches!(self, Self::Create | Self::Update | Self::Delete)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::SearchByCustomer => "search_by_customer",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Deny { required: &'static str },
}

impl AccessDecision {
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

pub fn authorize(operation: OperationKind, roles: &RoleSet) -> AccessDecision {
    match operation.required_role() {
        None => AccessDecision::Allow,
        Some(required) if roles.has(required) => AccessDecision::Allow,
        Some(required) => AccessDecision::Deny { required },
    }
}
