//! # ModKit
//!
//! Shared building blocks for the booking modules:
//!
//! - [`api::problem`]: RFC 9457 problem responses for axum handlers
//! - [`security`]: per-request caller identity (`SecurityCtx`) extracted from
//!   gateway headers

pub mod api;
pub mod security;

pub use api::problem::{Problem, ProblemResponse};
pub use security::{RoleSet, SecurityCtx};
