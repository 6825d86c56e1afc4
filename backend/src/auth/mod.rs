//! Authentication module
//!
//! Forwards the caller's bearer tokens to the upstream.

mod middleware;

pub use middleware::{AuthSession, ACCESS_TOKEN_HEADER, REFRESH_TOKEN_HEADER};
