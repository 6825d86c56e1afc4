//! Upstream tracking API
//!
//! Stores the logs and runs the recovery model; this gateway only reads.

mod client;
mod error;
mod session;

pub use client::{UpstreamClient, UserProfile};
pub use error::UpstreamError;
pub use session::{RotatedTokens, Session};
