//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! # Design Principles
//!
//! 1. **Build expensive resources once**: the HTTP client and its connection
//!    pool are created at startup
//! 2. **Cheap cloning**: All fields use Arc or are already Clone-cheap
//! 3. **Immutable after creation**: State is read-only during request handling

use crate::config::AppConfig;
use crate::upstream::{UpstreamClient, UpstreamError};
use std::sync::Arc;

/// Shared application state
///
/// Holds no per-user data; credentials travel with each request.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Upstream tracking API client (internally Arc'd)
    pub upstream: UpstreamClient,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: AppConfig) -> Result<Self, UpstreamError> {
        let upstream = UpstreamClient::new(&config.upstream)?;
        Ok(Self {
            config: Arc::new(config),
            upstream,
        })
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a reference to the upstream client
    #[inline]
    pub fn upstream(&self) -> &UpstreamClient {
        &self.upstream
    }
}
