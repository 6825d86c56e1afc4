//! Per-request credentials for the upstream API
//!
//! A `Session` is built from the caller's headers, handed to every upstream
//! call for that request and dropped afterwards. Nothing is shared between
//! requests.

use secrecy::{ExposeSecret, Secret, SecretString};
use tokio::sync::Mutex;

struct Tokens {
    access: SecretString,
    refresh: Option<SecretString>,
    /// Bumped on every successful refresh
    generation: u64,
}

/// Token pair rotated during a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotatedTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// Bearer credentials for one gateway request
pub struct Session {
    tokens: Mutex<Tokens>,
}

impl Session {
    pub fn new(access_token: impl Into<String>, refresh_token: Option<String>) -> Self {
        Self {
            tokens: Mutex::new(Tokens {
                access: Secret::new(access_token.into()),
                refresh: refresh_token.map(Secret::new),
                generation: 0,
            }),
        }
    }

    /// Current access token and the generation it belongs to
    pub(crate) async fn access(&self) -> (String, u64) {
        let tokens = self.tokens.lock().await;
        (tokens.access.expose_secret().clone(), tokens.generation)
    }

    /// Replace the tokens after a refresh, unless someone else already did
    ///
    /// Runs `refresh` with the refresh token while holding the lock, so
    /// concurrent callers that saw the same stale `generation` refresh once.
    /// Returns `Ok(false)` when no refresh token is available or `refresh`
    /// declined.
    pub(crate) async fn refresh_with<F, Fut, E>(&self, seen_generation: u64, refresh: F) -> Result<bool, E>
    where
        F: FnOnce(String) -> Fut,
        Fut: std::future::Future<Output = Result<Option<RotatedTokens>, E>>,
    {
        let mut tokens = self.tokens.lock().await;
        if tokens.generation != seen_generation {
            return Ok(true);
        }
        let Some(refresh_token) = tokens.refresh.as_ref().map(|t| t.expose_secret().clone()) else {
            return Ok(false);
        };

        match refresh(refresh_token).await? {
            Some(rotated) => {
                tokens.access = Secret::new(rotated.access_token);
                tokens.refresh = Some(Secret::new(rotated.refresh_token));
                tokens.generation += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Tokens issued during this session, if a refresh happened
    pub async fn rotated(&self) -> Option<RotatedTokens> {
        let tokens = self.tokens.lock().await;
        if tokens.generation == 0 {
            return None;
        }
        let refresh = tokens.refresh.as_ref()?;
        Some(RotatedTokens {
            access_token: tokens.access.expose_secret().clone(),
            refresh_token: refresh.expose_secret().clone(),
        })
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}
