use thiserror::Error;

/// Failure talking to the upstream tracking API
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Credentials rejected and no refresh could fix them
    #[error("Upstream rejected the credentials")]
    Unauthorized,

    #[error("Upstream returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Upstream request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Upstream response could not be decoded: {0}")]
    Decode(#[source] reqwest::Error),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            UpstreamError::Decode(err)
        } else {
            UpstreamError::Transport(err)
        }
    }
}
