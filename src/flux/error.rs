use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by the Flux probes.
#[derive(Error, Debug)]
pub enum FluxError {
    #[error("invalid target url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The request could not be built, e.g. the target scheme is not HTTP(S).
    #[error("failed to build request: {0}")]
    Request(#[source] reqwest::Error),

    #[error(transparent)]
    Transport(reqwest::Error),

    /// `/ping` answered with something other than 204. Displays as the raw body.
    #[error("{body}")]
    Unhealthy { status: StatusCode, body: String },

    #[error("upstream timed out")]
    UpstreamTimeout,

    #[error("ping task ended without reporting a result")]
    CheckAborted,
}

impl FluxError {
    pub fn is_upstream_timeout(&self) -> bool {
        matches!(self, FluxError::UpstreamTimeout)
    }
}

impl From<reqwest::Error> for FluxError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            FluxError::Request(err)
        } else {
            FluxError::Transport(err)
        }
    }
}
