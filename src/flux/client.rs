use std::time::Duration;

use reqwest::{Client, StatusCode, header::CONTENT_TYPE};
use tokio::sync::oneshot;
use tokio::time::Sleep;
use tokio_util::sync::CancellationToken;
use url::Url;

use super::error::FluxError;
use crate::config::model::SourceConfig;
use crate::transport::transport_for;

pub const PING_PATH: &str = "/ping";
pub const QUERY_PATH: &str = "/api/v2/query";
pub const DEFAULT_PING_TIMEOUT: Duration = Duration::from_secs(2);

const FLUX_CONTENT_TYPE: &str = "application/json";

/// Client for a Flux query service.
///
/// The target url is never modified; each probe derives its own request url from it,
/// so one client can be probed from several tasks at once.
#[derive(Debug, Clone)]
pub struct FluxClient {
    url: Url,
    insecure_skip_verify: bool,
    timeout: Duration,
}

impl FluxClient {
    pub fn new(url: &str) -> Result<Self, FluxError> {
        Ok(Self {
            url: Url::parse(url)?,
            insecure_skip_verify: false,
            timeout: Duration::ZERO,
        })
    }

    pub fn from_config(source: &SourceConfig) -> Result<Self, FluxError> {
        Ok(Self::new(&source.url)?
            .with_insecure_skip_verify(source.insecure_skip_verify)
            .with_timeout(Duration::from_millis(source.timeout_ms)))
    }

    pub fn with_insecure_skip_verify(mut self, insecure_skip_verify: bool) -> Self {
        self.insecure_skip_verify = insecure_skip_verify;
        self
    }

    /// Zero leaves `ping` on its default bound and `flux_enabled` unbounded.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn insecure_skip_verify(&self) -> bool {
        self.insecure_skip_verify
    }

    /// The bound `ping` waits for: the configured timeout, or two seconds when unset.
    pub fn ping_timeout(&self) -> Duration {
        if self.timeout > Duration::ZERO {
            self.timeout
        } else {
            DEFAULT_PING_TIMEOUT
        }
    }

    fn transport(&self) -> &'static Client {
        transport_for(!self.insecure_skip_verify)
    }

    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.url.clone();
        url.set_path(path);
        url
    }

    /// Checks that the service answers `GET /ping` with 204 before the ping timeout
    /// elapses or `cancel` fires, whichever comes first.
    ///
    /// The request runs on its own task. When the wait runs out that task is left to
    /// finish on its own and its result is dropped; the caller gets
    /// [`FluxError::UpstreamTimeout`].
    pub async fn ping(&self, cancel: &CancellationToken) -> Result<(), FluxError> {
        let deadline = tokio::time::sleep(self.ping_timeout());

        let (tx, rx) = oneshot::channel();
        let client = self.transport();
        let url = self.endpoint(PING_PATH);
        tokio::spawn(async move {
            // Receiver is gone once the deadline has won.
            let _ = tx.send(ping(client, url).await);
        });

        race(rx, deadline, cancel).await
    }

    /// Returns true if the server has Flux querying enabled.
    ///
    /// Only the `Content-Type` of the `POST /api/v2/query` answer is inspected.
    pub async fn flux_enabled(&self) -> Result<bool, FluxError> {
        let mut request = self.transport().post(self.endpoint(QUERY_PATH));
        if self.timeout > Duration::ZERO {
            request = request.timeout(self.timeout);
        }

        let response = request.send().await?;
        let enabled = response
            .headers()
            .get(CONTENT_TYPE)
            .is_some_and(|value| value.as_bytes() == FLUX_CONTENT_TYPE.as_bytes());
        Ok(enabled)
    }
}

/// Waits for the check result, the deadline or `cancel`. A result that is already
/// there wins even when the deadline has also passed.
async fn race(
    check: oneshot::Receiver<Result<(), FluxError>>,
    deadline: Sleep,
    cancel: &CancellationToken,
) -> Result<(), FluxError> {
    tokio::select! {
        biased;
        result = check => result.unwrap_or(Err(FluxError::CheckAborted)),
        _ = deadline => Err(FluxError::UpstreamTimeout),
        _ = cancel.cancelled() => Err(FluxError::UpstreamTimeout),
    }
}

async fn ping(client: &Client, url: Url) -> Result<(), FluxError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    // Body is reported as sent, without charset decoding.
    let body = response.bytes().await?;

    if status != StatusCode::NO_CONTENT {
        return Err(FluxError::Unhealthy {
            status,
            body: String::from_utf8_lossy(&body).into_owned(),
        });
    }
    Ok(())
}
