use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use crate::flux::prelude::*;

/// Outcome of one probe round against a source.
#[derive(Debug)]
pub struct SourceReport {
    pub url: String,
    pub health: Result<(), FluxError>,
    /// Only checked once the source answered its ping.
    pub flux_enabled: Option<Result<bool, FluxError>>,
    pub elapsed: Duration,
}

impl SourceReport {
    pub fn is_healthy(&self) -> bool {
        self.health.is_ok()
    }
}

/// Pings the source, then asks whether it serves Flux queries if the ping succeeded.
/// The Flux check is abandoned when `cancel` fires.
pub async fn probe_source(client: &FluxClient, cancel: &CancellationToken) -> SourceReport {
    let start = Instant::now();
    let health = client.ping(cancel).await;
    let flux_enabled = match health {
        Ok(()) => tokio::select! {
            enabled = client.flux_enabled() => Some(enabled),
            _ = cancel.cancelled() => None,
        },
        Err(_) => None,
    };

    SourceReport {
        url: client.url().to_string(),
        health,
        flux_enabled,
        elapsed: start.elapsed(),
    }
}

/// Probes `client` every `interval` until `cancel` fires, handing each report to `on_report`.
pub async fn run_source<F>(
    name: String,
    client: FluxClient,
    interval: Duration,
    cancel: CancellationToken,
    mut on_report: F,
) where
    F: FnMut(&str, SourceReport),
{
    log::debug!(
        "Monitoring {} at {} every {:?} (insecure_skip_verify: {})",
        name,
        client.url(),
        interval,
        client.insecure_skip_verify()
    );

    while !cancel.is_cancelled() {
        let report = probe_source(&client, &cancel).await;
        if cancel.is_cancelled() {
            break;
        }
        on_report(&name, report);

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = cancel.cancelled() => break,
        }
    }

    log::debug!("Stopped monitoring {}", name);
}
