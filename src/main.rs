use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use fluxping::config::app_config::load_config;
use fluxping::flux::prelude::*;
use fluxping::monitor::{SourceReport, run_source};

fn to_fixed_width(input: &str, width: usize) -> String {
    use unicode_truncate::UnicodeTruncateStr;

    let (truncated, _) = input.unicode_truncate(width);
    format!("{:<width$}", truncated, width = width)
}

fn print_report(name: &str, outcome: &SourceReport) {
    match &outcome.health {
        Ok(()) => {
            let flux = match &outcome.flux_enabled {
                Some(Ok(true)) => "enabled".to_string(),
                Some(Ok(false)) => "disabled".to_string(),
                Some(Err(e)) => format!("unknown ({e})"),
                None => "unknown".to_string(),
            };
            println!(
                "[{name}] ✅ URL: {}, Elapsed: {:.2}ms, Flux: {flux}",
                outcome.url,
                outcome.elapsed.as_secs_f64() * 1000.0,
            );
        }
        Err(e) if e.is_upstream_timeout() => {
            println!("[{name}] ❌ Timed out probing {}", outcome.url);
        }
        Err(e) => {
            println!("[{name}] ❌ Probe error for {}: {}", outcome.url, report(e));
        }
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let app_config = match load_config() {
        Ok(app_config) => app_config,
        Err(e) => {
            log::error!("{}", report(&e));
            std::process::exit(1);
        }
    };

    let cancel = CancellationToken::new();
    let mut handles = vec![];

    for (name, source) in app_config.config {
        let client = match FluxClient::from_config(&source) {
            Ok(client) => client,
            Err(e) => {
                log::warn!("Skipping source {name}: {}", report(&e));
                continue;
            }
        };
        let label = to_fixed_width(&name, app_config.max_name_width);
        let interval = Duration::from_secs(source.polling_interval_seconds);

        handles.push(tokio::spawn(run_source(
            label,
            client,
            interval,
            cancel.child_token(),
            |name, outcome| print_report(name, &outcome),
        )));
    }

    if handles.is_empty() {
        log::error!("No valid sources to monitor");
        std::process::exit(1);
    }

    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {e}");
    }
    log::info!("Shutting down");
    cancel.cancel();

    for handle in handles {
        let _ = handle.await;
    }
}
