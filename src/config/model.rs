use serde::Deserialize;

/// A Flux source to monitor.
/// Contains the address of the query service and how to reach it.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Base URL of the service, e.g. `https://influx.example.com:8086`.
    pub url: String,

    /// Accept any TLS certificate the service presents.
    #[serde(default)]
    pub insecure_skip_verify: bool,

    /// Per probe timeout in milliseconds.
    /// Zero keeps the ping on its two second default and the Flux check unbounded.
    #[serde(default)]
    pub timeout_ms: u64,

    /// Seconds between two probes of this source.
    #[serde(default = "default_polling_interval")]
    pub polling_interval_seconds: u64,
}

fn default_polling_interval() -> u64 {
    10
}

/// Sources keyed by the name used in console output.
pub type Config = std::collections::HashMap<String, SourceConfig>;
