pub mod app_config;
pub mod model;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML in {path}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("no sources configured in {0}")]
    Empty(String),

    #[error("source {0} has a polling interval of zero seconds")]
    ZeroInterval(String),
}
