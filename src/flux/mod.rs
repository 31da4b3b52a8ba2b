pub mod client;
pub mod error;

pub mod prelude {
    pub use super::client::FluxClient;
    pub use super::error::FluxError;
    pub use super::report;
}

use std::fmt::Write;

/// Renders an error and its chain of sources, one "Caused by" per level.
pub fn report(mut err: &(dyn std::error::Error + 'static)) -> String {
    let mut s = format!("{}", err);
    while let Some(src) = err.source() {
        let _ = write!(s, "\n\nCaused by: {}", src);
        err = src;
    }
    s
}
