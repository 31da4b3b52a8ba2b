use std::sync::LazyLock;

use reqwest::Client;

/// Shared clients for every probe, so connections are pooled instead of leaked
/// by a client per request.
static SKIP_VERIFY_TRANSPORT: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .danger_accept_invalid_certs(true)
        .no_proxy()
        .build()
        .expect("Failed to create skip-verify client")
});

static DEFAULT_TRANSPORT: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .no_proxy()
        .build()
        .expect("Failed to create client")
});

/// Returns the process-wide client for the given certificate verification mode.
pub fn transport_for(verify: bool) -> &'static Client {
    if verify {
        &DEFAULT_TRANSPORT
    } else {
        &SKIP_VERIFY_TRANSPORT
    }
}
