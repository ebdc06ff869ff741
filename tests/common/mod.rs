// Shared helpers for the in-memory integration tests.

use event_streams::core::ports::Document;
use serde_json::json;
use tracing_subscriber::EnvFilter;

/// Payload carrying a writer marker, so tests can tell which write won.
pub fn numbered_payload(n: u64) -> Document {
    match json!({ "kind": "Recorded", "n": n }) {
        serde_json::Value::Object(map) => map,
        _ => unreachable!(),
    }
}

/// Route library debug events through the test output when RUST_LOG asks.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}
