#![allow(dead_code)]

use std::sync::Once;
use std::time::{SystemTime, UNIX_EPOCH};

use mongo_broker_admin::ServerConfig;

/// Load ServerConfig from environment when `MONGO_INTEGRATION=1` is set.
/// Returns None and prints a SKIP message otherwise.
pub fn load_config_for_integration() -> Option<ServerConfig> {
    if std::env::var("MONGO_INTEGRATION").ok().as_deref() != Some("1") {
        eprintln!("SKIP: set MONGO_INTEGRATION=1 and MONGODB_* env vars to run integration tests");
        return None;
    }
    init_tracing();
    ServerConfig::from_env().ok()
}

/// Millisecond timestamp string used to make database/user names unique.
pub fn ts_suffix() -> String {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    ts.to_string()
}

/// Route driver and crate logs to the test output, filtered by `RUST_LOG`.
fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("mongo_broker_admin=debug"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
