//! Process-wide request logging settings.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::config::ServerConfig;

static SLOW_REQUEST_THRESHOLD_MS: AtomicU64 = AtomicU64::new(1_000);
static PARENT_PROPAGATION_ENABLED: AtomicBool = AtomicBool::new(false);

pub(super) fn apply_runtime_config(config: &ServerConfig) {
    let settings = &config.observability;

    SLOW_REQUEST_THRESHOLD_MS.store(settings.slow_request_threshold_ms, Ordering::Relaxed);
    PARENT_PROPAGATION_ENABLED.store(
        settings.otel_enabled && settings.otel_parent_propagation_enabled,
        Ordering::Relaxed,
    );
}

pub(super) fn slow_request_threshold_ms() -> u64 {
    SLOW_REQUEST_THRESHOLD_MS.load(Ordering::Relaxed)
}

pub(super) fn parent_propagation_enabled() -> bool {
    PARENT_PROPAGATION_ENABLED.load(Ordering::Relaxed)
}
