//! Metrics module for club-service.
//! Prometheus metrics for data access, per-tenant operations and the
//! subscription write gate.

use once_cell::sync::Lazy;
use prometheus::{
    histogram_opts, opts, register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec,
    IntCounterVec, TextEncoder,
};
use std::sync::OnceLock;

/// Database query duration histogram
pub static DB_QUERY_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        histogram_opts!("club_db_query_duration_seconds", "Database query duration"),
        &["operation"]
    )
    .expect("Failed to register DB_QUERY_DURATION")
});

/// Document operations counter (per-tenant metering)
pub static DOCUMENT_OPERATIONS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Write-gate denials counter
pub static WRITE_DENIED_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize all metrics. Call once at startup.
pub fn init_metrics() {
    DOCUMENT_OPERATIONS_TOTAL.get_or_init(|| {
        register_int_counter_vec!(
            opts!(
                "club_document_operations_total",
                "Total document operations by tenant and operation type"
            ),
            &["tenant_id", "operation"]
        )
        .expect("Failed to register DOCUMENT_OPERATIONS_TOTAL")
    });

    WRITE_DENIED_TOTAL.get_or_init(|| {
        register_int_counter_vec!(
            opts!(
                "club_write_denied_total",
                "Mutations blocked by the subscription write gate"
            ),
            &["tenant_id", "reason"]
        )
        .expect("Failed to register WRITE_DENIED_TOTAL")
    });

    // Force initialization of lazy statics
    let _ = &*DB_QUERY_DURATION;
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .expect("Failed to encode metrics");
    String::from_utf8(buffer).expect("Failed to convert metrics to string")
}

/// Record a document operation.
pub fn record_document_operation(tenant_id: &str, operation: &str) {
    if let Some(counter) = DOCUMENT_OPERATIONS_TOTAL.get() {
        counter.with_label_values(&[tenant_id, operation]).inc();
    }
}

/// Record a denied write.
pub fn record_write_denied(tenant_id: &str, reason: &str) {
    if let Some(counter) = WRITE_DENIED_TOTAL.get() {
        counter.with_label_values(&[tenant_id, reason]).inc();
    }
}
