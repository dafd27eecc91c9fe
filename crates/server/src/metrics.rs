use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter, Encoder, IntCounter, TextEncoder};

// Prometheus metrics (default registry)
pub static SHIPS_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("ship_registry_ships_created_total", "Total ships created")
        .expect("register ships_created_total")
});

pub static SHIPS_UPDATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("ship_registry_ships_updated_total", "Total ships updated")
        .expect("register ships_updated_total")
});

pub static SHIPS_DELETED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("ship_registry_ships_deleted_total", "Total ships deleted")
        .expect("register ships_deleted_total")
});

pub static SHIPS_REJECTED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("ship_registry_ships_rejected_total", "Total requests rejected as malformed or invalid")
        .expect("register ships_rejected_total")
});

/// Touch every counter so they are exported before their first increment.
pub fn register_all() {
    Lazy::force(&SHIPS_CREATED_TOTAL);
    Lazy::force(&SHIPS_UPDATED_TOTAL);
    Lazy::force(&SHIPS_DELETED_TOTAL);
    Lazy::force(&SHIPS_REJECTED_TOTAL);
}

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (StatusCode::INTERNAL_SERVER_ERROR, format!("metrics encode error: {e}"));
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}
