// Path: crates/telemetry/src/prometheus.rs
//! A concrete implementation of the metrics sinks using the Prometheus crate.

use crate::sinks::*;
use once_cell::sync::OnceCell;
use prometheus::{
    exponential_buckets, register_histogram_vec, register_int_counter_vec, HistogramVec,
    IntCounterVec,
};

// --- Metric Statics ---
// Collectors are registered exactly once by `install`. Until then every
// observation is dropped.

static LIFECYCLE_OPERATIONS_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static LIFECYCLE_OPERATION_DURATION_SECONDS: OnceCell<HistogramVec> = OnceCell::new();
static LIFECYCLE_COMMIT_OUTCOMES_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static QUERIES_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static ERRORS_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();

#[derive(Debug, Clone, Copy)]
pub struct PrometheusSink;

impl LifecycleMetricsSink for PrometheusSink {
    fn inc_operations_total(&self, kind: &'static str, outcome: &'static str) {
        if let Some(m) = LIFECYCLE_OPERATIONS_TOTAL.get() {
            m.with_label_values(&[kind, outcome]).inc();
        }
    }
    fn observe_operation_duration(&self, kind: &'static str, duration_secs: f64) {
        if let Some(m) = LIFECYCLE_OPERATION_DURATION_SECONDS.get() {
            m.with_label_values(&[kind]).observe(duration_secs);
        }
    }
    fn inc_commit_outcome(&self, outcome: &'static str) {
        if let Some(m) = LIFECYCLE_COMMIT_OUTCOMES_TOTAL.get() {
            m.with_label_values(&[outcome]).inc();
        }
    }
}
impl QueryMetricsSink for PrometheusSink {
    fn inc_queries_total(&self, query: &'static str, outcome: &'static str) {
        if let Some(m) = QUERIES_TOTAL.get() {
            m.with_label_values(&[query, outcome]).inc();
        }
    }
}
impl ErrorMetricsSink for PrometheusSink {
    fn inc_error(&self, kind: &'static str, variant: &'static str) {
        if let Some(m) = ERRORS_TOTAL.get() {
            m.with_label_values(&[kind, variant]).inc();
        }
    }
}

static PROMETHEUS_SINK: PrometheusSink = PrometheusSink;

fn set_once<T>(cell: &OnceCell<T>, value: T) -> Result<(), prometheus::Error> {
    cell.set(value).map_err(|_| prometheus::Error::AlreadyReg)
}

/// Registers every collector with the default Prometheus registry and installs
/// `PrometheusSink` as the global sink.
///
/// Fails with `AlreadyReg` when called twice.
pub fn install() -> Result<&'static dyn MetricsSink, prometheus::Error> {
    set_once(
        &LIFECYCLE_OPERATIONS_TOTAL,
        register_int_counter_vec!(
            "ledgerops_lifecycle_operations_total",
            "Total lifecycle operations, by kind and outcome.",
            &["kind", "outcome"]
        )?,
    )?;
    set_once(
        &LIFECYCLE_OPERATION_DURATION_SECONDS,
        register_histogram_vec!(
            "ledgerops_lifecycle_operation_duration_seconds",
            "End-to-end latency of lifecycle operations.",
            &["kind"],
            exponential_buckets(0.01, 2.0, 14)?
        )?,
    )?;
    set_once(
        &LIFECYCLE_COMMIT_OUTCOMES_TOTAL,
        register_int_counter_vec!(
            "ledgerops_lifecycle_commit_outcomes_total",
            "Settled commit listeners, by outcome.",
            &["outcome"]
        )?,
    )?;
    set_once(
        &QUERIES_TOTAL,
        register_int_counter_vec!(
            "ledgerops_queries_total",
            "Total channel queries, by query and outcome.",
            &["query", "outcome"]
        )?,
    )?;
    set_once(
        &ERRORS_TOTAL,
        register_int_counter_vec!(
            "ledgerops_errors_total",
            "Total number of errors, categorized by type and variant.",
            &["kind", "variant"]
        )?,
    )?;

    let sink: &'static dyn MetricsSink = &PROMETHEUS_SINK;
    SINK.set(sink).map_err(|_| prometheus::Error::AlreadyReg)?;
    Ok(sink)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_registers_collectors_once() {
        let sink = install().unwrap();
        sink.inc_operations_total("instantiate", "success");
        sink.inc_commit_outcome("timeout");
        sink.inc_queries_total("block_by_height", "ok");
        sink.inc_error("lifecycle", "LIFECYCLE_COMMIT_TIMEOUT");

        let families = prometheus::gather();
        let names: Vec<_> = families.iter().map(|f| f.get_name().to_string()).collect();
        assert!(names.contains(&"ledgerops_lifecycle_operations_total".to_string()));
        assert!(names.contains(&"ledgerops_errors_total".to_string()));

        assert!(install().is_err());
    }
}
