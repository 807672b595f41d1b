// Path: crates/telemetry/src/sinks.rs
//! Defines abstract traits for metrics reporting, decoupling core logic from the backend.

use once_cell::sync::OnceCell;

// --- Static Sink Access ---

/// A no-op sink for use in tests or when telemetry is disabled.
#[derive(Debug, Clone, Copy)]
pub struct NopSink;

/// A lazily-initialized static reference to the global `MetricsSink` implementation.
pub static SINK: OnceCell<&'static dyn MetricsSink> = OnceCell::new();
static NOP_SINK: NopSink = NopSink;

/// Returns a static reference to the configured lifecycle metrics sink.
/// If no sink has been initialized, it returns a no-op sink.
pub fn lifecycle_metrics() -> &'static dyn LifecycleMetricsSink {
    match SINK.get() {
        Some(sink) => sink.as_lifecycle(),
        None => &NOP_SINK,
    }
}

/// Returns a static reference to the configured query metrics sink.
/// If no sink has been initialized, it returns a no-op sink.
pub fn query_metrics() -> &'static dyn QueryMetricsSink {
    match SINK.get() {
        Some(sink) => sink.as_query(),
        None => &NOP_SINK,
    }
}

/// Returns a static reference to the configured error metrics sink.
/// If no sink has been initialized, it returns a no-op sink.
pub fn error_metrics() -> &'static dyn ErrorMetricsSink {
    match SINK.get() {
        Some(sink) => sink.as_error(),
        None => &NOP_SINK,
    }
}

// --- Trait Definitions ---

/// A sink for metrics related to chaincode lifecycle operations.
pub trait LifecycleMetricsSink: Send + Sync + std::fmt::Debug {
    /// Increments the counter of finished operations, labeled by kind and outcome.
    fn inc_operations_total(&self, kind: &'static str, outcome: &'static str);
    /// Observes the end-to-end duration of an operation.
    fn observe_operation_duration(&self, kind: &'static str, duration_secs: f64);
    /// Increments the counter of settled commit listeners, labeled by outcome.
    fn inc_commit_outcome(&self, outcome: &'static str);
}
impl LifecycleMetricsSink for NopSink {
    fn inc_operations_total(&self, _kind: &'static str, _outcome: &'static str) {}
    fn observe_operation_duration(&self, _kind: &'static str, _duration_secs: f64) {}
    fn inc_commit_outcome(&self, _outcome: &'static str) {}
}

/// A sink for metrics related to the channel query engine.
pub trait QueryMetricsSink: Send + Sync + std::fmt::Debug {
    /// Increments the counter of answered queries, labeled by query and outcome.
    fn inc_queries_total(&self, query: &'static str, outcome: &'static str);
}
impl QueryMetricsSink for NopSink {
    fn inc_queries_total(&self, _query: &'static str, _outcome: &'static str) {}
}

/// A sink for recording structured error metrics.
pub trait ErrorMetricsSink: Send + Sync + std::fmt::Debug {
    /// Increments a counter for a specific error, categorized by its kind and variant.
    fn inc_error(&self, kind: &'static str, variant: &'static str);
}
impl ErrorMetricsSink for NopSink {
    fn inc_error(&self, _kind: &'static str, _variant: &'static str) {}
}

/// A unified sink that implements all domain-specific traits, providing a single
/// point of implementation for metrics backends like Prometheus.
pub trait MetricsSink: LifecycleMetricsSink + QueryMetricsSink + ErrorMetricsSink {
    /// This sink as a lifecycle metrics sink.
    fn as_lifecycle(&self) -> &dyn LifecycleMetricsSink;
    /// This sink as a query metrics sink.
    fn as_query(&self) -> &dyn QueryMetricsSink;
    /// This sink as an error metrics sink.
    fn as_error(&self) -> &dyn ErrorMetricsSink;
}

// Blanket implementation to allow any type that implements all sub-traits
// to be used as a `MetricsSink`.
impl<T> MetricsSink for T
where
    T: LifecycleMetricsSink + QueryMetricsSink + ErrorMetricsSink,
{
    fn as_lifecycle(&self) -> &dyn LifecycleMetricsSink {
        self
    }
    fn as_query(&self) -> &dyn QueryMetricsSink {
        self
    }
    fn as_error(&self) -> &dyn ErrorMetricsSink {
        self
    }
}
