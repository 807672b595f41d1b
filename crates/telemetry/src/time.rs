// Path: crates/telemetry/src/time.rs
use crate::sinks::LifecycleMetricsSink;
use std::time::Instant;

/// Observes the elapsed time of a lifecycle operation when dropped.
pub struct Timer<'a> {
    sink: &'a dyn LifecycleMetricsSink,
    kind: &'static str,
    start: Instant,
}

impl<'a> Timer<'a> {
    pub fn new(sink: &'a dyn LifecycleMetricsSink, kind: &'static str) -> Self {
        Self {
            sink,
            kind,
            start: Instant::now(),
        }
    }
}

impl Drop for Timer<'_> {
    fn drop(&mut self) {
        self.sink
            .observe_operation_duration(self.kind, self.start.elapsed().as_secs_f64());
    }
}
