//! Metrics sink boundary.
//!
//! All instrumentation flows through `MetricsEvent` and `MetricsSink`.
//! This module is the only bridge between compilation code and the
//! thread-local metrics state.
use crate::obs::metrics;
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn MetricsSink>>> = RefCell::new(None);
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent<'a> {
    MethodCompiled { operation: &'a str, folded: bool },
    MethodRejected { operation: &'a str },
    ColumnValidated { failures: u64 },
    ColumnMissing,
    ColumnDefinitionRejected,
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent<'_>);
}

/// GlobalMetricsSink
/// Default sink that writes into the thread-local metrics state.
/// Used whenever no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent<'_>) {
        match event {
            MetricsEvent::MethodCompiled { operation, folded } => {
                metrics::with_state_mut(|m| {
                    m.ops.methods_compiled = m.ops.methods_compiled.saturating_add(1);
                    if folded {
                        m.ops.methods_folded = m.ops.methods_folded.saturating_add(1);
                    }

                    let entry = m.operations.entry(operation.to_string()).or_default();
                    entry.compiled = entry.compiled.saturating_add(1);
                    if folded {
                        entry.folded = entry.folded.saturating_add(1);
                    }
                });
            }

            MetricsEvent::MethodRejected { operation } => {
                metrics::with_state_mut(|m| {
                    m.ops.methods_rejected = m.ops.methods_rejected.saturating_add(1);
                    let entry = m.operations.entry(operation.to_string()).or_default();
                    entry.rejected = entry.rejected.saturating_add(1);
                });
            }

            MetricsEvent::ColumnValidated { failures } => {
                metrics::with_state_mut(|m| {
                    m.ops.columns_validated = m.ops.columns_validated.saturating_add(1);
                    m.ops.column_failures = m.ops.column_failures.saturating_add(failures);
                });
            }

            MetricsEvent::ColumnMissing => {
                metrics::with_state_mut(|m| {
                    m.ops.column_failures = m.ops.column_failures.saturating_add(1);
                });
            }

            MetricsEvent::ColumnDefinitionRejected => {
                metrics::with_state_mut(|m| {
                    m.ops.definitions_rejected = m.ops.definitions_rejected.saturating_add(1);
                });
            }
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent<'_>) {
    let sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());
    match sink {
        Some(sink) => sink.record(event),
        None => GLOBAL_METRICS_SINK.record(event),
    }
}

/// Snapshot the current metrics state.
///
/// `window_start_ms` filters by window start (`EventState::window_start_ms`),
/// not by per-event timestamps.
#[must_use]
pub fn metrics_report(window_start_ms: Option<u64>) -> metrics::EventReport {
    metrics::report_window_start(window_start_ms)
}

/// Reset all metrics state.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override on this thread.
pub fn with_metrics_sink<T>(sink: Rc<dyn MetricsSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn MetricsSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}
