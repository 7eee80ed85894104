//! Observability: in-process counters for compilation and validation.
//!
//! Compilation and validation code records through `sink::record` only;
//! nothing outside this module touches metrics state directly.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EventOps, EventReport, EventState, OperationCounters};
pub use sink::{MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink};
