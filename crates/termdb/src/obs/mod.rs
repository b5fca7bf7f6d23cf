//! Observability: ephemeral runtime counters and sink abstractions.
//!
//! This module does not reach into cache or store internals; all
//! instrumentation flows through [`sink::MetricsEvent`].

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EventOps, EventReport, EventState};
pub use sink::{
    ExecKind, MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink,
};
