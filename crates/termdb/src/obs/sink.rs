//! Metrics sink boundary.
//!
//! Cache and executor logic MUST NOT depend on `obs::metrics` directly.
//! All instrumentation flows through [`MetricsEvent`] and [`MetricsSink`];
//! this module is the only bridge between execution logic and counter state.

use crate::obs::metrics;
use std::cell::RefCell;

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<&'static dyn MetricsSink>> = const { RefCell::new(None) };
}

///
/// ExecKind
///

#[derive(Clone, Copy, Debug)]
pub enum ExecKind {
    Load,
    Save,
    Delete,
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug)]
pub enum MetricsEvent {
    ExecStart {
        kind: ExecKind,
    },
    ExecFinish {
        kind: ExecKind,
        rows_touched: u64,
    },
    CacheHit,
    CacheMiss,
    StorageQuery {
        rows_matched: u64,
    },
    StampBump,
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default thread-local sink that writes into the counter state.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::ExecStart { kind } => {
                metrics::with_state_mut(|m| match kind {
                    ExecKind::Load => m.ops.load_calls = m.ops.load_calls.saturating_add(1),
                    ExecKind::Save => m.ops.save_calls = m.ops.save_calls.saturating_add(1),
                    ExecKind::Delete => m.ops.delete_calls = m.ops.delete_calls.saturating_add(1),
                });
            }

            MetricsEvent::ExecFinish { kind, rows_touched } => {
                metrics::with_state_mut(|m| match kind {
                    ExecKind::Load => {
                        m.ops.rows_loaded = m.ops.rows_loaded.saturating_add(rows_touched);
                    }
                    ExecKind::Save => {
                        m.ops.rows_saved = m.ops.rows_saved.saturating_add(rows_touched);
                    }
                    ExecKind::Delete => {
                        m.ops.rows_deleted = m.ops.rows_deleted.saturating_add(rows_touched);
                    }
                });
            }

            MetricsEvent::CacheHit => {
                metrics::with_state_mut(|m| {
                    m.ops.cache_hits = m.ops.cache_hits.saturating_add(1);
                });
            }

            MetricsEvent::CacheMiss => {
                metrics::with_state_mut(|m| {
                    m.ops.cache_misses = m.ops.cache_misses.saturating_add(1);
                });
            }

            MetricsEvent::StorageQuery { rows_matched: _ } => {
                metrics::with_state_mut(|m| {
                    m.ops.storage_queries = m.ops.storage_queries.saturating_add(1);
                });
            }

            MetricsEvent::StampBump => {
                metrics::with_state_mut(|m| {
                    m.ops.stamp_bumps = m.ops.stamp_bumps.saturating_add(1);
                });
            }
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let override_sink = SINK_OVERRIDE.with(|cell| *cell.borrow());
    if let Some(sink) = override_sink {
        sink.record(event);
    } else {
        GLOBAL_METRICS_SINK.record(event);
    }
}

/// Snapshot the current metrics state for endpoint/test plumbing.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset all metrics state.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override.
///
/// The override is scoped to the closure and restored on all exits,
/// including unwind paths via `Guard::drop`.
pub fn with_metrics_sink<T>(sink: &'static dyn MetricsSink, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<&'static dyn MetricsSink>);

    impl Drop for Guard {
        fn drop(&mut self) {
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = self.0;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| {
        let mut slot = cell.borrow_mut();
        slot.replace(sink)
    });
    let _guard = Guard(prev);

    f()
}

///
/// Span
/// RAII guard that emits start/finish metrics events for one executor call.
/// Ensures finish accounting happens even on unwind.
///

pub(crate) struct Span {
    kind: ExecKind,
    rows: u64,
    finished: bool,
}

impl Span {
    #[must_use]
    /// Start a metrics span for an executor kind.
    pub(crate) fn new(kind: ExecKind) -> Self {
        record(MetricsEvent::ExecStart { kind });

        Self {
            kind,
            rows: 0,
            finished: false,
        }
    }

    pub(crate) const fn set_rows(&mut self, rows: u64) {
        self.rows = rows;
    }
}

impl Drop for Span {
    fn drop(&mut self) {
        if !self.finished {
            record(MetricsEvent::ExecFinish {
                kind: self.kind,
                rows_touched: self.rows,
            });
            self.finished = true;
        }
    }
}

///
/// TESTS
///
