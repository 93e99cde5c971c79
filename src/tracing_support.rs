//! Tracing support for the graph algorithms.
//!
//! With the `tracing` feature enabled, every traversal and shortest path
//! search runs inside an `info` span and reports unusual inputs as `debug`
//! events.  [`init_tracing`] installs a subscriber that accumulates span
//! timings per [`TimingScope`] and prints events at or above the level named
//! by the `LEANGRAPH_LOG` environment variable (`warn` by default).
//!
//! Without the feature, the same names resolve to no-ops.

#[cfg(feature = "tracing")]
mod enabled {
    use std::{
        cell::RefCell,
        collections::{BTreeMap, HashMap},
        sync::Once,
        time::{Duration, Instant},
    };

    use tracing_subscriber::{
        Layer, Registry, filter::LevelFilter, fmt, layer::Context, layer::SubscriberExt,
        registry::LookupSpan, util::SubscriberInitExt,
    };

    /// Environment variable naming the most verbose level that is printed.
    pub const LOG_LEVEL_VAR: &str = "LEANGRAPH_LOG";

    type ScopeTimings = HashMap<TimingScope, BTreeMap<&'static str, (Duration, usize)>>;

    thread_local! {
        static TIMING_SCOPES: RefCell<ScopeTimings> = RefCell::new(HashMap::new());
        static TIMING_SCOPE: RefCell<TimingScope> = const { RefCell::new(TimingScope::Query) };
    }

    /// Buckets that span timings are accumulated into.
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    pub enum TimingScope {
        /// Spans opened by graph queries and algorithms.
        Query,
        /// Spans opened while checking graph invariants in tests.
        Consistency,
    }

    pub struct TimingScopeGuard {
        previous: TimingScope,
    }

    impl Drop for TimingScopeGuard {
        fn drop(&mut self) {
            TIMING_SCOPE.with(|scope| {
                *scope.borrow_mut() = self.previous;
            });
        }
    }

    /// Routes timings of spans closed on this thread into `scope` until the
    /// returned guard is dropped.
    pub fn set_timing_scope(scope: TimingScope) -> TimingScopeGuard {
        let previous = TIMING_SCOPE.with(|current| current.replace(scope));
        TimingScopeGuard { previous }
    }

    struct TimingLayer;

    impl<S> Layer<S> for TimingLayer
    where
        S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    {
        fn on_new_span(
            &self,
            _attrs: &tracing::span::Attributes<'_>,
            id: &tracing::Id,
            ctx: Context<'_, S>,
        ) {
            if let Some(span) = ctx.span(id) {
                span.extensions_mut().insert(Instant::now());
            }
        }

        fn on_close(&self, id: tracing::Id, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(&id) else {
                return;
            };
            let name = span.metadata().name();
            if let Some(start) = span.extensions().get::<Instant>() {
                let elapsed = start.elapsed();
                let scope = TIMING_SCOPE.with(|scope| *scope.borrow());
                TIMING_SCOPES.with(|totals| {
                    let mut totals = totals.borrow_mut();
                    let entry = totals
                        .entry(scope)
                        .or_default()
                        .entry(name)
                        .or_insert((Duration::ZERO, 0));
                    entry.0 += elapsed;
                    entry.1 += 1;
                });
            }
        }
    }

    fn log_level() -> LevelFilter {
        std::env::var(LOG_LEVEL_VAR)
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(LevelFilter::WARN)
    }

    /// Installs the global subscriber.  Later calls, and calls made after
    /// some other subscriber was installed, do nothing.
    pub fn init_tracing() {
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            let _ = Registry::default()
                .with(TimingLayer)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_filter(log_level()),
                )
                .try_init();
        });
    }

    #[doc(hidden)]
    pub fn dump_span_timings() {
        dump_scope_timings(TimingScope::Query);
        dump_scope_timings(TimingScope::Consistency);
    }

    #[doc(hidden)]
    pub fn reset_span_timings() {
        init_tracing();
        TIMING_SCOPES.with(|totals| totals.borrow_mut().clear());
    }

    /// Gets the accumulated `(total time, count)` for spans named `name`.
    #[doc(hidden)]
    pub fn span_timing(scope: TimingScope, name: &str) -> Option<(Duration, usize)> {
        TIMING_SCOPES.with(|totals| {
            totals
                .borrow()
                .get(&scope)
                .and_then(|entries| entries.get(name).copied())
        })
    }

    fn dump_scope_timings(scope: TimingScope) {
        TIMING_SCOPES.with(|totals| {
            let totals = totals.borrow();
            eprintln!("{scope:?} timings (desc):");
            let Some(entries) = totals.get(&scope) else {
                return;
            };
            let mut entries: Vec<_> = entries.iter().collect();
            entries.sort_by(|a, b| b.1.0.cmp(&a.1.0));
            for (name, (duration, count)) in entries {
                eprintln!("  {name}: {duration:?} ({count}x)");
            }
        });
    }

    pub use tracing::{debug as debug_event, info_span};
}

#[cfg(not(feature = "tracing"))]
mod disabled {
    use std::time::Duration;

    pub const LOG_LEVEL_VAR: &str = "LEANGRAPH_LOG";

    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    pub enum TimingScope {
        Query,
        Consistency,
    }

    pub struct TimingScopeGuard;

    pub fn set_timing_scope(_scope: TimingScope) -> TimingScopeGuard {
        TimingScopeGuard
    }

    pub fn init_tracing() {}

    #[doc(hidden)]
    pub fn dump_span_timings() {}

    #[doc(hidden)]
    pub fn reset_span_timings() {}

    #[doc(hidden)]
    pub fn span_timing(_scope: TimingScope, _name: &str) -> Option<(Duration, usize)> {
        None
    }

    #[doc(hidden)]
    #[macro_export]
    macro_rules! __leangraph_info_span {
        ($name:expr) => {{ $crate::tracing_support::NoOpSpan }};
        ($name:expr, $($fields:tt)*) => {{ $crate::tracing_support::NoOpSpan }};
    }

    #[doc(hidden)]
    #[macro_export]
    macro_rules! __leangraph_debug_event {
        ($($args:tt)*) => {{}};
    }

    pub use crate::{__leangraph_debug_event as debug_event, __leangraph_info_span as info_span};

    pub struct NoOpSpan;

    impl NoOpSpan {
        pub fn entered(self) -> NoOpSpanGuard {
            NoOpSpanGuard
        }
    }

    pub struct NoOpSpanGuard;
}

#[cfg(feature = "tracing")]
pub use enabled::*;

#[cfg(not(feature = "tracing"))]
pub use disabled::*;
