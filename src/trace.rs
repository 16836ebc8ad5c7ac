//! Instrumentation for the quadrant scheduler.
//!
//! Builds with the `tracing` feature hand these macros straight to the
//! `tracing` crate. Other builds get empty expansions: field values are
//! still evaluated once so that they do not trigger unused-variable
//! warnings, but nothing is recorded.

/// Span covering one scheduler run, e.g. `trace_span!("find_all", quadrants = 4)`.
#[cfg(feature = "tracing")]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        tracing::info_span!($name $(, $($field)*)?)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        $crate::trace::DisabledSpan
    };
}

/// Scheduler milestones (quadrant totals, merged failures) at info level.
#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($name:expr $(, $key:ident = $value:expr)* $(,)?) => {
        tracing::info!(name: $name, $($key = $value),*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($name:expr $(, $key:ident = $value:expr)* $(,)?) => {
        $(let _ = $value;)*
    };
}

/// Per-worker detail at debug level.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($name:expr $(, $key:ident = $value:expr)* $(,)?) => {
        tracing::debug!(name: $name, $($key = $value),*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($name:expr $(, $key:ident = $value:expr)* $(,)?) => {
        $(let _ = $value;)*
    };
}

pub(crate) use trace_debug;
pub(crate) use trace_event;
pub(crate) use trace_span;

/// What `trace_span!` yields without the `tracing` feature.
#[cfg(not(feature = "tracing"))]
#[derive(Clone, Copy, Debug, Default)]
pub struct DisabledSpan;

#[cfg(not(feature = "tracing"))]
impl DisabledSpan {
    /// Same call shape as `tracing::Span::entered`; holding the result does nothing.
    #[inline]
    pub fn entered(self) -> Self {
        self
    }
}
