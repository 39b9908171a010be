//! Spans and timing helpers for HTTP exchanges.

use std::future::Future;
use tracing::{info_span, Instrument, Span};

/// Create a span covering one HTTP exchange.
pub fn request_span(method: &str, url: &str) -> Span {
    info_span!(
        "http_request",
        method = %method,
        url = %url,
        status = tracing::field::Empty,
        error = tracing::field::Empty
    )
}

/// Instrument a future with a span.
pub fn instrument_future<F: Future>(future: F, span: Span) -> impl Future<Output = F::Output> {
    future.instrument(span)
}

/// Record a response status on the current span.
pub fn record_status(status: u16) {
    Span::current().record("status", status);
}

/// Record an error on the current span.
pub fn record_error(error: &dyn std::error::Error) {
    Span::current().record("error", tracing::field::display(error));
}

/// Timing utility for operations.
pub struct Timer {
    start: std::time::Instant,
    operation: &'static str,
}

impl Timer {
    /// Start a new timer.
    pub fn start(operation: &'static str) -> Self {
        Self {
            start: std::time::Instant::now(),
            operation,
        }
    }

    /// Complete the timer and record duration.
    pub fn finish(self) {
        let duration = self.start.elapsed();
        tracing::debug!(
            operation = %self.operation,
            duration_ms = %duration.as_millis(),
            "operation completed"
        );
    }
}
