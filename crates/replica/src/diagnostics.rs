//! Injectable sink for the builder's non-fatal diagnostics.

/// Receiver for non-fatal warnings emitted while constructing a builder.
///
/// The only diagnostic today is the frozen-but-not-deep-frozen warning: the
/// caller froze the root of the source but not every descendant, which
/// usually points at a gap in their freezing discipline. Injecting the sink
/// keeps the warning observable in tests and free of assumptions about the
/// host's logging setup.
pub trait DiagnosticSink {
    fn warn(&self, message: &str);
}

/// Default sink; forwards warnings to the `log` facade at warn level.
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn warn(&self, message: &str) {
        log::warn!("{}", message);
    }
}
