//! Warning sink for rejected candidates.

/// Receives a warning for every candidate skipped by a batch insert.
///
/// Loggers only observe: swapping one for another never changes which
/// candidates are accepted.
pub trait FieldLogger {
    /// Report a warning raised by the field group `group`.
    fn warn(&self, group: &str, message: &str);
}

/// Discards every warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl FieldLogger for NoopLogger {
    fn warn(&self, _group: &str, _message: &str) {}
}

/// Forwards warnings to `tracing` at warn level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl FieldLogger for TracingLogger {
    fn warn(&self, group: &str, message: &str) {
        tracing::warn!(group, "{}", message);
    }
}
