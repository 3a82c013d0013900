/// Error sink supplied by the hosting front end.
pub trait Logger {
    /// Record an error together with the context that triggered it.
    fn e(&self, context: &str, message: &str);
}

/// [`Logger`] that emits `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn e(&self, context: &str, message: &str) {
        tracing::error!(context, message, "command failed");
    }
}

impl<L: Logger + ?Sized> Logger for &L {
    fn e(&self, context: &str, message: &str) {
        (**self).e(context, message)
    }
}
