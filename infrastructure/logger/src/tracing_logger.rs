use business::domain::logger::Logger;
use tracing::{debug, error, info, warn};

/// Forwards pipeline log lines to `tracing` under a single target, so
/// `RUST_LOG=prescription=debug` surfaces per-candidate lookups.
pub struct TracingLogger;

const TARGET: &str = "prescription";

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        info!(target: TARGET, "{}", message);
    }
    fn warn(&self, message: &str) {
        warn!(target: TARGET, "{}", message);
    }
    fn error(&self, message: &str) {
        error!(target: TARGET, "{}", message);
    }
    fn debug(&self, message: &str) {
        debug!(target: TARGET, "{}", message);
    }
}
