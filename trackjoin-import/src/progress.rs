//! Pipeline progress reporting.

/// Trait for receiving pipeline progress updates.
pub trait PipelineProgress {
    /// Called when a phase starts (e.g., "Loading catalog").
    fn on_phase(&self, message: &str);

    /// Called after a table has been built.
    fn on_table(&self, name: &str, rows: usize);

    /// Called when the run is complete.
    fn on_complete(&self, message: &str);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl PipelineProgress for SilentProgress {
    fn on_phase(&self, _message: &str) {}
    fn on_table(&self, _name: &str, _rows: usize) {}
    fn on_complete(&self, _message: &str) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl PipelineProgress for LogProgress {
    fn on_phase(&self, message: &str) {
        log::info!("{}", message);
    }

    fn on_table(&self, name: &str, rows: usize) {
        log::info!("  {}: {} rows", name, rows);
    }

    fn on_complete(&self, message: &str) {
        log::info!("{}", message);
    }
}
