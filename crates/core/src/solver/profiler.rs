//! Wall-clock timing of ticks and tick rules.
//!
//! `ProfilerScope` reports its elapsed time to `tracing` when dropped.

use std::time::Instant;
use tracing::trace;

/// Times one tick or one tick rule from creation until drop
///
/// On drop the scope emits a `trace!` event carrying its name and the elapsed
/// milliseconds.
pub struct ProfilerScope {
    start: Instant,
    name: String,
}

impl ProfilerScope {
    /// Start timing `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            name: name.into(),
        }
    }

    /// Milliseconds since the scope was created
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for ProfilerScope {
    fn drop(&mut self) {
        trace!(scope = %self.name, elapsed_ms = self.elapsed_ms(), "scope finished");
    }
}
