use std::time::{Duration, Instant};
use tracing::debug;

/// A simple timer for measuring execution time of code blocks
#[derive(Debug)]
pub struct Timer {
    label: String,
    start: Instant,
}

impl Timer {
    /// Create a new timer with a label
    pub fn new(label: &str) -> Self {
        debug!("Starting timer: {}", label);
        Self { label: label.to_string(), start: Instant::now() }
    }

    /// Stop the timer and log the elapsed time
    pub fn stop(self) -> Duration {
        let elapsed = self.start.elapsed();
        debug!("Timer '{}' completed in {:?}", self.label, elapsed);
        elapsed
    }
}

/// Macro for timing a block of code
#[macro_export]
macro_rules! time_block {
    ($label:expr, $block:block) => {{
        let timer = $crate::profiling::Timer::new($label);
        let result = $block;
        timer.stop();
        result
    }};
}
