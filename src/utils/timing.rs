//! Timing utilities for measuring and formatting durations
//!
//! Used by the engine when `--timings` is requested to record how long each
//! rule took on a document.

use std::time::{Duration, Instant};

/// A simple timer for measuring elapsed time
#[derive(Debug, Clone)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Create a new timer that starts immediately
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get the elapsed duration since the timer started
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::start()
    }
}

/// Format a duration into a human-readable string
///
/// - Durations >= 1 second: "1.23s"
/// - Durations >= 1 millisecond: "456ms"
/// - Durations < 1 millisecond: "< 1ms"
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();

    if millis == 0 {
        "< 1ms".to_string()
    } else if millis >= 1000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        format!("{}ms", millis)
    }
}

/// Timing of one rule on one document
#[derive(Debug, Clone)]
pub struct RuleTiming {
    pub name: &'static str,
    /// Findings produced before suppression
    pub findings_count: usize,
    pub duration: Duration,
}

impl RuleTiming {
    pub fn new(name: &'static str, findings_count: usize, duration: Duration) -> Self {
        Self {
            name,
            findings_count,
            duration,
        }
    }

    pub fn duration_formatted(&self) -> String {
        format_duration(self.duration)
    }
}

/// Timing of a full engine run on one document
#[derive(Debug, Clone, Default)]
pub struct RunTiming {
    pub rules: Vec<RuleTiming>,
    pub total: Duration,
}

impl RunTiming {
    pub fn new(rules: Vec<RuleTiming>, total: Duration) -> Self {
        Self { rules, total }
    }

    pub fn total_formatted(&self) -> String {
        format_duration(self.total)
    }

    /// The `n` slowest rules, slowest first
    pub fn slowest(&self, n: usize) -> Vec<&RuleTiming> {
        let mut sorted: Vec<&RuleTiming> = self.rules.iter().collect();
        sorted.sort_by(|a, b| b.duration.cmp(&a.duration).then(a.name.cmp(b.name)));
        sorted.truncate(n);
        sorted
    }
}
