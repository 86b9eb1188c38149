use std::collections::HashMap;
use std::time::Instant;

/// Cross-cutting observer for detection-loop events.
///
/// Decouples the loop from specific output mechanisms (stdout, GUI
/// signals, log crate) so callers can watch a run without changing the
/// orchestration code.
pub trait RunLogger: Send {
    /// Report that the frame with the given index finished processing.
    fn frame_done(&mut self, index: usize);

    /// Record how long a named pipeline stage took for one frame.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a point-in-time metric (e.g. regions per frame).
    fn metric(&mut self, name: &str, value: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events. Used where run output is
/// irrelevant, primarily in tests.
pub struct NullRunLogger;

impl RunLogger for NullRunLogger {
    fn frame_done(&mut self, _index: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// CLI-oriented logger that tracks per-stage timings and metrics and
/// reports a summary when the run ends.
///
/// A live source has no known total frame count, so per-frame output
/// is throttled to every `throttle_frames` frames.
pub struct StdoutRunLogger {
    throttle_frames: usize,
    timings: HashMap<String, Vec<f64>>,
    metrics: HashMap<String, Vec<f64>>,
    start_time: Instant,
    frames_seen: usize,
}

impl StdoutRunLogger {
    pub fn new(throttle_frames: usize) -> Self {
        Self {
            throttle_frames: throttle_frames.max(1),
            timings: HashMap::new(),
            metrics: HashMap::new(),
            start_time: Instant::now(),
            frames_seen: 0,
        }
    }

    /// Returns the formatted summary string, or `None` if no data was
    /// recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() && self.metrics.is_empty() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let frames = self.frames_seen;
        let mut lines = vec![format!(
            "Run summary ({frames} frames, {:.1}s):",
            elapsed_ms / 1000.0
        )];

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let durations = &self.timings[stage];
            let total_ms: f64 = durations.iter().sum();
            let avg_ms = total_ms / durations.len().max(1) as f64;
            lines.push(format!(
                "  {stage:10}: avg {avg_ms:6.1}ms  total {total_ms:7.0}ms"
            ));
        }

        let mut metric_names: Vec<_> = self.metrics.keys().collect();
        metric_names.sort();
        for name in metric_names {
            let values = &self.metrics[name];
            let avg = values.iter().sum::<f64>() / values.len().max(1) as f64;
            lines.push(format!("  {name}: avg {avg:.1}"));
        }

        if frames > 0 && elapsed_ms > 0.0 {
            let fps = frames as f64 / (elapsed_ms / 1000.0);
            lines.push(format!("  Throughput: {fps:.1} fps"));
        }

        Some(lines.join("\n"))
    }

    pub fn timings_for(&self, stage: &str) -> Option<&[f64]> {
        self.timings.get(stage).map(|v| v.as_slice())
    }

    pub fn metrics_for(&self, name: &str) -> Option<&[f64]> {
        self.metrics.get(name).map(|v| v.as_slice())
    }
}

impl Default for StdoutRunLogger {
    fn default() -> Self {
        Self::new(30)
    }
}

impl RunLogger for StdoutRunLogger {
    fn frame_done(&mut self, index: usize) {
        self.frames_seen = self.frames_seen.max(index + 1);
        if self.frames_seen % self.throttle_frames == 0 {
            log::info!("Processed {} frames", self.frames_seen);
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics
            .entry(name.to_string())
            .or_default()
            .push(value);
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n{text}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_logger_all_methods_are_noop() {
        let mut logger = NullRunLogger;
        logger.frame_done(1);
        logger.timing("detect", 5.0);
        logger.metric("regions", 2.0);
        logger.info("hello");
        logger.summary();
        // No panics = success
    }

    #[test]
    fn test_timing_recorded_per_stage() {
        let mut logger = StdoutRunLogger::new(10);
        logger.timing("detect", 20.0);
        logger.timing("detect", 30.0);
        logger.timing("capture", 5.0);

        assert_eq!(logger.timings_for("detect"), Some(&[20.0, 30.0][..]));
        assert_eq!(logger.timings_for("capture"), Some(&[5.0][..]));
        assert!(logger.timings_for("save").is_none());
    }

    #[test]
    fn test_metric_recorded_per_name() {
        let mut logger = StdoutRunLogger::new(10);
        logger.metric("regions", 3.0);
        logger.metric("regions", 1.0);
        assert_eq!(logger.metrics_for("regions"), Some(&[3.0, 1.0][..]));
    }

    #[test]
    fn test_summary_lists_stages_and_metrics() {
        let mut logger = StdoutRunLogger::new(10);
        logger.frame_done(9);
        logger.timing("detect", 20.0);
        logger.timing("capture", 5.0);
        logger.metric("regions", 2.0);

        let summary = logger.summary_string().unwrap();
        assert!(summary.contains("Run summary"));
        assert!(summary.contains("detect"));
        assert!(summary.contains("capture"));
        assert!(summary.contains("regions: avg 2.0"));
        assert!(summary.contains("fps"));
    }

    #[test]
    fn test_empty_summary_returns_none() {
        let logger = StdoutRunLogger::new(10);
        assert!(logger.summary_string().is_none());
    }

    #[test]
    fn test_frame_done_tracks_highest_index() {
        let mut logger = StdoutRunLogger::new(10);
        for i in 0..25 {
            logger.frame_done(i);
        }
        assert_eq!(logger.frames_seen, 25);
    }
}
