use std::time::Instant;

use thiserror::Error;

use crate::annotation::box_annotator::BoxAnnotator;
use crate::capture::domain::frame_source::{FrameSource, SourceError};
use crate::detection::domain::detection_params::{DetectionParams, ParamsError};
use crate::detection::domain::face_detector::FaceDetector;
use crate::display::domain::display_sink::DisplaySink;
use crate::persistence::domain::snapshot_sink::SnapshotSink;
use crate::shared::frame::Frame;
use crate::shared::region::Region;

use super::run_logger::RunLogger;
use super::stop_flag::StopFlag;

#[derive(Error, Debug)]
pub enum RunError {
    #[error("invalid detection parameters: {0}")]
    InvalidParams(#[from] ParamsError),
    /// The source could not be opened; the loop never started and no
    /// resources were acquired.
    #[error("capture source unavailable: {0}")]
    SourceUnavailable(#[source] SourceError),
    /// An opened source stopped delivering frames. Fatal; resources
    /// are released before this surfaces.
    #[error("capture source failed: {0}")]
    SourceRead(#[source] SourceError),
    #[error("face detection failed: {0}")]
    Detection(String),
}

/// Counters for one completed run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: usize,
    pub detections: usize,
    pub snapshots_saved: usize,
    pub snapshot_failures: usize,
}

/// Live detection loop: capture, detect, annotate, display, and
/// optionally persist, until a stop request or a source failure.
///
/// Every collaborator is injected, so the loop itself is pure control
/// flow and runs unchanged against a real webcam or scripted stubs.
pub struct LiveDetectionUseCase {
    source: Box<dyn FrameSource>,
    detector: Box<dyn FaceDetector>,
    display: Box<dyn DisplaySink>,
    snapshots: Box<dyn SnapshotSink>,
    annotator: BoxAnnotator,
    stop: StopFlag,
    logger: Box<dyn RunLogger>,
}

impl LiveDetectionUseCase {
    pub fn new(
        source: Box<dyn FrameSource>,
        detector: Box<dyn FaceDetector>,
        display: Box<dyn DisplaySink>,
        snapshots: Box<dyn SnapshotSink>,
        annotator: BoxAnnotator,
        stop: StopFlag,
        logger: Box<dyn RunLogger>,
    ) -> Self {
        Self {
            source,
            detector,
            display,
            snapshots,
            annotator,
            stop,
            logger,
        }
    }

    /// Runs the loop until the stop flag is set or a fatal error occurs.
    ///
    /// The source and display are released exactly once on every exit
    /// path that acquired them; a failed open acquires nothing.
    pub fn execute(&mut self, params: &DetectionParams) -> Result<RunSummary, RunError> {
        params.validate()?;

        let info = self.source.open().map_err(RunError::SourceUnavailable)?;
        self.logger.info(&format!(
            "capture open: {}x{} @ {:.1} fps",
            info.width, info.height, info.fps
        ));

        let result = self.run_loop(params);

        self.source.close();
        self.display.close();
        self.logger.summary();
        result
    }

    fn run_loop(&mut self, params: &DetectionParams) -> Result<RunSummary, RunError> {
        let mut summary = RunSummary::default();

        while !self.stop.is_stop_requested() {
            let capture_start = Instant::now();
            let frame = self.source.next_frame().map_err(RunError::SourceRead)?;
            self.logger.timing("capture", elapsed_ms(capture_start));

            let (annotated, regions) = self.run_once(&frame, params)?;

            let display_start = Instant::now();
            if let Err(e) = self.display.show(&annotated) {
                log::warn!("display sink failed: {e}");
            }
            self.logger.timing("display", elapsed_ms(display_start));

            if params.save_on_detect && !regions.is_empty() {
                let save_start = Instant::now();
                match self.snapshots.save(&annotated) {
                    Ok(()) => {
                        summary.snapshots_saved += 1;
                        self.logger.info("snapshot saved");
                    }
                    Err(e) => {
                        summary.snapshot_failures += 1;
                        log::warn!("snapshot save failed: {e}");
                    }
                }
                self.logger.timing("save", elapsed_ms(save_start));
            }

            summary.frames += 1;
            summary.detections += regions.len();
            self.logger.metric("regions", regions.len() as f64);
            self.logger.frame_done(frame.index());
        }

        Ok(summary)
    }

    /// Pure per-frame step: luminance conversion, detection, and
    /// annotation of a copy.
    ///
    /// The input frame is left untouched; the annotated copy has the
    /// same dimensions and carries exactly one outline per returned
    /// region. Detector output is clamped to the frame bounds before
    /// anything downstream sees it.
    pub fn run_once(
        &mut self,
        frame: &Frame,
        params: &DetectionParams,
    ) -> Result<(Frame, Vec<Region>), RunError> {
        let detect_start = Instant::now();
        let gray = frame.to_luminance();
        let raw = self
            .detector
            .detect(&gray, params.scale_factor, params.min_neighbors)
            .map_err(|e| RunError::Detection(e.to_string()))?;
        self.logger.timing("detect", elapsed_ms(detect_start));

        let regions: Vec<Region> = raw
            .iter()
            .map(|r| r.clamped_to(frame.width(), frame.height()))
            .collect();

        let annotate_start = Instant::now();
        let annotated = self.annotator.annotate(frame, &regions, params.box_color);
        self.logger.timing("annotate", elapsed_ms(annotate_start));

        Ok((annotated, regions))
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
