use std::path::PathBuf;
use std::process;

use clap::Parser;

use facewatch_core::annotation::box_annotator::BoxAnnotator;
use facewatch_core::capture::domain::frame_source::FrameSource;
use facewatch_core::capture::infrastructure::opencv_camera::OpencvCamera;
use facewatch_core::detection::domain::detection_params::DetectionParams;
use facewatch_core::detection::domain::face_detector::FaceDetector;
use facewatch_core::detection::infrastructure::cascade_detector::CascadeFaceDetector;
use facewatch_core::detection::infrastructure::cascade_resolver;
use facewatch_core::display::domain::display_sink::DisplaySink;
use facewatch_core::display::infrastructure::highgui_display::HighguiDisplay;
use facewatch_core::persistence::domain::snapshot_sink::SnapshotSink;
use facewatch_core::persistence::infrastructure::image_snapshot_writer::ImageSnapshotWriter;
use facewatch_core::pipeline::live_detection_use_case::LiveDetectionUseCase;
use facewatch_core::pipeline::run_logger::{RunLogger, StdoutRunLogger};
use facewatch_core::pipeline::stop_flag::StopFlag;
use facewatch_core::shared::color::Color;
use facewatch_core::shared::constants::{BOX_STROKE_WIDTH, DEFAULT_SNAPSHOT_FILENAME};

/// Live webcam face detection with box overlays.
#[derive(Parser)]
#[command(name = "facewatch")]
struct Cli {
    /// Camera device index.
    #[arg(long, default_value = "0")]
    device: i32,

    /// Pyramid downscale ratio between detection passes (1.0 < f <= 2.0).
    #[arg(long, default_value = "1.3")]
    scale_factor: f64,

    /// Overlapping candidates required to accept a detection (>= 1).
    #[arg(long, default_value = "5")]
    min_neighbors: u32,

    /// Box overlay color as #RRGGBB.
    #[arg(long, default_value = "#00FF00")]
    color: String,

    /// Save annotated frames that contain detections.
    #[arg(long)]
    save: bool,

    /// Snapshot path, overwritten on every save.
    #[arg(long, default_value = DEFAULT_SNAPSHOT_FILENAME)]
    snapshot: PathBuf,

    /// Cascade model file (resolved from cache or downloaded when omitted).
    #[arg(long)]
    cascade: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let params = build_params(&cli)?;
    let detector = build_detector(&cli)?;

    let stop = StopFlag::new();
    let handler_stop = stop.clone();
    ctrlc::set_handler(move || handler_stop.request_stop())?;

    let source: Box<dyn FrameSource> = Box::new(OpencvCamera::new(cli.device));
    let display: Box<dyn DisplaySink> = Box::new(HighguiDisplay::new());
    let snapshots: Box<dyn SnapshotSink> = Box::new(ImageSnapshotWriter::new(cli.snapshot));
    let logger: Box<dyn RunLogger> = Box::new(StdoutRunLogger::default());

    log::info!("Starting detection on device {} (Ctrl-C to stop)", cli.device);
    let mut use_case = LiveDetectionUseCase::new(
        source,
        detector,
        display,
        snapshots,
        BoxAnnotator::new(BOX_STROKE_WIDTH),
        stop,
        logger,
    );

    let summary = use_case.execute(&params)?;
    log::info!(
        "Stopped after {} frames: {} detections, {} snapshots saved ({} failed)",
        summary.frames,
        summary.detections,
        summary.snapshots_saved,
        summary.snapshot_failures
    );
    Ok(())
}

fn build_params(cli: &Cli) -> Result<DetectionParams, Box<dyn std::error::Error>> {
    let box_color =
        Color::from_hex(&cli.color).map_err(|e| format!("Invalid --color: {e}"))?;
    let params = DetectionParams {
        scale_factor: cli.scale_factor,
        min_neighbors: cli.min_neighbors,
        box_color,
        save_on_detect: cli.save,
    };
    params
        .validate()
        .map_err(|e| format!("Invalid parameters: {e}"))?;
    Ok(params)
}

fn build_detector(cli: &Cli) -> Result<Box<dyn FaceDetector>, Box<dyn std::error::Error>> {
    let model_path =
        cascade_resolver::resolve(cli.cascade.as_deref(), Some(Box::new(download_progress)))?;
    eprintln!();
    Ok(Box::new(CascadeFaceDetector::new(&model_path)?))
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading face cascade... {pct}%");
    } else {
        eprint!("\rDownloading face cascade... {downloaded} bytes");
    }
}
