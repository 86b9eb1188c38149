use std::path::PathBuf;

use crate::persistence::domain::snapshot_sink::SnapshotSink;
use crate::shared::frame::Frame;

/// Snapshot writer backed by the `image` crate.
///
/// Holds the fixed slot path; the encoding format follows the path's
/// extension.
pub struct ImageSnapshotWriter {
    path: PathBuf,
}

impl ImageSnapshotWriter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SnapshotSink for ImageSnapshotWriter {
    fn save(&self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        // Ensure parent directory exists (infrastructure concern)
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let img = image::RgbImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
            .ok_or("Failed to create image from frame data")?;
        img.save(&self.path)?;
        Ok(())
    }
}
