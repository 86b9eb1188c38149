use std::path::Path;

use opencv::core::{Mat, Rect, Scalar, Size, Vector, CV_8UC1};
use opencv::objdetect::CascadeClassifier;
use opencv::prelude::*;

use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Frontal-face detector backed by a pretrained OpenCV Haar cascade.
///
/// The cascade is loaded once at construction; a missing or unreadable
/// model file fails construction, which callers treat as startup-fatal.
pub struct CascadeFaceDetector {
    classifier: CascadeClassifier,
}

impl CascadeFaceDetector {
    pub fn new(model_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let classifier = CascadeClassifier::new(&model_path.to_string_lossy())?;
        if classifier.empty()? {
            return Err(format!(
                "cascade model is empty or unreadable: {}",
                model_path.display()
            )
            .into());
        }
        Ok(Self { classifier })
    }
}

impl FaceDetector for CascadeFaceDetector {
    fn detect(
        &mut self,
        frame: &Frame,
        scale_factor: f64,
        min_neighbors: u32,
    ) -> Result<Vec<Region>, Box<dyn std::error::Error>> {
        debug_assert_eq!(frame.channels(), 1, "detector expects a luminance frame");

        let mut mat = Mat::new_rows_cols_with_default(
            frame.height() as i32,
            frame.width() as i32,
            CV_8UC1,
            Scalar::all(0.0),
        )?;
        mat.data_bytes_mut()?.copy_from_slice(frame.data());

        let mut found = Vector::<Rect>::new();
        self.classifier.detect_multi_scale(
            &mat,
            &mut found,
            scale_factor,
            min_neighbors as i32,
            0,
            Size::new(0, 0),
            Size::new(0, 0),
        )?;

        Ok(found
            .iter()
            .map(|r| Region::new(r.x, r.y, r.width, r.height))
            .collect())
    }
}
