use opencv::core::Mat;
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture};

use crate::capture::domain::frame_source::{FrameSource, SourceError, SourceInfo};
use crate::shared::frame::Frame;

/// Webcam frame source backed by OpenCV `VideoCapture`.
///
/// The device delivers BGR mats; conversion to RGB happens here so the
/// rest of the pipeline never sees device pixel order.
pub struct OpencvCamera {
    device: i32,
    capture: Option<VideoCapture>,
    next_index: usize,
}

impl OpencvCamera {
    pub fn new(device: i32) -> Self {
        Self {
            device,
            capture: None,
            next_index: 0,
        }
    }
}

impl FrameSource for OpencvCamera {
    fn open(&mut self) -> Result<SourceInfo, SourceError> {
        let unavailable = |reason: String| SourceError::Unavailable {
            device: self.device,
            reason,
        };

        let capture = VideoCapture::new(self.device, videoio::CAP_ANY)
            .map_err(|e| unavailable(e.to_string()))?;
        if !capture.is_opened().map_err(|e| unavailable(e.to_string()))? {
            return Err(unavailable("device could not be opened".to_string()));
        }

        let info = SourceInfo {
            width: prop(&capture, videoio::CAP_PROP_FRAME_WIDTH) as u32,
            height: prop(&capture, videoio::CAP_PROP_FRAME_HEIGHT) as u32,
            fps: prop(&capture, videoio::CAP_PROP_FPS),
        };
        self.capture = Some(capture);
        self.next_index = 0;
        Ok(info)
    }

    fn next_frame(&mut self) -> Result<Frame, SourceError> {
        let read_err = |reason: String| SourceError::Read { reason };

        let capture = self
            .capture
            .as_mut()
            .ok_or_else(|| read_err("source is not open".to_string()))?;

        let mut mat = Mat::default();
        let delivered = capture.read(&mut mat).map_err(|e| read_err(e.to_string()))?;
        if !delivered || mat.rows() == 0 || mat.cols() == 0 {
            return Err(read_err("device delivered no frame".to_string()));
        }

        let frame =
            bgr_mat_to_rgb_frame(&mat, self.next_index).map_err(|e| read_err(e.to_string()))?;
        self.next_index += 1;
        Ok(frame)
    }

    fn close(&mut self) {
        if let Some(mut capture) = self.capture.take() {
            let _ = capture.release();
        }
    }
}

fn prop(capture: &VideoCapture, id: i32) -> f64 {
    capture.get(id).unwrap_or(0.0).max(0.0)
}

fn bgr_mat_to_rgb_frame(mat: &Mat, index: usize) -> opencv::Result<Frame> {
    let width = mat.cols() as u32;
    let height = mat.rows() as u32;
    let bgr = mat.data_bytes()?;
    let mut rgb = Vec::with_capacity(bgr.len());
    for px in bgr.chunks_exact(3) {
        rgb.extend_from_slice(&[px[2], px[1], px[0]]);
    }
    Ok(Frame::new(rgb, width, height, 3, index))
}
