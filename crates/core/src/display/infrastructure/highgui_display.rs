use opencv::core::{Mat, Scalar, CV_8UC3};
use opencv::highgui;
use opencv::prelude::*;

use crate::display::domain::display_sink::DisplaySink;
use crate::shared::frame::Frame;

const DEFAULT_WINDOW_NAME: &str = "facewatch";

/// On-screen display backed by an OpenCV highgui window.
///
/// The window is created lazily on the first `show` and pumped with
/// `poll_key` so it repaints between frames.
pub struct HighguiDisplay {
    window: String,
    created: bool,
}

impl HighguiDisplay {
    pub fn new() -> Self {
        Self::with_window(DEFAULT_WINDOW_NAME)
    }

    pub fn with_window(name: &str) -> Self {
        Self {
            window: name.to_string(),
            created: false,
        }
    }
}

impl Default for HighguiDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySink for HighguiDisplay {
    fn show(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        if !self.created {
            highgui::named_window(&self.window, highgui::WINDOW_AUTOSIZE)?;
            self.created = true;
        }

        let mut mat = Mat::new_rows_cols_with_default(
            frame.height() as i32,
            frame.width() as i32,
            CV_8UC3,
            Scalar::all(0.0),
        )?;
        // highgui expects BGR
        for (dst, src) in mat
            .data_bytes_mut()?
            .chunks_exact_mut(3)
            .zip(frame.data().chunks_exact(3))
        {
            dst[0] = src[2];
            dst[1] = src[1];
            dst[2] = src[0];
        }

        highgui::imshow(&self.window, &mat)?;
        highgui::poll_key()?;
        Ok(())
    }

    fn close(&mut self) {
        if self.created {
            let _ = highgui::destroy_window(&self.window);
            self.created = false;
        }
    }
}
