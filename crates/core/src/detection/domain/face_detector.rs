use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Domain interface for the pretrained face classifier.
///
/// `frame` is a single-channel luminance frame. `scale_factor` is the
/// pyramid downscale ratio between scan passes (smaller values scan
/// more scales at higher cost); `min_neighbors` is the number of
/// overlapping candidates required to accept a region. Implementations
/// may be stateful, hence `&mut self`.
pub trait FaceDetector: Send {
    fn detect(
        &mut self,
        frame: &Frame,
        scale_factor: f64,
        min_neighbors: u32,
    ) -> Result<Vec<Region>, Box<dyn std::error::Error>>;
}
