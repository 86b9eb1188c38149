use crate::shared::frame::Frame;

/// Renders annotated frames to the user.
///
/// Called once per iteration at the source frame rate; a slow sink
/// stalls the loop rather than dropping frames.
pub trait DisplaySink: Send {
    fn show(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Releases window/display resources. Idempotent.
    fn close(&mut self);
}
