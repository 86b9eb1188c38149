use thiserror::Error;

use crate::shared::frame::Frame;

/// Properties of an opened frame source.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceInfo {
    pub width: u32,
    pub height: u32,
    /// Frames per second as reported by the device; 0.0 when unknown.
    pub fps: f64,
}

#[derive(Error, Debug)]
pub enum SourceError {
    /// The device could not be opened. Reported to the caller before
    /// the loop starts; never retried.
    #[error("capture device {device} unavailable: {reason}")]
    Unavailable { device: i32, reason: String },

    /// An opened device stopped delivering frames. Fatal for the run;
    /// never retried.
    #[error("frame read failed: {reason}")]
    Read { reason: String },
}

/// Supplies a live sequence of frames from a camera-like device.
///
/// Implementations handle device I/O and pixel-format details; the
/// pipeline only ever sees RGB `Frame`s.
pub trait FrameSource: Send {
    /// Acquires an exclusive handle to the device.
    fn open(&mut self) -> Result<SourceInfo, SourceError>;

    /// Captures the next frame, blocking until the device delivers one.
    fn next_frame(&mut self) -> Result<Frame, SourceError>;

    /// Releases the device handle. Idempotent.
    fn close(&mut self);
}
