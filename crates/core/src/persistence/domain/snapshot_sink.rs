use crate::shared::frame::Frame;

/// Writes annotated frames to a single fixed slot.
///
/// Every save overwrites the previous image; there is no archive and
/// no rotation.
pub trait SnapshotSink: Send {
    fn save(&self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>>;
}
