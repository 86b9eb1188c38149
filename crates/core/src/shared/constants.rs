use crate::shared::color::Color;

pub const CASCADE_MODEL_NAME: &str = "haarcascade_frontalface_default.xml";
pub const CASCADE_MODEL_URL: &str =
    "https://raw.githubusercontent.com/opencv/opencv/4.10.0/data/haarcascades/haarcascade_frontalface_default.xml";

/// Pyramid downscale ratio between detection passes; valid domain (1.0, 2.0].
pub const DEFAULT_SCALE_FACTOR: f64 = 1.3;

/// Overlapping candidate detections required to accept a region.
pub const DEFAULT_MIN_NEIGHBORS: u32 = 5;

pub const DEFAULT_BOX_COLOR: Color = Color::new(0, 255, 0);

/// Box outline thickness in pixels.
pub const BOX_STROKE_WIDTH: u32 = 2;

/// Single snapshot slot, overwritten on every save.
pub const DEFAULT_SNAPSHOT_FILENAME: &str = "detected_faces.jpg";
