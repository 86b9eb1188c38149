use ndarray::{ArrayView3, ArrayViewMut3};

/// A single captured frame: contiguous 8-bit pixel bytes in row-major
/// order, 3 channels (RGB) for color frames or 1 for luminance frames.
///
/// Pixel-format conversion (device BGR, window BGR, file encoding)
/// happens at I/O boundaries only; the pipeline treats frame data as
/// RGB or luminance bytes and nothing else.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Position of this frame in the capture sequence.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Single-channel luminance copy of an RGB frame, same dimensions.
    ///
    /// Uses integer BT.601 weights (299/587/114 per mill), so a gray
    /// input pixel maps to itself exactly.
    pub fn to_luminance(&self) -> Frame {
        debug_assert_eq!(self.channels, 3, "luminance conversion expects an RGB frame");
        let mut data = Vec::with_capacity((self.width as usize) * (self.height as usize));
        for px in self.data.chunks_exact(3) {
            let weighted =
                299 * u32::from(px[0]) + 587 * u32::from(px[1]) + 114 * u32::from(px[2]);
            data.push(((weighted + 500) / 1000) as u8);
        }
        Frame::new(data, self.width, self.height, 1, self.index)
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    pub fn as_ndarray_mut(&mut self) -> ArrayViewMut3<'_, u8> {
        ArrayViewMut3::from_shape(self.shape(), &mut self.data)
            .expect("Frame data length must match dimensions")
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb_frame(pixels: &[[u8; 3]], width: u32, height: u32) -> Frame {
        let data: Vec<u8> = pixels.iter().flatten().copied().collect();
        Frame::new(data, width, height, 3, 0)
    }

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 12]; // 2x2x3
        let frame = Frame::new(data.clone(), 2, 2, 3, 7);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.channels(), 3);
        assert_eq!(frame.index(), 7);
        assert_eq!(frame.data(), &data[..]);
    }

    #[test]
    fn test_clone_is_independent() {
        let frame = Frame::new(vec![100u8; 12], 2, 2, 3, 0);
        let mut cloned = frame.clone();
        cloned.data_mut()[0] = 0;
        assert_eq!(frame.data()[0], 100);
        assert_eq!(cloned.data()[0], 0);
    }

    #[test]
    #[should_panic(expected = "data length must equal width * height * channels")]
    fn test_mismatched_data_length_panics_in_debug() {
        Frame::new(vec![0u8; 10], 2, 2, 3, 0);
    }

    #[test]
    fn test_as_ndarray_shape_is_height_width_channels() {
        let frame = Frame::new(vec![0u8; 24], 4, 2, 3, 0);
        assert_eq!(frame.as_ndarray().shape(), &[2, 4, 3]);
    }

    #[test]
    fn test_as_ndarray_mut_modification() {
        let mut frame = Frame::new(vec![0u8; 12], 2, 2, 3, 0);
        {
            let mut arr = frame.as_ndarray_mut();
            arr[[0, 1, 2]] = 128;
        }
        assert_eq!(frame.as_ndarray()[[0, 1, 2]], 128);
    }

    #[test]
    fn test_luminance_preserves_dimensions_and_index() {
        let frame = Frame::new(vec![10u8; 4 * 2 * 3], 4, 2, 3, 9);
        let gray = frame.to_luminance();
        assert_eq!(gray.width(), 4);
        assert_eq!(gray.height(), 2);
        assert_eq!(gray.channels(), 1);
        assert_eq!(gray.index(), 9);
        assert_eq!(gray.data().len(), 8);
    }

    #[test]
    fn test_luminance_gray_pixel_maps_to_itself() {
        let gray = rgb_frame(&[[128, 128, 128]], 1, 1).to_luminance();
        assert_eq!(gray.data(), &[128]);
    }

    #[test]
    fn test_luminance_bt601_weights() {
        // 0.299 R + 0.587 G + 0.114 B, rounded
        let gray = rgb_frame(&[[255, 0, 0], [0, 255, 0], [0, 0, 255]], 3, 1).to_luminance();
        assert_eq!(gray.data(), &[76, 150, 29]);
    }

    #[test]
    fn test_luminance_does_not_mutate_source() {
        let frame = rgb_frame(&[[200, 50, 25]], 1, 1);
        let before = frame.data().to_vec();
        let _ = frame.to_luminance();
        assert_eq!(frame.data(), &before[..]);
    }
}
