use ndarray::ArrayView3;

/// One video/image frame: contiguous RGB bytes in row-major order.
///
/// Pixel-format conversion happens at I/O boundaries only; everything
/// between reader and writer works on this buffer directly.
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

    /// Position of this frame in decode order.
    pub fn index(&self) -> usize {
        self.index
    }

    /// RGB triple at (x, y). Caller must stay in bounds.
    pub fn rgb_at(&self, x: u32, y: u32) -> [u8; 3] {
        let i = ((y * self.width + x) * self.channels as u32) as usize;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Read-only (height, width, channels) view for tensor preprocessing.
    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        let shape = (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        );
        ArrayView3::from_shape(shape, &self.data).expect("Frame data length must match dimensions")
    }
}
