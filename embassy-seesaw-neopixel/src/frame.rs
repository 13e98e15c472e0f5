//! Register-addressed write frames.

use core::fmt;

use crate::registers::{
    BYTES_PER_PIXEL, MAX_FRAME_LEN, MAX_PIXELS_PER_PAYLOAD, NEOPIXEL_BASE, NEOPIXEL_BUF,
    OFFSET_HEADER_SIZE,
};

/// One complete write, sent as a single transport transaction.
///
/// Layout on the wire: `[base, function, (offset/value bytes), payload...]`.
/// The length is fixed when the frame is built and never exceeds
/// [`MAX_FRAME_LEN`].
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    buf: [u8; MAX_FRAME_LEN],
    len: usize,
}

impl Frame {
    /// Header-only frame, e.g. the show command.
    pub const fn command(base: u8, function: u8) -> Self {
        let mut buf = [0; MAX_FRAME_LEN];
        buf[0] = base;
        buf[1] = function;
        Self { buf, len: 2 }
    }

    /// Header followed by a single data byte.
    pub const fn with_u8(base: u8, function: u8, value: u8) -> Self {
        let mut frame = Self::command(base, function);
        frame.buf[2] = value;
        frame.len = 3;
        frame
    }

    /// Header followed by a big-endian 16-bit value.
    pub const fn with_u16(base: u8, function: u8, value: u16) -> Self {
        let [high, low] = value.to_be_bytes();
        let mut frame = Self::command(base, function);
        frame.buf[2] = high;
        frame.buf[3] = low;
        frame.len = 4;
        frame
    }

    /// Pixel buffer write at `offset` bytes into device pixel memory.
    ///
    /// Takes at most [`MAX_PIXELS_PER_PAYLOAD`] encoded pixels from `pixels`;
    /// the rest stay in the iterator for the next frame.
    pub fn pixels<I>(offset: u16, pixels: &mut I) -> Self
    where
        I: Iterator<Item = [u8; BYTES_PER_PIXEL]>,
    {
        let mut frame = Self::with_u16(NEOPIXEL_BASE, NEOPIXEL_BUF, offset);
        let slots = frame.buf[OFFSET_HEADER_SIZE..].chunks_exact_mut(BYTES_PER_PIXEL);
        let mut len = OFFSET_HEADER_SIZE;
        for (slot, pixel) in slots.zip(pixels) {
            slot.copy_from_slice(&pixel);
            len += BYTES_PER_PIXEL;
        }
        frame.len = len;
        frame
    }

    /// Bytes to put on the wire.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Number of whole pixels carried by a pixel buffer frame.
    pub const fn pixel_count(&self) -> usize {
        if self.len <= OFFSET_HEADER_SIZE {
            0
        } else {
            (self.len - OFFSET_HEADER_SIZE) / BYTES_PER_PIXEL
        }
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Frame").field(&self.as_bytes()).finish()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Frame {
    fn format(&self, f: defmt::Formatter<'_>) {
        defmt::write!(f, "Frame({=[u8]:02x})", self.as_bytes());
    }
}
