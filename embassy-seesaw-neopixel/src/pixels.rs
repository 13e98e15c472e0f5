//! Pixel writes, split to fit the per-transfer payload limit.

use embedded_hal_async::delay::DelayNs;
use rgb::RGB8;
use smart_leds_trait::SmartLedsWriteAsync;

use crate::error::Error;
use crate::frame::Frame;
use crate::protocol::SeesawNeoPixel;
use crate::registers::{BYTES_PER_PIXEL, NEOPIXEL_BASE, NEOPIXEL_SHOW};
use crate::transport::Transport;

/// Byte offset of a pixel in device pixel memory.
const fn pixel_offset(index: usize) -> u16 {
    (index * BYTES_PER_PIXEL) as u16
}

impl<T, D> SeesawNeoPixel<T, D>
where
    T: Transport,
    D: DelayNs,
{
    /// Latch the device pixel buffer out to the LEDs.
    pub async fn show(&mut self) -> Result<(), Error<T::Error>> {
        self.send_frame(&Frame::command(NEOPIXEL_BASE, NEOPIXEL_SHOW))
            .await
    }

    /// Write one pixel and show it straight away.
    ///
    /// Indices run `0..pixel_count`; anything else is rejected before a
    /// frame goes out.
    pub async fn set_pixel(&mut self, index: u8, color: RGB8) -> Result<(), Error<T::Error>> {
        let pixel_count = self.pixel_count();
        if index >= pixel_count {
            return Err(Error::PixelOutOfRange { index, pixel_count });
        }

        let encoded = self.config().color_order.encode(color);
        let frame = Frame::pixels(pixel_offset(index.into()), &mut core::iter::once(encoded));
        self.send_frame(&frame).await?;
        self.show().await
    }

    /// Write colors from pixel 0 onward, one chunk per frame with a show
    /// after each chunk.
    ///
    /// Colors past `pixel_count` are ignored; a shorter sequence only
    /// rewrites the pixels it covers.
    pub async fn write_pixels<I, C>(&mut self, colors: I) -> Result<(), Error<T::Error>>
    where
        I: IntoIterator<Item = C>,
        C: Into<RGB8>,
    {
        let color_order = self.config().color_order;
        let mut encoded = colors
            .into_iter()
            .take(self.pixel_count().into())
            .map(|color| color_order.encode(color.into()))
            .peekable();

        let mut written = 0;
        while encoded.peek().is_some() {
            let frame = Frame::pixels(pixel_offset(written), &mut encoded);
            self.send_frame(&frame).await?;
            self.show().await?;
            written += frame.pixel_count();
        }
        Ok(())
    }

    /// Set every pixel to the same color.
    pub async fn fill(&mut self, color: RGB8) -> Result<(), Error<T::Error>> {
        self.write_pixels(core::iter::repeat(color)).await
    }

    /// Turn every pixel off.
    pub async fn clear(&mut self) -> Result<(), Error<T::Error>> {
        self.fill(RGB8::default()).await
    }
}

impl<T, D> SmartLedsWriteAsync for SeesawNeoPixel<T, D>
where
    T: Transport,
    D: DelayNs,
{
    type Error = Error<T::Error>;
    type Color = RGB8;

    /// Write all the items of an iterator to the strip
    async fn write<It, I>(&mut self, iterator: It) -> Result<(), Self::Error>
    where
        It: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        self.write_pixels(iterator).await
    }
}
