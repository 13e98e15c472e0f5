//! SeeSaw register map for the NeoPixel module.
//!
//! Every write starts with a two byte header: the module (base register) and
//! the function register inside that module. Pixel buffer writes add a 16-bit
//! big-endian byte offset into the device's pixel memory.

/// Status module base register.
pub const STATUS_BASE: u8 = 0x00;
/// Software reset function of the status module.
pub const STATUS_SWRST: u8 = 0x7F;
/// Magic payload byte that triggers the software reset.
pub const SWRST_MAGIC: u8 = 0xFF;

/// NeoPixel module base register.
pub const NEOPIXEL_BASE: u8 = 0x0E;

/// Selects the SeeSaw pin wired to the LED data line.
pub const NEOPIXEL_PIN: u8 = 0x01;
/// LED data rate.
pub const NEOPIXEL_SPEED: u8 = 0x02;
/// Size of the pixel buffer in bytes, as a big-endian u16.
pub const NEOPIXEL_BUF_LENGTH: u8 = 0x03;
/// Write into the pixel buffer at a big-endian u16 byte offset.
pub const NEOPIXEL_BUF: u8 = 0x04;
/// Latch the pixel buffer out to the LEDs.
pub const NEOPIXEL_SHOW: u8 = 0x05;

/// Base + function register.
pub const HEADER_SIZE: usize = 2;
/// Base + function register + 16-bit offset.
pub const OFFSET_HEADER_SIZE: usize = 4;

/// Bytes of pixel memory per pixel.
pub const BYTES_PER_PIXEL: usize = 3;

/// Pixels that fit in one transfer alongside the offset header.
pub const MAX_PIXELS_PER_PAYLOAD: usize = 7;

/// Largest frame the driver ever builds.
pub const MAX_FRAME_LEN: usize = OFFSET_HEADER_SIZE + MAX_PIXELS_PER_PAYLOAD * BYTES_PER_PIXEL;

/// Default bus address of the NeoDriver board.
pub const DEFAULT_ADDRESS: u8 = 0x60;

/// SeeSaw pin that carries the pixel data line on the NeoDriver board.
pub const DEFAULT_DATA_PIN: u8 = 15;
