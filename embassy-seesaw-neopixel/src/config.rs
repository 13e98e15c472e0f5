use embassy_time::Duration;
use embedded_hal::i2c::SevenBitAddress;

use crate::registers::DEFAULT_DATA_PIN;

/// Byte order the LEDs expect for each pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorOrder {
    /// WS2812 / NeoPixel order.
    #[default]
    Grb,
    Rgb,
}

impl ColorOrder {
    /// Wire bytes for one pixel.
    pub const fn encode(self, color: rgb::RGB8) -> [u8; 3] {
        match self {
            Self::Grb => [color.g, color.r, color.b],
            Self::Rgb => [color.r, color.g, color.b],
        }
    }
}

/// Fixed identity of one LED strip or ring behind a SeeSaw bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceConfig {
    pub address: SevenBitAddress,
    pub pixel_count: u8,
    /// SeeSaw pin wired to the LED data line.
    pub data_pin: u8,
    pub color_order: ColorOrder,
}

impl DeviceConfig {
    pub const fn new(address: SevenBitAddress, pixel_count: u8) -> Self {
        Self {
            address,
            pixel_count,
            data_pin: DEFAULT_DATA_PIN,
            color_order: ColorOrder::Grb,
        }
    }

    pub const fn with_data_pin(mut self, data_pin: u8) -> Self {
        self.data_pin = data_pin;
        self
    }

    pub const fn with_color_order(mut self, color_order: ColorOrder) -> Self {
        self.color_order = color_order;
        self
    }

    /// Size of the device pixel buffer in bytes.
    pub const fn buffer_len(&self) -> u16 {
        self.pixel_count as u16 * 3
    }
}

/// Timing of the completion wait and device bring-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransferConfig {
    /// Poll intervals to wait for a completion before giving up.
    pub timeout_ticks: u32,
    /// Wait between polls.
    pub poll_interval: Duration,
    /// Wait after the software reset before talking to the device again.
    pub settle_delay: Duration,
}

impl TransferConfig {
    pub const fn new() -> Self {
        Self {
            timeout_ticks: 100,
            poll_interval: Duration::from_millis(1),
            settle_delay: Duration::from_millis(1000),
        }
    }

    /// Upper bound on the time spent waiting for one completion.
    pub fn timeout(&self) -> Duration {
        self.poll_interval * self.timeout_ticks
    }
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self::new()
    }
}
