//! Drive NeoPixel strips through an Adafruit SeeSaw I2C bridge (e.g. the
//! NeoDriver board) with the embassy ecosystem.
//!
//! The SeeSaw takes register writes of the form `[base, function, offset,
//! payload...]`. Pixel colors go into the device's pixel memory in chunks
//! small enough for one I2C transaction, then a show command latches them out
//! to the LEDs.
//!
//! [`SeesawNeoPixel`] implements the `SmartLedsWriteAsync` trait, so it can be
//! used with the `smart-leds` crate, and also runs the [`Tracer`] and
//! [`Pulser`] animations.
//!
//! ```ignore
//! let transport = I2cTransport::new(twim);
//! let mut ring = SeesawNeoPixel::new(transport, Delay, DeviceConfig::new(0x60, 12));
//! ring.init().await?;
//! ring.fill(RGB8::new(0, 0, 32)).await?;
//! ```

#![no_std]

mod animation;
mod config;
mod error;
mod frame;
mod pixels;
mod protocol;
pub mod registers;
mod transport;

pub use animation::{ChannelMask, Passes, Pulser, PulserLevels, Tracer, TracerStep, TracerSteps};
pub use config::{ColorOrder, DeviceConfig, TransferConfig};
pub use error::Error;
pub use frame::Frame;
pub use protocol::{InitReport, InitStep, SeesawNeoPixel};
pub use rgb::RGB8;
pub use transport::{I2cTransport, I2cTransportError, TransferEvent, Transport};
