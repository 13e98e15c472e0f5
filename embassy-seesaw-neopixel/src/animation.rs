//! Tracer and pulser animations.
//!
//! Each animation is described by a plain settings struct and produces its
//! steps as an iterator, so the color sequence can be inspected without a
//! device or any waiting. [`SeesawNeoPixel::play_tracer`] and
//! [`SeesawNeoPixel::play_pulser`] apply the steps to a device, pausing
//! between them.

use core::ops::BitOr;

use embassy_time::Duration;
use embedded_hal_async::delay::DelayNs;
use rgb::RGB8;

use crate::error::Error;
use crate::protocol::SeesawNeoPixel;
use crate::transport::Transport;

/// How many times an animation repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Passes {
    Count(u32),
    Forever,
}

impl Passes {
    const fn finished(self, completed: u32) -> bool {
        match self {
            Self::Count(count) => completed >= count,
            Self::Forever => false,
        }
    }
}

/// A lit segment that runs around the strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tracer {
    pub color: RGB8,
    pub step_delay: Duration,
    /// Pixels lit at the same time once the segment has formed.
    pub lit_len: u8,
    pub passes: Passes,
    /// Turn every pixel off before the first sweep.
    pub clear_first: bool,
}

impl Tracer {
    pub fn steps(&self, pixel_count: u8) -> TracerSteps {
        TracerSteps::new(pixel_count, self.lit_len, self.passes)
    }
}

/// One tracer step: light `on`, then turn `off` off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TracerStep {
    pub on: u8,
    pub off: u8,
}

/// Steps of a [`Tracer`]; one sweep is `pixel_count` steps.
#[derive(Debug, Clone)]
pub struct TracerSteps {
    pixel_count: u8,
    next_on: u8,
    // Trails `next_on` by the segment length, wrapping at `pixel_count`.
    next_off: u8,
    passes: Passes,
    completed: u32,
}

impl TracerSteps {
    pub fn new(pixel_count: u8, lit_len: u8, passes: Passes) -> Self {
        let lit_len = lit_len.min(pixel_count);
        let next_off = if lit_len == 0 { 0 } else { pixel_count - lit_len };
        Self {
            pixel_count,
            next_on: 0,
            next_off,
            passes,
            completed: 0,
        }
    }
}

impl Iterator for TracerSteps {
    type Item = TracerStep;

    fn next(&mut self) -> Option<TracerStep> {
        if self.pixel_count == 0 || self.passes.finished(self.completed) {
            return None;
        }

        let step = TracerStep {
            on: self.next_on,
            off: self.next_off,
        };

        self.next_off = wrap_increment(self.next_off, self.pixel_count);
        self.next_on = wrap_increment(self.next_on, self.pixel_count);
        if self.next_on == 0 {
            self.completed = self.completed.saturating_add(1);
        }

        Some(step)
    }
}

const fn wrap_increment(value: u8, modulus: u8) -> u8 {
    if value + 1 >= modulus { 0 } else { value + 1 }
}

/// Color channels that follow the pulser intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelMask {
    pub red: bool,
    pub green: bool,
    pub blue: bool,
}

impl ChannelMask {
    pub const RED: Self = Self::new(true, false, false);
    pub const GREEN: Self = Self::new(false, true, false);
    pub const BLUE: Self = Self::new(false, false, true);
    pub const WHITE: Self = Self::new(true, true, true);

    pub const fn new(red: bool, green: bool, blue: bool) -> Self {
        Self { red, green, blue }
    }

    /// `level` on the selected channels, zero elsewhere.
    pub const fn apply(self, level: u8) -> RGB8 {
        RGB8 {
            r: if self.red { level } else { 0 },
            g: if self.green { level } else { 0 },
            b: if self.blue { level } else { 0 },
        }
    }
}

impl BitOr for ChannelMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self::new(
            self.red || rhs.red,
            self.green || rhs.green,
            self.blue || rhs.blue,
        )
    }
}

/// The whole strip breathing between two intensities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pulser {
    pub channels: ChannelMask,
    pub min: u8,
    pub max: u8,
    /// Intensity change per step; zero is treated as one.
    pub step: u8,
    pub step_delay: Duration,
    pub passes: Passes,
    /// Turn every pixel off before the first ramp.
    pub clear_first: bool,
}

impl Pulser {
    /// Intensity for every step: up from `min`, then the same values back
    /// down, once per pass.
    pub fn levels(&self) -> PulserLevels {
        PulserLevels::new(self.min, self.max, self.step, self.passes)
    }

    /// Fill color for every step.
    pub fn steps(&self) -> impl Iterator<Item = RGB8> + use<> {
        let channels = self.channels;
        self.levels().map(move |level| channels.apply(level))
    }
}

/// Intensities of a [`Pulser`].
///
/// Each ramp visits `(max - min) / step + 1` values; the down-ramp is the
/// up-ramp reversed. `min > max` gives no steps at all.
#[derive(Debug, Clone)]
pub struct PulserLevels {
    min: u8,
    step: u8,
    ramp_len: u16,
    // Index into up-ramp followed by down-ramp.
    position: u16,
    passes: Passes,
    completed: u32,
}

impl PulserLevels {
    pub fn new(min: u8, max: u8, step: u8, passes: Passes) -> Self {
        let step = step.max(1);
        let ramp_len = if min > max {
            0
        } else {
            u16::from((max - min) / step) + 1
        };
        Self {
            min,
            step,
            ramp_len,
            position: 0,
            passes,
            completed: 0,
        }
    }

    /// Values in one ramp.
    pub const fn ramp_len(&self) -> u16 {
        self.ramp_len
    }
}

impl Iterator for PulserLevels {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.ramp_len == 0 || self.passes.finished(self.completed) {
            return None;
        }

        let index = if self.position < self.ramp_len {
            self.position
        } else {
            2 * self.ramp_len - 1 - self.position
        };
        // index < ramp_len keeps this within min..=max
        let level = u16::from(self.min) + index * u16::from(self.step);

        self.position += 1;
        if self.position == 2 * self.ramp_len {
            self.position = 0;
            self.completed = self.completed.saturating_add(1);
        }

        u8::try_from(level).ok()
    }
}

impl<T, D> SeesawNeoPixel<T, D>
where
    T: Transport,
    D: DelayNs,
{
    /// Run a [`Tracer`] until its passes are done.
    pub async fn play_tracer(&mut self, tracer: &Tracer) -> Result<(), Error<T::Error>> {
        if tracer.clear_first {
            self.clear().await?;
        }

        for step in tracer.steps(self.pixel_count()) {
            self.set_pixel(step.on, tracer.color).await?;
            self.set_pixel(step.off, RGB8::default()).await?;
            self.pause(tracer.step_delay).await;
        }
        Ok(())
    }

    /// Run a [`Pulser`] until its passes are done.
    pub async fn play_pulser(&mut self, pulser: &Pulser) -> Result<(), Error<T::Error>> {
        if pulser.clear_first {
            self.clear().await?;
        }

        for color in pulser.steps() {
            self.fill(color).await?;
            self.pause(pulser.step_delay).await;
        }
        Ok(())
    }
}
