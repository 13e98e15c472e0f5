//! Frame delivery and device bring-up.

use embassy_futures::select::{Either, select};
use embassy_time::Duration;
use embedded_hal_async::delay::DelayNs;

use crate::config::{DeviceConfig, TransferConfig};
use crate::error::Error;
use crate::frame::Frame;
use crate::registers::{
    NEOPIXEL_BASE, NEOPIXEL_BUF_LENGTH, NEOPIXEL_PIN, NEOPIXEL_SPEED, STATUS_BASE, STATUS_SWRST,
    SWRST_MAGIC,
};
use crate::transport::{TransferEvent, Transport};

/// Driver for one NeoPixel strip behind a SeeSaw bridge.
///
/// Owns the transport and the delay used both to poll for transfer
/// completion and to pace animations. Every frame is one transport write;
/// nothing is buffered or coalesced.
pub struct SeesawNeoPixel<T, D> {
    transport: T,
    delay: D,
    config: DeviceConfig,
    transfer: TransferConfig,
}

impl<T, D> SeesawNeoPixel<T, D>
where
    T: Transport,
    D: DelayNs,
{
    pub fn new(transport: T, delay: D, config: DeviceConfig) -> Self {
        Self {
            transport,
            delay,
            config,
            transfer: TransferConfig::default(),
        }
    }

    pub fn with_transfer_config(mut self, transfer: TransferConfig) -> Self {
        self.transfer = transfer;
        self
    }

    pub const fn config(&self) -> &DeviceConfig {
        &self.config
    }

    pub const fn pixel_count(&self) -> u8 {
        self.config.pixel_count
    }

    /// Give back the transport and delay.
    pub fn release(self) -> (T, D) {
        (self.transport, self.delay)
    }

    /// Bring the device up: open the bus, bind the address, soft reset,
    /// settle, then configure speed, data pin and buffer length.
    ///
    /// Steps that fail without aborting the bus are recorded in the returned
    /// [`InitReport`] and the sequence carries on. An aborted transfer stops
    /// the sequence and is returned as the error.
    pub async fn init(&mut self) -> Result<InitReport<T::Error>, Error<T::Error>> {
        let mut report = InitReport::new();

        let opened = self.transport.open().map_err(Error::Transport);
        report.record(InitStep::Open, opened)?;

        let bound = self.transport.bind_address(self.config.address).map_err(Error::Transport);
        report.record(InitStep::BindAddress, bound)?;

        let reset = Frame::with_u8(STATUS_BASE, STATUS_SWRST, SWRST_MAGIC);
        let sent = self.send_frame(&reset).await;
        report.record(InitStep::Reset, sent)?;

        self.pause(self.transfer.settle_delay).await;

        // Speed is written against the status base, as the NeoDriver expects.
        let speed = Frame::command(STATUS_BASE, NEOPIXEL_SPEED);
        let sent = self.send_frame(&speed).await;
        report.record(InitStep::Speed, sent)?;

        let pin = Frame::with_u8(NEOPIXEL_BASE, NEOPIXEL_PIN, self.config.data_pin);
        let sent = self.send_frame(&pin).await;
        report.record(InitStep::DataPin, sent)?;

        let buffer_len = self.config.buffer_len();
        let length = Frame::with_u16(NEOPIXEL_BASE, NEOPIXEL_BUF_LENGTH, buffer_len);
        let sent = self.send_frame(&length).await;
        report.record(InitStep::BufferLength, sent)?;

        #[cfg(feature = "defmt")]
        if report.is_complete() {
            defmt::info!(
                "seesaw {=u8:#x} ready with {} pixels",
                self.config.address,
                self.config.pixel_count
            );
        }

        Ok(report)
    }

    /// Send one frame and wait for the transport to report completion.
    ///
    /// The address is bound again first so several devices can share a bus.
    /// Returns [`Error::Aborted`] if the transfer was aborted and
    /// [`Error::Timeout`] if nothing was reported within
    /// [`TransferConfig::timeout`]. A timed-out write is dropped.
    pub async fn send_frame(&mut self, frame: &Frame) -> Result<(), Error<T::Error>> {
        self.transport.bind_address(self.config.address)?;

        let Self {
            transport,
            delay,
            transfer,
            ..
        } = self;
        let write = transport.write(frame.as_bytes(), false);
        let bound = poll_ticks(delay, transfer);
        let outcome = select(write, bound).await;

        match outcome {
            Either::First(Ok(TransferEvent::Complete)) => Ok(()),
            Either::First(Ok(TransferEvent::Aborted)) => {
                #[cfg(feature = "defmt")]
                defmt::error!("transfer to {=u8:#x} aborted", self.config.address);
                Err(Error::Aborted)
            }
            Either::First(Err(err)) => Err(Error::Transport(err)),
            Either::Second(()) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("transfer to {=u8:#x} timed out", self.config.address);
                Err(Error::Timeout)
            }
        }
    }

    pub(crate) async fn pause(&mut self, duration: Duration) {
        pause(&mut self.delay, duration).await;
    }
}

async fn pause<D: DelayNs>(delay: &mut D, duration: Duration) {
    let micros = u32::try_from(duration.as_micros()).unwrap_or(u32::MAX);
    delay.delay_us(micros).await;
}

/// Resolves after `timeout_ticks` poll intervals.
async fn poll_ticks<D: DelayNs>(delay: &mut D, transfer: &TransferConfig) {
    for _ in 0..transfer.timeout_ticks {
        pause(delay, transfer.poll_interval).await;
    }
}

/// Bring-up steps, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitStep {
    Open,
    BindAddress,
    Reset,
    Speed,
    DataPin,
    BufferLength,
}

const STEP_COUNT: usize = 6;

impl InitStep {
    pub const ALL: [Self; STEP_COUNT] = [
        Self::Open,
        Self::BindAddress,
        Self::Reset,
        Self::Speed,
        Self::DataPin,
        Self::BufferLength,
    ];
}

/// Outcome of [`SeesawNeoPixel::init`]: which steps failed, if any.
#[derive(Debug)]
pub struct InitReport<E> {
    failures: [Option<Error<E>>; STEP_COUNT],
}

impl<E> InitReport<E> {
    fn new() -> Self {
        Self {
            failures: [const { None }; STEP_COUNT],
        }
    }

    /// Keep non-fatal failures, hand fatal ones back to the caller.
    fn record(&mut self, step: InitStep, result: Result<(), Error<E>>) -> Result<(), Error<E>> {
        match result {
            Ok(()) => Ok(()),
            Err(err) if err.is_fatal() => Err(err),
            Err(err) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("bring-up step {} failed, continuing", step);
                self.failures[step as usize] = Some(err);
                Ok(())
            }
        }
    }

    /// Every step succeeded.
    pub fn is_complete(&self) -> bool {
        self.failures.iter().all(Option::is_none)
    }

    pub fn failure(&self, step: InitStep) -> Option<&Error<E>> {
        self.failures[step as usize].as_ref()
    }

    pub fn failures(&self) -> impl Iterator<Item = (InitStep, &Error<E>)> {
        InitStep::ALL
            .into_iter()
            .zip(self.failures.iter())
            .filter_map(|(step, failure)| failure.as_ref().map(|err| (step, err)))
    }

    /// First failed step, for callers that reject a partial bring-up.
    pub fn into_result(self) -> Result<(), (InitStep, Error<E>)> {
        match InitStep::ALL
            .into_iter()
            .zip(self.failures)
            .find_map(|(step, failure)| failure.map(|err| (step, err)))
        {
            Some(failed) => Err(failed),
            None => Ok(()),
        }
    }
}
