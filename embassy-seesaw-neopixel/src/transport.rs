//! Bus contract consumed by the protocol driver.

use embedded_hal::i2c::SevenBitAddress;
use embedded_hal_async::i2c::I2c;

/// Outcome the bus reports for a started write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransferEvent {
    Complete,
    Aborted,
}

/// A bus that can start register writes to a 7-bit address.
///
/// `write` resolves once the bus reports how the transfer ended. The driver
/// races it against its own completion bound and drops the future on
/// timeout, so implementations must stop the transfer when dropped.
#[allow(async_fn_in_trait)]
pub trait Transport {
    type Error;

    /// One-time bus bring-up.
    fn open(&mut self) -> Result<(), Self::Error>;

    /// Select the target for the following writes. Called before every frame.
    fn bind_address(&mut self, address: SevenBitAddress) -> Result<(), Self::Error>;

    /// Write `bytes` as one transaction. `restart` keeps the bus claimed for
    /// a follow-up transfer.
    ///
    /// `Err` means the write could not be started at all.
    async fn write(&mut self, bytes: &[u8], restart: bool) -> Result<TransferEvent, Self::Error>;
}

/// [`Transport`] over any async embedded-hal I2C bus, such as the embassy-nrf
/// `Twim`.
///
/// A bus error (NACK, arbitration loss, overrun) is reported as
/// [`TransferEvent::Aborted`].
pub struct I2cTransport<I2C> {
    i2c: I2C,
    address: Option<SevenBitAddress>,
}

/// Errors from [`I2cTransport`] setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cTransportError {
    /// `write` before any `bind_address`.
    Unbound,
    /// Address does not fit in 7 bits.
    InvalidAddress(u8),
}

impl<I2C: I2c> I2cTransport<I2C> {
    pub const fn new(i2c: I2C) -> Self {
        Self { i2c, address: None }
    }

    /// Give the bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> Transport for I2cTransport<I2C> {
    type Error = I2cTransportError;

    fn open(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn bind_address(&mut self, address: SevenBitAddress) -> Result<(), Self::Error> {
        if address > 0x7F {
            return Err(I2cTransportError::InvalidAddress(address));
        }
        self.address = Some(address);
        Ok(())
    }

    async fn write(
        &mut self,
        bytes: &[u8],
        _restart: bool,
    ) -> Result<TransferEvent, Self::Error> {
        let address = self.address.ok_or(I2cTransportError::Unbound)?;
        match self.i2c.write(address, bytes).await {
            Ok(()) => Ok(TransferEvent::Complete),
            Err(_err) => {
                #[cfg(feature = "defmt")]
                defmt::debug!(
                    "i2c write to {=u8:#x} failed: {}",
                    address,
                    defmt::Debug2Format(&_err)
                );
                Ok(TransferEvent::Aborted)
            }
        }
    }
}
