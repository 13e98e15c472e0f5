use core::fmt;

/// Errors raised while driving a SeeSaw NeoPixel device.
///
/// `E` is the error type of the underlying [`Transport`](crate::Transport).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The transport rejected a setup step (open, address bind or write start).
    Transport(E),
    /// The transport reported that the transfer was aborted on the bus.
    Aborted,
    /// No completion was reported within the configured bound.
    Timeout,
    /// Pixel index outside `0..pixel_count`.
    PixelOutOfRange { index: u8, pixel_count: u8 },
}

impl<E> Error<E> {
    /// An aborted transfer leaves the bus in an unknown state; callers
    /// should stop driving it.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Aborted)
    }
}

impl<E> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Self::Transport(err)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "transport error: {err:?}"),
            Self::Aborted => f.write_str("transfer aborted"),
            Self::Timeout => f.write_str("transfer timed out"),
            Self::PixelOutOfRange { index, pixel_count } => {
                write!(f, "pixel {index} out of range for {pixel_count} pixels")
            }
        }
    }
}

impl<E: fmt::Debug> core::error::Error for Error<E> {}
