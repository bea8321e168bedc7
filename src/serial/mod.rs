//! Serial and timing abstraction layer.
//!
//! The AT driver never touches a UART directly. Everything it needs from the
//! outside world is described by two small traits:
//!
//! - [`Serial`]: a duplex byte channel with a non-blocking "bytes available"
//!   query, single-byte reads and line-oriented writes.
//! - [`Clock`]: a monotonic millisecond timebase that can also pause, used to
//!   bound every wait the driver performs.
//!
//! Any [`embedded_io`] port that can report read readiness can be used through
//! the [`IoSerial`] adapter. With the `std` feature, [`StdClock`] provides a
//! clock backed by `std::time::Instant`.
//!
//! ```rust,no_run
//! use libmodem::serial::Serial;
//!
//! struct Uart;
//!
//! impl Serial for Uart {
//!     type Error = ();
//!     fn available(&mut self) -> Result<usize, Self::Error> { Ok(0) }
//!     fn read_byte(&mut self) -> Result<Option<u8>, Self::Error> { Ok(None) }
//!     fn write(&mut self, _bytes: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! }
//! ```

#![deny(unsafe_code)]

use embedded_hal::delay::DelayNs;

/// Line terminator appended by [`Serial::write_line`].
pub const LINE_TERMINATOR: &[u8] = b"\r\n";

/// Millisecond instant reported by a [`Clock`].
pub type Instant = fugit::TimerInstantU64<1000>;

/// Millisecond duration between two [`Instant`]s.
pub type Duration = fugit::MillisDurationU64;

/// A duplex byte channel to the modem.
pub trait Serial {
    /// Associated error type
    type Error: core::fmt::Debug;

    /// Number of bytes that can be read right now without waiting.
    ///
    /// Implementations that can only tell whether *some* data is pending may
    /// report `1` for "at least one byte".
    fn available(&mut self) -> Result<usize, Self::Error>;

    /// Read a single byte, or `None` if nothing is pending.
    fn read_byte(&mut self) -> Result<Option<u8>, Self::Error>;

    /// Write all of `bytes` to the channel.
    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Write `line` followed by [`LINE_TERMINATOR`].
    fn write_line(&mut self, line: &str) -> Result<(), Self::Error> {
        self.write(line.as_bytes())?;
        self.write(LINE_TERMINATOR)
    }
}

/// A monotonic millisecond clock.
///
/// The [`DelayNs`] supertrait is the driver's pause hook between polls. On a
/// cooperative scheduler this is the place to yield.
pub trait Clock: DelayNs {
    /// Current time. Must never go backwards.
    fn now(&mut self) -> Instant;
}

/// A point in time after which a wait gives up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    start: Instant,
    window: Duration,
}

impl Deadline {
    /// Start a window of `window_ms` milliseconds at the clock's current time.
    pub fn start<C: Clock>(clock: &mut C, window_ms: u32) -> Self {
        Self {
            start: clock.now(),
            window: Duration::millis(u64::from(window_ms)),
        }
    }

    /// Time elapsed since the window opened.
    pub fn elapsed<C: Clock>(&self, clock: &mut C) -> Duration {
        clock
            .now()
            .checked_duration_since(self.start)
            .unwrap_or(Duration::from_ticks(0))
    }

    /// Whether the full window has elapsed.
    pub fn expired<C: Clock>(&self, clock: &mut C) -> bool {
        self.elapsed(clock) >= self.window
    }
}

/// [`Serial`] adapter for [`embedded_io`] ports.
///
/// `available` reports `1` while the port says it is read-ready, since
/// [`embedded_io::ReadReady`] does not expose a byte count.
#[derive(Debug)]
pub struct IoSerial<T> {
    port: T,
}

impl<T> IoSerial<T> {
    /// Wrap an `embedded-io` port.
    pub fn new(port: T) -> Self {
        Self { port }
    }

    /// Give the port back.
    pub fn release(self) -> T {
        self.port
    }
}

impl<T> Serial for IoSerial<T>
where
    T: embedded_io::Read + embedded_io::ReadReady + embedded_io::Write,
{
    type Error = T::Error;

    fn available(&mut self) -> Result<usize, Self::Error> {
        Ok(usize::from(self.port.read_ready()?))
    }

    fn read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        if !self.port.read_ready()? {
            return Ok(None);
        }
        let mut byte = [0u8; 1];
        match self.port.read(&mut byte)? {
            0 => Ok(None),
            _ => Ok(Some(byte[0])),
        }
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.port.write_all(bytes)?;
        self.port.flush()
    }
}

/// [`Clock`] backed by `std::time::Instant` and `std::thread::sleep`.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct StdClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdClock {
    /// Create a clock whose zero is "now".
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl DelayNs for StdClock {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }
}

#[cfg(feature = "std")]
impl Clock for StdClock {
    fn now(&mut self) -> Instant {
        let millis = self.origin.elapsed().as_millis();
        Instant::from_ticks(millis as u64)
    }
}
