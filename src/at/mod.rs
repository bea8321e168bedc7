//! # AT command transport
//!
//! The lowest layer of the driver: it writes one command line at a time and
//! watches the modem's answer for the success token.
//!
//! ```text
//! ┌──────────────┐  write_line   ┌──────────────┐
//! │   AtClient   │──────────────▶│    Serial    │
//! │              │◀──────────────│              │
//! └──────────────┘  drain/poll   └──────────────┘
//!        │
//!        ▼
//! ┌──────────────┐   ┌──────────────┐
//! │ResponseBuffer│   │  LineReader  │
//! └──────────────┘   └──────────────┘
//! ```
//!
//! - [`ResponseBuffer`] accumulates raw bytes for success-token and marker
//!   scans. It is bounded and lossy on overflow.
//! - [`LineReader`] assembles terminated lines for the phases of a protocol
//!   that consume the port line by line (body reads, prompts).
//! - [`AtClient`] ties both to a [`Serial`](crate::serial::Serial) port and a
//!   [`Clock`](crate::serial::Clock) and implements send-with-retry.
//!
//! ```rust,no_run
//! use libmodem::at::{AtClient, CommandOutcome};
//! # use libmodem::serial::{Clock, Instant, Serial};
//! # struct Uart;
//! # impl Serial for Uart {
//! #     type Error = ();
//! #     fn available(&mut self) -> Result<usize, Self::Error> { Ok(0) }
//! #     fn read_byte(&mut self) -> Result<Option<u8>, Self::Error> { Ok(None) }
//! #     fn write(&mut self, _bytes: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct Ticks(u64);
//! # impl embedded_hal::delay::DelayNs for Ticks {
//! #     fn delay_ns(&mut self, ns: u32) { self.0 += u64::from(ns / 1_000_000); }
//! # }
//! # impl Clock for Ticks {
//! #     fn now(&mut self) -> Instant { self.0 += 1; Instant::from_ticks(self.0) }
//! # }
//!
//! let mut client: AtClient<_, _> = AtClient::new(Uart, Ticks(0));
//! if client.send_command("AT", 500, 3) == CommandOutcome::Failure {
//!     // modem did not answer
//! }
//! ```

mod buffer;
mod client;
mod line;

pub use buffer::{RESPONSE_CAPACITY, ResponseBuffer};
pub(crate) use buffer::{find_slice, utf8_prefix};
pub use client::{AtClient, CommandOutcome, ERROR_TOKEN, SUCCESS_TOKEN};
pub use line::{LINE_CAPACITY, Line, LineReader};
