//! # libmodem - AT modem driver
//!
//! A driver for cellular and UWB modems that speak the Hayes AT command
//! protocol over a serial link, with an HTTP client built on the SIMCom
//! SIM7600 `AT+HTTP*` service. The library is designed for embedded systems
//! and supports `no_std` environments; it never allocates.
//!
//! ## Features
//!
//! ### AT transport
//! - Send-with-retry: each command is written, the response accumulated and
//!   scanned for `OK` within a per-attempt timeout
//! - Bounded response accumulator with an explicit overflow policy
//! - Line reader for protocol phases that consume the port line by line
//!
//! ### HTTP over AT
//! - GET and POST (JSON) through the modem's built-in HTTP client
//! - Asynchronous action completion, windowed body read and guaranteed
//!   teardown of the HTTP service
//! - Structured results: HTTP status, content length, body and how the read
//!   ended
//!
//! ### Device vocabularies
//! - SIM7600 (IMEI, subscriber number, HTTP)
//! - U100 UWB anchor (IMEI)
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! libmodem = "0.1.0"
//! ```
//!
//! Implement [`serial::Serial`] for your UART (or wrap an `embedded-io` port in
//! [`serial::IoSerial`]) and [`serial::Clock`] for your timer:
//!
//! ```rust,no_run
//! use libmodem::{Error, Modem, Sim7600};
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
//! let mut modem: Modem<Sim7600, _, _> = Modem::new(Uart, Ticks(0));
//!
//! match modem.http_get::<256>("http://example.com/ping") {
//!     Ok(response) if response.is_complete() => { /* response.body() */ }
//!     Ok(_partial) => { /* read window elapsed */ }
//!     Err(Error::NoContentLength) => { /* server sent nothing */ }
//!     Err(_) => {}
//! }
//! ```
//!
//! ## Platform Support
//!
//! This library is designed to work on:
//! - Embedded microcontrollers (ARM Cortex-M, RISC-V, Xtensa)
//! - Linux hosts talking to a modem over USB serial
//! - Any platform supporting Rust's `core` library
//!
//! ## Optional Features
//!
//! - `std`: Enable standard library support and [`serial::StdClock`]
//! - `defmt`: Log through `defmt` for embedded debugging
//! - `log`: Log through the `log` facade

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

#[macro_use]
mod fmt;

/// Serial port and clock abstractions the driver runs on.
pub mod serial;

/// AT command transport: response accumulation and send-with-retry.
pub mod at;

/// HTTP client over the modem's `AT+HTTP*` service.
pub mod http;

/// Device vocabularies and the caller-facing [`Modem`] driver.
pub mod modem;

/// Driver timeouts, retry budgets and polling intervals.
pub mod config;

/// Error type shared by all operations.
pub mod error;

pub use config::Config;
pub use error::Error;
pub use http::HttpResponse;
pub use modem::{HttpService, Modem, Module, Sim7600, Telephony, U100};
