//! # Modem driver
//!
//! [`Modem`] is the caller-facing driver for one physical modem. It owns an
//! [`AtClient`] and a [`Config`] and is typed by the module it talks to, so
//! only the operations the module supports are available:
//!
//! | Module      | `send_command` | `imei` | `phone_number` | `http_*` |
//! |-------------|:--------------:|:------:|:--------------:|:--------:|
//! | [`Sim7600`] | ✓              | ✓      | ✓              | ✓        |
//! | [`U100`]    | ✓              | ✓      |                |          |
//!
//! ```rust,no_run
//! use libmodem::{Modem, Sim7600};
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
//! let imei = modem.imei();
//! let response = modem.http_get::<512>("http://example.com/status");
//! ```

use core::marker::PhantomData;

use heapless::String;
use serde::Serialize;

use crate::at::{AtClient, CommandOutcome, RESPONSE_CAPACITY};
use crate::config::Config;
use crate::error::Error;
use crate::http::{HttpResponse, HttpSession, PAYLOAD_CAPACITY};
use crate::serial::{Clock, Serial};

mod device;
mod identity;

pub use device::{HttpService, Module, Sim7600, Telephony, U100};
pub use identity::{IDENTITY_CAPACITY, Identity, parse_imei, parse_subscriber_number};

/// Driver for one modem of type `M` on serial port `S`.
#[derive(Debug)]
pub struct Modem<M, S, C, const N: usize = RESPONSE_CAPACITY> {
    client: AtClient<S, C, N>,
    config: Config,
    _module: PhantomData<M>,
}

impl<M, S, C, const N: usize> Modem<M, S, C, N>
where
    M: Module,
    S: Serial,
    C: Clock,
{
    /// Create a driver with the default configuration.
    pub fn new(serial: S, clock: C) -> Self {
        Self::with_config(serial, clock, Config::default())
    }

    /// Create a driver with `config`.
    pub fn with_config(serial: S, clock: C, config: Config) -> Self {
        info!("{} driver up", M::NAME);
        Self {
            client: AtClient::with_config(serial, clock, &config),
            config,
            _module: PhantomData,
        }
    }

    /// Send a raw AT command and wait for `OK`; see [`AtClient::send_command`].
    pub fn send_command(&mut self, command: &str, timeout_ms: u32, retries: u8) -> CommandOutcome {
        self.client.send_command(command, timeout_ms, retries)
    }

    /// Query the module's IMEI.
    pub fn imei(&mut self) -> Result<Identity, Error> {
        let response = self.client.capture(M::IMEI_QUERY, self.config.identity_window_ms);
        parse_imei(response).inspect_err(|_| warn!("{}: no IMEI in response", M::NAME))
    }

    /// The active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The underlying AT transport.
    pub fn client(&mut self) -> &mut AtClient<S, C, N> {
        &mut self.client
    }

    /// Give back the serial port and the clock.
    pub fn release(self) -> (S, C) {
        self.client.release()
    }
}

impl<M, S, C, const N: usize> Modem<M, S, C, N>
where
    M: Telephony,
    S: Serial,
    C: Clock,
{
    /// Query the subscriber number stored on the SIM.
    pub fn phone_number(&mut self) -> Result<Identity, Error> {
        let response = self
            .client
            .capture(M::SUBSCRIBER_NUMBER_QUERY, self.config.identity_window_ms);
        parse_subscriber_number(response).inspect_err(|_| warn!("{}: no subscriber number in response", M::NAME))
    }
}

impl<M, S, C, const N: usize> Modem<M, S, C, N>
where
    M: HttpService,
    S: Serial,
    C: Clock,
{
    /// HTTP GET `url`.
    ///
    /// Returns [`Error::NoContentLength`] if the server produced no body. A
    /// body cut short by the read window is still returned; check
    /// [`HttpResponse::is_complete`].
    pub fn http_get<const B: usize>(&mut self, url: &str) -> Result<HttpResponse<B>, Error> {
        HttpSession::new(&mut self.client, &self.config).get(url)
    }

    /// HTTP POST the JSON text `body` to `url`.
    pub fn http_post<const B: usize>(&mut self, url: &str, body: &str) -> Result<HttpResponse<B>, Error> {
        HttpSession::new(&mut self.client, &self.config).post(url, body)
    }

    /// Serialize `payload` to JSON and POST it to `url`.
    pub fn http_post_json<T, const B: usize>(&mut self, url: &str, payload: &T) -> Result<HttpResponse<B>, Error>
    where
        T: Serialize,
    {
        let body: String<PAYLOAD_CAPACITY> = serde_json_core::to_string(payload).map_err(|_| Error::Serialize)?;
        self.http_post(url, &body)
    }
}
