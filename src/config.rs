//! Driver tunables.
//!
//! The defaults reproduce the timing of the SIM7600 helmet firmware this driver
//! replaces, so an untouched [`Config`] behaves exactly like the field units.
//! A config can also be loaded from JSON (e.g. a blob kept in flash); missing
//! keys fall back to the defaults.
//!
//! ```rust
//! use libmodem::config::{Config, TokenMatch};
//!
//! let config = Config::from_json(br#"{"context_id":2,"token_match":"Line"}"#).unwrap();
//! assert_eq!(config.context_id, 2);
//! assert_eq!(config.token_match, TokenMatch::Line);
//! assert_eq!(config.read_window_ms, 5000);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// How the success token `OK` is recognised in a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TokenMatch {
    /// `OK` anywhere in the accumulated response, including inside echoed
    /// text such as `BOOK`. Matches the deployed firmware.
    #[default]
    Substring,
    /// A response line that is exactly `OK` once trimmed.
    Line,
}

/// Timeout and retry budget for one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandBudget {
    /// Per-attempt wait for the success token, in milliseconds.
    pub timeout_ms: u32,
    /// Number of attempts.
    pub retries: u8,
}

impl CommandBudget {
    /// Create a budget.
    pub const fn new(timeout_ms: u32, retries: u8) -> Self {
        Self {
            timeout_ms,
            retries,
        }
    }
}

/// Driver configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(default)]
pub struct Config {
    /// Pause between two polls of the serial port while waiting on a command.
    pub poll_interval_ms: u32,
    /// Success token recognition.
    pub token_match: TokenMatch,
    /// Window for identity queries (`AT+GSN`, `AT+CNUM`).
    pub identity_window_ms: u32,
    /// PDP context used for HTTP (`AT+HTTPPARA="CID",<n>`).
    pub context_id: u8,
    /// `AT+HTTPINIT`.
    pub http_init: CommandBudget,
    /// `AT+HTTPPARA=...`.
    pub http_parameter: CommandBudget,
    /// `AT+HTTPACTION=...`.
    pub http_action: CommandBudget,
    /// Raw POST payload after the `DOWNLOAD` prompt.
    pub http_payload: CommandBudget,
    /// `AT+HTTPTERM` after a body read.
    pub http_terminate: CommandBudget,
    /// `AT+HTTPTERM` when the action produced no content.
    pub http_abort: CommandBudget,
    /// How long to wait for the `+HTTPACTION:` completion marker.
    pub completion_window_ms: u32,
    /// Pause between two polls for the completion marker.
    pub completion_poll_interval_ms: u32,
    /// How long to wait for the `DOWNLOAD` prompt.
    pub prompt_window_ms: u32,
    /// Time the modem gives the host to upload a POST payload
    /// (second argument of `AT+HTTPDATA`).
    pub download_timeout_ms: u32,
    /// How long to read body lines after `AT+HTTPREAD`.
    pub read_window_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1,
            token_match: TokenMatch::Substring,
            identity_window_ms: 1000,
            context_id: 1,
            http_init: CommandBudget::new(200, 3),
            http_parameter: CommandBudget::new(2000, 3),
            http_action: CommandBudget::new(5000, 3),
            http_payload: CommandBudget::new(500, 3),
            http_terminate: CommandBudget::new(500, 3),
            http_abort: CommandBudget::new(2000, 3),
            completion_window_ms: 5000,
            completion_poll_interval_ms: 50,
            prompt_window_ms: 5000,
            download_timeout_ms: 10_000,
            read_window_ms: 5000,
        }
    }
}

impl Config {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON configuration and validate it.
    pub fn from_json(json: &[u8]) -> Result<Self, Error> {
        let (config, _): (Self, usize) =
            serde_json_core::from_slice(json).map_err(|_| Error::InvalidConfig)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject budgets that could never succeed.
    pub fn validate(&self) -> Result<(), Error> {
        let budgets = [
            self.http_init,
            self.http_parameter,
            self.http_action,
            self.http_payload,
            self.http_terminate,
            self.http_abort,
        ];
        if budgets.iter().any(|budget| budget.retries == 0) {
            return Err(Error::InvalidConfig);
        }
        Ok(())
    }

    /// Set [`Config::poll_interval_ms`].
    pub fn with_poll_interval(self, poll_interval_ms: u32) -> Self {
        Config {
            poll_interval_ms,
            ..self
        }
    }

    /// Set [`Config::token_match`].
    pub fn with_token_match(self, token_match: TokenMatch) -> Self {
        Config {
            token_match,
            ..self
        }
    }

    /// Set [`Config::context_id`].
    pub fn with_context_id(self, context_id: u8) -> Self {
        Config { context_id, ..self }
    }

    /// Set [`Config::completion_window_ms`].
    pub fn with_completion_window(self, completion_window_ms: u32) -> Self {
        Config {
            completion_window_ms,
            ..self
        }
    }

    /// Set [`Config::read_window_ms`].
    pub fn with_read_window(self, read_window_ms: u32) -> Self {
        Config {
            read_window_ms,
            ..self
        }
    }
}
