use super::buffer::{RESPONSE_CAPACITY, ResponseBuffer};
use super::line::{Line, LineReader};
use crate::config::{CommandBudget, Config, TokenMatch};
use crate::error::Error;
use crate::serial::{Clock, Deadline, Serial};

/// Success token every AT command acknowledges with.
pub const SUCCESS_TOKEN: &str = "OK";

/// Final result code for a rejected command.
pub const ERROR_TOKEN: &str = "ERROR";

/// Result of dispatching one AT command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandOutcome {
    /// The success token was observed within one of the attempts.
    Success,
    /// All attempts elapsed without the success token.
    Failure,
}

impl CommandOutcome {
    /// `true` for [`CommandOutcome::Success`].
    pub fn is_success(self) -> bool {
        self == CommandOutcome::Success
    }

    /// Map [`CommandOutcome::Failure`] to [`Error::CommandTimeout`].
    pub fn into_result(self) -> Result<(), Error> {
        match self {
            CommandOutcome::Success => Ok(()),
            CommandOutcome::Failure => Err(Error::CommandTimeout),
        }
    }
}

/// AT command transport over one serial channel.
///
/// Owns the channel, the clock and the response accumulator. Exactly one
/// command is in flight at a time; every operation takes `&mut self`.
#[derive(Debug)]
pub struct AtClient<S, C, const N: usize = RESPONSE_CAPACITY> {
    serial: S,
    clock: C,
    response: ResponseBuffer<N>,
    poll_interval_ms: u32,
    token_match: TokenMatch,
}

impl<S, C, const N: usize> AtClient<S, C, N>
where
    S: Serial,
    C: Clock,
{
    /// Create a transport with the default poll interval and token matching.
    pub fn new(serial: S, clock: C) -> Self {
        Self::with_config(serial, clock, &Config::default())
    }

    /// Create a transport using the polling settings of `config`.
    pub fn with_config(serial: S, clock: C, config: &Config) -> Self {
        Self {
            serial,
            clock,
            response: ResponseBuffer::new(),
            poll_interval_ms: config.poll_interval_ms,
            token_match: config.token_match,
        }
    }

    /// Send `command` and wait for the success token.
    ///
    /// Up to `retries` attempts are made. Each attempt clears the accumulator,
    /// writes the command line and polls for at most `timeout_ms`. The first
    /// attempt that sees the token returns [`CommandOutcome::Success`].
    pub fn send_command(&mut self, command: &str, timeout_ms: u32, retries: u8) -> CommandOutcome {
        for attempt in 1..=retries {
            self.response.clear();
            debug!("TX [{}/{}]: {}", attempt, retries, command);
            if self.serial.write_line(command).is_err() {
                warn!("write failed: {}", command);
            }

            let deadline = Deadline::start(&mut self.clock, timeout_ms);
            while !deadline.expired(&mut self.clock) {
                self.response.drain(&mut self.serial);
                if self.token_seen() {
                    trace!("RX: {}", self.response.as_str());
                    return CommandOutcome::Success;
                }
                self.pause(self.poll_interval_ms);
            }
            warn!(
                "no {} for {} within {} ms (attempt {}/{})",
                SUCCESS_TOKEN,
                command,
                timeout_ms,
                attempt,
                retries
            );
        }
        CommandOutcome::Failure
    }

    /// [`send_command`](Self::send_command) with a configured budget.
    pub fn send(&mut self, command: &str, budget: CommandBudget) -> CommandOutcome {
        self.send_command(command, budget.timeout_ms, budget.retries)
    }

    /// Send `command` once and collect the response for up to `window_ms`.
    ///
    /// Collection stops early once a final result line (`OK` or `ERROR`)
    /// has arrived. Returns whatever was accumulated.
    pub fn capture(&mut self, command: &str, window_ms: u32) -> &str {
        self.response.clear();
        debug!("TX: {}", command);
        if self.serial.write_line(command).is_err() {
            warn!("write failed: {}", command);
        }

        let deadline = Deadline::start(&mut self.clock, window_ms);
        while !deadline.expired(&mut self.clock) {
            self.response.drain(&mut self.serial);
            if self.response.contains_line(SUCCESS_TOKEN) || self.response.contains_line(ERROR_TOKEN) {
                break;
            }
            self.pause(self.poll_interval_ms);
        }
        trace!("RX: {}", self.response.as_str());
        self.response.as_str()
    }

    /// Write a raw line without waiting for anything. Returns `false` if the
    /// port rejected the write.
    pub fn write_line(&mut self, line: &str) -> bool {
        debug!("TX: {}", line);
        match self.serial.write_line(line) {
            Ok(()) => true,
            Err(_) => {
                warn!("write failed: {}", line);
                false
            }
        }
    }

    /// Drain the port into the accumulator without clearing it first.
    pub fn drain(&mut self) -> usize {
        self.response.drain(&mut self.serial)
    }

    /// Poll `reader` against the port; see [`LineReader::poll`].
    pub fn read_line<'r, const L: usize>(&mut self, reader: &'r mut LineReader<L>) -> Option<Line<'r>> {
        reader.poll(&mut self.serial)
    }

    /// Open a wait window of `window_ms` at the current time.
    pub fn deadline(&mut self, window_ms: u32) -> Deadline {
        Deadline::start(&mut self.clock, window_ms)
    }

    /// Whether `deadline` has passed.
    pub fn expired(&mut self, deadline: &Deadline) -> bool {
        deadline.expired(&mut self.clock)
    }

    /// Pause for `ms` milliseconds through the clock. Zero does nothing.
    pub fn pause(&mut self, ms: u32) {
        if ms > 0 {
            self.clock.delay_ms(ms);
        }
    }

    /// Pause for the configured poll interval.
    pub fn relax(&mut self) {
        self.pause(self.poll_interval_ms);
    }

    /// The response accumulator.
    pub fn response(&self) -> &ResponseBuffer<N> {
        &self.response
    }

    /// Mutable access to the response accumulator.
    pub fn response_mut(&mut self) -> &mut ResponseBuffer<N> {
        &mut self.response
    }

    /// Current success token matching mode.
    pub fn token_match(&self) -> TokenMatch {
        self.token_match
    }

    /// Change the success token matching mode.
    pub fn set_token_match(&mut self, token_match: TokenMatch) {
        self.token_match = token_match;
    }

    /// Borrow the serial port.
    pub fn serial(&self) -> &S {
        &self.serial
    }

    /// Mutably borrow the serial port.
    pub fn serial_mut(&mut self) -> &mut S {
        &mut self.serial
    }

    /// Mutably borrow the clock.
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Give back the port and the clock.
    pub fn release(self) -> (S, C) {
        (self.serial, self.clock)
    }

    fn token_seen(&self) -> bool {
        match self.token_match {
            TokenMatch::Substring => self.response.contains(SUCCESS_TOKEN.as_bytes()),
            TokenMatch::Line => self.response.contains_line(SUCCESS_TOKEN),
        }
    }
}
