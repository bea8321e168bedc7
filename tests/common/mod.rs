//! Scripted modem and virtual clock shared by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;

use embedded_hal::delay::DelayNs;
use libmodem::serial::{Clock, Instant, Serial};

/// One scripted reaction to a written command line.
struct Rule {
    trigger: String,
    response: Vec<u8>,
    uses: Option<usize>,
}

/// Mock serial port that answers written lines from a script.
///
/// Every line written (terminator stripped) is recorded. When a line starts
/// with the trigger of a rule, the rule's response is queued for reading.
/// Rules are tried in order; a rule added with [`MockModem::once`] is used up
/// after one match.
#[derive(Default)]
pub struct MockModem {
    rx: VecDeque<u8>,
    pending: Vec<u8>,
    rules: Vec<Rule>,
    pub lines: Vec<String>,
    pub fail_writes: bool,
}

impl MockModem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every line starting with `trigger` with `response`.
    pub fn on(mut self, trigger: &str, response: &str) -> Self {
        self.rules.push(Rule {
            trigger: trigger.to_string(),
            response: response.as_bytes().to_vec(),
            uses: None,
        });
        self
    }

    /// Answer the next line starting with `trigger` with `response`.
    pub fn once(mut self, trigger: &str, response: &str) -> Self {
        self.rules.push(Rule {
            trigger: trigger.to_string(),
            response: response.as_bytes().to_vec(),
            uses: Some(1),
        });
        self
    }

    /// Queue bytes for reading right away.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes);
    }

    /// Number of written lines equal to `line`.
    pub fn count(&self, line: &str) -> usize {
        self.lines.iter().filter(|l| l.as_str() == line).count()
    }

    /// Position of the first written line equal to `line`.
    pub fn position(&self, line: &str) -> Option<usize> {
        self.lines.iter().position(|l| l.as_str() == line)
    }

    fn respond(&mut self, line: &str) {
        let rule = self.rules.iter_mut().find(|rule| {
            line.starts_with(rule.trigger.as_str()) && rule.uses.is_none_or(|uses| uses > 0)
        });
        if let Some(rule) = rule {
            if let Some(uses) = rule.uses.as_mut() {
                *uses -= 1;
            }
            self.rx.extend(rule.response.iter().copied());
        }
    }
}

impl Serial for MockModem {
    type Error = ();

    fn available(&mut self) -> Result<usize, Self::Error> {
        Ok(self.rx.len())
    }

    fn read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        Ok(self.rx.pop_front())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        if self.fail_writes {
            return Err(());
        }
        self.pending.extend_from_slice(bytes);
        while let Some(end) = self.pending.windows(2).position(|w| w == b"\r\n") {
            let line: Vec<u8> = self.pending.drain(..end + 2).take(end).collect();
            let line = String::from_utf8_lossy(&line).into_owned();
            self.respond(&line);
            self.lines.push(line);
        }
        Ok(())
    }
}

/// Virtual millisecond clock. Only pauses move time forward.
#[derive(Debug, Default)]
pub struct MockClock {
    nanos: u64,
}

impl MockClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn millis(&self) -> u64 {
        self.nanos / 1_000_000
    }
}

impl DelayNs for MockClock {
    fn delay_ns(&mut self, ns: u32) {
        self.nanos += u64::from(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.nanos += u64::from(ms) * 1_000_000;
    }
}

impl Clock for MockClock {
    fn now(&mut self) -> Instant {
        Instant::from_ticks(self.millis())
    }
}
