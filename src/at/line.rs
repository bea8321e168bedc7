use heapless::Vec;

use crate::serial::Serial;

/// Default capacity of one assembled line, in bytes.
pub const LINE_CAPACITY: usize = 512;

/// A line handed out by [`LineReader::poll`].
///
/// Lines are raw bytes; nothing is dropped for being invalid UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// A `\n`-terminated line with surrounding ASCII whitespace trimmed.
    Complete(&'a [u8]),
    /// One piece of a line longer than the reader, untrimmed except for the
    /// terminator after the last piece. Pieces split at byte boundaries, so
    /// a multibyte character may straddle two of them.
    Chunk(&'a [u8]),
}

impl<'a> Line<'a> {
    /// The line bytes.
    pub fn bytes(&self) -> &'a [u8] {
        match self {
            Line::Complete(bytes) | Line::Chunk(bytes) => bytes,
        }
    }
}

/// Cooperative line assembler over a [`Serial`] port.
///
/// Each [`poll`](Self::poll) consumes only the bytes that are already
/// available and returns as soon as a line is complete or the port runs dry.
/// A partially received line is kept across polls, so callers can interleave
/// polls with deadline checks.
#[derive(Debug)]
pub struct LineReader<const N: usize = LINE_CAPACITY> {
    bytes: Vec<u8, N>,
    carry: Option<u8>,
    ready: bool,
    continued: bool,
}

impl<const N: usize> Default for LineReader<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> LineReader<N> {
    /// Create an empty reader.
    pub const fn new() -> Self {
        Self {
            bytes: Vec::new(),
            carry: None,
            ready: false,
            continued: false,
        }
    }

    /// Forget any partially assembled line.
    pub fn reset(&mut self) {
        self.bytes.clear();
        self.carry = None;
        self.ready = false;
        self.continued = false;
    }

    /// Pull available bytes until a line is complete.
    ///
    /// Returns `None` when the port has nothing more right now. Read errors are
    /// treated the same way.
    pub fn poll<S: Serial>(&mut self, serial: &mut S) -> Option<Line<'_>> {
        if self.ready {
            self.bytes.clear();
            self.ready = false;
        }
        if let Some(byte) = self.carry.take() {
            // Capacity is at least one after the clear above.
            let _ = self.bytes.push(byte);
        }

        loop {
            match serial.available() {
                Ok(0) => return None,
                Ok(_) => {}
                Err(_) => {
                    warn!("serial availability check failed");
                    return None;
                }
            }
            let byte = match serial.read_byte() {
                Ok(Some(byte)) => byte,
                Ok(None) => return None,
                Err(_) => {
                    warn!("serial read failed");
                    return None;
                }
            };

            if byte == b'\n' {
                self.ready = true;
                if core::mem::take(&mut self.continued) {
                    return Some(Line::Chunk(self.bytes.trim_ascii_end()));
                }
                return Some(Line::Complete(self.bytes.trim_ascii()));
            }
            if self.bytes.push(byte).is_err() {
                trace!("line longer than {} bytes, handing out a chunk", N);
                self.carry = Some(byte);
                self.ready = true;
                self.continued = true;
                return Some(Line::Chunk(&self.bytes));
            }
        }
    }
}
