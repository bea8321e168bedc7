use heapless::Vec;

use crate::serial::Serial;

/// Default capacity of the response accumulator, in bytes.
pub const RESPONSE_CAPACITY: usize = 200;

/// Bounded accumulator for modem responses.
///
/// Bytes drained from the serial port are appended until the buffer is full.
/// The overflow policy is **lossy**: when one more byte would not fit, the
/// whole buffer is cleared first and the byte starts a fresh response. Any
/// token that straddled the reset is lost. This keeps memory fixed and the
/// driver moving; callers that need long responses must size `N` for them.
#[derive(Debug)]
pub struct ResponseBuffer<const N: usize = RESPONSE_CAPACITY> {
    bytes: Vec<u8, N>,
    overflows: u32,
}

impl<const N: usize> Default for ResponseBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> ResponseBuffer<N> {
    /// Create an empty accumulator.
    pub const fn new() -> Self {
        Self {
            bytes: Vec::new(),
            overflows: 0,
        }
    }

    /// Move every byte the port has ready into the buffer.
    ///
    /// Never waits: the call ends as soon as the port reports nothing
    /// pending. A read error also ends the drain. Returns the number of bytes
    /// moved.
    pub fn drain<S: Serial>(&mut self, serial: &mut S) -> usize {
        let mut moved = 0;
        loop {
            match serial.available() {
                Ok(0) => break,
                Ok(_) => {}
                Err(_) => {
                    warn!("serial availability check failed");
                    break;
                }
            }
            match serial.read_byte() {
                Ok(Some(byte)) => {
                    self.push(byte);
                    moved += 1;
                }
                Ok(None) => break,
                Err(_) => {
                    warn!("serial read failed");
                    break;
                }
            }
        }
        moved
    }

    /// Append one byte, resetting the buffer first if it is full.
    pub fn push(&mut self, byte: u8) {
        if self.bytes.push(byte).is_err() {
            self.overflows = self.overflows.wrapping_add(1);
            debug!("response buffer full ({} bytes), resetting", N);
            self.clear();
            // Capacity is non-zero whenever the first push failed on a full buffer.
            let _ = self.bytes.push(byte);
        }
    }

    /// Drop everything accumulated so far.
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Raw accumulated bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Accumulated text up to the first invalid UTF-8 sequence.
    pub fn as_str(&self) -> &str {
        utf8_prefix(&self.bytes)
    }

    /// Number of accumulated bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether nothing has been accumulated.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Fixed capacity `N`.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// How many times the buffer was reset because it ran full.
    pub fn overflows(&self) -> u32 {
        self.overflows
    }

    /// Whether `token` occurs anywhere in the buffer.
    pub fn contains(&self, token: &[u8]) -> bool {
        find_slice(&self.bytes, token).is_some()
    }

    /// Whether some complete line equals `token` once trimmed.
    ///
    /// Only lines followed by a terminator are considered, so a line that is
    /// still arriving never matches.
    pub fn contains_line(&self, token: &str) -> bool {
        complete_lines(self.as_str()).any(|line| line.trim() == token)
    }

    /// First complete line that starts with `prefix`, trimmed.
    pub fn find_line(&self, prefix: &str) -> Option<&str> {
        complete_lines(self.as_str())
            .map(str::trim)
            .find(|line| line.starts_with(prefix))
    }
}

/// Lines of `text` that are followed by a `\n`.
fn complete_lines(text: &str) -> impl Iterator<Item = &str> {
    let end = text.rfind('\n').map_or(0, |pos| pos + 1);
    text[..end].split_terminator('\n')
}

/// Longest valid UTF-8 prefix of `bytes`.
pub(crate) fn utf8_prefix(bytes: &[u8]) -> &str {
    match core::str::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => core::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or_default(),
    }
}

/// Finds the first occurrence of a slice in another slice and returns its starting position.
pub(crate) fn find_slice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
