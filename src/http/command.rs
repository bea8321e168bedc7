//! `AT+HTTP*` vocabulary.
//!
//! Command text is reproduced bit-exact from the SIM7600 AT manual. Commands
//! with arguments are formatted into a fixed [`Command`] buffer; anything that
//! does not fit is rejected with [`Error::CommandTooLong`].

use core::fmt::Write;
use heapless::String;

use crate::error::Error;

/// Capacity of one formatted command line (without terminator).
pub const COMMAND_CAPACITY: usize = 256;

/// A formatted command line.
pub type Command = String<COMMAND_CAPACITY>;

/// Start the HTTP service.
pub const INIT: &str = "AT+HTTPINIT";
/// Stop the HTTP service.
pub const TERMINATE: &str = "AT+HTTPTERM";
/// Declare a JSON request body.
pub const CONTENT_JSON: &str = "AT+HTTPPARA=\"CONTENT\",\"application/json\"";

/// Prefix of the unsolicited line reporting that an action finished.
pub const COMPLETION_MARKER: &str = "+HTTPACTION:";
/// Prefix of the framing lines around body data.
pub const READ_MARKER: &str = "+HTTPREAD:";
/// Framing line reporting that no (more) body data is available.
pub const READ_END_FRAME: &str = "+HTTPREAD: 0";
/// Prompt after which the modem accepts the raw request body.
pub const DOWNLOAD_PROMPT: &str = "DOWNLOAD";

/// HTTP method, encoded as the `AT+HTTPACTION` argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Method {
    /// `AT+HTTPACTION=0`
    Get = 0,
    /// `AT+HTTPACTION=1`
    Post = 1,
}

/// `AT+HTTPPARA="CID",<cid>`
pub fn context_id(cid: u8) -> Result<Command, Error> {
    format(format_args!("AT+HTTPPARA=\"CID\",{}", cid))
}

/// `AT+HTTPPARA="URL","<url>"`
pub fn url(url: &str) -> Result<Command, Error> {
    format(format_args!("AT+HTTPPARA=\"URL\",\"{}\"", url))
}

/// `AT+HTTPDATA=<len>,<timeout_ms>`
pub fn data(len: usize, timeout_ms: u32) -> Result<Command, Error> {
    format(format_args!("AT+HTTPDATA={},{}", len, timeout_ms))
}

/// `AT+HTTPACTION=<method>`
pub fn action(method: Method) -> Result<Command, Error> {
    format(format_args!("AT+HTTPACTION={}", method as u8))
}

/// `AT+HTTPREAD=<len>`
pub fn read(len: usize) -> Result<Command, Error> {
    format(format_args!("AT+HTTPREAD={}", len))
}

fn format(args: core::fmt::Arguments<'_>) -> Result<Command, Error> {
    let mut command = Command::new();
    command.write_fmt(args).map_err(|_| Error::CommandTooLong)?;
    Ok(command)
}

/// Outcome of an HTTP action, from the completion marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Completion {
    /// HTTP status code, `0` if the modem did not report one.
    pub status: u16,
    /// Body length announced by the modem, `0` if unparsable.
    pub content_length: usize,
}

/// Parse a completion marker line.
///
/// The SIM7600 reports `+HTTPACTION: <method>,<status>,<length>`; shorter
/// forms `+HTTPACTION: <status>,<length>` are accepted too. The content
/// length is always the last comma-separated field and the status the one
/// before it. Fewer than two fields is [`Error::MalformedField`]. Fields that
/// are present but not numeric read as `0`.
pub fn parse_completion(line: &str) -> Result<Completion, Error> {
    let start = line
        .find(COMPLETION_MARKER)
        .ok_or(Error::MalformedField)?;
    let fields = line[start + COMPLETION_MARKER.len()..].trim();

    let (rest, length) = fields.rsplit_once(',').ok_or(Error::MalformedField)?;
    let status = rest.rsplit(',').next().unwrap_or_default();

    Ok(Completion {
        status: status.trim().parse().unwrap_or(0),
        content_length: length.trim().parse().unwrap_or(0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_are_bit_exact() {
        assert_eq!(context_id(1).unwrap().as_str(), "AT+HTTPPARA=\"CID\",1");
        assert_eq!(
            url("http://example.com/a?b=c").unwrap().as_str(),
            "AT+HTTPPARA=\"URL\",\"http://example.com/a?b=c\""
        );
        assert_eq!(data(17, 10_000).unwrap().as_str(), "AT+HTTPDATA=17,10000");
        assert_eq!(action(Method::Get).unwrap().as_str(), "AT+HTTPACTION=0");
        assert_eq!(action(Method::Post).unwrap().as_str(), "AT+HTTPACTION=1");
        assert_eq!(read(11).unwrap().as_str(), "AT+HTTPREAD=11");
    }

    #[test]
    fn overlong_url_is_rejected() {
        let long = [b'a'; COMMAND_CAPACITY];
        let long = core::str::from_utf8(&long).unwrap();
        assert_eq!(url(long), Err(Error::CommandTooLong));
    }

    #[test]
    fn completion_with_two_fields() {
        let completion = parse_completion("+HTTPACTION: 0,123").unwrap();
        assert_eq!(completion.content_length, 123);
    }

    #[test]
    fn completion_with_three_fields() {
        let completion = parse_completion("+HTTPACTION: 0,200,11").unwrap();
        assert_eq!(
            completion,
            Completion {
                status: 200,
                content_length: 11
            }
        );
    }

    #[test]
    fn completion_without_length_is_malformed() {
        assert_eq!(parse_completion("+HTTPACTION: 0"), Err(Error::MalformedField));
        assert_eq!(parse_completion("+HTTPREAD: 0,1"), Err(Error::MalformedField));
    }

    #[test]
    fn non_numeric_length_reads_as_zero() {
        let completion = parse_completion("+HTTPACTION: 0,404,abc").unwrap();
        assert_eq!(completion.status, 404);
        assert_eq!(completion.content_length, 0);
    }
}
