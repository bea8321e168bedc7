//! Common error types for modem operations

/// A common error type for modem operations.
///
/// Most failures on the wire are absorbed by the driver so it keeps running
/// against a slow or unresponsive modem. The variants below are what remains
/// at the decision points where a caller has to be told something went wrong.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// Every attempt of a command elapsed without the success token.
    CommandTimeout,
    /// The HTTP action finished without reporting a positive content length,
    /// or never reported completion at all.
    NoContentLength,
    /// The body read window elapsed before the body was complete.
    IncompleteBody,
    /// A response field could not be located or parsed.
    MalformedField,
    /// A command did not fit into the fixed command buffer.
    CommandTooLong,
    /// A payload could not be serialized into the request buffer.
    Serialize,
    /// A configuration value is out of range.
    InvalidConfig,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let text = match self {
            Error::CommandTimeout => "command timed out",
            Error::NoContentLength => "no content",
            Error::IncompleteBody => "incomplete body",
            Error::MalformedField => "malformed response field",
            Error::CommandTooLong => "command too long",
            Error::Serialize => "payload serialization failed",
            Error::InvalidConfig => "invalid configuration",
        };
        f.write_str(text)
    }
}

impl core::error::Error for Error {}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::CommandTimeout => defmt::write!(f, "CommandTimeout"),
            Error::NoContentLength => defmt::write!(f, "NoContentLength"),
            Error::IncompleteBody => defmt::write!(f, "IncompleteBody"),
            Error::MalformedField => defmt::write!(f, "MalformedField"),
            Error::CommandTooLong => defmt::write!(f, "CommandTooLong"),
            Error::Serialize => defmt::write!(f, "Serialize"),
            Error::InvalidConfig => defmt::write!(f, "InvalidConfig"),
        }
    }
}
