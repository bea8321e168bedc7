//! Parsers for the identity queries.

use heapless::String;

use crate::at::{ERROR_TOKEN, SUCCESS_TOKEN};
use crate::error::Error;

/// Capacity of an identity field (IMEI or subscriber number).
pub const IDENTITY_CAPACITY: usize = 32;

/// An IMEI or subscriber number.
pub type Identity = String<IDENTITY_CAPACITY>;

const SUBSCRIBER_NUMBER_MARKER: &str = "+CNUM:";

const ECHO_PREFIX: &str = "AT";

/// Extract the IMEI from an `AT+GSN` response.
///
/// The modem may echo the command, then prints the serial number on its own
/// line followed by `OK`. The first non-empty line that is neither the echo
/// nor a final result code is taken as is, so module serials that are not
/// purely numeric are returned too.
pub fn parse_imei(response: &str) -> Result<Identity, Error> {
    let imei = response
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(ECHO_PREFIX))
        .find(|line| *line != SUCCESS_TOKEN && *line != ERROR_TOKEN)
        .ok_or(Error::MalformedField)?;
    to_identity(imei)
}

/// Extract the subscriber number from an `AT+CNUM` response.
///
/// ```text
/// +CNUM: "Name","+15551234567",129
/// ```
///
/// The number is the text strictly between the third and fourth quote after
/// the `+CNUM:` marker.
pub fn parse_subscriber_number(response: &str) -> Result<Identity, Error> {
    let start = response
        .find(SUBSCRIBER_NUMBER_MARKER)
        .ok_or(Error::MalformedField)?;
    let mut fields = response[start..].split('"');
    // Segments: marker, name, separator, number, ...
    let number = fields.nth(3).ok_or(Error::MalformedField)?;
    if fields.next().is_none() {
        return Err(Error::MalformedField);
    }
    to_identity(number.trim())
}

fn to_identity(text: &str) -> Result<Identity, Error> {
    let mut identity = Identity::new();
    identity.push_str(text).map_err(|_| Error::MalformedField)?;
    Ok(identity)
}
