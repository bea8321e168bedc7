//! HTTP over the SIM7600 `AT+HTTP*` service.
//!
//! The modem runs the HTTP client itself; the host only configures it,
//! triggers an action and reads the body back through AT commands:
//!
//! ```text
//! AT+HTTPINIT
//! AT+HTTPPARA="CID",1
//! AT+HTTPPARA="URL","http://host/path"
//! [AT+HTTPPARA="CONTENT","application/json"]   POST only
//! [AT+HTTPDATA=<len>,10000 ... DOWNLOAD ... <body>]  POST only
//! AT+HTTPACTION=0|1
//!                 ◀── +HTTPACTION: <method>,<status>,<len>
//! AT+HTTPREAD=<len>
//!                 ◀── +HTTPREAD: DATA,<len>
//!                 ◀── <body lines>
//!                 ◀── OK
//! AT+HTTPTERM
//! ```
//!
//! [`HttpSession`] drives one exchange through these steps. It is normally
//! used through [`Modem::http_get`](crate::Modem::http_get) and
//! [`Modem::http_post`](crate::Modem::http_post).

/// `AT+HTTP*` command text and completion marker parsing.
pub mod command;

mod session;

pub use command::{Completion, Method, parse_completion};
pub use session::{BODY_CAPACITY, HttpResponse, HttpSession, HttpSessionState, ReadEnd};

/// Capacity of a JSON request body built by
/// [`Modem::http_post_json`](crate::Modem::http_post_json).
pub const PAYLOAD_CAPACITY: usize = 1024;
