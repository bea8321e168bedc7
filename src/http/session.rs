use heapless::Vec;

use super::command::{self, Command, Completion, Method};
use crate::at::{AtClient, Line, LineReader, SUCCESS_TOKEN, find_slice, utf8_prefix};
use crate::config::{CommandBudget, Config};
use crate::error::Error;
use crate::serial::{Clock, Serial};

/// Default capacity of a response body, in bytes.
pub const BODY_CAPACITY: usize = 1024;

const PROMPT_LINE_CAPACITY: usize = 64;

/// Progress of one HTTP exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HttpSessionState {
    /// Nothing sent yet.
    Idle,
    /// `AT+HTTPINIT` issued.
    Initialized,
    /// Context, URL (and for POST content type and body) configured.
    ParametersSet,
    /// `AT+HTTPACTION` issued, waiting for the completion marker.
    ActionPending,
    /// The completion marker arrived with a content length.
    CompletionObserved,
    /// `AT+HTTPREAD` issued, collecting body lines.
    BodyReading,
    /// `AT+HTTPTERM` issued.
    Terminated,
}

/// Why the body read loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadEnd {
    /// The modem closed the read with `OK`.
    OkToken,
    /// The body reached the announced content length.
    LengthReached,
    /// The modem reported `+HTTPREAD: 0`.
    ZeroFrame,
    /// The read window elapsed first.
    WindowElapsed,
    /// The body buffer ran full.
    BufferFull,
}

/// Result of a GET or POST that produced content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse<const B: usize = BODY_CAPACITY> {
    /// HTTP status from the completion marker.
    pub status: u16,
    /// Content length announced by the modem.
    pub content_length: usize,
    /// Body bytes, trimmed. Multi-line bodies are joined without separators.
    pub body: Vec<u8, B>,
    /// How the body read ended.
    pub end: ReadEnd,
}

impl<const B: usize> HttpResponse<B> {
    /// Body text up to the first invalid UTF-8 sequence.
    ///
    /// A body cut by [`ReadEnd::BufferFull`] may end inside a multibyte
    /// character; that character is left out here. Use
    /// [`body_bytes`](Self::body_bytes) for the raw bytes.
    pub fn body(&self) -> &str {
        utf8_prefix(&self.body)
    }

    /// Raw body bytes.
    pub fn body_bytes(&self) -> &[u8] {
        &self.body
    }

    /// Whether the modem delivered the whole body.
    pub fn is_complete(&self) -> bool {
        matches!(self.end, ReadEnd::OkToken | ReadEnd::LengthReached)
    }

    /// Turn a partial body into [`Error::IncompleteBody`].
    pub fn into_complete(self) -> Result<Self, Error> {
        if self.is_complete() {
            Ok(self)
        } else {
            Err(Error::IncompleteBody)
        }
    }
}

/// One HTTP exchange over the modem's `AT+HTTP*` service.
///
/// Every step is bounded by the windows in [`Config`]. A step that times out
/// does not abort the exchange; the session moves on with what it has and
/// decides at two points only: no content length means no body read, and an
/// elapsed read window means a partial body. Once `AT+HTTPINIT` has been
/// sent the session always ends with `AT+HTTPTERM`.
#[derive(Debug)]
pub struct HttpSession<'a, S, C, const N: usize> {
    client: &'a mut AtClient<S, C, N>,
    config: &'a Config,
    state: HttpSessionState,
}

impl<'a, S, C, const N: usize> HttpSession<'a, S, C, N>
where
    S: Serial,
    C: Clock,
{
    /// Start an idle session on `client`.
    pub fn new(client: &'a mut AtClient<S, C, N>, config: &'a Config) -> Self {
        Self {
            client,
            config,
            state: HttpSessionState::Idle,
        }
    }

    /// Current state.
    pub fn state(&self) -> HttpSessionState {
        self.state
    }

    /// Perform an HTTP GET of `url`.
    pub fn get<const B: usize>(&mut self, url: &str) -> Result<HttpResponse<B>, Error> {
        let parameters = Parameters::new(self.config, url)?;
        info!("HTTP GET {}", url);
        self.exchange(Method::Get, &parameters, None)
    }

    /// Perform an HTTP POST of the JSON text `body` to `url`.
    pub fn post<const B: usize>(&mut self, url: &str, body: &str) -> Result<HttpResponse<B>, Error> {
        let parameters = Parameters::new(self.config, url)?;
        let announce = command::data(body.len(), self.config.download_timeout_ms)?;
        info!("HTTP POST {} ({} bytes)", url, body.len());
        self.exchange(Method::Post, &parameters, Some((&announce, body)))
    }

    fn exchange<const B: usize>(
        &mut self,
        method: Method,
        parameters: &Parameters,
        upload: Option<(&Command, &str)>,
    ) -> Result<HttpResponse<B>, Error> {
        self.client.send(command::INIT, self.config.http_init);
        self.transition(HttpSessionState::Initialized);

        self.client.send(&parameters.context_id, self.config.http_parameter);
        self.client.send(&parameters.url, self.config.http_parameter);
        if let Some((announce, body)) = upload {
            self.client.send(command::CONTENT_JSON, self.config.http_parameter);
            self.upload(announce, body);
        }
        self.transition(HttpSessionState::ParametersSet);

        self.client.send(parameters.action(method), self.config.http_action);
        self.transition(HttpSessionState::ActionPending);

        let completion = match self.await_completion() {
            Some(completion) if completion.content_length > 0 => completion,
            _ => {
                warn!("HTTP {:?}: no content", method);
                self.terminate(self.config.http_abort);
                return Err(Error::NoContentLength);
            }
        };
        self.transition(HttpSessionState::CompletionObserved);

        let result = match command::read(completion.content_length) {
            Ok(read) => {
                let (body, end) = self.read_body::<B>(&read, completion, method == Method::Post);
                Ok(HttpResponse {
                    status: completion.status,
                    content_length: completion.content_length,
                    body,
                    end,
                })
            }
            Err(e) => Err(e),
        };

        self.terminate(self.config.http_terminate);
        result
    }

    fn upload(&mut self, announce: &str, body: &str) {
        self.client.write_line(announce);
        if self.await_prompt() {
            self.client.send(body, self.config.http_payload);
        } else {
            warn!("no {} prompt, payload not sent", command::DOWNLOAD_PROMPT);
        }
    }

    fn await_prompt(&mut self) -> bool {
        let mut reader: LineReader<PROMPT_LINE_CAPACITY> = LineReader::new();
        let deadline = self.client.deadline(self.config.prompt_window_ms);
        while !self.client.expired(&deadline) {
            match self.client.read_line(&mut reader) {
                Some(line) if find_slice(line.bytes(), command::DOWNLOAD_PROMPT.as_bytes()).is_some() => return true,
                Some(_) => {}
                None => self.client.relax(),
            }
        }
        false
    }

    fn await_completion(&mut self) -> Option<Completion> {
        let deadline = self.client.deadline(self.config.completion_window_ms);
        while !self.client.expired(&deadline) {
            self.client.drain();
            if let Some(line) = self.client.response().find_line(command::COMPLETION_MARKER) {
                debug!("RX: {}", line);
                return match command::parse_completion(line) {
                    Ok(completion) => Some(completion),
                    Err(_) => {
                        warn!("unparsable completion marker: {}", line);
                        None
                    }
                };
            }
            self.client.pause(self.config.completion_poll_interval_ms);
        }
        warn!(
            "no {} within {} ms",
            command::COMPLETION_MARKER,
            self.config.completion_window_ms
        );
        None
    }

    fn read_body<const B: usize>(
        &mut self,
        read: &str,
        completion: Completion,
        stop_on_zero_frame: bool,
    ) -> (Vec<u8, B>, ReadEnd) {
        self.client.response_mut().clear();
        self.client.write_line(read);
        self.transition(HttpSessionState::BodyReading);

        let mut body: Vec<u8, B> = Vec::new();
        let mut reader: LineReader = LineReader::new();
        let mut framed = false;
        let deadline = self.client.deadline(self.config.read_window_ms);

        let end = loop {
            if self.client.expired(&deadline) {
                break ReadEnd::WindowElapsed;
            }
            let bytes = match self.client.read_line(&mut reader) {
                Some(Line::Complete(line)) => {
                    if line.starts_with(command::READ_MARKER.as_bytes()) {
                        if stop_on_zero_frame && line == command::READ_END_FRAME.as_bytes() {
                            break ReadEnd::ZeroFrame;
                        }
                        framed = true;
                        continue;
                    }
                    if framed && line == SUCCESS_TOKEN.as_bytes() {
                        break ReadEnd::OkToken;
                    }
                    line
                }
                // Pieces of an overlong line are body data, never framing.
                Some(Line::Chunk(chunk)) => chunk,
                None => {
                    self.client.relax();
                    continue;
                }
            };
            if !framed {
                continue;
            }
            if !append(&mut body, bytes) {
                break ReadEnd::BufferFull;
            }
            if body.len() >= completion.content_length {
                break ReadEnd::LengthReached;
            }
        };

        if end == ReadEnd::WindowElapsed {
            warn!(
                "body read window elapsed at {}/{} bytes",
                body.len(),
                completion.content_length
            );
        }
        debug!("body read ended: {:?}", end);

        let mut trimmed: Vec<u8, B> = Vec::new();
        // A trimmed slice of `body` always fits in the same capacity.
        let _ = trimmed.extend_from_slice(body.trim_ascii());
        (trimmed, end)
    }

    fn terminate(&mut self, budget: CommandBudget) {
        if !self.client.send(command::TERMINATE, budget).is_success() {
            warn!("{} not acknowledged", command::TERMINATE);
        }
        self.transition(HttpSessionState::Terminated);
    }

    fn transition(&mut self, state: HttpSessionState) {
        trace!("HTTP session {:?} -> {:?}", self.state, state);
        self.state = state;
    }
}

/// Append as much of `bytes` as fits. Returns `false` once `body` is full.
fn append<const B: usize>(body: &mut Vec<u8, B>, bytes: &[u8]) -> bool {
    for &byte in bytes {
        if body.push(byte).is_err() {
            return false;
        }
    }
    true
}

/// Commands formatted before anything is written, so an overlong URL fails
/// without starting a session.
struct Parameters {
    context_id: Command,
    url: Command,
    get: Command,
    post: Command,
}

impl Parameters {
    fn new(config: &Config, url: &str) -> Result<Self, Error> {
        Ok(Self {
            context_id: command::context_id(config.context_id)?,
            url: command::url(url)?,
            get: command::action(Method::Get)?,
            post: command::action(Method::Post)?,
        })
    }

    fn action(&self, method: Method) -> &str {
        match method {
            Method::Get => &self.get,
            Method::Post => &self.post,
        }
    }
}
