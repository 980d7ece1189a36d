use core::fmt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::backtrace::Backtrace;
use std::borrow::Cow;
use std::error::Error as StdError;

use http::StatusCode;

use crate::config::RunMode;
use crate::kind::ErrorKind;

/// Code used when an error does not carry one.
pub const DEFAULT_CODE: &str = "ERROR";

// Leading frames matching these are part of capturing the trace, not of the caller.
const CAPTURE_FRAME_PREFIXES: &[&str] = &[
    "std::",
    "core::",
    "alloc::",
    "<std::",
    "<core::",
    "<alloc::",
    "http_error_guard::http_error::HttpError::",
    "<http_error_guard::http_error::HttpError as ",
    "http_error_guard::kind::",
];

/// Client-side (`fail`) or server-side (`error`) classification of an [`HttpError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorStatus {
    Fail,
    Error,
}

impl ErrorStatus {
    /// Classifies a raw status code: `fail` for `[400, 500)`, `error` for anything else.
    pub const fn from_status_code(status_code: u16) -> Self {
        if status_code >= 400 && status_code < 500 {
            Self::Fail
        } else {
            Self::Error
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fail => "fail",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for ErrorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// [`HttpError`] is a tagged error carrying an HTTP status code, a machine-readable code, a
/// human-readable message and optional structured details.
///
/// The classification ([`ErrorStatus`]) is derived from the status code once, at construction.
/// Outside [`RunMode::Production`] a backtrace is captured at construction as well.
///
/// ```rust
/// use http_error_guard::{ErrorStatus, HttpError};
///
/// let err = HttpError::resource_not_found().with_message("user 42 not found");
/// assert_eq!(err.status_code(), 404);
/// assert_eq!(err.code(), "RESOURCE_NOT_FOUND");
/// assert_eq!(err.status(), ErrorStatus::Fail);
/// ```
#[derive(Debug)]
pub struct HttpError {
    pub(crate) status_code: u16,
    pub(crate) code: Cow<'static, str>,
    pub(crate) status: ErrorStatus,
    pub(crate) message: Option<Cow<'static, str>>,
    pub(crate) details: Option<serde_json::Value>,
    pub(crate) is_operational: bool,
    pub(crate) source: Option<anyhow::Error>,
    pub(crate) backtrace: Option<Backtrace>,
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code, self.status_code)?;
        if let Some(m) = &self.message {
            write!(f, ": {m}")?;
        }
        if let Some(s) = &self.source {
            write!(f, ", source: {s}")?;
        }
        Ok(())
    }
}

impl Default for HttpError {
    fn default() -> Self {
        Self::new(500, DEFAULT_CODE, None, None)
    }
}

impl PartialEq for HttpError {
    fn eq(&self, other: &Self) -> bool {
        self.status_code == other.status_code
            && self.code == other.code
            && self.message == other.message
            && self.details == other.details
    }
}

impl StdError for HttpError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| &**e as &(dyn StdError + 'static))
    }
}

impl HttpError {
    /// Creates an operational [`HttpError`] using the process-wide [`RunMode`]. Any status code
    /// is accepted as-is.
    pub fn new(
        status_code: u16,
        code: impl Into<Cow<'static, str>>,
        message: Option<Cow<'static, str>>,
        details: Option<serde_json::Value>,
    ) -> Self {
        Self::new_in(RunMode::current(), status_code, code, message, details)
    }

    /// Creates an operational [`HttpError`] using an explicit [`RunMode`].
    pub fn new_in(
        mode: RunMode,
        status_code: u16,
        code: impl Into<Cow<'static, str>>,
        message: Option<Cow<'static, str>>,
        details: Option<serde_json::Value>,
    ) -> Self {
        Self {
            status_code,
            code: code.into(),
            status: ErrorStatus::from_status_code(status_code),
            message,
            details,
            is_operational: true,
            source: None,
            backtrace: mode
                .includes_diagnostics()
                .then(Backtrace::force_capture),
        }
    }

    /// Creates a [`HttpError`] from a generic error. An underlying [`HttpError`] is returned
    /// unchanged; anything else becomes a non-operational internal error keeping the original as
    /// source.
    pub fn from_err<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        let err = err.into();
        match err.downcast::<HttpError>() {
            Ok(http_error) => http_error,
            Err(err) => {
                let mut http_error = ErrorKind::InternalError.error(None, None);
                http_error.is_operational = false;
                http_error.source = Some(err);
                http_error
            }
        }
    }

    /// Sets the message. An empty message is kept as is.
    pub fn with_message<S: Into<Cow<'static, str>>>(mut self, message: S) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the details passed through to the response body.
    ///
    /// ```rust
    /// use http_error_guard::HttpError;
    /// use serde_json::json;
    ///
    /// let err = HttpError::validation_error().with_details(json!({ "field": "email" }));
    /// assert_eq!(err.detail::<String>("field"), Some("email".into()));
    /// ```
    pub fn with_details<V: Into<serde_json::Value>>(mut self, details: V) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Serializes any value into the details.
    pub fn try_with_details<V: Serialize>(mut self, details: &V) -> serde_json::Result<Self> {
        self.details = Some(serde_json::to_value(details)?);
        Ok(self)
    }

    /// Set the source error from a generic error.
    pub fn with_source_err<E>(mut self, err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        self.source = Some(err.into());
        self
    }

    /// Returns the raw status code.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Returns the status code as [`StatusCode`], falling back to 500 if the raw code is not a
    /// valid HTTP status.
    pub fn http_status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn status(&self) -> ErrorStatus {
        self.status
    }

    /// Returns the message if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn details(&self) -> Option<&serde_json::Value> {
        self.details.as_ref()
    }

    /// Retrieves a single field of object-shaped details.
    pub fn detail<V>(&self, key: impl AsRef<str>) -> Option<V>
    where
        V: DeserializeOwned,
    {
        self.details
            .as_ref()
            .and_then(|d| d.get(key.as_ref()))
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// `false` only for errors converted from arbitrary failures via [`HttpError::from_err`].
    pub fn is_operational(&self) -> bool {
        self.is_operational
    }

    /// Returns the source error if any.
    pub fn source_err(&self) -> Option<&anyhow::Error> {
        self.source.as_ref()
    }

    /// Returns the backtrace captured at construction, absent in production.
    pub fn backtrace(&self) -> Option<&Backtrace> {
        self.backtrace.as_ref()
    }

    /// Renders the backtrace starting at the first frame outside this crate's constructors and
    /// the standard library. `None` in production.
    pub fn stack_trace(&self) -> Option<String> {
        self.backtrace
            .as_ref()
            .map(|bt| trim_capture_frames(&bt.to_string()))
    }

    /// Returns the category this error was built from, if the status and code match one.
    pub fn kind(&self) -> Option<ErrorKind> {
        ErrorKind::ALL
            .into_iter()
            .find(|k| k.status_code() == self.status_code && k.code() == self.code)
    }
}

impl From<anyhow::Error> for HttpError {
    fn from(err: anyhow::Error) -> Self {
        HttpError::from_err(err)
    }
}

/// Symbol of a rendered backtrace frame header such as `  12: crate::module::function`.
fn frame_symbol(line: &str) -> Option<&str> {
    let (index, symbol) = line.trim_start().split_once(": ")?;
    (!index.is_empty() && index.bytes().all(|b| b.is_ascii_digit())).then(|| symbol.trim())
}

fn is_capture_frame(symbol: &str) -> bool {
    !symbol.contains("::tests::")
        && CAPTURE_FRAME_PREFIXES
            .iter()
            .any(|prefix| symbol.starts_with(prefix))
}

/// Drops the leading capture frames (with their `at` lines) and renumbers the rest. The
/// rendering is returned untouched when no frame would remain.
fn trim_capture_frames(rendered: &str) -> String {
    let mut out = Vec::new();
    let mut leading = true;
    let mut keep = true;
    let mut index = 0;
    for line in rendered.lines() {
        match frame_symbol(line) {
            Some(symbol) => {
                leading = leading && is_capture_frame(symbol);
                keep = !leading;
                if keep {
                    out.push(format!("{index:4}: {symbol}"));
                    index += 1;
                }
            }
            None if keep => out.push(line.to_owned()),
            None => {}
        }
    }
    if index == 0 {
        return rendered.trim_end().to_owned();
    }
    out.join("\n")
}

#[cfg(feature = "axum")]
#[cfg_attr(docsrs, doc(cfg(feature = "axum")))]
impl axum::response::IntoResponse for HttpError {
    fn into_response(self) -> axum::response::Response {
        let resp = crate::formatter::ErrorFormatter::new()
            .format(&self, &crate::formatter::RequestInfo::default());
        axum::response::IntoResponse::into_response(resp)
    }
}
