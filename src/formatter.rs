//! Formatting arbitrary errors into JSON error responses.
//!
//! [`ErrorFormatter`] is the terminal stage of request handling: it accepts anything
//! implementing [`ErrorLike`], optionally hands it to a logger hook and produces a
//! [`HttpErrorResponse`] with the body
//!
//! ```json
//! {"status": "fail" | "error", "code": "...", "message": "...", "details"?: ..., "stack"?: "...", "name"?: "..."}
//! ```
//!
//! Missing fields never fail formatting; each one falls back to a default.
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use http::{HeaderMap, Method, StatusCode, Uri};

use crate::config::RunMode;
use crate::handler::HandlerPanic;
use crate::http_error::{ErrorStatus, HttpError, DEFAULT_CODE};
use crate::kind::ErrorKind;
use crate::response::{HttpErrorResponse, ResponseSink};

/// Message used when an error does not carry one.
pub const FALLBACK_MESSAGE: &str = "Internal server error";

const FALLBACK_NAME: &str = "Error";

/// A value that can be rendered as an error response. Every accessor is optional.
pub trait ErrorLike {
    fn status_code(&self) -> Option<u16> {
        None
    }

    fn status(&self) -> Option<Cow<'_, str>> {
        None
    }

    fn message(&self) -> Option<Cow<'_, str>> {
        None
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        None
    }

    fn details(&self) -> Option<Cow<'_, serde_json::Value>> {
        None
    }

    /// Diagnostic trace of the error.
    fn stack(&self) -> Option<String> {
        None
    }

    fn name(&self) -> Option<Cow<'_, str>> {
        None
    }
}

impl ErrorLike for HttpError {
    fn status_code(&self) -> Option<u16> {
        Some(self.status_code)
    }

    fn status(&self) -> Option<Cow<'_, str>> {
        Some(self.status.as_str().into())
    }

    fn message(&self) -> Option<Cow<'_, str>> {
        self.message.as_deref().map(Cow::Borrowed)
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(&*self.code))
    }

    fn details(&self) -> Option<Cow<'_, serde_json::Value>> {
        self.details.as_ref().map(Cow::Borrowed)
    }

    fn stack(&self) -> Option<String> {
        self.stack_trace().map(|bt| format!("{self}\n{bt}"))
    }

    fn name(&self) -> Option<Cow<'_, str>> {
        Some(self.kind().map_or("HttpError", ErrorKind::name).into())
    }
}

impl<T: ErrorLike + ?Sized> ErrorLike for &T {
    fn status_code(&self) -> Option<u16> {
        (**self).status_code()
    }

    fn status(&self) -> Option<Cow<'_, str>> {
        (**self).status()
    }

    fn message(&self) -> Option<Cow<'_, str>> {
        (**self).message()
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        (**self).code()
    }

    fn details(&self) -> Option<Cow<'_, serde_json::Value>> {
        (**self).details()
    }

    fn stack(&self) -> Option<String> {
        (**self).stack()
    }

    fn name(&self) -> Option<Cow<'_, str>> {
        (**self).name()
    }
}

impl ErrorLike for HandlerPanic {
    fn stack(&self) -> Option<String> {
        Some(self.to_string())
    }

    fn name(&self) -> Option<Cow<'_, str>> {
        Some("HandlerPanic".into())
    }
}

impl ErrorLike for anyhow::Error {
    fn status_code(&self) -> Option<u16> {
        self.downcast_ref::<HttpError>().map(HttpError::status_code)
    }

    fn status(&self) -> Option<Cow<'_, str>> {
        self.downcast_ref::<HttpError>().and_then(ErrorLike::status)
    }

    fn message(&self) -> Option<Cow<'_, str>> {
        if let Some(e) = self.downcast_ref::<HttpError>() {
            return ErrorLike::message(e);
        }
        if self.is::<HandlerPanic>() {
            return None;
        }
        Some(self.to_string().into())
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        self.downcast_ref::<HttpError>().and_then(ErrorLike::code)
    }

    fn details(&self) -> Option<Cow<'_, serde_json::Value>> {
        self.downcast_ref::<HttpError>().and_then(ErrorLike::details)
    }

    fn stack(&self) -> Option<String> {
        if let Some(e) = self.downcast_ref::<HttpError>() {
            return e.stack();
        }
        Some(format!("{self:?}"))
    }

    fn name(&self) -> Option<Cow<'_, str>> {
        if let Some(e) = self.downcast_ref::<HttpError>() {
            return ErrorLike::name(e);
        }
        if let Some(e) = self.downcast_ref::<HandlerPanic>() {
            return e.name();
        }
        Some(FALLBACK_NAME.into())
    }
}

/// Boxed standard errors. An underlying [`HttpError`] or [`HandlerPanic`] is read as such;
/// anything else contributes its message and source chain.
impl ErrorLike for dyn StdError + Send + Sync + 'static {
    fn status_code(&self) -> Option<u16> {
        self.downcast_ref::<HttpError>().map(HttpError::status_code)
    }

    fn status(&self) -> Option<Cow<'_, str>> {
        self.downcast_ref::<HttpError>().and_then(ErrorLike::status)
    }

    fn message(&self) -> Option<Cow<'_, str>> {
        if let Some(e) = self.downcast_ref::<HttpError>() {
            return ErrorLike::message(e);
        }
        if self.is::<HandlerPanic>() {
            return None;
        }
        Some(self.to_string().into())
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        self.downcast_ref::<HttpError>().and_then(ErrorLike::code)
    }

    fn details(&self) -> Option<Cow<'_, serde_json::Value>> {
        self.downcast_ref::<HttpError>().and_then(ErrorLike::details)
    }

    fn stack(&self) -> Option<String> {
        if let Some(e) = self.downcast_ref::<HttpError>() {
            return e.stack();
        }
        let mut trace = self.to_string();
        let mut source = self.source();
        while let Some(cause) = source {
            trace.push_str(&format!("\ncaused by: {cause}"));
            source = cause.source();
        }
        Some(trace)
    }

    fn name(&self) -> Option<Cow<'_, str>> {
        if let Some(e) = self.downcast_ref::<HttpError>() {
            return ErrorLike::name(e);
        }
        if let Some(e) = self.downcast_ref::<HandlerPanic>() {
            return e.name();
        }
        Some(FALLBACK_NAME.into())
    }
}

/// Plain JSON values, read the way a loosely-typed error object is: `statusCode`, `status`,
/// `message`, `code`, `details`, `stack` and `name` keys, each optional. Non-object values
/// carry no fields.
impl ErrorLike for serde_json::Value {
    fn status_code(&self) -> Option<u16> {
        self.get("statusCode")
            .and_then(serde_json::Value::as_u64)
            .and_then(|c| u16::try_from(c).ok())
    }

    fn status(&self) -> Option<Cow<'_, str>> {
        json_text(self.get("status"))
    }

    fn message(&self) -> Option<Cow<'_, str>> {
        json_text(self.get("message"))
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        json_text(self.get("code"))
    }

    fn details(&self) -> Option<Cow<'_, serde_json::Value>> {
        self.get("details").map(Cow::Borrowed)
    }

    fn stack(&self) -> Option<String> {
        self.get("stack")
            .and_then(serde_json::Value::as_str)
            .map(String::from)
    }

    fn name(&self) -> Option<Cow<'_, str>> {
        self.get("name")
            .and_then(serde_json::Value::as_str)
            .map(Cow::Borrowed)
    }
}

fn json_text(value: Option<&serde_json::Value>) -> Option<Cow<'_, str>> {
    match value? {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        other => Some(Cow::Owned(other.to_string())),
    }
}

/// Truthiness as a loosely-typed client would judge it: `null`, `false`, `0` and `""` are
/// falsy, everything else (including empty objects and arrays) is truthy.
fn is_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
    }
}

/// Status code the response is emitted with: the error's code if present and non-zero,
/// otherwise 500.
pub fn effective_status_code<E: ErrorLike + ?Sized>(err: &E) -> u16 {
    err.status_code().filter(|&c| c != 0).unwrap_or(500)
}

/// Wire format of an error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: String,
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// The request an error occurred in, as seen by the logger hook.
#[derive(Debug, Clone, Default)]
pub struct RequestInfo {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
}

impl From<&http::request::Parts> for RequestInfo {
    fn from(parts: &http::request::Parts) -> Self {
        Self {
            method: parts.method.clone(),
            uri: parts.uri.clone(),
            headers: parts.headers.clone(),
        }
    }
}

impl<B> From<&http::Request<B>> for RequestInfo {
    fn from(req: &http::Request<B>) -> Self {
        Self {
            method: req.method().clone(),
            uri: req.uri().clone(),
            headers: req.headers().clone(),
        }
    }
}

/// Logger hook invoked with every error before it is formatted.
pub type Logger = Arc<dyn Fn(&dyn ErrorLike, &RequestInfo) + Send + Sync>;

/// Logger hook writing every error to [`tracing`]: `warn` for client failures, `error` for
/// everything else.
pub fn tracing_logger(err: &dyn ErrorLike, req: &RequestInfo) {
    let status_code = effective_status_code(err);
    let code = err.code();
    let code = code.as_deref().unwrap_or(DEFAULT_CODE);
    let message = err.message();
    let message = message.as_deref().unwrap_or(FALLBACK_MESSAGE);

    match ErrorStatus::from_status_code(status_code) {
        ErrorStatus::Fail => tracing::warn!(
            method = %req.method,
            uri = %req.uri,
            status_code,
            code,
            message,
            "request failed"
        ),
        ErrorStatus::Error => tracing::error!(
            method = %req.method,
            uri = %req.uri,
            status_code,
            code,
            message,
            stack = err.stack().as_deref(),
            "request errored"
        ),
    }
}

/// Converts errors into JSON error responses.
///
/// ```rust
/// use http_error_guard::{ErrorFormatter, HttpError, RequestInfo, RunMode};
///
/// let formatter = ErrorFormatter::new().with_run_mode(RunMode::Production);
/// let resp = formatter.format(
///     &HttpError::resource_not_found().with_message("not found"),
///     &RequestInfo::default(),
/// );
/// assert_eq!(resp.status_code(), 404);
/// assert_eq!(
///     resp.body().as_ref(),
///     br#"{"status":"fail","code":"RESOURCE_NOT_FOUND","message":"not found"}"#
/// );
/// ```
#[derive(Clone)]
pub struct ErrorFormatter {
    logger: Option<Logger>,
    run_mode: RunMode,
}

impl fmt::Debug for ErrorFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorFormatter")
            .field("logger", &self.logger.is_some())
            .field("run_mode", &self.run_mode)
            .finish()
    }
}

impl Default for ErrorFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorFormatter {
    /// Creates a formatter without logger, using the process-wide [`RunMode`].
    pub fn new() -> Self {
        Self {
            logger: None,
            run_mode: RunMode::current(),
        }
    }

    /// Sets the logger hook. Panics raised by the hook are swallowed.
    pub fn with_logger<F>(mut self, logger: F) -> Self
    where
        F: Fn(&dyn ErrorLike, &RequestInfo) + Send + Sync + 'static,
    {
        self.logger = Some(Arc::new(logger));
        self
    }

    /// Sets the run mode deciding whether `stack` and `name` are emitted.
    pub fn with_run_mode(mut self, run_mode: RunMode) -> Self {
        self.run_mode = run_mode;
        self
    }

    pub fn run_mode(&self) -> RunMode {
        self.run_mode
    }

    /// Logs the error and builds the response.
    pub fn format<E>(&self, err: &E, req: &RequestInfo) -> HttpErrorResponse
    where
        E: ErrorLike + ?Sized,
    {
        self.log(err, req);

        let status_code = effective_status_code(err);
        let body = self.body(err);
        let status_code =
            StatusCode::from_u16(status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        HttpErrorResponse::json(status_code, body)
    }

    /// Formats the error and emits the response into `sink`.
    pub fn handle<E, S>(&self, err: &E, req: &RequestInfo, sink: &mut S)
    where
        E: ErrorLike + ?Sized,
        S: ResponseSink + ?Sized,
    {
        self.format(err, req).emit(sink);
    }

    /// Builds the response body without logging.
    pub fn body<E>(&self, err: &E) -> ErrorBody
    where
        E: ErrorLike + ?Sized,
    {
        let status_code = effective_status_code(err);
        let status = err
            .status()
            .map(Cow::into_owned)
            .unwrap_or_else(|| ErrorStatus::from_status_code(status_code).to_string());
        let message = err
            .message()
            .map_or_else(|| FALLBACK_MESSAGE.to_owned(), Cow::into_owned);
        let code = err
            .code()
            .map_or_else(|| DEFAULT_CODE.to_owned(), Cow::into_owned);
        let details = err
            .details()
            .filter(|d| is_truthy(d))
            .map(Cow::into_owned);

        let (stack, name) = if self.run_mode.includes_diagnostics() {
            let name = err
                .name()
                .map_or_else(|| FALLBACK_NAME.to_owned(), Cow::into_owned);
            let stack = err
                .stack()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| format!("{name}: {message}"));
            (Some(stack), Some(name))
        } else {
            (None, None)
        };

        ErrorBody {
            status,
            code,
            message,
            details,
            stack,
            name,
        }
    }

    fn log<E>(&self, err: &E, req: &RequestInfo)
    where
        E: ErrorLike + ?Sized,
    {
        let Some(logger) = &self.logger else {
            return;
        };
        let err: &dyn ErrorLike = &err;
        if catch_unwind(AssertUnwindSafe(|| logger(err, req))).is_err() {
            tracing::debug!("error logger panicked, ignoring");
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn parse(resp: &HttpErrorResponse) -> serde_json::Value {
        serde_json::from_slice(resp.body()).unwrap()
    }

    fn production() -> ErrorFormatter {
        ErrorFormatter::new().with_run_mode(RunMode::Production)
    }

    fn development() -> ErrorFormatter {
        ErrorFormatter::new().with_run_mode(RunMode::Development)
    }

    #[test]
    fn format_tagged_error() {
        let err = HttpError::resource_not_found().with_message("not found");
        let resp = production().format(&err, &RequestInfo::default());
        assert_eq!(resp.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(resp.content_type(), &mime::APPLICATION_JSON);
        assert_eq!(
            parse(&resp),
            json!({"status": "fail", "code": "RESOURCE_NOT_FOUND", "message": "not found"})
        );
    }

    #[test]
    fn format_empty_object() {
        let resp = production().format(&json!({}), &RequestInfo::default());
        assert_eq!(resp.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            parse(&resp),
            json!({"status": "error", "code": "ERROR", "message": "Internal server error"})
        );
    }

    #[test]
    fn format_non_object_value() {
        let resp = production().format(&json!("oops"), &RequestInfo::default());
        assert_eq!(resp.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(parse(&resp)["code"], "ERROR");
    }

    #[test]
    fn format_partial_object() {
        let err = json!({"statusCode": 422, "message": ""});
        let resp = production().format(&err, &RequestInfo::default());
        assert_eq!(resp.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            parse(&resp),
            json!({"status": "fail", "code": "ERROR", "message": ""})
        );
    }

    #[test]
    fn format_zero_status_code_falls_back() {
        let err = json!({"statusCode": 0, "code": ""});
        let body = production().body(&err);
        assert_eq!(effective_status_code(&err), 500);
        assert_eq!(body.status, "error");
        assert_eq!(body.code, "");
    }

    #[test]
    fn format_explicit_status_wins() {
        let err = json!({"statusCode": 404, "status": "custom"});
        assert_eq!(production().body(&err).status, "custom");
    }

    #[test]
    fn format_unrepresentable_status_code() {
        let err = HttpError::new_in(RunMode::Production, 40000, "HUGE", None, None);
        let resp = production().format(&err, &RequestInfo::default());
        assert_eq!(resp.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(parse(&resp)["status"], "error");
    }

    #[test]
    fn format_details() {
        let err = HttpError::validation_error().with_details(json!({"field": "email"}));
        let body = production().body(&err);
        assert_eq!(body.details, Some(json!({"field": "email"})));

        let err = HttpError::validation_error().with_details(serde_json::Value::Null);
        let resp = production().format(&err, &RequestInfo::default());
        assert!(parse(&resp).get("details").is_none());

        let err = HttpError::validation_error();
        let resp = production().format(&err, &RequestInfo::default());
        assert!(parse(&resp).get("details").is_none());
    }

    #[test]
    fn format_falsy_details_omitted() {
        for details in [json!(null), json!(false), json!(0), json!("")] {
            let err = json!({ "details": details });
            assert_eq!(production().body(&err).details, None);
        }
        for details in [json!({}), json!([]), json!(1), json!("x")] {
            let err = json!({ "details": details.clone() });
            assert_eq!(production().body(&err).details, Some(details));
        }
    }

    #[test]
    fn format_stack_outside_production() {
        let err = HttpError::new_in(RunMode::Development, 400, "BAD", None, None);
        let body = development().body(&err);
        assert!(body.stack.is_some_and(|s| !s.is_empty()));
        assert_eq!(body.name.as_deref(), Some("HttpError"));

        let body = production().body(&err);
        assert!(body.stack.is_none());
        assert!(body.name.is_none());
    }

    #[test]
    fn format_stack_starts_at_caller() {
        let err = HttpError::new_in(RunMode::Development, 400, "BAD", None, None);
        let stack = development().body(&err).stack.unwrap();
        assert!(stack.starts_with("BAD (400)\n"));
        assert!(!stack.contains("http_error_guard::http_error::HttpError::new_in"));
        assert!(!stack.contains("Backtrace::force_capture"));

        let err = ErrorKind::BadRequest.error_in(RunMode::Development, None, None);
        let stack = ErrorLike::stack(&err).unwrap();
        assert!(!stack.contains("http_error_guard::http_error::HttpError::new_in"));
        assert!(!stack.contains("http_error_guard::kind::ErrorKind::error_in"));
    }

    #[test]
    fn format_stack_fallback_without_trace() {
        let body = development().body(&json!({}));
        assert_eq!(body.stack.as_deref(), Some("Error: Internal server error"));

        let err = HttpError::new_in(RunMode::Production, 404, "RESOURCE_NOT_FOUND", None, None);
        let body = development().body(&err);
        assert!(body.stack.is_some_and(|s| !s.is_empty()));
    }

    #[test]
    fn format_kind_name() {
        let err = ErrorKind::ConflictError.error_in(RunMode::Development, None, None);
        assert_eq!(
            development().body(&err).name.as_deref(),
            Some("ConflictError")
        );
    }

    #[test]
    fn format_anyhow_error() {
        let err = anyhow::anyhow!("database unreachable");
        let resp = production().format(&err, &RequestInfo::default());
        assert_eq!(resp.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            parse(&resp),
            json!({"status": "error", "code": "ERROR", "message": "database unreachable"})
        );
    }

    #[test]
    fn format_anyhow_wrapping_http_error() {
        let err: anyhow::Error = HttpError::authentication_error().into();
        let resp = production().format(&err, &RequestInfo::default());
        assert_eq!(resp.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            parse(&resp),
            json!({
                "status": "fail",
                "code": "AUTHENTICATION_ERROR",
                "message": "Authentication required"
            })
        );
    }

    #[test]
    fn format_handler_panic() {
        let err: anyhow::Error = HandlerPanic::new("boom").into();
        let body = development().body(&err);
        assert_eq!(body.message, FALLBACK_MESSAGE);
        assert_eq!(body.name.as_deref(), Some("HandlerPanic"));
        assert!(body.stack.is_some_and(|s| s.contains("boom")));
    }

    #[test]
    fn format_trait_object() {
        let err = HttpError::conflict_error();
        let err: &dyn ErrorLike = &err;
        let resp = production().format(err, &RequestInfo::default());
        assert_eq!(resp.status_code(), StatusCode::CONFLICT);

        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let formatter = production().with_logger(move |err, _| {
            assert_eq!(err.status_code(), Some(409));
            seen.fetch_add(1, Ordering::SeqCst);
        });
        let mut sink = http::Response::new(bytes::Bytes::new());
        formatter.handle(err, &RequestInfo::default(), &mut sink);
        assert_eq!(sink.status(), StatusCode::CONFLICT);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn format_boxed_std_error() {
        let err: Box<dyn StdError + Send + Sync> = Box::new(HttpError::resource_not_found());
        let resp = production().format(&*err, &RequestInfo::default());
        assert_eq!(resp.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            parse(&resp),
            json!({"status": "fail", "code": "RESOURCE_NOT_FOUND", "message": "Resource not found"})
        );

        let err: Box<dyn StdError + Send + Sync> = Box::new(fmt::Error);
        let resp = production().format(&*err, &RequestInfo::default());
        assert_eq!(resp.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            parse(&resp),
            json!({"status": "error", "code": "ERROR", "message": fmt::Error.to_string()})
        );

        let body = development().body(&*err);
        assert_eq!(body.name.as_deref(), Some("Error"));
        assert_eq!(body.stack, Some(fmt::Error.to_string()));
    }

    #[test]
    fn format_calls_logger() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let formatter = production().with_logger(move |err, req| {
            assert_eq!(err.code().as_deref(), Some("RATE_LIMIT_EXCEEDED"));
            assert_eq!(req.uri.path(), "/limited");
            seen.fetch_add(1, Ordering::SeqCst);
        });
        let req = RequestInfo {
            uri: Uri::from_static("/limited"),
            ..Default::default()
        };
        let resp = formatter.format(&HttpError::rate_limit_error(), &req);
        assert_eq!(resp.status_code(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn format_survives_panicking_logger() {
        let formatter = production().with_logger(|_, _| panic!("logger failure"));
        let err = HttpError::resource_not_found().with_message("not found");
        let resp = formatter.format(&err, &RequestInfo::default());
        assert_eq!(resp.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            parse(&resp),
            json!({"status": "fail", "code": "RESOURCE_NOT_FOUND", "message": "not found"})
        );
    }

    #[test]
    fn format_with_tracing_logger() {
        let formatter = production().with_logger(tracing_logger);
        let resp = formatter.format(&HttpError::internal_error(), &RequestInfo::default());
        assert_eq!(resp.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn handle_emits_into_sink() {
        let mut sink = http::Response::new(bytes::Bytes::new());
        production().handle(&HttpError::bad_request(), &RequestInfo::default(), &mut sink);
        assert_eq!(sink.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            serde_json::from_slice::<serde_json::Value>(sink.body()).unwrap(),
            json!({"status": "fail", "code": "BAD_REQUEST", "message": "Bad Request"})
        );
    }

    #[test]
    fn request_info_from_request() {
        let req = http::Request::builder()
            .method(Method::POST)
            .uri("/users")
            .header("x-request-id", "abc")
            .body(())
            .unwrap();
        let info = RequestInfo::from(&req);
        assert_eq!(info.method, Method::POST);
        assert_eq!(info.uri.path(), "/users");
        assert_eq!(info.headers.get("x-request-id").unwrap(), "abc");
    }
}
