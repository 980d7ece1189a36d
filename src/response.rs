//! Error responses emitted by the [`ErrorFormatter`](crate::ErrorFormatter).
use bytes::BufMut;
use bytes::Bytes;
use bytes::BytesMut;
use http::{header, HeaderValue, StatusCode};
use serde::Serialize;

/// Type representing a formatted error response.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpErrorResponse {
    pub(crate) status_code: StatusCode,
    pub(crate) body: Bytes,
    pub(crate) content_type: mime::Mime,
}

impl HttpErrorResponse {
    /// Constructs a plain text error response.
    pub fn plain(status_code: StatusCode, body: impl Into<Bytes>) -> Self {
        HttpErrorResponse {
            status_code,
            body: body.into(),
            content_type: mime::TEXT_PLAIN,
        }
    }

    /// Constructs a Json error response. Falls back to a plain text body if `body` cannot be
    /// serialized.
    pub fn json(status_code: StatusCode, body: impl Serialize) -> Self {
        let mut buf = BytesMut::with_capacity(128).writer();
        if let Err(err) = serde_json::to_writer(&mut buf, &body) {
            tracing::warn!(%err, "failed to serialize error body");
            return Self::plain(status_code, err.to_string());
        }

        HttpErrorResponse {
            status_code,
            body: buf.into_inner().freeze(),
            content_type: mime::APPLICATION_JSON,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn content_type(&self) -> &mime::Mime {
        &self.content_type
    }

    /// Converts into a [`http::Response`].
    pub fn into_http_response(self) -> http::Response<Bytes> {
        let mut resp = http::Response::new(Bytes::new());
        self.emit(&mut resp);
        resp
    }

    /// Writes status, content type and body into a [`ResponseSink`].
    pub fn emit<S: ResponseSink + ?Sized>(self, sink: &mut S) {
        sink.set_status(self.status_code);
        sink.send(&self.content_type, self.body);
    }
}

/// Destination of an error response.
pub trait ResponseSink {
    /// Sets the status code of the response.
    fn set_status(&mut self, status_code: StatusCode);
    /// Emits the serialized body with its content type.
    fn send(&mut self, content_type: &mime::Mime, body: Bytes);
}

impl ResponseSink for http::Response<Bytes> {
    fn set_status(&mut self, status_code: StatusCode) {
        *self.status_mut() = status_code;
    }

    fn send(&mut self, content_type: &mime::Mime, body: Bytes) {
        if let Ok(value) = HeaderValue::from_str(content_type.as_ref()) {
            self.headers_mut().insert(header::CONTENT_TYPE, value);
        }
        *self.body_mut() = body;
    }
}

#[cfg(feature = "axum")]
#[cfg_attr(docsrs, doc(cfg(feature = "axum")))]
impl axum::response::IntoResponse for HttpErrorResponse {
    fn into_response(self) -> axum::response::Response {
        self.into_http_response().map(axum::body::Body::from)
    }
}
