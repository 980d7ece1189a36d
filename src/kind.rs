//! Predefined error categories.
use std::borrow::Cow;

use crate::config::RunMode;
use crate::http_error::HttpError;

/// A category of [`HttpError`] binding a fixed status code, code and default message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    BadRequest,
    ValidationError,
    AuthenticationError,
    AuthorizationError,
    ResourceNotFound,
    ConflictError,
    RateLimitError,
    DependencyError,
    InternalError,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 9] = [
        Self::BadRequest,
        Self::ValidationError,
        Self::AuthenticationError,
        Self::AuthorizationError,
        Self::ResourceNotFound,
        Self::ConflictError,
        Self::RateLimitError,
        Self::DependencyError,
        Self::InternalError,
    ];

    pub const fn status_code(self) -> u16 {
        match self {
            Self::BadRequest | Self::ValidationError => 400,
            Self::AuthenticationError => 401,
            Self::AuthorizationError => 403,
            Self::ResourceNotFound => 404,
            Self::ConflictError => 409,
            Self::RateLimitError => 429,
            Self::DependencyError => 503,
            Self::InternalError => 500,
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::AuthenticationError => "AUTHENTICATION_ERROR",
            Self::AuthorizationError => "FORBIDDEN_ACCESS",
            Self::ResourceNotFound => "RESOURCE_NOT_FOUND",
            Self::ConflictError => "RESOURCE_CONFLICT",
            Self::RateLimitError => "RATE_LIMIT_EXCEEDED",
            Self::DependencyError => "SERVICE_UNAVAILABLE",
            Self::InternalError => "INTERNAL_SERVER_ERROR",
        }
    }

    pub const fn default_message(self) -> &'static str {
        match self {
            Self::BadRequest => "Bad Request",
            Self::ValidationError => "Validation failed",
            Self::AuthenticationError => "Authentication required",
            Self::AuthorizationError => "Forbidden access",
            Self::ResourceNotFound => "Resource not found",
            Self::ConflictError => "Resource conflict",
            Self::RateLimitError => "Rate limit exceeded",
            Self::DependencyError => "Service unavailable",
            Self::InternalError => "Internal server error",
        }
    }

    /// Name of the category, used as the `name` field of development error bodies.
    pub const fn name(self) -> &'static str {
        match self {
            Self::BadRequest => "BadRequest",
            Self::ValidationError => "ValidationError",
            Self::AuthenticationError => "AuthenticationError",
            Self::AuthorizationError => "AuthorizationError",
            Self::ResourceNotFound => "ResourceNotFound",
            Self::ConflictError => "ConflictError",
            Self::RateLimitError => "RateLimitError",
            Self::DependencyError => "DependencyError",
            Self::InternalError => "InternalError",
        }
    }

    /// Builds an [`HttpError`] of this kind with the process-wide [`RunMode`].
    ///
    /// The default message is substituted only when `message` is `None`; `Some("")` is kept.
    ///
    /// ```rust
    /// use http_error_guard::ErrorKind;
    ///
    /// let err = ErrorKind::ResourceNotFound.error(None, None);
    /// assert_eq!(err.message(), Some("Resource not found"));
    ///
    /// let err = ErrorKind::ResourceNotFound.error(Some(""), None);
    /// assert_eq!(err.message(), Some(""));
    /// ```
    pub fn error(self, message: Option<&str>, details: Option<serde_json::Value>) -> HttpError {
        self.error_in(RunMode::current(), message, details)
    }

    /// Builds an [`HttpError`] of this kind with an explicit [`RunMode`].
    pub fn error_in(
        self,
        mode: RunMode,
        message: Option<&str>,
        details: Option<serde_json::Value>,
    ) -> HttpError {
        let message = match message {
            Some(m) => Cow::Owned(m.to_owned()),
            None => Cow::Borrowed(self.default_message()),
        };
        HttpError::new_in(mode, self.status_code(), self.code(), Some(message), details)
    }
}

impl From<ErrorKind> for HttpError {
    fn from(kind: ErrorKind) -> Self {
        kind.error(None, None)
    }
}

impl HttpError {
    /// `400 BAD_REQUEST`
    pub fn bad_request() -> Self {
        ErrorKind::BadRequest.into()
    }

    /// `400 VALIDATION_ERROR`
    pub fn validation_error() -> Self {
        ErrorKind::ValidationError.into()
    }

    /// `401 AUTHENTICATION_ERROR`
    pub fn authentication_error() -> Self {
        ErrorKind::AuthenticationError.into()
    }

    /// `403 FORBIDDEN_ACCESS`
    pub fn authorization_error() -> Self {
        ErrorKind::AuthorizationError.into()
    }

    /// `404 RESOURCE_NOT_FOUND`
    pub fn resource_not_found() -> Self {
        ErrorKind::ResourceNotFound.into()
    }

    /// `409 RESOURCE_CONFLICT`
    pub fn conflict_error() -> Self {
        ErrorKind::ConflictError.into()
    }

    /// `429 RATE_LIMIT_EXCEEDED`
    pub fn rate_limit_error() -> Self {
        ErrorKind::RateLimitError.into()
    }

    /// `503 SERVICE_UNAVAILABLE`
    pub fn dependency_error() -> Self {
        ErrorKind::DependencyError.into()
    }

    /// `500 INTERNAL_SERVER_ERROR`
    pub fn internal_error() -> Self {
        ErrorKind::InternalError.into()
    }
}
