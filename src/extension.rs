use std::result::Result as StdResult;

use crate::{ErrorKind, HttpError};

/// Extension trait to map the error variant of a [`Result`] to a [`HttpError`].
pub trait ResultExt {
    type Item;

    /// Maps a `Result<T, E>` to `Result<T, HttpError>` by creating a [`HttpError`] of the
    /// given kind wrapping the error contained in [`Err`].
    ///
    /// # Example
    ///
    /// ```
    /// use http_error_guard::{ErrorKind, HttpError, ResultExt};
    ///
    /// let s: Result<i32, HttpError> = "nan".parse::<i32>().map_kind(ErrorKind::BadRequest);
    /// assert_eq!(s.unwrap_err().status_code(), 400);
    /// ```
    fn map_kind(self, kind: ErrorKind) -> StdResult<Self::Item, HttpError>;

    /// Maps a `Result<T, E>` to `Result<T, HttpError>` by creating a [`HttpError`] of the
    /// given kind and message wrapping the error contained in [`Err`].
    ///
    /// # Example
    ///
    /// ```
    /// use http_error_guard::{ErrorKind, HttpError, ResultExt};
    ///
    /// let s: Result<i32, HttpError> = "nan"
    ///     .parse::<i32>()
    ///     .map_kind_msg(ErrorKind::ValidationError, "invalid number");
    /// assert_eq!(s.unwrap_err().message(), Some("invalid number"));
    /// ```
    fn map_kind_msg(self, kind: ErrorKind, message: &str) -> StdResult<Self::Item, HttpError>;
}

impl<T, E> ResultExt for StdResult<T, E>
where
    E: Into<anyhow::Error>,
{
    type Item = T;

    fn map_kind(self, kind: ErrorKind) -> StdResult<T, HttpError> {
        self.map_err(|e| kind.error(None, None).with_source_err(e))
    }

    fn map_kind_msg(self, kind: ErrorKind, message: &str) -> StdResult<T, HttpError> {
        self.map_err(|e| kind.error(Some(message), None).with_source_err(e))
    }
}

/// Extension trait to transform an [`Option`] to a [`HttpError`].
pub trait OptionExt {
    type Item;

    /// Transforms the `Option<T>` into a `Result<T, HttpError>`, mapping `Some(v)` to
    /// `Ok(v)` and `None` to `Err(HttpError)` of the given kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use http_error_guard::{ErrorKind, HttpError, OptionExt};
    ///
    /// let x: Result<(), HttpError> = None.ok_or_kind(ErrorKind::ResourceNotFound);
    /// assert_eq!(x.unwrap_err().code(), "RESOURCE_NOT_FOUND");
    /// ```
    fn ok_or_kind(self, kind: ErrorKind) -> StdResult<Self::Item, HttpError>;
}

impl<T> OptionExt for Option<T> {
    type Item = T;

    fn ok_or_kind(self, kind: ErrorKind) -> StdResult<T, HttpError> {
        self.ok_or_else(|| kind.into())
    }
}
