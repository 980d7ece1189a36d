/// Construct an ad-hoc [`HttpError`](crate::HttpError) from an [`ErrorKind`](crate::ErrorKind)
/// variant, optional details, optional source error and formatted message.
///
/// The message is either the trailing format arguments or a `message = ...` clause.
///
/// ```rust
/// use http_error_guard::http_error;
/// use serde_json::json;
///
/// let id = 42;
/// let err = http_error!(ResourceNotFound, "user {id} not found");
/// assert_eq!(err.status_code(), 404);
/// assert_eq!(err.message(), Some("user 42 not found"));
///
/// let err = http_error!(BadRequest, details = json!({ "id": id }), "bad id {}", id);
/// assert_eq!(err.message(), Some("bad id 42"));
/// assert_eq!(err.detail::<u32>("id"), Some(42));
/// ```
#[macro_export]
macro_rules! http_error {
    ($kind:ident $(, details = $details:expr)? $(, source = $src:expr)? $(, message = $($arg:tt)*)?) => {{
        let http_error = $crate::HttpError::from($crate::ErrorKind::$kind)
            $(
                .with_details($details)
             )?
            $(
                .with_source_err($src)
             )?
            $(
                .with_message(std::format!($($arg)*))
             )?;
        http_error
    }};
    ($kind:ident, details = $details:expr, source = $src:expr, $($arg:tt)+) => {
        $crate::http_error!($kind, details = $details, source = $src, message = $($arg)+)
    };
    ($kind:ident, details = $details:expr, $($arg:tt)+) => {
        $crate::http_error!($kind, details = $details, message = $($arg)+)
    };
    ($kind:ident, source = $src:expr, $($arg:tt)+) => {
        $crate::http_error!($kind, source = $src, message = $($arg)+)
    };
    ($kind:ident $(, $($arg:tt)*)?) => {
        $crate::http_error!($kind $(, message = $($arg)*)?)
    };
}

/// Shorthand macro to return early with an [`HttpError`](crate::HttpError). Accepts every form
/// [`http_error!`] does.
#[macro_export]
macro_rules! http_error_ret {
    ($($arg:tt)*) => {
        return Err($crate::http_error!($($arg)*).into())
    };
}
