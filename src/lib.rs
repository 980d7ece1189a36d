//! `http-error-guard` standardizes error values and JSON error responses for HTTP services.
//!
//! - [`HttpError`] is a tagged error carrying a status code, a machine-readable code, a message
//!   and optional details. [`ErrorKind`] lists the predefined categories.
//! - [`wrap`] and [`wrap_sync`] route handler failures, including panics, to a [`Next`]
//!   continuation.
//! - [`ErrorFormatter`] turns any [`ErrorLike`] value into a [`HttpErrorResponse`].
//!
//! # Example with `axum`
//!
//! ```rust,ignore
//! use axum::{
//!    routing::get,
//!    response::IntoResponse,
//!    Router,
//! };
//! use http_error_guard::{http_error_ret, HttpError};
//!
//! #[tokio::main]
//! async fn main() {
//!     let app = Router::new()
//!         .route("/", get(handler));
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3000")
//!         .await
//!         .unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//!
//! fn fallible_operation() -> Result<(), HttpError> {
//!     http_error_ret!(ResourceNotFound, "nothing here")
//! }
//!
//! async fn handler() -> Result<impl IntoResponse, HttpError> {
//!     fallible_operation()?;
//!     Ok(())
//! }
//! ```

mod config;
mod extension;
mod formatter;
mod handler;
mod http_error;
mod kind;

pub use config::*;
pub use extension::*;
pub use formatter::*;
pub use handler::*;
pub use http_error::*;
pub use kind::*;

#[doc(hidden)]
pub mod macros;

pub mod response;

pub use response::{HttpErrorResponse, ResponseSink};

pub use http;
