//! Routing handler failures to a continuation.
//!
//! [`wrap`] and [`wrap_sync`] turn a fallible handler into a [`Wrapped`] handler that never
//! fails itself: an `Err` result or a panic, raised before or after the handler first
//! suspends, is forwarded to [`Next::fail`] exactly once. A successful handler never touches the
//! continuation. A panic raised by the continuation while receiving a failure is logged and
//! dropped, so the future returned by [`Wrapped::call`] still completes normally.
use futures::future::{self, BoxFuture};
use futures::FutureExt;
use std::any::Any;
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// A panic caught while running a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerPanic {
    message: String,
}

impl HandlerPanic {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        let message = match payload.downcast::<String>() {
            Ok(s) => *s,
            Err(payload) => match payload.downcast_ref::<&'static str>() {
                Some(s) => (*s).to_owned(),
                None => "Box<dyn Any>".to_owned(),
            },
        };
        Self { message }
    }

    /// Returns the panic message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for HandlerPanic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handler panicked: {}", self.message)
    }
}

impl StdError for HandlerPanic {}

/// Continuation advancing request handling. Called without an error to proceed, or with one to
/// dispatch to error handling.
#[derive(Clone)]
pub struct Next {
    inner: Arc<dyn Fn(Option<anyhow::Error>) + Send + Sync>,
}

impl fmt::Debug for Next {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next").finish_non_exhaustive()
    }
}

impl Next {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Option<anyhow::Error>) + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    /// Advances to the next stage.
    pub fn proceed(&self) {
        (self.inner)(None)
    }

    /// Dispatches `err` to error handling.
    pub fn fail(&self, err: impl Into<anyhow::Error>) {
        (self.inner)(Some(err.into()))
    }
}

type BoxedHandler<Req, Res> =
    Arc<dyn Fn(Req, Res, Next) -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync>;

/// A handler whose failures are forwarded to its continuation.
pub struct Wrapped<Req, Res> {
    handler: BoxedHandler<Req, Res>,
}

impl<Req, Res> Clone for Wrapped<Req, Res> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<Req, Res> fmt::Debug for Wrapped<Req, Res> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wrapped").finish_non_exhaustive()
    }
}

/// Wraps an asynchronous handler.
///
/// ```rust
/// use http_error_guard::{wrap, HttpError, Next};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let handler = wrap(|id: u32, _res: (), _next: Next| async move {
///     if id == 0 {
///         return Err(HttpError::resource_not_found());
///     }
///     Ok(())
/// });
///
/// let next = Next::new(|err| {
///     let err = err.expect("called with an error");
///     assert_eq!(HttpError::from_err(err).status_code(), 404);
/// });
/// handler.call(0, (), next).await;
/// # });
/// ```
pub fn wrap<Req, Res, F, Fut, E>(handler: F) -> Wrapped<Req, Res>
where
    Req: 'static,
    Res: 'static,
    F: Fn(Req, Res, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), E>> + Send + 'static,
    E: Into<anyhow::Error>,
{
    let handler: BoxedHandler<Req, Res> = Arc::new(
        move |req: Req, res: Res, next: Next| -> BoxFuture<'static, anyhow::Result<()>> {
            handler(req, res, next)
                .map(|r| r.map_err(Into::into))
                .boxed()
        },
    );
    Wrapped { handler }
}

/// Wraps a synchronous handler. The result is completed through the same path as
/// [`wrap`]'s, so callers cannot tell the two apart.
pub fn wrap_sync<Req, Res, F, E>(handler: F) -> Wrapped<Req, Res>
where
    Req: 'static,
    Res: 'static,
    F: Fn(Req, Res, Next) -> Result<(), E> + Send + Sync + 'static,
    E: Into<anyhow::Error>,
{
    let handler: BoxedHandler<Req, Res> = Arc::new(
        move |req: Req, res: Res, next: Next| -> BoxFuture<'static, anyhow::Result<()>> {
            future::ready(handler(req, res, next).map_err(Into::into)).boxed()
        },
    );
    Wrapped { handler }
}

impl<Req, Res> Wrapped<Req, Res> {
    /// Runs the handler. The returned future always completes normally; failures go to `next`.
    pub fn call(&self, req: Req, res: Res, next: Next) -> BoxFuture<'static, ()> {
        let fut = match catch_unwind(AssertUnwindSafe(|| {
            (self.handler)(req, res, next.clone())
        })) {
            Ok(fut) => fut,
            Err(payload) => {
                forward(&next, HandlerPanic::from_payload(payload).into());
                return future::ready(()).boxed();
            }
        };

        async move {
            let err = match AssertUnwindSafe(fut).catch_unwind().await {
                Ok(Ok(())) => return,
                Ok(Err(err)) => err,
                Err(payload) => HandlerPanic::from_payload(payload).into(),
            };
            forward(&next, err);
        }
        .boxed()
    }
}

fn forward(next: &Next, err: anyhow::Error) {
    tracing::debug!(error = %err, "forwarding handler failure");
    if let Err(payload) = catch_unwind(AssertUnwindSafe(|| next.fail(err))) {
        let panic = HandlerPanic::from_payload(payload);
        tracing::warn!(message = panic.message(), "continuation panicked, ignoring");
    }
}
