//! [`Router`](crate::Router) dispatches hyper requests to handlers registered on a path trie.
//!
//! Routes are registered while building the router. Converting it into a service
//! with [`Router::into_service`] freezes it: from then on it is shared read-only
//! between connections and no route can be added.
//!
//! ```rust,no_run
//! use httptrie::Router;
//! use hyper::{Request, Response, Body, Error};
//!
//! async fn index(_: Request<Body>) -> Result<Response<Body>, Error> {
//!     Ok(Response::new("Hello, World!".into()))
//! }
//!
//! async fn files(_: Request<Body>) -> Result<Response<Body>, Error> {
//!     Ok(Response::new("Some file".into()))
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let router = Router::default()
//!         .get("/", index)?
//!         .get("/files/*path", files)?;
//!
//!     hyper::Server::bind(&([127, 0, 0, 1], 3000).into())
//!         .serve(router.into_service())
//!         .await?;
//!     Ok(())
//! }
//!```
//!
//! A request is answered by:
//! - the handler registered for its method, if its path resolves to one,
//! - `405 Method Not Allowed` with an `Allow` header, if the path exists but
//!   has no handler for the method,
//! - `404 Not Found` otherwise.
use crate::error::InsertError;
use crate::tree::{Resolution, Tree};

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_util::{future, ready};
use hyper::header::{self, HeaderValue};
use hyper::service::Service;
use hyper::{Body, Method, Request, Response, StatusCode};
use tracing::{debug, trace, warn};

/// Router dispatches requests to different handlers via configurable routes.
pub struct Router {
    tree: Tree<Box<dyn Handler>>,
    handle_method_not_allowed: bool,
    not_found: Option<Box<dyn Handler>>,
    method_not_allowed: Option<Box<dyn Handler>>,
}

impl Router {
    /// Register a handler for a specific path at the specified method.
    ///
    /// Fails if the path is malformed, or if a handler is already registered for
    /// the same method and path.
    /// ```rust
    /// use httptrie::{InsertError, Router};
    /// use hyper::{Request, Response, Body, Method};
    ///
    /// async fn teapot(_: Request<Body>) -> hyper::Result<Response<Body>> {
    ///     Ok(Response::new(Body::from("I am a teapot!")))
    /// }
    ///
    /// let router = Router::default().handle("/teapot", Method::GET, teapot).unwrap();
    ///
    /// let err = router.handle("/teapot", Method::GET, teapot).err();
    /// assert_eq!(err, Some(InsertError::MethodAlreadyExists { method: Method::GET }));
    /// ```
    pub fn handle(
        mut self,
        path: &str,
        method: Method,
        handler: impl Handler + 'static,
    ) -> Result<Self, InsertError> {
        match self.tree.insert(method.clone(), path, Box::new(handler)) {
            Ok(()) => {
                debug!(%method, path, "registered route");
                Ok(self)
            }
            Err(err) => {
                warn!(%method, path, %err, "rejected route");
                Err(err)
            }
        }
    }

    /// Lookup allows the manual lookup of handler for a specific method and path.
    /// ```rust
    /// use httptrie::Router;
    /// use hyper::{Request, Response, Body, Method};
    ///
    /// async fn home(_: Request<Body>) -> hyper::Result<Response<Body>> {
    ///     Ok(Response::new(Body::from("Welcome!")))
    /// }
    ///
    /// let router = Router::default().get("/home", home).unwrap();
    ///
    /// assert!(router.lookup(&Method::GET, "/home").value().is_some());
    ///
    /// let res = router.lookup(&Method::POST, "/home");
    /// assert!(res.value().is_none());
    /// assert!(res.found());
    /// ```
    pub fn lookup(&self, method: &Method, path: &str) -> Resolution<'_, Box<dyn Handler>> {
        self.tree.resolve(method, path)
    }

    /// Register a handler for `GET` requests
    pub fn get(self, path: &str, handler: impl Handler + 'static) -> Result<Self, InsertError> {
        self.handle(path, Method::GET, handler)
    }

    /// Register a handler for `HEAD` requests
    pub fn head(self, path: &str, handler: impl Handler + 'static) -> Result<Self, InsertError> {
        self.handle(path, Method::HEAD, handler)
    }

    /// Register a handler for `OPTIONS` requests
    pub fn options(self, path: &str, handler: impl Handler + 'static) -> Result<Self, InsertError> {
        self.handle(path, Method::OPTIONS, handler)
    }

    /// Register a handler for `POST` requests
    pub fn post(self, path: &str, handler: impl Handler + 'static) -> Result<Self, InsertError> {
        self.handle(path, Method::POST, handler)
    }

    /// Register a handler for `PUT` requests
    pub fn put(self, path: &str, handler: impl Handler + 'static) -> Result<Self, InsertError> {
        self.handle(path, Method::PUT, handler)
    }

    /// Register a handler for `PATCH` requests
    pub fn patch(self, path: &str, handler: impl Handler + 'static) -> Result<Self, InsertError> {
        self.handle(path, Method::PATCH, handler)
    }

    /// Register a handler for `DELETE` requests
    pub fn delete(self, path: &str, handler: impl Handler + 'static) -> Result<Self, InsertError> {
        self.handle(path, Method::DELETE, handler)
    }

    /// If enabled (the default), a request whose path exists but has no handler
    /// for its method is answered with `Method Not Allowed` and HTTP status code 405.
    /// If disabled, such requests are delegated to the `NotFound` handler.
    pub fn handle_method_not_allowed(mut self, enabled: bool) -> Self {
        self.handle_method_not_allowed = enabled;
        self
    }

    /// Configurable handler which is called when no matching route is
    /// found.
    pub fn not_found(mut self, handler: impl Handler + 'static) -> Self {
        self.not_found = Some(Box::new(handler));
        self
    }

    /// A configurable handler which is called when a request
    /// cannot be routed and `handle_method_not_allowed` is true.
    /// The `Allow` header is not set for custom handlers.
    pub fn method_not_allowed(mut self, handler: impl Handler + 'static) -> Self {
        self.method_not_allowed = Some(Box::new(handler));
        self
    }
}

impl Default for Router {
    fn default() -> Self {
        Self {
            tree: Tree::new(),
            handle_method_not_allowed: true,
            not_found: None,
            method_not_allowed: None,
        }
    }
}

/// Represents a HTTP handler function.
/// This trait is implemented for asynchronous functions that take a `Request` and return a
/// `Result<Response<Body>, hyper::Error>`
/// ```rust
/// # use httptrie::Handler;
/// # use hyper::{Request, Response, Body};
/// async fn hello(_: Request<Body>) -> Result<Response<Body>, hyper::Error> {
///     Ok(Response::new(Body::empty()))
/// }
///
/// let handler: Box<dyn Handler> = Box::new(hello);
/// ```
pub trait Handler: Send + Sync {
    fn handle(
        &self,
        req: Request<Body>,
    ) -> Pin<Box<dyn Future<Output = hyper::Result<Response<Body>>> + Send>>;
}

impl<F, R> Handler for F
where
    F: Fn(Request<Body>) -> R + Send + Sync,
    R: Future<Output = Result<Response<Body>, hyper::Error>> + Send + 'static,
{
    fn handle(
        &self,
        req: Request<Body>,
    ) -> Pin<Box<dyn Future<Output = hyper::Result<Response<Body>>> + Send>> {
        Box::pin(self(req))
    }
}

#[doc(hidden)]
pub struct MakeRouterService(RouterService);

impl<T> Service<T> for MakeRouterService {
    type Response = RouterService;
    type Error = hyper::Error;
    type Future = future::Ready<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, _: T) -> Self::Future {
        let service = self.0.clone();
        future::ok(service)
    }
}

/// A frozen [`Router`], shared between connections.
#[derive(Clone)]
pub struct RouterService(Arc<Router>);

impl RouterService {
    fn new(router: Router) -> Self {
        RouterService(Arc::new(router))
    }
}

impl Service<Request<Body>> for RouterService {
    type Response = Response<Body>;
    type Error = hyper::Error;
    type Future = ResponseFut;

    fn poll_ready(&mut self, _: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        self.0.serve(req)
    }
}

impl Router {
    /// Converts the `Router` into a `Service` which you can serve directly with `Hyper`.
    /// This is the point after which the routes can no longer change.
    /// If you have an existing `Service` that you want to incorporate a `Router` into, see
    /// [`Router::serve`](crate::Router::serve).
    /// ```rust,no_run
    /// # use httptrie::Router;
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// // Our router...
    /// let router = Router::default();
    ///
    /// // Convert it into a service...
    /// let service = router.into_service();
    ///
    /// // Serve with hyper
    /// hyper::Server::bind(&([127, 0, 0, 1], 3030).into())
    ///     .serve(service)
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn into_service(self) -> MakeRouterService {
        MakeRouterService(RouterService::new(self))
    }

    /// An asynchronous function from a `Request` to a `Response`. You will generally not need to use
    /// this function directly, and instead use
    /// [`Router::into_service`](crate::Router::into_service). However, it may be useful when
    /// incorporating the router into a larger service.
    /// ```rust,no_run
    /// # use httptrie::Router;
    /// # use hyper::service::{make_service_fn, service_fn};
    /// # use hyper::{Request, Body, Server};
    /// # use std::convert::Infallible;
    /// # use std::sync::Arc;
    ///
    /// # async fn run() {
    /// let router = Arc::new(Router::default());
    ///
    /// let make_svc = make_service_fn(move |_| {
    ///     let router = router.clone();
    ///     async move {
    ///         Ok::<_, Infallible>(service_fn(move |req: Request<Body>| {
    ///             let router = router.clone();
    ///             async move { router.serve(req).await }
    ///         }))
    ///     }
    /// });
    ///
    /// let server = Server::bind(&([127, 0, 0, 1], 3000).into())
    ///     .serve(make_svc)
    ///     .await;
    /// # }
    /// ```
    pub fn serve(&self, req: Request<Body>) -> ResponseFut {
        let resolved = self.tree.resolve(req.method(), req.uri().path());

        if let Some(handler) = resolved.value() {
            return ResponseFutKind::Boxed(handler.handle(req)).into();
        }

        if resolved.found() && self.handle_method_not_allowed {
            trace!(method = %req.method(), path = req.uri().path(), "method not allowed");

            return match self.method_not_allowed {
                Some(ref handler) => ResponseFutKind::Boxed(handler.handle(req)).into(),
                None => {
                    let allow = resolved
                        .allowed()
                        .iter()
                        .map(|method| method.as_str())
                        .collect::<Vec<_>>()
                        .join(", ");
                    ResponseFutKind::MethodNotAllowed(allow).into()
                }
            };
        }

        trace!(method = %req.method(), path = req.uri().path(), "not found");

        match self.not_found {
            Some(ref handler) => ResponseFutKind::Boxed(handler.handle(req)).into(),
            None => ResponseFutKind::NotFound.into(),
        }
    }
}

pub struct ResponseFut {
    kind: ResponseFutKind,
}

impl From<ResponseFutKind> for ResponseFut {
    fn from(kind: ResponseFutKind) -> Self {
        Self { kind }
    }
}

enum ResponseFutKind {
    Boxed(Pin<Box<dyn Future<Output = hyper::Result<Response<Body>>> + Send>>),
    MethodNotAllowed(String),
    NotFound,
}

fn empty(status: StatusCode) -> Response<Body> {
    let mut res = Response::new(Body::empty());
    *res.status_mut() = status;
    res
}

impl Future for ResponseFut {
    type Output = hyper::Result<Response<Body>>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let ready = match self.kind {
            ResponseFutKind::Boxed(ref mut fut) => ready!(fut.as_mut().poll(cx)),
            ResponseFutKind::NotFound => Ok(empty(StatusCode::NOT_FOUND)),
            ResponseFutKind::MethodNotAllowed(ref allowed) => {
                let mut res = empty(StatusCode::METHOD_NOT_ALLOWED);
                if let Ok(value) = HeaderValue::from_str(allowed) {
                    res.headers_mut().insert(header::ALLOW, value);
                }
                Ok(res)
            }
        };

        Poll::Ready(ready)
    }
}
