//! # HttpTrie
//!
//! HttpTrie is a small HTTP request router built on a path trie.
//!
//! Routes are `(method, path, handler)` triples. Paths are split on `/` into segments, and
//! every segment becomes a node of the trie: a *static* segment like `users`, a *variable*
//! segment like `:id`, or a *wildcard* segment like `*rest` that swallows the remainder of
//! the request path.
//!
//! ## Matching rules
//!
//! At every level of the trie, a request segment is matched against:
//!
//! 1. the static children, in the order they were registered,
//! 2. the variable child,
//! 3. the wildcard child.
//!
//! **No backtracking:** once a static child matches a segment, its subtree alone decides the
//! outcome. If `/a/b` and `/a/c` are registered, a request for `/a/b/z` is not found, even if
//! `/a/:x/z` or `/a/*rest` exist.
//!
//! **Literal variables:** a variable child matches when the remaining request path starts with
//! its literal text. `/users/:id` serves `/users/:id`; a request for `/users/42` is not found.
//! Path parameters are not captured.
//!
//! **Three outcomes:** a lookup either yields a handler, finds the path without a handler for the
//! method (answered with `405 Method Not Allowed`), or finds nothing (`404 Not Found`).
//!
//! ## Usage
//!
//! ```rust,no_run
//! use httptrie::Router;
//! use hyper::{Request, Response, Body, Error};
//!
//! async fn index(_: Request<Body>) -> Result<Response<Body>, Error> {
//!     Ok(Response::new("Hello, World!".into()))
//! }
//!
//! async fn user(_: Request<Body>) -> Result<Response<Body>, Error> {
//!     Ok(Response::new("A user".into()))
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let router = Router::default()
//!         .get("/", index)?
//!         .get("/users/:id", user)?;
//!
//!     hyper::Server::bind(&([127, 0, 0, 1], 3000).into())
//!         .serve(router.into_service())
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! The trie itself is available as [`Tree`], generic over the value stored for each route:
//!
//! ```rust
//! use httptrie::{InsertError, Tree};
//! use hyper::Method;
//!
//! let mut tree = Tree::new();
//! tree.insert(Method::GET, "/a/b", 1).unwrap();
//!
//! assert_eq!(tree.insert(Method::GET, "/a/b", 2), Err(InsertError::MethodAlreadyExists { method: Method::GET }));
//! assert_eq!(tree.insert(Method::GET, "/files/*rest/more", 3), Err(InsertError::InvalidWildcard));
//! assert_eq!(tree.resolve(&Method::GET, "/a/b").value(), Some(&1));
//! ```

#![forbid(unsafe_code)]

mod error;
mod segment;
mod tree;

#[doc(hidden)]
pub mod router;

pub use error::InsertError;
pub use tree::{Resolution, Tree};

#[doc(inline)]
pub use router::{Handler, Router};
