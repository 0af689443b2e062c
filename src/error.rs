use hyper::Method;
use thiserror::Error;

/// Represents errors that can occur when inserting a new route.
///
/// A failed insertion may leave behind the intermediate nodes it created on the
/// way down, but never a handler.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum InsertError {
    /// The path does not begin with `/`, or contains an empty segment.
    #[error("routes must begin with '/' and must not contain empty segments")]
    MalformedRoute,
    /// A segment contains a character other than letters, digits, `.`, `-` and `_`,
    /// or a `:`/`*` that is not its first character.
    #[error("invalid character {character:?} in route segment")]
    InvalidCharacter { character: char },
    /// A wildcard segment was followed by more of the path.
    #[error("wildcard segments are only allowed at the end of a route")]
    InvalidWildcard,
    /// A handler for this method is already registered at the same path.
    #[error("a handler for {method} is already registered for this route")]
    MethodAlreadyExists { method: Method },
}
