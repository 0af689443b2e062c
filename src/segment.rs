use crate::error::InsertError;

/// The kind of trie child a path fragment selects, decided by its first character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Kind {
    /// Matched by exact equality.
    Static,
    /// `:name`
    Variable,
    /// `*name`, always the last fragment of a route.
    Wildcard,
}

impl Kind {
    pub(crate) fn of(fragment: &str) -> Kind {
        match fragment.as_bytes().first() {
            Some(b':') => Kind::Variable,
            Some(b'*') => Kind::Wildcard,
            _ => Kind::Static,
        }
    }
}

/// Returns the text of `path` up to the next `/`, or all of it if there is none.
///
/// The caller is expected to have stripped the leading `/` already.
pub(crate) fn next(path: &str) -> &str {
    match path.find('/') {
        Some(end) => &path[..end],
        None => path,
    }
}

/// Splits the first segment off a route path.
///
/// Returns the segment and the path remaining after it (either empty or starting with `/`).
pub(crate) fn split(path: &str) -> Result<(&str, &str), InsertError> {
    let path = path.strip_prefix('/').ok_or(InsertError::MalformedRoute)?;
    let fragment = next(path);

    if fragment.is_empty() {
        return Err(InsertError::MalformedRoute);
    }

    validate(fragment)?;
    Ok((fragment, &path[fragment.len()..]))
}

/// Checks that a fragment only contains letters, digits, `.`, `-` and `_`,
/// with `:` or `*` allowed in the first position only.
pub(crate) fn validate(fragment: &str) -> Result<(), InsertError> {
    for (index, character) in fragment.char_indices() {
        let allowed = character.is_alphanumeric()
            || matches!(character, '.' | '-' | '_')
            || (index == 0 && matches!(character, ':' | '*'));

        if !allowed {
            return Err(InsertError::InvalidCharacter { character });
        }
    }

    Ok(())
}
