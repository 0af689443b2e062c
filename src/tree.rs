use crate::error::InsertError;
use crate::segment::{self, Kind};

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

use hyper::Method;
use tracing::warn;

/// A path trie mapping `(method, path)` pairs to values.
///
/// Routes are made of `/`-separated segments of three kinds:
/// ```ignore
///  Syntax    Kind
///  users     static segment
///  :name     variable segment
///  *name     wildcard segment, must be the last one
/// ```
///
/// Lookups try, at every level, the static children first (in registration order),
/// then the variable child, then the wildcard child. The first static child whose
/// fragment equals the request segment decides the outcome for that level: even if
/// nothing below it serves the request, no other child of the same node is tried.
///
/// Variable children are matched by their literal text. A route registered as
/// `/users/:id` serves a request for `/users/:id`, not `/users/42`.
///
/// ```rust
/// use httptrie::Tree;
/// use hyper::Method;
///
/// # fn main() -> Result<(), httptrie::InsertError> {
/// let mut tree = Tree::new();
/// tree.insert(Method::GET, "/users", "list users")?;
/// tree.insert(Method::GET, "/files/*rest", "serve file")?;
///
/// assert_eq!(tree.resolve(&Method::GET, "/users").into_parts(), (Some(&"list users"), true));
/// assert_eq!(tree.resolve(&Method::GET, "/files/a/b.txt").value(), Some(&"serve file"));
///
/// // the path exists but has no handler for the method
/// assert_eq!(tree.resolve(&Method::POST, "/users").into_parts(), (None, true));
///
/// // no such path
/// assert_eq!(tree.resolve(&Method::GET, "/posts").into_parts(), (None, false));
/// # Ok(())
/// # }
/// ```
pub struct Tree<V> {
    root: Node<V>,
}

impl<V> Tree<V> {
    /// Creates an empty tree holding only the root node.
    pub fn new() -> Self {
        Self {
            root: Node::new(""),
        }
    }

    /// Registers `value` for `method` at `path`.
    ///
    /// The path must begin with `/`. Every segment may only contain letters, digits,
    /// `.`, `-` and `_`, except for a leading `:` or `*`. A wildcard segment must be
    /// the last segment of the path. The path `/` registers on the root itself.
    ///
    /// Insertion stops at the first error. Nodes created before the failing segment
    /// stay in the tree, but no value is ever registered by a failed call.
    pub fn insert(&mut self, method: Method, path: &str, value: V) -> Result<(), InsertError> {
        match path {
            "/" => self.root.register(method, value),
            _ if !path.starts_with('/') => Err(InsertError::MalformedRoute),
            _ => self.root.add(method, path, value),
        }
    }

    /// Looks up the value registered for `method` at `path`.
    ///
    /// The path is matched as given: no decoding or cleaning is performed.
    pub fn resolve<'t>(&'t self, method: &Method, path: &str) -> Resolution<'t, V> {
        if path.is_empty() || path == "/" {
            if self.root.handlers.is_empty() {
                // only a wildcard on the root can serve it
                return self.root.descend(method, "/");
            }

            return self.root.reached(method);
        }

        self.root.descend(method, path)
    }
}

impl<V> Default for Tree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for Tree<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree").field("root", &self.root).finish()
    }
}

/// The outcome of [`Tree::resolve`].
///
/// There are three cases:
/// - a value is present: the request can be served,
/// - no value but `found()`: the path exists without a value for the method,
/// - neither: nothing matches the path.
pub struct Resolution<'t, V> {
    node: Option<&'t Node<V>>,
    value: Option<&'t V>,
}

impl<'t, V> Resolution<'t, V> {
    fn miss() -> Self {
        Self {
            node: None,
            value: None,
        }
    }

    /// The value registered for the requested method, if any.
    pub fn value(&self) -> Option<&'t V> {
        self.value
    }

    /// Whether a node's full path was matched, regardless of the method.
    pub fn found(&self) -> bool {
        self.node.is_some()
    }

    pub fn into_parts(self) -> (Option<&'t V>, bool) {
        (self.value, self.node.is_some())
    }

    /// The methods registered at the matched node, sorted by name.
    /// Empty if no node was matched.
    pub fn allowed(&self) -> Vec<&'t Method> {
        let mut allowed = match self.node {
            Some(node) => node.handlers.keys().collect::<Vec<_>>(),
            None => Vec::new(),
        };

        allowed.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        allowed
    }
}

impl<V> Clone for Resolution<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for Resolution<'_, V> {}

impl<V> fmt::Debug for Resolution<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolution")
            .field("found", &self.found())
            .field("value", &self.value.is_some())
            .field("allowed", &self.allowed())
            .finish()
    }
}

// A node of the trie. Each node owns its children, the tree has no back references.
struct Node<V> {
    fragment: String,
    static_children: Vec<Node<V>>,
    variable_child: Option<Box<Node<V>>>,
    wildcard_child: Option<Box<Node<V>>>,
    handlers: HashMap<Method, V>,
}

impl<V> Node<V> {
    fn new(fragment: &str) -> Self {
        Self {
            fragment: fragment.to_owned(),
            static_children: Vec::new(),
            variable_child: None,
            wildcard_child: None,
            handlers: HashMap::new(),
        }
    }

    fn register(&mut self, method: Method, value: V) -> Result<(), InsertError> {
        match self.handlers.entry(method) {
            Entry::Occupied(entry) => Err(InsertError::MethodAlreadyExists {
                method: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                entry.insert(value);
                Ok(())
            }
        }
    }

    // Consumes one segment of `path` per level.
    fn add(&mut self, method: Method, path: &str, value: V) -> Result<(), InsertError> {
        if path.is_empty() {
            return self.register(method, value);
        }

        let (fragment, rest) = segment::split(path)?;

        match Kind::of(fragment) {
            Kind::Wildcard => {
                if !rest.is_empty() {
                    return Err(InsertError::InvalidWildcard);
                }

                let child = self
                    .wildcard_child
                    .get_or_insert_with(|| Box::new(Node::new(fragment)));
                child.warn_if_renamed(fragment);
                child.add(method, "", value)
            }
            Kind::Variable => {
                let child = self
                    .variable_child
                    .get_or_insert_with(|| Box::new(Node::new(fragment)));
                child.warn_if_renamed(fragment);
                child.add(method, rest, value)
            }
            Kind::Static => {
                let index = match self
                    .static_children
                    .iter()
                    .position(|child| child.fragment == fragment)
                {
                    Some(index) => index,
                    None => {
                        self.static_children.push(Node::new(fragment));
                        self.static_children.len() - 1
                    }
                };

                self.static_children[index].add(method, rest, value)
            }
        }
    }

    fn warn_if_renamed(&self, fragment: &str) {
        if self.fragment != fragment {
            warn!(
                existing = %self.fragment,
                requested = %fragment,
                "segment shares the node of a differently named sibling"
            );
        }
    }

    fn reached(&self, method: &Method) -> Resolution<'_, V> {
        Resolution {
            node: Some(self),
            value: self.handlers.get(method),
        }
    }

    fn descend<'t>(&'t self, method: &Method, path: &str) -> Resolution<'t, V> {
        if path.is_empty() {
            return self.reached(method);
        }

        let path = path.strip_prefix('/').unwrap_or(path);
        let segment = segment::next(path);

        // The first static match settles this level, whatever it resolves to.
        if let Some(child) = self
            .static_children
            .iter()
            .find(|child| child.fragment == segment)
        {
            return child.descend(method, &path[child.fragment.len()..]);
        }

        let mut resolved = Resolution::miss();

        if let Some(child) = &self.variable_child {
            if let Some(rest) = path.strip_prefix(child.fragment.as_str()) {
                resolved = child.descend(method, rest);
                if resolved.value.is_some() {
                    return resolved;
                }
            }
        }

        if let Some(child) = &self.wildcard_child {
            return child.reached(method);
        }

        resolved
    }
}

impl<V> fmt::Debug for Node<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut methods = self.handlers.keys().map(Method::as_str).collect::<Vec<_>>();
        methods.sort_unstable();

        f.debug_struct("Node")
            .field("fragment", &self.fragment)
            .field("methods", &methods)
            .field("static_children", &self.static_children)
            .field("variable_child", &self.variable_child)
            .field("wildcard_child", &self.wildcard_child)
            .finish()
    }
}
