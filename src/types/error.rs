//! The immutable value chain behind every contextualized error.
//!
//! An [`Error`] is either the [`Error::empty`] sentinel, an opaque leaf wrapping
//! any `std::error::Error`, or a node that attaches one `(key, value)` pair on
//! top of a parent chain. Nodes are never mutated: attaching builds a new node
//! that shares its parent, so many chains can share a common suffix.
//!
//! # Examples
//!
//! ```
//! use error_meta::{Error, Key};
//! use std::sync::Arc;
//!
//! let key = Key::new("request_id");
//! let base = Error::new("record missing");
//! let err = base.attach(key.clone(), Arc::new(String::from("r-1")));
//!
//! assert_eq!(err.to_string(), "record missing:request_id={r-1}");
//! assert!(err.cause().ptr_eq(&base));
//! assert!(base.get(&key).is_none());
//! ```

use crate::attr::ERROR;
use crate::traits::{MultiValueLookup, ValueLookup};
use crate::types::{AttrValue, ErrorVec, Key, Value};
use std::error::Error as StdError;
use std::sync::{Arc, LazyLock};

static EMPTY: LazyLock<Error> = LazyLock::new(|| Error { inner: Arc::new(Inner::Empty) });

/// An error value carrying zero or more attached key/value nodes.
///
/// Cloning is cheap and preserves identity: [`Error::ptr_eq`] and `==` compare
/// by reference, never by content.
#[derive(Clone)]
pub struct Error {
    pub(crate) inner: Arc<Inner>,
}

pub(crate) enum Inner {
    Empty,
    Leaf(Box<dyn StdError + Send + Sync>),
    Node(Node),
}

pub(crate) struct Node {
    pub(crate) parent: Error,
    pub(crate) key: Key,
    pub(crate) value: Value,
}

/// One replayable attach operation: a key and the value stored under it.
///
/// Produced by [`Attr::option`](crate::Attr::option) or by decomposing a chain
/// with [`Error::attachments`].
#[derive(Clone, Debug)]
pub struct Attachment {
    key: Key,
    value: Value,
}

impl Attachment {
    /// Creates an attachment from a raw key and value.
    #[inline]
    pub fn new(key: Key, value: Value) -> Self {
        Self { key, value }
    }

    #[inline]
    pub fn key(&self) -> &Key {
        &self.key
    }

    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Attaches this key/value on top of `error`.
    #[inline]
    pub fn apply(&self, error: Error) -> Error {
        error.attach(self.key.clone(), self.value.clone())
    }
}

impl Error {
    /// Returns the terminal sentinel: no base error, no values, empty string form.
    #[inline]
    pub fn empty() -> Self {
        EMPTY.clone()
    }

    /// Creates a leaf error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        let message: String = message.into();
        Self::from_boxed(message.into())
    }

    /// Wraps any standard error as an opaque leaf.
    pub fn from_std<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::from_boxed(Box::new(error))
    }

    /// Wraps an already boxed standard error as an opaque leaf.
    pub fn from_boxed(error: Box<dyn StdError + Send + Sync>) -> Self {
        Self { inner: Arc::new(Inner::Leaf(error)) }
    }

    /// Returns `true` for the [`Error::empty`] sentinel.
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(*self.inner, Inner::Empty)
    }

    /// Reference identity.
    #[inline]
    pub fn ptr_eq(&self, other: &Error) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Returns the wrapped standard error if this is a leaf.
    pub fn as_leaf(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        match &*self.inner {
            Inner::Leaf(error) => Some(error.as_ref()),
            _ => None,
        }
    }

    /// Returns a new chain with `value` attached under `key`. `self` is untouched.
    #[inline]
    pub fn attach(&self, key: Key, value: Value) -> Error {
        Error { inner: Arc::new(Inner::Node(Node { parent: self.clone(), key, value })) }
    }

    /// Applies attachments in order, oldest first.
    pub fn with<I>(self, attachments: I) -> Error
    where
        I: IntoIterator<Item = Attachment>,
    {
        attachments
            .into_iter()
            .fold(self, |error, attachment| attachment.apply(error))
    }

    /// Replays every attachment of `other` on top of `self`.
    pub fn with_attachments_of(self, other: &Error) -> Error {
        self.with(other.attachments())
    }

    /// Decomposes the head node into `(key, value, parent)`.
    #[inline]
    pub fn node(&self) -> Option<(&Key, &Value, &Error)> {
        match &*self.inner {
            Inner::Node(node) => Some((&node.key, &node.value, &node.parent)),
            _ => None,
        }
    }

    /// Single-level unwrap: the chain this node was attached to.
    #[inline]
    pub fn parent(&self) -> Option<&Error> {
        self.node().map(|(_, _, parent)| parent)
    }

    /// Unwraps repeatedly down to the terminal error (the sentinel or a leaf).
    pub fn cause(&self) -> &Error {
        let mut current = self;
        while let Some(parent) = current.parent() {
            current = parent;
        }
        current
    }

    /// Returns the most recently attached value under `key`.
    ///
    /// Values that are themselves chains are searched before the walk moves
    /// past them, so attributes of an attached sub-error are visible here.
    pub fn get(&self, key: &Key) -> Option<Value> {
        let mut current = self;
        while let Some((node_key, value, parent)) = current.node() {
            if node_key == key {
                return Some(value.clone());
            }
            if let Some(nested) = value.as_value_lookup().and_then(|lookup| lookup.lookup(key)) {
                return Some(nested);
            }
            current = parent;
        }
        None
    }

    /// Returns every value stored under `key`, oldest first.
    ///
    /// A nested value exposing only single-value lookup contributes at most
    /// its most recent value.
    pub fn get_all(&self, key: &Key) -> Vec<Value> {
        let mut newest_first: ErrorVec<Value> = ErrorVec::new();
        let mut current = self;
        while let Some((node_key, value, parent)) = current.node() {
            if node_key == key {
                newest_first.push(value.clone());
            }
            if let Some(multi) = value.as_multi_value_lookup() {
                newest_first.extend(multi.lookup_all(key).into_iter().rev());
            } else if let Some(nested) = value.as_value_lookup().and_then(|lookup| lookup.lookup(key)) {
                newest_first.push(nested);
            }
            current = parent;
        }
        newest_first.into_iter().rev().collect()
    }

    /// Cause-or-latest identity test.
    ///
    /// True when `target` is the terminal cause, or the sub-error most recently
    /// attached under [`ERROR`]. Once a newer sub-error is attached, older ones
    /// stop matching.
    pub fn is<E>(&self, target: &E) -> bool
    where
        E: AsRef<Error> + ?Sized,
    {
        let target = target.as_ref();
        if self.cause().ptr_eq(target) {
            return true;
        }
        ERROR.get(self).is_some_and(|latest| latest.ptr_eq(target))
    }

    /// Matches the cause, any level of this chain, or any sub-error attached
    /// at any depth.
    pub fn is_any<E>(&self, target: &E) -> bool
    where
        E: AsRef<Error> + ?Sized,
    {
        let target = target.as_ref();
        let mut current = self;
        loop {
            if current.ptr_eq(target) {
                return true;
            }
            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }
        ERROR.get_all(self).iter().any(|attached| attached.ptr_eq(target))
    }

    /// Decomposes the chain into the attach operations that built it, oldest first.
    pub fn attachments(&self) -> Vec<Attachment> {
        let mut attachments = Vec::new();
        let mut current = self;
        while let Some((key, value, parent)) = current.node() {
            attachments.push(Attachment::new(key.clone(), value.clone()));
            current = parent;
        }
        attachments.reverse();
        attachments
    }
}

impl Default for Error {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for Error {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Error {}

impl AsRef<Error> for Error {
    #[inline]
    fn as_ref(&self) -> &Error {
        self
    }
}

impl From<&str> for Error {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for Error {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<Box<dyn StdError + Send + Sync>> for Error {
    fn from(error: Box<dyn StdError + Send + Sync>) -> Self {
        Self::from_boxed(error)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &*self.inner {
            Inner::Empty => None,
            Inner::Leaf(error) => error.source(),
            Inner::Node(node) if node.parent.is_empty() => None,
            Inner::Node(node) => Some(&node.parent),
        }
    }
}

impl ValueLookup for Error {
    #[inline]
    fn lookup(&self, key: &Key) -> Option<Value> {
        self.get(key)
    }
}

impl MultiValueLookup for Error {
    #[inline]
    fn lookup_all(&self, key: &Key) -> Vec<Value> {
        self.get_all(key)
    }
}

impl AttrValue for Error {
    fn as_value_lookup(&self) -> Option<&dyn ValueLookup> {
        Some(self)
    }

    fn as_multi_value_lookup(&self) -> Option<&dyn MultiValueLookup> {
        Some(self)
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
