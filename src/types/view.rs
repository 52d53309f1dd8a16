//! Structured and flattened views of a chain.
//!
//! Both views are read-only projections for logging and telemetry. They are not
//! a wire format and nothing parses them back.

use crate::meta::Meta;
use crate::types::error::Inner;
use crate::types::{Error, Value};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use std::sync::Arc;

/// Flattened `name -> value` view of a chain.
pub type AttrMap = HashMap<String, Value>;

/// Field names used when a [`Meta`] is flattened into an [`AttrMap`] or JSON.
pub const META_APP_FIELD: &str = "meta.app";
pub const META_SOURCE_FIELD: &str = "meta.source";
pub const META_CODE_FIELD: &str = "meta.code";
pub const META_MESSAGE_FIELD: &str = "meta.message";

impl Serialize for Error {
    /// Each node serializes as `{error, key, value}`; the `error` field is
    /// omitted when the parent is the empty sentinel. Leaves serialize as
    /// their message.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match &*self.inner {
            Inner::Empty => serializer.serialize_map(Some(0))?.end(),
            Inner::Leaf(leaf) => serializer.serialize_str(&leaf.to_string()),
            Inner::Node(node) => {
                let mut map = serializer.serialize_map(None)?;
                if !node.parent.is_empty() {
                    map.serialize_entry("error", &node.parent)?;
                }
                map.serialize_entry("key", &node.key.to_string())?;
                map.serialize_entry("value", &node.value.to_json())?;
                map.end()
            },
        }
    }
}

impl Error {
    /// Flattens the chain into a single-level map keyed by display name.
    ///
    /// - values under unnamed keys are dropped
    /// - the walk does not descend into values, except that a [`Meta`] value
    ///   adds its four `meta.*` fields and a nested chain merges its own map
    /// - on a name collision the most recent attachment wins
    ///
    /// # Examples
    ///
    /// ```
    /// use error_meta::{Error, MESSAGE};
    ///
    /// let err = MESSAGE.attach(&MESSAGE.attach(&Error::new("io"), "first".into()), "second".into());
    /// let map = err.to_map();
    /// assert_eq!(map["msg"].downcast_ref::<String>().map(String::as_str), Some("second"));
    /// ```
    pub fn to_map(&self) -> AttrMap {
        let mut named = Vec::new();
        let mut current = self;
        while let Some((key, value, parent)) = current.node() {
            if let Some(name) = key.name() {
                named.push((name, value));
            }
            current = parent;
        }
        let mut map = AttrMap::with_capacity(named.len() + 5);
        for (name, value) in named.into_iter().rev() {
            map.insert(name.to_owned(), value.clone());
            flatten_into(&mut map, value);
        }
        map
    }
}

/// Adds the derived fields of `value` to `map`.
pub(crate) fn flatten_into(map: &mut AttrMap, value: &Value) {
    if let Some(meta) = value.downcast_ref::<Meta>() {
        map.insert(META_APP_FIELD.to_owned(), Arc::new(meta.app()));
        map.insert(META_SOURCE_FIELD.to_owned(), Arc::new(meta.source().to_owned()));
        map.insert(META_CODE_FIELD.to_owned(), Arc::new(meta.code().to_owned()));
        map.insert(META_MESSAGE_FIELD.to_owned(), Arc::new(meta.message().to_owned()));
    } else if let Some(nested) = value.downcast_ref::<Error>() {
        map.extend(nested.to_map());
    }
}
