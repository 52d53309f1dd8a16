//! Capability traits the chain walk dispatches on.
//!
//! When a value attached to an [`Error`](crate::Error) is itself a chain,
//! [`Error::get`](crate::Error::get) and [`Error::get_all`](crate::Error::get_all)
//! descend into it through these traits. A value type opts in by returning
//! `Some(self)` from [`AttrValue::as_value_lookup`](crate::AttrValue::as_value_lookup)
//! or [`AttrValue::as_multi_value_lookup`](crate::AttrValue::as_multi_value_lookup).

use crate::types::{Key, Value};

/// Looks up the most recent value stored under a key.
pub trait ValueLookup {
    fn lookup(&self, key: &Key) -> Option<Value>;
}

/// Looks up every value stored under a key, oldest first.
pub trait MultiValueLookup: ValueLookup {
    fn lookup_all(&self, key: &Key) -> Vec<Value>;
}
