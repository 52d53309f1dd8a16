//! Payloads that can be attached to an error chain.
//!
//! Anything stored on a chain implements [`AttrValue`]. The trait carries the
//! two capabilities the chain walk dispatches on ([`ValueLookup`] and
//! [`MultiValueLookup`]) and the JSON projection used by the structured view.
//! Primitive payloads (strings, integers, floats, `bool`) are covered here;
//! custom types only need `impl AttrValue for MyType {}` on top of
//! `Debug + Display`.

use crate::traits::{MultiValueLookup, ValueLookup};
use core::any::Any;
use core::fmt;
use std::sync::Arc;

/// Shared handle to a value stored on an error chain.
pub type Value = Arc<dyn AttrValue>;

/// Object-safe access to [`Any`] for attached values.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A value that can be attached to an [`Error`](crate::Error) chain.
pub trait AttrValue: AsAny + fmt::Debug + fmt::Display + Send + Sync {
    /// Name of the concrete type, used in type-mismatch reports.
    fn type_name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }

    /// Exposes single-value lookup when the value is itself a chain.
    fn as_value_lookup(&self) -> Option<&dyn ValueLookup> {
        None
    }

    /// Exposes multi-value lookup when the value is itself a chain.
    fn as_multi_value_lookup(&self) -> Option<&dyn MultiValueLookup> {
        None
    }

    /// Projection used by the structured view. Defaults to the `Display` string.
    fn to_json(&self) -> serde_json::Value {
        serde_json::Value::String(self.to_string())
    }
}

impl dyn AttrValue {
    /// Returns the value as `T` if that is its concrete type.
    #[inline]
    pub fn downcast_ref<T: AttrValue>(&self) -> Option<&T> {
        AsAny::as_any(self).downcast_ref::<T>()
    }

    /// Returns `true` if the concrete type is `T`.
    #[inline]
    pub fn is<T: AttrValue>(&self) -> bool {
        AsAny::as_any(self).is::<T>()
    }
}

macro_rules! json_values {
    ($($ty:ty),* $(,)?) => {
        $(
            impl AttrValue for $ty {
                fn to_json(&self) -> serde_json::Value {
                    serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
                }
            }
        )*
    };
}

json_values!(String, &'static str, bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);
