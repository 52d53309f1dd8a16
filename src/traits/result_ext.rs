//! Extension trait for attaching context to `Result` errors.
//!
//! This module provides [`ResultExt`], which converts the error side of a
//! `Result` into an [`Error`] chain and attaches values without verbose
//! `.map_err()` closures.
//!
//! # Examples
//!
//! ```
//! use error_meta::traits::ResultExt;
//! use error_meta::{Error, CALLER};
//!
//! fn load() -> Result<String, Error> {
//!     Err::<String, _>("config missing")
//!         .ctx("loading configuration")
//!         .attach(&CALLER, "load".to_string())
//! }
//!
//! let err = load().unwrap_err();
//! assert_eq!(CALLER.get(&err).as_deref(), Some("load"));
//! ```

use crate::attr::{Attr, ERROR, MESSAGE};
use crate::meta::MetaError;
use crate::types::{AttrValue, Error};

/// Extension trait for attaching context to a failed `Result`.
///
/// The error type only needs to convert into [`Error`]; plain messages,
/// boxed standard errors and existing chains all qualify.
pub trait ResultExt<T> {
    /// Attaches a message under [`MESSAGE`].
    fn ctx(self, message: impl Into<String>) -> Result<T, Error>;

    /// Attaches a lazily built message under [`MESSAGE`].
    ///
    /// The closure only runs on the error path.
    fn ctx_with<F>(self, f: F) -> Result<T, Error>
    where
        F: FnOnce() -> String;

    /// Attaches `value` under `attr`.
    fn attach<V>(self, attr: &Attr<V>, value: V) -> Result<T, Error>
    where
        V: AttrValue + Clone;

    /// Attaches `meta_error` as the newest classification.
    fn classify(self, meta_error: &MetaError) -> Result<T, Error>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<Error>,
{
    #[inline]
    fn ctx(self, message: impl Into<String>) -> Result<T, Error> {
        self.map_err(|e| MESSAGE.attach(&e.into(), message.into()))
    }

    #[inline]
    fn ctx_with<F>(self, f: F) -> Result<T, Error>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| MESSAGE.attach(&e.into(), f()))
    }

    #[inline]
    fn attach<V>(self, attr: &Attr<V>, value: V) -> Result<T, Error>
    where
        V: AttrValue + Clone,
    {
        self.map_err(|e| attr.attach(&e.into(), value))
    }

    #[inline]
    fn classify(self, meta_error: &MetaError) -> Result<T, Error> {
        self.map_err(|e| ERROR.attach(&e.into(), meta_error.as_error().clone()))
    }
}
