//! Message-and-stack conveniences in the style of classic error-wrapping
//! libraries, implemented with [`MESSAGE`] and [`STACK`].
//!
//! # Examples
//!
//! ```
//! use error_meta::{compat, Error, MESSAGE, STACK};
//!
//! let err = compat::wrap(&Error::new("eof"), "reading header");
//! assert_eq!(MESSAGE.get(&err).as_deref(), Some("reading header"));
//! assert!(STACK.get(&err).is_some());
//! ```

use crate::attr::{MESSAGE, STACK};
use crate::types::{AttrValue, Error};
use core::fmt;
use std::backtrace::Backtrace;
use std::sync::Arc;

/// A backtrace captured when the value was created.
///
/// Capture follows `RUST_BACKTRACE`/`RUST_LIB_BACKTRACE`; when disabled the
/// stack renders as `disabled backtrace`.
#[derive(Clone)]
pub struct Stack(Arc<Backtrace>);

impl Stack {
    pub fn capture() -> Self {
        Self(Arc::new(Backtrace::capture()))
    }

    #[inline]
    pub fn backtrace(&self) -> &Backtrace {
        &self.0
    }
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

impl fmt::Debug for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl AttrValue for Stack {}

/// Attaches `message` under [`MESSAGE`].
#[inline]
pub fn with_message(error: &Error, message: impl Into<String>) -> Error {
    MESSAGE.attach(error, message.into())
}

/// Attaches a freshly captured [`Stack`].
#[inline]
pub fn with_stack(error: &Error) -> Error {
    STACK.attach(error, Stack::capture())
}

/// Attaches `message`, then a freshly captured [`Stack`].
pub fn wrap(error: &Error, message: impl Into<String>) -> Error {
    with_stack(&with_message(error, message))
}
