//! Core traits for chain lookup and ergonomic attachment.
//!
//! - [`ValueLookup`] / [`MultiValueLookup`]: capabilities an attached value
//!   exposes when it is itself a chain, so lookups can descend into it
//! - [`ResultExt`]: attach messages, attributes and classifications to the
//!   error side of a `Result`
//!
//! # Examples
//!
//! ```
//! use error_meta::traits::{ResultExt, ValueLookup};
//! use error_meta::{Error, MESSAGE};
//!
//! let err = Err::<(), _>("boom").ctx("while syncing").unwrap_err();
//! let outer = Error::new("outer").attach(error_meta::ERROR.key().clone(), std::sync::Arc::new(err));
//! assert!(outer.lookup(MESSAGE.key()).is_some());
//! ```

pub mod lookup;
pub mod result_ext;

pub use lookup::{MultiValueLookup, ValueLookup};
pub use result_ext::ResultExt;
