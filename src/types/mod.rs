//! Chain representation and its views.
//!
//! - [`Key`]: opaque attribute identity
//! - [`AttrValue`] / [`Value`]: payloads stored on a chain
//! - [`Error`] / [`Attachment`]: the immutable value chain and replayable attach operations
//! - [`FormatMode`]: process-wide string rendering mode
//! - [`AttrMap`]: flattened name/value view
//!
//! # Examples
//!
//! ```
//! use error_meta::{Error, MESSAGE, STATUS};
//!
//! let err = STATUS.attach(&MESSAGE.attach(&Error::new("timeout"), "calling billing".into()), 504);
//!
//! assert_eq!(err.to_string(), "timeout:msg={calling billing}:status={504}");
//! assert_eq!(STATUS.get(&err), Some(504));
//! ```
use smallvec::SmallVec;

pub mod error;
pub mod error_formatter;
pub mod key;
pub mod value;
pub mod view;

pub use error::{Attachment, Error};
pub use error_formatter::{format_mode, set_format_mode, DisplayWith, FormatMode};
pub use key::Key;
pub use value::{AsAny, AttrValue, Value};
pub use view::{AttrMap, META_APP_FIELD, META_CODE_FIELD, META_MESSAGE_FIELD, META_SOURCE_FIELD};

/// SmallVec-backed collection used while walking a chain.
///
/// Uses inline storage for up to 4 elements to avoid heap allocations
/// for the short chains most call paths build.
pub type ErrorVec<E> = SmallVec<[E; 4]>;
