//! Attribute-carrying error values with application-scoped classification.
//!
//! An [`Error`] is an immutable chain: a base error plus any number of
//! `(key, value)` nodes attached by typed [`Attr`] handles. A [`Meta`]
//! classifies an error by `(application, source, code)`, and an [`Adapter`]
//! normalizes classifications where errors cross a boundary.
//!
//! Each submodule re-exports its public surface from here, so consumers can
//! simply depend on `error_meta::*` or pick focused pieces as needed.
//!
//! # Examples
//!
//! ## Attaching and reading attributes
//!
//! ```
//! use error_meta::{Error, MESSAGE, STATUS};
//!
//! let err = MESSAGE.attach(&Error::new("record missing"), "loading user".into());
//! let err = STATUS.attach(&err, 404);
//!
//! assert_eq!(err.to_string(), "record missing:msg={loading user}:status={404}");
//! assert_eq!(STATUS.get(&err), Some(404));
//! assert_eq!(err.cause().to_string(), "record missing");
//! ```
//!
//! ## Classifying
//!
//! ```
//! use error_meta::{Error, Runtime, RuntimeConfig, ERROR, STATUS};
//!
//! let runtime = Runtime::with_config(RuntimeConfig::default().with_app_name("svc-a"));
//! let not_found = runtime.new_meta_error("svc-a/errors", "not_found(5)", "not found", [STATUS.option(404)]);
//!
//! let base = Error::new("record missing");
//! let err = ERROR.attach(&base, not_found.as_error().clone());
//!
//! assert_eq!(STATUS.get(&err), Some(404));
//! assert!(err.is(&not_found));
//! assert!(err.is(&base));
//! ```

/// Boundary adapter normalizing classifications
pub mod adapter;
/// Typed attributes and the well-known attribute set
pub mod attr;
/// Message and stack conveniences
pub mod compat;
/// Classification getters with success/unknown fallbacks
pub mod extract;
/// Boot-time attribute setters
pub mod hook;
/// Formatting and impl macros
pub mod macros;
/// Classification records, meta errors and built-in codes
pub mod meta;
/// Convenience re-exports for quick starts
pub mod prelude;
/// Registries and the process runtime
pub mod runtime;
/// Capability traits and `Result` extensions
pub mod traits;
/// The value chain and its views
pub mod types;

pub use adapter::{adapt, adapt_with, AdaptError, Adapter, AdapterBuilder};
pub use attr::{
    AnyAttr, Attr, AttrDescriptor, AttrOptions, Attrs, DefaultFn, CALLER, ERROR, MESSAGE, META, OVERRIDABLE, STACK,
    STATUS,
};
pub use meta::{AppName, Code, Meta, MetaError};
pub use meta::{
    ABORTED, ALREADY_EXISTS, CANCELED, DATA_LOSS, DEADLINE_EXCEEDED, FAILED_PRECONDITION, INTERNAL, INVALID_ARGUMENT,
    NOT_FOUND, OK, OUT_OF_RANGE, PERMISSION_DENIED, RESOURCE_EXHAUSTED, UNAUTHENTICATED, UNAVAILABLE, UNIMPLEMENTED,
    UNKNOWN,
};
pub use runtime::{application_name, meta_error, new_meta_error, set_application_name, RegistryError, Runtime, RuntimeConfig};
pub use traits::*;
pub use types::{
    format_mode, set_format_mode, Attachment, AttrMap, AttrValue, AsAny, DisplayWith, Error, ErrorVec, FormatMode,
    Key, Value,
};
