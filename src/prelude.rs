//! Convenience re-exports for common usage patterns.
//!
//! ```
//! use error_meta::prelude::*;
//! ```
//!
//! # What's Included
//!
//! - **Macros**: [`errorf!`], [`wrapf!`], [`with_messagef!`]
//! - **Types**: [`Error`], [`Attr`], [`AttrOptions`], [`MetaError`], [`Adapter`]
//! - **Attributes**: [`ERROR`], [`META`], [`MESSAGE`], [`STATUS`], [`CALLER`]
//! - **Traits**: [`ResultExt`]
//!
//! # Examples
//!
//! ```
//! use error_meta::prelude::*;
//!
//! fn load_config() -> Result<String> {
//!     std::fs::read_to_string("/definitely/not/here.toml")
//!         .map_err(Error::from_std)
//!         .ctx("loading configuration")
//! }
//!
//! let err = load_config().unwrap_err();
//! assert_eq!(MESSAGE.get(&err).as_deref(), Some("loading configuration"));
//! assert_eq!(STATUS.get(&err), Some(500));
//! ```

// Macros
pub use crate::{errorf, with_messagef, wrapf};

// Core types
pub use crate::adapter::Adapter;
pub use crate::attr::{Attr, AttrOptions, CALLER, ERROR, MESSAGE, META, STATUS};
pub use crate::meta::MetaError;
pub use crate::types::Error;

// Traits
pub use crate::traits::ResultExt;

/// Result type alias for functions returning a chain.
pub type Result<T, E = Error> = core::result::Result<T, E>;
