//! Classification getters for logging and response building.
//!
//! Each getter reads the latest [`Meta`](crate::Meta) on the chain. Without
//! one, [`code`] and [`message`] fall back to the `Unknown` classification
//! for a present error and to `Ok` for an absent one.
//!
//! # Examples
//!
//! ```
//! use error_meta::{extract, Error};
//!
//! let plain = Error::new("boom");
//! assert_eq!(extract::code(Some(&plain)), "unknown(2)");
//! assert_eq!(extract::message(None), "success");
//! assert_eq!(extract::source(Some(&plain)), "");
//! ```

use crate::attr::{ERROR, META, STATUS};
use crate::meta::{Code, MetaError};
use crate::types::{Error, Value};
use std::collections::HashMap;
use std::sync::Arc;

pub const APP_FIELD: &str = "app_name";
pub const SOURCE_FIELD: &str = "source";
pub const CODE_FIELD: &str = "code";
pub const MESSAGE_FIELD: &str = "message";

/// Caller-supplied getter contributing one `(name, value)` pair to [`attrs`].
pub type AttrFn = Box<dyn Fn(Option<&Error>) -> (String, Value)>;

/// Owning application of the latest classification, or empty.
pub fn app(error: Option<&Error>) -> String {
    META.get(error).map(|meta| meta.app()).unwrap_or_default()
}

/// Source of the latest classification, or empty.
pub fn source(error: Option<&Error>) -> String {
    META.get(error)
        .map(|meta| meta.source().to_owned())
        .unwrap_or_default()
}

pub fn code(error: Option<&Error>) -> String {
    match META.get(error) {
        Some(meta) => meta.code().to_owned(),
        None => fallback(error).code().to_owned(),
    }
}

pub fn message(error: Option<&Error>) -> String {
    match META.get(error) {
        Some(meta) => meta.message().to_owned(),
        None => fallback(error).message().to_owned(),
    }
}

fn fallback(error: Option<&Error>) -> Code {
    if error.is_some() {
        Code::Unknown
    } else {
        Code::Ok
    }
}

/// The four classification fields plus status, then each extra getter's
/// pair. Later pairs overwrite earlier ones.
pub fn attrs(error: Option<&Error>, extra: &[AttrFn]) -> HashMap<String, Value> {
    let mut map: HashMap<String, Value> = HashMap::with_capacity(5 + extra.len());
    map.insert(APP_FIELD.to_owned(), Arc::new(app(error)));
    map.insert(SOURCE_FIELD.to_owned(), Arc::new(source(error)));
    map.insert(CODE_FIELD.to_owned(), Arc::new(code(error)));
    map.insert(MESSAGE_FIELD.to_owned(), Arc::new(message(error)));
    if let Some(status) = STATUS.get(error) {
        map.insert(STATUS.name().to_owned(), Arc::new(status));
    }
    for getter in extra {
        let (name, value) = getter(error);
        map.insert(name, value);
    }
    map
}

/// The cause followed by every sub-error attached under [`ERROR`], oldest first.
pub fn all_errors(error: &Error) -> Vec<Error> {
    let mut errors = vec![error.cause().clone()];
    errors.extend(ERROR.get_all(error));
    errors
}

/// The newest attached sub-error that carries a classification.
///
/// Plain sub-errors attached after it are skipped.
pub fn latest_meta_error(error: &Error) -> Option<MetaError> {
    ERROR.get_all(error)
        .iter()
        .rev()
        .find_map(MetaError::from_error)
}
