//! Error classification: [`Meta`] records, [`MetaError`]s and their registry.
//!
//! A [`Meta`] names a classification by `(application, source, code)` plus a
//! human message. Its owning application is late-bound to an [`AppName`] cell,
//! so a `Meta` created before startup finishes still reports the final name.
//! Identity is by reference: two separately built metas with equal fields are
//! different classifications.
//!
//! # Examples
//!
//! ```
//! use error_meta::{Runtime, RuntimeConfig};
//!
//! let runtime = Runtime::with_config(RuntimeConfig::default().with_app_name("svc-a"));
//! let meta = runtime.new_meta("svc-a/errors", "not_found(5)", "not found");
//! assert_eq!(meta.id(), "svc-a:svc-a/errors:not_found(5)");
//!
//! runtime.set_application_name("svc-b");
//! assert_eq!(meta.id(), "svc-b:svc-a/errors:not_found(5)");
//! assert_eq!(meta.to_string(), "source=errors;code=not_found(5)");
//! ```

mod codes;
mod meta_error;
pub(crate) mod registry;

pub use codes::*;
pub use meta_error::MetaError;

use crate::types::view::{META_APP_FIELD, META_CODE_FIELD, META_MESSAGE_FIELD, META_SOURCE_FIELD};
use crate::types::AttrValue;
use core::fmt;
use parking_lot::RwLock;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::sync::Arc;

/// Shared application-name cell.
///
/// The name changes only through
/// [`Runtime::set_application_name`](crate::Runtime::set_application_name),
/// which re-files registered metas under their new ids.
#[derive(Clone, Default)]
pub struct AppName(Arc<RwLock<String>>);

impl AppName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(Arc::new(RwLock::new(name.into())))
    }

    #[inline]
    pub fn get(&self) -> String {
        self.0.read().clone()
    }

    /// Replaces the name and returns the previous one.
    pub(crate) fn set(&self, name: impl Into<String>) -> String {
        core::mem::replace(&mut *self.0.write(), name.into())
    }

    #[inline]
    pub fn ptr_eq(&self, other: &AppName) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for AppName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AppName").field(&*self.0.read()).finish()
    }
}

#[derive(Clone)]
enum Owner {
    Live(AppName),
    Fixed(Arc<str>),
}

struct MetaInner {
    owner: Owner,
    source: String,
    code: String,
    message: String,
}

/// An immutable classification record.
#[derive(Clone)]
pub struct Meta(Arc<MetaInner>);

impl Meta {
    /// Creates a meta owned by whatever name `app` holds at read time.
    pub fn new(app: &AppName, source: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_owner(Owner::Live(app.clone()), source, code, message)
    }

    /// Creates a meta owned by a fixed application, typically one decoded from
    /// an upstream response.
    pub fn foreign(
        app: impl Into<Arc<str>>,
        source: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::with_owner(Owner::Fixed(app.into()), source, code, message)
    }

    fn with_owner(owner: Owner, source: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self(Arc::new(MetaInner { owner, source: source.into(), code: code.into(), message: message.into() }))
    }

    /// Owning application, read at call time.
    pub fn app(&self) -> String {
        match &self.0.owner {
            Owner::Live(app) => app.get(),
            Owner::Fixed(app) => app.to_string(),
        }
    }

    #[inline]
    pub fn source(&self) -> &str {
        &self.0.source
    }

    #[inline]
    pub fn code(&self) -> &str {
        &self.0.code
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0.message
    }

    /// `app:source:code`, recomputed on every call.
    pub fn id(&self) -> String {
        format!("{}:{}:{}", self.app(), self.0.source, self.0.code)
    }

    /// The id this meta will have once `cell` holds `app`.
    pub(crate) fn id_under(&self, cell: &AppName, app: &str) -> String {
        match &self.0.owner {
            Owner::Live(owner) if owner.ptr_eq(cell) => format!("{app}:{}:{}", self.0.source, self.0.code),
            _ => self.id(),
        }
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Meta) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Meta {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Meta {}

/// Last `/`-separated segment of a source path.
fn package_name(source: &str) -> &str {
    source.rsplit('/').next().unwrap_or(source)
}

impl fmt::Display for Meta {
    /// `source=<last segment>;code=<code>`, or `app:source:code:message` with `{:#}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return write!(f, "{}:{}:{}:{}", self.app(), self.0.source, self.0.code, self.0.message);
        }
        write!(f, "source={};code={}", package_name(&self.0.source), self.0.code)
    }
}

impl fmt::Debug for Meta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Meta")
            .field("app", &self.app())
            .field("source", &self.0.source)
            .field("code", &self.0.code)
            .field("message", &self.0.message)
            .finish()
    }
}

impl Serialize for Meta {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry(META_APP_FIELD, &self.app())?;
        map.serialize_entry(META_SOURCE_FIELD, &self.0.source)?;
        map.serialize_entry(META_CODE_FIELD, &self.0.code)?;
        map.serialize_entry(META_MESSAGE_FIELD, &self.0.message)?;
        map.end()
    }
}

impl AttrValue for Meta {
    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
