//! Typed, named accessors for values on an error chain.
//!
//! An [`Attr<T>`] binds a fresh [`Key`] to one value type `T`, an optional
//! default-value policy and a description. It is the only typed way to attach
//! and read values: [`Attr::attach`] wraps a chain in a new node,
//! [`Attr::get`] returns the most recent value (or the default), and
//! [`Attr::get_all`] collects every value oldest first.
//!
//! # Examples
//!
//! ```
//! use error_meta::{Attr, AttrOptions, Error};
//!
//! let retries: Attr<u32> = Attr::define(
//!     "retries",
//!     AttrOptions::new()
//!         .description("retry count as an attr")
//!         .default_fn(|_| 0)
//!         .do_not_register(),
//! );
//!
//! let err = retries.attach(&Error::new("flaky"), 3);
//! assert_eq!(retries.get(&err), Some(3));
//! assert_eq!(retries.get(&Error::new("other")), Some(0));
//! ```

mod builtin;
pub(crate) mod registry;

pub use builtin::{CALLER, ERROR, MESSAGE, META, OVERRIDABLE, STACK, STATUS};
pub(crate) use builtin::register_builtins;

use crate::runtime;
use crate::types::view::flatten_into;
use crate::types::{AsAny, Attachment, AttrMap, AttrValue, Error, Key, Value};
use core::fmt;
use serde::{Serialize, Serializer};
use std::sync::Arc;

/// Default-value policy: computes a value from the (possibly absent) error.
pub type DefaultFn<T> = Arc<dyn Fn(Option<&Error>) -> T + Send + Sync>;

/// Construction options for [`Attr`].
pub struct AttrOptions<T> {
    pub(crate) default_fn: Option<DefaultFn<T>>,
    pub(crate) description: String,
    pub(crate) register: bool,
    pub(crate) reject_duplicate_names: Option<bool>,
}

impl<T> Default for AttrOptions<T> {
    fn default() -> Self {
        Self { default_fn: None, description: String::new(), register: true, reject_duplicate_names: None }
    }
}

impl<T> AttrOptions<T> {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Value returned by [`Attr::get`] when no node carries the key.
    pub fn default_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(Option<&Error>) -> T + Send + Sync + 'static,
    {
        self.default_fn = Some(Arc::new(f));
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Skips publishing the attribute in the registry.
    pub fn do_not_register(mut self) -> Self {
        self.register = false;
        self
    }

    /// Fails registration when the display name is already taken.
    ///
    /// When unset, the runtime's
    /// [`RuntimeConfig::reject_duplicate_attr_names`](crate::RuntimeConfig) applies.
    pub fn reject_duplicate_names(mut self, reject: bool) -> Self {
        self.reject_duplicate_names = Some(reject);
        self
    }
}

/// A typed accessor bound to one unique [`Key`].
pub struct Attr<T> {
    key: Key,
    default_fn: Option<DefaultFn<T>>,
    description: Arc<str>,
}

impl<T> Clone for Attr<T> {
    fn clone(&self) -> Self {
        Self { key: self.key.clone(), default_fn: self.default_fn.clone(), description: self.description.clone() }
    }
}

impl<T> fmt::Debug for Attr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attr")
            .field("key", &self.key)
            .field("type", &core::any::type_name::<T>())
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl<T> Attr<T>
where
    T: AttrValue + Clone,
{
    /// Defines a new attribute in the process runtime.
    ///
    /// # Panics
    ///
    /// Panics if duplicate-name rejection is in effect and the name is taken.
    pub fn define(name: &str, options: AttrOptions<T>) -> Self {
        runtime::process().define_attr(name, options)
    }

    /// Defines a new attribute with no default and no description.
    pub fn new(name: &str) -> Self {
        Self::define(name, AttrOptions::new())
    }

    /// Builds the handle without touching any registry.
    pub(crate) fn from_options(name: &str, options: &AttrOptions<T>) -> Self {
        Self {
            key: Key::new(name),
            default_fn: options.default_fn.clone(),
            description: options.description.as_str().into(),
        }
    }

    #[inline]
    pub fn key(&self) -> &Key {
        &self.key
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.key.name().unwrap_or_default()
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    pub fn has_default(&self) -> bool {
        self.default_fn.is_some()
    }

    /// Returns a new chain with `value` attached on top of `error`.
    #[inline]
    pub fn attach(&self, error: &Error, value: T) -> Error {
        error.attach(self.key.clone(), Arc::new(value))
    }

    /// Packages `value` as a replayable [`Attachment`].
    #[inline]
    pub fn option(&self, value: T) -> Attachment {
        Attachment::new(self.key.clone(), Arc::new(value))
    }

    /// Returns the most recently attached value, or the default.
    ///
    /// `None` means neither a value nor a default policy exists. The default
    /// policy also runs for an absent error.
    ///
    /// # Panics
    ///
    /// Panics if the value stored under this key is not a `T`.
    pub fn get<'a>(&self, error: impl Into<Option<&'a Error>>) -> Option<T> {
        let error = error.into();
        if let Some(value) = error.and_then(|e| e.get(&self.key)) {
            return Some(self.downcast(&value));
        }
        self.default_fn.as_ref().map(|f| f(error))
    }

    /// Like [`Attr::get`], falling back to `T::default()`.
    pub fn get_or_default<'a>(&self, error: impl Into<Option<&'a Error>>) -> T
    where
        T: Default,
    {
        self.get(error).unwrap_or_default()
    }

    /// Returns every value attached under this key, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if any value stored under this key is not a `T`.
    pub fn get_all(&self, error: &Error) -> Vec<T> {
        error
            .get_all(&self.key)
            .iter()
            .map(|value| self.downcast(value))
            .collect()
    }

    fn downcast(&self, value: &Value) -> T {
        match value.downcast_ref::<T>() {
            Some(typed) => typed.clone(),
            None => {
                let expected = core::any::type_name::<T>();
                let found = value.type_name();
                tracing::error!(attr = %self.key, expected, found, "attr got value of unexpected type");
                panic!("attr {} got invalid type value, expect {expected}, got {found}", self.key);
            },
        }
    }

    /// Serializable description of this attribute.
    pub fn descriptor(&self) -> AttrDescriptor {
        AttrDescriptor {
            type_name: core::any::type_name::<T>(),
            name: self.name().to_owned(),
            description: self.description.to_string(),
            has_default_value_func: self.has_default(),
        }
    }
}

impl<T> Serialize for Attr<T>
where
    T: AttrValue + Clone,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.descriptor().serialize(serializer)
    }
}

/// Public shape of an attribute descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttrDescriptor {
    #[serde(rename = "type")]
    pub type_name: &'static str,
    pub name: String,
    pub description: String,
    pub has_default_value_func: bool,
}

/// Type-erased view of an [`Attr`], used by registries and [`Attrs`].
pub trait AnyAttr: AsAny + Send + Sync {
    fn key(&self) -> &Key;
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn descriptor(&self) -> AttrDescriptor;
    /// [`Attr::get`] boxed as a [`Value`].
    fn get_any(&self, error: Option<&Error>) -> Option<Value>;
}

impl<T> AnyAttr for Attr<T>
where
    T: AttrValue + Clone,
{
    fn key(&self) -> &Key {
        Attr::key(self)
    }

    fn name(&self) -> &str {
        Attr::name(self)
    }

    fn description(&self) -> &str {
        Attr::description(self)
    }

    fn descriptor(&self) -> AttrDescriptor {
        Attr::descriptor(self)
    }

    fn get_any(&self, error: Option<&Error>) -> Option<Value> {
        self.get(error).map(|value| Arc::new(value) as Value)
    }
}

impl Serialize for dyn AnyAttr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.descriptor().serialize(serializer)
    }
}

/// An ordered group of attributes extracted together.
///
/// # Examples
///
/// ```
/// use error_meta::{Attrs, Error, CALLER, MESSAGE};
///
/// let err = CALLER.attach(&MESSAGE.attach(&Error::new("io"), "reading".into()), "load".into());
/// let map = Attrs::new().with(&MESSAGE).with(&CALLER).to_map(&err);
/// assert_eq!(map.len(), 2);
/// ```
#[derive(Clone, Default)]
pub struct Attrs(Vec<Arc<dyn AnyAttr>>);

impl Attrs {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `attr` to the group.
    pub fn with<T>(mut self, attr: &Attr<T>) -> Self
    where
        T: AttrValue + Clone,
    {
        self.0.push(Arc::new(attr.clone()));
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn AnyAttr>> {
        self.0.iter()
    }

    /// Extracts each attribute's raw value into a `name -> value` map, in group
    /// order. Classifications and nested chains are flattened like
    /// [`Error::to_map`].
    pub fn to_map(&self, error: &Error) -> AttrMap {
        let mut map = AttrMap::with_capacity(self.0.len() + 5);
        for attr in &self.0 {
            if let Some(value) = error.get(attr.key()) {
                map.insert(attr.name().to_owned(), value.clone());
                flatten_into(&mut map, &value);
            }
        }
        map
    }
}

impl fmt::Debug for Attrs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter().map(|attr| attr.key())).finish()
    }
}
