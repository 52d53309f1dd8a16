//! The runtime: owner of the attribute registry, the meta registry and the
//! application-name cell.
//!
//! Most programs use the lazily built [`process`] runtime through the free
//! functions in this module and the crate root. Tests that need isolation
//! construct their own [`Runtime`] with [`Runtime::with_config`]; chains built
//! against one runtime stay readable from any other, because well-known
//! attribute handles are shared.
//!
//! # Examples
//!
//! ```
//! use error_meta::{Runtime, RuntimeConfig, STATUS};
//!
//! let runtime = Runtime::with_config(RuntimeConfig::default().with_app_name("svc-a"));
//! let not_found = runtime.new_meta_error("svc-a/errors", "not_found(5)", "not found", [STATUS.option(404)]);
//!
//! assert_eq!(not_found.id(), "svc-a:svc-a/errors:not_found(5)");
//! assert_eq!(runtime.meta_error(&not_found.id()), Some(not_found.clone()));
//!
//! runtime.set_application_name("svc-b");
//! assert!(runtime.meta_error("svc-a:svc-a/errors:not_found(5)").is_none());
//! assert!(runtime.meta_error("svc-b:svc-a/errors:not_found(5)").is_some());
//! ```

use crate::attr::registry::AttrRegistry;
use crate::attr::{register_builtins, AnyAttr, Attr, AttrOptions, ERROR, STATUS};
use crate::meta::registry::MetaRegistry;
use crate::meta::{AppName, Code, Meta, MetaError, SOURCE};
use crate::types::{set_format_mode, AsAny, Attachment, AttrValue, Error, FormatMode, Key};
use core::fmt;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

static PROCESS: LazyLock<Arc<Runtime>> = LazyLock::new(|| Arc::new(Runtime::new()));

/// Registration failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("meta {field} must not be empty")]
    EmptyField { field: &'static str },
    #[error("meta {id} already exists and is not overridable")]
    DuplicateMeta { id: String },
    #[error("renaming application to {app} files two metas under {id}")]
    RenameCollision { app: String, id: String },
    #[error("attr named {name} already exists")]
    DuplicateAttrName { name: String },
    #[error("attr {name} is already published under the same key")]
    DuplicateAttrKey { name: String },
}

/// Runtime construction options.
///
/// # Examples
///
/// ```
/// use error_meta::{FormatMode, RuntimeConfig};
///
/// let config: RuntimeConfig = serde_json::from_str(r#"{"app_name": "svc-a", "format_mode": "no_value"}"#).unwrap();
/// assert_eq!(config.app_name.as_deref(), Some("svc-a"));
/// assert_eq!(config.format_mode, Some(FormatMode::NoValue));
/// assert!(!config.reject_duplicate_attr_names);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Initial application name. Empty when unset.
    pub app_name: Option<String>,
    /// Applied to the process-wide format mode on construction.
    pub format_mode: Option<FormatMode>,
    /// Default for attributes that do not choose a duplicate-name policy.
    pub reject_duplicate_attr_names: bool,
}

impl RuntimeConfig {
    pub fn with_app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    pub fn with_format_mode(mut self, mode: FormatMode) -> Self {
        self.format_mode = Some(mode);
        self
    }

    pub fn reject_duplicate_attr_names(mut self, reject: bool) -> Self {
        self.reject_duplicate_attr_names = reject;
        self
    }
}

/// Registries and application-name cell for one process or test.
pub struct Runtime {
    app: AppName,
    attrs: RwLock<AttrRegistry>,
    metas: RwLock<MetaRegistry>,
    codes: Vec<MetaError>,
    config: RuntimeConfig,
}

impl Runtime {
    #[inline]
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    /// Builds a runtime, publishes the well-known attributes and registers the
    /// built-in [`Code`] classifications.
    pub fn with_config(config: RuntimeConfig) -> Self {
        if let Some(mode) = config.format_mode {
            set_format_mode(mode);
        }
        let mut runtime = Self {
            app: AppName::new(config.app_name.clone().unwrap_or_default()),
            attrs: RwLock::new(AttrRegistry::default()),
            metas: RwLock::new(MetaRegistry::default()),
            codes: Vec::with_capacity(Code::ALL.len()),
            config,
        };
        register_builtins(&runtime);

        let codes: Vec<MetaError> = Code::ALL
            .iter()
            .map(|&code| {
                let meta = runtime.new_meta(SOURCE, code.code(), code.message());
                let meta_error = MetaError::build(meta, [STATUS.option(code.status())]);
                if let Err(err) = runtime.register_meta_error(meta_error.clone()) {
                    tracing::error!(meta_id = %meta_error.id(), %err, "built-in code not registered");
                }
                meta_error
            })
            .collect();
        runtime.codes = codes;
        tracing::debug!(app = %runtime.app_name(), "runtime initialized");
        runtime
    }

    #[inline]
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// The live application-name cell shared by every [`Meta`] of this runtime.
    #[inline]
    pub fn app(&self) -> &AppName {
        &self.app
    }

    pub fn app_name(&self) -> String {
        self.app.get()
    }

    /// Renames the application and re-files every registered meta error under
    /// its new id. On a collision nothing changes.
    pub fn try_set_application_name(&self, name: &str) -> Result<(), RegistryError> {
        self.metas.write().rename(&self.app, name)
    }

    /// Like [`Runtime::try_set_application_name`].
    ///
    /// # Panics
    ///
    /// Panics if two registered metas would share an id under the new name.
    pub fn set_application_name(&self, name: &str) {
        if let Err(err) = self.try_set_application_name(name) {
            tracing::error!(app = %name, %err, "application rename rejected");
            panic!("{err}");
        }
    }

    /// Creates a [`Meta`] owned by this runtime's application, unregistered.
    pub fn new_meta(&self, source: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Meta {
        Meta::new(&self.app, source, code, message)
    }

    /// Builds `Empty -> META(meta) -> attachments...` and registers it.
    pub fn try_new_meta_error<I>(
        &self,
        source: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
        attachments: I,
    ) -> Result<MetaError, RegistryError>
    where
        I: IntoIterator<Item = Attachment>,
    {
        let meta_error = MetaError::build(self.new_meta(source, code, message), attachments);
        self.register_meta_error(meta_error.clone())?;
        Ok(meta_error)
    }

    /// Like [`Runtime::try_new_meta_error`].
    ///
    /// # Panics
    ///
    /// Panics on an empty field or a non-overridable duplicate id.
    pub fn new_meta_error<I>(
        &self,
        source: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
        attachments: I,
    ) -> MetaError
    where
        I: IntoIterator<Item = Attachment>,
    {
        let meta = self.new_meta(source, code, message);
        let meta_error = MetaError::build(meta, attachments);
        if let Err(err) = self.register_meta_error(meta_error.clone()) {
            tracing::error!(meta_id = %meta_error.id(), %err, "meta error registration rejected");
            panic!("{err}");
        }
        meta_error
    }

    pub fn register_meta_error(&self, meta_error: MetaError) -> Result<(), RegistryError> {
        self.metas.write().register(meta_error)
    }

    pub fn meta_error(&self, id: &str) -> Option<MetaError> {
        self.metas.read().get(id)
    }

    /// Snapshot of every registered meta error keyed by id.
    pub fn meta_errors(&self) -> HashMap<String, MetaError> {
        self.metas.read().snapshot()
    }

    /// This runtime's instance of a built-in classification.
    pub fn code(&self, code: Code) -> MetaError {
        self.codes[code.index()].clone()
    }

    #[inline]
    pub fn unknown(&self) -> MetaError {
        self.code(Code::Unknown)
    }

    /// Default upstream mapping: the registered meta error with the same
    /// source and code under the current application.
    pub fn map_by_source_code(&self, upstream: &Meta) -> Option<MetaError> {
        let app = self.app_name();
        let id = format!("{app}:{}:{}", upstream.source(), upstream.code());
        self.meta_error(&id).filter(|local| local.app() == app)
    }

    /// Defines an attribute and, unless opted out, publishes it.
    pub fn try_define_attr<T>(&self, name: &str, options: AttrOptions<T>) -> Result<Attr<T>, RegistryError>
    where
        T: AttrValue + Clone,
    {
        let attr = Attr::from_options(name, &options);
        if options.register {
            let reject = options
                .reject_duplicate_names
                .unwrap_or(self.config.reject_duplicate_attr_names);
            self.insert_attr(&attr, reject)?;
        }
        Ok(attr)
    }

    /// Like [`Runtime::try_define_attr`].
    ///
    /// # Panics
    ///
    /// Panics if duplicate-name rejection is in effect and the name is taken.
    pub fn define_attr<T>(&self, name: &str, options: AttrOptions<T>) -> Attr<T>
    where
        T: AttrValue + Clone,
    {
        match self.try_define_attr(name, options) {
            Ok(attr) => attr,
            Err(err) => {
                tracing::error!(attr = %name, %err, "attr definition rejected");
                panic!("{err}");
            },
        }
    }

    /// Publishes an existing handle, e.g. one defined with
    /// [`AttrOptions::do_not_register`] or in another runtime. A handle already
    /// published here is rejected with [`RegistryError::DuplicateAttrKey`].
    pub fn register_attr<T>(&self, attr: &Attr<T>) -> Result<(), RegistryError>
    where
        T: AttrValue + Clone,
    {
        self.insert_attr(attr, self.config.reject_duplicate_attr_names)
    }

    pub(crate) fn publish_attr<T>(&self, attr: &Attr<T>)
    where
        T: AttrValue + Clone,
    {
        if let Err(err) = self.attrs.write().insert(Arc::new(attr.clone())) {
            tracing::error!(attr = %attr.name(), %err, "built-in attr not published");
        }
    }

    fn insert_attr<T>(&self, attr: &Attr<T>, reject_duplicate_names: bool) -> Result<(), RegistryError>
    where
        T: AttrValue + Clone,
    {
        let mut attrs = self.attrs.write();
        if reject_duplicate_names && attrs.contains_name(attr.name()) {
            return Err(RegistryError::DuplicateAttrName { name: attr.name().to_owned() });
        }
        attrs.insert(Arc::new(attr.clone()))
    }

    /// The attribute most recently published under `name`.
    ///
    /// The error is classified [`NOT_FOUND`](crate::NOT_FOUND) when the name is
    /// unknown or bound to a different value type.
    pub fn attr_by_name<T>(&self, name: &str) -> Result<Attr<T>, Error>
    where
        T: AttrValue + Clone,
    {
        let entry = self.attrs.read().by_name(name);
        self.typed(entry, name)
    }

    /// The attribute published under `key`.
    pub fn attr_by_key<T>(&self, key: &Key) -> Result<Attr<T>, Error>
    where
        T: AttrValue + Clone,
    {
        let entry = self.attrs.read().by_key(key);
        self.typed(entry, key)
    }

    fn typed<T>(&self, entry: Option<Arc<dyn AnyAttr>>, wanted: impl fmt::Display) -> Result<Attr<T>, Error>
    where
        T: AttrValue + Clone,
    {
        let Some(entry) = entry else {
            return Err(self.not_found(format!("attr {wanted} not found")));
        };
        match AsAny::as_any(&*entry).downcast_ref::<Attr<T>>() {
            Some(attr) => Ok(attr.clone()),
            None => Err(self.not_found(format!(
                "attr {wanted} is {}, not {}",
                entry.descriptor().type_name,
                core::any::type_name::<T>()
            ))),
        }
    }

    fn not_found(&self, message: String) -> Error {
        ERROR.attach(&Error::new(message), self.code(Code::NotFound).into_error())
    }

    /// Snapshot of every published attribute keyed by `name#id`.
    pub fn attrs(&self) -> HashMap<String, Arc<dyn AnyAttr>> {
        self.attrs.read().snapshot()
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("app", &self.app)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// The process-wide runtime, built on first use.
#[inline]
pub fn process() -> &'static Arc<Runtime> {
    &PROCESS
}

/// Renames the process application. See [`Runtime::set_application_name`].
pub fn set_application_name(name: &str) {
    process().set_application_name(name);
}

pub fn application_name() -> String {
    process().app_name()
}

/// Creates and registers a meta error in the process runtime.
///
/// # Panics
///
/// Panics on an empty field or a non-overridable duplicate id.
pub fn new_meta_error<I>(
    source: impl Into<String>,
    code: impl Into<String>,
    message: impl Into<String>,
    attachments: I,
) -> MetaError
where
    I: IntoIterator<Item = Attachment>,
{
    process().new_meta_error(source, code, message, attachments)
}

pub fn meta_error(id: &str) -> Option<MetaError> {
    process().meta_error(id)
}
