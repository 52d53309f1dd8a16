//! Classification normalization at error-handling boundaries.
//!
//! An [`Adapter`] takes an incoming error and a guard classification and
//! decides how the error leaves the boundary:
//!
//! - unclassified: the guard is attached
//! - classified under the current application: the classification is kept
//! - classified by another application: the upstream classification is mapped
//!   to a local one, which is attached on top of it
//!
//! In every case the call-site attachments, the caller location (when enabled)
//! and the adapter's default attachments are applied last, in that order.
//!
//! # Examples
//!
//! ```
//! use error_meta::{Adapter, Error, Runtime, RuntimeConfig, META, STATUS};
//! use std::sync::Arc;
//!
//! let runtime = Arc::new(Runtime::with_config(RuntimeConfig::default().with_app_name("svc-a")));
//! let adapter = Adapter::builder().runtime(runtime.clone()).build();
//!
//! let err = adapter.adapt(Some(Error::new("db down")), None).unwrap();
//! assert_eq!(STATUS.get(&err), Some(500));
//! assert!(META.get(&err).unwrap().ptr_eq(runtime.unknown().meta()));
//! assert!(adapter.adapt(None, None).is_none());
//! ```

use crate::attr::{CALLER, ERROR, META};
use crate::meta::{Meta, MetaError};
use crate::runtime::{self, Runtime};
use crate::types::{Attachment, Error};
use core::fmt;
use std::panic::Location;
use std::sync::{Arc, LazyLock};

/// Renders the caller location attached under [`CALLER`]. Receives the
/// adapter's configured skip depth.
pub type CallerFn = Arc<dyn Fn(&'static Location<'static>, usize) -> String + Send + Sync>;

/// Maps an upstream classification to a local meta error.
pub type MappingFn = Arc<dyn Fn(&Runtime, &Meta) -> Option<MetaError> + Send + Sync>;

static DEFAULT_ADAPTER: LazyLock<Adapter> = LazyLock::new(|| Adapter::builder().add_caller(true).build());

/// Boundary failures. Both indicate a configuration bug, not a runtime condition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdaptError {
    #[error("guard {guard} does not belong to application {app}")]
    ForeignGuard { guard: String, app: String },
    #[error("no local meta error mapped for upstream {upstream}")]
    MissingMapping { upstream: String },
}

/// Stateful classification policy. Cheap to clone.
#[derive(Clone)]
pub struct Adapter {
    runtime: Arc<Runtime>,
    add_caller: bool,
    caller_skip: usize,
    caller_fn: CallerFn,
    default_attachments: Vec<Attachment>,
    mapping: MappingFn,
}

impl Adapter {
    #[inline]
    pub fn builder() -> AdapterBuilder {
        AdapterBuilder::new()
    }

    #[inline]
    pub fn runtime(&self) -> &Arc<Runtime> {
        &self.runtime
    }

    /// Normalizes the classification of `error`. `None` passes through.
    ///
    /// `guard` defaults to the runtime's `Unknown` classification.
    ///
    /// # Panics
    ///
    /// Panics if the guard belongs to another application, or if an upstream
    /// classification has no local mapping.
    #[track_caller]
    pub fn adapt(&self, error: Option<Error>, guard: Option<&MetaError>) -> Option<Error> {
        self.adapt_with(error, guard, [])
    }

    /// Like [`Adapter::adapt`], applying `attachments` before the adapter's own.
    #[track_caller]
    pub fn adapt_with<I>(&self, error: Option<Error>, guard: Option<&MetaError>, attachments: I) -> Option<Error>
    where
        I: IntoIterator<Item = Attachment>,
    {
        match self.try_adapt_with(error, guard, attachments) {
            Ok(adapted) => adapted,
            Err(err) => {
                tracing::error!(%err, app = %self.runtime.app_name(), "adapt failed");
                panic!("{err}");
            },
        }
    }

    /// Fallible form of [`Adapter::adapt_with`].
    #[track_caller]
    pub fn try_adapt_with<I>(
        &self,
        error: Option<Error>,
        guard: Option<&MetaError>,
        attachments: I,
    ) -> Result<Option<Error>, AdaptError>
    where
        I: IntoIterator<Item = Attachment>,
    {
        let Some(error) = error else {
            return Ok(None);
        };
        let location = Location::caller();

        let app = self.runtime.app_name();
        let guard = guard.cloned().unwrap_or_else(|| self.runtime.unknown());
        if guard.app() != app {
            return Err(AdaptError::ForeignGuard { guard: guard.id(), app });
        }

        let mut extras: Vec<Attachment> = attachments.into_iter().collect();
        if self.add_caller {
            extras.push(CALLER.option((self.caller_fn)(location, self.caller_skip)));
        }
        extras.extend(self.default_attachments.iter().cloned());

        let classified = match META.get(&error) {
            None => ERROR.attach(&error, guard.into_error()),
            // locally classified chains may carry an unregistered meta
            Some(dyn_meta) if dyn_meta.app() == app => error,
            Some(upstream) => match (self.mapping)(&self.runtime, &upstream) {
                Some(local) => {
                    tracing::debug!(upstream = %upstream.id(), local = %local.id(), "upstream classification mapped");
                    ERROR.attach(&error, local.into_error())
                },
                None => return Err(AdaptError::MissingMapping { upstream: upstream.id() }),
            },
        };
        Ok(Some(classified.with(extras)))
    }
}

impl Default for Adapter {
    fn default() -> Self {
        AdapterBuilder::new().build()
    }
}

impl fmt::Debug for Adapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Adapter")
            .field("runtime", &self.runtime)
            .field("add_caller", &self.add_caller)
            .field("caller_skip", &self.caller_skip)
            .field("default_attachments", &self.default_attachments)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Adapter`].
///
/// Defaults: the process runtime, no caller capture, skip depth 0,
/// `file:line` caller rendering, no default attachments and
/// [`Runtime::map_by_source_code`] as the mapping policy.
#[must_use]
pub struct AdapterBuilder {
    runtime: Option<Arc<Runtime>>,
    add_caller: bool,
    caller_skip: usize,
    caller_fn: Option<CallerFn>,
    default_attachments: Vec<Attachment>,
    mapping: Option<MappingFn>,
}

impl AdapterBuilder {
    pub fn new() -> Self {
        Self {
            runtime: None,
            add_caller: false,
            caller_skip: 0,
            caller_fn: None,
            default_attachments: Vec::new(),
            mapping: None,
        }
    }

    /// Runtime whose application name and registry the adapter consults.
    pub fn runtime(mut self, runtime: Arc<Runtime>) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Attaches the caller location under [`CALLER`].
    pub fn add_caller(mut self, add: bool) -> Self {
        self.add_caller = add;
        self
    }

    /// Extra frame depth handed to the caller renderer.
    ///
    /// The default `file:line` renderer ignores it: `#[track_caller]` already
    /// resolves the location to the code that called `adapt`. Wrappers that
    /// are not `#[track_caller]` can pair it with [`AdapterBuilder::caller_fn`].
    pub fn caller_skip(mut self, skip: usize) -> Self {
        self.caller_skip = skip;
        self
    }

    pub fn caller_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&'static Location<'static>, usize) -> String + Send + Sync + 'static,
    {
        self.caller_fn = Some(Arc::new(f));
        self
    }

    /// Appends one attachment applied to every adapted error.
    pub fn default_attachment(mut self, attachment: Attachment) -> Self {
        self.default_attachments.push(attachment);
        self
    }

    pub fn default_attachments<I>(mut self, attachments: I) -> Self
    where
        I: IntoIterator<Item = Attachment>,
    {
        self.default_attachments.extend(attachments);
        self
    }

    /// Replaces the upstream mapping policy.
    pub fn mapping<F>(mut self, f: F) -> Self
    where
        F: Fn(&Runtime, &Meta) -> Option<MetaError> + Send + Sync + 'static,
    {
        self.mapping = Some(Arc::new(f));
        self
    }

    pub fn build(self) -> Adapter {
        Adapter {
            runtime: self.runtime.unwrap_or_else(|| runtime::process().clone()),
            add_caller: self.add_caller,
            caller_skip: self.caller_skip,
            caller_fn: self.caller_fn.unwrap_or_else(|| Arc::new(file_line) as CallerFn),
            default_attachments: self.default_attachments,
            mapping: self.mapping.unwrap_or_else(|| Arc::new(Runtime::map_by_source_code) as MappingFn),
        }
    }
}

impl Default for AdapterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// skip is ignored, the location is already the adapting call site
fn file_line(location: &'static Location<'static>, _skip: usize) -> String {
    format!("{}:{}", location.file(), location.line())
}

/// Adapts `error` with the process default adapter, which records the caller.
///
/// # Panics
///
/// See [`Adapter::adapt`].
#[track_caller]
pub fn adapt(error: Option<Error>, guard: Option<&MetaError>) -> Option<Error> {
    DEFAULT_ADAPTER.adapt(error, guard)
}

/// Like [`adapt`], applying `attachments` before the caller location.
#[track_caller]
pub fn adapt_with<I>(error: Option<Error>, guard: Option<&MetaError>, attachments: I) -> Option<Error>
where
    I: IntoIterator<Item = Attachment>,
{
    DEFAULT_ADAPTER.adapt_with(error, guard, attachments)
}
