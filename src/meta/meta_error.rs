use super::Meta;
use crate::attr::{META, OVERRIDABLE};
use crate::types::{Attachment, Error};
use core::fmt;

/// An error whose chain carries a [`Meta`] as its primary attribute.
///
/// The chain is `Empty -> META(meta) -> attachments...`, so a `MetaError`
/// attached under [`ERROR`](crate::ERROR) contributes its status, message and
/// any other attachment to the outer chain. Equality is by reference.
#[derive(Clone)]
pub struct MetaError {
    error: Error,
    meta: Meta,
}

impl MetaError {
    pub(crate) fn build(meta: Meta, attachments: impl IntoIterator<Item = Attachment>) -> Self {
        let error = META.attach(&Error::empty(), meta.clone()).with(attachments);
        Self { error, meta }
    }

    /// Views `error` as a meta error if its chain carries a classification.
    pub fn from_error(error: &Error) -> Option<Self> {
        META.get(error).map(|meta| Self { error: error.clone(), meta })
    }

    #[inline]
    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    pub fn app(&self) -> String {
        self.meta.app()
    }

    #[inline]
    pub fn source(&self) -> &str {
        self.meta.source()
    }

    #[inline]
    pub fn code(&self) -> &str {
        self.meta.code()
    }

    #[inline]
    pub fn message(&self) -> &str {
        self.meta.message()
    }

    /// `app:source:code` under the current application name.
    pub fn id(&self) -> String {
        self.meta.id()
    }

    #[inline]
    pub fn as_error(&self) -> &Error {
        &self.error
    }

    #[inline]
    pub fn into_error(self) -> Error {
        self.error
    }

    /// Whether a later registration under the same id may replace this one.
    pub fn is_overridable(&self) -> bool {
        OVERRIDABLE.get(&self.error).unwrap_or(false)
    }
}

impl AsRef<Error> for MetaError {
    #[inline]
    fn as_ref(&self) -> &Error {
        &self.error
    }
}

impl From<MetaError> for Error {
    #[inline]
    fn from(meta_error: MetaError) -> Self {
        meta_error.error
    }
}

impl PartialEq for MetaError {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.error.ptr_eq(&other.error)
    }
}

impl Eq for MetaError {}

impl fmt::Display for MetaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl fmt::Debug for MetaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetaError").field("id", &self.id()).field("message", &self.message()).finish()
    }
}
