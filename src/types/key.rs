//! Opaque identities for values stored on an [`Error`](crate::Error) chain.

use core::fmt;
use core::hash::{Hash, Hasher};
use core::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_KEY: AtomicU64 = AtomicU64::new(1);

/// Opaque identity under which a value is attached to an error chain.
///
/// Every call to [`Key::new`] or [`Key::unnamed`] issues a fresh token, so two
/// keys are equal only when one is a clone of the other. Two keys created with
/// the same display name never collide.
///
/// # Examples
///
/// ```
/// use error_meta::Key;
///
/// let a = Key::new("caller");
/// let b = Key::new("caller");
/// assert_ne!(a, b);
/// assert_eq!(a, a.clone());
/// assert_eq!(a.name(), Some("caller"));
/// ```
#[derive(Clone)]
pub struct Key {
    id: u64,
    name: Option<Arc<str>>,
}

impl Key {
    /// Issues a fresh key carrying a display name.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self { id: next_id(), name: Some(name.into()) }
    }

    /// Issues a fresh key without a display name.
    ///
    /// Values stored under unnamed keys are reachable through [`Error::get`](crate::Error::get)
    /// but are dropped from the flattened map view.
    pub fn unnamed() -> Self {
        Self { id: next_id(), name: None }
    }

    /// Returns the token backing this key.
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns the display name, if any.
    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

#[inline]
fn next_id() -> u64 {
    NEXT_KEY.fetch_add(1, Ordering::Relaxed)
}

impl PartialEq for Key {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => f.write_str(name),
            None => write!(f, "#{}", self.id),
        }
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "Key({name}#{})", self.id),
            None => write!(f, "Key(#{})", self.id),
        }
    }
}
