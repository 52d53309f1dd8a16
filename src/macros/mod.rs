//! Formatting shortcuts over [`Error::new`](crate::Error::new) and the
//! [`compat`](crate::compat) helpers.
//!
//! - [`macro@crate::errorf`] - a leaf error from a format string
//! - [`macro@crate::with_messagef`] - attaches a formatted message
//! - [`macro@crate::wrapf`] - attaches a formatted message and a stack
//! - [`macro@crate::impl_attr_value`] - lets a custom type be attached to a chain
//!
//! # Examples
//!
//! ```
//! use error_meta::{errorf, wrapf, MESSAGE};
//!
//! let id = 7;
//! let err = wrapf!(&errorf!("user {id} missing"), "loading profile {}", id);
//! assert_eq!(err.cause().to_string(), "user 7 missing");
//! assert_eq!(MESSAGE.get(&err).as_deref(), Some("loading profile 7"));
//! ```

/// Creates a leaf [`Error`](crate::Error) from a format string.
#[macro_export]
macro_rules! errorf {
    ($($arg:tt)*) => {
        $crate::Error::new(::std::format!($($arg)*))
    };
}

/// Attaches a formatted message under [`MESSAGE`](crate::MESSAGE).
#[macro_export]
macro_rules! with_messagef {
    ($error:expr, $($arg:tt)*) => {
        $crate::compat::with_message($error, ::std::format!($($arg)*))
    };
}

/// Attaches a formatted message and a captured stack.
#[macro_export]
macro_rules! wrapf {
    ($error:expr, $($arg:tt)*) => {
        $crate::compat::wrap($error, ::std::format!($($arg)*))
    };
}

/// Implements [`AttrValue`](crate::AttrValue) for a custom type.
///
/// The type must already implement `Debug`, `Display`, `Send` and `Sync`;
/// its structured form is the `Display` string.
///
/// # Examples
///
/// ```
/// use error_meta::{impl_attr_value, Attr, AttrOptions, Error};
/// use std::fmt;
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct TenantId(u32);
///
/// impl fmt::Display for TenantId {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "tenant-{}", self.0)
///     }
/// }
///
/// impl_attr_value!(TenantId);
///
/// let tenant: Attr<TenantId> = Attr::define("tenant", AttrOptions::new().do_not_register());
/// let err = tenant.attach(&Error::new("quota"), TenantId(3));
/// assert_eq!(err.to_string(), "quota:tenant={tenant-3}");
/// ```
#[macro_export]
macro_rules! impl_attr_value {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::AttrValue for $ty {}
        )+
    };
}
