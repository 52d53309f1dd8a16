//! Error chain formatting.
//!
//! A chain prints as its parent followed by `:` and one `key={value}` segment
//! per node. The process-wide [`FormatMode`] controls how much of each segment
//! is shown:
//!
//! | mode | segment |
//! |---|---|
//! | [`FormatMode::Default`] | `key={value}` |
//! | [`FormatMode::Simplified`] | `*={*}` |
//! | [`FormatMode::NoValue`] | `key={*}` |

use crate::types::error::Inner;
use crate::types::Error;
use core::fmt;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

static FORMAT_MODE: RwLock<FormatMode> = RwLock::new(FormatMode::Default);

/// How much of each chain node is rendered by `Display`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatMode {
    /// `key={value}`
    #[default]
    Default,
    /// `*={*}`
    Simplified,
    /// `key={*}`
    NoValue,
}

/// Sets the process-wide format mode.
pub fn set_format_mode(mode: FormatMode) {
    *FORMAT_MODE.write() = mode;
    tracing::debug!(?mode, "format mode changed");
}

/// Returns the process-wide format mode.
#[inline]
pub fn format_mode() -> FormatMode {
    *FORMAT_MODE.read()
}

/// Renders an [`Error`] in a fixed mode, ignoring the process-wide flag.
///
/// Created by [`Error::display_with`].
pub struct DisplayWith<'a> {
    error: &'a Error,
    mode: FormatMode,
}

impl Error {
    /// Renders this chain in `mode` without touching the process-wide flag.
    #[must_use]
    pub fn display_with(&self, mode: FormatMode) -> DisplayWith<'_> {
        DisplayWith { error: self, mode }
    }
}

impl fmt::Display for DisplayWith<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_chain(f, self.error, self.mode)
    }
}

fn write_chain(f: &mut fmt::Formatter<'_>, error: &Error, mode: FormatMode) -> fmt::Result {
    match &*error.inner {
        Inner::Empty => Ok(()),
        Inner::Leaf(leaf) => fmt::Display::fmt(leaf, f),
        Inner::Node(node) => {
            if !node.parent.is_empty() {
                write_chain(f, &node.parent, mode)?;
                f.write_str(":")?;
            }
            match mode {
                FormatMode::Simplified => f.write_str("*={*}"),
                FormatMode::NoValue => write!(f, "{}={{*}}", node.key),
                FormatMode::Default => {
                    write!(f, "{}={{", node.key)?;
                    // nested chains keep the caller's mode
                    match node.value.downcast_ref::<Error>() {
                        Some(nested) => write_chain(f, nested, mode)?,
                        None => fmt::Display::fmt(&node.value, f)?,
                    }
                    f.write_str("}")
                },
            }
        },
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_chain(f, self, format_mode())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.inner {
            Inner::Empty => f.write_str("Empty"),
            Inner::Leaf(leaf) => fmt::Debug::fmt(leaf, f),
            Inner::Node(node) => {
                if !node.parent.is_empty() {
                    fmt::Debug::fmt(&node.parent, f)?;
                    f.write_str("\n")?;
                }
                write!(f, "{}={{{:?}}}", node.key, node.value)
            },
        }
    }
}
