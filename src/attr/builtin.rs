//! Well-known attributes shared by every runtime.

use super::{Attr, AttrOptions};
use crate::compat::Stack;
use crate::meta::Meta;
use crate::runtime::Runtime;
use crate::types::Error;
use std::sync::LazyLock;

/// A sub-error attached to a chain, usually a classification.
pub static ERROR: LazyLock<Attr<Error>> =
    LazyLock::new(|| builtin("error", AttrOptions::new().description("error as an attr")));

/// The classification record of a meta error.
pub static META: LazyLock<Attr<Meta>> =
    LazyLock::new(|| builtin("meta", AttrOptions::new().description("meta as an attr")));

pub static MESSAGE: LazyLock<Attr<String>> =
    LazyLock::new(|| builtin("msg", AttrOptions::new().description("message as an attr")));

/// HTTP status. Defaults to 500 when an error is present and 200 otherwise.
pub static STATUS: LazyLock<Attr<u16>> = LazyLock::new(|| {
    builtin(
        "status",
        AttrOptions::new()
            .description("http status as an attr")
            .default_fn(|error| if error.is_some() { 500 } else { 200 }),
    )
});

/// Call site that adapted or annotated the error.
pub static CALLER: LazyLock<Attr<String>> =
    LazyLock::new(|| builtin("caller", AttrOptions::new().description("caller as an attr")));

pub static STACK: LazyLock<Attr<Stack>> =
    LazyLock::new(|| builtin("stack", AttrOptions::new().description("captured backtrace as an attr")));

/// Marks a meta error as replaceable in the meta registry.
pub static OVERRIDABLE: LazyLock<Attr<bool>> = LazyLock::new(|| {
    builtin("overridable", AttrOptions::new().description("meta error may be re-registered under the same id"))
});

fn builtin<T>(name: &str, options: AttrOptions<T>) -> Attr<T>
where
    T: crate::types::AttrValue + Clone,
{
    Attr::from_options(name, &options)
}

pub(crate) fn register_builtins(runtime: &Runtime) {
    runtime.publish_attr(&ERROR);
    runtime.publish_attr(&META);
    runtime.publish_attr(&MESSAGE);
    runtime.publish_attr(&STATUS);
    runtime.publish_attr(&CALLER);
    runtime.publish_attr(&STACK);
    runtime.publish_attr(&OVERRIDABLE);
}
