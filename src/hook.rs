//! Boot-time attribute setters.
//!
//! Configuration code resolves process attributes (such as the application
//! name) once at startup and hands each value to the setters registered under
//! its hook. The process runtime listens on [`APP_NAME`].
//!
//! # Examples
//!
//! ```
//! use error_meta::hook;
//!
//! hook::register_attr_setter("region", "billing", |value| {
//!     assert_eq!(value, "eu-west-1");
//!     Ok(())
//! });
//! hook::execute_attr_setters("region", "eu-west-1").unwrap();
//! ```

use crate::attr::MESSAGE;
use crate::runtime;
use crate::types::Error;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

/// Hook carrying the resolved application name.
pub const APP_NAME: &str = "app_name";

const OWNER: &str = "error-meta";

type Setter = Arc<dyn Fn(&str) -> Result<(), Error> + Send + Sync>;

static SETTERS: LazyLock<RwLock<HashMap<String, Vec<(String, Setter)>>>> = LazyLock::new(|| {
    let app_name: Setter = Arc::new(|value: &str| {
        runtime::process()
            .try_set_application_name(value)
            .map_err(Error::from_std)
    });
    let mut setters = HashMap::new();
    setters.insert(APP_NAME.to_owned(), vec![(OWNER.to_owned(), app_name)]);
    RwLock::new(setters)
});

/// Registers `setter` under `hook` on behalf of `owner`.
pub fn register_attr_setter<F>(hook: &str, owner: &str, setter: F)
where
    F: Fn(&str) -> Result<(), Error> + Send + Sync + 'static,
{
    SETTERS
        .write()
        .entry(hook.to_owned())
        .or_default()
        .push((owner.to_owned(), Arc::new(setter)));
    tracing::debug!(hook, owner, "attr setter registered");
}

/// Runs every setter registered under `hook`, in registration order.
///
/// Stops at the first failure and returns it with the failing owner attached
/// under [`MESSAGE`].
pub fn execute_attr_setters(hook: &str, value: &str) -> Result<(), Error> {
    let setters = SETTERS.read().get(hook).cloned().unwrap_or_default();
    for (owner, setter) in setters {
        if let Err(err) = setter(value) {
            tracing::warn!(hook, owner = %owner, %err, "attr setter failed");
            return Err(MESSAGE.attach(&err, format!("attr setter of {owner} failed on hook {hook}")));
        }
    }
    tracing::debug!(hook, "attr setters executed");
    Ok(())
}
