//! Descriptor registry: attributes indexed by key and by display name.

use super::AnyAttr;
use crate::runtime::RegistryError;
use crate::types::Key;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Default)]
pub(crate) struct AttrRegistry {
    by_key: HashMap<Key, Arc<dyn AnyAttr>>,
    by_name: HashMap<String, Arc<dyn AnyAttr>>,
}

impl AttrRegistry {
    /// Publishes `attr`, superseding any earlier attribute with the same name.
    ///
    /// A handle whose key is already published is rejected.
    pub(crate) fn insert(&mut self, attr: Arc<dyn AnyAttr>) -> Result<(), RegistryError> {
        let name = attr.name().to_owned();
        if self.by_key.contains_key(attr.key()) {
            return Err(RegistryError::DuplicateAttrKey { name });
        }
        if let Some(previous) = self.by_name.insert(name.clone(), attr.clone()) {
            tracing::warn!(attr = %name, previous = ?previous.key(), "attr name registration superseded");
        }
        self.by_key.insert(attr.key().clone(), attr);
        tracing::debug!(attr = %name, "attr registered");
        Ok(())
    }

    #[inline]
    pub(crate) fn contains_name(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub(crate) fn by_key(&self, key: &Key) -> Option<Arc<dyn AnyAttr>> {
        self.by_key.get(key).cloned()
    }

    pub(crate) fn by_name(&self, name: &str) -> Option<Arc<dyn AnyAttr>> {
        self.by_name.get(name).cloned()
    }

    /// Snapshot keyed by `name#id`.
    pub(crate) fn snapshot(&self) -> HashMap<String, Arc<dyn AnyAttr>> {
        self.by_key
            .iter()
            .map(|(key, attr)| (format!("{}#{}", attr.name(), key.id()), attr.clone()))
            .collect()
    }
}
