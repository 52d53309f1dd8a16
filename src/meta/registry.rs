//! Meta registry: meta errors keyed by their derived `app:source:code` id.

use super::{AppName, MetaError};
use crate::runtime::RegistryError;
use std::collections::HashMap;

#[derive(Default)]
pub(crate) struct MetaRegistry {
    entries: HashMap<String, MetaError>,
}

impl MetaRegistry {
    /// Files `meta_error` under its current id.
    ///
    /// An existing entry at that id is replaced only if it is overridable.
    pub(crate) fn register(&mut self, meta_error: MetaError) -> Result<(), RegistryError> {
        for (field, value) in [
            ("source", meta_error.source()),
            ("code", meta_error.code()),
            ("message", meta_error.message()),
        ] {
            if value.is_empty() {
                return Err(RegistryError::EmptyField { field });
            }
        }
        let id = meta_error.id();
        if let Some(existing) = self.entries.get(&id) {
            if !existing.is_overridable() {
                return Err(RegistryError::DuplicateMeta { id });
            }
            tracing::debug!(meta_id = %id, "overridable meta error replaced");
        }
        tracing::debug!(meta_id = %id, "meta error registered");
        self.entries.insert(id, meta_error);
        Ok(())
    }

    pub(crate) fn get(&self, id: &str) -> Option<MetaError> {
        self.entries.get(id).cloned()
    }

    pub(crate) fn snapshot(&self) -> HashMap<String, MetaError> {
        self.entries.clone()
    }

    /// Sets `cell` to `app` and re-files every entry under its new id.
    ///
    /// Only entries owned by `cell` move, so a collision always pairs a moved
    /// entry with one whose id is unchanged. The overridable side gives way;
    /// when both are overridable the moved entry wins, as in [`Self::register`].
    /// When neither is, nothing changes.
    pub(crate) fn rename(&mut self, cell: &AppName, app: &str) -> Result<(), RegistryError> {
        let mut old_ids: Vec<&String> = self.entries.keys().collect();
        old_ids.sort();

        let mut refiled: HashMap<String, MetaError> = HashMap::with_capacity(self.entries.len());
        let mut moved = Vec::new();
        for old_id in old_ids {
            let meta_error = &self.entries[old_id];
            let new_id = meta_error.meta().id_under(cell, app);
            if &new_id == old_id {
                refiled.insert(new_id, meta_error.clone());
            } else {
                moved.push((new_id, meta_error));
            }
        }

        for (new_id, meta_error) in moved {
            match refiled.get(&new_id) {
                Some(existing) if existing.is_overridable() => {
                    tracing::debug!(meta_id = %new_id, "overridable meta error replaced on rename");
                },
                Some(_) if meta_error.is_overridable() => {
                    tracing::debug!(meta_id = %new_id, "overridable meta error dropped on rename");
                    continue;
                },
                Some(_) => return Err(RegistryError::RenameCollision { app: app.to_owned(), id: new_id }),
                None => {},
            }
            refiled.insert(new_id, meta_error.clone());
        }

        let previous = cell.set(app);
        self.entries = refiled;
        tracing::debug!(from = %previous, to = %app, entries = self.entries.len(), "application renamed");
        Ok(())
    }
}
