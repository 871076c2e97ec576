// Device registry
//
// Maps entry ids to identified device handles. One handle per entry at
// most; insert on successful setup, remove on successful unload, nothing
// else touches it. Backed by DashMap so a multi-threaded host does not
// need its own lock around the context.

use std::sync::Arc;

use dashmap::DashMap;

use lumabox_api::Device;

use crate::entry::EntryId;

/// Record stored per entry. Currently just the device handle; kept as a
/// struct so per-entry state can grow without reshaping the map.
#[derive(Debug, Clone)]
pub struct EntryRecord {
    pub device: Arc<Device>,
}

/// Registry of identified devices, keyed by config-entry id.
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    entries: DashMap<EntryId, EntryRecord>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a device handle, replacing any previous handle for the entry.
    /// Returns the replaced handle if there was one.
    pub fn insert(&self, id: EntryId, device: Arc<Device>) -> Option<Arc<Device>> {
        self.entries
            .insert(id, EntryRecord { device })
            .map(|record| record.device)
    }

    /// The device handle for an entry, if set up.
    pub fn device(&self, id: &EntryId) -> Option<Arc<Device>> {
        self.entries.get(id).map(|record| record.device.clone())
    }

    /// Remove an entry's handle. Removing an absent entry is a no-op.
    pub fn remove(&self, id: &EntryId) -> Option<Arc<Device>> {
        self.entries.remove(id).map(|(_, record)| record.device)
    }

    pub fn contains(&self, id: &EntryId) -> bool {
        self.entries.contains_key(id)
    }

    /// Snapshot of all stored handles, for iteration outside the map's
    /// shard locks.
    pub fn devices(&self) -> Vec<(EntryId, Arc<Device>)> {
        self.entries
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().device.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_of_absent_entry_is_noop() {
        let registry = DeviceRegistry::new();
        assert!(registry.remove(&EntryId::from("missing")).is_none());
        assert!(registry.is_empty());
    }
}
