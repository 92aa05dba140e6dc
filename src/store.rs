use crate::records::{HydrationSettings, Record, RecordFields, RecordId, StoreKind};
use std::collections::BTreeMap;
use tracing::warn;

/// Ordered, homogeneous record list for one tracker. Mutations happen in
/// memory; the dispatcher persists the snapshot after every mutating
/// intent.
#[derive(Debug)]
pub struct RecordStore {
    kind: StoreKind,
    records: Vec<Record>,
    last_id: RecordId,
}

impl RecordStore {
    pub fn new(kind: StoreKind) -> Self {
        Self {
            kind,
            records: Vec::new(),
            last_id: 0,
        }
    }

    /// Rebuilds a store from a loaded snapshot. Records tagged for a
    /// different store are dropped rather than served under the wrong key.
    pub fn from_records(kind: StoreKind, records: Vec<Record>) -> Self {
        let mut kept = Vec::with_capacity(records.len());
        for record in records {
            if record.fields.kind() == kind {
                kept.push(record);
            } else {
                warn!(
                    store = kind.storage_key(),
                    id = record.id,
                    "dropping record with mismatched variant"
                );
            }
        }
        let last_id = kept.iter().map(|record| record.id).max().unwrap_or(0);
        Self {
            kind,
            records: kept,
            last_id,
        }
    }

    pub fn kind(&self) -> StoreKind {
        self.kind
    }

    pub fn all(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends a validated field-set and returns the stored record. Ids are
    /// creation-timestamp based and bumped past the last issued id so they
    /// stay unique even within one millisecond.
    pub fn add(&mut self, fields: RecordFields, now_ms: i64) -> &Record {
        debug_assert_eq!(fields.kind(), self.kind);
        let id = now_ms.max(self.last_id + 1);
        self.last_id = id;
        self.records.push(Record {
            id,
            created_at: now_ms,
            fields,
        });
        self.records.last().expect("just pushed")
    }

    /// Removes at most one record. A missing id is a no-op, not an error.
    pub fn remove(&mut self, id: RecordId) -> bool {
        match self.records.iter().position(|record| record.id == id) {
            Some(index) => {
                self.records.remove(index);
                true
            }
            None => false,
        }
    }

    /// Replaces the field-set of an existing record in place, preserving its
    /// id, creation time, and position.
    pub fn update(&mut self, id: RecordId, fields: RecordFields) -> Option<&Record> {
        debug_assert_eq!(fields.kind(), self.kind);
        let record = self.records.iter_mut().find(|record| record.id == id)?;
        record.fields = fields;
        Some(record)
    }

    /// Bulk replacement, used by destructive clears and imports. The id
    /// floor only ratchets up, so cleared ids are never handed out again.
    pub fn replace_all(&mut self, records: Vec<Record>) {
        let max_id = records.iter().map(|record| record.id).max().unwrap_or(0);
        self.last_id = self.last_id.max(max_id);
        self.records = records;
    }
}

/// All eight stores plus the hydration preferences, constructed once at
/// startup and shared through `AppState`.
#[derive(Debug)]
pub struct StoreSet {
    stores: BTreeMap<StoreKind, RecordStore>,
    pub hydration_settings: HydrationSettings,
}

impl StoreSet {
    pub fn new() -> Self {
        let mut stores = BTreeMap::new();
        for kind in StoreKind::ALL {
            stores.insert(kind, RecordStore::new(kind));
        }
        Self {
            stores,
            hydration_settings: HydrationSettings::default(),
        }
    }

    pub fn insert(&mut self, store: RecordStore) {
        self.stores.insert(store.kind(), store);
    }

    pub fn get(&self, kind: StoreKind) -> &RecordStore {
        self.stores.get(&kind).expect("all store kinds present")
    }

    pub fn get_mut(&mut self, kind: StoreKind) -> &mut RecordStore {
        self.stores.get_mut(&kind).expect("all store kinds present")
    }
}

impl Default for StoreSet {
    fn default() -> Self {
        Self::new()
    }
}
