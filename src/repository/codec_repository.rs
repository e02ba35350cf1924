use std::marker::PhantomData;
use std::path::PathBuf;

use serde_json::Value;

use crate::{
    codec::RecordCodec,
    error::Result,
    store::{self, JsonFileStore, Record},
};

/// A record store paired with the codec of one entity family.
///
/// Records that fail to decode are logged and skipped, so reads always
/// succeed with whatever could be reconstructed.
pub struct CodecRepository<C: RecordCodec> {
    store: JsonFileStore,
    key_fields: &'static [&'static str],
    codec: PhantomData<fn() -> C>,
}

impl<C: RecordCodec> CodecRepository<C> {
    pub fn open(path: impl Into<PathBuf>, key_fields: &'static [&'static str]) -> Result<Self> {
        Ok(Self {
            store: JsonFileStore::open(path)?,
            key_fields,
            codec: PhantomData,
        })
    }

    pub fn store(&self) -> &JsonFileStore {
        &self.store
    }

    /// Replaces the stored record holding the same key as `entity`, or
    /// appends. Keys are compared both as stored and as the codec would
    /// rewrite them, so records with a missing or unknown discriminant are
    /// still found.
    pub fn save(&self, entity: &C::Entity) -> Result<()> {
        let record = C::encode(entity);
        store::require_key_fields(&record, self.key_fields)?;
        let target = record.clone();
        self.store.upsert_where(record, |candidate| self.same_key(candidate, &target))
    }

    pub fn find_one(&self, field: &str, value: &Value) -> Option<C::Entity> {
        self.store
            .find_all(field, value)
            .iter()
            .find_map(|record| self.decode(record))
    }

    pub fn find_all(&self, field: &str, value: &Value) -> Vec<C::Entity> {
        self.store
            .find_all(field, value)
            .iter()
            .filter_map(|record| self.decode(record))
            .collect()
    }

    pub fn load_all(&self) -> Vec<C::Entity> {
        self.store
            .load_all()
            .iter()
            .filter_map(|record| self.decode(record))
            .collect()
    }

    pub fn delete(&self, field: &str, value: &Value) -> Result<usize> {
        self.store.delete(field, value)
    }

    /// Removes the stored record sharing every key field with `entity`.
    pub fn delete_entity(&self, entity: &C::Entity) -> Result<usize> {
        let target = C::encode(entity);
        self.store.delete_where(|record| self.same_key(record, &target))
    }

    fn same_key(&self, candidate: &Record, target: &Record) -> bool {
        if store::keys_match(candidate, target, self.key_fields) {
            return true;
        }
        C::decode(candidate).map_or(false, |entity| {
            store::keys_match(&C::encode(&entity), target, self.key_fields)
        })
    }

    fn decode(&self, record: &Record) -> Option<C::Entity> {
        match C::decode(record) {
            Ok(entity) => Some(entity),
            Err(e) => {
                tracing::warn!(
                    family = C::FAMILY,
                    path = %self.store.path().display(),
                    error = %e,
                    "skipping undecodable record"
                );
                None
            }
        }
    }
}
