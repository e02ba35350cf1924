//! File-backed record store.
//!
//! A store is a single JSON file holding an array of flat records. Every
//! operation reads or rewrites the whole file; rewrites go through a sibling
//! temporary file that is renamed over the original, so readers observe
//! either the old or the new complete collection.
//!
//! Reads never fail: a missing, empty or malformed file is an empty
//! collection.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde_json::{Map, Number, Value};
use tempfile::NamedTempFile;

use crate::error::{AppError, Result};

/// Ordered field name -> value mapping, the storage-level shape of every
/// domain object.
pub type Record = Map<String, Value>;

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Opens the store at `path`, creating its directory and an empty
    /// collection when the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self { path: path.into() };

        if let Some(dir) = store.parent_dir() {
            fs::create_dir_all(dir)?;
        }
        if !store.path.exists() {
            tracing::debug!(path = %store.path.display(), "initializing empty record store");
            store.write_all(&[])?;
        }

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_all(&self) -> Vec<Record> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "unreadable record store, treating as empty"
                );
                return Vec::new();
            }
        };

        if contents.trim().is_empty() {
            return Vec::new();
        }

        let items = match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Array(items)) => items,
            Ok(_) => {
                tracing::warn!(
                    path = %self.path.display(),
                    "record store is not a JSON array, treating as empty"
                );
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "malformed record store, treating as empty"
                );
                return Vec::new();
            }
        };

        let total = items.len();
        let records: Vec<Record> = items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(record) => Some(record),
                _ => None,
            })
            .collect();

        if records.len() != total {
            tracing::warn!(
                path = %self.path.display(),
                skipped = total - records.len(),
                "ignoring non-object entries in record store"
            );
        }

        records
    }

    pub fn find_one(&self, field: &str, value: &Value) -> Option<Record> {
        self.load_all()
            .into_iter()
            .find(|record| field_matches(record, field, value))
    }

    pub fn find_all(&self, field: &str, value: &Value) -> Vec<Record> {
        self.load_all()
            .into_iter()
            .filter(|record| field_matches(record, field, value))
            .collect()
    }

    /// Replaces the first record whose `key_field` matches, or appends.
    pub fn upsert(&self, record: Record, key_field: &str) -> Result<()> {
        self.upsert_by(record, &[key_field])
    }

    /// Like [`upsert`](Self::upsert) with a composite key: every field in
    /// `key_fields` must match for a record to be replaced.
    pub fn upsert_by(&self, record: Record, key_fields: &[&str]) -> Result<()> {
        require_key_fields(&record, key_fields)?;
        let target = record.clone();
        self.upsert_where(record, |candidate| keys_match(candidate, &target, key_fields))
    }

    /// Replaces the first record accepted by `is_same`, or appends.
    pub fn upsert_where(&self, record: Record, is_same: impl Fn(&Record) -> bool) -> Result<()> {
        let mut records = self.load_all();

        match records.iter().position(|candidate| is_same(candidate)) {
            Some(index) => records[index] = record,
            None => records.push(record),
        }

        self.write_all(&records)
    }

    /// Removes every record whose `field` matches; returns how many were removed.
    pub fn delete(&self, field: &str, value: &Value) -> Result<usize> {
        self.delete_where(|record| field_matches(record, field, value))
    }

    pub fn delete_where(&self, predicate: impl Fn(&Record) -> bool) -> Result<usize> {
        let mut records = self.load_all();
        let before = records.len();
        records.retain(|record| !predicate(record));
        let removed = before - records.len();

        if removed > 0 {
            self.write_all(&records)?;
        }
        Ok(removed)
    }

    pub fn len(&self) -> usize {
        self.load_all().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn parent_dir(&self) -> Option<&Path> {
        self.path.parent().filter(|dir| !dir.as_os_str().is_empty())
    }

    fn write_all(&self, records: &[Record]) -> Result<()> {
        let body = serde_json::to_string_pretty(records)?;
        let dir = self.parent_dir().unwrap_or_else(|| Path::new("."));

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(body.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)?;

        tracing::debug!(
            path = %self.path.display(),
            records = records.len(),
            "rewrote record store"
        );
        Ok(())
    }
}

/// Fails unless `record` carries every one of `key_fields`.
pub fn require_key_fields(record: &Record, key_fields: &[&str]) -> Result<()> {
    if key_fields.is_empty() {
        return Err(AppError::Validation(
            "upsert needs at least one key field".to_string(),
        ));
    }
    match key_fields.iter().find(|field| !record.contains_key(**field)) {
        Some(missing) => Err(AppError::Validation(format!(
            "record has no `{}` key field",
            missing
        ))),
        None => Ok(()),
    }
}

/// True when `candidate` holds `target`'s value for every key field.
pub fn keys_match(candidate: &Record, target: &Record, key_fields: &[&str]) -> bool {
    key_fields.iter().all(|field| {
        target
            .get(*field)
            .map_or(false, |value| field_matches(candidate, field, value))
    })
}

/// Field equality, with numbers compared by value so `150` matches `150.0`.
/// Two integers compare exactly.
pub fn field_matches(record: &Record, field: &str, value: &Value) -> bool {
    match (record.get(field), value) {
        (Some(Value::Number(a)), Value::Number(b)) => numbers_equal(a, b),
        (Some(stored), value) => stored == value,
        (None, _) => false,
    }
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    if a.is_f64() || b.is_f64() {
        return match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => a == b,
        };
    }
    match (a.as_i64(), b.as_i64()) {
        (Some(a), Some(b)) => a == b,
        _ => a.as_u64() == b.as_u64(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    fn open(dir: &TempDir) -> JsonFileStore {
        JsonFileStore::open(dir.path().join("records.json")).unwrap()
    }

    #[test]
    fn fresh_store_is_empty_and_file_exists() {
        let dir = TempDir::new().unwrap();
        let store = open(&dir);
        assert!(store.path().exists());
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn open_creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path().join("nested/deeper/records.json")).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn upsert_replaces_matching_key() {
        let dir = TempDir::new().unwrap();
        let store = open(&dir);

        store.upsert(record(json!({"id": 1, "name": "a"})), "id").unwrap();
        store.upsert(record(json!({"id": 2, "name": "b"})), "id").unwrap();
        store.upsert(record(json!({"id": 1, "name": "c"})), "id").unwrap();

        let all = store.load_all();
        assert_eq!(all.len(), 2);
        assert_eq!(store.find_one("id", &json!(1)).unwrap()["name"], json!("c"));
    }

    #[test]
    fn composite_upsert_requires_every_key_field() {
        let dir = TempDir::new().unwrap();
        let store = open(&dir);
        let keys = ["student_id", "date"];

        for (date, amount) in [("2025-01-01", 10), ("2025-02-01", 10), ("2025-01-01", 99)] {
            let entry = json!({"student_id": 1, "date": date, "amount": amount});
            store.upsert_by(record(entry), &keys).unwrap();
        }

        let all = store.find_all("student_id", &json!(1));
        assert_eq!(all.len(), 2);
        assert_eq!(all[0]["amount"], json!(99));
    }

    #[test]
    fn upsert_without_key_field_is_rejected() {
        let dir = TempDir::new().unwrap();
        let store = open(&dir);
        let result = store.upsert(record(json!({"name": "a"})), "id");
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn find_all_preserves_insertion_order() {
        let dir = TempDir::new().unwrap();
        let store = open(&dir);
        for (id, status) in [(1, "paid"), (2, "unpaid"), (3, "paid")] {
            store.upsert(record(json!({"id": id, "status": status})), "id").unwrap();
        }

        let ids: Vec<Value> = store
            .find_all("status", &json!("paid"))
            .into_iter()
            .map(|r| r["id"].clone())
            .collect();
        assert_eq!(ids, vec![json!(1), json!(3)]);
    }

    #[test]
    fn numbers_match_across_integer_and_float_forms() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("records.json"), r#"[{"amount": 150}]"#).unwrap();
        let store = open(&dir);
        assert!(store.find_one("amount", &json!(150.0)).is_some());
    }

    #[test]
    fn large_integer_keys_stay_distinct() {
        let dir = TempDir::new().unwrap();
        let store = open(&dir);

        store.upsert(record(json!({"id": 9007199254740992_i64})), "id").unwrap();
        store.upsert(record(json!({"id": 9007199254740993_i64})), "id").unwrap();

        assert_eq!(store.len(), 2);
        assert!(store.find_one("id", &json!(9007199254740993_i64)).is_some());
        assert!(store.find_one("id", &json!(9007199254740992.0)).is_some());
    }

    #[test]
    fn upsert_where_uses_the_given_match() {
        let dir = TempDir::new().unwrap();
        let store = open(&dir);
        store.upsert(record(json!({"id": 1, "name": "A"})), "id").unwrap();

        let replacement = record(json!({"id": 1, "name": "b"}));
        store
            .upsert_where(replacement, |candidate| {
                candidate["name"].as_str().map(str::to_lowercase) == Some("a".to_string())
            })
            .unwrap();

        let all = store.load_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0]["name"], json!("b"));
    }

    #[test]
    fn delete_missing_key_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        let store = open(&dir);
        store.upsert(record(json!({"id": 1})), "id").unwrap();

        assert_eq!(store.delete("id", &json!(42)).unwrap(), 0);
        assert_eq!(store.len(), 1);
        assert_eq!(store.delete("id", &json!(1)).unwrap(), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn corrupt_or_unexpected_contents_load_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.json");
        let store = open(&dir);

        fs::write(&path, "{ not json").unwrap();
        assert!(store.load_all().is_empty());

        fs::write(&path, "").unwrap();
        assert!(store.load_all().is_empty());

        fs::write(&path, r#"{"id": 1}"#).unwrap();
        assert!(store.load_all().is_empty());

        fs::write(&path, r#"[{"id": 1}, 7, "x"]"#).unwrap();
        assert_eq!(store.load_all().len(), 1);
    }

    #[test]
    fn deleted_file_loads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = open(&dir);
        fs::remove_file(store.path()).unwrap();
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn fields_keep_their_order_on_disk() {
        let dir = TempDir::new().unwrap();
        let store = open(&dir);
        store.upsert(record(json!({"zeta": 1, "alpha": 2, "kind": "x"})), "zeta").unwrap();

        let keys: Vec<String> = store.load_all()[0].keys().cloned().collect();
        assert_eq!(keys, ["zeta", "alpha", "kind"]);
    }
}
