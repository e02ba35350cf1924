//! Conversion between typed domain objects and flat storage records.
//!
//! Every family writes a discriminant field naming its concrete variant and
//! dispatches on it when decoding. An unknown or missing discriminant decodes
//! to the family's default variant.

use chrono::NaiveDate;
use serde_json::Value;

use crate::domain::UniqueList;
use crate::error::CodecError;
use crate::store::Record;

pub mod event_codec;
pub mod member_codec;
pub mod subscription_codec;

pub use event_codec::EventCodec;
pub use member_codec::{PersonCodec, StudentCodec, TeacherCodec};
pub use subscription_codec::SubscriptionCodec;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub trait RecordCodec {
    type Entity;

    /// Family name used in log lines.
    const FAMILY: &'static str;

    fn encode(entity: &Self::Entity) -> Record;

    fn decode(record: &Record) -> Result<Self::Entity, CodecError>;
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) fn put_date(record: &mut Record, field: &str, date: NaiveDate) {
    record.insert(field.to_string(), Value::String(format_date(date)));
}

pub(crate) fn put_str(record: &mut Record, field: &str, value: &str) {
    record.insert(field.to_string(), Value::String(value.to_string()));
}

pub(crate) fn put_list(record: &mut Record, field: &str, list: &UniqueList) {
    let items = list.iter().cloned().map(Value::String).collect();
    record.insert(field.to_string(), Value::Array(items));
}

pub(crate) fn required_str(record: &Record, field: &'static str) -> Result<String, CodecError> {
    match record.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Null) | None => Err(CodecError::MissingField(field)),
        Some(_) => Err(CodecError::WrongType {
            field,
            expected: "string",
        }),
    }
}

pub(crate) fn required_i64(record: &Record, field: &'static str) -> Result<i64, CodecError> {
    match record.get(field) {
        Some(Value::Null) | None => Err(CodecError::MissingField(field)),
        Some(value) => value.as_i64().ok_or(CodecError::WrongType {
            field,
            expected: "integer",
        }),
    }
}

pub(crate) fn required_f64(record: &Record, field: &'static str) -> Result<f64, CodecError> {
    match record.get(field) {
        Some(Value::Null) | None => Err(CodecError::MissingField(field)),
        Some(value) => value.as_f64().ok_or(CodecError::WrongType {
            field,
            expected: "number",
        }),
    }
}

pub(crate) fn required_date(record: &Record, field: &'static str) -> Result<NaiveDate, CodecError> {
    let raw = required_str(record, field)?;
    NaiveDate::parse_from_str(&raw, DATE_FORMAT)
        .map_err(|_| CodecError::InvalidDate { field, value: raw })
}

// Optional readers fall back to the caller's default on absent or ill-typed
// values.

pub(crate) fn optional_str(record: &Record, field: &str) -> Option<String> {
    record.get(field).and_then(Value::as_str).map(str::to_string)
}

pub(crate) fn optional_i64(record: &Record, field: &str) -> Option<i64> {
    record.get(field).and_then(Value::as_i64)
}

pub(crate) fn optional_f64(record: &Record, field: &str) -> Option<f64> {
    record.get(field).and_then(Value::as_f64)
}

pub(crate) fn optional_list(record: &Record, field: &str) -> UniqueList {
    match record.get(field) {
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        _ => UniqueList::new(),
    }
}
