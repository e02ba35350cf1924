use std::path::PathBuf;

use serde_json::Value;

use crate::{
    codec::{event_codec, EventCodec},
    domain::{Event, EventType},
    error::Result,
    repository::{CodecRepository, EventRepository},
};

/// Events are keyed by name alone: saving a second event with an existing
/// name replaces the first, whatever its date.
pub struct JsonEventRepository {
    inner: CodecRepository<EventCodec>,
}

impl JsonEventRepository {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            inner: CodecRepository::open(path, &[event_codec::EVENT_NAME])?,
        })
    }
}

impl EventRepository for JsonEventRepository {
    fn save(&self, event: &Event) -> Result<()> {
        self.inner.save(event)
    }

    fn find_by_name(&self, event_name: &str) -> Option<Event> {
        self.inner.find_one(event_codec::EVENT_NAME, &Value::from(event_name))
    }

    fn find_by_type(&self, event_type: EventType) -> Vec<Event> {
        self.inner
            .load_all()
            .into_iter()
            .filter(|event| event.event_type() == event_type)
            .collect()
    }

    fn find_all_by(&self, field: &str, value: Value) -> Vec<Event> {
        self.inner.find_all(field, &value)
    }

    fn load_all(&self) -> Vec<Event> {
        self.inner.load_all()
    }

    fn delete(&self, event_name: &str) -> Result<()> {
        self.inner.delete(event_codec::EVENT_NAME, &Value::from(event_name))?;
        Ok(())
    }
}
