use serde_json::Value;

use crate::codec::{optional_str, put_date, put_str, required_date, required_str, RecordCodec};
use crate::domain::{Event, EventDetails, EventType, DEFAULT_PRIZE, DEFAULT_ROOM};
use crate::error::CodecError;
use crate::store::Record;

pub const EVENT_TYPE: &str = "event_type";
pub const EVENT_NAME: &str = "event_name";
pub const DESCRIPTION: &str = "description";
pub const EVENT_DATE: &str = "event_date";
pub const DESTINATION: &str = "destination";
pub const ROOM: &str = "room";
pub const PRIZE: &str = "prize";

/// Events without a recognised `event_type` decode as meetings.
pub const DEFAULT_EVENT_TYPE: EventType = EventType::Meeting;

pub struct EventCodec;

pub fn parse_event_type(s: &str) -> Option<EventType> {
    match s {
        "Trip" => Some(EventType::Trip),
        "Meeting" => Some(EventType::Meeting),
        "Competition" => Some(EventType::Competition),
        _ => None,
    }
}

impl RecordCodec for EventCodec {
    type Entity = Event;
    const FAMILY: &'static str = "event";

    fn encode(event: &Event) -> Record {
        let mut record = Record::new();
        put_str(&mut record, EVENT_NAME, &event.event_name);
        put_str(&mut record, DESCRIPTION, &event.description);
        put_date(&mut record, EVENT_DATE, event.event_date);

        match &event.details {
            EventDetails::Trip { destination } => put_str(&mut record, DESTINATION, destination),
            EventDetails::Meeting { room } => put_str(&mut record, ROOM, room),
            EventDetails::Competition { prize } => put_str(&mut record, PRIZE, prize),
        }

        put_str(&mut record, EVENT_TYPE, event.event_type().as_str());
        record
    }

    fn decode(record: &Record) -> Result<Event, CodecError> {
        let event_type = record
            .get(EVENT_TYPE)
            .and_then(Value::as_str)
            .and_then(parse_event_type)
            .unwrap_or(DEFAULT_EVENT_TYPE);

        let details = match event_type {
            EventType::Trip => EventDetails::Trip {
                destination: optional_str(record, DESTINATION).unwrap_or_default(),
            },
            EventType::Meeting => EventDetails::Meeting {
                room: optional_str(record, ROOM).unwrap_or_else(|| DEFAULT_ROOM.to_string()),
            },
            EventType::Competition => EventDetails::Competition {
                prize: optional_str(record, PRIZE).unwrap_or_else(|| DEFAULT_PRIZE.to_string()),
            },
        };

        Ok(Event {
            event_name: required_str(record, EVENT_NAME)?,
            description: optional_str(record, DESCRIPTION).unwrap_or_default(),
            event_date: required_date(record, EVENT_DATE)?,
            details,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 21).unwrap()
    }

    #[test]
    fn every_event_variant_round_trips() {
        for event in [
            Event::trip("Louvre visit", "Museum day", date(), "Paris"),
            Event::meeting("Parents evening", "Term review", date(), "Room 12"),
            Event::competition("Chess open", "Rapid format", date(), "Trophy"),
        ] {
            assert_eq!(EventCodec::decode(&EventCodec::encode(&event)).unwrap(), event);
        }
    }

    #[test]
    fn competition_without_prize_gets_certificate() {
        let r = record(json!({
            "event_name": "Math olympiad",
            "description": "",
            "event_date": "2025-06-21",
            "event_type": "Competition"
        }));
        match EventCodec::decode(&r).unwrap().details {
            EventDetails::Competition { prize } => assert_eq!(prize, "certificate"),
            other => panic!("expected a competition, got {other:?}"),
        }
    }

    #[test]
    fn unknown_event_type_falls_back_to_meeting_in_main_room() {
        let r = record(json!({
            "event_name": "Bake sale",
            "description": "Cakes",
            "event_date": "2025-06-21",
            "event_type": "Fundraiser"
        }));
        let event = EventCodec::decode(&r).unwrap();
        assert_eq!(
            event.details,
            EventDetails::Meeting {
                room: "main room".to_string()
            }
        );
    }

    #[test]
    fn trip_without_destination_decodes_empty() {
        let r = record(json!({
            "event_name": "Mystery trip",
            "event_date": "2025-06-21",
            "event_type": "Trip"
        }));
        let event = EventCodec::decode(&r).unwrap();
        assert_eq!(event.describe(), "Trip to (TBD). ");
    }

    #[test]
    fn encode_sets_discriminant_last() {
        let r = EventCodec::encode(&Event::trip("Louvre visit", "", date(), "Paris"));
        assert_eq!(r.keys().last().map(String::as_str), Some(EVENT_TYPE));
        assert_eq!(r[EVENT_DATE], json!("2025-06-21"));
    }

    #[test]
    fn missing_name_is_a_decode_error() {
        let r = record(json!({"event_date": "2025-06-21", "event_type": "Trip"}));
        assert_eq!(EventCodec::decode(&r), Err(CodecError::MissingField(EVENT_NAME)));
    }
}
