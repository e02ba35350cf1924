use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ROOM: &str = "main room";
pub const DEFAULT_PRIZE: &str = "certificate";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub event_name: String,
    pub description: String,
    pub event_date: NaiveDate,
    pub details: EventDetails,
}

/// Variant-specific payload; the variant doubles as the event type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventDetails {
    Trip { destination: String },
    Meeting { room: String },
    Competition { prize: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    Trip,
    Meeting,
    Competition,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Trip => "Trip",
            EventType::Meeting => "Meeting",
            EventType::Competition => "Competition",
        }
    }
}

impl EventDetails {
    pub fn event_type(&self) -> EventType {
        match self {
            EventDetails::Trip { .. } => EventType::Trip,
            EventDetails::Meeting { .. } => EventType::Meeting,
            EventDetails::Competition { .. } => EventType::Competition,
        }
    }
}

impl Event {
    pub fn trip(
        event_name: impl Into<String>,
        description: impl Into<String>,
        event_date: NaiveDate,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            event_name: event_name.into(),
            description: description.into(),
            event_date,
            details: EventDetails::Trip {
                destination: destination.into(),
            },
        }
    }

    pub fn meeting(
        event_name: impl Into<String>,
        description: impl Into<String>,
        event_date: NaiveDate,
        room: impl Into<String>,
    ) -> Self {
        Self {
            event_name: event_name.into(),
            description: description.into(),
            event_date,
            details: EventDetails::Meeting { room: room.into() },
        }
    }

    pub fn competition(
        event_name: impl Into<String>,
        description: impl Into<String>,
        event_date: NaiveDate,
        prize: impl Into<String>,
    ) -> Self {
        Self {
            event_name: event_name.into(),
            description: description.into(),
            event_date,
            details: EventDetails::Competition {
                prize: prize.into(),
            },
        }
    }

    pub fn event_type(&self) -> EventType {
        self.details.event_type()
    }

    pub fn describe(&self) -> String {
        match &self.details {
            EventDetails::Trip { destination } => {
                let destination = if destination.is_empty() {
                    "(TBD)"
                } else {
                    destination.as_str()
                };
                format!("Trip to {}. {}", destination, self.description)
            }
            EventDetails::Meeting { room } => {
                format!("Meeting in {}. {}", room, self.description)
            }
            EventDetails::Competition { prize } => {
                format!("Competition with prize: {}. {}", prize, self.description)
            }
        }
    }

    pub fn display(&self) -> String {
        let date = self.event_date.format("%Y-%m-%d");
        match &self.details {
            EventDetails::Trip { destination } => {
                format!("{} | {} | {}", self.event_name, destination, date)
            }
            EventDetails::Meeting { room } => {
                format!("{} | {} | {}", self.event_name, room, date)
            }
            EventDetails::Competition { prize } => {
                format!("{} | Prize: {} | {}", self.event_name, prize, date)
            }
        }
    }
}
