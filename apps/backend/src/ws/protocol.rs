use serde::{Deserialize, Serialize};

use crate::domain::Category;
use crate::errors::domain::InvalidMove;
use crate::errors::ErrorCode;

/// Inbound frame: `{ "eventType": .., "payload": { .. } }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientEvent {
    pub event_type: String,
    #[serde(default)]
    pub payload: EventPayload,
}

/// Fields used by the event types; each event reads only its own.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub die: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// A decoded player action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetName(String),
    Roll,
    Keep(usize),
    Unkeep(usize),
    Score(Category),
    Restart,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::SetName(_) => "setName",
            Command::Roll => "roll",
            Command::Keep(_) => "keep",
            Command::Unkeep(_) => "unkeep",
            Command::Score(_) => "score",
            Command::Restart => "restart",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    /// Event type this server does not handle.
    Unknown(String),
    Invalid(InvalidMove),
}

impl From<InvalidMove> for EventError {
    fn from(err: InvalidMove) -> Self {
        EventError::Invalid(err)
    }
}

impl TryFrom<ClientEvent> for Command {
    type Error = EventError;

    fn try_from(event: ClientEvent) -> Result<Self, Self::Error> {
        let EventPayload {
            name,
            die,
            category,
        } = event.payload;

        let command = match event.event_type.as_str() {
            "setName" | "name" => {
                Command::SetName(name.ok_or(InvalidMove::MissingPayload("name"))?)
            }
            "roll" => Command::Roll,
            "keep" => Command::Keep(die.ok_or(InvalidMove::MissingPayload("die"))?),
            "unkeep" => Command::Unkeep(die.ok_or(InvalidMove::MissingPayload("die"))?),
            "score" => {
                let tag = category.ok_or(InvalidMove::MissingPayload("category"))?;
                Command::Score(tag.parse()?)
            }
            "restart" => Command::Restart,
            _ => return Err(EventError::Unknown(event.event_type)),
        };
        Ok(command)
    }
}

/// Frames the server sends besides the bare game snapshot.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    Error { code: ErrorCode, message: String },
}
