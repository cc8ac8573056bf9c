//! Decode one inbound text frame and route it to the room's game.

use tracing::{debug, warn};
use uuid::Uuid;

use crate::ws::protocol::{ClientEvent, Command, EventError, ServerMsg};
use crate::ws::registry::{Applied, DispatchError, RoomId, RoomRegistry};

#[derive(Debug)]
pub enum Outcome {
    Applied(Applied),
    /// Event type we do not handle.
    Ignored(String),
    /// Understood but refused; nothing changed.
    Rejected(DispatchError),
    /// Not a JSON event frame.
    Malformed(serde_json::Error),
}

impl Outcome {
    /// Error frame for the sender, if this outcome warrants one.
    pub fn error_frame(&self) -> Option<String> {
        let Outcome::Rejected(err) = self else {
            return None;
        };
        let msg = ServerMsg::Error {
            code: err.code(),
            message: err.to_string(),
        };
        serde_json::to_string(&msg).ok()
    }
}

pub fn dispatch(registry: &RoomRegistry, room_id: &RoomId, conn_id: Uuid, text: &str) -> Outcome {
    let event: ClientEvent = match serde_json::from_str(text) {
        Ok(event) => event,
        Err(err) => {
            warn!(room_id = %room_id, conn_id = %conn_id, error = %err, "[DISPATCH] malformed frame dropped");
            return Outcome::Malformed(err);
        }
    };

    let command = match Command::try_from(event) {
        Ok(command) => command,
        Err(EventError::Unknown(event_type)) => {
            debug!(room_id = %room_id, conn_id = %conn_id, event = %event_type, "[DISPATCH] unknown event ignored");
            return Outcome::Ignored(event_type);
        }
        Err(EventError::Invalid(invalid)) => {
            debug!(room_id = %room_id, conn_id = %conn_id, error = %invalid, "[DISPATCH] bad payload");
            return Outcome::Rejected(DispatchError::Invalid(invalid));
        }
    };

    let event = command.name();
    match registry.apply(room_id, conn_id, command) {
        Ok(applied) => {
            debug!(
                room_id = %room_id,
                conn_id = %conn_id,
                slot = %applied.slot,
                event,
                delivered = applied.delivered,
                "[DISPATCH] applied"
            );
            Outcome::Applied(applied)
        }
        Err(err @ DispatchError::Encode(_)) => {
            warn!(room_id = %room_id, conn_id = %conn_id, event, error = %err, "[DISPATCH] snapshot encoding failed");
            Outcome::Rejected(err)
        }
        Err(err) => {
            debug!(room_id = %room_id, conn_id = %conn_id, event, error = %err, "[DISPATCH] rejected");
            Outcome::Rejected(err)
        }
    }
}
