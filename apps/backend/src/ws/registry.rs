//! Room registry: admission, teardown, mutation and fan-out.
//!
//! Lock order is fixed. Admission and removal hold the map's shard guard and
//! then the room lock; mutation and broadcast clone the room handle out of
//! the map and only take the room lock. A snapshot is handed to the sinks
//! after its mutation is applied and before the room lock is released, so
//! every member sees snapshots in mutation order. Sinks never block.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::{DiceSource, Game, GameSnapshot, SeededDice, Slot};
use crate::errors::domain::InvalidMove;
use crate::errors::ErrorCode;
use crate::ws::protocol::Command;
use crate::ws::room::{Effect, Room};

/// Opaque room token taken from the handshake path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RoomId(Arc<str>);

impl RoomId {
    /// Accepts one non-blank path segment, kept exactly as given.
    pub fn parse(raw: &str) -> Result<Self, AdmissionError> {
        if raw.trim().is_empty() || raw.contains('/') {
            return Err(AdmissionError::InvalidRoomId);
        }
        Ok(Self(Arc::from(raw)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    #[error("connection closed")]
    Closed,
}

/// Outbound half of one live connection.
pub trait ConnectionSink: Send + Sync + 'static {
    /// Non-blocking hand-off of one text frame.
    fn deliver(&self, payload: Arc<str>) -> Result<(), DeliveryError>;
}

impl ConnectionSink for UnboundedSender<Arc<str>> {
    fn deliver(&self, payload: Arc<str>) -> Result<(), DeliveryError> {
        self.send(payload).map_err(|_| DeliveryError::Closed)
    }
}

#[derive(Clone)]
pub struct Connection {
    pub id: Uuid,
    sink: Arc<dyn ConnectionSink>,
}

impl Connection {
    pub fn new(id: Uuid, sink: impl ConnectionSink) -> Self {
        Self {
            id,
            sink: Arc::new(sink),
        }
    }

    pub fn deliver(&self, payload: Arc<str>) -> Result<(), DeliveryError> {
        self.sink.deliver(payload)
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection").field("id", &self.id).finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AdmissionError {
    #[error("room id must be one non-empty path segment")]
    InvalidRoomId,
    #[error("room already has two players")]
    RoomFull,
}

impl AdmissionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AdmissionError::InvalidRoomId => ErrorCode::InvalidRoomId,
            AdmissionError::RoomFull => ErrorCode::RoomFull,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("room not found")]
    RoomNotFound,
    #[error("connection is not a member of the room")]
    NotAMember,
    #[error(transparent)]
    Invalid(#[from] InvalidMove),
    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

impl DispatchError {
    pub fn code(&self) -> ErrorCode {
        match self {
            DispatchError::RoomNotFound => ErrorCode::RoomNotFound,
            DispatchError::NotAMember => ErrorCode::NotAMember,
            DispatchError::Invalid(invalid) => invalid.code(),
            DispatchError::Encode(_) => ErrorCode::Internal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admission {
    pub room_id: RoomId,
    pub slot: Slot,
    /// Connections in the room after this one joined.
    pub occupants: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    pub slot: Slot,
    pub effect: Effect,
    /// Connections the snapshot was handed to (zero for quiet effects).
    pub delivered: usize,
}

type DiceFactory = Arc<dyn Fn(&RoomId) -> Box<dyn DiceSource> + Send + Sync>;

pub struct RoomRegistry {
    rooms: DashMap<RoomId, Arc<Mutex<Room>>>,
    dice: DiceFactory,
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RoomRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoomRegistry")
            .field("rooms", &self.rooms.len())
            .finish_non_exhaustive()
    }
}

impl RoomRegistry {
    /// Rooms roll OS-seeded dice.
    pub fn new() -> Self {
        Self::with_dice(|_| Box::new(SeededDice::from_entropy()))
    }

    /// Every new room replays the same seeded sequence.
    pub fn seeded(seed: u64) -> Self {
        Self::with_dice(move |_| Box::new(SeededDice::from_seed(seed)))
    }

    pub fn with_dice<F>(factory: F) -> Self
    where
        F: Fn(&RoomId) -> Box<dyn DiceSource> + Send + Sync + 'static,
    {
        Self {
            rooms: DashMap::new(),
            dice: Arc::new(factory),
        }
    }

    /// Seat a connection, creating the room on first use.
    pub fn admit(&self, room_id: &str, conn: Connection) -> Result<Admission, AdmissionError> {
        let room_id = RoomId::parse(room_id)?;
        let conn_id = conn.id;

        let entry = self.rooms.entry(room_id.clone()).or_insert_with(|| {
            info!(room_id = %room_id, "[ROOMS] room created");
            let game = Game::with_dice((self.dice)(&room_id));
            Arc::new(Mutex::new(Room::new(room_id.clone(), game)))
        });
        let mut room = entry.lock();
        let slot = room.join(conn).inspect_err(|_| {
            info!(room_id = %room_id, conn_id = %conn_id, "[ROOMS] room full, rejecting");
        })?;

        info!(
            room_id = %room_id,
            conn_id = %conn_id,
            slot = %slot,
            "[ROOMS] connection admitted"
        );
        Ok(Admission {
            room_id: room_id.clone(),
            slot,
            occupants: room.len(),
        })
    }

    /// Detach a connection; the room and its game go with the last one.
    pub fn remove(&self, room_id: &RoomId, conn_id: Uuid) -> Option<Slot> {
        let mut left = None;
        let destroyed = self
            .rooms
            .remove_if(room_id, |_, room| {
                let mut room = room.lock();
                left = room.leave(conn_id);
                room.is_empty()
            })
            .is_some();

        if let Some(slot) = left {
            info!(room_id = %room_id, conn_id = %conn_id, slot = %slot, "[ROOMS] connection left");
        }
        if destroyed {
            info!(room_id = %room_id, "[ROOMS] room destroyed");
        }
        left
    }

    /// Hand `payload` to every connection in the room. Returns deliveries made.
    pub fn broadcast(&self, room_id: &RoomId, payload: Arc<str>) -> usize {
        let Some(room) = self.handle(room_id) else {
            return 0;
        };
        let room = room.lock();
        deliver_all(room_id, room.connections(), payload)
    }

    /// Run one command and fan out the resulting snapshot, both under the room lock.
    pub fn apply(
        &self,
        room_id: &RoomId,
        conn_id: Uuid,
        command: Command,
    ) -> Result<Applied, DispatchError> {
        let room = self.handle(room_id).ok_or(DispatchError::RoomNotFound)?;

        let mut room = room.lock();
        let slot = room.slot_of(conn_id).ok_or(DispatchError::NotAMember)?;
        let effect = room.execute(slot, command)?;
        let delivered = match effect {
            Effect::Broadcast => {
                let payload = room.snapshot_json()?;
                deliver_all(room_id, room.connections(), payload)
            }
            Effect::Quiet => 0,
        };
        Ok(Applied {
            slot,
            effect,
            delivered,
        })
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn connection_count(&self) -> usize {
        self.rooms.iter().map(|room| room.lock().len()).sum()
    }

    pub fn occupancy(&self, room_id: &RoomId) -> Option<usize> {
        self.handle(room_id).map(|room| room.lock().len())
    }

    pub fn snapshot(&self, room_id: &RoomId) -> Option<GameSnapshot> {
        self.handle(room_id).map(|room| room.lock().snapshot())
    }

    fn handle(&self, room_id: &RoomId) -> Option<Arc<Mutex<Room>>> {
        self.rooms.get(room_id).map(|room| Arc::clone(room.value()))
    }
}

fn deliver_all<'a>(
    room_id: &RoomId,
    conns: impl IntoIterator<Item = &'a Connection>,
    payload: Arc<str>,
) -> usize {
    let mut delivered = 0;
    for conn in conns {
        match conn.deliver(Arc::clone(&payload)) {
            Ok(()) => delivered += 1,
            Err(err) => warn!(
                room_id = %room_id,
                conn_id = %conn.id,
                error = %err,
                "[ROOMS] delivery failed, skipping"
            ),
        }
    }
    debug!(room_id = %room_id, delivered, "[ROOMS] broadcast");
    delivered
}
