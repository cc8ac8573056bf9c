//! A single room: up to two connections, their players, and one game.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Game, GameSnapshot, PerSlot, Player, Slot};
use crate::errors::domain::InvalidMove;
use crate::ws::protocol::Command;
use crate::ws::registry::{AdmissionError, Connection, RoomId};

/// Seats per room.
pub const ROOM_CAPACITY: usize = 2;

/// Whether an applied command should be fanned out.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Effect {
    Broadcast,
    Quiet,
}

#[derive(Debug, Clone)]
struct Member {
    conn: Connection,
    slot: Slot,
}

#[derive(Debug)]
pub struct Room {
    id: RoomId,
    members: Vec<Member>,
    roster: PerSlot<Option<Player>>,
    game: Game,
}

impl Room {
    pub fn new(id: RoomId, game: Game) -> Self {
        Self {
            id,
            members: Vec::with_capacity(ROOM_CAPACITY),
            roster: PerSlot::default(),
            game,
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn slot_of(&self, conn_id: Uuid) -> Option<Slot> {
        self.members
            .iter()
            .find(|m| m.conn.id == conn_id)
            .map(|m| m.slot)
    }

    /// First seat not held by a live connection, P1 before P2.
    fn free_slot(&self) -> Option<Slot> {
        Slot::BOTH
            .into_iter()
            .find(|slot| self.members.iter().all(|m| m.slot != *slot))
    }

    pub fn join(&mut self, conn: Connection) -> Result<Slot, AdmissionError> {
        if self.members.len() >= ROOM_CAPACITY {
            return Err(AdmissionError::RoomFull);
        }
        let slot = self.free_slot().ok_or(AdmissionError::RoomFull)?;
        self.roster.get_mut(slot).replace(Player::new(slot));
        self.members.push(Member { conn, slot });
        Ok(slot)
    }

    /// Drop a connection and the player it held.
    pub fn leave(&mut self, conn_id: Uuid) -> Option<Slot> {
        let pos = self.members.iter().position(|m| m.conn.id == conn_id)?;
        let member = self.members.remove(pos);
        *self.roster.get_mut(member.slot) = None;
        Some(member.slot)
    }

    /// Apply one command on behalf of `slot`.
    pub fn execute(&mut self, slot: Slot, command: Command) -> Result<Effect, InvalidMove> {
        match command {
            Command::SetName(name) => {
                if let Some(player) = self.roster.get_mut(slot) {
                    player.set_nickname(&name);
                }
                // P2 naming itself is what starts the game for both screens.
                Ok(if slot == Slot::P2 {
                    Effect::Broadcast
                } else {
                    Effect::Quiet
                })
            }
            Command::Roll => self.game.roll().map(|_| Effect::Broadcast),
            Command::Keep(index) => self.game.keep_die(index).map(|_| Effect::Broadcast),
            Command::Unkeep(index) => self.game.unkeep_die(index).map(|_| Effect::Broadcast),
            Command::Score(category) => self.game.score_roll(category).map(|_| Effect::Broadcast),
            Command::Restart => {
                self.game.reset();
                Ok(Effect::Broadcast)
            }
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.game.snapshot(self.id.as_str(), &self.roster)
    }

    pub fn snapshot_json(&self) -> Result<Arc<str>, serde_json::Error> {
        self.snapshot().to_json().map(Arc::from)
    }

    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.members.iter().map(|m| &m.conn)
    }
}
