//! Error codes for the yacht backend.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that appear
//! in HTTP problem responses and websocket error frames.

use core::fmt;

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Admission
    /// Room identifier missing, blank, or not a single path segment
    InvalidRoomId,
    /// Room already holds two connections
    RoomFull,
    /// Connection is not registered in the room it addressed
    NotAMember,
    /// Room does not exist (already torn down)
    RoomNotFound,

    // Game moves
    /// Game has a winner; only restart is accepted
    GameOver,
    /// All three rolls used this turn
    NoRollsLeft,
    /// Dice index outside the addressed pool
    DieIndexOutOfRange,
    /// Category already on the player's scorecard
    CategoryAlreadyScored,
    /// Category tag not recognised
    UnknownCategory,

    // Generic
    /// Malformed or incomplete request
    BadRequest,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Canonical string for this code, exactly as it appears on the wire.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidRoomId => "INVALID_ROOM_ID",
            Self::RoomFull => "ROOM_FULL",
            Self::NotAMember => "NOT_A_MEMBER",
            Self::RoomNotFound => "ROOM_NOT_FOUND",

            Self::GameOver => "GAME_OVER",
            Self::NoRollsLeft => "NO_ROLLS_LEFT",
            Self::DieIndexOutOfRange => "DIE_INDEX_OUT_OF_RANGE",
            Self::CategoryAlreadyScored => "CATEGORY_ALREADY_SCORED",
            Self::UnknownCategory => "UNKNOWN_CATEGORY",

            Self::BadRequest => "BAD_REQUEST",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
