//! Domain-level rejection type returned by the game engine.
//!
//! This error type is transport-agnostic. The session layer decides whether
//! a rejected move is only logged or also reported back to the sender.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::domain::category::Category;
use crate::errors::error_code::ErrorCode;

/// Why a player action was refused. A refused action never mutates state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidMove {
    /// The game already has a winner; only a restart is accepted.
    GameOver,
    /// Three rolls have been used this turn.
    NoRollsLeft,
    /// Dice index outside the addressed pool.
    DieIndexOutOfRange { index: usize, len: usize },
    /// The current player already has an entry for this category.
    CategoryAlreadyScored(Category),
    /// Category tag that is not one of the twelve known tags.
    UnknownCategory(String),
    /// A payload field required by the event was absent.
    MissingPayload(&'static str),
}

impl InvalidMove {
    pub fn code(&self) -> ErrorCode {
        match self {
            InvalidMove::GameOver => ErrorCode::GameOver,
            InvalidMove::NoRollsLeft => ErrorCode::NoRollsLeft,
            InvalidMove::DieIndexOutOfRange { .. } => ErrorCode::DieIndexOutOfRange,
            InvalidMove::CategoryAlreadyScored(_) => ErrorCode::CategoryAlreadyScored,
            InvalidMove::UnknownCategory(_) => ErrorCode::UnknownCategory,
            InvalidMove::MissingPayload(_) => ErrorCode::BadRequest,
        }
    }
}

impl Display for InvalidMove {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            InvalidMove::GameOver => write!(f, "game is over"),
            InvalidMove::NoRollsLeft => write!(f, "no rolls left this turn"),
            InvalidMove::DieIndexOutOfRange { index, len } => {
                write!(f, "die index {index} out of range for pool of {len}")
            }
            InvalidMove::CategoryAlreadyScored(c) => write!(f, "category {c} already scored"),
            InvalidMove::UnknownCategory(tag) => write!(f, "unknown category: {tag}"),
            InvalidMove::MissingPayload(field) => write!(f, "missing payload field: {field}"),
        }
    }
}

impl Error for InvalidMove {}
