//! Error handling for the yacht backend.

pub mod domain;
pub mod error_code;

pub use domain::InvalidMove;
pub use error_code::ErrorCode;
