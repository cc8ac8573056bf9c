pub mod dispatch;
pub mod protocol;
pub mod registry;
pub mod room;
pub mod session;
