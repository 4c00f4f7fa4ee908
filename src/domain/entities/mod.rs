pub mod board;
pub mod notification;
pub mod notification_hint;

pub use board::*;
pub use notification::*;
pub use notification_hint::*;
