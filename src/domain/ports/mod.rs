pub mod board_lookup;
pub mod clock;
pub mod notification_repository;
