pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::services::{MarkAllReadOutcome, NotificationService};
pub use config::*;
pub use domain::entities::*;
pub use domain::errors::{DomainError, DomainResult};
pub use infrastructure::persistence::Database;
