pub mod admission;
pub mod capacity;
pub mod clock;
pub mod config;
pub mod error;
pub mod liveness;
pub mod models;
pub mod selector;
pub mod shifts;
pub mod store;

pub use clock::{Clock, SystemClock};
pub use config::ShiftdeskConfig;
pub use error::CoreError;
pub use models::{Agent, QueueEntry, Seniority, Session, SessionStatus, Shift, Team};
