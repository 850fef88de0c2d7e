pub mod agent;
pub mod queue;
pub mod session;
pub mod shift;
pub mod team;

pub use agent::{Agent, Seniority};
pub use queue::QueueEntry;
pub use session::{Session, SessionStatus};
pub use shift::Shift;
pub use team::Team;
