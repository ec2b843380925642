pub mod limits;
pub mod session;

pub use limits::{LimitViolation, SessionLimits};
pub use session::{GraphSummary, SeedSession, SessionError, SessionReport, SessionRequest};
