pub mod participant;
pub mod window;

pub use participant::{ParticipantRecord, Snapshot};
pub use window::TimeWindow;
