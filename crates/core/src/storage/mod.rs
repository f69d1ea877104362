pub mod snapshots;

pub use snapshots::{LoadReport, SnapshotStore, WindowStatus};
