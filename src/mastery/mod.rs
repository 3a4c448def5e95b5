pub mod model;

pub use model::{AttemptRecord, MasteryRecord, MasterySnapshot, MasteryStore, Progress};
