#![forbid(unsafe_code)]

pub mod classify;
pub mod mastery;
pub mod model;
pub mod time;

pub use classify::{classify, AnswerKind};
pub use mastery::{Mark, MasteryProgress, MASTERY_THRESHOLD};
pub use time::Clock;
