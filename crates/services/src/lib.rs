#![forbid(unsafe_code)]

pub mod distractor;
pub mod error;
pub mod quiz;
pub mod sessions;
pub mod study_service;

pub use ichimon_core::Clock;
pub use sessions as session;

pub use distractor::DistractorPools;
pub use error::SessionError;
pub use quiz::{QuizBuilder, QuizItem, OPTION_COUNT};
pub use sessions::{
    build_pool, complete_session, partition_into_blocks, FlowStage, SessionOutcome,
    SessionProgress, StudyFlow, StudyMode, StudySession, BLOCK_SIZE,
};
pub use study_service::StudyService;
