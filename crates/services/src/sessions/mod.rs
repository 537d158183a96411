mod blocks;
mod flow;
mod pool;
mod session;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use blocks::{block_count, partition_into_blocks, BLOCK_SIZE};
pub use flow::{FlowStage, StudyFlow};
pub use pool::{build_pool, StudyMode};
pub use session::{complete_session, SessionOutcome, SessionProgress, StudySession};
