use ichimon_core::model::QuestionItem;

/// Default number of questions per selectable block.
pub const BLOCK_SIZE: usize = 10;

/// Split a pool into contiguous blocks of at most `block_size` questions.
///
/// The partition is exhaustive and non-overlapping: concatenating the blocks
/// reproduces `pool` exactly. The last block may be shorter.
///
/// # Panics
///
/// Panics if `block_size` is 0.
#[must_use]
pub fn partition_into_blocks(pool: &[QuestionItem], block_size: usize) -> Vec<Vec<QuestionItem>> {
    pool.chunks(block_size).map(<[QuestionItem]>::to_vec).collect()
}

/// Number of blocks a pool of `len` questions produces.
#[must_use]
pub fn block_count(len: usize, block_size: usize) -> usize {
    len.div_ceil(block_size)
}
