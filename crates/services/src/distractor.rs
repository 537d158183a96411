use std::collections::HashMap;

use ichimon_core::classify::{classify, AnswerKind};

/// Per-kind pools of unique answers, the raw material for distractors.
///
/// Built fresh from the full answer universe for each quiz generation —
/// cheap because the bank is small and static within a session. Duplicate
/// answers across questions collapse to one entry; first-seen order is kept
/// within each pool.
#[derive(Debug, Clone, Default)]
pub struct DistractorPools {
    pools: HashMap<AnswerKind, Vec<String>>,
}

impl DistractorPools {
    /// Bucket every unique answer by its semantic kind.
    #[must_use]
    pub fn build<'a>(all_answers: impl IntoIterator<Item = &'a str>) -> Self {
        let mut pools: HashMap<AnswerKind, Vec<String>> = HashMap::new();
        for answer in all_answers {
            let pool = pools.entry(classify(answer)).or_default();
            if !pool.iter().any(|a| a == answer) {
                pool.push(answer.to_owned());
            }
        }
        Self { pools }
    }

    /// The unique answers of one kind, in first-seen order.
    #[must_use]
    pub fn pool(&self, kind: AnswerKind) -> &[String] {
        self.pools.get(&kind).map_or(&[], Vec::as_slice)
    }

    /// Same-kind distractor candidates for a correct answer: its own kind's
    /// pool minus the answer itself.
    #[must_use]
    pub fn candidates(&self, kind: AnswerKind, exclude: &str) -> Vec<String> {
        self.pool(kind)
            .iter()
            .filter(|a| a.as_str() != exclude)
            .cloned()
            .collect()
    }
}
