use rand::seq::SliceRandom;
use rand::Rng;

use ichimon_core::classify::classify;
use ichimon_core::model::{QuestionItem, QuizBank};

use crate::distractor::DistractorPools;

/// Number of options on a generated multiple-choice item.
pub const OPTION_COUNT: usize = 4;

const DISTRACTOR_COUNT: usize = OPTION_COUNT - 1;

/// A derived multiple-choice item. Never persisted.
///
/// `options` holds exactly [`OPTION_COUNT`] distinct strings, one of which
/// is `correct_answer`, in shuffled presentation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizItem {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

/// Builds graded multiple-choice items over a fixed answer universe.
///
/// Distractors are drawn preferentially from the correct answer's own
/// semantic kind — same-type wrong answers are the plausible ones — and
/// padded from the whole universe when the kind pool runs short. The
/// universe must contain at least four unique answers; bank validation
/// enforces that before a builder ever sees it.
#[derive(Debug, Clone)]
pub struct QuizBuilder {
    all_answers: Vec<String>,
}

impl QuizBuilder {
    /// A builder over an explicit answer universe (duplicates allowed).
    #[must_use]
    pub fn new(all_answers: Vec<String>) -> Self {
        Self { all_answers }
    }

    /// A builder over the whole bank's answer universe.
    #[must_use]
    pub fn from_bank(bank: &QuizBank) -> Self {
        Self::new(bank.all_answers())
    }

    /// Select up to `count` questions at random and build one item each.
    ///
    /// Returns `min(count, questions.len())` items; an empty `questions`
    /// slice yields an empty result. Pure apart from `rng` draws.
    #[must_use]
    pub fn build<R: Rng + ?Sized>(
        &self,
        questions: &[QuestionItem],
        count: usize,
        rng: &mut R,
    ) -> Vec<QuizItem> {
        let pools = DistractorPools::build(self.all_answers.iter().map(String::as_str));

        let mut selected: Vec<&QuestionItem> = questions.iter().collect();
        selected.shuffle(rng);
        selected.truncate(count);

        selected
            .into_iter()
            .map(|question| self.build_item(question, &pools, rng))
            .collect()
    }

    fn build_item<R: Rng + ?Sized>(
        &self,
        item: &QuestionItem,
        pools: &DistractorPools,
        rng: &mut R,
    ) -> QuizItem {
        let correct = item.answer.as_str();
        let kind = classify(correct);

        let mut distractors = pools.candidates(kind, correct);
        if distractors.len() >= DISTRACTOR_COUNT {
            distractors.shuffle(rng);
            distractors.truncate(DISTRACTOR_COUNT);
        } else {
            // Kind pool ran short: pad with unique answers from the whole
            // universe, excluding the correct answer and what we already have.
            let mut rest: Vec<String> = Vec::new();
            for answer in &self.all_answers {
                if answer.as_str() == correct
                    || distractors.contains(answer)
                    || rest.contains(answer)
                {
                    continue;
                }
                rest.push(answer.clone());
            }
            rest.shuffle(rng);
            let missing = DISTRACTOR_COUNT - distractors.len();
            distractors.extend(rest.into_iter().take(missing));
        }

        let mut options = Vec::with_capacity(OPTION_COUNT);
        options.push(correct.to_owned());
        options.append(&mut distractors);
        options.shuffle(rng);

        QuizItem {
            question: item.question.clone(),
            options,
            correct_answer: correct.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn item(question: &str, answer: &str) -> QuestionItem {
        QuestionItem {
            question: question.to_owned(),
            answer: answer.to_owned(),
        }
    }

    // 4 people, 3 places, 2 groups and a lone concept.
    fn universe() -> Vec<QuestionItem> {
        vec![
            item("Q1", "ムハンマド"),
            item("Q2", "ウマル"),
            item("Q3", "アリー"),
            item("Q4", "マンスール"),
            item("Q5", "バグダード"),
            item("Q6", "カイロ"),
            item("Q7", "コルドバ"),
            item("Q8", "ウマイヤ朝"),
            item("Q9", "アッバース朝"),
            item("Q10", "カリフ"),
        ]
    }

    fn builder(questions: &[QuestionItem]) -> QuizBuilder {
        QuizBuilder::new(questions.iter().map(|q| q.answer.clone()).collect())
    }

    fn assert_well_formed(quiz: &[QuizItem]) {
        for generated in quiz {
            assert_eq!(generated.options.len(), OPTION_COUNT);
            let distinct: HashSet<&str> =
                generated.options.iter().map(String::as_str).collect();
            assert_eq!(distinct.len(), OPTION_COUNT, "options must be distinct");
            assert!(generated.options.contains(&generated.correct_answer));
        }
    }

    #[test]
    fn builds_min_of_count_and_available() {
        let questions = universe();
        let builder = builder(&questions);
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(builder.build(&questions, 5, &mut rng).len(), 5);
        assert_eq!(builder.build(&questions, 100, &mut rng).len(), questions.len());
        assert!(builder.build(&[], 5, &mut rng).is_empty());
    }

    #[test]
    fn every_item_has_four_distinct_options_including_the_answer() {
        let questions = universe();
        let builder = builder(&questions);

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let quiz = builder.build(&questions, questions.len(), &mut rng);
            assert_well_formed(&quiz);
        }
    }

    #[test]
    fn rich_kind_pool_supplies_all_three_distractors() {
        let questions = universe();
        let builder = builder(&questions);
        let mut rng = StdRng::seed_from_u64(11);

        let quiz = builder.build(&questions[..1], 1, &mut rng);
        let generated = &quiz[0];
        assert_eq!(generated.correct_answer, "ムハンマド");

        // Three other people exist, so every distractor is a person.
        let people = ["ウマル", "アリー", "マンスール"];
        for option in &generated.options {
            if option != "ムハンマド" {
                assert!(people.contains(&option.as_str()), "unexpected distractor {option}");
            }
        }
    }

    #[test]
    fn short_kind_pool_pads_from_the_global_universe() {
        let questions = universe();
        let builder = builder(&questions);
        let mut rng = StdRng::seed_from_u64(3);

        // ウマイヤ朝 has exactly one same-kind neighbour (アッバース朝).
        let target = [item("Q8", "ウマイヤ朝")];
        let quiz = builder.build(&target, 1, &mut rng);
        let generated = &quiz[0];

        assert_well_formed(&quiz);
        assert!(generated.options.contains(&"アッバース朝".to_owned()));
        let from_global = generated
            .options
            .iter()
            .filter(|o| *o != "ウマイヤ朝" && *o != "アッバース朝")
            .count();
        assert_eq!(from_global, 2);
    }

    #[test]
    fn duplicate_answers_in_the_universe_never_duplicate_options() {
        // The same answer appears under three question texts.
        let questions = vec![
            item("Q1", "カリフ"),
            item("Q2", "ウンマ"),
            item("Q3", "ウンマ"),
            item("Q4", "ウンマ"),
            item("Q5", "ジズヤ"),
            item("Q6", "ワクフ"),
        ];
        let builder = builder(&questions);

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let quiz = builder.build(&questions, questions.len(), &mut rng);
            assert_well_formed(&quiz);
        }
    }

    #[test]
    fn fixed_seed_reproduces_the_same_quiz() {
        let questions = universe();
        let builder = builder(&questions);

        let first = builder.build(&questions, 5, &mut StdRng::seed_from_u64(42));
        let second = builder.build(&questions, 5, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }
}
