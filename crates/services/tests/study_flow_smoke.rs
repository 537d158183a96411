use std::collections::HashSet;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use ichimon_core::mastery::Mark;
use ichimon_core::model::{QuestionItem, QuizBank, QuizCategory};
use ichimon_core::time::{fixed_clock, fixed_now};
use services::{FlowStage, QuizBuilder, StudyFlow, StudyMode, StudyService, OPTION_COUNT};
use storage::{parse_bank, HistoryRepository, InMemoryHistory};

fn item(question: &str, answer: &str) -> QuestionItem {
    QuestionItem {
        question: question.to_owned(),
        answer: answer.to_owned(),
    }
}

fn build_bank() -> Arc<QuizBank> {
    let first = (0..12)
        .map(|i| item(&format!("成立Q{i}"), &format!("成立A{i}")))
        .collect();
    let second = (0..13)
        .map(|i| item(&format!("発展Q{i}"), &format!("発展A{i}")))
        .collect();
    Arc::new(QuizBank {
        chapter_number: "6".to_owned(),
        title: "イスラーム世界の形成".to_owned(),
        description: "smoke".to_owned(),
        categories: vec![
            QuizCategory {
                title: "成立期".to_owned(),
                questions: first,
            },
            QuizCategory {
                title: "発展期".to_owned(),
                questions: second,
            },
        ],
    })
}

#[test]
fn flashcard_study_round_trip() {
    let mut rng = StdRng::seed_from_u64(20);
    let bank = build_bank();
    let repository = InMemoryHistory::new();
    let mut service =
        StudyService::new(bank.clone(), Arc::new(repository.clone())).with_clock(fixed_clock());

    let mut flow = StudyFlow::new(bank);
    flow.toggle_category("成立期");
    flow.toggle_category("発展期");

    assert_eq!(flow.build_pool(service.history()).unwrap(), 25);
    assert_eq!(
        flow.blocks().iter().map(Vec::len).collect::<Vec<_>>(),
        [10, 10, 5]
    );

    // Play the first block, missing the 3rd and 7th card shown.
    flow.start_block(0, &mut rng, fixed_now()).unwrap();
    let mut missed = Vec::new();
    for i in 0..10 {
        let question = flow.current_question().unwrap().question.clone();
        let mark = if i == 2 || i == 6 {
            missed.push(question.clone());
            Mark::Unknown
        } else {
            Mark::Known
        };
        service.mark(&question, mark);
        flow.mark(mark, fixed_now()).unwrap();
    }

    assert_eq!(flow.stage(), FlowStage::Completed);
    let outcome = flow.outcome().unwrap().clone();
    assert_eq!(outcome.known_count, 8);
    let wrong: HashSet<String> = outcome
        .wrong_pool
        .iter()
        .map(|q| q.question.clone())
        .collect();
    assert_eq!(wrong, missed.iter().cloned().collect::<HashSet<_>>());

    // The marks were persisted through the repository.
    let persisted = repository.load().unwrap();
    for question in &missed {
        let title = if question.starts_with("成立") {
            "成立期"
        } else {
            "発展期"
        };
        let stats = persisted.category(title).unwrap().stats(question).unwrap();
        assert_eq!(stats.incorrect, 1);
        assert_eq!(stats.mastery_level, 0);
    }

    // Replay the missed cards and clear them.
    flow.retry_wrong(&mut rng, fixed_now()).unwrap();
    assert_eq!(flow.session().unwrap().total(), 2);
    while flow.stage() == FlowStage::InSession {
        let question = flow.current_question().unwrap().question.clone();
        service.mark(&question, Mark::Known);
        flow.mark(Mark::Known, fixed_now()).unwrap();
    }
    assert_eq!(flow.outcome().unwrap().known_count, 2);

    flow.back_to_start();
    assert_eq!(flow.stage(), FlowStage::Idle);
}

#[test]
fn weakness_mode_shrinks_as_questions_are_mastered() {
    let bank = build_bank();
    let mut service = StudyService::new(bank.clone(), Arc::new(InMemoryHistory::new()))
        .with_clock(fixed_clock());

    let mut flow = StudyFlow::new(bank);
    flow.toggle_select_all();
    flow.set_mode(StudyMode::Weakness);

    // Nothing studied yet: the whole bank is weak.
    assert_eq!(flow.build_pool(service.history()).unwrap(), 25);

    // Master one question; the weakness pool drops it.
    for _ in 0..3 {
        service.mark("成立Q0", Mark::Known);
    }
    assert_eq!(flow.build_pool(service.history()).unwrap(), 24);
    assert!(flow
        .pending_pool()
        .unwrap()
        .iter()
        .all(|q| q.question != "成立Q0"));
}

#[test]
fn quiz_generation_from_a_parsed_bank() {
    let bank = parse_bank(
        r#"{
            "chapterNumber": "6",
            "title": "イスラーム世界の形成",
            "description": "smoke",
            "categories": [
                {
                    "title": "成立期",
                    "questions": [
                        { "q": "開祖は?", "a": "ムハンマド" },
                        { "q": "初代カリフは?", "a": "アブー=バクル" },
                        { "q": "第2代カリフは?", "a": "ウマル" },
                        { "q": "聖遷先は?", "a": "メディナ" },
                        { "q": "聖典は?", "a": "『コーラン』(『クルアーン』)" }
                    ]
                },
                {
                    "title": "発展期",
                    "questions": [
                        { "q": "新都は?", "a": "バグダード" },
                        { "q": "王朝は?", "a": "アッバース朝" },
                        { "q": "征服された王朝は?", "a": "ウマイヤ朝" }
                    ]
                }
            ]
        }"#,
    )
    .unwrap();

    let builder = QuizBuilder::from_bank(&bank);
    let mut rng = StdRng::seed_from_u64(8);
    let questions: Vec<QuestionItem> = bank
        .categories
        .iter()
        .flat_map(|c| c.questions.iter().cloned())
        .collect();

    let quiz = builder.build(&questions, 10, &mut rng);
    assert_eq!(quiz.len(), 8);

    for generated in &quiz {
        assert_eq!(generated.options.len(), OPTION_COUNT);
        let distinct: HashSet<&str> = generated.options.iter().map(String::as_str).collect();
        assert_eq!(distinct.len(), OPTION_COUNT);
        assert!(generated.options.contains(&generated.correct_answer));
    }

    // ムハンマド has two same-kind neighbours plus one from the global pool;
    // either way its item is well-formed and prefers people.
    let founder = quiz
        .iter()
        .find(|g| g.correct_answer == "ムハンマド")
        .unwrap();
    let people = ["アブー=バクル", "ウマル"];
    let same_kind = founder
        .options
        .iter()
        .filter(|o| people.contains(&o.as_str()))
        .count();
    assert_eq!(same_kind, 2);
}
