use std::fs;
use std::io::Write;

use ichimon_core::mastery::Mark;
use ichimon_core::time::fixed_now;
use storage::{load_bank, HistoryRepository, JsonFileHistory};

const BANK_JSON: &str = r#"{
    "chapterNumber": "6",
    "title": "イスラーム世界の形成",
    "description": "integration",
    "categories": [
        {
            "title": "成立期",
            "questions": [
                { "q": "開祖は?", "a": "ムハンマド" },
                { "q": "聖遷先は?", "a": "メディナ" }
            ]
        },
        {
            "title": "発展期",
            "questions": [
                { "q": "新都は?", "a": "バグダード" },
                { "q": "王朝は?", "a": "アッバース朝" }
            ]
        }
    ]
}"#;

#[test]
fn bank_and_history_live_side_by_side_on_disk() {
    let dir = tempfile::tempdir().unwrap();

    let bank_path = dir.path().join("bank.json");
    let mut file = fs::File::create(&bank_path).unwrap();
    file.write_all(BANK_JSON.as_bytes()).unwrap();

    let bank = load_bank(&bank_path).unwrap();
    assert_eq!(bank.question_count(), 4);

    // Record marks against real bank questions and persist them.
    let repository = JsonFileHistory::new(dir.path().join("history.json"));
    let mut history = repository.load_or_default();
    assert!(history.is_empty());

    for question in ["開祖は?", "聖遷先は?"] {
        let title = bank.category_for_question(question).unwrap().to_owned();
        history = history.record_mark(&title, question, Mark::Known, fixed_now());
    }
    history = history.record_mark("発展期", "新都は?", Mark::Unknown, fixed_now());
    repository.save(&history).unwrap();

    // A fresh repository over the same file sees the identical store, and
    // re-saving what it loaded does not change a byte.
    let reopened = JsonFileHistory::new(dir.path().join("history.json"));
    let loaded = reopened.load().unwrap();
    assert_eq!(loaded, history);

    let before = fs::read_to_string(reopened.path()).unwrap();
    reopened.save(&loaded).unwrap();
    let after = fs::read_to_string(reopened.path()).unwrap();
    assert_eq!(before, after);

    let stats = loaded.category("成立期").unwrap().stats("開祖は?").unwrap();
    assert_eq!((stats.correct, stats.incorrect, stats.mastery_level), (1, 0, 1));
}
