//! Contract tests run against every KeyValueStorage implementation:
//! the in-memory fake and the file-backed store must be
//! indistinguishable to the stores built on top of them.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use simulado::models::{Question, QuestionOption, QuizResult};
use simulado::storage::{FileStorage, KeyValueStorage, MemoryStorage};
use simulado::stores::{LastResultStore, MissedQuestionsStore};

fn question(number: &str) -> Question {
    Question {
        number: number.to_string(),
        url: format!("https://example.com/{}", number),
        prompt: format!("Pergunta {}", number),
        image: format!("{}.jpg", number),
        image_url: Some(format!("https://img.example.com/{}.jpg", number)),
        options: vec![
            QuestionOption {
                letter: "A".to_string(),
                text: "Sim".to_string(),
                correct: true,
            },
            QuestionOption {
                letter: "B".to_string(),
                text: "Não".to_string(),
                correct: false,
            },
        ],
        correct_letter: "A".to_string(),
        theme_label: Some("Velocidade".to_string()),
    }
}

fn temp_storage(tag: &str) -> (FileStorage, PathBuf) {
    let dir = std::env::temp_dir().join(format!("simulado-kv-{}-{}", uuid::Uuid::new_v4(), tag));
    fs::create_dir_all(&dir).unwrap();
    (FileStorage::new(&dir), dir)
}

fn backends(tag: &str) -> Vec<Arc<dyn KeyValueStorage>> {
    let (files, _) = temp_storage(tag);
    vec![Arc::new(MemoryStorage::new()), Arc::new(files)]
}

#[test]
fn missing_keys_read_as_none_everywhere() {
    for storage in backends("missing") {
        assert_eq!(storage.get("no-such-key").unwrap(), None);
    }
}

#[test]
fn set_get_remove_round_trip_everywhere() {
    for storage in backends("round-trip") {
        storage.set("k", "{\"v\":1}").unwrap();
        assert_eq!(storage.get("k").unwrap(), Some("{\"v\":1}".to_string()));

        storage.remove("k").unwrap();
        storage.remove("k").unwrap();
        assert_eq!(storage.get("k").unwrap(), None);
    }
}

#[test]
fn overwrite_keeps_only_the_latest_value() {
    for storage in backends("overwrite") {
        storage.set("k", "old").unwrap();
        storage.set("k", "new").unwrap();
        assert_eq!(storage.get("k").unwrap(), Some("new".to_string()));
    }
}

#[test]
fn missed_deck_behaves_identically_on_every_backend() {
    for storage in backends("deck") {
        let store = MissedQuestionsStore::new(storage);

        assert!(store.list().unwrap().is_empty());

        store.add(&question("q-1")).unwrap();
        store.add(&question("q-1")).unwrap();
        store.add(&question("q-2")).unwrap();
        assert_eq!(store.list().unwrap().len(), 2);

        store.remove("q-1").unwrap();
        store.remove("q-1").unwrap();
        let deck = store.list().unwrap();
        assert_eq!(deck.len(), 1);
        assert_eq!(deck[0].number, "q-2");

        store.clear().unwrap();
        assert!(store.list().unwrap().is_empty());
    }
}

#[test]
fn file_backed_deck_survives_a_restart() {
    let (files, dir) = temp_storage("restart");
    let stored = question("q-42");
    MissedQuestionsStore::new(Arc::new(files))
        .add(&stored)
        .unwrap();

    // A brand-new store over the same directory models a process restart.
    let reopened = MissedQuestionsStore::new(Arc::new(FileStorage::new(&dir)));
    let deck = reopened.list().unwrap();

    assert_eq!(deck, vec![stored]);
    assert_eq!(deck[0].theme_label.as_deref(), Some("Velocidade"));
}

#[test]
fn file_backed_result_survives_a_restart() {
    let (files, dir) = temp_storage("result-restart");
    let result = QuizResult {
        questions: vec![question("q-1")],
        answers: [("q-1".to_string(), "A".to_string())].into_iter().collect(),
        score: 1,
        total: 1,
        time_spent_secs: 33,
        date: Utc::now(),
    };
    LastResultStore::new(Arc::new(files)).save(&result).unwrap();

    let loaded = LastResultStore::new(Arc::new(FileStorage::new(&dir)))
        .load()
        .unwrap()
        .expect("a stored result");

    assert_eq!(loaded, result);
}

#[test]
fn corrupt_deck_record_is_a_load_error_not_a_panic() {
    let (files, _) = temp_storage("corrupt");
    files.set("quiz_failed_questions", "not json at all").unwrap();

    let store = MissedQuestionsStore::new(Arc::new(files));
    assert!(store.list().is_err());
}
