use std::path::PathBuf;

use verbo_core::{LoadError, TableIssue};

use super::engine;
use crate::SpanishLoader;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("verbo-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn embedded_tables_pass_the_audit() {
    assert!(engine().check_tables().is_empty());
    assert!(engine().lexicon().len() >= 40);
    assert_eq!(engine().tenses().len(), 6);
    assert_eq!(engine().persons().len(), 6);
}

#[test]
fn override_files_merge_last_wins() {
    let dir = scratch_dir("merge");
    let path = dir.join("extra.json");
    std::fs::write(
        &path,
        r#"[{"infinitive": "hablar", "tense": "presente", "person": "yo", "form": "hablo yo"}]"#,
    )
    .unwrap();

    let engine = SpanishLoader::load(None, &[&path]).unwrap();
    let result = engine.conjugate_form("hablar", "presente", "yo").unwrap();
    assert_eq!(result.form, "hablo yo");

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn override_for_unknown_verb_is_fatal() {
    let dir = scratch_dir("unknown");
    let path = dir.join("extra.json");
    std::fs::write(
        &path,
        r#"[{"infinitive": "bailar", "tense": "presente", "person": "yo", "form": "bailo"}]"#,
    )
    .unwrap();

    let err = SpanishLoader::load(None, &[&path]).unwrap_err();
    match err {
        LoadError::InvalidTables(issues) => assert_eq!(
            issues,
            vec![TableIssue::UnknownOverrideVerb {
                infinitive: "bailar".to_string()
            }]
        ),
        other => panic!("unexpected error: {other}"),
    }

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn content_directory_round_trip() {
    let dir = scratch_dir("content");
    std::fs::write(
        dir.join("verbs.json"),
        r#"[{"infinitive": "cantar", "english": "to sing", "group": "ar", "irregular": "no", "tags": "basic"}]"#,
    )
    .unwrap();
    std::fs::write(dir.join("conjugations.json"), "[]").unwrap();
    std::fs::write(
        dir.join("patterns.json"),
        r#"{
            "persons": ["yo"],
            "tenses": ["presente"],
            "regular_endings": {"ar": {"presente": {"yo": "o"}}}
        }"#,
    )
    .unwrap();

    let engine = SpanishLoader::load_from_dir(&dir).unwrap();
    assert_eq!(
        engine.conjugate_form("cantar", "presente", "yo").unwrap().form,
        "canto"
    );

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn missing_files_are_reported() {
    let dir = scratch_dir("missing");
    assert!(matches!(
        SpanishLoader::load_from_dir(&dir),
        Err(LoadError::FileNotFound(_))
    ));
    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn malformed_records_fail_to_parse() {
    assert!(matches!(
        SpanishLoader::from_sources("[{", "[]", "{}"),
        Err(LoadError::ParseError(_))
    ));
    assert!(matches!(
        SpanishLoader::from_sources(
            r#"[{"infinitive": "comer", "group": "ar"}]"#,
            "[]",
            r#"{"persons": [], "tenses": [], "regular_endings": {}}"#
        ),
        Err(LoadError::InvalidFormat(_))
    ));
}
