use std::collections::HashSet;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use verbo_config::drill::DrillConfig;
use verbo_drill::{DrillGenerator, DrillMode, DrillSession, DrillSettings, OPTION_COUNT};

use super::engine;

fn generator(seed: u64) -> DrillGenerator<'static, verbo_core::ConjugationEngine, ChaCha20Rng> {
    DrillGenerator::new(
        engine(),
        DrillSettings::from(&DrillConfig::default()),
        ChaCha20Rng::seed_from_u64(seed),
    )
}

#[test]
fn questions_are_well_formed() {
    let questions = generator(7).generate_questions(25).unwrap();
    assert_eq!(questions.len(), 25);

    for question in &questions {
        assert_eq!(question.options.len(), OPTION_COUNT);
        let distinct: HashSet<&String> = question.options.iter().collect();
        assert_eq!(distinct.len(), OPTION_COUNT);
        assert!(question.options.contains(&question.correct_form));

        let expected = engine()
            .conjugate_form(&question.verb, &question.tense, &question.person)
            .unwrap()
            .form;
        assert_eq!(question.correct_form, expected);
    }
}

#[test]
fn seeded_drills_repeat() {
    let a = generator(42).generate_questions(10).unwrap();
    let b = generator(42).generate_questions(10).unwrap();
    assert_eq!(a, b);
}

#[test]
fn default_tags_select_the_pool() {
    let questions = generator(3).generate_questions(30).unwrap();
    let settings = DrillSettings::from(&DrillConfig::default());
    for question in &questions {
        let verb = engine().lexicon().lookup(&question.verb).unwrap();
        assert!(settings.filter.matches(verb), "{}", verb.infinitive);
        assert!(settings.tenses.contains(&question.tense));
    }
}

#[test]
fn quick_session_end_to_end() {
    let mut generator = generator(11);
    let mut session = DrillSession::start(DrillMode::Quick, &mut generator).unwrap();
    assert_eq!(session.questions().len(), 5);

    while let Some(question) = session.current() {
        let answer = question.correct_form.clone();
        session.submit(&answer).unwrap();
    }

    let summary = session.summary();
    assert_eq!(summary.correct, 5);
    assert_eq!(summary.percentage, 100);
    assert!(summary.weak_verbs.is_empty());
}
