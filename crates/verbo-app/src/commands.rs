use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use verbo_config::Config;
use verbo_config::data::DataConfig;
use verbo_core::{Conjugation, ConjugatedForm, ConjugationEngine, ConjugationTable, VerbFilter};
use verbo_drill::{DrillGenerator, DrillMode, DrillSession, DrillSettings};

use crate::Command;

pub fn run(
    command: Command,
    engine: &ConjugationEngine,
    config: &Config,
    json: bool,
) -> anyhow::Result<()> {
    match command {
        Command::Conjugate {
            infinitive,
            tense,
            person,
        } => {
            let result = engine.conjugate(&infinitive, &tense, person.as_deref())?;
            if json {
                return print_json(&result);
            }
            match result {
                Conjugation::Single(form) => println!("{}", describe(&form)),
                Conjugation::Table(table) => print_table(engine, &table),
            }
        }

        Command::Table { infinitive, tense } => {
            if json {
                return print_json(&engine.conjugate_table(&infinitive, &tense)?);
            }
            print!("{}", engine.export_table(&infinitive, &tense)?);
        }

        Command::Check {
            infinitive,
            tense,
            person,
            answer,
        } => {
            let validation = engine.validate(&infinitive, &tense, &person, &answer)?;
            if json {
                return print_json(&validation);
            }
            if validation.is_correct {
                println!("Correct: {}", validation.expected);
            } else {
                println!(
                    "Incorrect: '{}', expected '{}'",
                    validation.provided, validation.expected
                );
            }
        }

        Command::Drill {
            mode,
            count,
            seed,
            tags,
        } => {
            let mode = DrillMode::from_name(&mode, count)
                .ok_or_else(|| anyhow::anyhow!("Unknown drill mode '{mode}'"))?;

            let mut settings = DrillSettings::from(&config.drill);
            if let Some(tags) = tags {
                settings.filter = VerbFilter::new().tags(&tags);
            }

            let rng = match seed.or(config.drill.seed) {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };

            let mut generator = DrillGenerator::new(engine, settings, rng);
            let session = DrillSession::start(mode, &mut generator)?;

            if !json && atty::is(atty::Stream::Stdin) {
                crate::drill::run_interactive(session)?;
            } else {
                print_json(&session.questions())?;
            }
        }

        Command::Tenses => {
            let tenses: Vec<TenseEntry> = engine
                .tenses()
                .iter()
                .map(|tense| {
                    let info = engine.tense_info(tense);
                    TenseEntry {
                        tense: tense.clone(),
                        label: info.label,
                        explanation: info.explanation,
                    }
                })
                .collect();
            if json {
                return print_json(&tenses);
            }
            for entry in tenses {
                println!("{:<20} {:<20} {}", entry.tense, entry.label, entry.explanation);
            }
        }

        Command::Search { english } => {
            let verbs = engine.lexicon().find_by_english(&english);
            if json {
                return print_json(&verbs);
            }
            if verbs.is_empty() {
                println!("No verbs match '{english}'");
            }
            for verb in verbs {
                let marker = if verb.irregular { " (irregular)" } else { "" };
                println!("{:<12} {}{}", verb.infinitive, verb.english, marker);
            }
        }

        Command::Audit => return audit(&config.data, json),
    }

    Ok(())
}

/// Report table issues without failing on the first fatal one
pub fn audit(data: &DataConfig, json: bool) -> anyhow::Result<()> {
    let issues = crate::loader(data)?.issues();
    let fatal = issues.iter().filter(|issue| issue.is_fatal()).count();

    if json {
        let report: Vec<AuditEntry> = issues
            .iter()
            .map(|issue| AuditEntry {
                fatal: issue.is_fatal(),
                message: issue.to_string(),
            })
            .collect();
        print_json(&report)?;
    } else if issues.is_empty() {
        println!("No issues found");
    } else {
        for issue in &issues {
            let level = if issue.is_fatal() { "error" } else { "warning" };
            println!("{level}: {issue}");
        }
    }

    if fatal > 0 {
        anyhow::bail!("{fatal} fatal table issue(s)");
    }
    Ok(())
}

#[derive(Serialize)]
struct TenseEntry {
    tense: String,
    label: String,
    explanation: String,
}

#[derive(Serialize)]
struct AuditEntry {
    fatal: bool,
    message: String,
}

fn describe(form: &ConjugatedForm) -> String {
    if form.is_confident() {
        form.form.clone()
    } else {
        format!("{} (no rule available, showing the infinitive)", form.form)
    }
}

fn print_table(engine: &ConjugationEngine, table: &ConjugationTable) {
    for (person, form) in &table.forms {
        println!("{:<20} | {}", engine.person_label(person), describe(form));
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
