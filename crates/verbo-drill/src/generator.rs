use rand::Rng;
use rand::seq::SliceRandom;
use uuid::Uuid;
use verbo_config::drill::DrillConfig;
use verbo_core::{ConjugatedForm, Conjugator, Verb, VerbFilter};

use crate::error::DrillError;
use crate::question::DrillQuestion;

/// Options per question, correct form included
pub const OPTION_COUNT: usize = 4;

#[derive(Debug, Clone)]
pub struct DrillSettings {
    pub tenses: Vec<String>,
    pub filter: VerbFilter,
    pub max_distractor_attempts: usize,
}

impl Default for DrillSettings {
    fn default() -> Self {
        DrillSettings::from(&DrillConfig::default())
    }
}

impl From<&DrillConfig> for DrillSettings {
    fn from(config: &DrillConfig) -> Self {
        Self {
            tenses: config.tenses.clone(),
            filter: VerbFilter::new().tags(&config.tags),
            max_distractor_attempts: config.max_distractor_attempts,
        }
    }
}

/// Builds multiple-choice questions on top of a [`Conjugator`].
///
/// All randomness comes from the injected `rng`, so a seeded generator
/// produces the same drill every time.
pub struct DrillGenerator<'a, C: ?Sized, R> {
    conjugator: &'a C,
    settings: DrillSettings,
    rng: R,
}

impl<'a, C, R> DrillGenerator<'a, C, R>
where
    C: Conjugator + ?Sized,
    R: Rng,
{
    pub fn new(conjugator: &'a C, settings: DrillSettings, rng: R) -> Self {
        Self {
            conjugator,
            settings,
            rng,
        }
    }

    pub fn settings(&self) -> &DrillSettings {
        &self.settings
    }

    /// Exactly `count` questions. Verbs are reused cyclically when fewer
    /// than `count` match the filter.
    pub fn generate_questions(&mut self, count: usize) -> Result<Vec<DrillQuestion>, DrillError> {
        if count == 0 {
            return Ok(Vec::new());
        }
        if self.settings.tenses.is_empty() {
            return Err(DrillError::NoTenses);
        }

        let conjugator = self.conjugator;
        if conjugator.persons().is_empty() {
            return Err(DrillError::NoPersons);
        }

        let pool = conjugator
            .lexicon()
            .sample_random(count, &self.settings.filter, &mut self.rng);
        if pool.is_empty() {
            return Err(DrillError::EmptyPool);
        }
        tracing::debug!("Drill pool: {} verbs for {} questions", pool.len(), count);

        (0..count).map(|i| self.question_for(&pool, i)).collect()
    }

    fn question_for(&mut self, pool: &[&Verb], index: usize) -> Result<DrillQuestion, DrillError> {
        let conjugator = self.conjugator;
        let persons = conjugator.persons();
        let start = index % pool.len();
        let tense = pick(&mut self.rng, &self.settings.tenses);
        let person = pick(&mut self.rng, persons);

        if let Some(question) = self.build(pool[start], &tense, &person)? {
            return Ok(question);
        }

        // The drawn paradigm is too small: try the verb's other tenses, then the next verbs
        for offset in 0..pool.len() {
            let verb = pool[(start + offset) % pool.len()];
            if let Some(question) = self.retry_verb(verb, index)? {
                return Ok(question);
            }
        }

        // Then every other eligible verb outside the sampled pool
        let mut rest: Vec<&Verb> = conjugator
            .lexicon()
            .filter(&self.settings.filter)
            .into_iter()
            .filter(|verb| !pool.iter().any(|p| p.infinitive == verb.infinitive))
            .collect();
        rest.shuffle(&mut self.rng);
        for verb in rest {
            if let Some(question) = self.retry_verb(verb, index)? {
                return Ok(question);
            }
        }

        Err(DrillError::NotEnoughForms {
            needed: OPTION_COUNT,
        })
    }

    fn retry_verb(
        &mut self,
        verb: &Verb,
        index: usize,
    ) -> Result<Option<DrillQuestion>, DrillError> {
        let conjugator = self.conjugator;
        let persons = conjugator.persons();
        let mut tenses = self.settings.tenses.clone();
        tenses.shuffle(&mut self.rng);

        for tense in &tenses {
            let person = pick(&mut self.rng, persons);
            tracing::debug!(
                "Retrying drill item {} with {} / {} / {}",
                index,
                verb.infinitive,
                tense,
                person
            );
            if let Some(question) = self.build(verb, tense, &person)? {
                return Ok(Some(question));
            }
        }
        Ok(None)
    }

    /// `None` when the correct form is degraded or the paradigm lacks enough distinct forms
    fn build(
        &mut self,
        verb: &Verb,
        tense: &str,
        person: &str,
    ) -> Result<Option<DrillQuestion>, DrillError> {
        let conjugator = self.conjugator;
        let correct = conjugator.conjugate_form(&verb.infinitive, tense, person)?;
        if !correct.is_confident() {
            tracing::debug!(
                "Skipping low-confidence form {}:{}:{}",
                verb.infinitive,
                tense,
                person
            );
            return Ok(None);
        }

        let persons = conjugator.persons();
        let mut options = vec![correct.form.clone()];

        let mut attempts = 0;
        while options.len() < OPTION_COUNT && attempts < self.settings.max_distractor_attempts {
            attempts += 1;
            let candidate = &persons[self.rng.gen_range(0..persons.len())];
            offer(
                &mut options,
                conjugator.conjugate_form(&verb.infinitive, tense, candidate)?,
            );
        }

        // Bounded sweep so small paradigms terminate
        if options.len() < OPTION_COUNT {
            let mut rest: Vec<&String> = persons.iter().collect();
            rest.shuffle(&mut self.rng);
            for candidate in rest {
                if options.len() == OPTION_COUNT {
                    break;
                }
                offer(
                    &mut options,
                    conjugator.conjugate_form(&verb.infinitive, tense, candidate)?,
                );
            }
        }

        if options.len() < OPTION_COUNT {
            tracing::debug!(
                "{} / {} has only {} distinct forms",
                verb.infinitive,
                tense,
                options.len()
            );
            return Ok(None);
        }

        options.shuffle(&mut self.rng);

        let prompt = format!(
            "What is the {} form of \"{}\" ({}) for {}?",
            conjugator.tense_info(tense).label,
            verb.infinitive,
            verb.english,
            conjugator.person_label(person)
        );

        Ok(Some(DrillQuestion {
            id: self.next_id(),
            verb: verb.infinitive.clone(),
            verb_english: verb.english.clone(),
            tense: tense.to_string(),
            person: person.to_string(),
            prompt,
            correct_form: correct.form,
            options,
        }))
    }

    fn next_id(&mut self) -> Uuid {
        uuid::Builder::from_random_bytes(self.rng.r#gen()).into_uuid()
    }
}

fn pick<R: Rng>(rng: &mut R, items: &[String]) -> String {
    items[rng.gen_range(0..items.len())].clone()
}

fn offer(options: &mut Vec<String>, candidate: ConjugatedForm) {
    if candidate.is_confident() && !options.contains(&candidate.form) {
        options.push(candidate.form);
    }
}
