use crate::audit::{self, TableIssue};
use crate::error::{ConjugationError, GenerationError};
use crate::language::{
    ConjugatedForm, Conjugation, ConjugationTable, Conjugator, TenseInfo, Validation,
};
use crate::lexicon::{Lexicon, Verb};
use crate::overrides::OverrideTable;
use crate::preprocess::{drop_chars, normalize};
use crate::rules::RuleTables;

/// Table-driven conjugation engine.
///
/// Owns its lexicon, overrides and rule tables. Nothing is mutated after
/// construction, so one engine can serve concurrent readers and several
/// engines (e.g. with synthetic tables) can coexist.
#[derive(Debug, Clone)]
pub struct ConjugationEngine {
    lexicon: Lexicon,
    overrides: OverrideTable,
    rules: RuleTables,
}

impl ConjugationEngine {
    pub fn new(lexicon: Lexicon, overrides: OverrideTable, rules: RuleTables) -> Self {
        Self {
            lexicon,
            overrides,
            rules,
        }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn overrides(&self) -> &OverrideTable {
        &self.overrides
    }

    pub fn rules(&self) -> &RuleTables {
        &self.rules
    }

    pub fn tenses(&self) -> &[String] {
        &self.rules.tenses
    }

    pub fn persons(&self) -> &[String] {
        &self.rules.persons
    }

    pub fn verb(&self, infinitive: &str) -> Result<&Verb, ConjugationError> {
        self.lexicon
            .lookup(infinitive)
            .ok_or_else(|| ConjugationError::VerbNotFound(normalize(infinitive)))
    }

    /// One form when `person` is given, otherwise the whole paradigm
    pub fn conjugate(
        &self,
        infinitive: &str,
        tense: &str,
        person: Option<&str>,
    ) -> Result<Conjugation, ConjugationError> {
        match person {
            Some(person) => self
                .conjugate_form(infinitive, tense, person)
                .map(Conjugation::Single),
            None => self
                .conjugate_table(infinitive, tense)
                .map(Conjugation::Table),
        }
    }

    pub fn conjugate_form(
        &self,
        infinitive: &str,
        tense: &str,
        person: &str,
    ) -> Result<ConjugatedForm, ConjugationError> {
        let verb = self.verb(infinitive)?;
        Ok(self.resolve(
            &verb.infinitive,
            self.rules.tense_key(tense),
            self.rules.person_key(person),
        ))
    }

    pub fn conjugate_table(
        &self,
        infinitive: &str,
        tense: &str,
    ) -> Result<ConjugationTable, ConjugationError> {
        let verb = self.verb(infinitive)?;
        let tense = self.rules.tense_key(tense);
        let forms = self
            .rules
            .persons
            .iter()
            .map(|person| (person.clone(), self.resolve(&verb.infinitive, tense, person)))
            .collect();

        Ok(ConjugationTable {
            infinitive: verb.infinitive.clone(),
            tense: tense.to_string(),
            forms,
        })
    }

    /// Override first, then the generation pipeline, degrading to the infinitive on table gaps
    fn resolve(&self, infinitive: &str, tense: &str, person: &str) -> ConjugatedForm {
        if let Some(form) = self.overrides.get(infinitive, tense, person) {
            return ConjugatedForm::overridden(form);
        }

        match self.generate(infinitive, tense, person) {
            Ok(form) => ConjugatedForm::generated(form),
            Err(reason) => {
                tracing::warn!(
                    "Falling back to infinitive for {}:{}:{}: {}",
                    infinitive,
                    tense,
                    person,
                    reason
                );
                ConjugatedForm::fallback(infinitive, reason)
            }
        }
    }

    /// The rule pipeline alone, ignoring overrides. Pure in its arguments and the rule tables.
    /// Takes canonical tense and person keys.
    pub fn generate(
        &self,
        infinitive: &str,
        tense: &str,
        person: &str,
    ) -> Result<String, GenerationError> {
        let class = RuleTables::ending_class(infinitive).unwrap_or(infinitive);
        if !self.rules.has_class(class) {
            return Err(GenerationError::UnknownEndingClass(class.to_string()));
        }

        let suffix = self.rules.suffix(class, tense, person).ok_or_else(|| {
            GenerationError::UnknownTenseOrPerson {
                class: class.to_string(),
                tense: tense.to_string(),
                person: person.to_string(),
            }
        })?;

        // Future and conditional attach to the untouched infinitive
        if self.rules.uses_infinitive_stem(tense) {
            return Ok(format!("{infinitive}{suffix}"));
        }

        let mut stem = drop_chars(infinitive, 2).to_string();

        if self.rules.mutates(tense, person) {
            if let Some(change) = self.rules.stem_change_for(infinitive) {
                stem = change.apply(&stem);
            }
        }

        if let Some(rule) = self
            .rules
            .orthographic_rule_for(infinitive, &stem, tense, person)
        {
            stem = rule.apply(&stem);
        }

        Ok(stem + suffix)
    }

    /// Check a learner's answer against `conjugate`; case, whitespace and
    /// Unicode composition are ignored.
    pub fn validate(
        &self,
        infinitive: &str,
        tense: &str,
        person: &str,
        answer: &str,
    ) -> Result<Validation, ConjugationError> {
        let expected = self.conjugate_form(infinitive, tense, person)?.form;
        Ok(Validation {
            is_correct: normalize(answer) == normalize(&expected),
            expected,
            provided: answer.to_string(),
        })
    }

    pub fn tense_info(&self, tense: &str) -> TenseInfo {
        TenseInfo {
            label: self.rules.tense_label(tense).to_string(),
            explanation: self.rules.tense_explanation(tense).to_string(),
        }
    }

    pub fn person_label<'a>(&'a self, person: &'a str) -> &'a str {
        self.rules.person_label(person)
    }

    /// Plain-text paradigm for display
    pub fn export_table(&self, infinitive: &str, tense: &str) -> Result<String, ConjugationError> {
        let verb = self.verb(infinitive)?;
        let table = self.conjugate_table(infinitive, tense)?;

        let mut out = format!(
            "{} ({}) - {}\n",
            verb.infinitive,
            verb.english,
            self.rules.tense_label(tense)
        );
        out.push_str(&"-".repeat(50));
        out.push('\n');
        for (person, form) in &table.forms {
            out.push_str(&format!(
                "{:<20} | {}\n",
                self.rules.person_label(person),
                form.form
            ));
        }
        Ok(out)
    }

    /// Load-time consistency pass over the three tables
    pub fn check_tables(&self) -> Vec<TableIssue> {
        audit::check_tables(&self.lexicon, &self.overrides, &self.rules)
    }
}

impl Conjugator for ConjugationEngine {
    fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    fn persons(&self) -> &[String] {
        &self.rules.persons
    }

    fn conjugate_form(
        &self,
        infinitive: &str,
        tense: &str,
        person: &str,
    ) -> Result<ConjugatedForm, ConjugationError> {
        ConjugationEngine::conjugate_form(self, infinitive, tense, person)
    }

    fn tense_info(&self, tense: &str) -> TenseInfo {
        ConjugationEngine::tense_info(self, tense)
    }

    fn person_label(&self, person: &str) -> String {
        self.rules.person_label(person).to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::language::FormSource;
    use crate::lexicon::VerbGroup;
    use crate::rules::{MutationSite, OrthographicRule, StemChange};

    const PERSONS: [&str; 6] = ["yo", "tú", "él", "nosotros", "vosotros", "ellos"];

    fn verb(infinitive: &str, group: VerbGroup) -> Verb {
        Verb {
            infinitive: infinitive.to_string(),
            english: format!("to {infinitive}"),
            group,
            irregular: false,
            tags: BTreeSet::new(),
        }
    }

    fn endings(rules: &mut RuleTables, class: &str, tense: &str, suffixes: [&str; 6]) {
        let table = rules
            .regular_endings
            .entry(class.to_string())
            .or_default()
            .entry(tense.to_string())
            .or_default();
        for (person, suffix) in PERSONS.iter().zip(suffixes) {
            table.insert(person.to_string(), suffix.to_string());
        }
    }

    fn rules() -> RuleTables {
        let mut rules = RuleTables {
            persons: PERSONS.iter().map(|p| p.to_string()).collect(),
            tenses: ["presente", "pretérito", "futuro"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
            stem_change_persons: ["yo", "tú", "él", "ellos"]
                .iter()
                .map(|p| p.to_string())
                .collect(),
            stem_change_tenses: vec!["presente".to_string()],
            infinitive_stem_tenses: vec!["futuro".to_string()],
            stem_changes: vec![StemChange::new(
                "e-ie",
                "e",
                "ie",
                MutationSite::Last,
                ["pensar"],
            )],
            orthographic_rules: vec![
                OrthographicRule::new("c-qu", "car", 1, "qu")
                    .in_tenses(&["pretérito"])
                    .for_persons(&["yo"]),
            ],
            ..Default::default()
        };
        endings(&mut rules, "ar", "presente", ["o", "as", "a", "amos", "áis", "an"]);
        endings(&mut rules, "ar", "pretérito", ["é", "aste", "ó", "amos", "asteis", "aron"]);
        endings(&mut rules, "ar", "futuro", ["é", "ás", "á", "emos", "éis", "án"]);
        rules
            .tense_labels
            .insert("presente".to_string(), "Present".to_string());
        rules
            .person_labels
            .insert("yo".to_string(), "I".to_string());
        rules
    }

    fn engine() -> ConjugationEngine {
        let lexicon = Lexicon::from_verbs([
            verb("hablar", VerbGroup::Ar),
            verb("pensar", VerbGroup::Ar),
            verb("buscar", VerbGroup::Ar),
            verb("dar", VerbGroup::Ar),
            verb("comer", VerbGroup::Er),
        ]);
        let mut overrides = OverrideTable::new();
        overrides.insert("dar", "presente", "yo", "doy");
        overrides.insert("hablar", "futuro", "yo", "hablaré!");
        ConjugationEngine::new(lexicon, overrides, rules())
    }

    fn form(engine: &ConjugationEngine, inf: &str, tense: &str, person: &str) -> String {
        engine.conjugate_form(inf, tense, person).unwrap().form
    }

    #[test]
    fn regular_present() {
        let e = engine();
        assert_eq!(form(&e, "hablar", "presente", "yo"), "hablo");
        assert_eq!(form(&e, "hablar", "presente", "nosotros"), "hablamos");
    }

    #[test]
    fn stem_change_only_in_stressed_persons() {
        let e = engine();
        assert_eq!(form(&e, "pensar", "presente", "tú"), "piensas");
        assert_eq!(form(&e, "pensar", "presente", "ellos"), "piensan");
        assert_eq!(form(&e, "pensar", "presente", "nosotros"), "pensamos");
        assert_eq!(form(&e, "pensar", "presente", "vosotros"), "pensáis");
        assert_eq!(form(&e, "pensar", "pretérito", "yo"), "pensé");
    }

    #[test]
    fn orthographic_adjustment() {
        let e = engine();
        assert_eq!(form(&e, "buscar", "pretérito", "yo"), "busqué");
        assert_eq!(form(&e, "buscar", "pretérito", "tú"), "buscaste");
    }

    #[test]
    fn future_uses_the_whole_infinitive() {
        let e = engine();
        assert_eq!(form(&e, "pensar", "futuro", "yo"), "pensaré");
        assert_eq!(form(&e, "buscar", "futuro", "él"), "buscará");
    }

    #[test]
    fn overrides_beat_generation() {
        let e = engine();
        let dar = e.conjugate_form("dar", "presente", "yo").unwrap();
        assert_eq!(dar.form, "doy");
        assert_eq!(dar.source, FormSource::Override);
        // even where the rule would have produced a valid form
        assert_eq!(form(&e, "hablar", "futuro", "yo"), "hablaré!");
        assert_eq!(form(&e, "dar", "presente", "tú"), "das");
    }

    #[test]
    fn unknown_verb_is_an_error() {
        let e = engine();
        assert_eq!(
            e.conjugate_form("nadar", "presente", "yo"),
            Err(ConjugationError::VerbNotFound("nadar".to_string()))
        );
        assert!(e.validate("nadar", "presente", "yo", "nado").is_err());
    }

    #[test]
    fn table_gaps_degrade_to_the_infinitive() {
        let e = engine();
        let comer = e.conjugate_form("comer", "presente", "yo").unwrap();
        assert_eq!(comer.form, "comer");
        assert_eq!(
            comer.source,
            FormSource::Fallback(GenerationError::UnknownEndingClass("er".to_string()))
        );
        assert_eq!(comer.confidence(), 0.0);

        let missing = e.conjugate_form("hablar", "imperfecto", "yo").unwrap();
        assert_eq!(missing.form, "hablar");
        assert!(!missing.is_confident());
        assert!(matches!(
            missing.source,
            FormSource::Fallback(GenerationError::UnknownTenseOrPerson { .. })
        ));
    }

    #[test]
    fn conjugate_without_person_returns_every_person() {
        let e = engine();
        let Conjugation::Table(table) = e.conjugate("pensar", "presente", None).unwrap() else {
            panic!("expected a table");
        };
        assert_eq!(table.forms.len(), 6);
        assert_eq!(table.forms[0].0, "yo");
        assert_eq!(table.get("yo").unwrap().form, "pienso");
        assert_eq!(table.get("nosotros").unwrap().form, "pensamos");
        assert!(table.is_confident());

        let single = e.conjugate("pensar", "presente", Some("yo")).unwrap();
        assert_eq!(single, Conjugation::Single(ConjugatedForm::generated("pienso")));
    }

    #[test]
    fn generation_is_repeatable() {
        let e = engine();
        let first = e.conjugate_table("buscar", "pretérito").unwrap();
        for _ in 0..5 {
            assert_eq!(e.conjugate_table("buscar", "pretérito").unwrap(), first);
        }
    }

    #[test]
    fn validate_normalizes_the_answer() {
        let e = engine();
        let result = e.validate("Buscar", "pretérito", "yo", "  BUSQUÉ ").unwrap();
        assert!(result.is_correct);
        assert_eq!(result.expected, "busqué");
        assert_eq!(result.provided, "  BUSQUÉ ");

        let decomposed = e.validate("buscar", "pretérito", "yo", "busque\u{301}").unwrap();
        assert!(decomposed.is_correct);

        let wrong = e.validate("buscar", "pretérito", "yo", "busqué s").unwrap();
        assert!(!wrong.is_correct);
    }

    #[test]
    fn tense_and_person_keys_are_normalized() {
        let e = engine();
        let tu = e.conjugate_form("pensar", "Presente", "tu").unwrap();
        assert_eq!(tu.form, "piensas");
        assert!(tu.is_confident());
        assert_eq!(form(&e, "buscar", "PRETERITO", " Yo "), "busqué");
        assert_eq!(form(&e, "dar", "presente", "YO"), "doy");
        assert_eq!(form(&e, "hablar", "Futuro", "el"), "hablará");

        let table = e.conjugate_table("pensar", "Presente").unwrap();
        assert_eq!(table.tense, "presente");
        assert!(table.is_confident());
        assert_eq!(e.tense_info("PRESENTE").label, "Present");
        assert_eq!(e.person_label("Yo"), "I");
    }

    #[test]
    fn metadata_passthrough() {
        let e = engine();
        assert_eq!(e.tense_info("presente").label, "Present");
        assert_eq!(e.tense_info("futuro").label, "futuro");
        assert_eq!(e.person_label("yo"), "I");
        assert_eq!(e.person_label("tú"), "tú");
    }

    #[test]
    fn export_table_layout() {
        let e = engine();
        let text = e.export_table("hablar", "presente").unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "hablar (to hablar) - Present");
        assert_eq!(lines[1], "-".repeat(50));
        assert_eq!(lines[2], format!("{:<20} | hablo", "I"));
        assert_eq!(lines.len(), 8);
    }

    #[test]
    fn engines_are_independent() {
        let a = engine();
        let mut other_rules = rules();
        other_rules.stem_changes.clear();
        let b = ConjugationEngine::new(a.lexicon().clone(), OverrideTable::new(), other_rules);
        assert_eq!(form(&a, "pensar", "presente", "yo"), "pienso");
        assert_eq!(form(&b, "pensar", "presente", "yo"), "penso");
    }
}
