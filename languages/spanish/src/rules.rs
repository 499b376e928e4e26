use verbo_core::{MutationSite, OrthographicRule, StemChange};

/// Tenses whose stem mutates in the stressed persons
pub const STEM_CHANGE_TENSES: [&str; 2] = ["presente", "presente_subjuntivo"];

/// Persons whose stem vowel carries the stress
pub const STEM_CHANGE_PERSONS: [&str; 4] = ["yo", "tú", "él", "ellos"];

/// Tenses built on the whole infinitive
pub const INFINITIVE_STEM_TENSES: [&str; 2] = ["futuro", "condicional"];

/// Closed stem-changing verb sets. Each infinitive belongs to one set at most.
pub fn default_stem_changes() -> Vec<StemChange> {
    vec![
        StemChange::new(
            "e-ie",
            "e",
            "ie",
            MutationSite::Last,
            [
                "pensar",
                "querer",
                "sentir",
                "empezar",
                "comenzar",
                "cerrar",
                "despertar",
                "recomendar",
                "sentar",
                "entender",
                "perder",
            ],
        ),
        StemChange::new(
            "o-ue",
            "o",
            "ue",
            MutationSite::Last,
            [
                "poder",
                "volver",
                "dormir",
                "encontrar",
                "contar",
                "costar",
                "mostrar",
                "probar",
                "recordar",
                "mover",
                "doler",
            ],
        ),
        StemChange::new(
            "e-i",
            "e",
            "i",
            MutationSite::Last,
            ["pedir", "servir", "seguir", "conseguir", "repetir"],
        ),
        // jugar is the only u -> ue verb
        StemChange::new("u-ue", "u", "ue", MutationSite::First, ["jugar"]),
    ]
}

/// Spelling rules in evaluation order
pub fn default_orthographic_rules() -> Vec<OrthographicRule> {
    let preterite_yo = |rule: OrthographicRule| rule.in_tenses(&["pretérito"]).for_persons(&["yo"]);
    let present_yo = |rule: OrthographicRule| rule.in_tenses(&["presente"]).for_persons(&["yo"]);
    let subjunctive = |rule: OrthographicRule| rule.in_tenses(&["presente_subjuntivo"]);

    vec![
        preterite_yo(OrthographicRule::new("car-qu", "car", 1, "qu")),
        preterite_yo(OrthographicRule::new("gar-gu", "gar", 1, "gu")),
        preterite_yo(OrthographicRule::new("zar-c", "zar", 1, "c")),
        present_yo(OrthographicRule::new("cer-zc", "cer", 1, "zc").after("aeiou")),
        present_yo(OrthographicRule::new("cir-zc", "cir", 1, "zc").after("aeiou")),
        present_yo(OrthographicRule::new("guir-g", "guir", 1, "")),
        subjunctive(OrthographicRule::new("car-qu-subj", "car", 1, "qu")),
        subjunctive(OrthographicRule::new("gar-gu-subj", "gar", 1, "gu")),
        subjunctive(OrthographicRule::new("zar-c-subj", "zar", 1, "c")),
        subjunctive(OrthographicRule::new("cer-zc-subj", "cer", 1, "zc").after("aeiou")),
        subjunctive(OrthographicRule::new("cir-zc-subj", "cir", 1, "zc").after("aeiou")),
        subjunctive(OrthographicRule::new("guir-g-subj", "guir", 1, "")),
    ]
}
