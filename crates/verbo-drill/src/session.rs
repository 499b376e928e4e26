use std::fmt;

use rand::Rng;
use serde::Serialize;
use verbo_core::Conjugator;

use crate::error::DrillError;
use crate::generator::DrillGenerator;
use crate::question::DrillQuestion;

const WEAK_VERB_LIMIT: usize = 5;
const DEFAULT_CUSTOM_COUNT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DrillMode {
    Quick,
    Exam,
    Custom(usize),
}

impl DrillMode {
    /// `custom` without a count falls back to ten questions
    pub fn from_name(name: &str, count: Option<usize>) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "quick" => Some(DrillMode::Quick),
            "exam" => Some(DrillMode::Exam),
            "custom" => Some(DrillMode::Custom(count.unwrap_or(DEFAULT_CUSTOM_COUNT))),
            _ => None,
        }
    }

    pub fn question_count(&self) -> usize {
        match self {
            DrillMode::Quick => 5,
            DrillMode::Exam => 20,
            DrillMode::Custom(n) => *n,
        }
    }
}

impl fmt::Display for DrillMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrillMode::Quick => f.write_str("quick"),
            DrillMode::Exam => f.write_str("exam"),
            DrillMode::Custom(n) => write!(f, "custom ({n})"),
        }
    }
}

impl Default for DrillMode {
    fn default() -> Self {
        DrillMode::Custom(DEFAULT_CUSTOM_COUNT)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrillAnswer {
    pub question_index: usize,
    pub given: String,
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrillSummary {
    pub correct: usize,
    pub total: usize,
    /// Rounded to the nearest whole percent, 0 when nothing was answered
    pub percentage: u32,
    /// Distinct verbs answered wrongly, in the order they were missed
    pub weak_verbs: Vec<String>,
}

/// A run through a fixed list of questions, answered in order
#[derive(Debug, Clone)]
pub struct DrillSession {
    mode: DrillMode,
    questions: Vec<DrillQuestion>,
    answers: Vec<DrillAnswer>,
}

impl DrillSession {
    pub fn new(mode: DrillMode, questions: Vec<DrillQuestion>) -> Self {
        Self {
            mode,
            questions,
            answers: Vec::new(),
        }
    }

    pub fn start<C, R>(
        mode: DrillMode,
        generator: &mut DrillGenerator<'_, C, R>,
    ) -> Result<Self, DrillError>
    where
        C: Conjugator + ?Sized,
        R: Rng,
    {
        let questions = generator.generate_questions(mode.question_count())?;
        tracing::info!(
            "Started {} drill with {} questions over {:?}",
            mode,
            questions.len(),
            generator.settings().tenses
        );
        Ok(Self::new(mode, questions))
    }

    pub fn mode(&self) -> DrillMode {
        self.mode
    }

    pub fn current(&self) -> Option<&DrillQuestion> {
        self.questions.get(self.answers.len())
    }

    pub fn is_finished(&self) -> bool {
        self.answers.len() >= self.questions.len()
    }

    /// Score a free-text answer against the current question and advance
    pub fn submit(&mut self, answer: &str) -> Result<&DrillAnswer, DrillError> {
        let index = self.answers.len();
        let question = self.questions.get(index).ok_or(DrillError::Finished)?;
        let correct = question.is_correct(answer);
        tracing::debug!(
            "Question {} ({}): '{}' -> {}",
            index,
            question.verb,
            answer,
            correct
        );

        self.answers.push(DrillAnswer {
            question_index: index,
            given: answer.trim().to_string(),
            correct,
        });
        Ok(&self.answers[index])
    }

    /// Answer with the option at `index` of the current question
    pub fn submit_choice(&mut self, index: usize) -> Result<&DrillAnswer, DrillError> {
        let question = self.current().ok_or(DrillError::Finished)?;
        let choice = question
            .options
            .get(index)
            .cloned()
            .ok_or(DrillError::InvalidChoice { index })?;
        self.submit(&choice)
    }

    pub fn questions(&self) -> &[DrillQuestion] {
        &self.questions
    }

    pub fn answers(&self) -> &[DrillAnswer] {
        &self.answers
    }

    pub fn summary(&self) -> DrillSummary {
        let total = self.answers.len();
        let correct = self.answers.iter().filter(|a| a.correct).count();
        let percentage = if total == 0 {
            0
        } else {
            ((correct as f64 / total as f64) * 100.0).round() as u32
        };

        let mut weak_verbs: Vec<String> = Vec::new();
        for answer in self.answers.iter().filter(|a| !a.correct) {
            let verb = &self.questions[answer.question_index].verb;
            if !weak_verbs.contains(verb) {
                weak_verbs.push(verb.clone());
            }
        }
        weak_verbs.truncate(WEAK_VERB_LIMIT);

        DrillSummary {
            correct,
            total,
            percentage,
            weak_verbs,
        }
    }
}
