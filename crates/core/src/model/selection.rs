use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SelectionError {
    #[error("subject name cannot be empty")]
    EmptySubjectName,

    #[error("exam name cannot be empty")]
    EmptyExamName,
}

//
// ─── DISCIPLINE ────────────────────────────────────────────────────────────────
//

/// Broad discipline of a subject.
///
/// Drives which question types are generated for the subject: exact sciences
/// lean on worked step-by-step solutions, computer science on code tasks, and
/// everything else on a mix of multiple choice and essay questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Discipline {
    Mathematics,
    Physics,
    ComputerScience,
    CivilEngineering,
    General,
}

//
// ─── SUBJECT / EXAM ────────────────────────────────────────────────────────────
//

/// A study subject as it appears in the exam catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    name: String,
    discipline: Discipline,
}

impl Subject {
    /// Creates a subject with a display name and its discipline.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::EmptySubjectName` for a blank name.
    pub fn new(name: impl Into<String>, discipline: Discipline) -> Result<Self, SelectionError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SelectionError::EmptySubjectName);
        }
        Ok(Self { name, discipline })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn discipline(&self) -> Discipline {
        self.discipline
    }
}

/// A concrete exam within a subject (e.g. a matriculation paper).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exam {
    name: String,
}

impl Exam {
    /// Creates an exam with a display name.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::EmptyExamName` for a blank name.
    pub fn new(name: impl Into<String>) -> Result<Self, SelectionError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SelectionError::EmptyExamName);
        }
        Ok(Self { name })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

//
// ─── SELECTION ─────────────────────────────────────────────────────────────────
//

/// Subject name used for prompts when no subject has been chosen.
pub const DEFAULT_SUBJECT_NAME: &str = "general";

/// The student's current subject/exam/topic choice.
///
/// An exam is the trigger for question generation; subject and topics are
/// optional refinements. Changing the exam invalidates all session state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    subject: Option<Subject>,
    exam: Option<Exam>,
    topics: Vec<String>,
}

impl Selection {
    /// An empty selection: no subject, no exam, no topics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.subject = Some(subject);
        self
    }

    #[must_use]
    pub fn with_exam(mut self, exam: Exam) -> Self {
        self.exam = Some(exam);
        self
    }

    #[must_use]
    pub fn with_topics(mut self, topics: Vec<String>) -> Self {
        self.topics = topics;
        self
    }

    #[must_use]
    pub fn subject(&self) -> Option<&Subject> {
        self.subject.as_ref()
    }

    #[must_use]
    pub fn exam(&self) -> Option<&Exam> {
        self.exam.as_ref()
    }

    #[must_use]
    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    /// Returns true when an exam has been chosen and generation may start.
    #[must_use]
    pub fn has_exam(&self) -> bool {
        self.exam.is_some()
    }

    /// Display name of the chosen subject, or the generic fallback.
    #[must_use]
    pub fn subject_name(&self) -> &str {
        self.subject
            .as_ref()
            .map_or(DEFAULT_SUBJECT_NAME, Subject::name)
    }

    /// Discipline of the chosen subject, or `General` when none is chosen.
    #[must_use]
    pub fn discipline(&self) -> Discipline {
        self.subject
            .as_ref()
            .map_or(Discipline::General, Subject::discipline)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_names_are_rejected() {
        assert_eq!(
            Subject::new("  ", Discipline::Mathematics).unwrap_err(),
            SelectionError::EmptySubjectName
        );
        assert_eq!(Exam::new("").unwrap_err(), SelectionError::EmptyExamName);
    }

    #[test]
    fn empty_selection_falls_back_to_general() {
        let selection = Selection::new();
        assert!(!selection.has_exam());
        assert_eq!(selection.subject_name(), DEFAULT_SUBJECT_NAME);
        assert_eq!(selection.discipline(), Discipline::General);
    }

    #[test]
    fn selection_exposes_chosen_subject_and_exam() {
        let selection = Selection::new()
            .with_subject(Subject::new("פיזיקה", Discipline::Physics).unwrap())
            .with_exam(Exam::new("בגרות").unwrap())
            .with_topics(vec!["מכניקה".to_string()]);

        assert!(selection.has_exam());
        assert_eq!(selection.subject_name(), "פיזיקה");
        assert_eq!(selection.discipline(), Discipline::Physics);
        assert_eq!(selection.topics(), ["מכניקה".to_string()]);
    }
}
