use serde::{Deserialize, Serialize};

//
// ─── ANALYSIS / ASSESSMENT ─────────────────────────────────────────────────────
//

/// Textual breakdown of a graded answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub correct_parts: String,
    pub mistakes: String,
    pub guidance: String,
}

/// Numeric grade for a submitted answer, kept in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    correctness_percentage: u8,
}

impl Assessment {
    /// Creates an assessment, clamping out-of-range gateway values.
    #[must_use]
    pub fn new(correctness_percentage: i64) -> Self {
        Self {
            correctness_percentage: correctness_percentage.clamp(0, 100) as u8,
        }
    }

    #[must_use]
    pub fn correctness_percentage(&self) -> u8 {
        self.correctness_percentage
    }
}

//
// ─── FEEDBACK ──────────────────────────────────────────────────────────────────
//

/// Feedback for one submitted answer. Created once per submit, never mutated;
/// a re-submit produces a fresh value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub analysis: Analysis,
    pub assessment: Assessment,
}

impl Feedback {
    #[must_use]
    pub fn new(analysis: Analysis, assessment: Assessment) -> Self {
        Self {
            analysis,
            assessment,
        }
    }

    /// Grades a multiple choice pick locally, with the canned Hebrew analysis
    /// the app shows for choice questions.
    #[must_use]
    pub fn for_multiple_choice(selected: &str, answer_key: &str) -> Self {
        let percentage = grade_selected_option(selected, answer_key);
        let analysis = if percentage == 100 {
            Analysis {
                correct_parts: "כל הכבוד! בחרת את התשובה הנכונה.".to_string(),
                mistakes: String::new(),
                guidance: "המשך כך!".to_string(),
            }
        } else {
            Analysis {
                correct_parts: "התשובה שבחרת אינה נכונה.".to_string(),
                mistakes: format!("התשובה הנכונה היא {answer_key}"),
                guidance: "נסה לקרוא את השאלה שוב בעיון ולבחון את כל האפשרויות בקפידה."
                    .to_string(),
            }
        };
        Self {
            analysis,
            assessment: Assessment::new(i64::from(percentage)),
        }
    }
}

/// Exact-match grade for a multiple choice pick: 100 when the selected option
/// equals the answer key (modulo surrounding whitespace), otherwise 0. There
/// is no partial credit.
#[must_use]
pub fn grade_selected_option(selected: &str, answer_key: &str) -> u8 {
    if selected.trim() == answer_key.trim() {
        100
    } else {
        0
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grading_is_exact_string_equality() {
        assert_eq!(grade_selected_option("א. 5", "א. 5"), 100);
        assert_eq!(grade_selected_option("א. 5", "ב. 7"), 0);
        assert_eq!(grade_selected_option("  א. 5 ", "א. 5"), 100);
    }

    #[test]
    fn multiple_choice_feedback_is_all_or_nothing() {
        let correct = Feedback::for_multiple_choice("א. 5", "א. 5");
        assert_eq!(correct.assessment.correctness_percentage(), 100);
        assert!(correct.analysis.mistakes.is_empty());

        let wrong = Feedback::for_multiple_choice("ב. 7", "א. 5");
        assert_eq!(wrong.assessment.correctness_percentage(), 0);
        assert!(wrong.analysis.mistakes.contains("א. 5"));
    }

    #[test]
    fn assessment_clamps_out_of_range_values() {
        assert_eq!(Assessment::new(130).correctness_percentage(), 100);
        assert_eq!(Assessment::new(-5).correctness_percentage(), 0);
        assert_eq!(Assessment::new(80).correctness_percentage(), 80);
    }
}
