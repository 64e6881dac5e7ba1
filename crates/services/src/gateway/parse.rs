//! Strict decoding of gateway JSON payloads into validated domain types.

use serde::Deserialize;

use exam_core::model::{
    Analysis, Assessment, Feedback, Question, QuestionType, Solution, SolutionStep,
};

use crate::error::{FeedbackError, GenerationError};

//
// ─── QUESTION PAYLOAD ──────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
struct QuestionPayload {
    question: QuestionBody,
    solution: SolutionBody,
}

#[derive(Debug, Deserialize)]
struct QuestionBody {
    #[serde(rename = "type")]
    kind: String,
    text: String,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    code_template: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SolutionBody {
    explanation: String,
    #[serde(default)]
    steps: Vec<StepBody>,
    #[serde(default)]
    final_answer: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StepBody {
    explanation: String,
}

fn question_type_from_wire(kind: &str) -> Option<QuestionType> {
    match kind {
        "multiple_choice" => Some(QuestionType::MultipleChoice),
        "essay" => Some(QuestionType::Essay),
        "step_by_step_solution" => Some(QuestionType::StepByStepSolution),
        "code_implementation" => Some(QuestionType::CodeImplementation),
        _ => None,
    }
}

/// Decodes a raw question payload, rejecting anything that is not valid JSON
/// or does not satisfy the per-type shape rules.
pub(crate) fn parse_question_payload(raw: &str) -> Result<Question, GenerationError> {
    let payload: QuestionPayload = serde_json::from_str(raw)?;

    let kind = question_type_from_wire(&payload.question.kind)
        .ok_or_else(|| GenerationError::UnknownQuestionType(payload.question.kind.clone()))?;

    let steps = payload
        .solution
        .steps
        .into_iter()
        .map(|step| SolutionStep {
            explanation: step.explanation,
        })
        .collect();
    let solution = Solution::new(payload.solution.explanation, steps, payload.solution.final_answer)?;

    let question = Question::new(
        kind,
        payload.question.text,
        payload.question.options,
        payload.question.code_template,
        solution,
    )?;
    Ok(question)
}

//
// ─── FEEDBACK PAYLOAD ──────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
struct FeedbackPayload {
    #[serde(default)]
    analysis: AnalysisBody,
    assessment: AssessmentBody,
}

#[derive(Debug, Default, Deserialize)]
struct AnalysisBody {
    #[serde(default)]
    correct_parts: String,
    #[serde(default)]
    mistakes: String,
    #[serde(default)]
    guidance: String,
}

#[derive(Debug, Deserialize)]
struct AssessmentBody {
    correctness_percentage: i64,
}

/// Decodes a raw feedback payload. Missing analysis strings degrade to empty
/// text; an out-of-range percentage is clamped rather than rejected.
pub(crate) fn parse_feedback_payload(raw: &str) -> Result<Feedback, FeedbackError> {
    let payload: FeedbackPayload = serde_json::from_str(raw)?;
    Ok(Feedback::new(
        Analysis {
            correct_parts: payload.analysis.correct_parts,
            mistakes: payload.analysis.mistakes,
            guidance: payload.analysis.guidance,
        },
        Assessment::new(payload.assessment.correctness_percentage),
    ))
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use exam_core::model::QuestionError;

    #[test]
    fn parses_a_multiple_choice_question() {
        let raw = r#"{
            "question": {
                "type": "multiple_choice",
                "text": "כמה זה 2+3?",
                "options": ["א. 5", "ב. 7", "ג. 6", "ד. 4"]
            },
            "solution": {
                "explanation": "חיבור פשוט",
                "final_answer": "א. 5"
            }
        }"#;
        let question = parse_question_payload(raw).unwrap();
        assert_eq!(question.kind(), QuestionType::MultipleChoice);
        assert_eq!(question.options().len(), 4);
        assert_eq!(question.answer_key(), Some("א. 5"));
    }

    #[test]
    fn parses_a_step_by_step_question() {
        let raw = r#"{
            "question": {"type": "step_by_step_solution", "text": "פתור את המשוואה"},
            "solution": {
                "explanation": "פתרון מלא",
                "steps": [{"explanation": "העבר אגפים"}, {"explanation": "חלק במקדם"}],
                "final_answer": "x = 3"
            }
        }"#;
        let question = parse_question_payload(raw).unwrap();
        assert_eq!(question.kind(), QuestionType::StepByStepSolution);
        assert_eq!(question.solution().steps().len(), 2);
        assert_eq!(question.solution().final_answer(), Some("x = 3"));
    }

    #[test]
    fn non_json_payload_is_malformed() {
        let err = parse_question_payload("not json at all").unwrap_err();
        assert!(matches!(err, GenerationError::Json(_)));
    }

    #[test]
    fn missing_required_field_is_malformed() {
        let raw = r#"{"question": {"type": "essay"}, "solution": {"explanation": "x"}}"#;
        let err = parse_question_payload(raw).unwrap_err();
        assert!(matches!(err, GenerationError::Json(_)));
    }

    #[test]
    fn unknown_question_type_is_rejected() {
        let raw = r#"{
            "question": {"type": "oral_exam", "text": "שאלה"},
            "solution": {"explanation": "הסבר"}
        }"#;
        let err = parse_question_payload(raw).unwrap_err();
        assert!(matches!(err, GenerationError::UnknownQuestionType(kind) if kind == "oral_exam"));
    }

    #[test]
    fn choice_question_without_answer_key_is_rejected() {
        let raw = r#"{
            "question": {"type": "multiple_choice", "text": "שאלה", "options": ["א", "ב"]},
            "solution": {"explanation": "הסבר"}
        }"#;
        let err = parse_question_payload(raw).unwrap_err();
        assert!(matches!(
            err,
            GenerationError::Schema(QuestionError::MissingAnswerKey)
        ));
    }

    #[test]
    fn parses_feedback_and_clamps_the_percentage() {
        let raw = r#"{
            "analysis": {"correct_parts": "יפה", "mistakes": "", "guidance": "המשך"},
            "assessment": {"correctness_percentage": 150}
        }"#;
        let feedback = parse_feedback_payload(raw).unwrap();
        assert_eq!(feedback.assessment.correctness_percentage(), 100);
        assert_eq!(feedback.analysis.correct_parts, "יפה");
    }

    #[test]
    fn feedback_without_assessment_is_malformed() {
        let raw = r#"{"analysis": {"correct_parts": "יפה"}}"#;
        let err = parse_feedback_payload(raw).unwrap_err();
        assert!(matches!(err, FeedbackError::Json(_)));
    }

    #[test]
    fn feedback_analysis_fields_default_to_empty() {
        let raw = r#"{"assessment": {"correctness_percentage": 40}}"#;
        let feedback = parse_feedback_payload(raw).unwrap();
        assert_eq!(feedback.assessment.correctness_percentage(), 40);
        assert!(feedback.analysis.guidance.is_empty());
    }
}
