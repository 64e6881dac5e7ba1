use rand::Rng;
use rand::seq::IndexedRandom;

use exam_core::model::{Discipline, QuestionType, Selection};

use crate::error::SessionError;
use crate::gateway::QuestionRequest;

/// Topic sent to the gateway when no topics are selected, so the prompt
/// template is always well-formed.
pub const FALLBACK_TOPIC: &str = "general topic";

/// Picks the question type for the next round.
///
/// Exact sciences always get worked solutions and computer science gets code
/// tasks; the rest flip a coin between multiple choice and essay.
pub(crate) fn pick_question_type(discipline: Discipline, rng: &mut impl Rng) -> QuestionType {
    match discipline {
        Discipline::Mathematics | Discipline::Physics => QuestionType::StepByStepSolution,
        Discipline::ComputerScience => QuestionType::CodeImplementation,
        Discipline::CivilEngineering | Discipline::General => {
            if rng.random_bool(0.5) {
                QuestionType::MultipleChoice
            } else {
                QuestionType::Essay
            }
        }
    }
}

/// Picks a topic uniformly from the selected topics, or the fallback when
/// none are selected.
pub(crate) fn pick_topic(topics: &[String], rng: &mut impl Rng) -> String {
    topics
        .choose(rng)
        .cloned()
        .unwrap_or_else(|| FALLBACK_TOPIC.to_string())
}

/// Resolves the selection into a concrete generation request.
///
/// # Errors
///
/// Returns `SessionError::NoExamSelected` when no exam has been chosen.
pub(crate) fn build_question_request(
    selection: &Selection,
    rng: &mut impl Rng,
) -> Result<QuestionRequest, SessionError> {
    let exam = selection.exam().ok_or(SessionError::NoExamSelected)?;
    Ok(QuestionRequest {
        subject_name: selection.subject_name().to_string(),
        exam_name: exam.name().to_string(),
        topic_name: pick_topic(selection.topics(), rng),
        question_type: pick_question_type(selection.discipline(), rng),
    })
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use exam_core::model::{Exam, Subject};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn exact_sciences_get_step_by_step_questions() {
        let mut rng = rng();
        for _ in 0..16 {
            assert_eq!(
                pick_question_type(Discipline::Mathematics, &mut rng),
                QuestionType::StepByStepSolution
            );
            assert_eq!(
                pick_question_type(Discipline::Physics, &mut rng),
                QuestionType::StepByStepSolution
            );
        }
    }

    #[test]
    fn computer_science_gets_code_questions() {
        let mut rng = rng();
        assert_eq!(
            pick_question_type(Discipline::ComputerScience, &mut rng),
            QuestionType::CodeImplementation
        );
    }

    #[test]
    fn other_disciplines_mix_choice_and_essay() {
        let mut rng = rng();
        let mut seen_choice = false;
        let mut seen_essay = false;
        for _ in 0..64 {
            match pick_question_type(Discipline::CivilEngineering, &mut rng) {
                QuestionType::MultipleChoice => seen_choice = true,
                QuestionType::Essay => seen_essay = true,
                other => panic!("unexpected question type {other:?}"),
            }
        }
        assert!(seen_choice && seen_essay);
    }

    #[test]
    fn empty_topic_set_uses_the_fallback() {
        let mut rng = rng();
        assert_eq!(pick_topic(&[], &mut rng), FALLBACK_TOPIC);
    }

    #[test]
    fn topics_are_picked_from_the_selection() {
        let topics = vec!["גאומטריה".to_string(), "אלגברה".to_string()];
        let mut rng = rng();
        for _ in 0..16 {
            let topic = pick_topic(&topics, &mut rng);
            assert!(topics.contains(&topic));
        }
    }

    #[test]
    fn request_requires_an_exam() {
        let err = build_question_request(&Selection::new(), &mut rng()).unwrap_err();
        assert!(matches!(err, SessionError::NoExamSelected));
    }

    #[test]
    fn request_carries_the_resolved_selection() {
        let selection = Selection::new()
            .with_subject(Subject::new("מדעי המחשב", Discipline::ComputerScience).unwrap())
            .with_exam(Exam::new("מבחן סוף סמסטר").unwrap());
        let request = build_question_request(&selection, &mut rng()).unwrap();

        assert_eq!(request.subject_name, "מדעי המחשב");
        assert_eq!(request.exam_name, "מבחן סוף סמסטר");
        assert_eq!(request.topic_name, FALLBACK_TOPIC);
        assert_eq!(request.question_type, QuestionType::CodeImplementation);
    }
}
