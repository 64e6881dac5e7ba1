//! Prompt templates for the chat gateway.
//!
//! Questions and feedback are produced in Hebrew; the system prompts carry
//! the LaTeX-escaping rules the model has to follow for the JSON payloads to
//! survive parsing.

use exam_core::model::QuestionType;

use super::{FeedbackRequest, QuestionRequest};

pub(crate) fn question_system_prompt(request: &QuestionRequest) -> String {
    format!(
        r#"You are a professional {subject} teacher with extensive experience preparing students for {exam} exams and creating exam questions.

CRITICAL: All LaTeX expressions MUST be double-escaped in JSON:
CORRECT: "נתון משולש שבו \\( \\alpha = 30^\\circ \\)"
WRONG: "נתון משולש שבו \( \alpha = 30^\circ \)"

Rules for JSON response:
1. Use \\( and \\) for ALL math expressions
2. Use \\alpha, \\beta, \\gamma (not A, B, C)
3. Use \\mathrm{{}} for units
4. Use \\, for spacing
5. Use \\text{{}} for text in math
6. ALL backslashes must be doubled for JSON"#,
        subject = request.subject_name,
        exam = request.exam_name,
    )
}

pub(crate) fn question_prompt(request: &QuestionRequest) -> String {
    let question_type = request.question_type.as_str();

    let mut question_fields = String::from("\"text\": \"שאלה בעברית\"");
    if request.question_type == QuestionType::MultipleChoice {
        question_fields
            .push_str(",\n    \"options\": [\"א. תשובה\", \"ב. תשובה\", \"ג. תשובה\", \"ד. תשובה\"]");
    }
    if request.question_type == QuestionType::CodeImplementation {
        question_fields.push_str(",\n    \"code_template\": \"// קוד התחלתי כאן\"");
    }

    let mut solution_fields = String::from("\"explanation\": \"הסבר מלא של הפתרון\"");
    if request.question_type == QuestionType::StepByStepSolution {
        solution_fields.push_str(
            ",\n    \"steps\": [\n      {\n        \"explanation\": \"הסבר של השלב\"\n      }\n    ]",
        );
    }
    if matches!(
        request.question_type,
        QuestionType::StepByStepSolution | QuestionType::MultipleChoice
    ) {
        solution_fields.push_str(",\n    \"final_answer\": \"התשובה הסופית\"");
    }

    format!(
        r#"Create a {subject}, {exam} exam question in Hebrew about {topic}.

Question requirements:
- Question type: "{question_type}"
- Question should be clear and focused on testing understanding
- Use proper Hebrew terminology for the subject

Return a JSON object with this structure (no additional text, only valid JSON):
{{
  "question": {{
    "type": "{question_type}",
    {question_fields}
  }},
  "solution": {{
    {solution_fields}
  }}
}}"#,
        subject = request.subject_name,
        exam = request.exam_name,
        topic = request.topic_name,
    )
}

pub(crate) fn feedback_system_prompt(request: &FeedbackRequest) -> String {
    format!(
        r#"You are a professional {subject} teacher providing feedback in Hebrew.

CRITICAL: Format ALL mathematical expressions with doubled backslashes:
CORRECT: "נתון משולש שבו \\( \\alpha = 30^\\circ \\)"
WRONG: "נתון משולש שבו \( \alpha = 30^\circ \)"

Rules for math expressions:
1. Use \\( and \\) for ALL math
2. Use \\alpha, \\beta, \\gamma (not A, B, C)
3. Use \\mathrm{{}} for units
4. Use \\, for spacing
5. NO line breaks

Your response MUST be a valid JSON object with properly escaped strings."#,
        subject = request.subject_name,
    )
}

pub(crate) fn feedback_prompt(request: &FeedbackRequest) -> String {
    let mut solution = request.solution_explanation.clone();
    if !request.solution_steps.is_empty() {
        solution.push_str("\nSolution steps:\n");
        for (index, step) in request.solution_steps.iter().enumerate() {
            solution.push_str(&format!("{}. {step}\n", index + 1));
        }
    }
    if let Some(final_answer) = &request.final_answer {
        solution.push_str(&format!("Final answer: {final_answer}"));
    }

    format!(
        r#"As a {subject} teacher preparing students for {exam} exams, provide personal and encouraging feedback to the student.

Question: {question}
Student's answer: {answer}
Correct solution:
{solution}

Provide feedback in this exact JSON structure:
{{
  "analysis": {{
    "correct_parts": "פנה לתלמיד ישירות. ציין את כל החלקים הנכונים בתשובתו, כולל שימוש נכון בנוסחאות, צעדים נכונים, חישובים נכונים ומסקנות נכונות. השתמש בדוגמאות ספציפיות מתשובת התלמיד.",
    "mistakes": "הסבר בדיוק היכן טעה, מה חסר בתשובתו, ואיך זה משפיע על הפתרון. השתמש בדוגמאות ספציפיות מתשובתו.",
    "guidance": "הדרך את התלמיד כיצד לגשת לפתרון השאלה, בלי לתת את הפתרון עצמו. עודד את התלמיד ותן לו כלים להצליח בפעם הבאה."
  }},
  "assessment": {{
    "correctness_percentage": number (0-100)
  }}
}}

Guidelines for feedback:
1. Address the student directly
2. List ALL correct parts, no matter how small
3. Be specific about mistakes and their impact
4. For guidance: focus on methods and approaches, DON'T give direct solutions
5. Be encouraging and supportive"#,
        subject = request.subject_name,
        exam = request.exam_name,
        question = request.question_text,
        answer = request.student_answer,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(question_type: QuestionType) -> QuestionRequest {
        QuestionRequest {
            subject_name: "מתמטיקה".to_string(),
            exam_name: "בגרות".to_string(),
            topic_name: "טריגונומטריה".to_string(),
            question_type,
        }
    }

    #[test]
    fn question_prompt_names_the_selection() {
        let prompt = question_prompt(&request(QuestionType::Essay));
        assert!(prompt.contains("מתמטיקה"));
        assert!(prompt.contains("בגרות"));
        assert!(prompt.contains("טריגונומטריה"));
        assert!(prompt.contains("\"type\": \"essay\""));
    }

    #[test]
    fn schema_fields_follow_the_question_type() {
        let essay = question_prompt(&request(QuestionType::Essay));
        assert!(!essay.contains("options"));
        assert!(!essay.contains("final_answer"));

        let choice = question_prompt(&request(QuestionType::MultipleChoice));
        assert!(choice.contains("options"));
        assert!(choice.contains("final_answer"));

        let steps = question_prompt(&request(QuestionType::StepByStepSolution));
        assert!(steps.contains("steps"));
        assert!(steps.contains("final_answer"));

        let code = question_prompt(&request(QuestionType::CodeImplementation));
        assert!(code.contains("code_template"));
    }

    #[test]
    fn feedback_prompt_includes_solution_steps_in_order() {
        let request = FeedbackRequest {
            subject_name: "פיזיקה".to_string(),
            exam_name: "בגרות".to_string(),
            question_text: "שאלה".to_string(),
            student_answer: "תשובה".to_string(),
            solution_explanation: "הסבר".to_string(),
            solution_steps: vec!["שלב ראשון".to_string(), "שלב שני".to_string()],
            final_answer: Some("42".to_string()),
        };
        let prompt = feedback_prompt(&request);
        assert!(prompt.contains("1. שלב ראשון"));
        assert!(prompt.contains("2. שלב שני"));
        assert!(prompt.contains("Final answer: 42"));
    }
}
