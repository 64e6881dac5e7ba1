mod feedback;
mod progress;
mod question;
mod selection;

pub use feedback::{Analysis, Assessment, Feedback, grade_selected_option};
pub use progress::Progress;
pub use question::{Question, QuestionError, QuestionType, Solution, SolutionStep};
pub use selection::{Discipline, Exam, Selection, SelectionError, Subject};
