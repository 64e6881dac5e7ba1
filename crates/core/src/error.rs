use thiserror::Error;

use crate::model::QuestionError;
use crate::model::SelectionError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Selection(#[from] SelectionError),
}
