pub mod question;
pub mod survey;

pub use question::{Answer, Question, QuestionType, Translations};
pub use survey::{QuestionGroup, SurveyDefinition};

/// Joins survey, group and question ids into the positional identifier used
/// by relevance expressions, e.g. `12X34X56`.
pub fn composite_id(survey_id: u64, group_id: u64, question_id: u64) -> String {
    format!("{survey_id}X{group_id}X{question_id}")
}
