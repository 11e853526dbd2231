//! Compiles survey definitions (groups, questions, subquestions, answers and
//! their translations) into a SurveyJS form schema.
//!
//! ```
//! use surveyjs_schema::{CompileOptions, SurveyDefinition, compile};
//!
//! let survey = SurveyDefinition::from_json_str(r#"{
//!     "id": 1,
//!     "language": "en",
//!     "groups": [{ "id": 1, "name": "About you", "questions": [
//!         { "id": 1, "name": "age", "type": "N", "translations": { "en": "Age" } }
//!     ]}]
//! }"#).unwrap();
//! let document = compile(&survey, &CompileOptions::default());
//! assert_eq!(document.pages()[0].elements[0].kind.type_name(), "text");
//! ```

pub mod builder;
pub mod document;
pub mod element;
pub mod error;
pub mod expr;
pub mod i18n;
pub mod model;
pub mod options;
pub mod sanitize;
pub mod tokens;
pub mod validate;

pub use builder::{compile, compile_group, language_element};
pub use document::{
    Choice, DisplayText, DocumentBody, Element, ElementKind, LocalizedText, Page, SchemaDocument,
};
pub use element::{ElementContext, choice_value, map_question};
pub use error::{ExportError, Result};
pub use expr::translate_relevance;
pub use model::{Answer, Question, QuestionGroup, QuestionType, SurveyDefinition, composite_id};
pub use options::{CompileOptions, Layout};
pub use sanitize::sanitize_text;
pub use tokens::{TokenCollision, TokenEntry, TokenOrigin, TokenTable};
pub use validate::{Severity, ValidationIssue, ValidationReport, validate_survey};
