mod ids;
mod language;
mod onboarding;
mod question;

pub use ids::{ParseIdError, QuestionId};
pub use language::{Language, UnsupportedLanguage};
pub use onboarding::OnboardingStep;
pub use question::{AnswerOption, OptionLetter, Question, QuestionError};
