use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::QuestionId;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question {0} has an empty prompt")]
    EmptyPrompt(QuestionId),

    #[error("invalid option letter: {0:?}")]
    InvalidLetter(String),
}

//
// ─── OPTION LETTER ────────────────────────────────────────────────────────────
//

/// One of the five answer slots every question carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OptionLetter {
    A,
    B,
    C,
    D,
    E,
}

impl OptionLetter {
    /// Letters in display order.
    pub const ALL: [OptionLetter; 5] = [
        OptionLetter::A,
        OptionLetter::B,
        OptionLetter::C,
        OptionLetter::D,
        OptionLetter::E,
    ];

    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            OptionLetter::A => 'A',
            OptionLetter::B => 'B',
            OptionLetter::C => 'C',
            OptionLetter::D => 'D',
            OptionLetter::E => 'E',
        }
    }

    /// Zero-based slot index (A = 0).
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            OptionLetter::A => 0,
            OptionLetter::B => 1,
            OptionLetter::C => 2,
            OptionLetter::D => 3,
            OptionLetter::E => 4,
        }
    }
}

impl fmt::Display for OptionLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for OptionLetter {
    type Err = QuestionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(OptionLetter::A),
            "B" => Ok(OptionLetter::B),
            "C" => Ok(OptionLetter::C),
            "D" => Ok(OptionLetter::D),
            "E" => Ok(OptionLetter::E),
            _ => Err(QuestionError::InvalidLetter(s.to_string())),
        }
    }
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// A labeled answer choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOption {
    pub letter: OptionLetter,
    pub text: String,
}

/// A survey question with exactly five options, A through E.
///
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    text: String,
    options: [AnswerOption; 5],
}

impl Question {
    /// Build a question, assigning letters A-E to `options` in order.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyPrompt` if `text` is blank.
    pub fn new(
        id: QuestionId,
        text: impl Into<String>,
        options: [String; 5],
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt(id));
        }
        Ok(Self::from_parts(id, text, options))
    }

    /// Build a question without checking the prompt. Callers must pass non-blank text.
    pub(crate) fn from_parts(id: QuestionId, text: String, options: [String; 5]) -> Self {
        let mut letters = OptionLetter::ALL.into_iter();
        let options = options.map(|text| AnswerOption {
            // `ALL` has exactly as many entries as `options`.
            letter: letters.next().unwrap_or(OptionLetter::E),
            text,
        });

        Self { id, text, options }
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[AnswerOption; 5] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, letter: OptionLetter) -> &AnswerOption {
        &self.options[letter.index()]
    }
}
