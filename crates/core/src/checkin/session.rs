use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

use super::sampler::{IndexSource, POOL_SIZE, sample_pool};
use super::CheckinError;
use crate::catalog::Catalog;
use crate::model::{OptionLetter, Question, QuestionId};

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Where a check-in session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Answering { position: usize },
    Completed { at: DateTime<Utc> },
}

/// Signal emitted exactly once, when the last question is advanced past.
///
/// The session itself persists nothing; the caller stores `completed_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionEvent {
    pub completed_at: DateTime<Utc>,
    pub answers: Vec<(QuestionId, OptionLetter)>,
}

/// Outcome of a successful `advance`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    Moved { position: usize },
    Completed(CompletionEvent),
}

/// Header data for the "Question n of total" line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckinProgress {
    /// 1-based number of the question on screen.
    pub number: usize,
    pub total: usize,
    pub answered: usize,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One check-in attempt: the sampled pool, the cursor, and the answers given so far.
///
/// Owned and mutated by a single flow. Once `advance` completes the last question the
/// session is terminal; start a new one to check in again.
#[derive(Debug, Clone)]
pub struct CheckinSession {
    pool: Vec<Question>,
    position: usize,
    answers: HashMap<QuestionId, Option<OptionLetter>>,
    completed_at: Option<DateTime<Utc>>,
}

impl CheckinSession {
    /// Sample a fresh pool of [`POOL_SIZE`] questions from `catalog`.
    ///
    /// # Errors
    ///
    /// Returns `CheckinError::CatalogTooSmall` if the catalog cannot fill a pool, or
    /// `CheckinError::DuplicateQuestion` if the catalog repeats an id that got sampled twice.
    pub fn start<S: IndexSource + ?Sized>(
        catalog: &Catalog,
        source: &mut S,
    ) -> Result<Self, CheckinError> {
        let pool = sample_pool(catalog.questions(), source, POOL_SIZE)?;
        Self::from_pool(pool)
    }

    /// Build a session around an explicit pool.
    ///
    /// # Errors
    ///
    /// Returns `CheckinError::PoolSize` unless the pool has exactly [`POOL_SIZE`] questions,
    /// and `CheckinError::DuplicateQuestion` if an id repeats.
    pub fn from_pool(pool: Vec<Question>) -> Result<Self, CheckinError> {
        if pool.len() != POOL_SIZE {
            return Err(CheckinError::PoolSize {
                expected: POOL_SIZE,
                actual: pool.len(),
            });
        }

        let mut seen = HashSet::with_capacity(pool.len());
        for question in &pool {
            if !seen.insert(question.id()) {
                return Err(CheckinError::DuplicateQuestion(question.id()));
            }
        }

        let answers = pool.iter().map(|q| (q.id(), None)).collect();
        Ok(Self {
            pool,
            position: 0,
            answers,
            completed_at: None,
        })
    }

    #[must_use]
    pub fn pool(&self) -> &[Question] {
        &self.pool
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        match self.completed_at {
            Some(at) => SessionState::Completed { at },
            None => SessionState::Answering {
                position: self.position,
            },
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// True while the cursor sits on the final question ("Finish" rather than "Next").
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.position + 1 == self.pool.len()
    }

    /// The question at the cursor.
    ///
    /// # Errors
    ///
    /// Returns `CheckinError::OutOfRange` if the cursor is outside the pool.
    pub fn current(&self) -> Result<&Question, CheckinError> {
        self.pool.get(self.position).ok_or(CheckinError::OutOfRange {
            position: self.position,
            len: self.pool.len(),
        })
    }

    /// Record `letter` for the current question. Overwrites any earlier choice.
    ///
    /// # Errors
    ///
    /// Returns `CheckinError::Completed` once the session is terminal.
    pub fn select(&mut self, letter: OptionLetter) -> Result<(), CheckinError> {
        let id = self.current()?.id();
        self.select_for(id, letter)
    }

    /// Record `letter` for a specific pool question without moving the cursor.
    ///
    /// # Errors
    ///
    /// Returns `CheckinError::UnknownQuestion` if `id` was not sampled, or
    /// `CheckinError::Completed` once the session is terminal.
    pub fn select_for(&mut self, id: QuestionId, letter: OptionLetter) -> Result<(), CheckinError> {
        if self.is_complete() {
            return Err(CheckinError::Completed);
        }
        let slot = self
            .answers
            .get_mut(&id)
            .ok_or(CheckinError::UnknownQuestion(id))?;
        *slot = Some(letter);
        Ok(())
    }

    /// The answer recorded for the current question, if any.
    #[must_use]
    pub fn selected(&self) -> Option<OptionLetter> {
        self.current().ok().and_then(|q| self.answer_for(q.id()))
    }

    #[must_use]
    pub fn answer_for(&self, id: QuestionId) -> Option<OptionLetter> {
        self.answers.get(&id).copied().flatten()
    }

    /// Answers in pool order; `None` marks an unanswered question.
    #[must_use]
    pub fn answers(&self) -> Vec<(QuestionId, Option<OptionLetter>)> {
        self.pool
            .iter()
            .map(|q| (q.id(), self.answer_for(q.id())))
            .collect()
    }

    /// Whether `advance` would succeed right now.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        !self.is_complete() && self.selected().is_some()
    }

    /// Move to the next question, or complete the session on the last one.
    ///
    /// # Errors
    ///
    /// Returns `CheckinError::NotAnswered` if the current question has no answer and
    /// `CheckinError::Completed` if completion was already signalled.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<Advance, CheckinError> {
        if self.is_complete() {
            return Err(CheckinError::Completed);
        }
        let current = self.current()?.id();
        if self.answer_for(current).is_none() {
            return Err(CheckinError::NotAnswered(current));
        }

        if !self.is_last() {
            self.position += 1;
            return Ok(Advance::Moved {
                position: self.position,
            });
        }

        self.completed_at = Some(now);
        let answers = self
            .answers()
            .into_iter()
            .filter_map(|(id, letter)| letter.map(|letter| (id, letter)))
            .collect();
        Ok(Advance::Completed(CompletionEvent {
            completed_at: now,
            answers,
        }))
    }

    /// Step back one question. Returns `false` (and changes nothing) at the first
    /// question or after completion. Answers are kept.
    pub fn retreat(&mut self) -> bool {
        if self.is_complete() || self.position == 0 {
            return false;
        }
        self.position -= 1;
        true
    }

    #[must_use]
    pub fn progress(&self) -> CheckinProgress {
        CheckinProgress {
            number: self.position + 1,
            total: self.pool.len(),
            answered: self.answers.values().filter(|a| a.is_some()).count(),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkin::ScriptedIndices;
    use crate::time::fixed_now;

    fn scenario_session() -> CheckinSession {
        let catalog = Catalog::standard();
        CheckinSession::start(&catalog, &mut ScriptedIndices::new([6, 0, 12, 5])).unwrap()
    }

    fn q(raw: u32) -> QuestionId {
        QuestionId::new(raw)
    }

    #[test]
    fn fresh_session_starts_unanswered_at_zero() {
        let session = scenario_session();
        assert_eq!(session.position(), 0);
        assert_eq!(session.state(), SessionState::Answering { position: 0 });
        assert!(session.answers().iter().all(|(_, a)| a.is_none()));
        assert!(!session.can_advance());
        assert_eq!(
            session.progress(),
            CheckinProgress {
                number: 1,
                total: 4,
                answered: 0
            }
        );
    }

    #[test]
    fn select_keeps_cursor_and_records_answer() {
        let mut session = scenario_session();
        let before = session.current().unwrap().id();

        session.select(OptionLetter::C).unwrap();

        assert_eq!(session.current().unwrap().id(), before);
        assert_eq!(session.answer_for(before), Some(OptionLetter::C));
        assert!(session.can_advance());
    }

    #[test]
    fn reselect_overwrites() {
        let mut session = scenario_session();
        session.select(OptionLetter::A).unwrap();
        session.select(OptionLetter::E).unwrap();
        assert_eq!(session.selected(), Some(OptionLetter::E));
    }

    #[test]
    fn advance_without_answer_is_refused() {
        let mut session = scenario_session();
        let err = session.advance(fixed_now()).unwrap_err();
        assert_eq!(err, CheckinError::NotAnswered(q(7)));
        assert_eq!(session.position(), 0);
    }

    #[test]
    fn retreat_at_start_is_noop() {
        let mut session = scenario_session();
        assert!(!session.retreat());
        assert_eq!(session.position(), 0);
        assert_eq!(session.state(), SessionState::Answering { position: 0 });
    }

    #[test]
    fn retreat_keeps_answer_of_question_left() {
        let mut session = scenario_session();
        session.select(OptionLetter::B).unwrap();
        session.advance(fixed_now()).unwrap();
        session.select(OptionLetter::D).unwrap();

        assert!(session.retreat());
        assert_eq!(session.position(), 0);
        assert_eq!(session.answer_for(q(2)), Some(OptionLetter::D));
        assert_eq!(session.selected(), Some(OptionLetter::B));
    }

    #[test]
    fn scenario_completes_once_after_four_advances() {
        let mut session = scenario_session();
        let pool: Vec<_> = session.pool().iter().map(Question::id).collect();
        assert_eq!(pool, vec![q(7), q(2), q(15), q(9)]);

        let picks = [
            OptionLetter::C,
            OptionLetter::A,
            OptionLetter::E,
            OptionLetter::B,
        ];
        let mut completions = Vec::new();
        for (step, letter) in picks.into_iter().enumerate() {
            session.select(letter).unwrap();
            match session.advance(fixed_now()).unwrap() {
                Advance::Moved { position } => assert_eq!(position, step + 1),
                Advance::Completed(event) => completions.push((step, event)),
            }
        }

        assert_eq!(completions.len(), 1);
        let (step, event) = &completions[0];
        assert_eq!(*step, 3);
        assert_eq!(event.completed_at, fixed_now());
        assert_eq!(
            event.answers,
            vec![
                (q(7), OptionLetter::C),
                (q(2), OptionLetter::A),
                (q(15), OptionLetter::E),
                (q(9), OptionLetter::B),
            ]
        );
        assert_eq!(session.state(), SessionState::Completed { at: fixed_now() });
    }

    #[test]
    fn completed_session_is_terminal() {
        let mut session = scenario_session();
        for _ in 0..4 {
            session.select(OptionLetter::A).unwrap();
            session.advance(fixed_now()).unwrap();
        }

        assert!(session.is_complete());
        assert!(!session.can_advance());
        assert_eq!(session.advance(fixed_now()), Err(CheckinError::Completed));
        assert_eq!(session.select(OptionLetter::B), Err(CheckinError::Completed));
        assert!(!session.retreat());
        assert_eq!(session.position(), 3);
    }

    #[test]
    fn answers_only_for_pooled_questions() {
        let mut session = scenario_session();
        assert_eq!(
            session.select_for(q(1), OptionLetter::A),
            Err(CheckinError::UnknownQuestion(q(1)))
        );
        session.select_for(q(15), OptionLetter::E).unwrap();
        assert_eq!(session.answer_for(q(15)), Some(OptionLetter::E));
        assert_eq!(session.position(), 0);
    }

    #[test]
    fn from_pool_validates_size_and_uniqueness() {
        let catalog = Catalog::standard();
        let qs = catalog.questions();

        let err = CheckinSession::from_pool(qs[..3].to_vec()).unwrap_err();
        assert_eq!(
            err,
            CheckinError::PoolSize {
                expected: 4,
                actual: 3
            }
        );

        let dup = vec![qs[0].clone(), qs[1].clone(), qs[0].clone(), qs[2].clone()];
        assert_eq!(
            CheckinSession::from_pool(dup).unwrap_err(),
            CheckinError::DuplicateQuestion(q(1))
        );
    }

    #[test]
    fn is_last_tracks_final_slot() {
        let mut session = scenario_session();
        for _ in 0..3 {
            assert!(!session.is_last());
            session.select(OptionLetter::A).unwrap();
            session.advance(fixed_now()).unwrap();
        }
        assert!(session.is_last());
        assert_eq!(session.progress().number, 4);
        assert_eq!(session.progress().answered, 3);
    }
}
