use std::sync::Arc;

use chrono::{DateTime, Utc};
use joi_core::catalog::Catalog;
use joi_core::checkin::{Advance, CheckinSession, CompletionEvent, IndexSource, RngSource};

use crate::error::CheckinServiceError;
use crate::preferences::PreferencesService;
use crate::routes::Route;
use crate::Clock;

/// Result of pressing "Next"/"Finish" on the check-in screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckinStep {
    /// Moved to the question at `position`.
    Next { position: usize },
    /// The last question was answered.
    Completed {
        event: CompletionEvent,
        /// Whether the completion timestamp reached the store.
        persisted: bool,
        next: Route,
    },
}

impl CheckinStep {
    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        match self {
            CheckinStep::Completed { event, .. } => Some(event.completed_at),
            CheckinStep::Next { .. } => None,
        }
    }
}

/// Starts check-in sessions and records their completion.
#[derive(Clone)]
pub struct CheckinService {
    clock: Clock,
    catalog: Arc<Catalog>,
    prefs: PreferencesService,
}

impl CheckinService {
    #[must_use]
    pub fn new(clock: Clock, catalog: Arc<Catalog>, prefs: PreferencesService) -> Self {
        Self {
            clock,
            catalog,
            prefs,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Same service drawing questions from `catalog`, e.g. one localized for the
    /// stored language.
    #[must_use]
    pub fn with_catalog(&self, catalog: Catalog) -> Self {
        Self {
            clock: self.clock,
            catalog: Arc::new(catalog),
            prefs: self.prefs.clone(),
        }
    }

    /// Start a session sampled with the thread-local RNG.
    ///
    /// # Errors
    ///
    /// Returns `CheckinServiceError` if the catalog cannot fill a pool.
    pub fn start_session(&self) -> Result<CheckinSession, CheckinServiceError> {
        self.start_session_with(&mut RngSource::thread())
    }

    /// Start a session sampled from `source`.
    ///
    /// # Errors
    ///
    /// Returns `CheckinServiceError` if the catalog cannot fill a pool.
    pub fn start_session_with<S: IndexSource + ?Sized>(
        &self,
        source: &mut S,
    ) -> Result<CheckinSession, CheckinServiceError> {
        let session = CheckinSession::start(&self.catalog, source)?;
        log::debug!(
            "check-in started with pool {:?}",
            session.pool().iter().map(|q| q.id()).collect::<Vec<_>>()
        );
        Ok(session)
    }

    /// Advance the session; on completion, store the completion time.
    ///
    /// A failed write is logged and reported through `persisted: false`; it never
    /// blocks the transition.
    ///
    /// # Errors
    ///
    /// Returns `CheckinServiceError::Checkin` if the current question is unanswered or
    /// the session already completed.
    pub async fn advance(
        &self,
        session: &mut CheckinSession,
    ) -> Result<CheckinStep, CheckinServiceError> {
        match session.advance(self.clock.now())? {
            Advance::Moved { position } => Ok(CheckinStep::Next { position }),
            Advance::Completed(event) => {
                let persisted = match self.prefs.record_checkin(event.completed_at).await {
                    Ok(()) => true,
                    Err(err) => {
                        log::warn!("failed to record check-in completion: {err}");
                        false
                    }
                };
                log::info!(
                    "check-in completed at {} ({} answers)",
                    event.completed_at,
                    event.answers.len()
                );
                Ok(CheckinStep::Completed {
                    event,
                    persisted,
                    next: Route::Dashboard,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use joi_core::checkin::{CheckinError, ScriptedIndices};
    use joi_core::model::OptionLetter;
    use joi_core::time::{fixed_clock, fixed_now};
    use storage::repository::InMemoryStore;

    fn service(store: &InMemoryStore) -> CheckinService {
        CheckinService::new(
            fixed_clock(),
            Arc::new(Catalog::standard()),
            PreferencesService::new(Arc::new(store.clone())),
        )
    }

    #[tokio::test]
    async fn unanswered_advance_surfaces_not_answered() {
        let store = InMemoryStore::new();
        let svc = service(&store);
        let mut session = svc
            .start_session_with(&mut ScriptedIndices::identity())
            .unwrap();

        let err = svc.advance(&mut session).await.unwrap_err();
        assert!(matches!(
            err,
            CheckinServiceError::Checkin(CheckinError::NotAnswered(_))
        ));
        assert_eq!(store.len().unwrap(), 0);
    }

    #[tokio::test]
    async fn completion_writes_timestamp_once() {
        let store = InMemoryStore::new();
        let svc = service(&store);
        let mut session = svc
            .start_session_with(&mut ScriptedIndices::identity())
            .unwrap();

        let mut steps = Vec::new();
        for _ in 0..4 {
            session.select(OptionLetter::B).unwrap();
            steps.push(svc.advance(&mut session).await.unwrap());
        }

        assert_eq!(steps[0], CheckinStep::Next { position: 1 });
        assert_eq!(steps[2], CheckinStep::Next { position: 3 });
        let CheckinStep::Completed {
            persisted, next, ..
        } = &steps[3]
        else {
            panic!("expected completion, got {:?}", steps[3]);
        };
        assert!(*persisted);
        assert_eq!(*next, Route::Dashboard);
        assert_eq!(steps[3].completed_at(), Some(fixed_now()));
        assert_eq!(store.len().unwrap(), 1);

        assert!(svc.advance(&mut session).await.is_err());
    }

    #[test]
    fn thread_rng_sessions_have_four_questions() {
        let store = InMemoryStore::new();
        let svc = service(&store);
        let session = svc.start_session().unwrap();
        assert_eq!(session.pool().len(), 4);
    }
}
