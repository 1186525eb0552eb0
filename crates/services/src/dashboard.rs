use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::error::PreferencesError;
use crate::preferences::PreferencesService;

/// Shown when no check-in has been recorded.
pub const NOT_COMPLETED_LABEL: &str = "Not completed today";

/// What the dashboard needs to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardSnapshot {
    pub last_checkin: Option<DateTime<Utc>>,
}

impl DashboardSnapshot {
    /// "Last completed" text in the local time zone.
    #[must_use]
    pub fn last_checkin_label(&self) -> String {
        self.last_checkin_label_in(&Local)
    }

    #[must_use]
    pub fn last_checkin_label_in<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        match self.last_checkin {
            Some(at) => at
                .with_timezone(tz)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            None => NOT_COMPLETED_LABEL.to_string(),
        }
    }
}

#[derive(Clone)]
pub struct DashboardService {
    prefs: PreferencesService,
}

impl DashboardService {
    #[must_use]
    pub fn new(prefs: PreferencesService) -> Self {
        Self { prefs }
    }

    /// Load (or refresh) the dashboard data.
    ///
    /// # Errors
    ///
    /// Returns `PreferencesError` on storage failures.
    pub async fn snapshot(&self) -> Result<DashboardSnapshot, PreferencesError> {
        Ok(DashboardSnapshot {
            last_checkin: self.prefs.last_checkin_at().await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use joi_core::time::fixed_now;
    use std::sync::Arc;
    use storage::repository::InMemoryStore;

    #[tokio::test]
    async fn empty_store_shows_not_completed() {
        let prefs = PreferencesService::new(Arc::new(InMemoryStore::new()));
        let snapshot = DashboardService::new(prefs).snapshot().await.unwrap();
        assert_eq!(snapshot.last_checkin, None);
        assert_eq!(snapshot.last_checkin_label(), NOT_COMPLETED_LABEL);
    }

    #[tokio::test]
    async fn recorded_checkin_is_formatted() {
        let prefs = PreferencesService::new(Arc::new(InMemoryStore::new()));
        prefs.record_checkin(fixed_now()).await.unwrap();

        let snapshot = DashboardService::new(prefs).snapshot().await.unwrap();
        assert_eq!(snapshot.last_checkin, Some(fixed_now()));
        assert_eq!(snapshot.last_checkin_label_in(&Utc), "2023-11-14 22:13:20");
    }
}
