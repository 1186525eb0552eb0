use std::path::Path;
use std::sync::Arc;

use joi_core::catalog::Catalog;
use joi_core::model::Language;
use storage::repository::Storage;

use crate::checkin::CheckinService;
use crate::dashboard::DashboardService;
use crate::error::{AppServicesError, LocaleError, OnboardingError};
use crate::i18n::{self, Localization};
use crate::onboarding::{LandingService, OnboardingFlow};
use crate::preferences::PreferencesService;
use crate::Clock;

/// Assembles app-facing services around one shared key-value store.
#[derive(Clone)]
pub struct AppServices {
    preferences: PreferencesService,
    checkin: Arc<CheckinService>,
    dashboard: Arc<DashboardService>,
    landing: Arc<LandingService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        catalog: Catalog,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, clock, catalog))
    }

    /// Build services over a fresh in-memory store.
    #[must_use]
    pub fn in_memory(clock: Clock, catalog: Catalog) -> Self {
        Self::from_storage(&Storage::in_memory(), clock, catalog)
    }

    #[must_use]
    pub fn from_storage(storage: &Storage, clock: Clock, catalog: Catalog) -> Self {
        let preferences = PreferencesService::new(Arc::clone(&storage.kv));
        let checkin = Arc::new(CheckinService::new(
            clock,
            Arc::new(catalog),
            preferences.clone(),
        ));
        let dashboard = Arc::new(DashboardService::new(preferences.clone()));
        let landing = Arc::new(LandingService::new(preferences.clone()));

        Self {
            preferences,
            checkin,
            dashboard,
            landing,
        }
    }

    #[must_use]
    pub fn preferences(&self) -> &PreferencesService {
        &self.preferences
    }

    #[must_use]
    pub fn checkin(&self) -> Arc<CheckinService> {
        Arc::clone(&self.checkin)
    }

    #[must_use]
    pub fn dashboard(&self) -> Arc<DashboardService> {
        Arc::clone(&self.dashboard)
    }

    #[must_use]
    pub fn landing(&self) -> Arc<LandingService> {
        Arc::clone(&self.landing)
    }

    /// Start an onboarding pass, reading the stored language.
    ///
    /// # Errors
    ///
    /// Returns `OnboardingError` on storage failures.
    pub async fn begin_onboarding(&self) -> Result<OnboardingFlow, OnboardingError> {
        OnboardingFlow::begin(self.preferences.clone()).await
    }

    /// Texts for the stored language, read from `{locale_dir}/{code}.json`.
    ///
    /// Falls back to the built-in English texts when no language is stored, no
    /// directory is given, or the directory has no file for the language.
    ///
    /// # Errors
    ///
    /// Returns `LocaleError` on storage failures or an unreadable translation file.
    pub async fn localization(
        &self,
        locale_dir: Option<&Path>,
    ) -> Result<Localization, LocaleError> {
        let language = self.preferences.language().await?.unwrap_or_default();
        let Some(dir) = locale_dir else {
            return Ok(Localization::defaults(language));
        };

        match i18n::load_locale(dir, language)? {
            Some(lookup) => Ok(Localization::new(language, lookup)),
            None => {
                if language != Language::English {
                    log::warn!(
                        "no {} translation in {}; using English texts",
                        language.code(),
                        dir.display()
                    );
                }
                Ok(Localization::defaults(language))
            }
        }
    }
}
