use joi_core::model::{Language, OnboardingStep};

use crate::error::{OnboardingError, PreferencesError};
use crate::preferences::PreferencesService;
use crate::routes::Route;

/// Entry point actions on the landing screen.
#[derive(Clone)]
pub struct LandingService {
    prefs: PreferencesService,
}

impl LandingService {
    #[must_use]
    pub fn new(prefs: PreferencesService) -> Self {
        Self { prefs }
    }

    /// Where the app should open: the dashboard once onboarding is done, else landing.
    ///
    /// # Errors
    ///
    /// Returns `PreferencesError` on storage failures.
    pub async fn entry_route(&self) -> Result<Route, PreferencesError> {
        if self.prefs.has_onboarded().await? {
            Ok(Route::Dashboard)
        } else {
            Ok(Route::Landing)
        }
    }

    /// "Get Started": clear onboarding state and go to onboarding.
    ///
    /// # Errors
    ///
    /// Returns `PreferencesError` on storage failures.
    pub async fn start_onboarding(&self) -> Result<Route, PreferencesError> {
        self.prefs.reset_onboarding().await?;
        log::debug!("onboarding flags cleared");
        Ok(Route::Onboarding)
    }

    /// "I already have an account".
    #[must_use]
    pub fn login_route(&self) -> Route {
        Route::Login
    }
}

/// State of one pass through the onboarding screens.
pub struct OnboardingFlow {
    prefs: PreferencesService,
    step: OnboardingStep,
    language: Language,
}

impl OnboardingFlow {
    /// Load the stored language; when one exists the picker is skipped.
    ///
    /// # Errors
    ///
    /// Returns `OnboardingError` on storage failures.
    pub async fn begin(prefs: PreferencesService) -> Result<Self, OnboardingError> {
        let (step, language) = match prefs.language().await? {
            Some(language) => (OnboardingStep::Intro, language),
            None => (OnboardingStep::Language, Language::default()),
        };
        Ok(Self {
            prefs,
            step,
            language,
        })
    }

    #[must_use]
    pub fn step(&self) -> OnboardingStep {
        self.step
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    /// Persist the language and move on to the introduction.
    ///
    /// # Errors
    ///
    /// Returns `OnboardingError` if the language cannot be stored.
    pub async fn choose_language(&mut self, language: Language) -> Result<(), OnboardingError> {
        self.prefs.set_language(language).await?;
        self.language = language;
        self.step = OnboardingStep::Intro;
        Ok(())
    }

    /// "Continue" on the introduction. The language screen only advances through
    /// [`choose_language`](Self::choose_language). Returns whether the step changed.
    pub fn proceed(&mut self) -> bool {
        if self.step != OnboardingStep::Intro {
            return false;
        }
        self.step = OnboardingStep::InputSelection;
        true
    }

    /// "Get Started" on the last screen: mark onboarding done.
    ///
    /// # Errors
    ///
    /// Returns `OnboardingError::NotFinished` before the last screen, or a storage error.
    pub async fn finish(self) -> Result<Route, OnboardingError> {
        if !self.step.is_last() {
            return Err(OnboardingError::NotFinished(self.step));
        }
        self.prefs.mark_onboarded().await?;
        log::info!("onboarding finished (language {})", self.language);
        Ok(Route::Dashboard)
    }
}
