#![forbid(unsafe_code)]

pub mod app_services;
pub mod checkin;
pub mod dashboard;
pub mod error;
pub mod i18n;
pub mod keys;
pub mod onboarding;
pub mod preferences;
pub mod routes;

pub use joi_core::Clock;

pub use app_services::AppServices;
pub use checkin::{CheckinService, CheckinStep};
pub use dashboard::{DashboardService, DashboardSnapshot};
pub use error::{
    AppServicesError, CheckinServiceError, LocaleError, OnboardingError, PreferencesError,
};
pub use i18n::{JsonLookup, Localization};
pub use onboarding::{LandingService, OnboardingFlow};
pub use preferences::PreferencesService;
pub use routes::{Navigator, Route};
