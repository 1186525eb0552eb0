//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

use joi_core::checkin::CheckinError;
use joi_core::model::OnboardingStep;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `PreferencesService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PreferencesError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `CheckinService`.
///
/// Persistence failures on completion are logged and swallowed, so only controller
/// errors reach the caller.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CheckinServiceError {
    #[error(transparent)]
    Checkin(#[from] CheckinError),
}

/// Errors emitted by the onboarding and landing flows.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OnboardingError {
    #[error("onboarding cannot finish from the {0:?} step")]
    NotFinished(OnboardingStep),
    #[error(transparent)]
    Preferences(#[from] PreferencesError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}

/// Errors emitted while loading a translation file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LocaleError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid translation file {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Preferences(#[from] PreferencesError),
}
