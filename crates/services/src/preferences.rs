use std::sync::Arc;

use chrono::{DateTime, Utc};
use joi_core::model::Language;
use joi_core::time::{format_timestamp, parse_timestamp};
use storage::repository::KeyValueStore;

use crate::error::PreferencesError;
use crate::keys;

/// Typed access to the handful of flags the app keeps in the key-value store.
#[derive(Clone)]
pub struct PreferencesService {
    store: Arc<dyn KeyValueStore>,
}

impl PreferencesService {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Stored language, if one was chosen.
    ///
    /// Unknown codes are logged and treated as unset.
    ///
    /// # Errors
    ///
    /// Returns `PreferencesError` on storage failures.
    pub async fn language(&self) -> Result<Option<Language>, PreferencesError> {
        let Some(raw) = self.store.get(keys::APP_LANGUAGE).await? else {
            return Ok(None);
        };
        match raw.parse::<Language>() {
            Ok(lang) => Ok(Some(lang)),
            Err(err) => {
                log::warn!("ignoring stored language: {err}");
                Ok(None)
            }
        }
    }

    /// # Errors
    ///
    /// Returns `PreferencesError` on storage failures.
    pub async fn set_language(&self, language: Language) -> Result<(), PreferencesError> {
        self.store.set(keys::APP_LANGUAGE, language.code()).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `PreferencesError` on storage failures.
    pub async fn has_onboarded(&self) -> Result<bool, PreferencesError> {
        let raw = self.store.get(keys::HAS_ONBOARDED).await?;
        Ok(raw.as_deref() == Some(keys::TRUE))
    }

    /// # Errors
    ///
    /// Returns `PreferencesError` on storage failures.
    pub async fn mark_onboarded(&self) -> Result<(), PreferencesError> {
        self.store.set(keys::HAS_ONBOARDED, keys::TRUE).await?;
        Ok(())
    }

    /// Clear the onboarding, consent and baseline flags in one call.
    ///
    /// The language preference survives so onboarding can skip the picker.
    ///
    /// # Errors
    ///
    /// Returns `PreferencesError` on storage failures.
    pub async fn reset_onboarding(&self) -> Result<(), PreferencesError> {
        self.store.remove(&keys::ONBOARDING_FLAGS).await?;
        Ok(())
    }

    /// When the last periodic check-in completed.
    ///
    /// A value that is not valid ISO-8601 is logged and treated as absent.
    ///
    /// # Errors
    ///
    /// Returns `PreferencesError` on storage failures.
    pub async fn last_checkin_at(&self) -> Result<Option<DateTime<Utc>>, PreferencesError> {
        let Some(raw) = self.store.get(keys::LAST_CHECKIN_AT).await? else {
            return Ok(None);
        };
        match parse_timestamp(&raw) {
            Ok(at) => Ok(Some(at)),
            Err(err) => {
                log::warn!("ignoring stored check-in time: {err}");
                Ok(None)
            }
        }
    }

    /// # Errors
    ///
    /// Returns `PreferencesError` on storage failures.
    pub async fn record_checkin(&self, at: DateTime<Utc>) -> Result<(), PreferencesError> {
        self.store
            .set(keys::LAST_CHECKIN_AT, &format_timestamp(at))
            .await?;
        Ok(())
    }
}
