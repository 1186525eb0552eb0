//! Keys used in the key-value preference store.

/// ISO-8601 timestamp of the last completed periodic check-in.
pub const LAST_CHECKIN_AT: &str = "lastPeriodicAt";
/// Language code chosen during onboarding (`en`, `ko`).
pub const APP_LANGUAGE: &str = "appLanguage";
pub const HAS_ONBOARDED: &str = "hasOnboarded";
pub const PRIVACY_CONSENT: &str = "privacyConsent";
pub const BASELINE_DONE: &str = "baselineDone";

/// Flags cleared when the user starts onboarding from the landing screen.
pub const ONBOARDING_FLAGS: [&str; 3] = [HAS_ONBOARDED, PRIVACY_CONSENT, BASELINE_DONE];

pub(crate) const TRUE: &str = "true";
