/// Screens of the first-run onboarding flow, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OnboardingStep {
    /// Language picker. Skipped when a language is already stored.
    Language,
    /// Product introduction.
    Intro,
    /// Input method overview; its call to action ends onboarding.
    InputSelection,
}

impl OnboardingStep {
    /// Progress bar fill for this step.
    #[must_use]
    pub fn progress_percent(self) -> u8 {
        match self {
            OnboardingStep::Language => 0,
            OnboardingStep::Intro => 50,
            OnboardingStep::InputSelection => 100,
        }
    }

    /// The step after this one, or `None` on the last screen.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            OnboardingStep::Language => Some(OnboardingStep::Intro),
            OnboardingStep::Intro => Some(OnboardingStep::InputSelection),
            OnboardingStep::InputSelection => None,
        }
    }

    #[must_use]
    pub fn is_last(self) -> bool {
        self.next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_progress_monotonically() {
        let mut step = OnboardingStep::Language;
        let mut seen = vec![step.progress_percent()];
        while let Some(next) = step.next() {
            step = next;
            seen.push(step.progress_percent());
        }
        assert_eq!(seen, vec![0, 50, 100]);
        assert!(step.is_last());
    }
}
