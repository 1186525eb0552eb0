use joi_core::catalog::Catalog;
use joi_core::model::{Language, OnboardingStep};
use joi_core::time::fixed_clock;
use services::{AppServices, Route};

#[tokio::test]
async fn landing_onboarding_then_dashboard() {
    let app = AppServices::in_memory(fixed_clock(), Catalog::standard());
    let landing = app.landing();

    assert_eq!(landing.entry_route().await.unwrap(), Route::Landing);
    assert_eq!(landing.start_onboarding().await.unwrap(), Route::Onboarding);

    let mut flow = app.begin_onboarding().await.unwrap();
    assert_eq!(flow.step(), OnboardingStep::Language);
    assert_eq!(flow.step().progress_percent(), 0);

    flow.choose_language(Language::Korean).await.unwrap();
    assert_eq!(flow.step().progress_percent(), 50);
    assert!(flow.proceed());
    assert_eq!(flow.step().progress_percent(), 100);
    assert_eq!(flow.finish().await.unwrap(), Route::Dashboard);

    assert_eq!(landing.entry_route().await.unwrap(), Route::Dashboard);

    // Re-running onboarding keeps the language and skips the picker.
    landing.start_onboarding().await.unwrap();
    let flow = app.begin_onboarding().await.unwrap();
    assert_eq!(flow.step(), OnboardingStep::Intro);
    assert_eq!(flow.language(), Language::Korean);
    assert_eq!(landing.entry_route().await.unwrap(), Route::Landing);
}
