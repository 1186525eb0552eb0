use std::fmt;

/// Screens the flows can send the user to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Landing,
    Onboarding,
    Login,
    Dashboard,
    Periodic,
    BaselineSurvey,
    Result,
}

impl Route {
    pub const ALL: [Route; 7] = [
        Route::Landing,
        Route::Onboarding,
        Route::Login,
        Route::Dashboard,
        Route::Periodic,
        Route::BaselineSurvey,
        Route::Result,
    ];

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Route::Landing => "/landing",
            Route::Onboarding => "/onboarding",
            Route::Login => "/auth/login",
            Route::Dashboard => "/(tabs)/dashboard",
            Route::Periodic => "/periodic",
            Route::BaselineSurvey => "/(tabs)/survey",
            Route::Result => "/result",
        }
    }

    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|route| route.path() == path)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Screen-switching collaborator. Implementations replace the visible screen.
pub trait Navigator {
    fn replace(&self, route: Route);
}
