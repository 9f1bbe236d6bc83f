/// Views reachable from the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    About,
    Import,
    Visualization,
    ActorNetwork,
    AdvancedVisualization,
}

impl Route {
    pub const ALL: [Route; 6] = [
        Route::Home,
        Route::About,
        Route::Import,
        Route::Visualization,
        Route::ActorNetwork,
        Route::AdvancedVisualization,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::About => "/about",
            Route::Import => "/import",
            Route::Visualization => "/visualization",
            Route::ActorNetwork => "/visualization/actors",
            Route::AdvancedVisualization => "/visualization/advanced",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::About => "about",
            Route::Import => "import",
            Route::Visualization => "visualization",
            Route::ActorNetwork => "actorNetwork",
            Route::AdvancedVisualization => "advancedVisualization",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::About => "About",
            Route::Import => "Import",
            Route::Visualization => "Visualization",
            Route::ActorNetwork => "Actor Network",
            Route::AdvancedVisualization => "Advanced",
        }
    }

    /// Exact match on the path, ignoring a trailing slash and query string.
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        Self::ALL.into_iter().find(|r| r.path() == path)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_round_trip() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
    }

    #[test]
    fn lenient_path_matching() {
        assert_eq!(Route::from_path(""), Some(Route::Home));
        assert_eq!(Route::from_path("/import/"), Some(Route::Import));
        assert_eq!(
            Route::from_path("/visualization/actors?actor=Tom%20Hanks"),
            Some(Route::ActorNetwork)
        );
        assert_eq!(Route::from_path("/visualization/unknown"), None);
    }

    #[test]
    fn names_match_router_table() {
        assert_eq!(Route::ActorNetwork.name(), "actorNetwork");
        assert_eq!(Route::AdvancedVisualization.name(), "advancedVisualization");
        assert_eq!(Route::default(), Route::Home);
    }
}
