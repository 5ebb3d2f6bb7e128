//! Navigation collaborator
//!
//! The controller only knows how to ask for "the dashboard"; what that means
//! (a router push, a terminal message) is up to the [`Navigator`].

use crate::config::NavigationConfig;
use std::fmt;

/// Navigation target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Dashboard view, with its configured path
    Dashboard(String),
}

impl Route {
    pub fn dashboard(config: &NavigationConfig) -> Self {
        Route::Dashboard(config.dashboard_route.clone())
    }

    pub fn path(&self) -> &str {
        match self {
            Route::Dashboard(path) => path,
        }
    }
}

impl Default for Route {
    fn default() -> Self {
        Route::Dashboard(NavigationConfig::default().dashboard_route)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Performs navigation side effects
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &Route);
}

/// Navigator for terminal frontends
#[derive(Debug, Default)]
pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn navigate(&self, route: &Route) {
        tracing::info!(route = %route, "Navigating");
        println!("↩️  Returning to dashboard ({route})");
    }
}
