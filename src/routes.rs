//! ═══════════════════════════════════════════════════════════════════════════════
//! ROUTES — Page Table and Navigation
//! ═══════════════════════════════════════════════════════════════════════════════

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use crate::error::RouteError;

/// One page of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    #[default]
    Home,
    Simulate,
    Results,
    Profile,
    Register,
    Login,
}

impl Route {
    /// Navigation order; key `1` is the first entry
    pub const ALL: [Route; 6] = [
        Route::Home,
        Route::Simulate,
        Route::Results,
        Route::Profile,
        Route::Register,
        Route::Login,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Simulate => "/simulate",
            Route::Results => "/results",
            Route::Profile => "/profile",
            Route::Register => "/register",
            Route::Login => "/login",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Simulate => "Simulate",
            Route::Results => "Results",
            Route::Profile => "Profile",
            Route::Register => "Register",
            Route::Login => "Login",
        }
    }

    /// Case-insensitive; a trailing slash and surrounding whitespace are ignored
    pub fn parse(path: &str) -> Result<Route, RouteError> {
        let trimmed = path.trim();
        let normalized = trimmed.trim_end_matches('/').to_ascii_lowercase();
        let normalized = if normalized.is_empty() { "/".to_string() } else { normalized };
        let normalized = if normalized.starts_with('/') {
            normalized
        } else {
            format!("/{}", normalized)
        };
        Route::ALL
            .into_iter()
            .find(|r| r.path() == normalized)
            .ok_or_else(|| RouteError::NotFound(trimmed.to_string()))
    }

    /// Route for a 1-based nav key
    pub fn from_nav_key(key: char) -> Option<Route> {
        let n = key.to_digit(10)? as usize;
        n.checked_sub(1).and_then(|i| Route::ALL.get(i).copied())
    }

    pub fn nav_index(&self) -> usize {
        Route::ALL.iter().position(|r| r == self).unwrap_or(0)
    }

    pub fn next(&self) -> Route {
        Route::ALL[(self.nav_index() + 1) % Route::ALL.len()]
    }

    pub fn prev(&self) -> Route {
        let n = Route::ALL.len();
        Route::ALL[(self.nav_index() + n - 1) % n]
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::parse(s)
    }
}

/// Route change produced by `Navigator::navigate`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Route,
    pub to: Route,
}

/// Current page plus back history
/// Most back steps kept; older entries are dropped first
pub const HISTORY_LIMIT: usize = 32;

#[derive(Debug, Clone, Default)]
pub struct Navigator {
    current: Route,
    history: VecDeque<Route>,
}

impl Navigator {
    pub fn new(start: Route) -> Self {
        Self {
            current: start,
            history: VecDeque::new(),
        }
    }

    pub fn current(&self) -> Route {
        self.current
    }

    /// None when already on `to`
    pub fn navigate(&mut self, to: Route) -> Option<Transition> {
        if to == self.current {
            return None;
        }
        let from = self.current;
        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(from);
        self.current = to;
        tracing::debug!(from = %from, to = %to, "navigate");
        Some(Transition { from, to })
    }

    pub fn navigate_path(&mut self, path: &str) -> Result<Option<Transition>, RouteError> {
        let route = Route::parse(path)?;
        Ok(self.navigate(route))
    }

    pub fn back(&mut self) -> Option<Transition> {
        let to = self.history.pop_back()?;
        let from = self.current;
        self.current = to;
        Some(Transition { from, to })
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_path_parses_back() {
        for route in Route::ALL {
            assert_eq!(Route::parse(route.path()), Ok(route));
        }
    }

    #[test]
    fn test_parse_is_lenient_about_case_and_slash() {
        assert_eq!(Route::parse("/Profile"), Ok(Route::Profile));
        assert_eq!(Route::parse("/Register/"), Ok(Route::Register));
        assert_eq!(Route::parse("simulate"), Ok(Route::Simulate));
        assert_eq!(Route::parse(""), Ok(Route::Home));
        assert_eq!("/results".parse::<Route>(), Ok(Route::Results));
    }

    #[test]
    fn test_unknown_path() {
        assert_eq!(
            Route::parse("/forgot-password"),
            Err(RouteError::NotFound("/forgot-password".into()))
        );
    }

    #[test]
    fn test_nav_keys() {
        assert_eq!(Route::from_nav_key('1'), Some(Route::Home));
        assert_eq!(Route::from_nav_key('6'), Some(Route::Login));
        assert_eq!(Route::from_nav_key('0'), None);
        assert_eq!(Route::from_nav_key('7'), None);
        assert_eq!(Route::Login.next(), Route::Home);
        assert_eq!(Route::Home.prev(), Route::Login);
    }

    #[test]
    fn test_navigator_history() {
        let mut nav = Navigator::new(Route::Home);
        assert!(nav.navigate(Route::Home).is_none());
        let t = nav.navigate(Route::Simulate).unwrap();
        assert_eq!((t.from, t.to), (Route::Home, Route::Simulate));
        nav.navigate_path("/Profile").unwrap();
        assert!(nav.navigate_path("/nope").is_err());
        assert_eq!(nav.back().map(|t| t.to), Some(Route::Simulate));
        assert_eq!(nav.back().map(|t| t.to), Some(Route::Home));
        assert!(nav.back().is_none());
        assert!(!nav.can_go_back());
    }

    #[test]
    fn test_history_is_capped() {
        let mut nav = Navigator::new(Route::Home);
        for _ in 0..1000 {
            let next = nav.current().next();
            nav.navigate(next);
        }
        assert!(nav.can_go_back());

        let mut steps = 0;
        while nav.back().is_some() {
            steps += 1;
        }
        assert_eq!(steps, HISTORY_LIMIT);
    }
}
