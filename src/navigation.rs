use std::fmt;
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// Application entry points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Login,
    Register,
    Search,
    Property(i64),
    NewProperty,
    EditProperty(i64),
    Profile,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => f.write_str("/"),
            Route::Login => f.write_str("/login"),
            Route::Register => f.write_str("/register"),
            Route::Search => f.write_str("/search"),
            Route::Property(id) => write!(f, "/property/{id}"),
            Route::NewProperty => f.write_str("/property/new"),
            Route::EditProperty(id) => write!(f, "/property/{id}/edit"),
            Route::Profile => f.write_str("/profile"),
        }
    }
}

/// Something that can move the user to another entry point
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Records the current route
#[derive(Debug, Default)]
pub struct RouteState {
    current: Mutex<Route>,
}

impl RouteState {
    pub fn new(start: Route) -> Self {
        Self {
            current: Mutex::new(start),
        }
    }

    pub fn current(&self) -> Route {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Navigator for RouteState {
    fn navigate(&self, route: Route) {
        debug!("Navigating to {}", route);
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = route;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_last_route() {
        let state = RouteState::new(Route::Search);
        state.navigate(Route::EditProperty(4));

        assert_eq!(state.current(), Route::EditProperty(4));
        assert_eq!(state.current().to_string(), "/property/4/edit");
    }
}
