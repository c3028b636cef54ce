use crate::navigation::{Navigator, Route};
use crate::session::AuthSession;
use reqwest::{Method, StatusCode};
use std::sync::Arc;
use tracing::warn;

/// Hook run on every response before the caller sees it
pub trait ResponseInterceptor: Send + Sync {
    fn on_response(&self, method: &Method, url: &str, status: StatusCode);
}

/// Ends the session and sends the user to the login entry point whenever
/// the backend answers 401, whichever call produced it.
pub struct UnauthorizedRedirect {
    session: Arc<AuthSession>,
    navigator: Arc<dyn Navigator>,
}

impl UnauthorizedRedirect {
    pub fn new(session: Arc<AuthSession>, navigator: Arc<dyn Navigator>) -> Self {
        Self { session, navigator }
    }
}

impl ResponseInterceptor for UnauthorizedRedirect {
    fn on_response(&self, method: &Method, url: &str, status: StatusCode) {
        if status != StatusCode::UNAUTHORIZED {
            return;
        }
        warn!("{} {} returned 401, clearing session", method, url);
        self.session.logout();
        self.navigator.navigate(Route::Login);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, SessionUser};
    use crate::navigation::RouteState;
    use crate::session::{KeyValueStore, MemoryStore, SESSION_KEY};

    fn signed_in() -> (Arc<MemoryStore>, Arc<AuthSession>) {
        let user = SessionUser {
            id: 1,
            email: "a@b.co".to_string(),
            role: Role::Business,
            token: "t".to_string(),
        };
        let store = Arc::new(MemoryStore::with_entry(
            SESSION_KEY,
            &serde_json::to_string(&user).unwrap(),
        ));
        let session = Arc::new(AuthSession::new(store.clone()));
        (store, session)
    }

    #[test]
    fn unauthorized_clears_session_and_redirects() {
        let (store, session) = signed_in();
        let routes = Arc::new(RouteState::new(Route::Profile));
        let redirect = UnauthorizedRedirect::new(session.clone(), routes.clone());

        redirect.on_response(&Method::GET, "/api/properties", StatusCode::UNAUTHORIZED);

        assert!(!session.is_authenticated());
        assert_eq!(store.get(SESSION_KEY).unwrap(), None);
        assert_eq!(routes.current(), Route::Login);
    }

    #[test]
    fn other_statuses_pass_through() {
        let (_, session) = signed_in();
        let routes = Arc::new(RouteState::new(Route::Search));
        let redirect = UnauthorizedRedirect::new(session.clone(), routes.clone());

        for status in [StatusCode::OK, StatusCode::FORBIDDEN, StatusCode::NOT_FOUND] {
            redirect.on_response(&Method::DELETE, "/api/properties/1", status);
        }

        assert!(session.is_authenticated());
        assert_eq!(routes.current(), Route::Search);
    }
}
