//! Per-session request serialization.
//!
//! Requests carrying the same session cookie run one at a time, from the
//! session load through the session save, so overlapping requests from one
//! browser never overwrite each other's snapshot. This layer must sit
//! outside the session layer.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use axum::{
    extract::{Request, State},
    http::header::COOKIE,
    middleware::Next,
    response::Response,
};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tower_sessions::cookie::Cookie;

use super::session::SESSION_COOKIE_NAME;
use crate::state::AppState;

/// One async lock per active session cookie.
#[derive(Debug, Default)]
pub struct SessionLocks {
    locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

/// Exclusive turn for one session; released on drop.
pub struct SessionTurn<'a> {
    locks: &'a SessionLocks,
    key: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl SessionLocks {
    /// Wait until no other request for `key` is in flight.
    pub async fn acquire(&self, key: String) -> SessionTurn<'_> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(locks.entry(key.clone()).or_default())
        };
        let guard = lock.lock_owned().await;
        SessionTurn {
            locks: self,
            key,
            guard: Some(guard),
        }
    }

    /// Number of sessions with a request in flight or waiting.
    #[must_use]
    pub fn active(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn release(&self, key: &str) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        if locks.get(key).is_some_and(|lock| Arc::strong_count(lock) == 1) {
            locks.remove(key);
        }
    }
}

impl Drop for SessionTurn<'_> {
    fn drop(&mut self) {
        self.guard.take();
        self.locks.release(&self.key);
    }
}

/// Middleware that runs requests for the same session one after another.
///
/// Requests without a session cookie start a fresh session and are not
/// serialized.
pub async fn serialize_per_session(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(key) = session_cookie(&request) else {
        return next.run(request).await;
    };

    let _turn = state.session_locks().acquire(key).await;
    next.run(request).await
}

fn session_cookie(request: &Request) -> Option<String> {
    request
        .headers()
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use axum::body::Body;

    use super::*;

    #[test]
    fn test_session_cookie_is_found_among_others() {
        let request = Request::get("/")
            .header(COOKIE, format!("theme=dark; {SESSION_COOKIE_NAME}=abc123"))
            .body(Body::empty())
            .unwrap();
        assert_eq!(session_cookie(&request).as_deref(), Some("abc123"));

        let bare = Request::get("/").body(Body::empty()).unwrap();
        assert_eq!(session_cookie(&bare), None);
    }

    #[tokio::test]
    async fn test_second_turn_waits_for_first() {
        let locks = Arc::new(SessionLocks::default());

        let first = locks.acquire("s1".to_string()).await;
        let waiter = {
            let locks = Arc::clone(&locks);
            tokio::spawn(async move {
                let _turn = locks.acquire("s1".to_string()).await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        drop(first);
        waiter.await.unwrap();
        assert_eq!(locks.active(), 0);
    }

    #[tokio::test]
    async fn test_other_sessions_do_not_wait() {
        let locks = SessionLocks::default();
        let _first = locks.acquire("s1".to_string()).await;
        let _second = locks.acquire("s2".to_string()).await;
        assert_eq!(locks.active(), 2);
    }
}
