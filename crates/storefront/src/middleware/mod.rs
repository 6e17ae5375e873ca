//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Session lock (one request at a time per session cookie)
//! 5. Session layer (tower-sessions with in-memory store)
//!
//! The [`Shop`] extractor then loads each shopper's snapshot from the session.

pub mod request_id;
pub mod session;
pub mod session_lock;
pub mod shop;

pub use request_id::request_id_middleware;
pub use session::{
    PURGE_INTERVAL, ShopperSessionStore, create_session_layer, spawn_expired_session_purge,
};
pub use session_lock::{SessionLocks, serialize_per_session};
pub use shop::{Chrome, SNAPSHOT_KEY, Shop};
