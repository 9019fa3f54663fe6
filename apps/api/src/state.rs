use std::sync::Arc;

use crate::agent::Agent;

/// Shared application state injected into all route handlers via Axum
/// extractors. Everything inside is loaded once at startup and read-only
/// thereafter, so handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub agent: Arc<Agent>,
}
