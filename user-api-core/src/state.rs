use axum::extract::FromRef;

use crate::registry::UserRegistry;

/// Router state shared by every handler.
#[derive(Clone, Default)]
pub struct AppState {
    pub registry: UserRegistry,
}

impl AppState {
    pub fn new(registry: UserRegistry) -> Self {
        Self { registry }
    }
}

impl FromRef<AppState> for UserRegistry {
    fn from_ref(state: &AppState) -> Self {
        state.registry.clone()
    }
}
