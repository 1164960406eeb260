use std::sync::Arc;

use crate::config::Config;
use crate::gen_client::TextGenerator;
use crate::store::DocumentStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    /// Pluggable generation client. Production wires `CohereClient`; tests stub it.
    pub generator: Arc<dyn TextGenerator>,
    pub config: Config,
}
