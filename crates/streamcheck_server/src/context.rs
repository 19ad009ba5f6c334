use std::sync::Arc;

use streamcheck_engine::Verify;

use crate::RequestLimits;

/// Shared state handed to every route.
#[derive(Clone)]
pub struct AppContext {
    pub verifier: Arc<dyn Verify>,
    pub limits: RequestLimits,
}

impl AppContext {
    pub fn new(verifier: Arc<dyn Verify>, limits: RequestLimits) -> Self {
        Self { verifier, limits }
    }
}
