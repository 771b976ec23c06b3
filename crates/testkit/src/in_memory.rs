//! In-memory adapter implementations for port contracts.
//!
//! These implementations are intended for:
//! - Unit/integration tests
//! - Deterministic contract tests for the ports layer

use std::sync::Arc;
use tokio::sync::RwLock;
use xrm_connection_ports::{
    BoxFuture, DiscoveryPort, DiscoveryRequest, EnvironmentDescriptor,
};
use xrm_connection_shared::{ErrorEnvelope, Result};

#[derive(Debug, Default)]
struct DiscoveryState {
    environments: Vec<EnvironmentDescriptor>,
    requests: Vec<DiscoveryRequest>,
    failure: Option<ErrorEnvelope>,
}

/// Discovery double that answers with a fixed set of environments and
/// remembers every request it received.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDiscovery {
    state: Arc<RwLock<DiscoveryState>>,
}

impl InMemoryDiscovery {
    /// Create a double that returns `environments`.
    #[must_use]
    pub fn new(environments: Vec<EnvironmentDescriptor>) -> Self {
        Self {
            state: Arc::new(RwLock::new(DiscoveryState {
                environments,
                ..DiscoveryState::default()
            })),
        }
    }

    /// Make every subsequent call fail with `error`.
    pub async fn fail_with(&self, error: ErrorEnvelope) {
        self.state.write().await.failure = Some(error);
    }

    /// Requests received so far, oldest first.
    pub async fn requests(&self) -> Vec<DiscoveryRequest> {
        self.state.read().await.requests.clone()
    }
}

impl DiscoveryPort for InMemoryDiscovery {
    fn discover(
        &self,
        request: DiscoveryRequest,
    ) -> BoxFuture<'_, Result<Vec<EnvironmentDescriptor>>> {
        Box::pin(async move {
            let mut state = self.state.write().await;
            state.requests.push(request);
            match &state.failure {
                Some(error) => Err(error.clone()),
                None => Ok(state.environments.clone()),
            }
        })
    }
}
