//! The agent service seam.
//!
//! [`AgentService`] is the set of remote capabilities the conversation
//! controller depends on. [`AgentClient`](crate::AgentClient) implements it
//! over HTTP; tests substitute in-memory fakes.

use std::sync::Arc;

use crate::error::Result;
use crate::types::{AgentRequest, AgentResponse, SessionId};

/// Remote operations offered by an agent service.
#[async_trait::async_trait]
pub trait AgentService: Send + Sync {
    /// Asks the service to open a new session and returns its identifier.
    async fn create_session(&self) -> Result<SessionId>;

    /// Deletes a session on the service.
    async fn delete_session(&self, session_id: &SessionId) -> Result<()>;

    /// Runs one query against the agent within a session.
    async fn run(&self, request: &AgentRequest) -> Result<AgentResponse>;
}

#[async_trait::async_trait]
impl<S: AgentService + ?Sized> AgentService for Arc<S> {
    async fn create_session(&self) -> Result<SessionId> {
        (**self).create_session().await
    }

    async fn delete_session(&self, session_id: &SessionId) -> Result<()> {
        (**self).delete_session(session_id).await
    }

    async fn run(&self, request: &AgentRequest) -> Result<AgentResponse> {
        (**self).run(request).await
    }
}
