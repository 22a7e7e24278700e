use serde::{Deserialize, Serialize};

use crate::types::SessionId;

/// Body of a `POST /agent/run` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRequest {
    /// The composed user message.
    pub query: String,

    /// The session the query belongs to.
    pub session_id: SessionId,
}

impl AgentRequest {
    /// Creates a new request for `session_id`.
    pub fn new(query: impl Into<String>, session_id: SessionId) -> Self {
        Self {
            query: query.into(),
            session_id,
        }
    }
}
