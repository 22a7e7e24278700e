use serde::{Deserialize, Serialize};

use crate::types::SessionId;

/// Body of a successful `POST /create-new-session` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    /// The newly issued session.
    pub session_id: SessionId,

    /// Human-readable confirmation from the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
