use serde::{Deserialize, Serialize};

use crate::types::SessionId;

/// Body of a successful `POST /agent/run` response.
///
/// Every field is optional on the wire; the controller decides what an
/// empty reply looks like in the transcript.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentResponse {
    /// The agent's final reply text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,

    /// The session the service ran the query in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<SessionId>,

    /// Path of a generated document, relative to the service base URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

impl AgentResponse {
    /// Creates a response carrying only reply text.
    pub fn text(response: impl Into<String>) -> Self {
        Self {
            response: Some(response.into()),
            ..Self::default()
        }
    }

    /// Returns the reply text if it is present and non-empty.
    pub fn reply(&self) -> Option<&str> {
        self.response.as_deref().filter(|text| !text.is_empty())
    }
}
