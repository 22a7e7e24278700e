// Public modules
pub mod agent_request;
pub mod agent_response;
pub mod attachment;
pub mod create_session_response;
pub mod message;
pub mod session_id;

// Re-exports
pub use agent_request::AgentRequest;
pub use agent_response::AgentResponse;
pub use attachment::Attachment;
pub use create_session_response::CreateSessionResponse;
pub use message::{Message, Sender};
pub use session_id::SessionId;
