// Public modules
pub mod chat;
pub mod client;
pub mod composer;
pub mod controller;
pub mod error;
pub mod observability;
pub mod service;
pub mod store;
pub mod types;

// Re-exports
pub use client::AgentClient;
pub use composer::Composer;
pub use controller::{
    Controller, Notification, NotificationLevel, SendCompletion, SendTicket, reply_message,
};
pub use error::{Error, Result};
pub use observability::register_biometrics;
pub use service::AgentService;
pub use store::SessionStore;
pub use types::*;
