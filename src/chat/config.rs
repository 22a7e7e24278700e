//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and configuration
//! structures for controlling the chat front end.

use std::env;
use std::time::Duration;

use arrrg_derive::CommandLine;

use crate::client::{API_URL_ENV, AgentClient, DEFAULT_API_URL, DEFAULT_TIMEOUT};
use crate::error::Result;

/// Command-line arguments for the sindhu-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Base address of the agent service.
    #[arrrg(
        optional,
        "Agent service URL (default: $SINDHU_API_URL or http://127.0.0.1:8000)",
        "URL"
    )]
    pub url: Option<String>,

    /// Seconds to wait for a reply before giving up.
    #[arrrg(optional, "Seconds to wait for a reply (default: 60)", "SECONDS")]
    pub timeout_secs: Option<u64>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

/// Configuration for a chat front end.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments with appropriate defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Base address of the agent service.
    pub base_url: String,

    /// How long a send waits for its reply.
    pub timeout: Duration,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - URL: http://127.0.0.1:8000/
    /// - Timeout: 60 seconds
    /// - Color: enabled
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            use_color: true,
        }
    }

    /// Sets the service base address.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the reply timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }

    /// Builds an HTTP client for the configured service.
    pub fn client(&self) -> Result<AgentClient> {
        AgentClient::with_options(Some(self.base_url.clone()), Some(self.timeout))
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ChatArgs> for ChatConfig {
    fn from(args: ChatArgs) -> Self {
        let base_url = args
            .url
            .or_else(|| env::var(API_URL_ENV).ok())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        ChatConfig {
            base_url,
            timeout: args
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TIMEOUT),
            use_color: !args.no_color,
        }
    }
}
