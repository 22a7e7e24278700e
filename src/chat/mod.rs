//! Terminal front end for interactive conversations with an agent service.
//!
//! This module provides the pieces the `sindhu-chat` REPL is built from:
//!
//! - Slash commands for creating, switching, and deleting sessions
//! - File attachment management for the next message
//! - ANSI-styled transcript output
//!
//! # Architecture
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`commands`]: Slash command parsing
//! - [`render`]: Output rendering

mod commands;
mod config;
mod render;

pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{ChatArgs, ChatConfig};
pub use render::{
    EMPTY_CHAT, NO_SESSION_SELECTED, NO_SESSIONS, PlainTextRenderer, Renderer, THINKING,
    format_attachments, format_session_list,
};
