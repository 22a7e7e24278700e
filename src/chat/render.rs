//! Output rendering for the chat application.
//!
//! This module provides a trait-based rendering abstraction that allows
//! for different output styles. The default implementation uses ANSI
//! escape codes to tell user messages, agent replies, and alerts apart.

use std::io::{self, Stdout, Write};

use crate::composer::Composer;
use crate::controller::{Notification, NotificationLevel};
use crate::store::SessionStore;
use crate::types::{Message, Sender};

/// ANSI escape code for dim text (used for the busy indicator).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code for bold text.
const ANSI_BOLD: &str = "\x1b[1m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for cyan text (used for the user label).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for green text (used for the agent label).
const ANSI_GREEN: &str = "\x1b[32m";

/// ANSI escape code for yellow text (used for alerts).
const ANSI_YELLOW: &str = "\x1b[33m";

/// ANSI escape code for red text (used for errors).
const ANSI_RED: &str = "\x1b[31m";

/// Shown when no session exists yet.
pub const NO_SESSIONS: &str = "No sessions yet";
/// Shown when no session is active.
pub const NO_SESSION_SELECTED: &str = "No session selected";
/// Shown for an active session without messages.
pub const EMPTY_CHAT: &str = "Start the conversation — say hi!";
/// Shown while a reply is outstanding.
pub const THINKING: &str = "Thinking…";

/// Trait for rendering chat output.
pub trait Renderer: Send {
    /// Print one transcript entry.
    fn print_message(&mut self, message: &Message);

    /// Print an error message.
    fn print_error(&mut self, error: &str);

    /// Print an informational message.
    fn print_info(&mut self, info: &str);

    /// Print a notification raised by the controller.
    fn print_notification(&mut self, notification: &Notification);

    /// Indicate that a reply is outstanding.
    fn print_busy(&mut self);

    /// Print the active session's header and transcript.
    fn print_transcript(&mut self, store: &SessionStore, pending: bool) {
        match store.active() {
            Some(active) => {
                self.print_info(&format!("Session: {active}"));
                let messages = store.active_conversation();
                if messages.is_empty() && !pending {
                    self.print_info(EMPTY_CHAT);
                }
                for message in messages {
                    self.print_message(message);
                }
                if pending {
                    self.print_busy();
                }
            }
            None => self.print_info(NO_SESSION_SELECTED),
        }
    }
}

/// Formats the session list, marking the active session.
pub fn format_session_list(store: &SessionStore) -> String {
    if store.is_empty() {
        return NO_SESSIONS.to_string();
    }
    store
        .sessions()
        .iter()
        .enumerate()
        .map(|(index, id)| {
            let marker = if store.active() == Some(id) { '*' } else { ' ' };
            format!("{marker} {:>2}. {}", index + 1, store.title(id))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Formats the pending attachments, numbered from one.
pub fn format_attachments(composer: &Composer) -> String {
    if composer.attachments().is_empty() {
        return "No files attached".to_string();
    }
    composer
        .attachments()
        .iter()
        .enumerate()
        .map(|(index, attachment)| {
            format!(
                "  {}. {} ({})",
                index + 1,
                attachment.name,
                attachment.raw_handle.display()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Plain text renderer with optional ANSI styling.
pub struct PlainTextRenderer {
    stdout: Stdout,
    use_color: bool,
}

impl PlainTextRenderer {
    /// Creates a new PlainTextRenderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self::with_color(true)
    }

    /// Creates a new PlainTextRenderer with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self {
            stdout: io::stdout(),
            use_color,
        }
    }

    fn flush(&mut self) {
        let _ = self.stdout.flush();
    }

    fn styled(&self, style: &str, text: &str) -> String {
        if self.use_color {
            format!("{style}{text}{ANSI_RESET}")
        } else {
            text.to_string()
        }
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlainTextRenderer {
    fn print_message(&mut self, message: &Message) {
        let color = match message.sender {
            Sender::User => ANSI_CYAN,
            Sender::Bot => ANSI_GREEN,
        };
        let label = self.styled(color, &format!("{}:", message.sender.label()));
        println!("{label} {}", message.text);
        if let Some(url) = &message.download_url {
            println!("  {} {url}", self.styled(ANSI_BOLD, "Download:"));
        }
        self.flush();
    }

    fn print_error(&mut self, error: &str) {
        eprintln!("{}", self.styled(ANSI_RED, &format!("Error: {error}")));
    }

    fn print_info(&mut self, info: &str) {
        println!("{info}");
        self.flush();
    }

    fn print_notification(&mut self, notification: &Notification) {
        match notification.level {
            NotificationLevel::Alert => {
                let style = format!("{ANSI_BOLD}{ANSI_YELLOW}");
                eprintln!("{}", self.styled(&style, &format!("! {notification}")));
            }
            NotificationLevel::Info => self.print_info(&notification.text),
        }
    }

    fn print_busy(&mut self) {
        println!("{}", self.styled(ANSI_DIM, THINKING));
        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Attachment, SessionId};

    #[derive(Default)]
    struct RecordingRenderer {
        lines: Vec<String>,
    }

    impl Renderer for RecordingRenderer {
        fn print_message(&mut self, message: &Message) {
            self.lines
                .push(format!("{}: {}", message.sender.label(), message.text));
        }

        fn print_error(&mut self, error: &str) {
            self.lines.push(format!("error: {error}"));
        }

        fn print_info(&mut self, info: &str) {
            self.lines.push(info.to_string());
        }

        fn print_notification(&mut self, notification: &Notification) {
            self.lines.push(format!("notice: {notification}"));
        }

        fn print_busy(&mut self) {
            self.lines.push(THINKING.to_string());
        }
    }

    #[test]
    fn renderer_default_has_color() {
        let renderer = PlainTextRenderer::new();
        assert!(renderer.use_color);
        assert_eq!(renderer.styled(ANSI_RED, "x"), "\x1b[31mx\x1b[0m");
    }

    #[test]
    fn renderer_without_color() {
        let renderer = PlainTextRenderer::with_color(false);
        assert!(!renderer.use_color);
        assert_eq!(renderer.styled(ANSI_RED, "x"), "x");
    }

    #[test]
    fn session_list_marks_active() {
        let mut store = SessionStore::new();
        assert_eq!(format_session_list(&store), NO_SESSIONS);

        store.add_session(SessionId::new("s1"));
        store.add_session(SessionId::new("s2"));
        store
            .append_message(&SessionId::new("s1"), Message::user("hello there"))
            .unwrap();
        assert_eq!(
            format_session_list(&store),
            "*  1. s2\n   2. hello there..."
        );
    }

    #[test]
    fn attachment_list_is_numbered() {
        let mut composer = Composer::new();
        assert_eq!(format_attachments(&composer), "No files attached");
        composer.add_files([Attachment::new("a.png", "/tmp/a.png")]);
        assert_eq!(format_attachments(&composer), "  1. a.png (/tmp/a.png)");
    }

    #[test]
    fn transcript_states() {
        let mut renderer = RecordingRenderer::default();
        let mut store = SessionStore::new();
        renderer.print_transcript(&store, false);
        assert_eq!(renderer.lines, vec![NO_SESSION_SELECTED]);

        renderer.lines.clear();
        store.add_session(SessionId::new("s1"));
        renderer.print_transcript(&store, false);
        assert_eq!(renderer.lines, vec!["Session: s1", EMPTY_CHAT]);

        renderer.lines.clear();
        store
            .append_message(&SessionId::new("s1"), Message::user("hi"))
            .unwrap();
        renderer.print_transcript(&store, true);
        assert_eq!(renderer.lines, vec!["Session: s1", "You: hi", THINKING]);
    }
}
