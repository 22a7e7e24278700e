//! In-memory session store.
//!
//! The store owns the ordered session list, one transcript per session, and
//! the active-session pointer. The list and the transcript map always hold
//! exactly the same identifiers.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::types::{Message, SessionId};

/// Maximum number of characters of the first message shown in a title.
const TITLE_CHARS: usize = 25;

/// Sessions and their transcripts, most recent first.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Vec<SessionId>,
    conversations: HashMap<SessionId, Vec<Message>>,
    active: Option<SessionId>,
}

impl SessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `id` at the front of the list and makes it active.
    ///
    /// Adding an id that is already present changes nothing and returns
    /// false; in particular its transcript is kept.
    pub fn add_session(&mut self, id: SessionId) -> bool {
        if self.conversations.contains_key(&id) {
            return false;
        }
        self.sessions.insert(0, id.clone());
        self.conversations.insert(id.clone(), Vec::new());
        self.active = Some(id);
        debug_assert!(self.invariants_hold());
        true
    }

    /// Removes `id` and its transcript, clearing the active pointer if it
    /// referenced `id`.
    ///
    /// Returns false (and changes nothing) when `id` is not present.
    pub fn remove_session(&mut self, id: &SessionId) -> bool {
        if self.conversations.remove(id).is_none() {
            return false;
        }
        self.sessions.retain(|listed| listed != id);
        if self.active.as_ref() == Some(id) {
            self.active = None;
        }
        debug_assert!(self.invariants_hold());
        true
    }

    /// Appends `message` to the transcript of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSession`] if `id` is not in the store; the
    /// message is never silently dropped.
    pub fn append_message(&mut self, id: &SessionId, message: Message) -> Result<()> {
        match self.conversations.get_mut(id) {
            Some(conversation) => {
                conversation.push(message);
                Ok(())
            }
            None => Err(Error::unknown_session(id.clone())),
        }
    }

    /// Marks `id` as the active session.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSession`] if `id` is not listed.
    pub fn set_active(&mut self, id: &SessionId) -> Result<()> {
        if !self.contains(id) {
            return Err(Error::unknown_session(id.clone()));
        }
        self.active = Some(id.clone());
        Ok(())
    }

    /// The session list, most recent first.
    pub fn sessions(&self) -> &[SessionId] {
        &self.sessions
    }

    /// The active session, if any.
    pub fn active(&self) -> Option<&SessionId> {
        self.active.as_ref()
    }

    /// The transcript of `id`, if it is listed.
    pub fn conversation(&self, id: &SessionId) -> Option<&[Message]> {
        self.conversations.get(id).map(Vec::as_slice)
    }

    /// The transcript of the active session; empty when none is active.
    pub fn active_conversation(&self) -> &[Message] {
        self.active
            .as_ref()
            .and_then(|id| self.conversation(id))
            .unwrap_or(&[])
    }

    /// Returns true if `id` is listed.
    pub fn contains(&self, id: &SessionId) -> bool {
        self.conversations.contains_key(id)
    }

    /// Number of listed sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns true if no sessions are listed.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// A short label for `id`.
    ///
    /// Sessions with messages are titled by the first line of their first
    /// message; empty sessions by their id.
    pub fn title(&self, id: &SessionId) -> String {
        match self.conversation(id).and_then(|messages| messages.first()) {
            Some(first) => {
                let line = first.text.split('\n').next().unwrap_or_default();
                let snippet: String = line.chars().take(TITLE_CHARS).collect();
                format!("{snippet}...")
            }
            None => id.to_string(),
        }
    }

    /// Looks up a session by 1-based list position or by literal id.
    pub fn resolve(&self, selector: &str) -> Option<SessionId> {
        let selector = selector.trim();
        if let Some(found) = self.sessions.iter().find(|id| id.as_str() == selector) {
            return Some(found.clone());
        }
        let position = selector.parse::<usize>().ok()?;
        position
            .checked_sub(1)
            .and_then(|index| self.sessions.get(index))
            .cloned()
    }

    fn invariants_hold(&self) -> bool {
        self.sessions.len() == self.conversations.len()
            && self
                .sessions
                .iter()
                .all(|id| self.conversations.contains_key(id))
            && self.active.as_ref().is_none_or(|id| self.contains(id))
    }
}
