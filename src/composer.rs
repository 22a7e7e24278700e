//! Draft text and pending attachments.

use crate::types::Attachment;

/// Marker that introduces the attachment list in an outgoing message.
pub const FILES_MARKER: &str = "📎 Files: ";

/// The not-yet-sent draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composer {
    text: String,
    attachments: Vec<Attachment>,
}

impl Composer {
    /// Creates an empty composer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the draft text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// The draft text as typed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Appends files to the pending list.
    pub fn add_files(&mut self, files: impl IntoIterator<Item = Attachment>) {
        self.attachments.extend(files);
    }

    /// Removes the attachment at `index`, returning it.
    ///
    /// Out-of-range indices leave the list untouched.
    pub fn remove_file(&mut self, index: usize) -> Option<Attachment> {
        if index < self.attachments.len() {
            Some(self.attachments.remove(index))
        } else {
            None
        }
    }

    /// The pending attachments in the order they were added.
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Resets text and attachments.
    pub fn clear(&mut self) {
        self.text.clear();
        self.attachments.clear();
    }

    /// Returns true if there is nothing worth sending.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.attachments.is_empty()
    }

    /// Builds the outgoing message text.
    ///
    /// The trimmed draft is followed, when files are attached, by a new line
    /// listing their names. Returns `None` when [`is_empty`](Self::is_empty).
    pub fn compose(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let mut composed = self.text.trim().to_string();
        if !self.attachments.is_empty() {
            let names = self
                .attachments
                .iter()
                .map(|attachment| attachment.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            composed.push('\n');
            composed.push_str(FILES_MARKER);
            composed.push_str(&names);
        }
        Some(composed)
    }
}
