use std::path::{Path, PathBuf};

/// A file the user picked but has not sent yet.
///
/// Only the name travels with the outgoing message; the handle is kept so a
/// front end can show or re-open the file while composing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Display name of the file.
    pub name: String,

    /// The local handle the file was picked from.
    pub raw_handle: PathBuf,
}

impl Attachment {
    /// Creates an attachment with an explicit name.
    pub fn new(name: impl Into<String>, raw_handle: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            raw_handle: raw_handle.into(),
        }
    }

    /// Creates an attachment named after the final component of `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self::new(name, path)
    }
}
