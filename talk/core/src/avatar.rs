//! Avatars
//!
//! Each participant has one avatar slot holding either the placeholder or a
//! self-contained `data:` URI read from a local image file. Slots are
//! replaced wholesale; nothing is kept of the previous image.
//!
//! [`FileInput`] models the hidden file control behind each avatar button: it
//! only reports a change when the selected path differs from its current
//! value, which is why it has to be reset after every pick.

use std::fmt;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

use crate::message::Sender;

/// Transparent 1x1 GIF shown until an avatar is picked
pub const PLACEHOLDER_URI: &str =
    "data:image/gif;base64,R0lGODlhAQABAIAAAAAAAP///ywAAAAAAQABAAACAUwAOw==";

/// Media types the avatar inputs accept
pub const ACCEPT: &str = "image/*";

/// Errors that can occur when loading an avatar file
#[derive(Debug, Error)]
pub enum AvatarError {
    /// Failed to read the file
    #[error("Failed to read avatar file at {path}: {source}")]
    Read {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// The file is not an image
    #[error("{path} is not an image ({mime})")]
    NotAnImage {
        /// The rejected path
        path: PathBuf,
        /// The media type guessed for it
        mime: String,
    },
}

/// An embeddable `data:<mime>;base64,<payload>` image
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataUri {
    uri: String,
    mime_len: usize,
}

impl DataUri {
    /// Encode raw image bytes
    #[must_use]
    pub fn encode(mime: &str, bytes: &[u8]) -> Self {
        Self {
            uri: format!("data:{};base64,{}", mime, STANDARD.encode(bytes)),
            mime_len: mime.len(),
        }
    }

    /// The full URI
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.uri
    }

    /// The media type, e.g. `image/png`
    #[must_use]
    pub fn mime(&self) -> &str {
        &self.uri[5..5 + self.mime_len]
    }

    /// The base64 payload after the comma
    #[must_use]
    pub fn payload(&self) -> &str {
        // "data:" + mime + ";base64,"
        &self.uri[5 + self.mime_len + 8..]
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}

/// Contents of one avatar slot
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AvatarImage {
    /// Nothing picked yet
    #[default]
    Placeholder,
    /// A loaded image
    Data(DataUri),
}

impl AvatarImage {
    /// The image as an embeddable URI
    #[must_use]
    pub fn uri(&self) -> &str {
        match self {
            Self::Placeholder => PLACEHOLDER_URI,
            Self::Data(data) => data.as_str(),
        }
    }

    /// Whether this is the placeholder
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }
}

/// The two avatar slots
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AvatarStore {
    bot: AvatarImage,
    me: AvatarImage,
}

impl AvatarStore {
    /// Both slots start as the placeholder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current image for a slot
    #[must_use]
    pub fn get(&self, slot: Sender) -> &AvatarImage {
        match slot {
            Sender::Bot => &self.bot,
            Sender::Me => &self.me,
        }
    }

    /// Replace a slot wholesale
    pub fn replace(&mut self, slot: Sender, image: AvatarImage) {
        match slot {
            Sender::Bot => self.bot = image,
            Sender::Me => self.me = image,
        }
    }
}

/// The hidden file control behind an avatar button
#[derive(Clone, Debug, Default)]
pub struct FileInput {
    value: Option<PathBuf>,
}

impl FileInput {
    /// Create an empty input
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Media types this input accepts
    #[must_use]
    pub fn accept(&self) -> &'static str {
        ACCEPT
    }

    /// Currently selected path
    #[must_use]
    pub fn value(&self) -> Option<&Path> {
        self.value.as_deref()
    }

    /// Select a file, returning it only if the selection changed
    pub fn select(&mut self, path: impl Into<PathBuf>) -> Option<PathBuf> {
        let path = path.into();
        if self.value.as_ref() == Some(&path) {
            return None;
        }
        self.value = Some(path.clone());
        Some(path)
    }

    /// Clear the selection so the same file can fire again
    pub fn reset(&mut self) {
        self.value = None;
    }
}

/// Read an image file into a data URI
///
/// # Errors
///
/// Returns [`AvatarError::NotAnImage`] when the extension does not map to an
/// `image/*` type and [`AvatarError::Read`] when the file cannot be read.
pub async fn read_avatar(path: impl AsRef<Path>) -> Result<AvatarImage, AvatarError> {
    let path = path.as_ref();

    let mime = mime_guess::from_path(path).first_or_octet_stream();
    if mime.type_() != mime_guess::mime::IMAGE {
        return Err(AvatarError::NotAnImage {
            path: path.to_path_buf(),
            mime: mime.essence_str().to_string(),
        });
    }

    let bytes = tokio::fs::read(path).await.map_err(|e| AvatarError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(AvatarImage::Data(DataUri::encode(mime.essence_str(), &bytes)))
}
