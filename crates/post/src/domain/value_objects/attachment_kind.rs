// crates/post/src/domain/value_objects/attachment_kind.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Classification fermée d'une pièce jointe, dérivée de l'extension à l'upload.
/// L'ordre des variantes fixe l'ordre des groupes dans un post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Image,
    Video,
    File,
}

impl AttachmentKind {
    /// Table fixe, insensible à la casse. Tout le reste est un `File`.
    pub fn from_filename(name: &str) -> Self {
        let extension = Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("jpg" | "jpeg" | "png" | "gif" | "webp") => Self::Image,
            Some("mp4" | "mov" | "avi" | "mkv") => Self::Video,
            _ => Self::File,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::File => "file",
        }
    }
}

impl fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
