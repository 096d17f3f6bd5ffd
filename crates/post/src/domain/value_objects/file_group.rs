// crates/post/src/domain/value_objects/file_group.rs

use serde::{Deserialize, Serialize};
use shared_kernel::domain::value_objects::Url;
use crate::domain::value_objects::AttachmentKind;

/// Groupe `(type, urls)` : toutes les URLs d'un même type de pièce jointe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileGroup {
    #[serde(rename = "type")]
    pub kind: AttachmentKind,
    pub urls: Vec<Url>,
}

impl FileGroup {
    pub fn new(kind: AttachmentKind, urls: Vec<Url>) -> Self {
        Self { kind, urls }
    }

    /// Aplatis une collection de groupes en liste d'URLs
    pub fn flatten(groups: &[FileGroup]) -> Vec<Url> {
        groups.iter().flat_map(|g| g.urls.iter().cloned()).collect()
    }
}
