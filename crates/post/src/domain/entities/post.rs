// crates/post/src/domain/entities/post.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_kernel::domain::entities::{Entity, EntityMetadata};
use shared_kernel::domain::value_objects::{Counter, PostId, Url, UserId};
use shared_kernel::errors::{DomainError, Result};

use crate::domain::value_objects::FileGroup;

/// Post : contenu libre, deux collections de pièces jointes indépendantes et compteurs.
/// L'auteur est figé à la création.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    id: PostId,
    owner_id: UserId,
    content: String,
    media: Vec<FileGroup>,
    files: Vec<FileGroup>,
    like_count: Counter,
    repost_count: Counter,
    comment_count: Counter,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Post {
    /// Nouveau post, compteurs à zéro
    pub fn new(
        owner_id: UserId,
        content: impl Into<String>,
        media: Vec<FileGroup>,
        files: Vec<FileGroup>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: PostId::new(),
            owner_id,
            content: content.into(),
            media,
            files,
            like_count: Counter::zero(),
            repost_count: Counter::zero(),
            comment_count: Counter::zero(),
            created_at: now,
            updated_at: now,
        }
    }

    /// RESTAURATION depuis le store de référence
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: PostId,
        owner_id: UserId,
        content: String,
        media: Vec<FileGroup>,
        files: Vec<FileGroup>,
        like_count: Counter,
        repost_count: Counter,
        comment_count: Counter,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner_id,
            content,
            media,
            files,
            like_count,
            repost_count,
            comment_count,
            created_at,
            updated_at,
        }
    }

    // --- Invariants ---

    /// Seul l'auteur peut muter ou supprimer son post
    pub fn ensure_owned_by(&self, caller: &UserId) -> Result<()> {
        if &self.owner_id != caller {
            return Err(DomainError::PermissionDenied {
                reason: format!("user {} does not own post {}", caller, self.id),
            });
        }
        Ok(())
    }

    /// Remplacement complet : des groupes vides vident la collection.
    pub fn revise(
        &mut self,
        content: impl Into<String>,
        media: Vec<FileGroup>,
        files: Vec<FileGroup>,
        now: DateTime<Utc>,
    ) {
        self.content = content.into();
        self.media = media;
        self.files = files;
        self.updated_at = now;
    }

    // --- Getters ---

    pub fn owner_id(&self) -> &UserId { &self.owner_id }
    pub fn content(&self) -> &str { &self.content }
    pub fn media(&self) -> &[FileGroup] { &self.media }
    pub fn files(&self) -> &[FileGroup] { &self.files }
    pub fn like_count(&self) -> Counter { self.like_count }
    pub fn repost_count(&self) -> Counter { self.repost_count }
    pub fn comment_count(&self) -> Counter { self.comment_count }

    pub fn media_urls(&self) -> Vec<Url> {
        FileGroup::flatten(&self.media)
    }

    pub fn files_urls(&self) -> Vec<Url> {
        FileGroup::flatten(&self.files)
    }

    /// Union des deux collections
    pub fn all_urls(&self) -> Vec<Url> {
        let mut urls = self.media_urls();
        urls.extend(self.files_urls());
        urls
    }
}

impl EntityMetadata for Post {
    fn entity_name() -> &'static str {
        "Post"
    }
}

impl Entity for Post {
    type Id = PostId;

    fn id(&self) -> &PostId { &self.id }
    fn created_at(&self) -> DateTime<Utc> { self.created_at }
    fn updated_at(&self) -> DateTime<Utc> { self.updated_at }
}
