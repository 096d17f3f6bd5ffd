// crates/post/src/domain/repositories/post_repository_stub.rs

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use async_trait::async_trait;
use shared_kernel::domain::entities::{Entity, EntityMetadata};
use shared_kernel::domain::value_objects::PostId;
use shared_kernel::errors::{DomainError, Result};
use shared_kernel::infrastructure::pagination::PageRequest;

use crate::domain::entities::Post;
use crate::domain::repositories::{PostFilter, PostRepository};

/// Store en mémoire avec compteurs d'appels et injection d'erreurs.
#[derive(Default)]
pub struct PostRepositoryStub {
    pub posts: Mutex<HashMap<PostId, Post>>,
    /// Renvoyée par create / update / delete
    pub error_to_return: Mutex<Option<DomainError>>,
    /// Renvoyée par fetch / list
    pub read_error_to_return: Mutex<Option<DomainError>>,
    /// Latence simulée des lectures
    pub read_delay: Mutex<Option<Duration>>,
    pub create_calls: AtomicUsize,
    pub fetch_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    pub list_calls: AtomicUsize,
}

impl PostRepositoryStub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_posts(posts: impl IntoIterator<Item = Post>) -> Self {
        let stub = Self::default();
        stub.posts
            .lock()
            .unwrap()
            .extend(posts.into_iter().map(|p| (*p.id(), p)));
        stub
    }

    pub fn get(&self, id: &PostId) -> Option<Post> {
        self.posts.lock().unwrap().get(id).cloned()
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn write_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
            + self.update_calls.load(Ordering::SeqCst)
            + self.delete_calls.load(Ordering::SeqCst)
    }

    fn write_error(&self) -> Result<()> {
        match self.error_to_return.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn read_guard(&self) -> Result<()> {
        let delay = *self.read_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        match self.read_error_to_return.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PostRepository for PostRepositoryStub {
    async fn create(&self, post: &Post) -> Result<()> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.write_error()?;
        self.posts.lock().unwrap().insert(*post.id(), post.clone());
        Ok(())
    }

    async fn fetch(&self, id: &PostId) -> Result<Option<Post>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.read_guard().await?;
        Ok(self.get(id))
    }

    async fn update(&self, post: &Post) -> Result<()> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.write_error()?;
        let mut posts = self.posts.lock().unwrap();
        match posts.get_mut(post.id()) {
            Some(slot) => {
                *slot = post.clone();
                Ok(())
            }
            None => Err(Post::not_found(post.id())),
        }
    }

    async fn delete(&self, id: &PostId) -> Result<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.write_error()?;
        self.posts
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| Post::not_found(id))
    }

    async fn list(&self, filter: &PostFilter, page: PageRequest) -> Result<(Vec<Post>, u64)> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.read_guard().await?;

        let mut matching: Vec<Post> = self
            .posts
            .lock()
            .unwrap()
            .values()
            .filter(|p| filter.owner_id.map_or(true, |owner| p.owner_id() == &owner))
            .cloned()
            .collect();

        // Tri par date de création décroissante, l'id départage
        matching.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(a.id()))
        });

        let total = matching.len() as u64;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let items = matching
            .into_iter()
            .skip(offset)
            .take(page.limit as usize)
            .collect();

        Ok((items, total))
    }
}
