// crates/post/src/application/create_post/create_post_use_case.rs

use std::sync::Arc;
use shared_kernel::application::ports::MessageProducer;
use shared_kernel::clock::Clock;
use shared_kernel::domain::entities::Entity;
use shared_kernel::domain::value_objects::PostId;
use shared_kernel::errors::Result;

use crate::application::create_post::CreatePostCommand;
use crate::application::event_publisher::publish_best_effort;
use crate::application::upload_attachments::AttachmentUploader;
use crate::domain::entities::Post;
use crate::domain::events::PostEvent;
use crate::domain::repositories::PostRepository;

pub struct CreatePostUseCase {
    repo: Arc<dyn PostRepository>,
    uploader: AttachmentUploader,
    producer: Arc<dyn MessageProducer>,
    clock: Arc<dyn Clock>,
}

impl CreatePostUseCase {
    pub fn new(
        repo: Arc<dyn PostRepository>,
        uploader: AttachmentUploader,
        producer: Arc<dyn MessageProducer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { repo, uploader, producer, clock }
    }

    pub async fn execute(&self, cmd: CreatePostCommand) -> Result<PostId> {
        // 1. Uploads : l'échec d'un des deux lots annule la création
        let (media, files) = self.uploader.upload_groups(&cmd.media, &cmd.files).await?;

        // 2. Création via le domaine (compteurs à zéro)
        let now = self.clock.now();
        let post = Post::new(cmd.owner_id, cmd.content, media, files, now);
        let post_id = *post.id();

        // 3. Persistance
        self.repo.create(&post).await?;
        tracing::info!(post_id = %post_id, owner_id = %cmd.owner_id, "📝 Post created");

        // 4. Pas d'écriture cache : la première lecture le remplit
        publish_best_effort(
            &self.producer,
            &PostEvent::PostCreated { post_id, owner_id: Some(cmd.owner_id), occurred_at: now },
        )
        .await;

        Ok(post_id)
    }
}
