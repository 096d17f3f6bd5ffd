// crates/post/tests/application/fixture.rs

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use post::application::reconcile_post_event::{PostEventReconciler, ReconcileOutcome, ReconcilerSettings};
use post::application::{PostService, PostServiceConfig};
use post::domain::attachments::{AttachmentSource, InMemoryAttachment};
use post::domain::repositories::{FileStorageStub, PostRepositoryStub};
use shared_kernel::application::ports::MessageProducerStub;
use shared_kernel::domain::repositories::CacheRepositoryStub;

/// Service + réconciliateur branchés sur les mêmes stubs.
/// `drain` rejoue sur le réconciliateur les événements publiés depuis le dernier appel.
pub struct Harness {
    pub service: PostService,
    pub reconciler: PostEventReconciler,
    pub repo: Arc<PostRepositoryStub>,
    pub cache: Arc<CacheRepositoryStub>,
    pub storage: Arc<FileStorageStub>,
    pub producer: Arc<MessageProducerStub>,
    drained: AtomicUsize,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_storage(FileStorageStub::new())
    }

    pub fn with_storage(storage: FileStorageStub) -> Self {
        let repo = Arc::new(PostRepositoryStub::new());
        let cache = Arc::new(CacheRepositoryStub::new());
        let storage = Arc::new(storage);
        let producer = Arc::new(MessageProducerStub::new());

        let service = PostService::new(
            repo.clone(),
            cache.clone(),
            storage.clone(),
            producer.clone(),
            PostServiceConfig::default(),
        );
        let reconciler = PostEventReconciler::new(
            repo.clone(),
            cache.clone(),
            storage.clone(),
            ReconcilerSettings::default(),
        );

        Self { service, reconciler, repo, cache, storage, producer, drained: AtomicUsize::new(0) }
    }

    /// Second réconciliateur partageant cache, store et object store (autre membre du groupe)
    pub fn peer_reconciler(&self) -> PostEventReconciler {
        PostEventReconciler::new(
            self.repo.clone(),
            self.cache.clone(),
            self.storage.clone(),
            ReconcilerSettings::default(),
        )
    }

    pub fn pending_payloads(&self) -> Vec<Vec<u8>> {
        let from = self.drained.load(Ordering::SeqCst);
        self.producer.payloads().into_iter().skip(from).collect()
    }

    pub async fn drain(&self) -> Vec<ReconcileOutcome> {
        let payloads = self.pending_payloads();
        self.drained.fetch_add(payloads.len(), Ordering::SeqCst);

        let mut outcomes = Vec::with_capacity(payloads.len());
        for payload in payloads {
            outcomes.push(self.reconciler.handle_payload(&payload).await);
        }
        outcomes
    }
}

pub fn attachment(name: &str) -> Arc<dyn AttachmentSource> {
    Arc::new(InMemoryAttachment::new(name, "application/octet-stream", name.as_bytes().to_vec()))
}
