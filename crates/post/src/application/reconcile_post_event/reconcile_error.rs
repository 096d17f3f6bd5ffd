// crates/post/src/application/reconcile_post_event/reconcile_error.rs

use shared_kernel::domain::value_objects::{PostId, Url};
use thiserror::Error;

/// Échecs internes du réconciliateur : journalisés, jamais propagés.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReconcileError {
    #[error("cannot decode message: {0}")]
    DeserializationFailed(String),

    #[error("unknown event type '{0}'")]
    UnknownEventType(String),

    #[error("lease '{key}' unavailable: {reason}")]
    LockUnavailable { key: String, reason: String },

    #[error("cannot delete {url} from object store: {reason}")]
    StorageCleanupFailed { url: Url, reason: String },

    /// Le cache reste froid, il se remplira à la prochaine lecture
    #[error("cannot refetch post {post_id}: {reason}")]
    RefetchFailed { post_id: PostId, reason: String },

    /// Pages invalidées mais non réchauffées
    #[error("cannot rebuild list cache: {0}")]
    ListRebuildFailed(String),
}

/// Issue du traitement d'un message
#[derive(Debug, Clone, PartialEq)]
pub enum ReconcileOutcome {
    /// Nettoyage et remplissage complets
    Reconciled,
    /// Lease détenu ailleurs : aucune mutation, message non rejoué
    Skipped(ReconcileError),
    /// Message inexploitable, abandonné
    Dropped(ReconcileError),
    /// Traité, mais des étapes best-effort ont échoué
    Incomplete(Vec<ReconcileError>),
}

impl ReconcileOutcome {
    pub(crate) fn from_failures(failures: Vec<ReconcileError>) -> Self {
        if failures.is_empty() {
            Self::Reconciled
        } else {
            Self::Incomplete(failures)
        }
    }

    pub fn is_reconciled(&self) -> bool {
        matches!(self, Self::Reconciled)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }
}
