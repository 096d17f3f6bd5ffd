mod post_event_reconciler;
mod reconcile_error;
mod reconciler_settings;

pub use post_event_reconciler::PostEventReconciler;
pub use reconcile_error::{ReconcileError, ReconcileOutcome};
pub use reconciler_settings::ReconcilerSettings;

#[cfg(test)]
mod post_event_reconciler_test;
