// crates/post/src/application/event_publisher.rs

use std::sync::Arc;
use shared_kernel::application::ports::MessageProducer;
use shared_kernel::domain::events::EventEnvelope;

use crate::domain::events::PostEvent;

/// Publication best-effort : le réconciliateur et le TTL rattrapent un événement perdu.
pub(crate) async fn publish_best_effort(producer: &Arc<dyn MessageProducer>, event: &PostEvent) {
    let envelope = EventEnvelope::wrap(event);

    if let Err(e) = producer.publish(&envelope).await {
        tracing::warn!(
            post_id = %event.post_id(),
            event_type = %envelope.event_type,
            error = %e,
            "⚠️ Failed to publish post event"
        );
    }
}
