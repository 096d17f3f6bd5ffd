mod post_events;

pub use post_events::{EventDecodeError, PostEvent};
