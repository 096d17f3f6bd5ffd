// crates/shared-kernel/src/application/ports/mod.rs

mod message_consumer;
mod message_consumer_stub;
mod message_producer;
mod message_producer_stub;

pub use message_consumer::{MessageConsumer, MessageHandler};
pub use message_consumer_stub::MessageConsumerStub;
pub use message_producer::MessageProducer;
pub use message_producer_stub::MessageProducerStub;
