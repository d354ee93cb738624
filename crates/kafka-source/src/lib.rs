//! Descriptors of Kafka partition read assignments.
//!
//! A [`SourceDescriptor`] is the unit of work handed to a Kafka-reading
//! pipeline stage: one partition of one topic, plus optional boundaries
//! (by offset or by event time) within which to read it. Descriptors are
//! immutable values which validate their boundaries on every construction
//! path, including deserialization, so a stage holding one never needs to
//! re-check them. Opening a consumer, seeking to the start boundary, and
//! stopping at the stop boundary are the concern of the stage itself.

mod descriptor;
mod topic_partition;

pub use descriptor::SourceDescriptor;
pub use topic_partition::TopicPartition;

/// Returned when a read boundary is given both an offset and a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidBounds {
    #[error("start_read_offset and start_read_time are mutually exclusive: set at most one of them")]
    Start,
    #[error("stop_read_offset and stop_read_time are mutually exclusive: set at most one of them")]
    Stop,
}
