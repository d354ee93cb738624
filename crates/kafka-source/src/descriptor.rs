use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{InvalidBounds, TopicPartition};

/// A descriptor of one partition read task: a single partition of a Kafka
/// topic, plus the boundaries within which a consumer should read it.
///
/// Each boundary is expressed as either an offset or an event time, never
/// both at once. Every construction path checks this, so every descriptor
/// in existence satisfies it. Descriptors are immutable once built and may
/// be shared freely across concurrent pipeline workers.
#[derive(Serialize, JsonSchema, Debug, Clone)]
pub struct SourceDescriptor {
    /// # Name of the topic to read.
    topic: String,
    /// # Index of the partition to read within the topic.
    partition: i32,
    /// # Offset at which to begin reading, inclusive.
    /// Mutually exclusive with `start_read_time`.
    #[serde(skip_serializing_if = "Option::is_none")]
    start_read_offset: Option<i64>,
    /// # Event time at which to begin reading.
    /// Reading begins at the first record at or after this time.
    /// Mutually exclusive with `start_read_offset`.
    #[serde(skip_serializing_if = "Option::is_none")]
    start_read_time: Option<DateTime<Utc>>,
    /// # Offset at which to stop reading.
    /// Whether the stop offset itself is read is the consumer's convention;
    /// the descriptor doesn't interpret it. Mutually exclusive with
    /// `stop_read_time`.
    #[serde(skip_serializing_if = "Option::is_none")]
    stop_read_offset: Option<i64>,
    /// # Event time at which to stop reading.
    /// Reading stops at the first record at or after this time.
    /// Mutually exclusive with `stop_read_offset`.
    #[serde(skip_serializing_if = "Option::is_none")]
    stop_read_time: Option<DateTime<Utc>>,
    /// # Broker addresses to bootstrap from when reading this partition.
    /// When unset, the pipeline-wide default is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    bootstrap_servers: Option<Vec<String>>,

    // Lazily computed canonical handle. Never serialized or compared.
    #[serde(skip)]
    topic_partition: OnceLock<TopicPartition>,
}

impl SourceDescriptor {
    /// Build a descriptor from a pre-built partition handle.
    ///
    /// Fails with [`InvalidBounds`] if a boundary is given both an offset
    /// and a time. Offset sign and start/stop ordering are not checked:
    /// those are the consuming client's policy.
    pub fn new(
        topic_partition: TopicPartition,
        start_read_offset: Option<i64>,
        start_read_time: Option<DateTime<Utc>>,
        stop_read_offset: Option<i64>,
        stop_read_time: Option<DateTime<Utc>>,
        bootstrap_servers: Option<Vec<String>>,
    ) -> Result<Self, InvalidBounds> {
        check_bounds(
            &start_read_offset,
            &start_read_time,
            &stop_read_offset,
            &stop_read_time,
        )?;

        let topic = topic_partition.topic().to_string();
        let partition = topic_partition.partition();

        // The caller already built the handle: seed the cache with it
        // rather than recomputing an equal value on first access.
        let cache = OnceLock::new();
        let _ = cache.set(topic_partition);

        Ok(Self {
            topic,
            partition,
            start_read_offset,
            start_read_time,
            stop_read_offset,
            stop_read_time,
            bootstrap_servers,
            topic_partition: cache,
        })
    }

    /// Build a descriptor from bare topic and partition fields, as a
    /// schema-driven deserializer reconstructs one field by field.
    ///
    /// Applies the same boundary check as [`SourceDescriptor::new`] and
    /// yields an instance equal to one built from the equivalent handle.
    pub fn from_parts(
        topic: impl Into<String>,
        partition: i32,
        start_read_offset: Option<i64>,
        start_read_time: Option<DateTime<Utc>>,
        stop_read_offset: Option<i64>,
        stop_read_time: Option<DateTime<Utc>>,
        bootstrap_servers: Option<Vec<String>>,
    ) -> Result<Self, InvalidBounds> {
        check_bounds(
            &start_read_offset,
            &start_read_time,
            &stop_read_offset,
            &stop_read_time,
        )?;

        Ok(Self {
            topic: topic.into(),
            partition,
            start_read_offset,
            start_read_time,
            stop_read_offset,
            stop_read_time,
            bootstrap_servers,
            topic_partition: OnceLock::new(),
        })
    }

    /// Returns the canonical [`TopicPartition`] handle of this descriptor,
    /// computing and caching it on first access.
    pub fn topic_partition(&self) -> &TopicPartition {
        self.topic_partition
            .get_or_init(|| TopicPartition::new(self.topic.clone(), self.partition))
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }
    pub fn partition(&self) -> i32 {
        self.partition
    }
    pub fn start_read_offset(&self) -> Option<i64> {
        self.start_read_offset
    }
    pub fn start_read_time(&self) -> Option<DateTime<Utc>> {
        self.start_read_time
    }
    pub fn stop_read_offset(&self) -> Option<i64> {
        self.stop_read_offset
    }
    pub fn stop_read_time(&self) -> Option<DateTime<Utc>> {
        self.stop_read_time
    }
    pub fn bootstrap_servers(&self) -> Option<&[String]> {
        self.bootstrap_servers.as_deref()
    }

    pub fn example() -> Self {
        Self::from_parts("orders", 3, Some(100), None, Some(200), None, None)
            .expect("example bounds are legal")
    }
}

fn check_bounds(
    start_read_offset: &Option<i64>,
    start_read_time: &Option<DateTime<Utc>>,
    stop_read_offset: &Option<i64>,
    stop_read_time: &Option<DateTime<Utc>>,
) -> Result<(), InvalidBounds> {
    if start_read_offset.is_some() && start_read_time.is_some() {
        return Err(InvalidBounds::Start);
    }
    if stop_read_offset.is_some() && stop_read_time.is_some() {
        return Err(InvalidBounds::Stop);
    }
    Ok(())
}

// The handle cache is an optimization, not identity: descriptors compare
// on their data fields alone, regardless of construction path or whether
// the handle has been computed yet.
impl PartialEq for SourceDescriptor {
    fn eq(&self, other: &Self) -> bool {
        let Self {
            topic,
            partition,
            start_read_offset,
            start_read_time,
            stop_read_offset,
            stop_read_time,
            bootstrap_servers,
            topic_partition: _,
        } = self;

        *topic == other.topic
            && *partition == other.partition
            && *start_read_offset == other.start_read_offset
            && *start_read_time == other.start_read_time
            && *stop_read_offset == other.stop_read_offset
            && *stop_read_time == other.stop_read_time
            && *bootstrap_servers == other.bootstrap_servers
    }
}

impl Eq for SourceDescriptor {}

// Deserialization funnels through `from_parts` so that a schema-driven
// reconstruction cannot bypass the boundary check.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSourceDescriptor {
    topic: String,
    partition: i32,
    #[serde(default)]
    start_read_offset: Option<i64>,
    #[serde(default)]
    start_read_time: Option<DateTime<Utc>>,
    #[serde(default)]
    stop_read_offset: Option<i64>,
    #[serde(default)]
    stop_read_time: Option<DateTime<Utc>>,
    #[serde(default)]
    bootstrap_servers: Option<Vec<String>>,
}

impl<'de> Deserialize<'de> for SourceDescriptor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let RawSourceDescriptor {
            topic,
            partition,
            start_read_offset,
            start_read_time,
            stop_read_offset,
            stop_read_time,
            bootstrap_servers,
        } = RawSourceDescriptor::deserialize(deserializer)?;

        Self::from_parts(
            topic,
            partition,
            start_read_offset,
            start_read_time,
            stop_read_offset,
            stop_read_time,
            bootstrap_servers,
        )
        .map_err(serde::de::Error::custom)
    }
}
