use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The canonical identity of a single partition of a Kafka topic.
///
/// Handles carry full value semantics: they hash, order by (topic, partition),
/// and render as `topic-partition`, so they can key assignment maps and label
/// log lines deterministically.
#[derive(
    Serialize, Deserialize, Debug, Clone, JsonSchema, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct TopicPartition {
    topic: String,
    partition: i32,
}

impl TopicPartition {
    pub fn new(topic: impl Into<String>, partition: i32) -> Self {
        Self {
            topic: topic.into(),
            partition,
        }
    }
    pub fn topic(&self) -> &str {
        &self.topic
    }
    pub fn partition(&self) -> i32 {
        self.partition
    }
    pub fn example() -> Self {
        Self::new("orders", 3)
    }
}

impl std::fmt::Display for TopicPartition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.topic, self.partition)
    }
}

#[cfg(test)]
mod test {
    use super::TopicPartition;

    #[test]
    fn test_display_and_ordering() {
        assert_eq!(TopicPartition::new("orders", 3).to_string(), "orders-3");

        let mut handles = vec![
            TopicPartition::new("orders", 3),
            TopicPartition::new("orders", 1),
            TopicPartition::new("accounts", 7),
        ];
        handles.sort();

        assert_eq!(
            handles.iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec!["accounts-7", "orders-1", "orders-3"],
        );
    }
}
