//! In-memory notification topics.
//!
//! Works within a single process only; membership is lost on restart.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use savor_core::ports::{NotifyError, TopicNotifier, validate_topic};

/// Topic name to subscribed user ids.
pub struct InMemoryTopicHub {
    topics: RwLock<HashMap<String, HashSet<String>>>,
}

impl InMemoryTopicHub {
    pub fn new() -> Self {
        Self {
            topics: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryTopicHub {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TopicNotifier for InMemoryTopicHub {
    async fn subscribe(&self, user_id: &str, topic: &str) -> Result<(), NotifyError> {
        validate_topic(topic)?;
        let mut topics = self.topics.write().await;
        topics
            .entry(topic.to_string())
            .or_default()
            .insert(user_id.to_string());
        tracing::info!(user_id, topic = %topic, "Subscribed to topic");
        Ok(())
    }

    async fn unsubscribe(&self, user_id: &str, topic: &str) -> Result<(), NotifyError> {
        let mut topics = self.topics.write().await;
        if let Some(users) = topics.get_mut(topic) {
            users.remove(user_id);
            if users.is_empty() {
                topics.remove(topic);
            }
        }
        tracing::info!(user_id, topic = %topic, "Unsubscribed from topic");
        Ok(())
    }

    async fn subscriptions(&self, user_id: &str) -> Result<Vec<String>, NotifyError> {
        let topics = self.topics.read().await;
        let mut names: Vec<String> = topics
            .iter()
            .filter(|(_, users)| users.contains(user_id))
            .map(|(topic, _)| topic.clone())
            .collect();
        names.sort();
        Ok(names)
    }
}
