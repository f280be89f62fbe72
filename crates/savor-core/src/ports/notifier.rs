//! Notification topic port - abstraction over push messaging backends.
//!
//! Only subscription membership lives here; sending is done by the push
//! provider against the same topic names.

use async_trait::async_trait;

#[async_trait]
pub trait TopicNotifier: Send + Sync {
    /// Subscribe a user to a topic. Subscribing twice is a no-op.
    async fn subscribe(&self, user_id: &str, topic: &str) -> Result<(), NotifyError>;

    /// Unsubscribe a user. Unknown subscriptions are ignored.
    async fn unsubscribe(&self, user_id: &str, topic: &str) -> Result<(), NotifyError>;

    /// Topics the user is subscribed to, sorted by name.
    async fn subscriptions(&self, user_id: &str) -> Result<Vec<String>, NotifyError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Invalid topic name: {0}")]
    InvalidTopic(String),
}

/// Topic names follow the push-messaging rule `[a-zA-Z0-9-_.~%]{1,900}`.
pub fn validate_topic(topic: &str) -> Result<(), NotifyError> {
    let valid = !topic.is_empty()
        && topic.len() <= 900
        && topic
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~' | '%'));
    if valid {
        Ok(())
    } else {
        Err(NotifyError::InvalidTopic(topic.to_string()))
    }
}
