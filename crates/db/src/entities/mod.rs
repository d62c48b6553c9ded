//! Database entities.

pub mod aspect;
pub mod daily_sentiment;
pub mod entity_sentiment;
pub mod entry;
pub mod sentiment;
pub mod subject;
pub mod topic;
pub mod topic_sentiment;

pub use aspect::Entity as Aspect;
pub use daily_sentiment::Entity as DailySentiment;
pub use entity_sentiment::Entity as EntitySentiment;
pub use entry::Entity as Entry;
pub use sentiment::Entity as Sentiment;
pub use subject::Entity as Subject;
pub use topic::Entity as Topic;
pub use topic_sentiment::Entity as TopicSentiment;
