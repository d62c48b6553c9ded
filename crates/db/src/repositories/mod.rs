//! Database repositories.

mod daily_sentiment;
mod entry;
mod taxonomy;

pub use daily_sentiment::DailySentimentRepository;
pub use entry::EntryRepository;
pub use taxonomy::{EntitySentimentCount, TaxonomyRepository, TopicSentimentRow};
