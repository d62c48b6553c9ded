//! Business logic services.

pub mod aspect_analysis;
pub mod classifier;
pub mod daily_sentiment;
pub mod dispatch;
pub mod entry;
pub mod stats;
pub mod topic_analysis;

pub use aspect_analysis::{
    AspectAnalysisService, AspectBreakdown, SentimentPercentage, SubjectBreakdown,
};
pub use classifier::{
    AspectAnalysisResponse, AspectEntities, ClassificationError, ClassifierClient,
    ClassifierTransport, ClassifyRequest, OverallSentimentResponse, ReqwestTransport,
    TopicAnalysisResponse, TransportError, TransportResponse,
};
pub use daily_sentiment::{
    DailyMood, DailySentimentService, RollingSignal, SentimentFrequency, ROLLING_WINDOW_DAYS,
};
pub use dispatch::{AnalysisDispatch, DispatchService, NoOpDispatch};
pub use entry::{EntryInput, EntryRecord, EntryService};
pub use topic_analysis::{TopicAnalysisService, TopicBreakdown};
