//! Job workers.

mod analysis;
mod rollup;

pub use analysis::{
    aspect_analysis_worker, topic_analysis_worker, AspectAnalysisContext, TopicAnalysisContext,
};
pub use rollup::{daily_rollup_worker, DailyRollupContext};
