//! Entry analysis jobs.

use serde::{Deserialize, Serialize};

/// Job to run aspect-based sentiment analysis on an entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AspectAnalysisJob {
    /// The entry to analyse.
    pub entry_id: i32,

    /// Entry content at the time the job was queued.
    pub content: String,

    /// Whether existing results must be replaced rather than added to.
    pub reprocess: bool,
}

impl AspectAnalysisJob {
    /// Create a new aspect analysis job.
    #[must_use]
    pub const fn new(entry_id: i32, content: String, reprocess: bool) -> Self {
        Self {
            entry_id,
            content,
            reprocess,
        }
    }
}

/// Job to run topic extraction on an entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicAnalysisJob {
    /// The entry to analyse.
    pub entry_id: i32,

    /// Entry content at the time the job was queued.
    pub content: String,

    /// Whether existing results must be replaced rather than added to.
    pub reprocess: bool,
}

impl TopicAnalysisJob {
    /// Create a new topic analysis job.
    #[must_use]
    pub const fn new(entry_id: i32, content: String, reprocess: bool) -> Self {
        Self {
            entry_id,
            content,
            reprocess,
        }
    }
}
