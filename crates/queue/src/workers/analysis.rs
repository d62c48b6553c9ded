//! Entry analysis workers.

use apalis::prelude::*;
use notemood_core::{AspectAnalysisService, TopicAnalysisService};
use tracing::{error, info};

use crate::jobs::{AspectAnalysisJob, TopicAnalysisJob};

/// Context for the aspect analysis worker.
#[derive(Clone)]
pub struct AspectAnalysisContext {
    pub service: AspectAnalysisService,
}

impl AspectAnalysisContext {
    /// Create a new aspect analysis context.
    #[must_use]
    pub const fn new(service: AspectAnalysisService) -> Self {
        Self { service }
    }
}

/// Worker function for aspect analysis jobs.
///
/// # Errors
/// Returns an error if storing analysis results fails; a failed job is
/// retried by the queue, and the pipeline's writes tolerate replays.
pub async fn aspect_analysis_worker(
    job: AspectAnalysisJob,
    ctx: Data<AspectAnalysisContext>,
) -> Result<(), Error> {
    info!(entry_id = job.entry_id, reprocess = job.reprocess, "Running aspect analysis");

    let result = if job.reprocess {
        ctx.service.update(job.entry_id, &job.content).await
    } else {
        ctx.service.add(job.entry_id, &job.content).await
    };

    match result {
        Ok(()) => Ok(()),
        Err(e) => {
            error!(entry_id = job.entry_id, error = %e, "Aspect analysis failed");
            Err(Error::Failed(std::sync::Arc::new(e.into())))
        }
    }
}

/// Context for the topic analysis worker.
#[derive(Clone)]
pub struct TopicAnalysisContext {
    pub service: TopicAnalysisService,
}

impl TopicAnalysisContext {
    /// Create a new topic analysis context.
    #[must_use]
    pub const fn new(service: TopicAnalysisService) -> Self {
        Self { service }
    }
}

/// Worker function for topic analysis jobs.
///
/// # Errors
/// Returns an error if storing analysis results fails.
pub async fn topic_analysis_worker(
    job: TopicAnalysisJob,
    ctx: Data<TopicAnalysisContext>,
) -> Result<(), Error> {
    info!(entry_id = job.entry_id, reprocess = job.reprocess, "Running topic analysis");

    let result = if job.reprocess {
        ctx.service.update(job.entry_id, &job.content).await
    } else {
        ctx.service.add(job.entry_id, &job.content).await
    };

    match result {
        Ok(()) => Ok(()),
        Err(e) => {
            error!(entry_id = job.entry_id, error = %e, "Topic analysis failed");
            Err(Error::Failed(std::sync::Arc::new(e.into())))
        }
    }
}
