//! Queue integration tests.
//!
//! These tests verify the queue components work correctly together without
//! requiring a running Redis instance.

#![allow(clippy::unwrap_used)]

use notemood_core::{DispatchService, NoOpDispatch};
use notemood_queue::{AspectAnalysisJob, DailyRollupJob, RedisAnalysisDispatch, TopicAnalysisJob};
use std::sync::Arc;

#[test]
fn dispatch_implementations_are_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}

    assert_send_sync::<RedisAnalysisDispatch>();
    assert_send_sync::<NoOpDispatch>();
}

#[tokio::test]
async fn noop_dispatch_accepts_all_job_kinds() {
    let dispatch: DispatchService = Arc::new(NoOpDispatch);

    dispatch.queue_aspect_analysis(1, "content", false).await.unwrap();
    dispatch.queue_topic_analysis(1, "content", true).await.unwrap();
    dispatch
        .queue_daily_rollup("u1", "2026-03-01".parse().unwrap())
        .await
        .unwrap();
}

#[test]
fn job_payloads_survive_a_queue_round_trip() {
    let aspect = AspectAnalysisJob::new(3, "a quiet evening".to_string(), false);
    let topic = TopicAnalysisJob::new(3, "a quiet evening".to_string(), true);
    let rollup = DailyRollupJob::new("u1".to_string(), "2026-03-01".parse().unwrap());

    let aspect: AspectAnalysisJob =
        serde_json::from_str(&serde_json::to_string(&aspect).unwrap()).unwrap();
    let topic: TopicAnalysisJob =
        serde_json::from_str(&serde_json::to_string(&topic).unwrap()).unwrap();
    let rollup: DailyRollupJob =
        serde_json::from_str(&serde_json::to_string(&rollup).unwrap()).unwrap();

    assert_eq!(aspect.entry_id, 3);
    assert!(!aspect.reprocess);
    assert!(topic.reprocess);
    assert_eq!(rollup.date, "2026-03-01".parse().unwrap());
}
