//! Job definitions.

mod analysis;
mod rollup;

pub use analysis::{AspectAnalysisJob, TopicAnalysisJob};
pub use rollup::DailyRollupJob;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // Payloads sit in Redis between producer and worker, so their JSON
    // shape must stay stable across versions.
    #[test]
    fn rollup_job_serializes_date_as_plain_string() {
        let job = DailyRollupJob::new("u1".to_string(), "2026-03-01".parse().unwrap());
        let json = serde_json::to_value(&job).unwrap();

        assert_eq!(json["user_id"], "u1");
        assert_eq!(json["date"], "2026-03-01");
    }

}
