//! Notemood analysis worker entry point.
//!
//! Connects to Postgres and Redis, runs migrations, and processes the three
//! analysis queues (aspects, topics, daily rollups) until shut down.

use std::sync::Arc;

use apalis::prelude::*;
use notemood_common::Config;
use notemood_core::{
    AspectAnalysisService, ClassifierClient, DailySentimentService, TopicAnalysisService,
};
use notemood_db::repositories::{
    DailySentimentRepository, EntryRepository, TaxonomyRepository,
};
use notemood_queue::workers::{
    aspect_analysis_worker, daily_rollup_worker, topic_analysis_worker, AspectAnalysisContext,
    DailyRollupContext, TopicAnalysisContext,
};
use notemood_queue::{AspectAnalysisJob, DailyRollupJob, TopicAnalysisJob};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notemood=debug".into()),
        )
        .init();

    info!("Starting notemood analysis workers...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database and run migrations
    let db = notemood_db::init(&config).await?;
    info!("Connected to database");

    info!("Running database migrations...");
    notemood_db::migrate(&db).await?;
    info!("Migrations completed");

    // Connect to Redis and initialize the job queues
    info!("Connecting to Redis...");
    let redis_client = redis::Client::open(config.redis.url.as_str())?;
    let redis_conn = redis::aio::ConnectionManager::new(redis_client).await?;
    let aspect_storage = apalis_redis::RedisStorage::<AspectAnalysisJob>::new(redis_conn.clone());
    let topic_storage = apalis_redis::RedisStorage::<TopicAnalysisJob>::new(redis_conn.clone());
    let rollup_storage = apalis_redis::RedisStorage::<DailyRollupJob>::new(redis_conn);
    info!("Connected to Redis job queues");

    // Initialize repositories
    let db = Arc::new(db);
    let entry_repo = EntryRepository::new(Arc::clone(&db));
    let taxonomy_repo = TaxonomyRepository::new(Arc::clone(&db));
    let rollup_repo = DailySentimentRepository::new(Arc::clone(&db));

    // Initialize services
    let classifier = ClassifierClient::new(config.classifier.clone());
    let aspect_service = AspectAnalysisService::new(taxonomy_repo.clone(), classifier.clone());
    let topic_service = TopicAnalysisService::new(taxonomy_repo.clone(), classifier);
    let daily_service = DailySentimentService::new(entry_repo, rollup_repo, taxonomy_repo);

    let aspect_ctx = AspectAnalysisContext::new(aspect_service);
    let topic_ctx = TopicAnalysisContext::new(topic_service);
    let rollup_ctx = DailyRollupContext::new(daily_service);

    info!("Starting analysis workers...");
    Monitor::new()
        .register(
            WorkerBuilder::new("aspect-analysis")
                .data(aspect_ctx)
                .backend(aspect_storage)
                .build_fn(aspect_analysis_worker),
        )
        .register(
            WorkerBuilder::new("topic-analysis")
                .data(topic_ctx)
                .backend(topic_storage)
                .build_fn(topic_analysis_worker),
        )
        .register(
            WorkerBuilder::new("daily-rollup")
                .data(rollup_ctx)
                .backend(rollup_storage)
                .build_fn(daily_rollup_worker),
        )
        .run_with_signal(async {
            shutdown_signal().await;
            Ok(())
        })
        .await?;

    info!("Worker shutdown complete");
    Ok(())
}
