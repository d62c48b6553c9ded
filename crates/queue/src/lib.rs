//! Background job queue for notemood.
//!
//! This crate provides asynchronous analysis processing using Redis:
//!
//! - **Jobs**: aspect analysis, topic analysis, daily rollups
//! - **Workers**: Concurrent job execution with Apalis
//! - **Dispatch**: Redis-backed implementation of the core dispatch trait

pub mod dispatch_impl;
pub mod jobs;
pub mod workers;

pub use dispatch_impl::RedisAnalysisDispatch;
pub use jobs::*;
pub use workers::*;
