//! Core business logic for notemood.

pub mod services;

pub use services::*;
