//! HTTP client for the analytics service that owns snapshots.

pub mod client;
pub mod error;

pub use client::AnalyticsClient;
pub use error::AnalyticsError;
