//! clientctx-core — client-context data collection.
//!
//! Provides:
//! - `collector` — platform abstraction and the data collectors
//! - `aggregator` — runs collectors and merges their output into one map
//! - `storage` — persisted key-value storage for the device-agent identifier
//! - `payload` — encoding of the merged map into a header value
//! - `keys` — the fixed context-data key vocabulary

pub mod aggregator;
pub mod collector;
pub mod keys;
pub mod payload;
pub mod storage;

pub use aggregator::{AggregationTiming, ContextDataAggregator};
pub use collector::{CollectedData, ContextData, DataCollector, Platform};
