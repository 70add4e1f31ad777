//! Client-context data collectors.
//!
//! Each collector extracts one category of environment facts from a
//! `Platform` as a flat string map. The aggregator runs them in order and
//! merges the results.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                    ContextDataAggregator                       │
//! │  ┌─────────────┐ ┌─────────────┐ ┌─────────────┐ ┌───────────┐ │
//! │  │ Application │ │    Build    │ │   Device    │ │ Telephony │ │
//! │  │             │ │             │ │ - agent id  │ │ (opt-in)  │ │
//! │  └──────┬──────┘ └──────┬──────┘ └──────┬──────┘ └─────┬─────┘ │
//! │         └───────────────┴───────┬───────┴──────────────┘       │
//! │                          ┌──────▼──────┐                       │
//! │                          │  Platform   │ (trait)               │
//! │                          └──────┬──────┘                       │
//! └─────────────────────────────────┼──────────────────────────────┘
//!                                   │
//!              ┌────────────────────┼────────────────────┐
//!              │                    │                    │
//!       ┌──────▼──────┐      ┌──────▼──────┐      ┌──────▼──────┐
//!       │HostPlatform │      │DeviceProfile│      │  Scenarios  │
//!       │ (FileSystem)│      │   (JSON)    │      │ (Fixtures)  │
//!       └─────────────┘      └─────────────┘      └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use clientctx_core::collector::DeviceProfile;
//! use clientctx_core::{ContextDataAggregator, keys};
//!
//! let platform = DeviceProfile::typical_phone();
//! let aggregator = ContextDataAggregator::new();
//! let data = aggregator.aggregated_data(&platform);
//! assert_eq!(data[keys::PLATFORM], "ANDROID");
//! ```

mod application;
mod build;
mod device;
mod host;
pub mod mock;
pub mod platform;
mod profile;
mod telephony;
pub mod traits;

pub use application::{ApplicationDataCollector, application_version};
pub use build::BuildDataCollector;
pub use device::{
    DeviceDataCollector, device_agent_id, format_timezone_offset, generate_device_agent_id,
};
pub use host::{
    ApplicationManifest, HostPlatform, parse_cpu_hardware, parse_os_release, standard_offset_ms,
};
pub use mock::MockFs;
pub use platform::{
    ApplicationInfo, BuildInfo, DisplayMetrics, Platform, PlatformError, SimState, TelephonyInfo,
};
pub use profile::{DeviceProfile, ProfileError};
pub use telephony::TelephonyDataCollector;
pub use traits::{CollectedData, ContextData, DataCollector, FileSystem, RealFs};
