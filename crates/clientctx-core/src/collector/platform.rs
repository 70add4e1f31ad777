//! Platform execution context.
//!
//! A `Platform` is the only way collectors reach the environment: package
//! metadata, build properties, display, telephony and local storage. All
//! accessors are synchronous local reads.

use serde::Deserialize;
use thiserror::Error;

use crate::storage::KeyValueStore;

/// Errors reported by platform lookups.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// The requested package is not installed.
    #[error("package not found: {0}")]
    PackageNotFound(String),
}

/// Identity of the running application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApplicationInfo {
    /// Display name.
    pub name: Option<String>,
    /// Package identifier used for version lookup.
    pub package: String,
    /// SDK level the application targets.
    pub target_sdk: Option<u32>,
}

/// Static build and hardware properties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BuildInfo {
    pub brand: Option<String>,
    pub fingerprint: Option<String>,
    pub hardware: Option<String>,
    pub model: Option<String>,
    pub product: Option<String>,
    pub build_type: Option<String>,
    pub os_release: Option<String>,
    pub sdk_version: Option<String>,
}

/// Active display size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DisplayMetrics {
    pub height_px: u32,
    pub width_px: u32,
}

/// SIM card state as reported by the radio layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimState {
    #[default]
    Unknown,
    Absent,
    PinRequired,
    PukRequired,
    NetworkLocked,
    Ready,
    NotReady,
    PermDisabled,
    CardIoError,
    CardRestricted,
}

/// Telephony radio state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TelephonyInfo {
    pub sim_state: SimState,
    pub network_roaming: bool,
    /// Registered network operator name.
    pub carrier: Option<String>,
    /// Numeric radio network type.
    pub network_type: i32,
    /// Numeric phone type.
    pub phone_type: i32,
    /// ISO country code of the SIM provider.
    pub sim_country_iso: Option<String>,
    /// Service provider name stored on the SIM.
    pub sim_operator_name: Option<String>,
}

/// Opaque execution context handed to collectors.
pub trait Platform: Send + Sync {
    /// Identity of the running application.
    fn application(&self) -> ApplicationInfo;

    /// Installed version string of `package`.
    fn package_version(&self, package: &str) -> Result<String, PlatformError>;

    /// Build and hardware properties.
    fn build_info(&self) -> BuildInfo;

    /// Platform literal reported in the `Platform` key.
    fn platform_name(&self) -> &str;

    /// Raw offset of the local timezone from UTC, in milliseconds.
    fn raw_utc_offset_ms(&self) -> i64;

    /// Platform-provided device identifier. May be deprecated or zero on
    /// some systems and is reported as-is.
    fn third_party_device_id(&self) -> Option<String>;

    /// Current locale string.
    fn locale(&self) -> Option<String>;

    /// Active display metrics, `None` on headless systems.
    fn display_metrics(&self) -> Option<DisplayMetrics>;

    /// Telephony state, `None` when the service is unavailable.
    fn telephony(&self) -> Option<TelephonyInfo>;

    /// Application-scoped persisted key-value storage.
    fn storage(&self) -> &dyn KeyValueStore;
}
