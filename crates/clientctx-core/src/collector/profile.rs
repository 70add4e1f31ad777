//! Static device description used as a platform.
//!
//! A `DeviceProfile` captures every fact a collector can ask for as plain
//! data. Profiles are loaded from JSON to emulate a device and back the
//! canned scenarios used in tests.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::collector::platform::{
    ApplicationInfo, BuildInfo, DisplayMetrics, Platform, PlatformError, TelephonyInfo,
};
use crate::storage::{KeyValueStore, MemoryStore};

/// Error type for profile loading.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid profile: {0}")]
    Json(#[from] serde_json::Error),
}

fn default_platform_name() -> String {
    "ANDROID".to_string()
}

fn default_store() -> Arc<dyn KeyValueStore> {
    Arc::new(MemoryStore::new())
}

/// Device facts held as data.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct DeviceProfile {
    /// Platform literal, `ANDROID` unless overridden.
    pub platform_name: String,
    pub application: ApplicationInfo,
    /// Installed packages and their version strings.
    pub packages: BTreeMap<String, String>,
    pub build: BuildInfo,
    /// Raw UTC offset of the local timezone in milliseconds.
    pub utc_offset_ms: i64,
    pub third_party_device_id: Option<String>,
    pub locale: Option<String>,
    pub display: Option<DisplayMetrics>,
    pub telephony: Option<TelephonyInfo>,
    #[serde(skip, default = "default_store")]
    pub(crate) store: Arc<dyn KeyValueStore>,
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self {
            platform_name: default_platform_name(),
            application: ApplicationInfo::default(),
            packages: BTreeMap::new(),
            build: BuildInfo::default(),
            utc_offset_ms: 0,
            third_party_device_id: None,
            locale: None,
            display: None,
            telephony: None,
            store: default_store(),
        }
    }
}

impl std::fmt::Debug for DeviceProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceProfile")
            .field("platform_name", &self.platform_name)
            .field("application", &self.application)
            .field("packages", &self.packages)
            .field("build", &self.build)
            .field("utc_offset_ms", &self.utc_offset_ms)
            .field("third_party_device_id", &self.third_party_device_id)
            .field("locale", &self.locale)
            .field("display", &self.display)
            .field("telephony", &self.telephony)
            .finish_non_exhaustive()
    }
}

impl DeviceProfile {
    /// Parses a profile from JSON. The profile starts with an empty in-memory store.
    pub fn from_json(json: &str) -> Result<Self, ProfileError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a profile from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Replaces the backing key-value store.
    pub fn with_store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = store;
        self
    }
}

impl Platform for DeviceProfile {
    fn application(&self) -> ApplicationInfo {
        self.application.clone()
    }

    fn package_version(&self, package: &str) -> Result<String, PlatformError> {
        self.packages
            .get(package)
            .cloned()
            .ok_or_else(|| PlatformError::PackageNotFound(package.to_string()))
    }

    fn build_info(&self) -> BuildInfo {
        self.build.clone()
    }

    fn platform_name(&self) -> &str {
        &self.platform_name
    }

    fn raw_utc_offset_ms(&self) -> i64 {
        self.utc_offset_ms
    }

    fn third_party_device_id(&self) -> Option<String> {
        self.third_party_device_id.clone()
    }

    fn locale(&self) -> Option<String> {
        self.locale.clone()
    }

    fn display_metrics(&self) -> Option<DisplayMetrics> {
        self.display
    }

    fn telephony(&self) -> Option<TelephonyInfo> {
        self.telephony.clone()
    }

    fn storage(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::platform::SimState;

    #[test]
    fn test_profile_from_json() {
        let profile = DeviceProfile::from_json(
            r#"{
                "application": { "name": "Demo", "package": "com.example.demo", "target_sdk": 30 },
                "packages": { "com.example.demo": "1.0" },
                "build": { "brand": "acme", "model": "A1" },
                "utc_offset_ms": 3600000,
                "locale": "de_DE",
                "display": { "height_px": 800, "width_px": 480 },
                "telephony": { "sim_state": "ready", "carrier": "Telekom" }
            }"#,
        )
        .unwrap();

        assert_eq!(profile.platform_name(), "ANDROID");
        assert_eq!(profile.package_version("com.example.demo").unwrap(), "1.0");
        assert_eq!(profile.build_info().brand.as_deref(), Some("acme"));
        assert_eq!(profile.build_info().fingerprint, None);
        assert_eq!(profile.raw_utc_offset_ms(), 3_600_000);
        let telephony = profile.telephony().unwrap();
        assert_eq!(telephony.sim_state, SimState::Ready);
        assert_eq!(telephony.network_type, 0);
    }

    #[test]
    fn test_profile_unknown_package() {
        let profile = DeviceProfile::default();
        assert!(matches!(
            profile.package_version("missing"),
            Err(PlatformError::PackageNotFound(p)) if p == "missing"
        ));
    }

    #[test]
    fn test_profile_invalid_json() {
        assert!(matches!(
            DeviceProfile::from_json("{ not json"),
            Err(ProfileError::Json(_))
        ));
    }

    #[test]
    fn test_profile_with_store_is_shared() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let a = DeviceProfile::default().with_store(Arc::clone(&store));
        let b = DeviceProfile::default().with_store(Arc::clone(&store));

        a.storage().put_if_absent("ns", "k", "v").unwrap();
        assert_eq!(b.storage().get("ns", "k").unwrap().as_deref(), Some("v"));
    }
}
