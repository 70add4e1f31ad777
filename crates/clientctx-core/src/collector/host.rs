//! Linux host platform.
//!
//! Build facts are read from `/sys/class/dmi/id`, `/proc` and `os-release`
//! through the `FileSystem` trait. Application identity is supplied by the
//! caller, since a host process has no package manager to ask.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use chrono::{Datelike, Local, TimeZone};

use crate::collector::platform::{
    ApplicationInfo, BuildInfo, DisplayMetrics, Platform, PlatformError, TelephonyInfo,
};
use crate::collector::traits::FileSystem;
use crate::storage::KeyValueStore;

const DMI_SYS_VENDOR: &str = "/sys/class/dmi/id/sys_vendor";
const DMI_PRODUCT_NAME: &str = "/sys/class/dmi/id/product_name";
const DMI_PRODUCT_FAMILY: &str = "/sys/class/dmi/id/product_family";
const KERNEL_OSRELEASE: &str = "/proc/sys/kernel/osrelease";
const CPUINFO: &str = "/proc/cpuinfo";
const MACHINE_ID: &str = "/etc/machine-id";
const OS_RELEASE_PATHS: [&str; 2] = ["/etc/os-release", "/usr/lib/os-release"];

/// Application identity and the versions of installed packages.
#[derive(Debug, Clone, Default)]
pub struct ApplicationManifest {
    info: ApplicationInfo,
    installed: BTreeMap<String, String>,
}

impl ApplicationManifest {
    /// Creates a manifest for application `name` with package id `package`.
    pub fn new(name: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            info: ApplicationInfo {
                name: Some(name.into()),
                package: package.into(),
                target_sdk: None,
            },
            installed: BTreeMap::new(),
        }
    }

    pub fn with_target_sdk(mut self, target_sdk: u32) -> Self {
        self.info.target_sdk = Some(target_sdk);
        self
    }

    /// Records `version` as the installed version of `package`.
    pub fn with_installed(mut self, package: impl Into<String>, version: impl Into<String>) -> Self {
        self.installed.insert(package.into(), version.into());
        self
    }

    /// Records `version` as the installed version of this application.
    pub fn with_version(self, version: impl Into<String>) -> Self {
        let package = self.info.package.clone();
        self.with_installed(package, version)
    }
}

/// Parses `KEY=value` lines of an os-release file, unquoting values.
pub fn parse_os_release(content: &str) -> HashMap<String, String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            (key.trim().to_string(), value.to_string())
        })
        .collect()
}

/// Extracts the CPU description from `/proc/cpuinfo`.
///
/// Prefers the `Hardware` line reported on ARM boards, falling back to the
/// first `model name`.
pub fn parse_cpu_hardware(content: &str) -> Option<String> {
    let field = |name: &str| {
        content.lines().find_map(|line| {
            let (key, value) = line.split_once(':')?;
            (key.trim() == name).then(|| value.trim().to_string())
        })
    };
    field("Hardware")
        .or_else(|| field("model name"))
        .filter(|v| !v.is_empty())
}

/// Strips the encoding and modifier from a POSIX locale (`en_US.UTF-8` -> `en_US`).
fn normalize_locale(raw: &str) -> Option<String> {
    let locale = raw.split(['.', '@']).next().unwrap_or_default().trim();
    match locale {
        "" | "C" | "POSIX" => None,
        _ => Some(locale.to_string()),
    }
}

/// Standard (non-DST) offset from the offsets observed in January and July.
///
/// Daylight saving shifts clocks forward, so the smaller of the two is the
/// standard offset in either hemisphere.
pub fn standard_offset_ms(january_offset_s: i32, july_offset_s: i32) -> i64 {
    i64::from(january_offset_s.min(july_offset_s)) * 1000
}

/// Raw UTC offset of the local timezone, ignoring daylight saving.
fn local_standard_offset_ms() -> i64 {
    let now = Local::now();
    let offset_at = |month: u32| {
        Local
            .with_ymd_and_hms(now.year(), month, 1, 12, 0, 0)
            .earliest()
            .map(|dt| dt.offset().local_minus_utc())
            .unwrap_or_else(|| now.offset().local_minus_utc())
    };
    standard_offset_ms(offset_at(1), offset_at(7))
}

fn locale_from_env() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|v| !v.is_empty())
        .and_then(|v| normalize_locale(&v))
}

/// Platform backed by the Linux host the process runs on.
pub struct HostPlatform<F: FileSystem> {
    fs: F,
    manifest: ApplicationManifest,
    store: Arc<dyn KeyValueStore>,
    locale: Option<String>,
    utc_offset_ms: Option<i64>,
}

impl<F: FileSystem> HostPlatform<F> {
    /// Creates a host platform.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `manifest` - Identity of the running application
    /// * `store` - Persisted storage for the device-agent identifier
    pub fn new(fs: F, manifest: ApplicationManifest, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            fs,
            manifest,
            store,
            locale: locale_from_env(),
            utc_offset_ms: None,
        }
    }

    /// Overrides the locale detected from the environment.
    pub fn with_locale(mut self, locale: Option<String>) -> Self {
        self.locale = locale;
        self
    }

    /// Pins the UTC offset instead of reading the local timezone.
    pub fn with_utc_offset_ms(mut self, offset_ms: i64) -> Self {
        self.utc_offset_ms = Some(offset_ms);
        self
    }

    fn read_trimmed(&self, path: &str) -> Option<String> {
        self.fs
            .read_to_string(Path::new(path))
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn os_release(&self) -> HashMap<String, String> {
        OS_RELEASE_PATHS
            .iter()
            .map(Path::new)
            .find(|p| self.fs.exists(p))
            .and_then(|p| self.fs.read_to_string(p).ok())
            .map(|content| parse_os_release(&content))
            .unwrap_or_default()
    }
}

impl<F: FileSystem> Platform for HostPlatform<F> {
    fn application(&self) -> ApplicationInfo {
        self.manifest.info.clone()
    }

    fn package_version(&self, package: &str) -> Result<String, PlatformError> {
        self.manifest
            .installed
            .get(package)
            .cloned()
            .ok_or_else(|| PlatformError::PackageNotFound(package.to_string()))
    }

    fn build_info(&self) -> BuildInfo {
        let os = self.os_release();
        let kernel = self.read_trimmed(KERNEL_OSRELEASE);
        let fingerprint = match (os.get("ID"), os.get("VERSION_ID"), &kernel) {
            (Some(id), Some(version), Some(kernel)) => Some(format!("{}/{}/{}", id, version, kernel)),
            _ => None,
        };

        BuildInfo {
            brand: self.read_trimmed(DMI_SYS_VENDOR),
            fingerprint,
            hardware: self
                .fs
                .read_to_string(Path::new(CPUINFO))
                .ok()
                .and_then(|c| parse_cpu_hardware(&c)),
            model: self.read_trimmed(DMI_PRODUCT_NAME),
            product: self.read_trimmed(DMI_PRODUCT_FAMILY),
            build_type: os.get("VARIANT_ID").cloned(),
            os_release: kernel,
            sdk_version: os.get("VERSION_ID").cloned(),
        }
    }

    fn platform_name(&self) -> &str {
        "LINUX"
    }

    fn raw_utc_offset_ms(&self) -> i64 {
        self.utc_offset_ms.unwrap_or_else(local_standard_offset_ms)
    }

    fn third_party_device_id(&self) -> Option<String> {
        self.read_trimmed(MACHINE_ID)
    }

    fn locale(&self) -> Option<String> {
        self.locale.clone()
    }

    fn display_metrics(&self) -> Option<DisplayMetrics> {
        None
    }

    fn telephony(&self) -> Option<TelephonyInfo> {
        None
    }

    fn storage(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::MockFs;
    use crate::storage::MemoryStore;

    fn host(fs: MockFs) -> HostPlatform<MockFs> {
        let manifest = ApplicationManifest::new("Agent", "io.example.agent")
            .with_target_sdk(1)
            .with_version("2.0.0");
        HostPlatform::new(fs, manifest, Arc::new(MemoryStore::new()))
            .with_locale(Some("en_GB".to_string()))
            .with_utc_offset_ms(3_600_000)
    }

    #[test]
    fn test_parse_os_release() {
        let os = parse_os_release(
            "# comment\nNAME=\"Debian GNU/Linux\"\nID=debian\nVERSION_ID='12'\n\nVARIANT_ID=server\n",
        );
        assert_eq!(os["NAME"], "Debian GNU/Linux");
        assert_eq!(os["ID"], "debian");
        assert_eq!(os["VERSION_ID"], "12");
        assert_eq!(os["VARIANT_ID"], "server");
        assert_eq!(os.len(), 4);
    }

    #[test]
    fn test_parse_cpu_hardware() {
        let x86 = "processor\t: 0\nmodel name\t: Intel(R) Xeon(R) CPU\nflags\t: fpu\n";
        assert_eq!(parse_cpu_hardware(x86).as_deref(), Some("Intel(R) Xeon(R) CPU"));

        let arm = "processor\t: 0\nmodel name\t: ARMv7 Processor\nHardware\t: BCM2835\n";
        assert_eq!(parse_cpu_hardware(arm).as_deref(), Some("BCM2835"));

        assert_eq!(parse_cpu_hardware("processor\t: 0\n"), None);
    }

    #[test]
    fn test_standard_offset_ignores_daylight_saving() {
        const HOUR_S: i32 = 3600;
        // New York: EST in January, EDT in July.
        assert_eq!(standard_offset_ms(-5 * HOUR_S, -4 * HOUR_S), -18_000_000);
        // Sydney: AEDT in January, AEST in July.
        assert_eq!(standard_offset_ms(11 * HOUR_S, 10 * HOUR_S), 36_000_000);
        // Kolkata: no daylight saving.
        assert_eq!(
            standard_offset_ms(5 * HOUR_S + 1800, 5 * HOUR_S + 1800),
            19_800_000
        );
        assert_eq!(
            crate::collector::format_timezone_offset(standard_offset_ms(-5 * HOUR_S, -4 * HOUR_S)),
            "-05:00"
        );
    }

    #[test]
    fn test_local_standard_offset_not_above_current() {
        let current = i64::from(Local::now().offset().local_minus_utc()) * 1000;
        assert!(local_standard_offset_ms() <= current);
    }

    #[test]
    fn test_normalize_locale() {
        assert_eq!(normalize_locale("en_US.UTF-8").as_deref(), Some("en_US"));
        assert_eq!(normalize_locale("de_DE@euro").as_deref(), Some("de_DE"));
        assert_eq!(normalize_locale("C.UTF-8"), None);
        assert_eq!(normalize_locale("POSIX"), None);
        assert_eq!(normalize_locale(""), None);
    }

    #[test]
    fn test_host_build_info() {
        let platform = host(MockFs::typical_host());
        let build = platform.build_info();

        assert_eq!(build.brand.as_deref(), Some("LENOVO"));
        assert_eq!(build.model.as_deref(), Some("ThinkPad X1 Carbon Gen 11"));
        assert_eq!(build.product.as_deref(), Some("ThinkPad X1 Carbon"));
        assert_eq!(build.hardware.as_deref(), Some("13th Gen Intel(R) Core(TM) i7-1365U"));
        assert_eq!(build.os_release.as_deref(), Some("6.1.0-18-amd64"));
        assert_eq!(build.sdk_version.as_deref(), Some("12"));
        assert_eq!(build.fingerprint.as_deref(), Some("debian/12/6.1.0-18-amd64"));
        assert_eq!(build.build_type, None);
    }

    #[test]
    fn test_host_empty_filesystem() {
        let platform = host(MockFs::new());
        assert_eq!(platform.build_info(), BuildInfo::default());
        assert_eq!(platform.third_party_device_id(), None);
    }

    #[test]
    fn test_host_identity_and_environment() {
        let platform = host(MockFs::typical_host());

        assert_eq!(platform.platform_name(), "LINUX");
        assert_eq!(
            platform.third_party_device_id().as_deref(),
            Some("4c4c4544004d3510804cb2c04f4e3332")
        );
        assert_eq!(platform.locale().as_deref(), Some("en_GB"));
        assert_eq!(platform.raw_utc_offset_ms(), 3_600_000);
        assert_eq!(platform.display_metrics(), None);
        assert_eq!(platform.telephony(), None);
        assert_eq!(platform.package_version("io.example.agent").unwrap(), "2.0.0");
        assert!(platform.package_version("io.example.other").is_err());
    }

    #[test]
    fn test_host_os_release_fallback_path() {
        let mut fs = MockFs::new();
        fs.add_file("/usr/lib/os-release", "ID=fedora\nVERSION_ID=40\nVARIANT_ID=workstation\n");
        let platform = host(fs);

        let build = platform.build_info();
        assert_eq!(build.sdk_version.as_deref(), Some("40"));
        assert_eq!(build.build_type.as_deref(), Some("workstation"));
        assert_eq!(build.fingerprint, None);
    }
}
