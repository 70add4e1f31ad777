//! Pre-built platform scenarios for testing.

use std::collections::BTreeMap;

use super::filesystem::MockFs;
use crate::collector::platform::{
    ApplicationInfo, BuildInfo, DisplayMetrics, SimState, TelephonyInfo,
};
use crate::collector::profile::DeviceProfile;

const HOUR_MS: i64 = 60 * 60 * 1000;

impl MockFs {
    /// Creates a typical Debian laptop host.
    pub fn typical_host() -> Self {
        let mut fs = Self::new();

        fs.add_file("/sys/class/dmi/id/sys_vendor", "LENOVO\n");
        fs.add_file("/sys/class/dmi/id/product_name", "ThinkPad X1 Carbon Gen 11\n");
        fs.add_file("/sys/class/dmi/id/product_family", "ThinkPad X1 Carbon\n");
        fs.add_file("/proc/sys/kernel/osrelease", "6.1.0-18-amd64\n");
        fs.add_file("/etc/machine-id", "4c4c4544004d3510804cb2c04f4e3332\n");
        fs.add_file(
            "/etc/os-release",
            "\
PRETTY_NAME=\"Debian GNU/Linux 12 (bookworm)\"
NAME=\"Debian GNU/Linux\"
VERSION_ID=\"12\"
VERSION=\"12 (bookworm)\"
VERSION_CODENAME=bookworm
ID=debian
",
        );
        fs.add_file(
            "/proc/cpuinfo",
            "\
processor\t: 0
vendor_id\t: GenuineIntel
cpu family\t: 6
model\t\t: 186
model name\t: 13th Gen Intel(R) Core(TM) i7-1365U
stepping\t: 3

processor\t: 1
vendor_id\t: GenuineIntel
model name\t: 13th Gen Intel(R) Core(TM) i7-1365U
",
        );

        fs
    }
}

impl DeviceProfile {
    /// A phone with an unlocked SIM, display and installed application.
    pub fn typical_phone() -> Self {
        Self {
            application: ApplicationInfo {
                name: Some("Example Wallet".to_string()),
                package: "com.example.wallet".to_string(),
                target_sdk: Some(33),
            },
            packages: BTreeMap::from([("com.example.wallet".to_string(), "4.2.1".to_string())]),
            build: BuildInfo {
                brand: Some("google".to_string()),
                fingerprint: Some(
                    "google/panther/panther:14/UQ1A.240205.004/11269751:user/release-keys"
                        .to_string(),
                ),
                hardware: Some("panther".to_string()),
                model: Some("Pixel 7".to_string()),
                product: Some("panther".to_string()),
                build_type: Some("user".to_string()),
                os_release: Some("14".to_string()),
                sdk_version: Some("34".to_string()),
            },
            utc_offset_ms: -5 * HOUR_MS,
            third_party_device_id: Some("9774d56d682e549c".to_string()),
            locale: Some("en_US".to_string()),
            display: Some(DisplayMetrics {
                height_px: 2400,
                width_px: 1080,
            }),
            telephony: Some(TelephonyInfo {
                sim_state: SimState::Ready,
                network_roaming: false,
                carrier: Some("T-Mobile".to_string()),
                network_type: 13,
                phone_type: 1,
                sim_country_iso: Some("us".to_string()),
                sim_operator_name: Some("T-Mobile".to_string()),
            }),
            ..Self::default()
        }
    }

    /// A Wi-Fi tablet: no telephony service and no third-party id.
    pub fn tablet_without_sim() -> Self {
        Self {
            application: ApplicationInfo {
                name: Some("Example Wallet".to_string()),
                package: "com.example.wallet".to_string(),
                target_sdk: Some(33),
            },
            packages: BTreeMap::from([("com.example.wallet".to_string(), "4.2.1".to_string())]),
            build: BuildInfo {
                brand: Some("samsung".to_string()),
                model: Some("SM-X700".to_string()),
                product: Some("gts8wifixx".to_string()),
                build_type: Some("user".to_string()),
                os_release: Some("13".to_string()),
                sdk_version: Some("33".to_string()),
                ..BuildInfo::default()
            },
            utc_offset_ms: 9 * HOUR_MS,
            locale: Some("ko_KR".to_string()),
            display: Some(DisplayMetrics {
                height_px: 1600,
                width_px: 2560,
            }),
            ..Self::default()
        }
    }
}
