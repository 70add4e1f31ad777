//! Build and hardware properties collector.

use crate::collector::platform::Platform;
use crate::collector::traits::{CollectedData, DataCollector, put_opt};
use crate::keys;

/// Collects static build properties. Pure reads, never fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuildDataCollector;

impl BuildDataCollector {
    pub fn new() -> Self {
        Self
    }
}

impl DataCollector for BuildDataCollector {
    fn name(&self) -> &'static str {
        "build"
    }

    fn collect(&self, platform: &dyn Platform) -> CollectedData {
        let build = platform.build_info();

        let mut data = CollectedData::new();
        put_opt(&mut data, keys::DEVICE_BRAND, build.brand);
        put_opt(&mut data, keys::DEVICE_FINGERPRINT, build.fingerprint);
        put_opt(&mut data, keys::DEVICE_HARDWARE, build.hardware);
        put_opt(&mut data, keys::DEVICE_NAME, build.model);
        put_opt(&mut data, keys::PRODUCT, build.product);
        put_opt(&mut data, keys::BUILD_TYPE, build.build_type);
        put_opt(&mut data, keys::DEVICE_OS_RELEASE_VERSION, build.os_release);
        put_opt(&mut data, keys::DEVICE_SDK_VERSION, build.sdk_version);
        data
    }
}
