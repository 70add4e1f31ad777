//! Application identity collector.

use tracing::warn;

use crate::collector::platform::Platform;
use crate::collector::traits::{CollectedData, DataCollector, put_opt};
use crate::keys;

/// Collects application name, target SDK and installed version.
#[derive(Debug, Default, Clone, Copy)]
pub struct ApplicationDataCollector;

impl ApplicationDataCollector {
    pub fn new() -> Self {
        Self
    }
}

/// Looks up the installed version of the running application.
///
/// Lookup failures are logged and reported as `None`.
pub fn application_version(platform: &dyn Platform, package: &str) -> Option<String> {
    match platform.package_version(package) {
        Ok(version) => Some(version),
        Err(e) => {
            warn!("application version unavailable for {}: {}", package, e);
            None
        }
    }
}

impl DataCollector for ApplicationDataCollector {
    fn name(&self) -> &'static str {
        "application"
    }

    fn collect(&self, platform: &dyn Platform) -> CollectedData {
        let app = platform.application();
        let version = application_version(platform, &app.package);

        let mut data = CollectedData::new();
        put_opt(&mut data, keys::APPLICATION_NAME, app.name);
        put_opt(
            &mut data,
            keys::APPLICATION_TARGET_SDK,
            app.target_sdk.map(|sdk| sdk.to_string()),
        );
        put_opt(&mut data, keys::APPLICATION_VERSION, version);
        data
    }
}
