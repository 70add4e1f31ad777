//! Device facts collector: timezone, identifiers, locale and display.

use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::collector::platform::Platform;
use crate::collector::traits::{CollectedData, DataCollector, put, put_opt};
use crate::keys;
use crate::storage::KeyValueStore;

const MILLIS_PER_MINUTE: i64 = 60 * 1000;

/// Collects timezone, platform, device identifiers, language and screen size.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeviceDataCollector;

impl DeviceDataCollector {
    pub fn new() -> Self {
        Self
    }
}

/// Formats a raw UTC offset as `HH:MM`, prefixed with `-` when negative.
///
/// Sub-minute remainders are truncated. An offset that truncates to zero
/// minutes is reported without a sign.
pub fn format_timezone_offset(raw_offset_ms: i64) -> String {
    let total_minutes = (raw_offset_ms / MILLIS_PER_MINUTE).abs();
    let sign = if raw_offset_ms < 0 && total_minutes > 0 {
        "-"
    } else {
        ""
    };
    format!("{}{:02}:{:02}", sign, total_minutes / 60, total_minutes % 60)
}

/// Builds a new device-agent identifier: `<uuid>:<epoch-millis>`.
pub fn generate_device_agent_id(now_ms: i64) -> String {
    format!("{}:{}", Uuid::new_v4(), now_ms)
}

/// Returns the persisted device-agent identifier, creating it on first use.
///
/// Creation goes through the store's set-if-absent, so concurrent first
/// callers all receive the identifier that was stored first. Storage
/// failures are logged and reported as `None`.
pub fn device_agent_id(store: &dyn KeyValueStore) -> Option<String> {
    let namespace = keys::DEVICE_AGENT_ID_NAMESPACE;
    let key = keys::DEVICE_AGENT_ID_STORAGE_KEY;

    match store.get(namespace, key) {
        Ok(Some(id)) => return Some(id),
        Ok(None) => {}
        Err(e) => {
            warn!("failed to read device agent id: {}", e);
            return None;
        }
    }

    let candidate = generate_device_agent_id(Utc::now().timestamp_millis());
    match store.put_if_absent(namespace, key, &candidate) {
        Ok(stored) => {
            if stored == candidate {
                debug!("generated new device agent id");
            }
            Some(stored)
        }
        Err(e) => {
            warn!("failed to persist device agent id: {}", e);
            None
        }
    }
}

impl DataCollector for DeviceDataCollector {
    fn name(&self) -> &'static str {
        "device"
    }

    fn collect(&self, platform: &dyn Platform) -> CollectedData {
        let display = platform.display_metrics();

        let mut data = CollectedData::new();
        put(
            &mut data,
            keys::CLIENT_TIMEZONE,
            format_timezone_offset(platform.raw_utc_offset_ms()),
        );
        put(&mut data, keys::PLATFORM, platform.platform_name());
        put_opt(
            &mut data,
            keys::THIRD_PARTY_DEVICE_ID,
            platform.third_party_device_id(),
        );
        put_opt(
            &mut data,
            keys::DEVICE_AGENT_ID,
            device_agent_id(platform.storage()),
        );
        put_opt(&mut data, keys::DEVICE_LANGUAGE, platform.locale());
        put_opt(
            &mut data,
            keys::SCREEN_HEIGHT_PIXELS,
            display.map(|d| d.height_px.to_string()),
        );
        put_opt(
            &mut data,
            keys::SCREEN_WIDTH_PIXELS,
            display.map(|d| d.width_px.to_string()),
        );
        data
    }
}
