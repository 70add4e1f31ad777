//! Aggregator that runs the registered collectors and merges their output.
//!
//! The `ContextDataAggregator` owns an ordered collector list fixed at
//! construction. Collectors run in list order on the calling thread; when
//! two collectors emit the same key the later one wins. Absent values are
//! removed before the map is returned.

use std::time::{Duration, Instant};

use tracing::trace;

use crate::collector::{
    ApplicationDataCollector, BuildDataCollector, CollectedData, ContextData, DataCollector,
    DeviceDataCollector, Platform, TelephonyDataCollector,
};

/// Timing information for one aggregation run.
#[derive(Debug, Clone, Default)]
pub struct AggregationTiming {
    /// Total aggregation time.
    pub total: Duration,
    /// Per-collector time, in collector order.
    pub collectors: Vec<(&'static str, Duration)>,
}

/// Runs a fixed list of collectors and returns one clean merged map.
pub struct ContextDataAggregator {
    collectors: Vec<Box<dyn DataCollector>>,
}

impl Default for ContextDataAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextDataAggregator {
    /// Creates an aggregator with the default collectors:
    /// application, build and device. Telephony is not included.
    pub fn new() -> Self {
        Self::with_collectors(vec![
            Box::new(ApplicationDataCollector::new()),
            Box::new(BuildDataCollector::new()),
            Box::new(DeviceDataCollector::new()),
        ])
    }

    /// Creates an aggregator over an explicit collector list.
    pub fn with_collectors(collectors: Vec<Box<dyn DataCollector>>) -> Self {
        Self { collectors }
    }

    /// Appends the telephony collector.
    pub fn with_telephony(mut self) -> Self {
        self.collectors.push(Box::new(TelephonyDataCollector::new()));
        self
    }

    /// Names of the registered collectors, in run order.
    pub fn collector_names(&self) -> Vec<&'static str> {
        self.collectors.iter().map(|c| c.name()).collect()
    }

    /// Runs every collector and returns the merged, sanitized data.
    pub fn aggregated_data(&self, platform: &dyn Platform) -> ContextData {
        self.aggregated_data_timed(platform).0
    }

    /// Same as [`aggregated_data`](Self::aggregated_data), also returning timings.
    pub fn aggregated_data_timed(&self, platform: &dyn Platform) -> (ContextData, AggregationTiming) {
        let start = Instant::now();
        let mut timing = AggregationTiming::default();
        let mut merged = CollectedData::new();

        for collector in &self.collectors {
            let collector_start = Instant::now();
            let data = collector.collect(platform);
            trace!("collector {} produced {} keys", collector.name(), data.len());
            merged.extend(data);
            timing
                .collectors
                .push((collector.name(), collector_start.elapsed()));
        }

        let data = strip_absent(merged);
        timing.total = start.elapsed();
        (data, timing)
    }
}

/// Drops every entry whose value is absent.
fn strip_absent(data: CollectedData) -> ContextData {
    data.into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::{DeviceProfile, PlatformError};
    use crate::keys;

    /// Collector emitting a fixed map.
    struct FakeCollector {
        name: &'static str,
        entries: Vec<(&'static str, Option<&'static str>)>,
    }

    impl FakeCollector {
        fn boxed(
            name: &'static str,
            entries: Vec<(&'static str, Option<&'static str>)>,
        ) -> Box<dyn DataCollector> {
            Box::new(Self { name, entries })
        }
    }

    impl DataCollector for FakeCollector {
        fn name(&self) -> &'static str {
            self.name
        }

        fn collect(&self, _platform: &dyn Platform) -> CollectedData {
            self.entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
                .collect()
        }
    }

    #[test]
    fn test_merge_last_writer_wins() {
        let aggregator = ContextDataAggregator::with_collectors(vec![
            FakeCollector::boxed("a", vec![("k", Some("a"))]),
            FakeCollector::boxed("b", vec![("k", Some("b"))]),
        ]);

        let data = aggregator.aggregated_data(&DeviceProfile::default());
        assert_eq!(data.len(), 1);
        assert_eq!(data["k"], "b");
    }

    #[test]
    fn test_absent_values_removed() {
        let aggregator = ContextDataAggregator::with_collectors(vec![
            FakeCollector::boxed("a", vec![("present", Some("1")), ("missing", None)]),
            FakeCollector::boxed("b", vec![("also_missing", None)]),
        ]);

        let data = aggregator.aggregated_data(&DeviceProfile::default());
        assert_eq!(data.len(), 1);
        assert_eq!(data["present"], "1");
    }

    #[test]
    fn test_later_absent_value_removes_earlier_value() {
        let aggregator = ContextDataAggregator::with_collectors(vec![
            FakeCollector::boxed("a", vec![("k", Some("a"))]),
            FakeCollector::boxed("b", vec![("k", None)]),
        ]);

        let data = aggregator.aggregated_data(&DeviceProfile::default());
        assert!(!data.contains_key("k"));
    }

    #[test]
    fn test_default_collectors() {
        let aggregator = ContextDataAggregator::new();
        assert_eq!(
            aggregator.collector_names(),
            vec!["application", "build", "device"]
        );
        assert_eq!(
            aggregator.with_telephony().collector_names(),
            vec!["application", "build", "device", "telephony"]
        );
    }

    #[test]
    fn test_default_aggregation_typical_phone() {
        let platform = DeviceProfile::typical_phone();
        let data = ContextDataAggregator::new().aggregated_data(&platform);

        assert_eq!(data[keys::APPLICATION_VERSION], "4.2.1");
        assert_eq!(data[keys::DEVICE_BRAND], "google");
        assert_eq!(data[keys::CLIENT_TIMEZONE], "-05:00");
        assert_eq!(data[keys::SCREEN_WIDTH_PIXELS], "1080");
        assert!(data.contains_key(keys::DEVICE_AGENT_ID));
        // 3 application + 8 build + 7 device keys
        assert_eq!(data.len(), 18);
    }

    #[test]
    fn test_default_aggregation_excludes_telephony() {
        let platform = DeviceProfile::typical_phone();
        assert!(platform.telephony.is_some());

        let data = ContextDataAggregator::new().aggregated_data(&platform);
        for key in [
            keys::HAS_SIM_CARD,
            keys::IS_NETWORK_ROAMING,
            keys::CARRIER,
            keys::NETWORK_TYPE,
            keys::PHONE_TYPE,
            keys::SIM_COUNTRY,
            keys::SIM_OPERATOR,
        ] {
            assert!(!data.contains_key(key), "unexpected {}", key);
        }

        let data = ContextDataAggregator::new()
            .with_telephony()
            .aggregated_data(&platform);
        assert_eq!(data[keys::SIM_COUNTRY], "us");
    }

    #[test]
    fn test_version_lookup_failure_isolated() {
        let mut platform = DeviceProfile::typical_phone();
        platform.packages.clear();
        assert!(matches!(
            platform.package_version("com.example.wallet"),
            Err(PlatformError::PackageNotFound(_))
        ));

        let data = ContextDataAggregator::new().aggregated_data(&platform);
        assert!(!data.contains_key(keys::APPLICATION_VERSION));
        assert_eq!(data[keys::APPLICATION_NAME], "Example Wallet");
        assert_eq!(data[keys::DEVICE_BRAND], "google");
        assert_eq!(data[keys::DEVICE_NAME], "Pixel 7");
    }

    #[test]
    fn test_missing_values_never_emitted() {
        let platform = DeviceProfile::tablet_without_sim();
        let data = ContextDataAggregator::new()
            .with_telephony()
            .aggregated_data(&platform);

        assert!(!data.contains_key(keys::DEVICE_FINGERPRINT));
        assert!(!data.contains_key(keys::THIRD_PARTY_DEVICE_ID));
        assert!(!data.contains_key(keys::HAS_SIM_CARD));
        assert_eq!(data[keys::CLIENT_TIMEZONE], "09:00");
    }

    #[test]
    fn test_device_agent_id_stable_across_runs() {
        let platform = DeviceProfile::typical_phone();
        let aggregator = ContextDataAggregator::new();

        let first = aggregator.aggregated_data(&platform);
        let second = aggregator.aggregated_data(&platform);
        assert_eq!(first[keys::DEVICE_AGENT_ID], second[keys::DEVICE_AGENT_ID]);
    }

    #[test]
    fn test_timing_lists_collectors_in_order() {
        let aggregator = ContextDataAggregator::new();
        let (_, timing) = aggregator.aggregated_data_timed(&DeviceProfile::typical_phone());

        let names: Vec<_> = timing.collectors.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["application", "build", "device"]);
        assert!(timing.total >= timing.collectors[0].1);
    }

    #[test]
    fn test_aggregator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ContextDataAggregator>();
    }
}
