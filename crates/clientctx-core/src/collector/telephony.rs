//! Telephony radio state collector.
//!
//! Not part of the default aggregation; callers opt in explicitly.

use crate::collector::platform::{Platform, SimState};
use crate::collector::traits::{CollectedData, DataCollector, put, put_opt};
use crate::keys;

/// Collects SIM, roaming, carrier and radio type facts.
#[derive(Debug, Default, Clone, Copy)]
pub struct TelephonyDataCollector;

impl TelephonyDataCollector {
    pub fn new() -> Self {
        Self
    }
}

impl DataCollector for TelephonyDataCollector {
    fn name(&self) -> &'static str {
        "telephony"
    }

    fn collect(&self, platform: &dyn Platform) -> CollectedData {
        let mut data = CollectedData::new();
        let Some(telephony) = platform.telephony() else {
            return data;
        };

        put(
            &mut data,
            keys::HAS_SIM_CARD,
            (telephony.sim_state != SimState::Absent).to_string(),
        );
        put(
            &mut data,
            keys::IS_NETWORK_ROAMING,
            telephony.network_roaming.to_string(),
        );
        put_opt(&mut data, keys::CARRIER, telephony.carrier);
        put(&mut data, keys::NETWORK_TYPE, telephony.network_type.to_string());
        put(&mut data, keys::PHONE_TYPE, telephony.phone_type.to_string());

        // SIM details are only meaningful once the card is unlocked.
        if telephony.sim_state == SimState::Ready {
            put_opt(&mut data, keys::SIM_COUNTRY, telephony.sim_country_iso);
            put_opt(&mut data, keys::SIM_OPERATOR, telephony.sim_operator_name);
        }
        data
    }
}
