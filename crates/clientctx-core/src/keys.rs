//! Context-data key vocabulary.
//!
//! These strings are consumed by the remote service and must not change.

// Application
pub const APPLICATION_NAME: &str = "ApplicationName";
pub const APPLICATION_TARGET_SDK: &str = "ApplicationTargetSdk";
pub const APPLICATION_VERSION: &str = "ApplicationVersion";

// Build
pub const DEVICE_BRAND: &str = "DeviceBrand";
pub const DEVICE_FINGERPRINT: &str = "DeviceFingerprint";
pub const DEVICE_HARDWARE: &str = "DeviceHardware";
pub const DEVICE_NAME: &str = "DeviceName";
pub const PRODUCT: &str = "Product";
pub const BUILD_TYPE: &str = "BuildType";
pub const DEVICE_OS_RELEASE_VERSION: &str = "DeviceOsReleaseVersion";
pub const DEVICE_SDK_VERSION: &str = "DeviceSdkVersion";

// Device
pub const CLIENT_TIMEZONE: &str = "ClientTimezone";
pub const PLATFORM: &str = "Platform";
pub const THIRD_PARTY_DEVICE_ID: &str = "ThirdPartyDeviceId";
pub const DEVICE_AGENT_ID: &str = "DeviceId";
pub const DEVICE_LANGUAGE: &str = "DeviceLanguage";
pub const SCREEN_HEIGHT_PIXELS: &str = "ScreenHeightPixels";
pub const SCREEN_WIDTH_PIXELS: &str = "ScreenWidthPixels";

// Telephony
pub const HAS_SIM_CARD: &str = "HasSimCard";
pub const IS_NETWORK_ROAMING: &str = "IsNetworkRoaming";
pub const CARRIER: &str = "Carrier";
pub const NETWORK_TYPE: &str = "NetworkType";
pub const PHONE_TYPE: &str = "PhoneType";
pub const SIM_COUNTRY: &str = "SimCountry";
pub const SIM_OPERATOR: &str = "SimOperator";

/// Storage namespace holding the device-agent identifier.
pub const DEVICE_AGENT_ID_NAMESPACE: &str = "AWS.Cognito.ContextData";
/// Storage key of the device-agent identifier within its namespace.
pub const DEVICE_AGENT_ID_STORAGE_KEY: &str = "CognitoDeviceId";
