//! Browser profile record as stored in the dataset.
//!
//! Field names follow the dataset's camelCase wire names so filters can address
//! them exactly as they appear in the JSON.

use serde::{Deserialize, Serialize};

/// Effective connection class reported by the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectiveType {
    /// `3g`
    #[serde(rename = "3g")]
    ThreeG,
    /// `4g`
    #[serde(rename = "4g")]
    FourG,
}

/// Physical link type, when the profile reports one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    /// Mobile network.
    Cellular,
    /// Wireless LAN.
    Wifi,
}

/// Network quality attributes (`navigator.connection`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    /// Estimated bandwidth in Mbit/s.
    pub downlink: f64,
    /// Effective connection class.
    pub effective_type: EffectiveType,
    /// Estimated round-trip time in milliseconds.
    pub rtt: f64,
    /// Upper bound on downlink, if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downlink_max: Option<f64>,
    /// Link type, if reported.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub connection_type: Option<ConnectionType>,
}

/// `navigator.platform` values present in the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    /// `iPad`
    #[serde(rename = "iPad")]
    IPad,
    /// `iPhone`
    #[serde(rename = "iPhone")]
    IPhone,
    /// `Linux aarch64`
    #[serde(rename = "Linux aarch64")]
    LinuxAarch64,
    /// `Linux armv81`
    #[serde(rename = "Linux armv81")]
    LinuxArmv81,
    /// `Linux armv8l`
    #[serde(rename = "Linux armv8l")]
    LinuxArmv8l,
    /// `Linux x86_64`
    #[serde(rename = "Linux x86_64")]
    LinuxX86_64,
    /// `MacIntel`
    #[serde(rename = "MacIntel")]
    MacIntel,
    /// `Win32`
    #[serde(rename = "Win32")]
    Win32,
}

/// `navigator.vendor` values present in the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Vendor {
    /// Safari.
    #[serde(rename = "Apple Computer, Inc.")]
    Apple,
    /// Chromium family.
    #[serde(rename = "Google Inc.")]
    Google,
    /// Firefox reports an empty vendor.
    #[serde(rename = "")]
    Empty,
}

/// One synthetic client profile.
///
/// An explicit `null` and an absent key both load as `None`; the dataset keeps
/// the raw row so filters can still tell them apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    /// Always `Netscape` in practice.
    pub app_name: String,
    /// Network quality attributes.
    pub connection: Connection,
    /// `navigator.language`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// `navigator.oscpu`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oscpu: Option<String>,
    /// `navigator.platform`
    pub platform: Platform,
    /// `navigator.plugins.length`
    pub plugins_length: u32,
    /// `screen.height`
    pub screen_height: u32,
    /// `screen.width`
    pub screen_width: u32,
    /// Identity string sent as the `User-Agent` header.
    pub user_agent: String,
    /// `navigator.vendor`
    pub vendor: Vendor,
    /// Relative selection weight; positive for every loaded record.
    pub weight: f64,
}

impl ProfileRecord {
    /// Identity string of this profile.
    #[must_use]
    pub fn identity(&self) -> &str {
        &self.user_agent
    }
}
