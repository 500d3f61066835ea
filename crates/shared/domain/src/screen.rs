use crate::ConfigMap;
use crate::constants::NAVIGATION_CONFIG;
use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const OWNS_BRAND_COLORS: &str = "owns_brand_colors";
pub const ENTRY: &str = "entry";

bitflags! {
    /// Declarative per-screen capabilities the resolver and session branch on.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct ScreenCapabilities: u32 {
        /// Colors edited on this screen are written back into the client brand.
        const OWNS_BRAND_COLORS = 1 << 0;
        /// The screen a new editing session opens on.
        const ENTRY = 1 << 1;
    }
}

impl From<&str> for ScreenCapabilities {
    fn from(s: &str) -> Self {
        s.split(['|', ','])
            .map(str::trim)
            .map(|flag| match flag {
                OWNS_BRAND_COLORS => Self::OWNS_BRAND_COLORS,
                ENTRY => Self::ENTRY,
                _ => Self::empty(),
            })
            .fold(Self::empty(), |acc, flag| acc | flag)
    }
}

impl From<u32> for ScreenCapabilities {
    fn from(bits: u32) -> Self {
        Self::from_bits_truncate(bits)
    }
}

impl Serialize for ScreenCapabilities {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u32(self.bits())
    }
}

impl<'de> Deserialize<'de> for ScreenCapabilities {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bits = u32::deserialize(deserializer)?;
        Ok(Self::from_bits_retain(bits))
    }
}

/// Free-form descriptive data attached to a screen definition.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScreenMetadata {
    pub display_name: String,
    pub description: String,
    pub category: String,
}

impl ScreenMetadata {
    #[must_use]
    pub fn new(display_name: impl Into<String>) -> Self {
        Self { display_name: display_name.into(), ..Self::default() }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}

/// A persisted per-(client, screen) settings patch.
///
/// `settings` may carry the reserved `navigation_config` map next to flat values.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScreenOverride {
    pub client_id: String,
    pub screen_id: String,
    pub settings: ConfigMap,
}

impl ScreenOverride {
    #[must_use]
    pub fn new(client_id: impl Into<String>, screen_id: impl Into<String>, settings: ConfigMap) -> Self {
        Self { client_id: client_id.into(), screen_id: screen_id.into(), settings }
    }

    /// The `navigation_config` sub-map, if present and well-formed.
    #[must_use]
    pub fn navigation_config(&self) -> Option<&ConfigMap> {
        self.settings.get(NAVIGATION_CONFIG).and_then(serde_json::Value::as_object)
    }
}

/// One entry of an approach's ordered screen list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproachScreen {
    pub screen_id: String,
    pub order_index: u32,
    #[serde(default)]
    pub display_name: String,
}

impl ApproachScreen {
    #[must_use]
    pub fn new(screen_id: impl Into<String>, order_index: u32, display_name: impl Into<String>) -> Self {
        Self { screen_id: screen_id.into(), order_index, display_name: display_name.into() }
    }
}
