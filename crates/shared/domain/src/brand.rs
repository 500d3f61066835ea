use crate::constants::{ACCENT_COLOR, BACKGROUND_COLOR, PRIMARY_COLOR, SECONDARY_COLOR};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// One of the four brand palette slots.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ColorRole {
    Primary,
    Secondary,
    Accent,
    Background,
}

impl ColorRole {
    /// The screen-level key this role owns on non-brand screens.
    #[must_use]
    pub const fn global_key(self) -> &'static str {
        match self {
            Self::Primary => PRIMARY_COLOR,
            Self::Secondary => SECONDARY_COLOR,
            Self::Accent => ACCENT_COLOR,
            Self::Background => BACKGROUND_COLOR,
        }
    }

    /// Inverse of [`ColorRole::global_key`].
    #[must_use]
    pub fn from_global_key(key: &str) -> Option<Self> {
        match key {
            PRIMARY_COLOR => Some(Self::Primary),
            SECONDARY_COLOR => Some(Self::Secondary),
            ACCENT_COLOR => Some(Self::Accent),
            BACKGROUND_COLOR => Some(Self::Background),
            _ => None,
        }
    }
}

/// A client's four-color scheme. Empty strings mean "not set".
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandPalette {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
}

impl BrandPalette {
    /// Returns the color for `role`, or `None` when it is empty.
    #[must_use]
    pub fn get(&self, role: ColorRole) -> Option<&str> {
        let value = match role {
            ColorRole::Primary => &self.primary,
            ColorRole::Secondary => &self.secondary,
            ColorRole::Accent => &self.accent,
            ColorRole::Background => &self.background,
        };
        (!value.trim().is_empty()).then_some(value.as_str())
    }

    pub fn set(&mut self, role: ColorRole, value: impl Into<String>) {
        let slot = match role {
            ColorRole::Primary => &mut self.primary,
            ColorRole::Secondary => &mut self.secondary,
            ColorRole::Accent => &mut self.accent,
            ColorRole::Background => &mut self.background,
        };
        *slot = value.into();
    }

    /// Non-empty colors in role order.
    pub fn colors(&self) -> impl Iterator<Item = (ColorRole, &str)> {
        [ColorRole::Primary, ColorRole::Secondary, ColorRole::Accent, ColorRole::Background]
            .into_iter()
            .filter_map(|role| self.get(role).map(|color| (role, color)))
    }
}

/// Per-client branding. One per client, created with the client.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientBrandConfig {
    pub client_id: String,
    pub app_name: String,
    pub logo_url: String,
    pub palette: BrandPalette,
    pub approach_id: Option<String>,
}

impl ClientBrandConfig {
    /// An empty brand for `client_id`; used when the real one cannot be loaded.
    #[must_use]
    pub fn unbranded(client_id: impl Into<String>) -> Self {
        Self { client_id: client_id.into(), ..Self::default() }
    }
}

/// Partial palette update; `None` leaves the slot untouched.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PalettePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

impl PalettePatch {
    #[must_use]
    pub const fn get(&self, role: ColorRole) -> Option<&String> {
        match role {
            ColorRole::Primary => self.primary.as_ref(),
            ColorRole::Secondary => self.secondary.as_ref(),
            ColorRole::Accent => self.accent.as_ref(),
            ColorRole::Background => self.background.as_ref(),
        }
    }

    pub fn set(&mut self, role: ColorRole, value: impl Into<String>) {
        let value = Some(value.into());
        match role {
            ColorRole::Primary => self.primary = value,
            ColorRole::Secondary => self.secondary = value,
            ColorRole::Accent => self.accent = value,
            ColorRole::Background => self.background = value,
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.primary.is_none()
            && self.secondary.is_none()
            && self.accent.is_none()
            && self.background.is_none()
    }

    pub fn apply_to(&self, palette: &mut BrandPalette) {
        for role in [ColorRole::Primary, ColorRole::Secondary, ColorRole::Accent, ColorRole::Background]
        {
            if let Some(value) = self.get(role) {
                palette.set(role, value.clone());
            }
        }
    }
}

/// Partial brand update sent to the gateway.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrandPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approach_id: Option<String>,
    pub palette: PalettePatch,
}

impl BrandPatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.app_name.is_none()
            && self.logo_url.is_none()
            && self.approach_id.is_none()
            && self.palette.is_empty()
    }

    #[must_use]
    pub const fn touches_palette(&self) -> bool {
        !self.palette.is_empty()
    }

    /// Applies the patch in place. An empty `approach_id` clears the approach.
    pub fn apply_to(&self, brand: &mut ClientBrandConfig) {
        if let Some(name) = &self.app_name {
            brand.app_name.clone_from(name);
        }
        if let Some(url) = &self.logo_url {
            brand.logo_url.clone_from(url);
        }
        if let Some(approach) = &self.approach_id {
            brand.approach_id = (!approach.is_empty()).then(|| approach.clone());
        }
        self.palette.apply_to(&mut brand.palette);
    }
}
