//! Reserved configuration keys.

pub const BACKGROUND_COLOR: &str = "background_color";
pub const PRIMARY_COLOR: &str = "primary_color";
pub const SECONDARY_COLOR: &str = "secondary_color";
pub const ACCENT_COLOR: &str = "accent_color";

/// Keys owned by the client palette on every screen that does not own brand colors.
pub const GLOBAL_COLOR_KEYS: [&str; 4] =
    [BACKGROUND_COLOR, PRIMARY_COLOR, SECONDARY_COLOR, ACCENT_COLOR];

pub const NAVIGATION_CONFIG: &str = "navigation_config";

pub const LOGO_SIZE: &str = "logo_size";
pub const LOGO_POSITION: &str = "logo_position";
pub const LOGO_URL: &str = "logo_url";

/// The only defaults a brand-owning screen takes from its registry entry.
pub const BRAND_SCREEN_KEYS: [&str; 4] = [LOGO_SIZE, LOGO_POSITION, LOGO_URL, NAVIGATION_CONFIG];

/// Keys a brand-owning screen still reads from its saved override.
pub const BRAND_SCREEN_OVERRIDE_KEYS: [&str; 3] = [LOGO_SIZE, LOGO_POSITION, NAVIGATION_CONFIG];

/// Returns `true` for one of the four palette-owned keys.
#[must_use]
pub fn is_global_color_key(key: &str) -> bool {
    GLOBAL_COLOR_KEYS.contains(&key)
}
