//! Theme state and the presentation tokens derived from it.
//!
//! The active theme is an explicit [`ThemeMode`] carried in application
//! state; everything else (token bundles, component overrides, chart
//! styling, the `iced` theme) is computed from it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
    /// Follow the operating system preference.
    System,
}

impl ThemeMode {
    pub fn is_dark(self, os_prefers_dark: bool) -> bool {
        match self {
            ThemeMode::Light => false,
            ThemeMode::Dark => true,
            ThemeMode::System => os_prefers_dark,
        }
    }

    /// Flips between explicit light and dark. `System` settles on the
    /// opposite of whatever it currently resolves to.
    pub fn toggled(self, os_prefers_dark: bool) -> Self {
        if self.is_dark(os_prefers_dark) {
            ThemeMode::Light
        } else {
            ThemeMode::Dark
        }
    }

    pub fn vars(self, os_prefers_dark: bool) -> ThemeVars {
        theme_vars(self.is_dark(os_prefers_dark))
    }

    pub fn iced_theme(self, os_prefers_dark: bool) -> iced::Theme {
        if self.is_dark(os_prefers_dark) {
            iced::Theme::Dark
        } else {
            iced::Theme::Light
        }
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeMode::Light => write!(f, "Light"),
            ThemeMode::Dark => write!(f, "Dark"),
            ThemeMode::System => write!(f, "System"),
        }
    }
}

/// Named presentation tokens for one theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeVars {
    pub is_dark: bool,
    pub text_color: &'static str,
    pub bg_color: &'static str,
    pub border_color: &'static str,
    pub primary_color: &'static str,
    pub secondary_color: &'static str,
    pub danger_color: &'static str,
    pub success_color: &'static str,
    pub card_bg_color: &'static str,
    pub hover_color: &'static str,
}

const DARK_VARS: ThemeVars = ThemeVars {
    is_dark: true,
    text_color: "dark-text",
    bg_color: "dark-bg",
    border_color: "dark-border",
    primary_color: "text-blue-400",
    secondary_color: "dark-text-secondary",
    danger_color: "text-red-400",
    success_color: "text-green-400",
    card_bg_color: "dark-card",
    hover_color: "hover:bg-gray-700",
};

const LIGHT_VARS: ThemeVars = ThemeVars {
    is_dark: false,
    text_color: "text-gray-800",
    bg_color: "bg-white",
    border_color: "border-gray-200",
    primary_color: "text-blue-600",
    secondary_color: "text-gray-600",
    danger_color: "text-red-600",
    success_color: "text-green-600",
    card_bg_color: "bg-white",
    hover_color: "hover:bg-gray-100",
};

pub fn theme_vars(is_dark: bool) -> ThemeVars {
    if is_dark {
        DARK_VARS
    } else {
        LIGHT_VARS
    }
}

/// Hex color for a token from [`ThemeVars`].
pub fn token_hex(token: &str) -> Option<&'static str> {
    let hex = match token {
        "dark-text" => "#c9d1d9",
        "dark-bg" => "#0f172a",
        "dark-border" => "#334155",
        "dark-text-secondary" => "#94a3b8",
        "dark-card" => "#1e293b",
        "text-blue-400" => "#60a5fa",
        "text-red-400" => "#f87171",
        "text-green-400" => "#4ade80",
        "hover:bg-gray-700" => "#374151",
        "text-gray-800" => "#1f2937",
        "bg-white" => "#ffffff",
        "border-gray-200" => "#e5e7eb",
        "text-blue-600" => "#2563eb",
        "text-gray-600" => "#4b5563",
        "text-red-600" => "#dc2626",
        "text-green-600" => "#16a34a",
        "hover:bg-gray-100" => "#f3f4f6",
        _ => return None,
    };
    Some(hex)
}

/// Parses `#rrggbb` (or `rrggbb`) into its channels.
pub fn hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorGroup {
    pub base: &'static str,
    pub hover: &'static str,
    pub pressed: &'static str,
    pub suppl: &'static str,
}

const PRIMARY_GROUP: ColorGroup = ColorGroup {
    base: "#2080f0",
    hover: "#4098fc",
    pressed: "#1060d9",
    suppl: "#4098fc",
};

const SUCCESS_GROUP: ColorGroup = ColorGroup {
    base: "#18a058",
    hover: "#36ad6a",
    pressed: "#0c7a43",
    suppl: "#36ad6a",
};

const WARNING_GROUP: ColorGroup = ColorGroup {
    base: "#f0a020",
    hover: "#fcb040",
    pressed: "#d99010",
    suppl: "#fcb040",
};

const ERROR_GROUP: ColorGroup = ColorGroup {
    base: "#d03050",
    hover: "#de576d",
    pressed: "#ab1f3f",
    suppl: "#de576d",
};

/// Component-level styling layered over the base theme.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeOverrides {
    pub primary: ColorGroup,
    pub info: ColorGroup,
    pub success: ColorGroup,
    pub warning: ColorGroup,
    pub error: ColorGroup,
    pub card_radius: f32,
    pub card_embedded_color: Option<&'static str>,
    pub button_radius_medium: f32,
    pub button_radius_small: f32,
    pub button_text_primary: Option<&'static str>,
    pub table_header_color: &'static str,
    pub table_row_hover_color: &'static str,
    pub table_radius: f32,
    pub input_radius: f32,
    pub menu_radius: f32,
}

impl ThemeOverrides {
    pub fn light() -> Self {
        Self {
            primary: PRIMARY_GROUP,
            info: PRIMARY_GROUP,
            success: SUCCESS_GROUP,
            warning: WARNING_GROUP,
            error: ERROR_GROUP,
            card_radius: 8.0,
            card_embedded_color: None,
            button_radius_medium: 6.0,
            button_radius_small: 4.0,
            button_text_primary: None,
            table_header_color: "rgba(243, 244, 246, 0.8)",
            table_row_hover_color: "rgba(243, 244, 246, 0.5)",
            table_radius: 8.0,
            input_radius: 6.0,
            menu_radius: 6.0,
        }
    }

    pub fn dark() -> Self {
        Self {
            card_embedded_color: Some("rgba(30, 41, 59, 0.7)"),
            button_text_primary: Some("#f1f5f9"),
            table_header_color: "rgba(15, 23, 42, 0.8)",
            table_row_hover_color: "rgba(30, 41, 59, 0.5)",
            ..Self::light()
        }
    }

    pub fn for_mode(is_dark: bool) -> Self {
        if is_dark {
            Self::dark()
        } else {
            Self::light()
        }
    }
}

/// Styling handed to chart renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartTheme {
    pub background: &'static str,
    pub text_color: &'static str,
    pub title_color: &'static str,
    pub line_width: f32,
    pub symbol_size: f32,
    /// Gauge bands as (upper bound fraction, color).
    pub gauge_bands: [(f32, &'static str); 3],
    pub gauge_width: f32,
}

impl ChartTheme {
    pub fn for_mode(is_dark: bool) -> Self {
        if is_dark {
            Self {
                background: "transparent",
                text_color: "#c9d1d9",
                title_color: "#f1f5f9",
                line_width: 2.0,
                symbol_size: 6.0,
                gauge_bands: [(0.3, "#5CCFE6"), (0.7, "#3B82F6"), (1.0, "#F43F5E")],
                gauge_width: 15.0,
            }
        } else {
            Self {
                background: "transparent",
                text_color: "#1f2937",
                title_color: "#111827",
                line_width: 2.0,
                symbol_size: 6.0,
                gauge_bands: [(0.3, "#67e0e3"), (0.7, "#37a2da"), (1.0, "#fd666d")],
                gauge_width: 15.0,
            }
        }
    }

    /// Color of the gauge band covering `fraction` (clamped to 0..=1).
    pub fn gauge_color(&self, fraction: f32) -> &'static str {
        let fraction = fraction.clamp(0.0, 1.0);
        self.gauge_bands
            .iter()
            .find(|(upper, _)| fraction <= *upper)
            .map(|(_, color)| *color)
            .unwrap_or(self.gauge_bands[2].1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_vars_is_deterministic() {
        let first = theme_vars(true);
        let second = theme_vars(true);
        assert_eq!(first, second);
        assert!(first.is_dark);
        assert_eq!(first.hover_color, "hover:bg-gray-700");
    }

    #[test]
    fn light_bundle() {
        let vars = theme_vars(false);
        assert!(!vars.is_dark);
        assert_eq!(vars.text_color, "text-gray-800");
        assert_eq!(vars.bg_color, "bg-white");
        assert_eq!(vars.card_bg_color, "bg-white");
    }

    #[test]
    fn bundle_serializes_ten_fields() {
        let json = serde_json::to_value(theme_vars(false)).unwrap();
        let fields = json.as_object().unwrap();
        assert_eq!(fields.len(), 10);
        assert_eq!(fields["isDark"], serde_json::Value::Bool(false));
        assert!(fields.contains_key("cardBgColor"));
    }

    #[test]
    fn every_token_has_a_color() {
        for vars in [theme_vars(true), theme_vars(false)] {
            for token in [
                vars.text_color,
                vars.bg_color,
                vars.border_color,
                vars.primary_color,
                vars.secondary_color,
                vars.danger_color,
                vars.success_color,
                vars.card_bg_color,
                vars.hover_color,
            ] {
                let hex = token_hex(token).unwrap_or_else(|| panic!("no color for {token}"));
                assert!(hex_rgb(hex).is_some());
            }
        }
    }

    #[test]
    fn system_mode_follows_os() {
        assert!(ThemeMode::System.is_dark(true));
        assert!(!ThemeMode::System.is_dark(false));
        assert!(ThemeMode::Dark.is_dark(false));
        assert!(!ThemeMode::Light.is_dark(true));
        assert_eq!(ThemeMode::System.vars(true), theme_vars(true));
    }

    #[test]
    fn toggling_settles_on_explicit_mode() {
        assert_eq!(ThemeMode::Light.toggled(false), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.toggled(false), ThemeMode::Light);
        assert_eq!(ThemeMode::System.toggled(true), ThemeMode::Light);
        assert_eq!(ThemeMode::System.toggled(false), ThemeMode::Dark);
    }

    #[test]
    fn iced_theme_matches_mode() {
        assert!(matches!(ThemeMode::Dark.iced_theme(false), iced::Theme::Dark));
        assert!(matches!(
            ThemeMode::System.iced_theme(false),
            iced::Theme::Light
        ));
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(hex_rgb("#2080f0"), Some((0x20, 0x80, 0xf0)));
        assert_eq!(hex_rgb("FFFFFF"), Some((255, 255, 255)));
        assert_eq!(hex_rgb("#fff"), None);
        assert_eq!(hex_rgb("#zzzzzz"), None);
    }

    #[test]
    fn dark_overrides_keep_shared_palette() {
        let light = ThemeOverrides::light();
        let dark = ThemeOverrides::dark();
        assert_eq!(light.primary, dark.primary);
        assert_eq!(light.error.base, "#d03050");
        assert_eq!(dark.button_text_primary, Some("#f1f5f9"));
        assert_eq!(light.card_embedded_color, None);
        assert_eq!(ThemeOverrides::for_mode(true), dark);
    }

    #[test]
    fn gauge_bands() {
        let chart = ChartTheme::for_mode(false);
        assert_eq!(chart.gauge_color(0.1), "#67e0e3");
        assert_eq!(chart.gauge_color(0.5), "#37a2da");
        assert_eq!(chart.gauge_color(4.0), "#fd666d");
        assert_eq!(ChartTheme::for_mode(true).title_color, "#f1f5f9");
    }
}
