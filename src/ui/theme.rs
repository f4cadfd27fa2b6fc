use std::fs;

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub card: String,
    pub accent: String,
    pub accent_dim: String,
    pub border: String,
    pub border_focused: String,
    pub option_correct: String,
    pub option_incorrect: String,
    pub muted: String,
    pub bar_filled: String,
    pub bar_empty: String,
    pub error: String,
    pub success: String,
}

impl Theme {
    /// Bundled theme names in a stable order; `theme_index` from the user's
    /// settings indexes into this list.
    pub fn available_themes() -> Vec<String> {
        let mut names: Vec<String> = ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect();
        names.sort();
        names
    }

    pub fn load(name: &str) -> Option<Self> {
        // Try user themes dir
        if let Some(config_dir) = dirs::config_dir() {
            let user_theme_path = config_dir
                .join("kotoba")
                .join("themes")
                .join(format!("{name}.toml"));
            if let Ok(content) = fs::read_to_string(&user_theme_path) {
                if let Ok(theme) = toml::from_str::<Theme>(&content) {
                    return Some(theme);
                }
            }
        }

        // Try bundled themes
        let filename = format!("{name}.toml");
        if let Some(file) = ThemeAssets::get(&filename) {
            if let Ok(content) = std::str::from_utf8(file.data.as_ref()) {
                if let Ok(theme) = toml::from_str::<Theme>(content) {
                    return Some(theme);
                }
            }
        }

        None
    }

    pub fn load_by_index(index: usize) -> Self {
        let names = Self::available_themes();
        names
            .get(index % names.len().max(1))
            .and_then(|name| Self::load(name))
            .unwrap_or_default()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load("midnight").unwrap_or_else(|| Self {
            name: "default".to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#0c0a14".to_string(),
            fg: "#e4e4ef".to_string(),
            card: "#1f2937".to_string(),
            accent: "#818cf8".to_string(),
            accent_dim: "#3730a3".to_string(),
            border: "#374151".to_string(),
            border_focused: "#818cf8".to_string(),
            option_correct: "#34d399".to_string(),
            option_incorrect: "#fb7185".to_string(),
            muted: "#6b7280".to_string(),
            bar_filled: "#818cf8".to_string(),
            bar_empty: "#1f2937".to_string(),
            error: "#fb7185".to_string(),
            success: "#34d399".to_string(),
        }
    }
}

impl ThemeColors {
    pub fn parse_color(hex: &str) -> Color {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Color::Rgb(r, g, b);
            }
        }
        Color::White
    }

    pub fn bg(&self) -> Color { Self::parse_color(&self.bg) }
    pub fn fg(&self) -> Color { Self::parse_color(&self.fg) }
    pub fn card(&self) -> Color { Self::parse_color(&self.card) }
    pub fn accent(&self) -> Color { Self::parse_color(&self.accent) }
    pub fn accent_dim(&self) -> Color { Self::parse_color(&self.accent_dim) }
    pub fn border(&self) -> Color { Self::parse_color(&self.border) }
    pub fn border_focused(&self) -> Color { Self::parse_color(&self.border_focused) }
    pub fn option_correct(&self) -> Color { Self::parse_color(&self.option_correct) }
    pub fn option_incorrect(&self) -> Color { Self::parse_color(&self.option_incorrect) }
    pub fn muted(&self) -> Color { Self::parse_color(&self.muted) }
    pub fn bar_filled(&self) -> Color { Self::parse_color(&self.bar_filled) }
    pub fn bar_empty(&self) -> Color { Self::parse_color(&self.bar_empty) }
    pub fn error(&self) -> Color { Self::parse_color(&self.error) }
    pub fn success(&self) -> Color { Self::parse_color(&self.success) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(ThemeColors::parse_color("#ff0000"), Color::Rgb(255, 0, 0));
        assert_eq!(ThemeColors::parse_color("818cf8"), Color::Rgb(129, 140, 248));
        assert_eq!(ThemeColors::parse_color("nonsense"), Color::White);
    }

    #[test]
    fn test_bundled_themes_load_by_index() {
        let names = Theme::available_themes();
        assert!(names.len() >= 4);
        for i in 0..names.len() {
            let theme = Theme::load_by_index(i);
            assert!(!theme.name.is_empty());
        }
        // Out-of-range index wraps instead of panicking.
        let _ = Theme::load_by_index(names.len() + 1);
    }
}
