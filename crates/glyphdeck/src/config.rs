use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::render::highlight::Highlighter;

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "glyphdeck";

pub const DEFAULT_TITLE_DELIM: &str = ":";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scrollbar: Option<ScrollbarStyle>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    /// Splits slide titles into navigation categories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_delim: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fullscreen: Option<bool>,

    /// Syntect theme for fenced code. Unset follows the color theme.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_style: Option<String>,
}

/// Glyphs used to draw the scroll indicator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollbarStyle {
    pub slider: SliderStyle,
    pub gutter: GutterStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderStyle {
    /// Partial glyphs for the thumb's top edge, least to most covered.
    pub top_chars: String,
    pub fill: char,
    /// Partial glyphs for the thumb's bottom edge, least to most covered.
    pub bottom_chars: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GutterStyle {
    pub fill: char,
}

impl Default for SliderStyle {
    fn default() -> Self {
        Self {
            top_chars: "⡀⣀⣠⣤⣦⣶⣾⣿".to_string(),
            fill: '⣿',
            bottom_chars: "⠈⠉⠋⠛⠻⠿⡿⣿".to_string(),
        }
    }
}

impl Default for GutterStyle {
    fn default() -> Self {
        Self { fill: '▕' }
    }
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `glyphdeck config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(err) => {
                tracing::debug!("Using default config: {err}");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, format!("# glyphdeck configuration\n{yaml}"))?;
        Ok(())
    }

    pub fn theme(&self) -> Option<&str> {
        self.defaults.as_ref().and_then(|d| d.theme.as_deref())
    }

    pub fn title_delim(&self) -> &str {
        self.defaults
            .as_ref()
            .and_then(|d| d.title_delim.as_deref())
            .unwrap_or(DEFAULT_TITLE_DELIM)
    }

    pub fn fullscreen_enabled(&self) -> bool {
        self.defaults
            .as_ref()
            .and_then(|d| d.fullscreen)
            .unwrap_or(true)
    }

    pub fn code_style(&self) -> Option<&str> {
        self.defaults.as_ref().and_then(|d| d.code_style.as_deref())
    }

    /// This config with every unset value replaced by its default.
    /// `code_style` stays unset because its default depends on the theme.
    pub fn effective(&self) -> Self {
        Self {
            defaults: Some(DefaultsConfig {
                theme: Some(self.theme().unwrap_or("dark").to_string()),
                title_delim: Some(self.title_delim().to_string()),
                fullscreen: Some(self.fullscreen_enabled()),
                code_style: self.code_style().map(str::to_string),
            }),
            scrollbar: Some(self.scrollbar_style()),
        }
    }

    pub fn scrollbar_style(&self) -> ScrollbarStyle {
        self.scrollbar.clone().unwrap_or_default()
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "defaults.theme" => {
                match value {
                    "light" | "dark" => {}
                    _ => anyhow::bail!("Invalid theme: {value}. Must be 'light' or 'dark'."),
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .theme = Some(value.to_string());
            }
            "defaults.title_delim" => {
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .title_delim = Some(value.to_string());
            }
            "defaults.fullscreen" => {
                let enabled = match value {
                    "true" | "on" | "yes" => true,
                    "false" | "off" | "no" => false,
                    _ => anyhow::bail!("Invalid fullscreen: {value}. Must be 'true' or 'false'."),
                };
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .fullscreen = Some(enabled);
            }
            "defaults.code_style" => {
                Highlighter::new(value)?;
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .code_style = Some(value.to_string());
            }
            "scrollbar.slider.top_chars" => {
                self.scrollbar_mut().slider.top_chars = glyph_sequence(key, value)?;
            }
            "scrollbar.slider.bottom_chars" => {
                self.scrollbar_mut().slider.bottom_chars = glyph_sequence(key, value)?;
            }
            "scrollbar.slider.fill" => {
                self.scrollbar_mut().slider.fill = single_glyph(key, value)?;
            }
            "scrollbar.gutter.fill" => {
                self.scrollbar_mut().gutter.fill = single_glyph(key, value)?;
            }
            _ => anyhow::bail!(
                "Unknown config key: {key}. Valid keys: defaults.theme, defaults.title_delim, \
                 defaults.fullscreen, defaults.code_style, scrollbar.slider.top_chars, \
                 scrollbar.slider.fill, scrollbar.slider.bottom_chars, scrollbar.gutter.fill"
            ),
        }
        Ok(())
    }

    fn scrollbar_mut(&mut self) -> &mut ScrollbarStyle {
        self.scrollbar.get_or_insert_with(ScrollbarStyle::default)
    }
}

fn single_glyph(key: &str, value: &str) -> Result<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => anyhow::bail!("Invalid {key}: {value:?}. Must be exactly one character."),
    }
}

fn glyph_sequence(key: &str, value: &str) -> Result<String> {
    if value.is_empty() {
        anyhow::bail!("Invalid {key}: must contain at least one character.");
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file_sections() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.title_delim(), ":");
        assert!(config.fullscreen_enabled());
        assert_eq!(config.theme(), None);
        assert_eq!(config.scrollbar_style(), ScrollbarStyle::default());
    }

    #[test]
    fn test_partial_scrollbar_section_keeps_other_defaults() {
        let yaml = "scrollbar:\n  gutter:\n    fill: \"|\"\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        let style = config.scrollbar_style();
        assert_eq!(style.gutter.fill, '|');
        assert_eq!(style.slider, SliderStyle::default());
    }

    #[test]
    fn test_set_validates_glyphs() {
        let mut config = Config::default();
        assert!(config.set("scrollbar.slider.fill", "##").is_err());
        assert!(config.set("scrollbar.slider.fill", "").is_err());
        assert!(config.set("scrollbar.slider.top_chars", "").is_err());
        config.set("scrollbar.slider.fill", "█").unwrap();
        config.set("scrollbar.slider.top_chars", "▁▂▃▄▅▆▇").unwrap();
        let style = config.scrollbar_style();
        assert_eq!(style.slider.fill, '█');
        assert_eq!(style.slider.top_chars, "▁▂▃▄▅▆▇");
        assert_eq!(style.slider.bottom_chars, SliderStyle::default().bottom_chars);
    }

    #[test]
    fn test_set_rejects_unknown_values() {
        let mut config = Config::default();
        assert!(config.set("defaults.theme", "solarized").is_err());
        assert!(config.set("defaults.fullscreen", "maybe").is_err());
        assert!(config.set("nope", "x").is_err());
        config.set("defaults.fullscreen", "off").unwrap();
        assert!(!config.fullscreen_enabled());
    }

    #[test]
    fn test_code_style_must_be_a_known_theme() {
        let mut config = Config::default();
        let err = config.set("defaults.code_style", "neon").unwrap_err();
        assert!(err.to_string().contains("InspiredGitHub"));
        assert_eq!(config.code_style(), None);
        config.set("defaults.code_style", "Solarized (light)").unwrap();
        assert_eq!(config.code_style(), Some("Solarized (light)"));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(FILENAME);

        let mut config = Config::default();
        config.set("defaults.theme", "dark").unwrap();
        config.set("defaults.title_delim", "/").unwrap();
        config.set("scrollbar.gutter.fill", "┃").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.theme(), Some("dark"));
        assert_eq!(loaded.title_delim(), "/");
        assert_eq!(loaded.scrollbar_style().gutter.fill, '┃');
    }

    #[test]
    fn test_missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join(FILENAME)).unwrap_err();
        assert!(err.to_string().contains("No config found"));
    }

    #[test]
    fn test_effective_fills_unset_values() {
        let config: Config = serde_yaml::from_str("defaults:\n  theme: light\n").unwrap();
        let effective = config.effective();
        let defaults = effective.defaults.unwrap();
        assert_eq!(defaults.theme.as_deref(), Some("light"));
        assert_eq!(defaults.title_delim.as_deref(), Some(":"));
        assert_eq!(defaults.fullscreen, Some(true));
        assert_eq!(effective.scrollbar, Some(ScrollbarStyle::default()));
    }
}
