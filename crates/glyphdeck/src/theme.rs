use eframe::egui::{Color32, FontId};

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub background: Color32,
    pub foreground: Color32,
    pub heading_color: Color32,
    pub accent: Color32,
    /// Bold text.
    pub strong: Color32,
    pub muted: Color32,
    pub code_background: Color32,
    pub code_foreground: Color32,
    pub nav_background: Color32,
    pub slider_color: Color32,
    pub gutter_color: Color32,
    pub heading_size: f32,
    pub body_size: f32,
    pub chrome_size: f32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color32::from_rgb(0x1C, 0x1C, 0x1C),
            foreground: Color32::from_rgb(0xC8, 0xC8, 0xC8),
            heading_color: Color32::from_rgb(0xFF, 0xD7, 0x5F),
            accent: Color32::from_rgb(0x5F, 0xAF, 0xFF),
            strong: Color32::from_rgb(0xF5, 0xF5, 0xF5),
            muted: Color32::from_rgb(0x80, 0x80, 0x80),
            code_background: Color32::from_rgb(0x26, 0x26, 0x26),
            code_foreground: Color32::from_rgb(0xD4, 0xD4, 0xD4),
            nav_background: Color32::from_rgb(0x14, 0x14, 0x14),
            slider_color: Color32::from_rgb(0x4C, 0x4C, 0x4C),
            gutter_color: Color32::from_rgb(0x2C, 0x2C, 0x2C),
            heading_size: 26.0,
            body_size: 18.0,
            chrome_size: 14.0,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color32::from_rgb(0xFA, 0xFA, 0xF5),
            foreground: Color32::from_rgb(0x1A, 0x1A, 0x2E),
            heading_color: Color32::from_rgb(0x87, 0x3E, 0x00),
            accent: Color32::from_rgb(0x0F, 0x34, 0x60),
            strong: Color32::from_rgb(0x00, 0x00, 0x00),
            muted: Color32::from_rgb(0x70, 0x70, 0x70),
            code_background: Color32::from_rgb(0xEE, 0xEE, 0xE8),
            code_foreground: Color32::from_rgb(0x33, 0x33, 0x33),
            nav_background: Color32::from_rgb(0xF0, 0xF0, 0xEA),
            slider_color: Color32::from_rgb(0x9A, 0x9A, 0x9A),
            gutter_color: Color32::from_rgb(0xD8, 0xD8, 0xD8),
            heading_size: 26.0,
            body_size: 18.0,
            chrome_size: 14.0,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Font for slide bodies. Line units of the scrollbar are measured in it.
    pub fn body_font(&self) -> FontId {
        FontId::monospace(self.body_size)
    }

    pub fn heading_font(&self) -> FontId {
        FontId::monospace(self.heading_size)
    }

    pub fn chrome_font(&self) -> FontId {
        FontId::monospace(self.chrome_size)
    }

    /// Syntect theme used for fenced code when no code style is configured.
    pub fn syntect_theme_name(&self) -> &str {
        if self.name == "dark" {
            "base16-ocean.dark"
        } else {
            "InspiredGitHub"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_defaults_to_dark() {
        assert_eq!(Theme::from_name("light").name, "light");
        assert_eq!(Theme::from_name("dark").name, "dark");
        assert_eq!(Theme::from_name("neon").name, "dark");
    }

    #[test]
    fn test_code_style_follows_palette() {
        assert_eq!(Theme::dark().syntect_theme_name(), "base16-ocean.dark");
        assert_eq!(Theme::light().syntect_theme_name(), "InspiredGitHub");
    }
}
