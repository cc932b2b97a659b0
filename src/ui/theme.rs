use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Theme color palette defining all colors used in the application.
///
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    // Primary colors
    pub primary: ColorSpec,
    pub secondary: ColorSpec,
    pub accent: ColorSpec,
    pub banner: ColorSpec,

    // Text colors
    pub text: ColorSpec,
    pub text_muted: ColorSpec,

    // Item status colors
    pub success: ColorSpec,
    pub warning: ColorSpec,
    pub error: ColorSpec,

    // UI element colors
    pub border_active: ColorSpec,
    pub border_normal: ColorSpec,
    pub highlight_bg: ColorSpec,
    pub highlight_fg: ColorSpec,

    // Footer mode colors
    pub footer_home: ColorSpec,
    pub footer_menu: ColorSpec,
    pub footer_checklist: ColorSpec,
    pub footer_resets: ColorSpec,
    pub footer_debug: ColorSpec,
}

/// Color specification that can be serialized/deserialized.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSpec {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorSpec {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        ColorSpec { r, g, b }
    }

    pub fn to_color(&self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::tokyo_night()
    }
}

impl Theme {
    /// Tokyo Night theme.
    ///
    pub fn tokyo_night() -> Self {
        let blue = ColorSpec::rgb(125, 207, 255);
        let green = ColorSpec::rgb(158, 206, 106);
        let magenta = ColorSpec::rgb(255, 159, 196);
        let yellow = ColorSpec::rgb(255, 202, 40);
        let red = ColorSpec::rgb(247, 118, 142);
        let comment = ColorSpec::rgb(117, 121, 148);
        Theme {
            name: "tokyo-night".to_string(),
            primary: blue,
            secondary: green,
            accent: magenta,
            banner: magenta,
            text: ColorSpec::rgb(169, 177, 214),
            text_muted: comment,
            success: green,
            warning: yellow,
            error: red,
            border_active: blue,
            border_normal: comment,
            highlight_bg: blue,
            highlight_fg: ColorSpec::rgb(26, 27, 38),
            footer_home: blue,
            footer_menu: magenta,
            footer_checklist: green,
            footer_resets: red,
            footer_debug: yellow,
        }
    }

    /// Rose Pine Dawn theme.
    ///
    pub fn rose_pine_dawn() -> Self {
        let purple = ColorSpec::rgb(161, 119, 255);
        let pine = ColorSpec::rgb(59, 247, 209);
        let pink = ColorSpec::rgb(255, 109, 146);
        let gold = ColorSpec::rgb(255, 210, 0);
        let love = ColorSpec::rgb(235, 111, 146);
        let foam = ColorSpec::rgb(61, 174, 233);
        let text = ColorSpec::rgb(88, 82, 96);
        Theme {
            name: "rose-pine-dawn".to_string(),
            primary: purple,
            secondary: pine,
            accent: pink,
            banner: pink,
            text,
            text_muted: ColorSpec::rgb(152, 147, 165),
            success: pine,
            warning: gold,
            error: love,
            border_active: purple,
            border_normal: text,
            highlight_bg: foam,
            highlight_fg: ColorSpec::rgb(0, 0, 0),
            footer_home: foam,
            footer_menu: purple,
            footer_checklist: pine,
            footer_resets: love,
            footer_debug: gold,
        }
    }

    /// Dracula theme.
    ///
    pub fn dracula() -> Self {
        let purple = ColorSpec::rgb(189, 147, 249);
        let cyan = ColorSpec::rgb(139, 233, 253);
        let pink = ColorSpec::rgb(255, 121, 198);
        let green = ColorSpec::rgb(80, 250, 123);
        let orange = ColorSpec::rgb(255, 184, 108);
        let red = ColorSpec::rgb(255, 85, 85);
        let comment = ColorSpec::rgb(98, 114, 164);
        Theme {
            name: "dracula".to_string(),
            primary: purple,
            secondary: cyan,
            accent: pink,
            banner: pink,
            text: ColorSpec::rgb(248, 248, 242),
            text_muted: comment,
            success: green,
            warning: orange,
            error: red,
            border_active: purple,
            border_normal: comment,
            highlight_bg: cyan,
            highlight_fg: ColorSpec::rgb(40, 42, 54),
            footer_home: cyan,
            footer_menu: purple,
            footer_checklist: green,
            footer_resets: red,
            footer_debug: orange,
        }
    }

    /// Look up a theme by its configured name.
    ///
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "tokyo-night" => Some(Self::tokyo_night()),
            "rose-pine-dawn" => Some(Self::rose_pine_dawn()),
            "dracula" => Some(Self::dracula()),
            _ => None,
        }
    }

    /// Get list of all available theme names.
    ///
    pub fn available_themes() -> Vec<String> {
        vec![
            "tokyo-night".to_string(),
            "rose-pine-dawn".to_string(),
            "dracula".to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_available_theme_resolves() {
        for name in Theme::available_themes() {
            let theme = Theme::from_name(&name).unwrap();
            assert_eq!(theme.name, name);
        }
    }

    #[test]
    fn test_unknown_theme() {
        assert!(Theme::from_name("solarized").is_none());
        assert_eq!(Theme::default().name, "tokyo-night");
    }

    #[test]
    fn test_color_spec_to_color() {
        assert_eq!(ColorSpec::rgb(1, 2, 3).to_color(), Color::Rgb(1, 2, 3));
    }
}
