//! Theme colors loaded from the Omarchy/Hyprland system theme
//! (~/.config/omarchy/current/theme/kitty.conf), with a Catppuccin-flavored
//! fallback when no theme file is around.

use ratatui::style::Color;
use std::collections::HashMap;
use std::fs;

#[derive(Debug, Clone)]
pub struct Theme {
    pub accent: Color,      // Active borders, key hints
    pub highlight: Color,   // The prediction itself (bold segments)
    pub text: Color,        // Primary text
    pub text_dim: Color,    // Hints, inactive labels
    pub inactive: Color,    // Inactive borders
    pub header: Color,      // Box titles
    pub track: Color,       // Slider track
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Rgb(250, 179, 135),
            highlight: Color::Rgb(166, 218, 149),
            text: Color::Rgb(205, 214, 244),
            text_dim: Color::Rgb(147, 153, 178),
            inactive: Color::Rgb(88, 91, 112),
            header: Color::Rgb(243, 139, 168),
            track: Color::Rgb(69, 71, 90),
        }
    }
}

impl Theme {
    pub fn load() -> Self {
        Self::load_omarchy_theme().unwrap_or_default()
    }

    fn load_omarchy_theme() -> Option<Self> {
        let home = dirs::home_dir()?;
        let theme_path = home.join(".config/omarchy/current/theme/kitty.conf");

        let content = fs::read_to_string(&theme_path).ok()?;
        let colors = Self::parse_kitty_conf(&content);

        if colors.is_empty() {
            return None;
        }

        let accent = colors
            .get("color2")
            .or(colors.get("color10"))
            .copied()
            .unwrap_or(Color::Rgb(255, 193, 7));

        let highlight = colors
            .get("color10")
            .or(colors.get("color2"))
            .copied()
            .unwrap_or(Color::Rgb(255, 193, 7));

        let text = colors
            .get("foreground")
            .copied()
            .unwrap_or(Color::Rgb(190, 190, 190));

        let text_dim = colors
            .get("color8")
            .copied()
            .unwrap_or(Color::Rgb(138, 138, 141));

        let inactive = colors
            .get("inactive_border_color")
            .or(colors.get("color8"))
            .copied()
            .unwrap_or(Color::Rgb(89, 89, 89));

        let header = colors
            .get("color1")
            .copied()
            .unwrap_or(Color::Rgb(211, 95, 95));

        let track = colors
            .get("selection_background")
            .or(colors.get("color0"))
            .copied()
            .unwrap_or(Color::Rgb(51, 51, 51));

        Some(Self {
            accent,
            highlight,
            text,
            text_dim,
            inactive,
            header,
            track,
        })
    }

    /// Parse kitty.conf format: `key #hexcolor`
    fn parse_kitty_conf(content: &str) -> HashMap<String, Color> {
        let mut colors = HashMap::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.splitn(2, char::is_whitespace).collect();
            if parts.len() == 2 {
                if let Some(color) = Self::parse_hex_color(parts[1].trim()) {
                    colors.insert(parts[0].trim().to_string(), color);
                }
            }
        }

        colors
    }

    /// Parse a hex color string (#RRGGBB or #RGB)
    fn parse_hex_color(s: &str) -> Option<Color> {
        let s = s.trim().trim_start_matches('#');

        if s.len() == 6 {
            let r = u8::from_str_radix(&s[0..2], 16).ok()?;
            let g = u8::from_str_radix(&s[2..4], 16).ok()?;
            let b = u8::from_str_radix(&s[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        } else if s.len() == 3 {
            let r = u8::from_str_radix(&s[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&s[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&s[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(
            Theme::parse_hex_color("#FFC107"),
            Some(Color::Rgb(255, 193, 7))
        );
        assert_eq!(Theme::parse_hex_color("#fff"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(Theme::parse_hex_color("not-a-color"), None);
    }

    #[test]
    fn test_parse_kitty_conf_skips_comments() {
        let conf = "# a comment\nforeground #bebebe\ncolor2 #FFC107\n\nbroken-line\n";
        let colors = Theme::parse_kitty_conf(conf);
        assert_eq!(colors.len(), 2);
        assert_eq!(colors.get("foreground"), Some(&Color::Rgb(190, 190, 190)));
    }
}
