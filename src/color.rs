use palette::{Hsl, IntoColor, Srgb};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Accent palette for the sweep progress bar and the rotated panel title.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Spectrum,
    Rainbow,
    Fire,
    Ocean,
    Monochrome,
}

impl FromStr for ColorScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "spectrum" => Ok(Self::Spectrum),
            "rainbow" => Ok(Self::Rainbow),
            "fire" => Ok(Self::Fire),
            "ocean" => Ok(Self::Ocean),
            "mono" | "monochrome" => Ok(Self::Monochrome),
            _ => Err(format!("Unknown color scheme: {}", s)),
        }
    }
}

impl ColorScheme {
    /// Get color for a given position (0.0 to 1.0) and intensity (0.0 to 1.0)
    pub fn get_color(&self, position: f32, intensity: f32) -> (u8, u8, u8) {
        let position = position.clamp(0.0, 1.0);
        let intensity = intensity.clamp(0.0, 1.0);
        let (h, s, l) = match self {
            ColorScheme::Spectrum => {
                // purple -> blue -> cyan -> green -> yellow -> red
                let hue = 270.0 - (position * 270.0);
                (hue, 0.9, 0.4 + intensity * 0.3)
            }
            ColorScheme::Rainbow => (position * 360.0, 0.85, 0.5 + intensity * 0.2),
            ColorScheme::Fire => (position * 60.0, 0.95, 0.3 + intensity * 0.4),
            ColorScheme::Ocean => (180.0 + position * 60.0, 0.8, 0.3 + intensity * 0.35),
            ColorScheme::Monochrome => (0.0, 0.0, 0.2 + intensity * 0.7),
        };

        let hsl = Hsl::new(h, s, l);
        let rgb: Srgb = hsl.into_color();

        (
            (rgb.red.clamp(0.0, 1.0) * 255.0).round() as u8,
            (rgb.green.clamp(0.0, 1.0) * 255.0).round() as u8,
            (rgb.blue.clamp(0.0, 1.0) * 255.0).round() as u8,
        )
    }

    /// Accent for a rotation angle: one trip through the palette per full turn.
    pub fn angle_color(&self, angle_degrees: f64) -> (u8, u8, u8) {
        let turn = (angle_degrees.rem_euclid(360.0) / 360.0) as f32;
        self.get_color(turn, 0.8)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColorScheme::Spectrum => "spectrum",
            ColorScheme::Rainbow => "rainbow",
            ColorScheme::Fire => "fire",
            ColorScheme::Ocean => "ocean",
            ColorScheme::Monochrome => "monochrome",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("Fire".parse::<ColorScheme>(), Ok(ColorScheme::Fire));
        assert_eq!("mono".parse::<ColorScheme>(), Ok(ColorScheme::Monochrome));
        assert!("plaid".parse::<ColorScheme>().is_err());
    }

    #[test]
    fn test_name_round_trips_through_parse() {
        for scheme in [
            ColorScheme::Spectrum,
            ColorScheme::Rainbow,
            ColorScheme::Fire,
            ColorScheme::Ocean,
            ColorScheme::Monochrome,
        ] {
            assert_eq!(scheme.name().parse::<ColorScheme>(), Ok(scheme));
        }
    }

    #[test]
    fn test_monochrome_is_gray() {
        let (r, g, b) = ColorScheme::Monochrome.get_color(0.3, 0.5);
        assert_eq!(r, g);
        assert_eq!(g, b);
    }

    #[test]
    fn test_rainbow_starts_red() {
        let (r, g, b) = ColorScheme::Rainbow.get_color(0.0, 0.0);
        assert!(r > g && r > b);
    }

    #[test]
    fn test_angle_color_wraps_each_turn() {
        let scheme = ColorScheme::Rainbow;
        assert_eq!(scheme.angle_color(30.0), scheme.angle_color(390.0));
        assert_eq!(scheme.angle_color(-90.0), scheme.angle_color(270.0));
    }
}
