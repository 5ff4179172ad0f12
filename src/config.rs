use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use spinzoom::sequence::AngleSequence;
use spinzoom::SequenceError;

use crate::color::ColorScheme;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SourceConfig {
    pub path: PathBuf,
    /// Longest side of the working copy in pixels (0 = keep full size)
    pub max_dimension: u32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("test_img.jpg"),
            max_dimension: 512,
        }
    }
}

impl SourceConfig {
    pub fn working_limit(&self) -> Option<u32> {
        (self.max_dimension > 0).then_some(self.max_dimension)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationConfig {
    pub start: f64,
    pub end: f64,
    pub step: f64,
    /// Pause after each frame
    pub frame_delay_ms: u64,
    /// Keep the last frame on screen until the user quits
    pub hold_last_frame: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 360.0,
            step: 1.0,
            frame_delay_ms: 1,
            hold_last_frame: true,
        }
    }
}

impl AnimationConfig {
    pub fn sequence(&self) -> Result<AngleSequence, SequenceError> {
        AngleSequence::new(self.start, self.end, self.step)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub color_scheme: ColorScheme,
    pub show_status: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color_scheme: ColorScheme::Spectrum,
            show_status: true,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the default XDG config path (~/.config/spinzoom/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("spinzoom").join("config.toml"))
    }

    /// Load config from the default XDG path if it exists
    /// Returns None if file doesn't exist, logs warning on parse errors
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            return None;
        }
        match Self::load(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!(
                    "Failed to parse config at {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                None
            }
        }
    }

    /// Initialize default config file at XDG path, returns the path
    pub fn init_default_config() -> Result<PathBuf> {
        let path = Self::default_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, Self::generate_config_template())?;

        Ok(path)
    }

    /// Generate a commented TOML config template
    pub fn generate_config_template() -> String {
        r#"# Spinzoom Configuration
# This file is auto-generated. Edit as needed.

[source]
# Image to animate (the positional CLI argument takes priority)
path = "test_img.jpg"
# Longest side of the working copy in pixels; larger images are shrunk
# once at load time. 0 keeps the full resolution.
max_dimension = 512

[animation]
# Angle sweep in degrees, both ends inclusive
start = 0.0
end = 360.0
step = 1.0
# Pause after each frame in milliseconds
frame_delay_ms = 1
# Keep the final frame on screen until q/Esc is pressed
hold_last_frame = true

[display]
# Accent colors: "spectrum", "rainbow", "fire", "ocean", "monochrome"
color_scheme = "spectrum"
# Show the progress line at the bottom
show_status = true
"#
        .to_string()
    }

    /// Merge CLI arguments into config (CLI takes priority)
    pub fn merge_args(&mut self, args: &crate::Args) {
        if let Some(ref path) = args.image {
            self.source.path = path.clone();
        }
        if let Some(limit) = args.max_dimension {
            self.source.max_dimension = limit;
        }

        if let Some(start) = args.start {
            self.animation.start = start;
        }
        if let Some(end) = args.end {
            self.animation.end = end;
        }
        if let Some(step) = args.step {
            self.animation.step = step;
        }
        if let Some(delay) = args.delay_ms {
            self.animation.frame_delay_ms = delay;
        }
        if args.exit_when_done {
            self.animation.hold_last_frame = false;
        }

        if let Some(ref colors) = args.colors {
            match colors.parse() {
                Ok(scheme) => self.display.color_scheme = scheme,
                Err(e) => warn!("{}, keeping {}", e, self.display.color_scheme.name()),
            }
        }
        if args.no_status {
            self.display.show_status = false;
        }
    }
}
