//! Settings read from `bfont.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::fonts::system_font_folder;
use crate::layout::MARGIN;

/// Point sizes accepted for generation.
pub const FONT_SIZES: core::ops::RangeInclusive<u8> = 8..=72;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub generator: GeneratorConfig,
    pub canvas: CanvasConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Falls back to the operating system's font folder.
    pub font_folder: Option<PathBuf>,
    pub font_size: u8,
    pub threshold: u8,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            font_folder: None,
            font_size: 15,
            threshold: 128,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
        }
    }
}

impl Config {
    pub fn parse(toml: &str) -> Result<Self> {
        let config: Config = toml::from_str(toml).map_err(|err| Error::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::parse(&std::fs::read_to_string(path)?)
    }

    /// Defaults when `path` does not exist.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !FONT_SIZES.contains(&self.generator.font_size) {
            return Err(Error::Config(format!(
                "font_size {} is outside {}..={}",
                self.generator.font_size,
                FONT_SIZES.start(),
                FONT_SIZES.end()
            )));
        }

        if self.canvas.width < 2 * MARGIN {
            return Err(Error::Config(format!(
                "canvas width {} leaves no room inside the margins",
                self.canvas.width
            )));
        }

        Ok(())
    }

    pub fn font_folder(&self) -> Option<PathBuf> {
        self.generator
            .font_folder
            .clone()
            .or_else(system_font_folder)
    }
}
