//! Slide list and icon paths, loaded from a TOML file.
//!
//! Relative paths are resolved against the directory holding the file.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result, bail};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SlideConfig {
    pub id: u32,
    pub video: PathBuf,
    #[serde(default)]
    pub text_lists: Vec<String>,
    pub video_duration: f32,
    /// Horizontal shift of the video inside its frame, as a fraction of the
    /// frame width.
    #[serde(default)]
    pub video_offset: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct IconConfig {
    pub play: Option<PathBuf>,
    pub pause: Option<PathBuf>,
    pub replay: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CarouselConfig {
    pub slides: Vec<SlideConfig>,
    #[serde(default)]
    pub icons: IconConfig,
}

impl CarouselConfig {
    pub fn parse(content: &str) -> Result<Self> {
        let config: CarouselConfig = toml::from_str(content).context("Invalid carousel configuration")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.slides.is_empty() {
            bail!("The configuration has no slides");
        }
        let mut ids = HashSet::new();
        for slide in &self.slides {
            if !ids.insert(slide.id) {
                bail!("Duplicate slide id {}", slide.id);
            }
            if !slide.video_duration.is_finite() || slide.video_duration <= 0.0 {
                bail!("Slide {} has an invalid duration {}", slide.id, slide.video_duration);
            }
        }
        Ok(())
    }

    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };
        for slide in &mut self.slides {
            resolve(&mut slide.video);
        }
        for icon in [&mut self.icons.play, &mut self.icons.pause, &mut self.icons.replay] {
            if let Some(path) = icon.as_mut() {
                resolve(path);
            }
        }
    }
}

pub fn load_from_path(path: &Path) -> Result<CarouselConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration {:?}", path))?;
    let mut config = CarouselConfig::parse(&content)
        .with_context(|| format!("Failed to load configuration {:?}", path))?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    config.resolve_paths(base);
    Ok(config)
}
