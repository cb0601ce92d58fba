use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const EMBEDDED_SITE: &str = include_str!("../assets/site.yml");

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SiteConfig {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_team_heading")]
    pub team_heading: String,

    /// How long the loading overlay stays up after mount.
    #[serde(default = "default_loading_delay_ms")]
    pub loading_delay_ms: u64,

    #[serde(default)]
    pub audio: AudioConfig,

    #[serde(default)]
    pub images: ImageConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AudioConfig {
    #[serde(default = "default_audio_element_id")]
    pub element_id: String,
    #[serde(default = "default_audio_source")]
    pub source: String,
    #[serde(default = "default_audio_mime")]
    pub mime: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ImageConfig {
    #[serde(default = "default_team_dir")]
    pub team_dir: String,
    #[serde(default = "default_image_extension")]
    pub extension: String,
}

fn default_title() -> String {
    "Rev Robotics".to_string()
}
fn default_team_heading() -> String {
    "Our Nerds".to_string()
}
fn default_loading_delay_ms() -> u64 {
    2000
}
fn default_audio_element_id() -> String {
    "backgroundMusic".to_string()
}
fn default_audio_source() -> String {
    "/b-music.mp3".to_string()
}
fn default_audio_mime() -> String {
    "audio/mpeg".to_string()
}
fn default_team_dir() -> String {
    "/images/team".to_string()
}
fn default_image_extension() -> String {
    "jpg".to_string()
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            element_id: default_audio_element_id(),
            source: default_audio_source(),
            mime: default_audio_mime(),
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            team_dir: default_team_dir(),
            extension: default_image_extension(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            team_heading: default_team_heading(),
            loading_delay_ms: default_loading_delay_ms(),
            audio: AudioConfig::default(),
            images: ImageConfig::default(),
        }
    }
}

impl SiteConfig {
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml_ng::from_str(content).context("Failed to parse site config")
    }

    /// The configuration compiled into the crate from `assets/site.yml`.
    pub fn embedded() -> Result<Self> {
        Self::from_yaml(EMBEDDED_SITE)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("{} not found.", path.display());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("Failed to load {}", path.display()))
    }

    pub fn loading_delay(&self) -> Duration {
        Duration::from_millis(self.loading_delay_ms)
    }
}
