use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::config::SiteConfig;

const EMBEDDED_CONTENT: &str = include_str!("../../assets/content.yml");

pub const MAX_RATING: f64 = 5.0;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    Cpu,
    Wrench,
    Cog,
    Camera,
    Gamepad,
}

impl Icon {
    pub fn glyph(self) -> &'static str {
        match self {
            Icon::Cpu => "🖥",
            Icon::Wrench => "🔧",
            Icon::Cog => "⚙",
            Icon::Camera => "📷",
            Icon::Gamepad => "🎮",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Issue,
    Step,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Item {
    pub id: String,
    pub kind: ItemKind,
    pub title: String,
    /// Solution for an issue, detail line for a step.
    pub summary: String,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(untagged)]
pub enum SectionBody {
    Text(String),
    Items(Vec<Item>),
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Section {
    pub title: String,
    pub icon: Icon,
    pub content: SectionBody,
}

impl Section {
    pub fn items(&self) -> &[Item] {
        match &self.content {
            SectionBody::Items(items) => items,
            SectionBody::Text(_) => &[],
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct FocusPoint {
    pub icon: Icon,
    pub heading: String,
    pub text: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub image: Option<String>,
    pub favorite_part: String,
    pub quote: String,
    pub rating: f64,
}

impl TeamMember {
    /// Explicit image reference if present, otherwise `{team_dir}/{id}.{ext}`.
    pub fn image_url(&self, config: &SiteConfig) -> String {
        match &self.image {
            Some(url) => url.clone(),
            None => format!(
                "{}/{}.{}",
                config.images.team_dir.trim_end_matches('/'),
                self.id,
                config.images.extension
            ),
        }
    }
}

/// Read-only page content. Loaded once at startup, never mutated.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ContentStore {
    pub sections: Vec<Section>,
    #[serde(default)]
    pub focus: Vec<FocusPoint>,
    #[serde(default)]
    pub team: Vec<TeamMember>,
}

impl ContentStore {
    pub fn from_yaml(content: &str) -> Result<Self> {
        let store: ContentStore =
            serde_yaml_ng::from_str(content).context("Failed to parse content table")?;
        store.validate()?;
        Ok(store)
    }

    pub fn embedded() -> Result<Self> {
        Self::from_yaml(EMBEDDED_CONTENT).context("Embedded content is invalid")
    }

    pub fn validate(&self) -> Result<()> {
        let mut titles = HashSet::new();
        let mut item_ids = HashSet::new();

        for section in &self.sections {
            if section.title.trim().is_empty() {
                bail!("Section with empty title");
            }
            if !titles.insert(section.title.as_str()) {
                bail!("Duplicate section title: {}", section.title);
            }
            for item in section.items() {
                if item.id.trim().is_empty() {
                    bail!("Item with empty id in section {}", section.title);
                }
                if !item_ids.insert(item.id.as_str()) {
                    bail!("Duplicate item id: {}", item.id);
                }
            }
        }

        let mut member_ids = HashSet::new();
        for member in &self.team {
            if member.id.trim().is_empty() {
                bail!("Team member {} has an empty id", member.name);
            }
            if !member_ids.insert(member.id.as_str()) {
                bail!("Duplicate team member id: {}", member.id);
            }
            if !member.rating.is_finite() || !(0.0..=MAX_RATING).contains(&member.rating) {
                return Err(anyhow!(
                    "Rating {} for {} is outside 0-{}",
                    member.rating,
                    member.id,
                    MAX_RATING
                ));
            }
        }

        Ok(())
    }

    pub fn section(&self, title: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.title == title)
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.sections.iter().flat_map(|s| s.items().iter())
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items().find(|i| i.id == id)
    }

    pub fn member(&self, id: &str) -> Option<&TeamMember> {
        self.team.iter().find(|m| m.id == id)
    }
}
