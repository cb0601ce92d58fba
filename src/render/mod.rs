//! Pure derivation of what the page shows from content, state and config.
//!
//! Nothing here touches the DOM; the browser components and the text preview
//! both read these view models.

pub mod text;

use serde::Serialize;

use crate::config::SiteConfig;
use crate::model::content::{ContentStore, FocusPoint, Icon, Item, ItemKind, SectionBody, TeamMember, MAX_RATING};
use crate::model::state::{Page, ViewState};

pub const STAR_COUNT: usize = 5;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StarFill {
    Full,
    Partial,
    Empty,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NavEntry {
    pub page: Page,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Serialize, Debug, Clone)]
pub struct ItemView {
    pub id: String,
    pub kind: ItemKind,
    pub title: String,
    pub summary: String,
    pub completed: bool,
    pub expanded: bool,
    /// Everything below is only populated while the item is expanded.
    pub details: Option<String>,
    pub options: Vec<String>,
    pub note_field_id: String,
    pub note: String,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "lowercase")]
pub enum SectionBodyView {
    Text(String),
    Items(Vec<ItemView>),
}

#[derive(Serialize, Debug, Clone)]
pub struct SectionView {
    pub title: String,
    pub icon: Icon,
    pub expanded: bool,
    pub body: Option<SectionBodyView>,
}

#[derive(Serialize, Debug, Clone)]
pub struct ProgressView {
    pub sections: Vec<SectionView>,
    pub focus: Vec<FocusPoint>,
}

#[derive(Serialize, Debug, Clone)]
pub struct MemberCard {
    pub id: String,
    pub name: String,
    pub role: String,
    pub image_url: String,
    pub image_alt: String,
    pub favorite_part: String,
    pub quote: String,
    pub stars: [StarFill; STAR_COUNT],
    pub rating_label: String,
    pub view_more: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct TeamView {
    pub heading: String,
    pub members: Vec<MemberCard>,
}

/// Star `i` is full below the whole part of the rating, partial below the
/// rating itself, empty after.
pub fn star_fills(rating: f64) -> [StarFill; STAR_COUNT] {
    let rating = rating.clamp(0.0, MAX_RATING);
    let whole = rating.floor();
    std::array::from_fn(|i| {
        let i = i as f64;
        if i < whole {
            StarFill::Full
        } else if i < rating {
            StarFill::Partial
        } else {
            StarFill::Empty
        }
    })
}

pub fn rating_label(rating: f64) -> String {
    format!("{:.1}", rating)
}

pub fn view_more_message(member: &TeamMember) -> String {
    format!("View more about {}", member.name)
}

pub fn note_field_id(item_id: &str) -> String {
    format!("note-{}", item_id)
}

pub fn nav_entries(state: &ViewState) -> Vec<NavEntry> {
    Page::ALL
        .iter()
        .map(|&page| NavEntry {
            page,
            label: page.label(),
            active: state.page() == page,
        })
        .collect()
}

pub fn item_view(item: &Item, state: &ViewState) -> ItemView {
    let expanded = state.is_item_expanded(&item.id);
    ItemView {
        id: item.id.clone(),
        kind: item.kind,
        title: item.title.clone(),
        summary: item.summary.clone(),
        completed: state.is_item_completed(&item.id),
        expanded,
        // The intro paragraph is an addition; the summary line alone stays visible when collapsed.
        details: if expanded { item.details.clone() } else { None },
        options: if expanded { item.options.clone() } else { Vec::new() },
        note_field_id: note_field_id(&item.id),
        note: if expanded {
            state.note(&item.id).to_string()
        } else {
            String::new()
        },
    }
}

pub fn progress_view(content: &ContentStore, state: &ViewState) -> ProgressView {
    let sections = content
        .sections
        .iter()
        .map(|section| {
            let expanded = state.is_section_open(&section.title);
            let body = expanded.then(|| match &section.content {
                SectionBody::Text(text) => SectionBodyView::Text(text.clone()),
                SectionBody::Items(items) => {
                    SectionBodyView::Items(items.iter().map(|i| item_view(i, state)).collect())
                }
            });
            SectionView {
                title: section.title.clone(),
                icon: section.icon,
                expanded,
                body,
            }
        })
        .collect();

    ProgressView {
        sections,
        focus: content.focus.clone(),
    }
}

pub fn member_card(member: &TeamMember, config: &SiteConfig) -> MemberCard {
    MemberCard {
        id: member.id.clone(),
        name: member.name.clone(),
        role: member.role.clone(),
        image_url: member.image_url(config),
        image_alt: format!("Photo of {}", member.name),
        favorite_part: member.favorite_part.clone(),
        quote: member.quote.clone(),
        stars: star_fills(member.rating),
        rating_label: rating_label(member.rating),
        view_more: view_more_message(member),
    }
}

pub fn team_view(content: &ContentStore, config: &SiteConfig) -> TeamView {
    TeamView {
        heading: config.team_heading.clone(),
        members: content.team.iter().map(|m| member_card(m, config)).collect(),
    }
}
