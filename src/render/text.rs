use std::fmt::{self, Write};

use crate::render::{MemberCard, NavEntry, ProgressView, SectionBodyView, StarFill, TeamView};

fn star_glyph(fill: StarFill) -> char {
    match fill {
        StarFill::Full => '★',
        StarFill::Partial => '✫',
        StarFill::Empty => '☆',
    }
}

pub fn render_nav(title: &str, nav: &[NavEntry], audio_playing: bool) -> String {
    let tabs: Vec<String> = nav
        .iter()
        .map(|entry| {
            if entry.active {
                format!("[{}]", entry.label)
            } else {
                entry.label.to_string()
            }
        })
        .collect();
    let speaker = if audio_playing { "🔊" } else { "🔇" };
    format!("{}  |  {}  |  {}\n", title, tabs.join("  "), speaker)
}

pub fn render_progress(title: &str, view: &ProgressView) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{} Team Progress", title)?;
    writeln!(out)?;

    for section in &view.sections {
        let chevron = if section.expanded { "▲" } else { "▼" };
        writeln!(out, "{} {} {}", section.icon.glyph(), section.title, chevron)?;

        match &section.body {
            None => {}
            Some(SectionBodyView::Text(text)) => {
                writeln!(out, "    {}", text)?;
            }
            Some(SectionBodyView::Items(items)) => {
                for item in items {
                    let mark = if item.completed { '✓' } else { '✗' };
                    writeln!(out, "  [{}] {}", mark, item.title)?;
                    writeln!(out, "      {}", item.summary)?;
                    if !item.expanded {
                        continue;
                    }
                    if let Some(details) = &item.details {
                        writeln!(out, "      {}", details)?;
                    }
                    writeln!(out, "      Options:")?;
                    for option in &item.options {
                        writeln!(out, "        - {}", option)?;
                    }
                    let note = if item.note.is_empty() { "(none)" } else { item.note.as_str() };
                    writeln!(out, "      Notes: {}", note)?;
                }
            }
        }
    }

    if !view.focus.is_empty() {
        writeln!(out)?;
        writeln!(out, "Team Focus")?;
        for point in &view.focus {
            writeln!(out, "  {} {}: {}", point.icon.glyph(), point.heading, point.text)?;
        }
    }
    Ok(out)
}

fn render_card(out: &mut String, card: &MemberCard) -> fmt::Result {
    let stars: String = card.stars.iter().map(|&s| star_glyph(s)).collect();
    writeln!(out, "{} ({})", card.name, card.role)?;
    writeln!(out, "  {}", card.image_url)?;
    writeln!(out, "  Favorite part: {}", card.favorite_part)?;
    writeln!(out, "  \"{}\"", card.quote)?;
    writeln!(out, "  Robot Rating: {} {}", stars, card.rating_label)
}

pub fn render_team(view: &TeamView) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{}", view.heading)?;
    for card in &view.members {
        writeln!(out)?;
        render_card(&mut out, card)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::model::{ContentStore, Page, ViewState};
    use crate::render::{nav_entries, progress_view, team_view};
    use anyhow::Result;

    #[test]
    fn test_render_collapsed_progress() -> Result<()> {
        let content = ContentStore::embedded()?;
        let state = ViewState::new(&content);
        let text = render_progress("Rev Robotics", &progress_view(&content, &state))?;

        assert!(text.starts_with("Rev Robotics Team Progress"));
        assert!(text.contains("Current Issues ▼"));
        assert!(!text.contains("Battery falling out of place"));
        assert!(text.contains("Webcam Integration:"));
        Ok(())
    }

    #[test]
    fn test_render_expanded_item() -> Result<()> {
        let content = ContentStore::embedded()?;
        let mut state = ViewState::new(&content);
        state.toggle_section("Current Issues");
        state.toggle_item_info("battery");
        state.toggle_item_completion("battery");
        state.set_note("battery", "ordered parts");

        let text = render_progress("Rev Robotics", &progress_view(&content, &state))?;
        assert!(text.contains("Current Issues ▲"));
        assert!(text.contains("[✓] Battery falling out of place"));
        assert!(text.contains("The battery falling out is a critical issue"));
        assert!(text.contains("- Use industrial-strength velcro straps"));
        assert!(text.contains("Notes: ordered parts"));
        assert!(text.contains("[✗] Wheels movement is not perfect"));
        assert!(!text.contains("Fine-tune PID controller parameters"));
        Ok(())
    }

    #[test]
    fn test_render_team() -> Result<()> {
        let content = ContentStore::embedded()?;
        let text = render_team(&team_view(&content, &SiteConfig::default()))?;
        assert!(text.starts_with("Our Nerds"));
        assert!(text.contains("John Doe (Lead Engineer)"));
        assert!(text.contains("Robot Rating: ★★★★✫ 4.5"));
        Ok(())
    }

    #[test]
    fn test_render_nav() -> Result<()> {
        let content = ContentStore::embedded()?;
        let mut state = ViewState::new(&content);
        state.select_page(Page::Team);
        let line = render_nav("Rev Robotics", &nav_entries(&state), false);
        assert_eq!(line, "Rev Robotics  |  Progress Report  [Team]  |  🔇\n");
        Ok(())
    }
}
