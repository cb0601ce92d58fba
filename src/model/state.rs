use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use crate::model::audio::{AudioCommand, Playback};
use crate::model::content::ContentStore;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(not(target_arch = "wasm32"), derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Page {
    #[default]
    Progress,
    Team,
}

impl Page {
    pub const ALL: [Page; 2] = [Page::Progress, Page::Team];

    pub fn label(self) -> &'static str {
        match self {
            Page::Progress => "Progress Report",
            Page::Team => "Team",
        }
    }
}

impl FromStr for Page {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "progress" => Ok(Page::Progress),
            "team" => Ok(Page::Team),
            other => bail!("Unknown page: {} (expected 'progress' or 'team')", other),
        }
    }
}

/// Ephemeral UI state of the page. Nothing here outlives a reload.
#[derive(Debug, Clone)]
pub struct ViewState {
    page: Page,
    active_section: Option<String>,
    expanded_items: HashSet<String>,
    completed_items: HashSet<String>,
    notes: HashMap<String, String>,
    loading: bool,
    audio_playing: bool,

    known_sections: HashSet<String>,
    known_items: HashSet<String>,
}

impl ViewState {
    pub fn new(content: &ContentStore) -> Self {
        Self {
            page: Page::default(),
            active_section: None,
            expanded_items: HashSet::new(),
            completed_items: HashSet::new(),
            notes: HashMap::new(),
            loading: true,
            audio_playing: false,
            known_sections: content.sections.iter().map(|s| s.title.clone()).collect(),
            known_items: content.items().map(|i| i.id.clone()).collect(),
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn select_page(&mut self, page: Page) {
        self.page = page;
    }

    pub fn active_section(&self) -> Option<&str> {
        self.active_section.as_deref()
    }

    pub fn is_section_open(&self, key: &str) -> bool {
        self.active_section.as_deref() == Some(key)
    }

    /// Opens `key`, collapsing whatever was open, or closes it if it already was.
    pub fn toggle_section(&mut self, key: &str) -> bool {
        if !self.known_sections.contains(key) {
            log::debug!("Ignoring toggle for unknown section {:?}", key);
            return false;
        }
        if self.is_section_open(key) {
            self.active_section = None;
        } else {
            self.active_section = Some(key.to_string());
        }
        true
    }

    pub fn is_item_expanded(&self, id: &str) -> bool {
        self.expanded_items.contains(id)
    }

    pub fn toggle_item_info(&mut self, id: &str) -> bool {
        self.flip(id, Flag::Expanded)
    }

    pub fn is_item_completed(&self, id: &str) -> bool {
        self.completed_items.contains(id)
    }

    pub fn toggle_item_completion(&mut self, id: &str) -> bool {
        self.flip(id, Flag::Completed)
    }

    pub fn note(&self, id: &str) -> &str {
        self.notes.get(id).map(String::as_str).unwrap_or("")
    }

    pub fn set_note(&mut self, id: &str, text: impl Into<String>) -> bool {
        if !self.known_items.contains(id) {
            log::debug!("Ignoring note for unknown item {:?}", id);
            return false;
        }
        let text = text.into();
        if text.is_empty() {
            self.notes.remove(id);
        } else {
            self.notes.insert(id.to_string(), text);
        }
        true
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// One-shot: returns true only for the call that dismissed the overlay.
    pub fn finish_loading(&mut self) -> bool {
        std::mem::replace(&mut self.loading, false)
    }

    pub fn is_audio_playing(&self) -> bool {
        self.audio_playing
    }

    /// Pauses the resource if it reports playing, starts it otherwise, then
    /// re-reads its state. A missing resource is a silent no-op.
    pub fn toggle_audio(&mut self, audio: Option<&dyn Playback>) -> Option<AudioCommand> {
        let Some(audio) = audio else {
            log::debug!("No audio resource available, ignoring toggle");
            return None;
        };

        let command = if audio.is_playing() {
            AudioCommand::Pause
        } else {
            AudioCommand::Play
        };
        if let Err(e) = command.issue(audio) {
            log::warn!("Audio {:?} failed: {:#}", command, e);
        }
        self.audio_playing = audio.is_playing();
        Some(command)
    }

    /// Records playback state reported by the resource itself.
    pub fn sync_audio(&mut self, playing: bool) {
        self.audio_playing = playing;
    }

    fn flip(&mut self, id: &str, flag: Flag) -> bool {
        if !self.known_items.contains(id) {
            log::debug!("Ignoring {:?} toggle for unknown item {:?}", flag, id);
            return false;
        }
        let set = match flag {
            Flag::Expanded => &mut self.expanded_items,
            Flag::Completed => &mut self.completed_items,
        };
        if !set.remove(id) {
            set.insert(id.to_string());
        }
        true
    }
}

#[derive(Debug, Clone, Copy)]
enum Flag {
    Expanded,
    Completed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::cell::Cell;

    fn state() -> Result<ViewState> {
        Ok(ViewState::new(&ContentStore::embedded()?))
    }

    struct MockAudio {
        playing: Cell<bool>,
        refuse_play: bool,
        calls: Cell<usize>,
    }

    impl MockAudio {
        fn new(refuse_play: bool) -> Self {
            Self {
                playing: Cell::new(false),
                refuse_play,
                calls: Cell::new(0),
            }
        }
    }

    impl Playback for MockAudio {
        fn play(&self) -> Result<()> {
            self.calls.set(self.calls.get() + 1);
            if self.refuse_play {
                return Err(anyhow!("NotAllowedError"));
            }
            self.playing.set(true);
            Ok(())
        }
        fn pause(&self) -> Result<()> {
            self.calls.set(self.calls.get() + 1);
            self.playing.set(false);
            Ok(())
        }
        fn is_playing(&self) -> bool {
            self.playing.get()
        }
    }

    #[test]
    fn test_initial_state() -> Result<()> {
        let s = state()?;
        assert_eq!(s.page(), Page::Progress);
        assert_eq!(s.active_section(), None);
        assert!(s.is_loading());
        assert!(!s.is_audio_playing());
        assert!(!s.is_item_expanded("battery"));
        assert!(!s.is_item_completed("battery"));
        assert_eq!(s.note("battery"), "");
        Ok(())
    }

    #[test]
    fn test_select_page() -> Result<()> {
        let mut s = state()?;
        s.select_page(Page::Team);
        assert_eq!(s.page(), Page::Team);
        s.select_page(Page::Progress);
        assert_eq!(s.page(), Page::Progress);
        Ok(())
    }

    #[test]
    fn test_toggle_section_twice_clears() -> Result<()> {
        let mut s = state()?;
        assert!(s.toggle_section("Current Issues"));
        assert_eq!(s.active_section(), Some("Current Issues"));
        assert!(s.toggle_section("Current Issues"));
        assert_eq!(s.active_section(), None);
        Ok(())
    }

    #[test]
    fn test_only_one_section_open() -> Result<()> {
        let mut s = state()?;
        s.toggle_section("Our Progress");
        s.toggle_section("Next Steps");
        assert!(!s.is_section_open("Our Progress"));
        assert!(s.is_section_open("Next Steps"));

        // Double toggle from a non-empty state restores it too.
        s.toggle_section("Current Issues");
        s.toggle_section("Current Issues");
        assert_eq!(s.active_section(), None);
        Ok(())
    }

    #[test]
    fn test_unknown_ids_are_noops() -> Result<()> {
        let mut s = state()?;
        s.toggle_section("Our Progress");
        assert!(!s.toggle_section("Flux Capacitor"));
        assert_eq!(s.active_section(), Some("Our Progress"));

        assert!(!s.toggle_item_info("laser"));
        assert!(!s.toggle_item_completion("laser"));
        assert!(!s.set_note("laser", "pew"));
        assert!(!s.is_item_expanded("laser"));
        assert_eq!(s.note("laser"), "");
        Ok(())
    }

    #[test]
    fn test_item_flags_are_independent() -> Result<()> {
        let mut s = state()?;
        s.toggle_item_info("wheels");
        assert!(s.is_item_expanded("wheels"));
        assert!(!s.is_item_completed("wheels"));
        assert!(!s.is_item_expanded("battery"));

        s.toggle_item_info("wheels");
        assert!(!s.is_item_expanded("wheels"));
        Ok(())
    }

    #[test]
    fn test_toggle_completion_twice_restores() -> Result<()> {
        let mut s = state()?;
        s.toggle_item_completion("servo-code");
        assert!(s.is_item_completed("servo-code"));
        s.toggle_item_completion("servo-code");
        assert!(!s.is_item_completed("servo-code"));
        Ok(())
    }

    #[test]
    fn test_notes_are_per_item() -> Result<()> {
        let mut s = state()?;
        assert!(s.set_note("battery", "ordered parts"));
        assert_eq!(s.note("battery"), "ordered parts");
        assert_eq!(s.note("wheels"), "");

        s.set_note("wheels", "check encoders");
        s.set_note("battery", "arrived");
        assert_eq!(s.note("battery"), "arrived");
        assert_eq!(s.note("wheels"), "check encoders");

        s.set_note("battery", "");
        assert_eq!(s.note("battery"), "");
        assert_eq!(s.note("wheels"), "check encoders");
        Ok(())
    }

    #[test]
    fn test_finish_loading_is_one_shot() -> Result<()> {
        let mut s = state()?;
        assert!(s.finish_loading());
        assert!(!s.is_loading());
        assert!(!s.finish_loading());
        assert!(!s.is_loading());
        Ok(())
    }

    #[test]
    fn test_toggle_audio_without_resource() -> Result<()> {
        let mut s = state()?;
        assert_eq!(s.toggle_audio(None), None);
        assert!(!s.is_audio_playing());
        Ok(())
    }

    #[test]
    fn test_toggle_audio_plays_and_pauses() -> Result<()> {
        let mut s = state()?;
        let audio = MockAudio::new(false);

        assert_eq!(s.toggle_audio(Some(&audio)), Some(AudioCommand::Play));
        assert!(s.is_audio_playing());
        assert_eq!(s.toggle_audio(Some(&audio)), Some(AudioCommand::Pause));
        assert!(!s.is_audio_playing());
        assert_eq!(audio.calls.get(), 2);
        Ok(())
    }

    #[test]
    fn test_toggle_audio_failed_play_keeps_flag_false() -> Result<()> {
        let mut s = state()?;
        let audio = MockAudio::new(true);

        assert_eq!(s.toggle_audio(Some(&audio)), Some(AudioCommand::Play));
        assert!(!s.is_audio_playing());
        // Still not playing, so the next toggle tries to play again.
        assert_eq!(s.toggle_audio(Some(&audio)), Some(AudioCommand::Play));
        Ok(())
    }

    #[test]
    fn test_toggle_audio_follows_resource_not_flag() -> Result<()> {
        let mut s = state()?;
        let audio = MockAudio::new(false);
        audio.playing.set(true);

        // The host started playback behind our back.
        assert_eq!(s.toggle_audio(Some(&audio)), Some(AudioCommand::Pause));
        assert!(!s.is_audio_playing());

        s.sync_audio(true);
        assert!(s.is_audio_playing());
        Ok(())
    }

    #[test]
    fn test_page_from_str() -> Result<()> {
        assert_eq!("team".parse::<Page>()?, Page::Team);
        assert_eq!("progress".parse::<Page>()?, Page::Progress);
        assert!("gallery".parse::<Page>().is_err());
        Ok(())
    }
}
