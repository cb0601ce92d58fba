pub mod audio;
pub mod content;
pub mod state;

pub use audio::{AudioCommand, Playback};
pub use content::{ContentStore, FocusPoint, Icon, Item, ItemKind, Section, SectionBody, TeamMember};
pub use state::{Page, ViewState};
