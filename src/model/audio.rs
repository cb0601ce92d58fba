use anyhow::Result;

/// The single shared background-music resource.
///
/// `is_playing` must report what the resource is actually doing, not what it
/// was last asked to do.
pub trait Playback {
    fn play(&self) -> Result<()>;
    fn pause(&self) -> Result<()>;
    fn is_playing(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCommand {
    Play,
    Pause,
}

impl AudioCommand {
    pub fn issue(self, audio: &dyn Playback) -> Result<()> {
        match self {
            AudioCommand::Play => audio.play(),
            AudioCommand::Pause => audio.pause(),
        }
    }
}
