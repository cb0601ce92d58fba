use anyhow::{anyhow, Result};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlAudioElement;

use crate::model::audio::Playback;

/// The page's `<audio>` element. Playback state is always read back from it.
pub struct WebAudio {
    element: HtmlAudioElement,
    on_settled: Rc<dyn Fn(bool)>,
}

impl WebAudio {
    /// Returns `None` when the host page has no audio element with that id.
    pub fn find(element_id: &str, on_settled: Rc<dyn Fn(bool)>) -> Option<Self> {
        let element = web_sys::window()?
            .document()?
            .get_element_by_id(element_id)?
            .dyn_into::<HtmlAudioElement>()
            .ok()?;
        Some(Self { element, on_settled })
    }
}

impl Playback for WebAudio {
    fn play(&self) -> Result<()> {
        let promise = self
            .element
            .play()
            .map_err(|e| anyhow!("play() threw: {:?}", e))?;

        // play() resolves later; autoplay policy or a bad source rejects it.
        let element = self.element.clone();
        let on_settled = self.on_settled.clone();
        leptos::spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                log::warn!("Background music did not start: {:?}", e);
            }
            on_settled(!element.paused());
        });
        Ok(())
    }

    fn pause(&self) -> Result<()> {
        self.element
            .pause()
            .map_err(|e| anyhow!("pause() threw: {:?}", e))
    }

    fn is_playing(&self) -> bool {
        !self.element.paused()
    }
}
