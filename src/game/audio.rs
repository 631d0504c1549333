//! Eat and meow sound effects plus the background music loop. Everything is
//! best-effort: autoplay policies may reject `play()` and the game keeps
//! running without sound.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlAudioElement, window};

use super::pile::rand_index;
use super::{GameEvent, set_timeout};

const MUSIC_ID: &str = "gc-music";
const FOLEY_ID: &str = "gc-foley";
const SFX_ID: &str = "gc-sfx";
const MEOW_VARIANTS: usize = 5;

pub(super) fn ensure_elements(doc: &Document) -> Result<(), JsValue> {
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
    if doc.get_element_by_id(MUSIC_ID).is_none() {
        let music = create_audio(doc, MUSIC_ID, "audio/Hymn_of_the_Cosmic_Cat.mp3", 0.1)?;
        music.set_loop(true);
        music.set_autoplay(true);
        body.append_child(&music)?;
    }
    if doc.get_element_by_id(FOLEY_ID).is_none() {
        let foley = create_audio(doc, FOLEY_ID, &meow_src(), 0.15)?;
        body.append_child(&foley)?;
    }
    if doc.get_element_by_id(SFX_ID).is_none() {
        let sfx = create_audio(doc, SFX_ID, "audio/cat_eat_1.mp3", 0.2)?;
        body.append_child(&sfx)?;
    }
    Ok(())
}

fn create_audio(
    doc: &Document,
    id: &str,
    src: &str,
    volume: f64,
) -> Result<HtmlAudioElement, JsValue> {
    let audio: HtmlAudioElement = doc.create_element("audio")?.dyn_into()?;
    audio.set_id(id);
    audio.set_src(src);
    audio.set_preload("auto");
    audio.set_volume(volume);
    Ok(audio)
}

fn meow_src() -> String {
    format!("audio/cat_meow_{}.mp3", rand_index(MEOW_VARIANTS) + 1)
}

fn audio_el(id: &str) -> Option<HtmlAudioElement> {
    window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
        .and_then(|el| el.dyn_into().ok())
}

/// Ambient meows on a loose 8-32s cadence, rescheduling itself forever.
pub(super) fn schedule_foley() {
    let delay = 8_000 + rand_index(24_000) as i32;
    set_timeout(delay, || {
        if let Some(foley) = audio_el(FOLEY_ID) {
            foley.set_src(&meow_src());
            foley.set_current_time(0.0);
            let _ = foley.play();
        }
        schedule_foley();
    });
}

pub(super) fn on_event(event: &GameEvent) {
    if let GameEvent::Fed { .. } = event {
        if let Some(sfx) = audio_el(SFX_ID) {
            sfx.set_current_time(0.0);
            let _ = sfx.play();
        }
    }
}
