//! The glizzy pile: a tray of draggable hotdog sprites that never runs dry.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlImageElement, window};

use crate::console_error;
use crate::{GLIZZY_SPRITES, GlizzyId};

use super::{CLASS_GLIZZY, PILE_ID, set_timeout, with_state};

/// Builds the initial pile.
pub(super) fn fill(doc: &Document) -> Result<(), JsValue> {
    let count = with_state(|s| s.config.pile_size).unwrap_or(0);
    for _ in 0..count {
        spawn_glizzy(doc)?;
    }
    Ok(())
}

/// Adds one sprite to the pile with a unique id and a random look.
pub(super) fn spawn_glizzy(doc: &Document) -> Result<(), JsValue> {
    let Some(pile) = doc.get_element_by_id(PILE_ID) else {
        console_error("Glizzy pile element not found");
        return Ok(());
    };
    let id: GlizzyId = with_state(|s| {
        let id = s.next_glizzy_id;
        s.next_glizzy_id += 1;
        id
    })
    .unwrap_or(0);
    let sprite = GLIZZY_SPRITES[rand_index(GLIZZY_SPRITES.len())];

    let img: HtmlImageElement = doc.create_element("img")?.dyn_into()?;
    img.set_src(&format!("images/{sprite}"));
    img.set_alt("Glizzy");
    img.set_class_name(CLASS_GLIZZY);
    // Native HTML dragging is off; the drag controller owns the interaction.
    img.set_draggable(false);
    img.set_attribute("data-glizzy-id", &id.to_string())?;
    pile.append_child(&img)?;
    Ok(())
}

/// Replaces an eaten glizzy after a short beat so the refill reads as a new
/// hotdog arriving rather than the old one snapping back.
pub(super) fn replenish() {
    set_timeout(200, || {
        if let Some(doc) = window().and_then(|w| w.document()) {
            if let Err(err) = spawn_glizzy(&doc) {
                console_error(&format!("Failed to replenish glizzy pile: {err:?}"));
            }
        }
    });
}

/// Cheap clock-derived randomness for cosmetic picks (not crypto secure).
pub(super) fn rand_index(len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let now = window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0);
    (now as u64 as usize)
        .wrapping_mul(1664525)
        .wrapping_add(1013904223)
        % len
}
